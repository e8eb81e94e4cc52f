/// Default upper bound on the length of the `base`/`check` arrays.
pub const DEFAULT_MAX_UNITS: u32 = 0x7fff_ffff;

/// Settings of a build.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildConfig {
    /// Merge identical subtrees (DAWG) instead of building a plain trie.
    pub minimize: bool,

    /// Upper bound on the number of units the encoder may allocate. Exceeding
    /// it fails the build with [`DawgError::Build`](crate::DawgError::Build).
    pub max_units: u32,
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            minimize: true,
            max_units: DEFAULT_MAX_UNITS,
        }
    }
}
