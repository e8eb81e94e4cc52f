use crate::dawg::mapper::END_CODE;
use crate::errors::{DawgError, Result};

/// `check` value of a free slot.
pub const FREE: u32 = u32::MAX;

/// `check` value of the root slot.
pub const ROOT_CHECK: u32 = 0;

/// Position of the root slot.
pub const ROOT_POS: u32 = 0;

/// The encoded automaton: two parallel arrays of units.
///
/// Every slot in use represents the target of one transition. For a slot `p`
/// reached while walking:
///
/// - `base[p]` is the block offset of the state the slot leads to. The state's
///   transitions sit at `base[p] + code`. Offsets are unique per state, so the
///   offset doubles as the state's identity.
/// - `check[p]` is the offset of the state the transition leaves, so
///   `check[base[s] + code] == base[s]` holds for every valid transition.
///
/// Terminal states own the slot at `base[s] + END_CODE`; the `base` of that
/// slot holds the value index instead of an offset. Slot 0 is the root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DoubleArray {
    base: Vec<u32>,
    check: Vec<u32>,
}

impl DoubleArray {
    pub(crate) fn from_parts(base: Vec<u32>, check: Vec<u32>) -> Self {
        debug_assert_eq!(base.len(), check.len());
        DoubleArray { base, check }
    }

    /// Follows the transition with `code` from the state at `pos`.
    #[inline(always)]
    pub fn transition(&self, pos: u32, code: u32) -> Option<u32> {
        let offset = *self.base.get(pos as usize)?;
        let next = offset.checked_add(code)?;
        (self.check.get(next as usize) == Some(&offset)).then_some(next)
    }

    /// Value index if the state at `pos` is terminal.
    #[inline(always)]
    pub fn value_id(&self, pos: u32) -> Option<u32> {
        let leaf = self.transition(pos, END_CODE)?;
        Some(self.base[leaf as usize])
    }

    /// Number of units in each array.
    #[inline]
    pub fn num_units(&self) -> usize {
        self.base.len()
    }

    /// Number of slots in use, the root included.
    pub fn num_used(&self) -> usize {
        self.check.iter().filter(|&&c| c != FREE).count()
    }

    /// The `base` array.
    pub fn base(&self) -> &[u32] {
        &self.base
    }

    /// The `check` array.
    pub fn check(&self) -> &[u32] {
        &self.check
    }

    /// Verifies that every used slot points inside the arrays and that value
    /// indices address an existing value.
    pub(crate) fn validate(&self, alphabet_size: u32, num_values: usize) -> Result<()> {
        let n = self.base.len();
        if n == 0 || n != self.check.len() {
            return Err(DawgError::corrupt_data(format!(
                "base has {} units and check has {}",
                n,
                self.check.len()
            )));
        }
        if self.check[0] != ROOT_CHECK || self.base[0] == 0 || (n > 1 && self.base[0] as usize >= n) {
            return Err(DawgError::corrupt_data("invalid root unit"));
        }

        for p in 1..n {
            let parent = self.check[p];
            if parent == FREE {
                continue;
            }
            let parent_offset = parent as usize;
            if parent == ROOT_CHECK || parent_offset > p || p - parent_offset > alphabet_size as usize {
                return Err(DawgError::corrupt_data(format!(
                    "unit {p} has out-of-range check {parent}"
                )));
            }
            let base = self.base[p] as usize;
            if p == parent_offset {
                if base >= num_values {
                    return Err(DawgError::corrupt_data(format!(
                        "unit {p} refers to value {base} of {num_values}"
                    )));
                }
            } else if base == 0 || base >= n {
                return Err(DawgError::corrupt_data(format!(
                    "unit {p} has out-of-range base {base}"
                )));
            }
        }
        Ok(())
    }
}
