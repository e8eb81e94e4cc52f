use std::collections::BTreeMap;
use std::hash::Hash;
use std::iter::FusedIterator;

use super::builder::build_automaton;
use super::config::BuildConfig;
use super::double_array::{DoubleArray, ROOT_POS};
use super::encoder;
use super::keyset::KeySet;
use super::mapper::CodeMapper;
use super::values::{self, ValueStore};
use crate::errors::{DawgError, Result};

/// An immutable map from strings to values, stored as a double-array
/// encoded automaton.
///
/// Build it once with [`DawgMap::new`] or a [`DawgMapBuilder`]; afterwards
/// it is only read. All lookups take `&self`, so a `DawgMap` can be shared
/// between threads freely.
///
/// # Examples
///
/// ```
/// use dawgmap::DawgMap;
///
/// let map = DawgMap::new(["a", "ab", "abc"], [1, 2, 3]).unwrap();
/// assert_eq!(map.get("ab"), Some(&2));
/// assert_eq!(map.get("abcd"), None);
///
/// let hits: Vec<_> = map.common_prefix_search("abcd").collect();
/// assert_eq!(hits, [("a", &1), ("ab", &2), ("abc", &3)]);
/// ```
#[derive(Clone, Debug)]
pub struct DawgMap<V> {
    da: DoubleArray,
    mapper: CodeMapper,
    values: ValueStore<V>,
    num_keys: usize,
    num_states: usize,
    minimized: bool,
}

impl<V> DawgMap<V>
where
    V: Eq + Hash,
{
    /// Builds a map pairing `keys[i]` with `values[i]`, with default settings.
    ///
    /// # Errors
    ///
    /// [`DawgError::InvalidInput`] is returned when the number of keys and
    /// values differ or a key occurs twice. [`DawgError::Build`] is returned
    /// when the encoded arrays would exceed
    /// [`DEFAULT_MAX_UNITS`](crate::dawg::config::DEFAULT_MAX_UNITS).
    pub fn new<K, KI, VI>(keys: KI, values: VI) -> Result<Self>
    where
        K: Into<String>,
        KI: IntoIterator<Item = K>,
        VI: IntoIterator<Item = V>,
    {
        DawgMapBuilder::new().build(keys, values)
    }

    /// Builds a map from key/value pairs, with default settings.
    ///
    /// # Errors
    ///
    /// Same as [`DawgMap::new`].
    pub fn from_pairs<K, I>(pairs: I) -> Result<Self>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        DawgMapBuilder::new().build_from_pairs(pairs)
    }
}

impl<V> DawgMap<V> {
    /// Builds a map pairing `keys[i]` with `values[i]` without comparing
    /// values, so `V` needs no bounds (`f64` values, for example).
    ///
    /// Every key gets its own value slot, so only structure without values
    /// can be shared. Use [`DawgMap::new`] when `V: Eq + Hash` for a smaller
    /// automaton.
    ///
    /// # Errors
    ///
    /// Same as [`DawgMap::new`].
    pub fn new_unshared<K, KI, VI>(keys: KI, values: VI) -> Result<Self>
    where
        K: Into<String>,
        KI: IntoIterator<Item = K>,
        VI: IntoIterator<Item = V>,
    {
        DawgMapBuilder::new().build_unshared(keys, values)
    }
}

impl<V> TryFrom<BTreeMap<String, V>> for DawgMap<V>
where
    V: Eq + Hash,
{
    type Error = DawgError;

    fn try_from(map: BTreeMap<String, V>) -> Result<Self> {
        DawgMapBuilder::new().build_from_key_set(KeySet::from(map))
    }
}

impl<V> DawgMap<V> {
    pub(crate) fn from_parts(
        da: DoubleArray,
        mapper: CodeMapper,
        values: ValueStore<V>,
        num_keys: usize,
        num_states: usize,
        minimized: bool,
    ) -> Self {
        DawgMap {
            da,
            mapper,
            values,
            num_keys,
            num_states,
            minimized,
        }
    }

    /// Returns the value of `key`, or `None` if it is not in the map.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.exact_match_search(key)
            .and_then(|id| self.values.get(id))
    }

    /// Like [`get`](Self::get), for a key that is already split into chars.
    #[inline]
    pub fn get_chars(&self, key: &[char]) -> Option<&V> {
        self.find(key.iter().copied())
            .and_then(|id| self.values.get(id))
    }

    /// True if `key` is in the map.
    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.exact_match_search(key).is_some()
    }

    /// Returns the index of the value of `key` in [`values`](Self::values).
    ///
    /// With minimization, keys with equal values share one index.
    #[inline]
    pub fn exact_match_search(&self, key: &str) -> Option<u32> {
        self.find(key.chars())
    }

    fn find(&self, key: impl IntoIterator<Item = char>) -> Option<u32> {
        let pos = key.into_iter().try_fold(ROOT_POS, |pos, ch| {
            self.da.transition(pos, self.mapper.get(ch)?)
        })?;
        self.da.value_id(pos)
    }

    #[inline(always)]
    fn value_at(&self, pos: u32) -> Option<&V> {
        self.da.value_id(pos).and_then(|id| self.values.get(id))
    }

    /// Returns every key that is a prefix of `text`, paired with its value,
    /// from the shortest to the longest.
    ///
    /// The search stops at the first character that leaves the automaton. The
    /// returned iterator is lazy; clone it to restart from the beginning.
    pub fn common_prefix_search<'a>(&'a self, text: &'a str) -> CommonPrefixSearch<'a, V> {
        CommonPrefixSearch {
            text,
            matches: PrefixMatches::new(self, text.char_indices().map(char_end as CharStep)),
        }
    }

    /// Like [`common_prefix_search`](Self::common_prefix_search), for text
    /// that is already split into chars. Yields the length of each matching
    /// prefix in chars.
    pub fn common_prefix_search_chars<'a>(
        &'a self,
        text: &'a [char],
    ) -> CommonPrefixSearchChars<'a, V> {
        CommonPrefixSearchChars {
            matches: PrefixMatches::new(
                self,
                text.iter().copied().enumerate().map(next_index as CharStep),
            ),
        }
    }

    /// Number of keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.num_keys
    }

    /// True if the map has no keys.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_keys == 0
    }

    /// Number of automaton states the arrays were encoded from.
    pub fn num_states(&self) -> usize {
        self.num_states
    }

    /// Length of the `base` and `check` arrays.
    pub fn num_units(&self) -> usize {
        self.da.num_units()
    }

    /// True if identical subtrees were merged during the build.
    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    /// The encoded arrays.
    pub fn double_array(&self) -> &DoubleArray {
        &self.da
    }

    /// The character to code table.
    pub fn mapper(&self) -> &CodeMapper {
        &self.mapper
    }

    /// The stored values.
    pub fn values(&self) -> &ValueStore<V> {
        &self.values
    }
}

type CharStep = fn((usize, char)) -> (usize, char);

// Maps a char and its byte index to the byte index right after it.
fn char_end((start, ch): (usize, char)) -> (usize, char) {
    (start + ch.len_utf8(), ch)
}

fn next_index((index, ch): (usize, char)) -> (usize, char) {
    (index + 1, ch)
}

/// Walks the automaton along `steps` and yields `(end index, value)` for
/// every terminal state on the way, the root included.
struct PrefixMatches<'a, V, I> {
    map: &'a DawgMap<V>,
    steps: I,
    pos: Option<u32>,
    at_root: bool,
}

impl<'a, V, I> PrefixMatches<'a, V, I>
where
    I: Iterator<Item = (usize, char)>,
{
    fn new(map: &'a DawgMap<V>, steps: I) -> Self {
        PrefixMatches {
            map,
            steps,
            pos: Some(ROOT_POS),
            at_root: true,
        }
    }
}

impl<V, I: Clone> Clone for PrefixMatches<'_, V, I> {
    fn clone(&self) -> Self {
        PrefixMatches {
            map: self.map,
            steps: self.steps.clone(),
            pos: self.pos,
            at_root: self.at_root,
        }
    }
}

impl<'a, V, I> Iterator for PrefixMatches<'a, V, I>
where
    I: Iterator<Item = (usize, char)>,
{
    type Item = (usize, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.at_root {
            self.at_root = false;
            if let Some(value) = self.map.value_at(ROOT_POS) {
                return Some((0, value));
            }
        }
        loop {
            let pos = self.pos?;
            let Some((end, ch)) = self.steps.next() else {
                self.pos = None;
                return None;
            };
            self.pos = self
                .map
                .mapper
                .get(ch)
                .and_then(|code| self.map.da.transition(pos, code));
            if let Some(value) = self.map.value_at(self.pos?) {
                return Some((end, value));
            }
        }
    }
}

impl<V, I> FusedIterator for PrefixMatches<'_, V, I> where I: Iterator<Item = (usize, char)> {}

/// Iterator returned by [`DawgMap::common_prefix_search`].
pub struct CommonPrefixSearch<'a, V> {
    text: &'a str,
    matches: PrefixMatches<'a, V, std::iter::Map<std::str::CharIndices<'a>, CharStep>>,
}

impl<V> Clone for CommonPrefixSearch<'_, V> {
    fn clone(&self) -> Self {
        CommonPrefixSearch {
            text: self.text,
            matches: self.matches.clone(),
        }
    }
}

impl<'a, V> Iterator for CommonPrefixSearch<'a, V> {
    type Item = (&'a str, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let (end, value) = self.matches.next()?;
        Some((&self.text[..end], value))
    }
}

impl<V> FusedIterator for CommonPrefixSearch<'_, V> {}

/// Iterator returned by [`DawgMap::common_prefix_search_chars`].
pub struct CommonPrefixSearchChars<'a, V> {
    #[allow(clippy::type_complexity)]
    matches: PrefixMatches<
        'a,
        V,
        std::iter::Map<std::iter::Enumerate<std::iter::Copied<std::slice::Iter<'a, char>>>, CharStep>,
    >,
}

impl<V> Clone for CommonPrefixSearchChars<'_, V> {
    fn clone(&self) -> Self {
        CommonPrefixSearchChars {
            matches: self.matches.clone(),
        }
    }
}

impl<'a, V> Iterator for CommonPrefixSearchChars<'a, V> {
    type Item = (usize, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.matches.next()
    }
}

impl<V> FusedIterator for CommonPrefixSearchChars<'_, V> {}

/// Builds [`DawgMap`]s with non-default settings.
///
/// # Examples
///
/// ```
/// use dawgmap::DawgMapBuilder;
///
/// let map = DawgMapBuilder::new()
///     .minimize(false)
///     .max_units(1 << 16)
///     .build(["BAKE", "CAKE"], [4, 4])
///     .unwrap();
/// assert!(!map.is_minimized());
/// assert_eq!(map.get("CAKE"), Some(&4));
/// ```
#[derive(Clone, Debug, Default)]
pub struct DawgMapBuilder {
    config: BuildConfig,
}

impl DawgMapBuilder {
    /// Creates a builder with [`BuildConfig::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder with the given settings.
    pub fn with_config(config: BuildConfig) -> Self {
        DawgMapBuilder { config }
    }

    /// Whether to merge identical subtrees. Defaults to `true`.
    pub fn minimize(mut self, minimize: bool) -> Self {
        self.config.minimize = minimize;
        self
    }

    /// Upper bound on the length of the encoded arrays.
    pub fn max_units(mut self, max_units: u32) -> Self {
        self.config.max_units = max_units;
        self
    }

    /// The current settings.
    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Builds a map pairing `keys[i]` with `values[i]`.
    ///
    /// # Errors
    ///
    /// [`DawgError::InvalidInput`] is returned when the number of keys and
    /// values differ or a key occurs twice. [`DawgError::Build`] is returned
    /// when the encoded arrays would exceed the configured `max_units`.
    pub fn build<K, V, KI, VI>(self, keys: KI, values: VI) -> Result<DawgMap<V>>
    where
        K: Into<String>,
        V: Eq + Hash,
        KI: IntoIterator<Item = K>,
        VI: IntoIterator<Item = V>,
    {
        self.build_from_key_set(KeySet::from_parallel(keys, values)?)
    }

    /// Builds a map from key/value pairs.
    ///
    /// # Errors
    ///
    /// Same as [`build`](Self::build).
    pub fn build_from_pairs<K, V, I>(self, pairs: I) -> Result<DawgMap<V>>
    where
        K: Into<String>,
        V: Eq + Hash,
        I: IntoIterator<Item = (K, V)>,
    {
        self.build_from_key_set(KeySet::from_pairs(pairs)?)
    }

    /// Builds a map from an already validated [`KeySet`].
    ///
    /// # Errors
    ///
    /// [`DawgError::Build`] is returned when the encoded arrays would exceed
    /// the configured `max_units`.
    pub fn build_from_key_set<V>(self, set: KeySet<V>) -> Result<DawgMap<V>>
    where
        V: Eq + Hash,
    {
        let minimize = self.config.minimize;
        self.assemble(set, |values| values::intern(values, minimize))
    }

    /// Like [`build`](Self::build), for values that cannot be compared.
    ///
    /// Each key gets its own value slot, so terminal states never merge.
    ///
    /// # Errors
    ///
    /// Same as [`build`](Self::build).
    pub fn build_unshared<K, V, KI, VI>(self, keys: KI, values: VI) -> Result<DawgMap<V>>
    where
        K: Into<String>,
        KI: IntoIterator<Item = K>,
        VI: IntoIterator<Item = V>,
    {
        self.build_unshared_from_key_set(KeySet::from_parallel(keys, values)?)
    }

    /// Like [`build_from_pairs`](Self::build_from_pairs), for values that
    /// cannot be compared.
    ///
    /// # Errors
    ///
    /// Same as [`build`](Self::build).
    pub fn build_unshared_from_pairs<K, V, I>(self, pairs: I) -> Result<DawgMap<V>>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.build_unshared_from_key_set(KeySet::from_pairs(pairs)?)
    }

    /// Like [`build_from_key_set`](Self::build_from_key_set), for values that
    /// cannot be compared.
    ///
    /// # Errors
    ///
    /// [`DawgError::Build`] is returned when the encoded arrays would exceed
    /// the configured `max_units`.
    pub fn build_unshared_from_key_set<V>(self, set: KeySet<V>) -> Result<DawgMap<V>> {
        self.assemble(set, values::positional)
    }

    fn assemble<V, F>(self, set: KeySet<V>, store: F) -> Result<DawgMap<V>>
    where
        F: FnOnce(Vec<V>) -> Result<(ValueStore<V>, Vec<u32>)>,
    {
        let BuildConfig {
            minimize,
            max_units,
        } = self.config;

        let mapper = CodeMapper::from_keys(set.keys());
        let num_keys = set.len();
        let (keys, values): (Vec<String>, Vec<V>) = set.into_entries().into_iter().unzip();
        let (values, ids) = store(values)?;

        let automaton = build_automaton(keys.iter().zip(ids), minimize)?;
        let da = encoder::encode(&automaton, &mapper, max_units)?;

        Ok(DawgMap::from_parts(
            da,
            mapper,
            values,
            num_keys,
            automaton.num_states(),
            minimize,
        ))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn abc() -> DawgMap<i32> {
        DawgMap::new(["a", "ab", "abc"], [1, 2, 3]).unwrap()
    }

    #[test]
    fn basic_lookup() {
        let map = abc();
        assert_eq!(map.get("a"), Some(&1));
        assert_eq!(map.get("ab"), Some(&2));
        assert_eq!(map.get("abc"), Some(&3));
        assert_eq!(map.get("abcd"), None);
        assert_eq!(map.get(""), None);
        assert_eq!(map.get("b"), None);
        assert_eq!(map.get("ac"), None);
        assert_eq!(map.len(), 3);
        assert!(!map.is_empty());
    }

    #[test]
    fn common_prefix_search_in_length_order() {
        let map = abc();
        let hits: Vec<_> = map.common_prefix_search("abcd").collect();
        assert_eq!(hits, [("a", &1), ("ab", &2), ("abc", &3)]);

        let hits: Vec<_> = map.common_prefix_search("ab").collect();
        assert_eq!(hits, [("a", &1), ("ab", &2)]);

        assert_eq!(map.common_prefix_search("xabc").next(), None);
        assert_eq!(map.common_prefix_search("").next(), None);
    }

    #[test]
    fn common_prefix_search_restarts() {
        let map = abc();
        let mut it = map.common_prefix_search("abc");
        assert_eq!(it.next(), Some(("a", &1)));
        let rest = it.clone();
        assert_eq!(it.collect::<Vec<_>>(), rest.collect::<Vec<_>>());

        let first: Vec<_> = map.common_prefix_search("abc").collect();
        let second: Vec<_> = map.common_prefix_search("abc").collect();
        assert_eq!(first, second);
    }

    #[test]
    fn common_prefix_search_is_fused() {
        let map = abc();
        let mut it = map.common_prefix_search("ab");
        assert_eq!(it.by_ref().count(), 2);
        assert_eq!(it.next(), None);
        assert_eq!(it.next(), None);
    }

    #[test]
    fn common_prefix_search_slices_multibyte_text() {
        let map = DawgMap::new(["授人", "授人以渔", "以"], [2, 4, 1]).unwrap();
        let hits: Vec<_> = map.common_prefix_search("授人以渔不如").collect();
        assert_eq!(hits, [("授人", &2), ("授人以渔", &4)]);

        let chars: Vec<char> = "授人以渔不如".chars().collect();
        let hits: Vec<_> = map.common_prefix_search_chars(&chars).collect();
        assert_eq!(hits, [(2, &2), (4, &4)]);
    }

    #[test]
    fn empty_map() {
        let map = DawgMap::<u32>::new(Vec::<String>::new(), Vec::new()).unwrap();
        assert!(map.is_empty());
        assert_eq!(map.get(""), None);
        assert_eq!(map.get("anything"), None);
        assert_eq!(map.common_prefix_search("anything").count(), 0);
        assert_eq!(map.num_units(), 1);
    }

    #[test]
    fn empty_key() {
        let map = DawgMap::from_pairs([("", 0), ("a", 1)]).unwrap();
        assert_eq!(map.get(""), Some(&0));
        assert_eq!(map.get("a"), Some(&1));
        let hits: Vec<_> = map.common_prefix_search("ab").collect();
        assert_eq!(hits, [("", &0), ("a", &1)]);
        let hits: Vec<_> = map.common_prefix_search("").collect();
        assert_eq!(hits, [("", &0)]);
    }

    #[test]
    fn duplicate_key_gives_error() {
        let res = DawgMap::new(["x", "x"], [1, 2]);
        assert!(matches!(res, Err(DawgError::InvalidInput(_))));
    }

    #[test]
    fn mismatched_counts_give_error() {
        let res = DawgMap::new(["x", "y"], [1]);
        assert!(matches!(res, Err(DawgError::InvalidInput(_))));
    }

    #[test]
    fn unsorted_input_is_sorted() {
        let map = DawgMap::new(["LAKE", "BAKE", "FAKE", "CAKE"], [4, 1, 3, 2]).unwrap();
        for (key, value) in [("BAKE", 1), ("CAKE", 2), ("FAKE", 3), ("LAKE", 4)] {
            assert_eq!(map.get(key), Some(&value));
        }
    }

    #[test]
    fn unknown_characters_are_absent() {
        let map = abc();
        assert_eq!(map.get("a\u{0}"), None);
        assert_eq!(map.get("授"), None);
        assert_eq!(map.get(&char::MAX.to_string()), None);
        let hits: Vec<_> = map.common_prefix_search("a授c").collect();
        assert_eq!(hits, [("a", &1)]);
    }

    #[test]
    fn exact_match_search_shares_equal_values() {
        let map = DawgMap::new(["BAKE", "CAKE", "FAKE"], [4, 4, 5]).unwrap();
        assert_eq!(map.exact_match_search("BAKE"), map.exact_match_search("CAKE"));
        assert_ne!(map.exact_match_search("BAKE"), map.exact_match_search("FAKE"));
        assert_eq!(map.values().len(), 2);
        assert!(map.contains_key("FAKE"));
        assert!(!map.contains_key("AKE"));
    }

    #[test]
    fn get_chars_matches_get() {
        let map = abc();
        let key: Vec<char> = "ab".chars().collect();
        assert_eq!(map.get_chars(&key), Some(&2));
        assert_eq!(map.get_chars(&['b']), None);
        assert_eq!(map.get_chars(&[]), None);
    }

    #[test]
    fn minimized_and_plain_maps_agree() {
        let keys = ["BAKE", "BAKED", "BAKER", "CAKE", "CAKED", "FAKE", "LAKE"];
        let values: Vec<usize> = keys.iter().map(|k| k.len()).collect();
        let dawg = DawgMapBuilder::new().build(keys, values.clone()).unwrap();
        let trie = DawgMapBuilder::new()
            .minimize(false)
            .build(keys, values)
            .unwrap();
        assert!(dawg.is_minimized());
        assert!(!trie.is_minimized());
        assert!(dawg.num_states() < trie.num_states());
        for text in ["BAKERS", "CAKED", "FAKE", "LAK", "MAKE", ""] {
            assert_eq!(dawg.get(text), trie.get(text));
            assert_eq!(
                dawg.common_prefix_search(text).collect::<Vec<_>>(),
                trie.common_prefix_search(text).collect::<Vec<_>>()
            );
        }
    }

    #[test]
    fn max_units_is_enforced() {
        let res = DawgMapBuilder::new()
            .max_units(4)
            .build(["BAKE", "CAKE", "FAKE"], [1, 2, 3]);
        assert!(matches!(res, Err(DawgError::Build(_))));

        let config = BuildConfig {
            minimize: true,
            max_units: 1 << 12,
        };
        let map = DawgMapBuilder::with_config(config)
            .build(["BAKE", "CAKE", "FAKE"], [1, 2, 3])
            .unwrap();
        assert_eq!(*DawgMapBuilder::with_config(config).config(), config);
        assert_eq!(map.get("FAKE"), Some(&3));
    }

    #[test]
    fn from_btree_map() {
        let source: BTreeMap<String, u8> =
            [("two".to_string(), 2), ("one".to_string(), 1)].into();
        let map = DawgMap::try_from(source).unwrap();
        assert_eq!(map.get("one"), Some(&1));
        assert_eq!(map.get("two"), Some(&2));
    }

    #[test]
    fn dawg_map_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DawgMap<String>>();
    }

    #[test]
    fn concurrent_readers_see_the_same_map() {
        let words: Vec<String> = (0..2_000u32).map(|i| format!("{i:o}")).collect();
        let map = DawgMap::new(words.iter().cloned(), 0u32..words.len() as u32).unwrap();

        std::thread::scope(|scope| {
            for reader in 0..8usize {
                let map = &map;
                let words = &words;
                scope.spawn(move || {
                    for (i, word) in words.iter().enumerate().skip(reader).step_by(3) {
                        assert_eq!(map.get(word), Some(&(i as u32)));
                        let text = format!("{word}9");
                        let last = map.common_prefix_search(&text).last();
                        assert_eq!(last, Some((word.as_str(), &(i as u32))));
                    }
                    assert_eq!(map.get("9"), None);
                });
            }
        });
    }

    #[test]
    fn values_without_eq_or_hash() {
        let map = DawgMap::new_unshared(["half", "one", "onehalf"], [0.5f64, 1.0, 1.5]).unwrap();
        assert_eq!(map.get("half"), Some(&0.5));
        assert_eq!(map.get("onehalf"), Some(&1.5));
        assert_eq!(map.get("on"), None);
        assert_eq!(map.values().len(), 3);
        let hits: Vec<_> = map.common_prefix_search("onehalfway").collect();
        assert_eq!(hits, [("one", &1.0), ("onehalf", &1.5)]);

        #[derive(Debug, PartialEq)]
        struct Span {
            start: f32,
            end: f32,
        }
        let spans = DawgMapBuilder::new()
            .minimize(false)
            .build_unshared_from_pairs([
                ("b", Span { start: 1.0, end: 2.0 }),
                ("a", Span { start: 0.0, end: 1.0 }),
            ])
            .unwrap();
        assert_eq!(spans.get("a"), Some(&Span { start: 0.0, end: 1.0 }));
        assert_eq!(spans.get("b").map(|s| s.end), Some(2.0));

        let res = DawgMap::new_unshared(["x", "x"], [0.0f64, 1.0]);
        assert!(matches!(res, Err(DawgError::InvalidInput(_))));
    }

    #[test]
    fn unshared_values_keep_one_slot_per_key() {
        let shared = DawgMap::new(["BAKE", "CAKE"], [1, 1]).unwrap();
        let unshared = DawgMap::new_unshared(["BAKE", "CAKE"], [1, 1]).unwrap();
        assert_eq!(shared.values().len(), 1);
        assert_eq!(unshared.values().len(), 2);
        assert!(shared.num_states() < unshared.num_states());
        assert_eq!(unshared.get("CAKE"), Some(&1));
    }

    #[test]
    fn values_of_any_hashable_type() {
        let map = DawgMap::from_pairs([
            ("apple", "fruit".to_string()),
            ("carrot", "vegetable".to_string()),
            ("cherry", "fruit".to_string()),
        ])
        .unwrap();
        assert_eq!(map.get("cherry").map(String::as_str), Some("fruit"));
        assert_eq!(map.values().len(), 2);
    }
}
