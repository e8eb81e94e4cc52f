use std::collections::BTreeMap;

use crate::errors::{DawgError, Result};

/// A validated, sorted sequence of key/value pairs.
///
/// This is the input of the automaton builder: keys are unique and sorted by
/// code point sequence. `str`'s ordering compares UTF-8 bytes, which is the
/// same order as comparing the decoded `char`s one by one.
#[derive(Clone, Debug)]
pub struct KeySet<V> {
    entries: Vec<(String, V)>,
}

impl<V> KeySet<V> {
    /// Pairs `keys[i]` with `values[i]`, sorts and validates the result.
    ///
    /// # Errors
    ///
    /// [`DawgError::InvalidInput`] is returned when
    ///   - the number of keys and values differ, or
    ///   - a key occurs more than once.
    pub fn from_parallel<K, KI, VI>(keys: KI, values: VI) -> Result<Self>
    where
        K: Into<String>,
        KI: IntoIterator<Item = K>,
        VI: IntoIterator<Item = V>,
    {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        let values: Vec<V> = values.into_iter().collect();
        if keys.len() != values.len() {
            return Err(DawgError::invalid_input(
                "values",
                format!("{} keys were given with {} values", keys.len(), values.len()),
            ));
        }
        Self::from_pairs(keys.into_iter().zip(values))
    }

    /// Sorts and validates key/value pairs.
    ///
    /// # Errors
    ///
    /// [`DawgError::InvalidInput`] is returned when a key occurs more than once.
    pub fn from_pairs<K, I>(pairs: I) -> Result<Self>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut entries: Vec<(String, V)> =
            pairs.into_iter().map(|(k, v)| (k.into(), v)).collect();
        entries.sort_by(|(k1, _), (k2, _)| k1.cmp(k2));
        if let Some(pair) = entries.windows(2).find(|pair| pair[0].0 == pair[1].0) {
            return Err(DawgError::invalid_input(
                "keys",
                format!("duplicate key {:?}", pair[0].0),
            ));
        }
        Ok(KeySet { entries })
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if there are no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Returns the sorted pairs.
    pub fn into_entries(self) -> Vec<(String, V)> {
        self.entries
    }
}

impl<V> From<BTreeMap<String, V>> for KeySet<V> {
    /// A `BTreeMap` is already sorted and free of duplicates.
    fn from(map: BTreeMap<String, V>) -> Self {
        KeySet {
            entries: map.into_iter().collect(),
        }
    }
}
