use std::hash::Hash;

use hashbrown::HashMap;

use crate::errors::{DawgError, Result};

/// Values addressed by the index stored in terminal states.
///
/// The store keeps no link back to keys.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueStore<V> {
    values: Vec<V>,
}

impl<V> ValueStore<V> {
    pub(crate) fn from_vec(values: Vec<V>) -> Self {
        ValueStore { values }
    }

    /// Returns the value at `index`.
    #[inline]
    pub fn get(&self, index: u32) -> Option<&V> {
        self.values.get(usize::try_from(index).ok()?)
    }

    /// Number of stored values.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if no value is stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over the values in index order.
    pub fn iter(&self) -> std::slice::Iter<'_, V> {
        self.values.iter()
    }
}

/// Moves `values` into a [`ValueStore`], one slot per input position.
pub(crate) fn positional<V>(values: Vec<V>) -> Result<(ValueStore<V>, Vec<u32>)> {
    let len = u32::try_from(values.len()).map_err(|_| {
        DawgError::invalid_input(
            "values",
            format!("{} values cannot be indexed with u32", values.len()),
        )
    })?;
    Ok((ValueStore::from_vec(values), (0..len).collect()))
}

/// Moves `values` into a [`ValueStore`] and returns the index assigned to
/// each input position.
///
/// With `dedup`, equal values share one slot. Slots are numbered in order of
/// first occurrence, so the result only depends on the input sequence.
pub(crate) fn intern<V>(values: Vec<V>, dedup: bool) -> Result<(ValueStore<V>, Vec<u32>)>
where
    V: Eq + Hash,
{
    if !dedup || values.len() > u32::MAX as usize {
        return positional(values);
    }

    let (ids, first_seen) = {
        let mut slots: HashMap<&V, u32> = HashMap::with_capacity(values.len());
        let mut ids = Vec::with_capacity(values.len());
        let mut first_seen = Vec::with_capacity(values.len());
        for value in &values {
            let next = slots.len() as u32;
            let id = *slots.entry(value).or_insert(next);
            first_seen.push(id == next);
            ids.push(id);
        }
        (ids, first_seen)
    };

    let unique: Vec<V> = values
        .into_iter()
        .zip(first_seen)
        .filter_map(|(value, first)| first.then_some(value))
        .collect();

    Ok((ValueStore::from_vec(unique), ids))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn dedup_shares_slots_by_first_occurrence() {
        let (store, ids) = intern(vec![3, 1, 3, 2, 1], true).unwrap();
        assert_eq!(ids, vec![0, 1, 0, 2, 1]);
        assert_eq!(store.iter().copied().collect::<Vec<_>>(), vec![3, 1, 2]);
        for (pos, &v) in [3, 1, 3, 2, 1].iter().enumerate() {
            assert_eq!(store.get(ids[pos]), Some(&v));
        }
    }

    #[test]
    fn without_dedup_indices_follow_positions() {
        let (store, ids) = intern(vec!["a", "a", "b"], false).unwrap();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(store.len(), 3);
        assert_eq!(store.get(1), Some(&"a"));
    }

    #[test]
    fn out_of_range_index_is_none() {
        let (store, _) = intern(vec![10u64], true).unwrap();
        assert_eq!(store.get(0), Some(&10));
        assert_eq!(store.get(1), None);
        assert_eq!(store.get(u32::MAX), None);
    }

    #[test]
    fn positional_needs_no_hash() {
        let (store, ids) = positional(vec![0.5f64, f64::NAN, 0.5]).unwrap();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(store.len(), 3);
        assert_eq!(store.get(2), Some(&0.5));
        assert!(store.get(1).unwrap().is_nan());
    }

    #[test]
    fn empty_store() {
        let (store, ids) = intern(Vec::<String>::new(), true).unwrap();
        assert!(store.is_empty());
        assert!(ids.is_empty());
    }
}
