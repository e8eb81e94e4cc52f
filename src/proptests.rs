use super::*;

use proptest::prelude::*;
use std::collections::BTreeMap;

// A small alphabet with multi-byte chars so that keys share prefixes and
// suffixes often.
const KEY: &str = "[abé授鱼]{0,6}";

fn model_strategy() -> impl Strategy<Value = BTreeMap<String, u8>> {
    prop::collection::btree_map(KEY, 0u8..4, 0..48)
}

fn validate_map<V>(map: &DawgMap<V>) {
    let da = map.double_array();
    da.validate(map.mapper().alphabet_size(), map.values().len())
        .expect("encoded arrays must pass the load checks");
    assert_eq!(da.base().len(), da.check().len());
    assert!(map.values().len() <= map.len());
}

fn expected_prefixes<'a>(model: &'a BTreeMap<String, u8>, text: &str) -> Vec<(&'a str, u8)> {
    // Every hit is a prefix of `text`, so length order is walk order.
    let mut hits: Vec<(&str, u8)> = model
        .iter()
        .filter(|(k, _)| text.starts_with(k.as_str()))
        .map(|(k, &v)| (k.as_str(), v))
        .collect();
    hits.sort_by_key(|(k, _)| k.len());
    hits
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 10_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_lookup_matches_model(
        model in model_strategy(),
        probes in prop::collection::vec(KEY, 0..32),
    ) {
        let map = DawgMap::try_from(model.clone()).unwrap();
        validate_map(&map);
        prop_assert_eq!(map.len(), model.len());

        for (key, value) in &model {
            prop_assert_eq!(map.get(key), Some(value));
        }
        for probe in &probes {
            prop_assert_eq!(map.get(probe), model.get(probe));
            prop_assert_eq!(map.contains_key(probe), model.contains_key(probe));
        }
    }

    #[test]
    fn prop_common_prefix_search_is_complete(
        model in model_strategy(),
        texts in prop::collection::vec("[abé授鱼c]{0,10}", 1..16),
    ) {
        let map = DawgMap::try_from(model.clone()).unwrap();
        for text in &texts {
            let found: Vec<(&str, u8)> = map
                .common_prefix_search(text)
                .map(|(k, &v)| (k, v))
                .collect();
            prop_assert_eq!(&found, &expected_prefixes(&model, text));

            let chars: Vec<char> = text.chars().collect();
            let by_chars: Vec<(usize, u8)> = map
                .common_prefix_search_chars(&chars)
                .map(|(n, &v)| (n, v))
                .collect();
            let lengths: Vec<(usize, u8)> = found
                .iter()
                .map(|&(k, v)| (k.chars().count(), v))
                .collect();
            prop_assert_eq!(by_chars, lengths);
        }
    }

    #[test]
    fn prop_minimized_and_plain_agree(
        model in model_strategy(),
        probes in prop::collection::vec(KEY, 0..32),
    ) {
        let pairs: Vec<(String, u8)> = model.clone().into_iter().collect();
        let dawg = DawgMapBuilder::new().build_from_pairs(pairs.clone()).unwrap();
        let trie = DawgMapBuilder::new().minimize(false).build_from_pairs(pairs).unwrap();
        validate_map(&dawg);
        validate_map(&trie);
        prop_assert!(dawg.num_states() <= trie.num_states());
        prop_assert!(dawg.values().len() <= trie.values().len());

        for probe in model.keys().chain(&probes) {
            prop_assert_eq!(dawg.get(probe), trie.get(probe));
        }
    }

    #[test]
    fn prop_build_is_deterministic(model in model_strategy()) {
        let mut reversed: Vec<(String, u8)> = model.clone().into_iter().collect();
        reversed.reverse();
        let a = DawgMap::try_from(model).unwrap();
        let b = DawgMap::from_pairs(reversed).unwrap();
        prop_assert_eq!(a.double_array(), b.double_array());
        prop_assert_eq!(a.to_bytes().unwrap(), b.to_bytes().unwrap());
    }

    #[test]
    fn prop_serialization_round_trips(model in model_strategy()) {
        let map = DawgMap::try_from(model.clone()).unwrap();
        let bytes = map.to_bytes().unwrap();
        let loaded = DawgMap::<u8>::from_bytes(&bytes).unwrap();
        prop_assert_eq!(loaded.to_bytes().unwrap(), bytes);
        for (key, value) in &model {
            prop_assert_eq!(loaded.get(key), Some(value));
        }
    }

    #[test]
    fn prop_damaged_bytes_are_rejected(
        model in model_strategy(),
        index in any::<prop::sample::Index>(),
        bit in 0u8..8,
    ) {
        let bytes = DawgMap::try_from(model).unwrap().to_bytes().unwrap();
        let mut damaged = bytes.clone();
        damaged[index.index(bytes.len())] ^= 1 << bit;
        let res = DawgMap::<u8>::from_bytes(&damaged);
        prop_assert!(matches!(res, Err(DawgError::CorruptData(_))));
    }
}

#[test]
fn duplicate_keys_are_rejected_in_any_position() {
    let keys = ["a", "ab", "b", "ba"];
    for dup in keys {
        let mut input: Vec<&str> = keys.to_vec();
        input.push(dup);
        let values: Vec<u32> = (0..input.len() as u32).collect();
        let res = DawgMap::new(input, values);
        assert!(matches!(res, Err(DawgError::InvalidInput(_))), "{dup}");
    }
}

#[test]
fn large_key_set() {
    let keys: Vec<String> = (0..20_000u32).map(|i| format!("{i:x}-{}", i % 7)).collect();
    let map = DawgMap::new(keys.iter().cloned(), (0..20_000u32).map(|i| i % 7)).unwrap();
    validate_map(&map);
    for (i, key) in keys.iter().enumerate() {
        assert_eq!(map.get(key), Some(&(i as u32 % 7)));
    }
    assert_eq!(map.values().len(), 7);
    assert_eq!(map.get("fffff-0"), None);
}
