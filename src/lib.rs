//! # dawgmap
//!
//! A compact, read-only map from strings to values, stored as a
//! [DAWG](https://en.wikipedia.org/wiki/Deterministic_acyclic_finite_state_automaton)
//! (Directed Acyclic Word Graph) laid out in a double array.
//!
//! The keys are turned into a minimal automaton first: common prefixes share
//! a path and, when keys with equal values end in the same suffix, the suffix
//! is shared too. The automaton is then flattened into two parallel `u32`
//! arrays, `base` and `check`, so following a transition costs two array
//! reads. Lookups take O(key length) time whatever the number of keys.
//!
//! ## Quick Start
//!
//! ```
//! use dawgmap::DawgMap;
//!
//! let map = DawgMap::new(["a", "ab", "abc"], [1, 2, 3]).unwrap();
//! assert_eq!(map.get("ab"), Some(&2));
//! assert_eq!(map.get("b"), None);
//!
//! // Every key that is a prefix of the text, shortest first.
//! let hits: Vec<_> = map.common_prefix_search("abcd").collect();
//! assert_eq!(hits, [("a", &1), ("ab", &2), ("abc", &3)]);
//! ```
//!
//! ## Building
//!
//! Keys can come in any order; they are sorted before the build. Duplicate
//! keys and mismatched key/value counts are rejected with
//! [`DawgError::InvalidInput`]. [`DawgMapBuilder`] turns off subtree merging
//! or bounds the size of the arrays:
//!
//! ```
//! use dawgmap::{DawgError, DawgMapBuilder};
//!
//! let res = DawgMapBuilder::new().build(["x", "x"], [1, 2]);
//! assert!(matches!(res, Err(DawgError::InvalidInput(_))));
//!
//! let trie = DawgMapBuilder::new()
//!     .minimize(false)
//!     .build(["BAKE", "CAKE"], [1, 1])
//!     .unwrap();
//! assert_eq!(trie.get("CAKE"), Some(&1));
//! ```
//!
//! ## Saving and Loading
//!
//! Maps whose values implement [`ValueCodec`] can be written to bytes and read
//! back. Loading checks a CRC32 checksum and every unit of the arrays.
//!
//! ```
//! use dawgmap::DawgMap;
//!
//! let map = DawgMap::from_pairs([("授人以渔", "teach".to_string())]).unwrap();
//! let bytes = map.to_bytes().unwrap();
//! let loaded = DawgMap::<String>::from_bytes(&bytes).unwrap();
//! assert_eq!(loaded.get("授人以渔").map(String::as_str), Some("teach"));
//! ```

#![warn(missing_docs)]

/// Automaton construction, double-array encoding and the map type.
pub mod dawg;
pub mod errors;

pub use dawg::{
    BuildConfig, CommonPrefixSearch, CommonPrefixSearchChars, DawgMap, DawgMapBuilder, KeySet,
    ValueCodec,
};
pub use errors::{DawgError, Result};

#[cfg(test)]
mod proptests;
