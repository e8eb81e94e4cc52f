//! Mapping from characters to dense transition codes.
//!
//! Transition slots are found at `base + code`, so the spread of codes decides
//! how sparse the double array gets. Characters are ranked by how often they
//! occur in the key set and the most frequent one gets code 1; code 0 is the
//! end marker of terminal states.

use hashbrown::HashMap;

use crate::errors::{DawgError, Result};

/// Code of the transition that marks a terminal state.
pub const END_CODE: u32 = 0;

/// Table value of characters that do not occur in any key.
const UNMAPPED: u32 = 0;

/// Character to code table, indexed by scalar value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodeMapper {
    table: Vec<u32>,
    alphabet_size: u32,
}

impl CodeMapper {
    /// Ranks the characters of `keys` by frequency, ties broken by scalar value.
    pub fn from_keys<'a, I>(keys: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut freqs: HashMap<char, usize> = HashMap::new();
        for ch in keys.into_iter().flat_map(str::chars) {
            *freqs.entry(ch).or_insert(0) += 1;
        }

        let mut ranked: Vec<(char, usize)> = freqs.into_iter().collect();
        ranked.sort_unstable_by(|(c1, f1), (c2, f2)| f2.cmp(f1).then(c1.cmp(c2)));

        let table_len = ranked.iter().map(|&(ch, _)| ch as usize + 1).max().unwrap_or(0);
        let mut table = vec![UNMAPPED; table_len];
        for (rank, &(ch, _)) in ranked.iter().enumerate() {
            // At most 0x110000 distinct chars, so the code fits.
            table[ch as usize] = rank as u32 + 1;
        }

        CodeMapper {
            table,
            alphabet_size: ranked.len() as u32,
        }
    }

    /// Rebuilds a mapper from `(scalar value, code)` pairs, validating that
    /// the scalar values are chars in increasing order and that the codes are
    /// exactly `1..=n` without repetition.
    pub(crate) fn from_entries(entries: &[(u32, u32)]) -> Result<Self> {
        let mut prev = None;
        for &(scalar, _) in entries {
            if char::from_u32(scalar).is_none() {
                return Err(DawgError::corrupt_data(format!(
                    "code table entry {scalar:#x} is not a char"
                )));
            }
            if prev.is_some_and(|prev| prev >= scalar) {
                return Err(DawgError::corrupt_data(
                    "code table entries are not in increasing order",
                ));
            }
            prev = Some(scalar);
        }

        let mut codes: Vec<u32> = entries.iter().map(|&(_, code)| code).collect();
        codes.sort_unstable();
        if codes.iter().zip(1..).any(|(&code, expected)| code != expected) {
            return Err(DawgError::corrupt_data(
                "code table is not a permutation of 1..=n",
            ));
        }

        let table_len = prev.map_or(0, |last| last as usize + 1);
        let mut table = vec![UNMAPPED; table_len];
        for &(scalar, code) in entries {
            table[scalar as usize] = code;
        }
        Ok(CodeMapper {
            table,
            alphabet_size: entries.len() as u32,
        })
    }

    /// Returns the code of `ch`, or `None` if it never occurs in a key.
    #[inline(always)]
    pub fn get(&self, ch: char) -> Option<u32> {
        self.table
            .get(ch as usize)
            .copied()
            .filter(|&code| code != UNMAPPED)
    }

    /// Number of distinct characters; also the largest code.
    #[inline]
    pub fn alphabet_size(&self) -> u32 {
        self.alphabet_size
    }

    /// Mapped characters and their codes, in scalar value order.
    pub fn entries(&self) -> impl Iterator<Item = (char, u32)> + '_ {
        self.table
            .iter()
            .enumerate()
            .filter(|&(_, &code)| code != UNMAPPED)
            .filter_map(|(scalar, &code)| Some((char::from_u32(scalar as u32)?, code)))
    }
}
