use std::hash::BuildHasher;

use hashbrown::{DefaultHashBuilder, HashTable};
use itertools::{Itertools, Position};
use smallvec::SmallVec;

use super::children::{State, StateId};
use crate::errors::{DawgError, Result};

/// Trait for types that can be used as a key when building an automaton.
///
/// Implemented for common string and `char` sequence types so that
/// [`Builder::add_word`] and [`build_automaton`] accept them directly.
pub trait IntoWord {
    /// Collects this word into a character buffer.
    fn collect_word(self) -> SmallVec<[char; 32]>;
}

impl IntoWord for &str {
    fn collect_word(self) -> SmallVec<[char; 32]> {
        self.chars().collect()
    }
}

impl IntoWord for &&str {
    fn collect_word(self) -> SmallVec<[char; 32]> {
        self.chars().collect()
    }
}

impl IntoWord for String {
    fn collect_word(self) -> SmallVec<[char; 32]> {
        self.chars().collect()
    }
}

impl IntoWord for &String {
    fn collect_word(self) -> SmallVec<[char; 32]> {
        self.chars().collect()
    }
}

impl IntoWord for &[char] {
    fn collect_word(self) -> SmallVec<[char; 32]> {
        self.iter().copied().collect()
    }
}

impl IntoWord for Vec<char> {
    fn collect_word(self) -> SmallVec<[char; 32]> {
        self.into_iter().collect()
    }
}

impl IntoWord for &Vec<char> {
    fn collect_word(self) -> SmallVec<[char; 32]> {
        self.iter().copied().collect()
    }
}

impl<const N: usize> IntoWord for [char; N] {
    fn collect_word(self) -> SmallVec<[char; 32]> {
        self.into_iter().collect()
    }
}

/// A finished automaton: an arena of states addressed by [`StateId`].
#[derive(Clone, Debug)]
pub struct Automaton {
    states: Vec<State>,
    root: StateId,
    num_keys: usize,
    minimized: bool,
}

impl Automaton {
    /// ID of the start state.
    #[inline]
    pub fn root(&self) -> StateId {
        self.root
    }

    /// Returns the state with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this automaton.
    #[inline]
    pub fn state(&self, id: StateId) -> &State {
        &self.states[id as usize]
    }

    /// Number of distinct states.
    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// Number of labeled transitions over all states.
    pub fn num_transitions(&self) -> usize {
        self.states.iter().map(State::child_count).sum()
    }

    /// Number of keys accepted by the automaton.
    pub fn num_keys(&self) -> usize {
        self.num_keys
    }

    /// True if identical subtrees were merged.
    pub fn is_minimized(&self) -> bool {
        self.minimized
    }
}

/// Register of finalized states used to merge identical subtrees.
///
/// The table stores state IDs only; hashing and equality look the state up in
/// the arena, so a state is stored once.
struct Register {
    table: HashTable<StateId>,
    hasher: DefaultHashBuilder,
}

struct BuildState {
    ch: char,
    state: State,
}

/// Incremental automaton builder.
///
/// Words must be added in lexicographically sorted order. The states along
/// the path of the most recent word stay open in `build_state`; once a later
/// word diverges from that path, the abandoned tail is finalized bottom-up.
/// With minimization enabled, a finalized state that is structurally equal to
/// an earlier one is replaced by it, which turns the trie into a DAWG.
pub struct Builder {
    states: Vec<State>,
    build_state: Vec<BuildState>,
    register: Option<Register>,
    num_keys: usize,
}

impl Builder {
    /// Creates a new builder.
    ///
    /// # Arguments
    ///
    /// * `minimize` - Whether to merge identical subtrees
    pub fn new(minimize: bool) -> Self {
        Builder {
            states: Vec::new(),
            build_state: vec![BuildState {
                ch: char::default(),
                state: State::new(None),
            }],
            register: minimize.then(|| Register {
                table: HashTable::new(),
                hasher: DefaultHashBuilder::default(),
            }),
            num_keys: 0,
        }
    }

    /// Adds a word and the index of its value.
    ///
    /// # Errors
    ///
    /// Returns [`DawgError::InvalidInput`] if the word is not strictly greater
    /// than the previously added word.
    pub fn add_word(&mut self, word: impl IntoWord, value: u32) -> Result<()> {
        let word = word.collect_word();
        self.add_word_slice(&word, value)
    }

    fn add_word_slice(&mut self, word: &[char], value: u32) -> Result<()> {
        if word.is_empty() {
            // The empty word sorts before everything else.
            if self.num_keys > 0 {
                return Err(self.order_error(word));
            }
            self.build_state[0].state.set_value(value);
            self.num_keys += 1;
            return Ok(());
        }

        let prefix_length = self.prefix_length(word)?;
        self.canonicalize_suffix(prefix_length)?;
        self.build_state.extend(
            word[prefix_length..]
                .iter()
                .copied()
                .with_position()
                .map(|(position, ch)| {
                    let last = matches!(position, Position::Last | Position::Only);
                    BuildState {
                        ch,
                        state: State::new(last.then_some(value)),
                    }
                }),
        );
        self.num_keys += 1;
        Ok(())
    }

    fn prefix_length(&self, word: &[char]) -> Result<usize> {
        let mut prefix_len = 0;
        for (i, &ch) in word.iter().enumerate() {
            let is_last = i == word.len() - 1;
            if let Some(prev_state) = self.build_state.get(prefix_len + 1) {
                if ch > prev_state.ch {
                    break;
                }
                if ch < prev_state.ch || is_last {
                    return Err(self.order_error(word));
                }
                prefix_len += 1;
            } else {
                break;
            }
        }
        Ok(prefix_len)
    }

    fn order_error(&self, word: &[char]) -> DawgError {
        let previous: String = self.build_state[1..].iter().map(|e| e.ch).collect();
        let word: String = word.iter().collect();
        DawgError::invalid_input("keys", format!("{previous:?} came before {word:?}"))
    }

    fn canonicalize_suffix(&mut self, target_length: usize) -> Result<()> {
        let target_length = target_length + 1;
        while self.build_state.len() > target_length {
            let state = self.pop_build_state();
            let child = self.canonicalize(state.state)?;
            self.build_state
                .last_mut()
                .expect("Build state will always have at least one entry")
                .state
                .insert(state.ch, child);
        }
        Ok(())
    }

    fn pop_build_state(&mut self) -> BuildState {
        self.build_state
            .pop()
            .expect("Build state will always have at least one entry")
    }

    fn canonicalize(&mut self, state: State) -> Result<StateId> {
        debug_assert!(
            state.children().all(|(_, id)| (id as usize) < self.states.len()),
            "Cannot canonicalize unless all children are canonical"
        );

        let Self {
            states, register, ..
        } = self;

        let hash = match register {
            Some(Register { table, hasher }) => {
                let hash = hasher.hash_one(&state);
                if let Some(&id) = table.find(hash, |&id| states[id as usize] == state) {
                    return Ok(id);
                }
                Some(hash)
            }
            None => None,
        };

        let id = StateId::try_from(states.len()).map_err(|_| {
            DawgError::invalid_input("keys", "the automaton has more states than u32 can index")
        })?;
        states.push(state);
        if let (Some(Register { table, hasher }), Some(hash)) = (register.as_mut(), hash) {
            table.insert_unique(hash, id, |&id| hasher.hash_one(&states[id as usize]));
        }
        Ok(id)
    }

    /// Finalizes the remaining path and returns the automaton.
    pub fn build(mut self) -> Result<Automaton> {
        self.canonicalize_suffix(0)?;
        let root_state = self.pop_build_state().state;
        let root = self.canonicalize(root_state)?;
        let automaton = Automaton {
            states: self.states,
            root,
            num_keys: self.num_keys,
            minimized: self.register.is_some(),
        };
        log::debug!(
            "built automaton: {} keys, {} states, {} transitions (minimized: {})",
            automaton.num_keys,
            automaton.num_states(),
            automaton.num_transitions(),
            automaton.minimized,
        );
        Ok(automaton)
    }
}

/// Builds an automaton from sorted `(word, value index)` pairs.
///
/// Words **must** be provided in strictly increasing order, or this function
/// returns an error. This requirement allows the automaton to be built in a
/// single pass.
pub fn build_automaton<W>(
    entries: impl IntoIterator<Item = (W, u32)>,
    minimize: bool,
) -> Result<Automaton>
where
    W: IntoWord,
{
    let mut builder = Builder::new(minimize);
    for (word, value) in entries {
        builder.add_word(word, value)?;
    }
    builder.build()
}
