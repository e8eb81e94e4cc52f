/// Identifier of an automaton state: its index in the builder's state arena.
///
/// States are numbered in the order the builder finalizes them, which is a
/// post-order of the key trie, so every child has a smaller ID than its parent.
pub type StateId = u32;

/// A compact representation of the outgoing transitions of a [`State`] that
/// doesn't allocate until there are at least three of them.
///
/// Transitions are kept sorted by label.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Children {
    /// No transitions.
    None,
    /// Exactly one transition (label, target).
    One((char, StateId)),
    /// Exactly two transitions (label1, target1, label2, target2).
    Two((char, StateId, char, StateId)),
    /// Three or more transitions stored in a vector.
    Many(Vec<(char, StateId)>),
}

impl Children {
    /// Gets the transition at the specified index.
    ///
    /// Returns `None` if the index is out of bounds.
    #[inline]
    pub fn get(&self, index: usize) -> Option<(char, StateId)> {
        match self {
            Children::None => None,
            Children::One(child) => match index {
                0 => Some(*child),
                _ => None,
            },
            Children::Two((c1, n1, c2, n2)) => match index {
                0 => Some((*c1, *n1)),
                1 => Some((*c2, *n2)),
                _ => None,
            },
            Children::Many(children) => children.get(index).copied(),
        }
    }

    /// Returns the number of transitions.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Children::None => 0,
            Children::One(_) => 1,
            Children::Two(_) => 2,
            Children::Many(children) => children.len(),
        }
    }

    /// Returns true if there are no transitions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Children::None)
    }
}

/// An iterator over the transitions of a [`State`], in label order.
#[derive(Clone)]
pub struct ChildIter<'a> {
    state: &'a State,
    index: usize,
}

impl Iterator for ChildIter<'_> {
    type Item = (char, StateId);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let next_child = self.state.children.get(self.index)?;
        self.index += 1;
        Some(next_child)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.state.child_count().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ChildIter<'_> {}

/// A state of the automaton under construction.
///
/// Two states are equal when they have the same labeled transitions to the
/// same target IDs and the same value index. Because the builder finalizes
/// states bottom-up, children are already canonical when their parent is
/// compared, so equality one level deep is structural equality of the whole
/// subtree. The derived `Hash` is the memoization key of minimization.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct State {
    children: Children,
    value: Option<u32>,
}

impl State {
    /// Creates a state without transitions.
    ///
    /// # Arguments
    ///
    /// * `value` - Value index if a key ends at this state
    pub fn new(value: Option<u32>) -> Self {
        State {
            children: Children::None,
            value,
        }
    }

    /// Returns the state that `label` leads to, or None if no such transition exists.
    #[inline]
    pub fn get(&self, label: char) -> Option<StateId> {
        match &self.children {
            Children::None => None,
            Children::One((ch, id)) => (*ch == label).then_some(*id),
            Children::Two((c1, n1, c2, n2)) => {
                if label == *c1 {
                    Some(*n1)
                } else if label == *c2 {
                    Some(*n2)
                } else {
                    None
                }
            }
            Children::Many(children) => children
                .binary_search_by_key(&label, |&(ch, _)| ch)
                .ok()
                .map(|i| children[i].1),
        }
    }

    /// True if a key ends at this state.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.value.is_some()
    }

    /// Value index of the key ending here, if any.
    #[inline]
    pub fn value(&self) -> Option<u32> {
        self.value
    }

    pub(crate) fn set_value(&mut self, value: u32) {
        self.value = Some(value);
    }

    /// Appends a transition. Labels must be inserted in increasing order.
    pub fn insert(&mut self, label: char, target: StateId) {
        debug_assert!(self.children().all(|(ch, _)| ch < label));
        let c = (label, target);
        match &mut self.children {
            Children::None => self.children = Children::One(c),
            Children::One((c1, n1)) => self.children = Children::Two((*c1, *n1, c.0, c.1)),
            Children::Two((c1, n1, c2, n2)) => {
                self.children = Children::Many(vec![(*c1, *n1), (*c2, *n2), c])
            }
            Children::Many(children) => children.push(c),
        };
    }

    /// Returns an iterator over all transitions of this state.
    #[inline]
    pub fn children(&self) -> ChildIter<'_> {
        ChildIter {
            state: self,
            index: 0,
        }
    }

    /// Returns the number of transitions.
    #[inline]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}
