use std::collections::VecDeque;

use smallvec::SmallVec;

use crate::dawg::builder::Automaton;
use crate::dawg::children::StateId;
use crate::dawg::double_array::{DoubleArray, FREE, ROOT_CHECK, ROOT_POS};
use crate::dawg::mapper::{CodeMapper, END_CODE};
use crate::errors::{DawgError, Result};

// Offset of a state that has not been placed yet.
const UNPLACED: u32 = 0;

// End of the free list.
const NIL: u32 = u32::MAX;

// A free slot that failed this many placements leaves the free list. It stays
// free in `check`, so later blocks may still put a non-first target there.
const MAX_MISSES: u8 = 32;

/// A transition to place: its code and the target state, `None` for the end
/// marker of a terminal state.
type Target = (u32, Option<StateId>);

/// Lays an [`Automaton`] out as a [`DoubleArray`].
///
/// States are placed breadth-first from the root. Each state gets a block
/// offset such that every code of the state lands on a free slot. Candidates
/// come from a doubly linked list of free slots kept in position order, so
/// occupied regions are never rescanned; a free slot that keeps failing is
/// dropped from the list. A state reachable from several parents is placed
/// once; later parents reuse its offset.
pub(crate) struct Encoder<'a> {
    automaton: &'a Automaton,
    mapper: &'a CodeMapper,
    max_units: usize,
    base: Vec<u32>,
    check: Vec<u32>,
    used_offsets: Vec<bool>,
    offsets: Vec<u32>,
    next_free: Vec<u32>,
    prev_free: Vec<u32>,
    misses: Vec<u8>,
    free_head: u32,
    free_tail: u32,
    probes: u64,
}

impl<'a> Encoder<'a> {
    pub(crate) fn new(automaton: &'a Automaton, mapper: &'a CodeMapper, max_units: u32) -> Self {
        Encoder {
            automaton,
            mapper,
            max_units: max_units as usize,
            base: Vec::new(),
            check: Vec::new(),
            used_offsets: Vec::new(),
            offsets: vec![UNPLACED; automaton.num_states()],
            next_free: Vec::new(),
            prev_free: Vec::new(),
            misses: Vec::new(),
            free_head: NIL,
            free_tail: NIL,
            probes: 0,
        }
    }

    /// Places every state reachable from the root.
    ///
    /// # Errors
    ///
    /// [`DawgError::Build`] is returned when the arrays would need more than
    /// `max_units` units.
    pub(crate) fn encode(mut self) -> Result<DoubleArray> {
        self.place_all()?;
        Ok(self.finish())
    }

    fn place_all(&mut self) -> Result<()> {
        self.ensure_len(1)?;
        self.check[ROOT_POS as usize] = ROOT_CHECK;

        let mut queue = VecDeque::from([(ROOT_POS, self.automaton.root())]);
        while let Some((pos, id)) = queue.pop_front() {
            let offset = match self.offsets[id as usize] {
                UNPLACED => self.place(id, &mut queue)?,
                offset => offset,
            };
            self.base[pos as usize] = offset;
        }
        Ok(())
    }

    fn finish(mut self) -> DoubleArray {
        let capacity = self.base.len();
        let len = self
            .check
            .iter()
            .rposition(|&c| c != FREE)
            .map_or(1, |last| last + 1);
        self.base.truncate(len);
        self.check.truncate(len);

        let da = DoubleArray::from_parts(self.base, self.check);
        log::debug!(
            "encoded {} states into {} units ({} used, {:.1}% dense, {} probes over {} allocated)",
            self.automaton.num_states(),
            da.num_units(),
            da.num_used(),
            100.0 * da.num_used() as f64 / da.num_units() as f64,
            self.probes,
            capacity,
        );
        da
    }

    fn place(&mut self, id: StateId, queue: &mut VecDeque<(u32, StateId)>) -> Result<u32> {
        let automaton = self.automaton;
        let state = automaton.state(id);
        let mut targets: SmallVec<[Target; 8]> = SmallVec::new();
        if state.is_terminal() {
            targets.push((END_CODE, None));
        }
        for (ch, child) in state.children() {
            let code = self.mapper.get(ch).ok_or_else(|| {
                DawgError::build(format!("character {ch:?} has no transition code"))
            })?;
            targets.push((code, Some(child)));
        }
        targets.sort_unstable_by_key(|&(code, _)| code);

        if targets.is_empty() {
            // Only the root of an empty key set has nothing to place.
            self.offsets[id as usize] = 1;
            return Ok(1);
        }

        let offset = self.find_offset(&targets)?;
        self.used_offsets[offset] = true;
        let offset = offset as u32;
        for &(code, child) in &targets {
            let slot = (offset + code) as usize;
            self.take_slot(slot);
            self.check[slot] = offset;
            match child {
                Some(child) => queue.push_back((offset + code, child)),
                None => {
                    self.base[slot] = state
                        .value()
                        .expect("terminal states carry a value index")
                }
            }
        }
        self.offsets[id as usize] = offset;
        Ok(offset)
    }

    fn find_offset(&mut self, targets: &[Target]) -> Result<usize> {
        let first = targets[0].0 as usize;
        let last = targets[targets.len() - 1].0 as usize;
        let mut pos = self.free_head;

        loop {
            if pos == NIL {
                // Every listed slot failed: grow and continue with the new slots.
                let len = self.base.len();
                self.ensure_len(len + 1)?;
                pos = len as u32;
                continue;
            }
            self.probes += 1;
            let p = pos as usize;
            if p > first {
                let begin = p - first;
                if begin + last >= self.max_units {
                    return Err(DawgError::build(format!(
                        "no offset for a state with {} transitions below max_units {}",
                        targets.len(),
                        self.max_units
                    )));
                }
                self.ensure_len(begin + last + 1)?;
                if !self.used_offsets[begin]
                    && targets[1..]
                        .iter()
                        .all(|&(code, _)| self.check[begin + code as usize] == FREE)
                {
                    return Ok(begin);
                }
            }

            pos = self.next_free[p];
            self.misses[p] += 1;
            if self.misses[p] == MAX_MISSES {
                self.unlink(p);
            }
        }
    }

    // Removes a slot that is about to be used from the free list.
    fn take_slot(&mut self, slot: usize) {
        debug_assert_eq!(self.check[slot], FREE);
        if self.misses[slot] < MAX_MISSES {
            self.unlink(slot);
        }
    }

    fn unlink(&mut self, slot: usize) {
        let prev = self.prev_free[slot];
        let next = self.next_free[slot];
        match prev {
            NIL => self.free_head = next,
            prev => self.next_free[prev as usize] = next,
        }
        match next {
            NIL => self.free_tail = prev,
            next => self.prev_free[next as usize] = prev,
        }
    }

    fn push_free(&mut self, slot: usize) {
        self.prev_free[slot] = self.free_tail;
        self.next_free[slot] = NIL;
        match self.free_tail {
            NIL => self.free_head = slot as u32,
            tail => self.next_free[tail as usize] = slot as u32,
        }
        self.free_tail = slot as u32;
    }

    fn ensure_len(&mut self, len: usize) -> Result<()> {
        let old_len = self.base.len();
        if len <= old_len {
            return Ok(());
        }
        if len > self.max_units {
            return Err(DawgError::build(format!(
                "{len} units needed, max_units is {}",
                self.max_units
            )));
        }
        let new_len = len.max(old_len * 2).min(self.max_units);
        log::trace!("growing double array from {old_len} to {new_len} units");
        self.base.resize(new_len, 0);
        self.check.resize(new_len, FREE);
        self.used_offsets.resize(new_len, false);
        self.next_free.resize(new_len, NIL);
        self.prev_free.resize(new_len, NIL);
        self.misses.resize(new_len, 0);
        // Slot 0 is the root and never free.
        for slot in old_len.max(1)..new_len {
            self.push_free(slot);
        }
        Ok(())
    }
}

/// Encodes `automaton` with the codes assigned by `mapper`.
pub(crate) fn encode(
    automaton: &Automaton,
    mapper: &CodeMapper,
    max_units: u32,
) -> Result<DoubleArray> {
    Encoder::new(automaton, mapper, max_units).encode()
}
