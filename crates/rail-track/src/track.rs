//! The `Track` — a bounds-safe array of multi-occupancy position cells.
//!
//! # Why bounds-safe reads
//!
//! Stepping and collision logic constantly asks "who is at `pos ± 1`?", and
//! near the ends of the track that index is out of range.  Returning an empty
//! cell for any out-of-range read lets callers write the common case without
//! edge guards.  The empty view is a shared `&[]` — safe to hand out because
//! slices are immutable, so no caller can accidentally turn the sentinel into
//! shared mutable state.
//!
//! Writes are different: the engine never writes off-track, so an
//! out-of-range `insert` is a contract violation.  Debug builds assert;
//! release builds discard the write, which at worst strands the agent
//! off-track where its next step reports an off-track inconsistency.

use rail_core::{AgentId, Direction};

/// The 1D lattice all on-track agents live on.
///
/// Each cell is a set of agent ids; multi-occupancy is legal and the order of
/// ids within a cell is not observable.
pub struct Track {
    cells: Vec<Vec<AgentId>>,
}

impl Track {
    /// A track of `len` empty cells, indexed `0..len`.
    pub fn new(len: usize) -> Self {
        Track {
            cells: vec![Vec::new(); len],
        }
    }

    /// Track length `L`; valid positions are `0..L`.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The occupants of cell `i`; empty for any off-track `i`.
    #[inline]
    pub fn cell(&self, i: i64) -> &[AgentId] {
        match self.index(i) {
            Some(i) => &self.cells[i],
            None => &[],
        }
    }

    /// Whether cell `i` holds no agents (off-track cells are empty).
    #[inline]
    pub fn is_cell_empty(&self, i: i64) -> bool {
        self.cell(i).is_empty()
    }

    /// Put `id` into cell `i`.
    ///
    /// Off-track writes are a caller bug: they panic in debug builds and are
    /// discarded in release builds.
    pub fn insert(&mut self, i: i64, id: AgentId) {
        debug_assert!(
            self.index(i).is_some(),
            "off-track write at {i} (track length {}); load track-end sentinels \
             to keep walkers on the track",
            self.len(),
        );
        if let Some(i) = self.index(i) {
            self.cells[i].push(id);
        }
    }

    /// Remove one occurrence of `id` from cell `i`.
    ///
    /// Returns whether the id was present.  Off-track indices hold nothing.
    pub fn take(&mut self, i: i64, id: AgentId) -> bool {
        match self.index(i) {
            None => false,
            Some(i) => {
                let cell = &mut self.cells[i];
                match cell.iter().position(|&x| x == id) {
                    None => false,
                    Some(at) => {
                        cell.swap_remove(at);
                        true
                    }
                }
            }
        }
    }

    /// Remove `id` from every cell it appears in.
    ///
    /// Linear in track length — the rigorous unload fallback.  Agents that
    /// know their own position should prefer [`Track::take`].
    pub fn remove_all(&mut self, id: AgentId) {
        for cell in &mut self.cells {
            cell.retain(|&x| x != id);
        }
    }

    /// The first empty cell at or beyond `start` in direction `dir`.
    ///
    /// Off-track counts as empty, so a fully occupied stretch reaching the
    /// track edge yields `-1` (going back) or `L` (going forward).
    pub fn next_empty(&self, start: i64, dir: Direction) -> i64 {
        let mut i = start;
        while !self.cell(i).is_empty() {
            i += dir.delta();
        }
        i
    }

    /// The union of occupants over a range of cells.
    pub fn aggregate(&self, range: impl IntoIterator<Item = i64>) -> Vec<AgentId> {
        let mut out = Vec::new();
        for i in range {
            out.extend_from_slice(self.cell(i));
        }
        out
    }

    /// Empty every in-bounds cell in `lo..hi` and return the former occupants.
    pub fn drain_range(&mut self, lo: i64, hi: i64) -> Vec<AgentId> {
        let mut out = Vec::new();
        for i in lo..hi {
            if let Some(i) = self.index(i) {
                out.append(&mut self.cells[i]);
            }
        }
        out
    }

    /// Iterate over `(position, occupants)` for every in-bounds cell.
    pub fn iter(&self) -> impl Iterator<Item = (i64, &[AgentId])> {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, cell)| (i as i64, cell.as_slice()))
    }

    /// All positions whose cell is currently empty.
    pub fn empty_positions(&self) -> Vec<i64> {
        self.iter()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(i, _)| i)
            .collect()
    }

    #[inline(always)]
    fn index(&self, i: i64) -> Option<usize> {
        if i < 0 || i as usize >= self.cells.len() {
            None
        } else {
            Some(i as usize)
        }
    }
}
