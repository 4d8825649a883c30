// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Backtracking search over branching numbers.
//!
//! [`BranchingSearch`] is a chronological-backtracking state machine shared by
//! the 3-dimensional and 2-dimensional generators. It is driven through
//! [`Iterator::next`], which resumes the search where the previous solution
//! left it.
//!
//! # Algorithm
//!
//! Open positions are visited in (chamber, index) order. Each is pushed on the
//! [`MoveStack`] as a placeholder choice and then, on every pass of the main
//! loop:
//!
//! 1. the last choice and everything it caused is undone
//! 2. the next admissible value after the one it held is tried; with none
//!    left, the loop continues and backtracks one level further
//! 3. the choice is propagated by the [`BranchingRules`]
//! 4. on success, the state must be canonical under the automorphisms of the
//!    input; the next open position is pushed as a placeholder, or, when none
//!    is left, the completed symbol is returned
//!
//! An empty stack at step 1 means the search is exhausted.
//!
//! # Example
//!
//! ```
//! use dsym_branching::config::BranchingOptions;
//! use dsym_branching::engine::DefineBranching3d;
//! use dsym_branching::symbol::DSymbolBuilder;
//!
//! let mut builder = DSymbolBuilder::new(3, 1);
//! for i in 0..=3 {
//!     builder.glue(i, 0, 0).unwrap();
//! }
//! let ds = builder.build().unwrap();
//!
//! let search = DefineBranching3d::new(&ds, &BranchingOptions::default()).unwrap();
//! assert_eq!(search.count(), 14);
//! ```

pub mod branching2d;
pub mod branching3d;
pub mod checkpoint;

pub use branching2d::DefineBranching2d;
pub use branching3d::DefineBranching3d;
pub use checkpoint::{Checkpoint, SearchState};

use crate::deduction::BranchingRules;
use crate::error::BranchingError;
use crate::moves::{Move, MoveStack};
use crate::statistics::{Counters, Statistics};
use crate::symbol::{Chamber, DSymbol};
use crate::symmetry::{check_canonicality, SymmetryType};
use tracing::{debug, info, trace};

/// Reject symbols the search cannot handle.
pub(crate) fn validate_symbol(ds: &DSymbol, dim: usize) -> Result<(), BranchingError> {
    if ds.dim() != dim {
        return Err(BranchingError::WrongDimension {
            expected: dim,
            actual: ds.dim(),
        });
    }
    if !ds.is_connected() {
        return Err(BranchingError::NotConnected);
    }
    Ok(())
}

/// Generator of all canonical completions of a symbol under a rule set.
#[derive(Debug)]
pub struct BranchingSearch<R: BranchingRules> {
    rules: R,
    ds: DSymbol,
    fingerprint: String,
    automorphisms: Vec<Vec<Chamber>>,
    stack: MoveStack,
    state: SearchState,
    statistics: Statistics,
}

impl<R: BranchingRules> BranchingSearch<R> {
    /// Renumber `ds` canonically and compute its automorphisms. The search is
    /// not positioned yet.
    fn prepare(ds: &DSymbol, rules: R) -> Self {
        let ds = ds.canonical();
        let automorphisms = ds.automorphisms();
        let fingerprint = ds.to_string();
        info!(
            symbol = %fingerprint,
            automorphisms = automorphisms.len(),
            "branching search prepared"
        );
        Self {
            rules,
            ds,
            fingerprint,
            automorphisms,
            stack: MoveStack::new(),
            state: SearchState::Exhausted,
            statistics: Statistics::new(),
        }
    }

    /// Propagate the preset values. Their deductions become part of the
    /// symbol and are never undone.
    fn apply_presets(&mut self) -> bool {
        let mut frozen = MoveStack::new();
        match self.rules.check_presets(&mut self.ds, &mut frozen) {
            Ok(()) => {
                debug!(deduced = frozen.len(), "preset values accepted");
                true
            }
            Err(contradiction) => {
                self.statistics.record(&contradiction);
                info!(%contradiction, "preset values admit no completion");
                false
            }
        }
    }

    /// Start a fresh search on `ds`.
    pub(crate) fn start(ds: &DSymbol, rules: R) -> Self {
        let mut search = Self::prepare(ds, rules);
        if search.apply_presets() {
            match search.next_choice(0, 0) {
                Some((index, element)) => {
                    search.stack.push(Move::choice(index, element, 0));
                    search.state = SearchState::Searching;
                }
                None => search.state = SearchState::Precomputed,
            }
        }
        search
    }

    /// Rebuild the search position recorded in `checkpoint`.
    pub(crate) fn restore(ds: &DSymbol, rules: R, checkpoint: &Checkpoint) -> Result<Self, BranchingError> {
        let mut search = Self::prepare(ds, rules);
        if checkpoint.fingerprint != search.fingerprint {
            return Err(BranchingError::CheckpointMismatch {
                expected: checkpoint.fingerprint.clone(),
                actual: search.fingerprint,
            });
        }
        if !search.apply_presets() {
            if checkpoint.state != SearchState::Exhausted || !checkpoint.moves.is_empty() {
                return Err(replay_error(0, "preset values admit no completion"));
            }
            search.statistics = checkpoint.statistics.clone();
            return Ok(search);
        }

        for (position, mv) in checkpoint.moves.iter().enumerate() {
            if !mv.is_choice {
                continue;
            }
            if mv.index >= search.ds.dim() || mv.element >= search.ds.size() {
                return Err(replay_error(position, "position out of range"));
            }
            if mv.is_placeholder() {
                search.stack.push(*mv);
                continue;
            }
            if search.ds.defines_v(mv.index, mv.element) {
                return Err(replay_error(position, "position already defined"));
            }
            if !search.rules.admissible().contains(&mv.value) {
                return Err(replay_error(position, "value not admissible"));
            }
            search
                .rules
                .perform(&mut search.ds, &mut search.stack, *mv)
                .map_err(|contradiction| replay_error(position, &contradiction.to_string()))?;
        }

        let replayed = search.stack.as_slice();
        if replayed != checkpoint.moves.as_slice() {
            let position = replayed
                .iter()
                .zip(&checkpoint.moves)
                .position(|(a, b)| a != b)
                .unwrap_or_else(|| replayed.len().min(checkpoint.moves.len()));
            return Err(replay_error(position, "deduced moves differ"));
        }

        search.state = checkpoint.state;
        search.statistics = checkpoint.statistics.clone();
        debug!(moves = checkpoint.moves.len(), state = ?search.state, "checkpoint restored");
        Ok(search)
    }

    /// The first undefined position at or after `(element, index)` in
    /// (chamber, index) order, as `(index, orbit representative)`.
    fn next_choice(&self, index: usize, element: Chamber) -> Option<(usize, Chamber)> {
        let dim = self.ds.dim();
        for d in element..self.ds.size() {
            let first = if d == element { index } else { 0 };
            for i in first..dim {
                if !self.ds.defines_v(i, d) {
                    return Some((i, self.ds.orbit_rep(i, d)));
                }
            }
        }
        None
    }

    /// The smallest admissible value larger than `current`.
    fn next_value(&self, current: u32) -> Option<u32> {
        self.rules.admissible().iter().copied().find(|&v| v > current)
    }

    fn advance(&mut self) -> Option<DSymbol> {
        loop {
            match self.state {
                SearchState::Exhausted => return None,
                SearchState::Precomputed => {
                    self.state = SearchState::Exhausted;
                    self.statistics.increment(Counters::Solutions);
                    debug!(symbol = %self.ds, "input is already complete");
                    return Some(self.ds.clone());
                }
                SearchState::Searching => {}
            }

            let Some(choice) = self.stack.undo_last_choice(&mut self.ds) else {
                self.state = SearchState::Exhausted;
                info!(
                    solutions = self.statistics.get(Counters::Solutions),
                    candidates = self.statistics.get(Counters::CandidatesTried),
                    "branching search exhausted"
                );
                return None;
            };
            let Some(value) = self.next_value(choice.value) else {
                continue;
            };

            let mv = Move::choice(choice.index, choice.element, value);
            self.statistics.increment(Counters::CandidatesTried);
            if let Err(contradiction) = self.rules.perform(&mut self.ds, &mut self.stack, mv) {
                trace!(%contradiction, index = mv.index, element = mv.element, value, "rejected");
                self.statistics.record(&contradiction);
                continue;
            }

            let symmetry = check_canonicality(&self.ds, &self.automorphisms);
            if symmetry == SymmetryType::NonCanonical {
                self.statistics.increment(Counters::NonCanonical);
                continue;
            }

            match self.next_choice(mv.index, mv.element) {
                Some((index, element)) => self.stack.push(Move::choice(index, element, 0)),
                None => {
                    self.statistics.increment(Counters::Solutions);
                    if symmetry == SymmetryType::Equivocal {
                        self.statistics.increment(Counters::EquivocalSolutions);
                    }
                    debug!(symbol = %self.ds, ?symmetry, "solution");
                    return Some(self.ds.clone());
                }
            }
        }
    }

    /// The current search position.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            fingerprint: self.fingerprint.clone(),
            state: self.state,
            moves: self.stack.as_slice().to_vec(),
            statistics: self.statistics.clone(),
        }
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// Automorphisms of the canonically numbered input, identity first.
    pub fn automorphisms(&self) -> &[Vec<Chamber>] {
        &self.automorphisms
    }

    /// The symbol as it currently stands in the search.
    pub fn symbol(&self) -> &DSymbol {
        &self.ds
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }
}

fn replay_error(position: usize, reason: &str) -> BranchingError {
    BranchingError::CheckpointReplay {
        position,
        reason: reason.to_string(),
    }
}

impl<R: BranchingRules> Iterator for BranchingSearch<R> {
    type Item = DSymbol;

    fn next(&mut self) -> Option<DSymbol> {
        self.advance()
    }
}
