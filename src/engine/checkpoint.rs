// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Serializable search positions.
//!
//! A [`Checkpoint`] holds everything needed to rebuild a generator at the same
//! position: the canonical form of the input (as a fingerprint), the driver
//! state, the move stack and the statistics gathered so far. Restoring replays
//! the choice moves and verifies that the deductions come out the same; the
//! statistics then continue from the recorded counts.

use crate::moves::Move;
use crate::statistics::Statistics;
use serde::{Deserialize, Serialize};

/// State of the search driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchState {
    /// The input has no open position; it is the only solution.
    Precomputed,
    Searching,
    Exhausted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Canonical form of the input, before any deduction.
    pub fingerprint: String,
    pub state: SearchState,
    pub moves: Vec<Move>,
    #[serde(default)]
    pub statistics: Statistics,
}

impl Checkpoint {
    /// Number of choices on the stack, placeholders included.
    pub fn depth(&self) -> usize {
        self.moves.iter().filter(|mv| mv.is_choice).count()
    }
}
