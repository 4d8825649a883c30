// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Statistics
//!
//! Every generator owns a [`Statistics`] table counting search events and
//! each kind of contradiction.

use crate::deduction::{Contradiction, ContradictionKind};
use serde::{Deserialize, Serialize};
use strum::EnumCount;
use strum_macros::EnumCount as EnumCountMacro;

#[derive(EnumCountMacro, Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum Counters {
    Solutions,
    EquivocalSolutions,
    CandidatesTried,
    NonCanonical,
}

const COUNT: usize = Counters::COUNT + Contradiction::COUNT;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    stats: [u64; COUNT],
}

impl Statistics {
    pub fn new() -> Self {
        Statistics::default()
    }

    pub(crate) fn increment(&mut self, counter: Counters) {
        self.stats[counter as usize] += 1;
    }

    pub(crate) fn record(&mut self, contradiction: &Contradiction) {
        let kind = ContradictionKind::from(contradiction);
        self.stats[Counters::COUNT + kind as usize] += 1;
    }

    /// Get the current value of the specified counter.
    pub fn get(&self, counter: Counters) -> u64 {
        self.stats[counter as usize]
    }

    /// How often contradictions of `kind` were found.
    pub fn contradictions(&self, kind: ContradictionKind) -> u64 {
        self.stats[Counters::COUNT + kind as usize]
    }

    pub fn total_contradictions(&self) -> u64 {
        self.stats[Counters::COUNT..].iter().sum()
    }
}
