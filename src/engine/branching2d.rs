// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Branching numbers for 2-dimensional symbols.

use super::{validate_symbol, BranchingSearch, Checkpoint};
use crate::config::{normalize_admissible, BranchingOptions2d};
use crate::deduction::Rules2d;
use crate::error::BranchingError;
use crate::symbol::DSymbol;

/// Enumerates the completions of a 2-dimensional symbol whose face and vertex
/// degrees and curvature reach the configured minimums, one per isomorphism
/// class.
pub type DefineBranching2d = BranchingSearch<Rules2d>;

impl BranchingSearch<Rules2d> {
    pub fn new(ds: &DSymbol, options: &BranchingOptions2d) -> Result<Self, BranchingError> {
        let rules = rules_for(ds, options)?;
        Ok(Self::start(ds, rules))
    }

    pub fn resume(
        ds: &DSymbol,
        options: &BranchingOptions2d,
        checkpoint: &Checkpoint,
    ) -> Result<Self, BranchingError> {
        let rules = rules_for(ds, options)?;
        Self::restore(ds, rules, checkpoint)
    }
}

fn rules_for(ds: &DSymbol, options: &BranchingOptions2d) -> Result<Rules2d, BranchingError> {
    validate_symbol(ds, 2)?;
    let admissible_values = normalize_admissible(&options.admissible_values)?;
    Ok(Rules2d::new(&BranchingOptions2d {
        admissible_values,
        ..options.clone()
    }))
}
