// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Branching numbers for 3-dimensional symbols.

use super::{validate_symbol, BranchingSearch, Checkpoint};
use crate::config::{normalize_admissible, BranchingOptions};
use crate::deduction::{ExtraDeductions, NoExtraDeductions, Rules3d};
use crate::error::BranchingError;
use crate::orbifold::may_become_locally_euclidean_3d;
use crate::symbol::DSymbol;
use std::sync::Arc;

/// Enumerates the locally euclidean, non-degenerate completions of a
/// 3-dimensional symbol, one per isomorphism class.
pub type DefineBranching3d = BranchingSearch<Rules3d>;

impl BranchingSearch<Rules3d> {
    pub fn new(ds: &DSymbol, options: &BranchingOptions) -> Result<Self, BranchingError> {
        Self::with_extra_deductions(ds, options, Arc::new(NoExtraDeductions))
    }

    pub fn with_extra_deductions(
        ds: &DSymbol,
        options: &BranchingOptions,
        extra: Arc<dyn ExtraDeductions>,
    ) -> Result<Self, BranchingError> {
        let rules = rules_for(ds, options, extra)?;
        Ok(Self::start(ds, rules))
    }

    /// Rebuild a generator at the position recorded in `checkpoint`.
    pub fn resume(
        ds: &DSymbol,
        options: &BranchingOptions,
        checkpoint: &Checkpoint,
    ) -> Result<Self, BranchingError> {
        Self::resume_with_extra_deductions(ds, options, Arc::new(NoExtraDeductions), checkpoint)
    }

    pub fn resume_with_extra_deductions(
        ds: &DSymbol,
        options: &BranchingOptions,
        extra: Arc<dyn ExtraDeductions>,
        checkpoint: &Checkpoint,
    ) -> Result<Self, BranchingError> {
        let rules = rules_for(ds, options, extra)?;
        Self::restore(ds, rules, checkpoint)
    }
}

fn rules_for(
    ds: &DSymbol,
    options: &BranchingOptions,
    extra: Arc<dyn ExtraDeductions>,
) -> Result<Rules3d, BranchingError> {
    validate_symbol(ds, 3)?;
    let admissible_values = normalize_admissible(&options.admissible_values)?;
    if !may_become_locally_euclidean_3d(ds) {
        return Err(BranchingError::NotLocallyEuclideanCompletable);
    }
    let options = BranchingOptions {
        admissible_values,
        ..options.clone()
    };
    Ok(Rules3d::new(&options).with_extra_deductions(extra))
}
