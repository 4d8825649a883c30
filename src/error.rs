// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Configuration errors.
//!
//! These are raised while building a symbol or constructing a generator and
//! never during the search itself. Contradictions found while searching are
//! ordinary outcomes, see [`crate::deduction::Contradiction`].

use thiserror::Error;

/// Errors raised by [`crate::symbol::DSymbolBuilder`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolError {
    #[error("a symbol needs at least one chamber")]
    Empty,

    #[error("chamber {chamber} is out of range for a symbol of size {size}")]
    ChamberOutOfRange { chamber: usize, size: usize },

    #[error("index {index} is out of range for dimension {dim}")]
    IndexOutOfRange { index: usize, dim: usize },

    #[error("op {index} is undefined at chamber {chamber}")]
    UndefinedNeighbor { index: usize, chamber: usize },

    #[error("op {index} is not an involution at chamber {chamber}")]
    NotAnInvolution { index: usize, chamber: usize },

    #[error("ops {i} and {j} do not commute at chamber {chamber}")]
    NonCommutingOps { i: usize, j: usize, chamber: usize },

    #[error("branching number must be positive (index {index}, chamber {chamber})")]
    NonPositiveBranching { index: usize, chamber: usize },

    #[error("m-value {m} is not a multiple of r = {r} (index {index}, chamber {chamber})")]
    IndivisibleDegree {
        index: usize,
        chamber: usize,
        m: u32,
        r: u32,
    },
}

/// Errors raised when a generator is constructed or resumed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BranchingError {
    #[error("expected a symbol of dimension {expected}, got {actual}")]
    WrongDimension { expected: usize, actual: usize },

    #[error("symbol must be connected")]
    NotConnected,

    #[error("admissible branching values must include 1 and 2, got {values:?}")]
    MissingBasicValues { values: Vec<u32> },

    #[error("admissible branching values must be positive, got {values:?}")]
    NonPositiveValue { values: Vec<u32> },

    #[error("symbol can never become locally euclidean")]
    NotLocallyEuclideanCompletable,

    #[error("checkpoint belongs to {expected}, not to {actual}")]
    CheckpointMismatch { expected: String, actual: String },

    #[error("checkpoint move {position} does not replay: {reason}")]
    CheckpointReplay { position: usize, reason: String },
}
