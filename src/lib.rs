// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Enumeration of branching numbers for Delaney symbols.
//!
//! Given a connected Delaney symbol (D-symbol) whose neighbor operations are
//! fixed and whose branching numbers are partly or entirely undefined, the
//! generators in [`engine`] enumerate every admissible completion exactly once
//! up to isomorphism.
//!
//! # Architecture
//!
//! ## Immutable data
//!
//! Computed once per generator:
//! - the neighbor operations and the orbit tables of every index pair
//! - the canonical numbering of the input and its automorphism group
//!
//! ## Search data
//!
//! Changes during the search and is undone on backtracking:
//! - the branching numbers, one `Option<u32>` per orbit
//! - the [`moves::MoveStack`] recording every definition
//!
//! # Search Algorithm
//!
//! Open positions are filled in (chamber, index) order. Every candidate value
//! is propagated by the [`deduction`] rules, which reject degenerate tiles and
//! sub-symbols that can no longer be spherical, and which commit the values
//! such sub-symbols force. States that are not lexicographically minimal under
//! the automorphisms are pruned by [`symmetry`].
//!
//! # References
//!
//! - Delgado-Friedrichs, O. (2003). "Data structures and algorithms for
//!   tilings I." Theoretical Computer Science 303, 431-445.

pub mod config;
pub mod deduction;
pub mod engine;
pub mod error;
pub mod moves;
pub mod orbifold;
pub mod statistics;
pub mod symbol;
pub mod symmetry;

// Re-export commonly used types
pub use config::{BranchingOptions, BranchingOptions2d};
pub use deduction::{Contradiction, ExtraDeductions};
pub use engine::{Checkpoint, DefineBranching2d, DefineBranching3d, SearchState};
pub use error::{BranchingError, SymbolError};
pub use orbifold::may_become_locally_euclidean_3d;
pub use symbol::{Chamber, DSymbol, DSymbolBuilder};
