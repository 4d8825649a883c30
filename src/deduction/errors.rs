// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Contradictions found while propagating a move.

use crate::orbifold::Curvature;
use crate::symbol::Chamber;
use std::fmt;
use strum_macros::{EnumCount as EnumCountMacro, EnumDiscriminants};

/// Why a move (or one of its consequences) was rejected.
///
/// Contradictions are ordinary search outcomes. The generator counts them by
/// [`ContradictionKind`] and backtracks.
#[derive(Debug, Clone, PartialEq, Eq, EnumCountMacro, EnumDiscriminants)]
#[strum_discriminants(name(ContradictionKind))]
pub enum Contradiction {
    /// A deduced value differs from the one already in place.
    ConflictingValue {
        index: usize,
        element: Chamber,
        existing: u32,
        proposed: u32,
    },

    /// A deduced value is not among the admissible values.
    NotAdmissible {
        index: usize,
        element: Chamber,
        value: u32,
    },

    DegenerateFace { element: Chamber, degree: u32 },

    DegenerateEdge { element: Chamber, degree: u32 },

    DegenerateVertex { element: Chamber, degree: u32 },

    /// A three-index sub-symbol can no longer become spherical.
    NonSphericalSubsymbol { indices: [usize; 3], element: Chamber },

    /// No admissible value reaches the minimum degree of an open orbit.
    NoCompatibleValue { index: usize, element: Chamber },

    /// Even the most curved completion stays below the minimum curvature.
    CurvatureTooLow { bound: Curvature },

    /// Rejected by a pluggable deduction rule.
    ExtraRejected { index: usize, element: Chamber },
}

impl fmt::Display for Contradiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Contradiction::ConflictingValue {
                index,
                element,
                existing,
                proposed,
            } => write!(
                f,
                "v{}{}({}) is {} but {} was deduced",
                index,
                index + 1,
                element,
                existing,
                proposed
            ),
            Contradiction::NotAdmissible {
                index,
                element,
                value,
            } => write!(
                f,
                "deduced v{}{}({}) = {} is not admissible",
                index,
                index + 1,
                element,
                value
            ),
            Contradiction::DegenerateFace { element, degree } => {
                write!(f, "face at {} has degree {}", element, degree)
            }
            Contradiction::DegenerateEdge { element, degree } => {
                write!(f, "edge at {} has degree {}", element, degree)
            }
            Contradiction::DegenerateVertex { element, degree } => {
                write!(f, "vertex at {} has degree {}", element, degree)
            }
            Contradiction::NonSphericalSubsymbol { indices, element } => write!(
                f,
                "sub-symbol {:?} at {} cannot become spherical",
                indices, element
            ),
            Contradiction::NoCompatibleValue { index, element } => write!(
                f,
                "no admissible value for v{}{}({}) reaches the minimum degree",
                index,
                index + 1,
                element
            ),
            Contradiction::CurvatureTooLow { bound } => {
                write!(f, "curvature is at most {}", bound)
            }
            Contradiction::ExtraRejected { index, element } => write!(
                f,
                "extra deductions rejected v{}{}({})",
                index,
                index + 1,
                element
            ),
        }
    }
}
