// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Canonicality of partial branching assignments.
//!
//! A state is kept only if its value sequence (chamber-major, index-minor) is
//! lexicographically no larger than its image under every automorphism of the
//! input symbol. Undefined values never decide a comparison: it stops at the
//! first position where either side is undefined.

use crate::symbol::{Chamber, DSymbol};
use std::cmp::Ordering;

/// Result of [`check_canonicality`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymmetryType {
    /// No automorphism maps the state onto an equal or smaller one.
    Canonical,
    /// Some non-identity automorphism maps the state onto itself.
    Equivocal,
    /// Some automorphism produces a smaller state (reject).
    NonCanonical,
}

/// Compare the values of `ds` with their image under `automorphism`.
///
/// Returns `None` if the comparison ran into an undefined value before a
/// difference was found.
fn compare_with_image(ds: &DSymbol, automorphism: &[Chamber]) -> Option<Ordering> {
    for (d, &image) in automorphism.iter().enumerate() {
        for i in 0..ds.dim() {
            match (ds.v(i, d), ds.v(i, image)) {
                (Some(own), Some(mapped)) if own != mapped => return Some(mapped.cmp(&own)),
                (Some(_), Some(_)) => {}
                _ => return None,
            }
        }
    }
    Some(Ordering::Equal)
}

/// Check the current state of `ds` against `automorphisms`; the identity,
/// if present, is skipped.
pub fn check_canonicality(ds: &DSymbol, automorphisms: &[Vec<Chamber>]) -> SymmetryType {
    let mut equivocal = false;
    for automorphism in automorphisms {
        if automorphism.iter().enumerate().all(|(d, &e)| d == e) {
            continue;
        }
        match compare_with_image(ds, automorphism) {
            Some(Ordering::Less) => return SymmetryType::NonCanonical,
            Some(Ordering::Equal) => equivocal = true,
            Some(Ordering::Greater) | None => {}
        }
    }
    if equivocal {
        SymmetryType::Equivocal
    } else {
        SymmetryType::Canonical
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::DSymbolBuilder;

    /// A 4-chamber chain along ops 0 and 1, mirrored by `[3, 2, 1, 0]`.
    fn square_face() -> DSymbol {
        let mut builder = DSymbolBuilder::from_ops(
            2,
            vec![vec![1, 0, 3, 2], vec![0, 2, 1, 3], vec![0, 1, 2, 3]],
        )
        .unwrap();
        builder.set_v(0, 0, 1).unwrap();
        builder.build().unwrap()
    }

    #[test]
    fn test_smaller_image_is_rejected() {
        let mut ds = square_face();
        let autos = ds.automorphisms();
        ds.define_v(1, 0, 3);
        ds.define_v(1, 1, 1);
        ds.define_v(1, 3, 2);
        assert_eq!(check_canonicality(&ds, &autos), SymmetryType::NonCanonical);
        ds.define_v(1, 0, 2);
        ds.define_v(1, 3, 3);
        assert_eq!(check_canonicality(&ds, &autos), SymmetryType::Canonical);
    }

    #[test]
    fn test_symmetric_state_is_equivocal() {
        let mut ds = square_face();
        let autos = ds.automorphisms();
        ds.define_v(1, 0, 4);
        ds.define_v(1, 1, 1);
        ds.define_v(1, 3, 4);
        assert_eq!(check_canonicality(&ds, &autos), SymmetryType::Equivocal);
    }

    #[test]
    fn test_undefined_values_do_not_decide() {
        let mut ds = square_face();
        let autos = ds.automorphisms();
        // the mirror image would start with an undefined value
        ds.define_v(1, 0, 6);
        assert_eq!(check_canonicality(&ds, &autos), SymmetryType::Canonical);
        // nor when the undefined value is on this side
        ds.undefine_v(1, 0);
        ds.define_v(1, 3, 2);
        assert_eq!(check_canonicality(&ds, &autos), SymmetryType::Canonical);
    }
}
