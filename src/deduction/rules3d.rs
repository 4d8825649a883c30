// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Deduction rules for 3-dimensional symbols.
//!
//! After a move `v_{i,i+1}(D) = v` is committed:
//! - degeneracy: faces (`i = 0`) need degree 3 or more, edges (`i = 2`)
//!   degree 3 or more (2 if allowed)
//! - the [`ExtraDeductions`] hook may force moves or reject
//! - every three-index sub-symbol through `D` containing `i` and `i+1` must
//!   still be able to become spherical; values it forces are enqueued
//! - face degrees agree across `op_3`, edge degrees across `op_0`
//!
//! An undefined orbit whose partner is defined counts as carrying the
//! partner's value, and copying that value is admitted even when it lies
//! outside the admissible set.

use super::{BranchingRules, Contradiction, ExtraDeductions, NoExtraDeductions};
use crate::config::BranchingOptions;
use crate::moves::Move;
use crate::orbifold::{LocalPiece, Verdict};
use crate::symbol::{Chamber, DSymbol};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Rules3d {
    admissible: Vec<u32>,
    min_edge_degree: u32,
    extra: Arc<dyn ExtraDeductions>,
}

impl Rules3d {
    /// Rules for `options`, whose admissible values are used as given.
    pub fn new(options: &BranchingOptions) -> Self {
        let mut admissible = options.admissible_values.clone();
        admissible.sort_unstable();
        admissible.dedup();
        Self {
            admissible,
            min_edge_degree: options.min_edge_degree(),
            extra: Arc::new(NoExtraDeductions),
        }
    }

    pub fn with_extra_deductions(mut self, extra: Arc<dyn ExtraDeductions>) -> Self {
        self.extra = extra;
        self
    }
}

impl BranchingRules for Rules3d {
    fn dim(&self) -> usize {
        3
    }

    fn admissible(&self) -> &[u32] {
        &self.admissible
    }

    fn admits(&self, ds: &DSymbol, mv: &Move) -> bool {
        self.admissible.contains(&mv.value)
            || paired_element(ds, mv.index, mv.element).is_some_and(|e| ds.v(mv.index, e) == Some(mv.value))
    }

    fn consequences(&self, ds: &DSymbol, mv: &Move) -> Result<Vec<Move>, Contradiction> {
        let (i, d) = (mv.index, mv.element);

        match (i, ds.m(i, d)) {
            (0, Some(degree)) if degree < 3 => {
                return Err(Contradiction::DegenerateFace { element: d, degree })
            }
            (2, Some(degree)) if degree < self.min_edge_degree => {
                return Err(Contradiction::DegenerateEdge { element: d, degree })
            }
            _ => {}
        }

        let mut forced = self
            .extra
            .deduce(ds, mv)
            .ok_or(Contradiction::ExtraRejected { index: i, element: d })?;

        for j in (0..=3).filter(|&j| j != i && j != i + 1) {
            let mut piece = LocalPiece::extract(ds, [i, i + 1, j], d);
            for orbit in piece.orbits.iter_mut().filter(|orbit| orbit.value.is_none()) {
                if let Some((k, e)) = orbit.slot {
                    orbit.value = paired_element(ds, k, e).and_then(|p| ds.v(k, p));
                }
            }
            match piece.analyze(&self.admissible) {
                Verdict::Impossible => {
                    return Err(Contradiction::NonSphericalSubsymbol {
                        indices: piece.indices,
                        element: d,
                    })
                }
                Verdict::Possible(values) => forced.extend(
                    values
                        .into_iter()
                        .map(|f| Move::deduction(f.index, f.element, f.value)),
                ),
            }
        }

        if let Some(e) = paired_element(ds, i, d) {
            forced.push(Move::deduction(i, ds.orbit_rep(i, e), mv.value));
        }

        Ok(forced)
    }
}

/// The chamber whose `(i, i+1)` orbit must carry the same value as that of `d`.
fn paired_element(ds: &DSymbol, i: usize, d: Chamber) -> Option<Chamber> {
    match i {
        0 => Some(ds.op(3, d)),
        2 => Some(ds.op(0, d)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::MoveStack;
    use crate::symbol::DSymbolBuilder;

    #[derive(Debug)]
    struct NoCubes;

    impl ExtraDeductions for NoCubes {
        fn deduce(&self, ds: &DSymbol, mv: &Move) -> Option<Vec<Move>> {
            if mv.index == 0 && ds.m(0, mv.element) == Some(4) {
                None
            } else {
                Some(Vec::new())
            }
        }
    }

    fn two_chamber() -> DSymbol {
        // op 0 swaps the chambers, every other op fixes them
        DSymbolBuilder::from_ops(3, vec![vec![1, 0], vec![0, 1], vec![0, 1], vec![0, 1]])
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn test_edge_degrees_agree_across_op0() {
        let rules = Rules3d::new(&BranchingOptions::default());
        let mut ds = two_chamber();
        let mut stack = MoveStack::new();
        rules.perform(&mut ds, &mut stack, Move::choice(2, 0, 3)).unwrap();
        assert_eq!(ds.v(2, 1), Some(3));
        assert!(stack.iter().any(|mv| *mv == Move::deduction(2, 1, 3)));
    }

    #[test]
    fn test_preset_outside_admissible_set_is_copied() {
        let rules = Rules3d::new(&BranchingOptions::default());
        let mut ds = two_chamber();
        ds.define_v(2, 0, 5);
        let mut stack = MoveStack::new();
        rules.check_presets(&mut ds, &mut stack).unwrap();
        assert_eq!(ds.v(2, 1), Some(5));
        assert!(stack.iter().any(|mv| *mv == Move::deduction(2, 1, 5)));
    }

    #[test]
    fn test_edge_degree_two_needs_the_flag() {
        let strict = Rules3d::new(&BranchingOptions::default());
        let mut ds = two_chamber();
        assert_eq!(
            strict.perform(&mut ds, &mut MoveStack::new(), Move::choice(2, 0, 2)),
            Err(Contradiction::DegenerateEdge { element: 0, degree: 2 })
        );

        let relaxed = Rules3d::new(&BranchingOptions::default().with_edge_degree_two(true));
        let mut ds = two_chamber();
        assert!(relaxed
            .perform(&mut ds, &mut MoveStack::new(), Move::choice(2, 0, 2))
            .is_ok());
    }

    #[test]
    fn test_extra_deductions_can_reject() {
        let rules = Rules3d::new(&BranchingOptions::default()).with_extra_deductions(Arc::new(NoCubes));
        let mut ds = two_chamber();
        // r = 2 for the face orbit, so v = 2 makes a square
        assert_eq!(
            rules.perform(&mut ds, &mut MoveStack::new(), Move::choice(0, 0, 2)),
            Err(Contradiction::ExtraRejected { index: 0, element: 0 })
        );
        let mut ds = two_chamber();
        assert!(rules
            .perform(&mut ds, &mut MoveStack::new(), Move::choice(0, 0, 3))
            .is_ok());
    }
}
