// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Deduction rules for 2-dimensional symbols.
//!
//! No values are ever forced here; a move is either accepted or rejected.
//! Rejection happens when a face or vertex degree falls below its minimum, or
//! when the curvature, with every open orbit at its smallest permitted degree,
//! cannot reach the minimum curvature. Raising a branching number only lowers
//! the curvature, so that value is an upper bound for all completions.

use super::{BranchingRules, Contradiction};
use crate::config::BranchingOptions2d;
use crate::moves::Move;
use crate::orbifold::{curvature_2d, Curvature};
use crate::symbol::{Chamber, DSymbol};

#[derive(Debug, Clone)]
pub struct Rules2d {
    admissible: Vec<u32>,
    min_degree: [u32; 2],
    min_curvature: Curvature,
}

impl Rules2d {
    pub fn new(options: &BranchingOptions2d) -> Self {
        let mut admissible = options.admissible_values.clone();
        admissible.sort_unstable();
        admissible.dedup();
        Self {
            admissible,
            min_degree: [options.min_face_degree, options.min_vertex_degree],
            min_curvature: options.min_curvature,
        }
    }

    /// Smallest admissible `v` giving the orbit through `d` its minimum degree.
    fn smallest_value(&self, ds: &DSymbol, i: usize, d: Chamber) -> Option<u32> {
        let r = ds.r(i, d);
        self.admissible
            .iter()
            .copied()
            .find(|&v| r * v >= self.min_degree[i])
    }

    /// Largest curvature any completion of `ds` can have.
    pub fn curvature_bound(&self, ds: &DSymbol) -> Result<Curvature, Contradiction> {
        let mut missing = None;
        let bound = curvature_2d(ds, |i, d| {
            let v = self.smallest_value(ds, i, d);
            if v.is_none() && missing.is_none() {
                missing = Some((i, d));
            }
            v
        });
        match (bound, missing) {
            (Some(bound), _) => Ok(bound),
            (None, Some((index, element))) => Err(Contradiction::NoCompatibleValue { index, element }),
            (None, None) => unreachable!("curvature is only undefined for open orbits"),
        }
    }
}

impl BranchingRules for Rules2d {
    fn dim(&self) -> usize {
        2
    }

    fn admissible(&self) -> &[u32] {
        &self.admissible
    }

    fn consequences(&self, ds: &DSymbol, mv: &Move) -> Result<Vec<Move>, Contradiction> {
        let (i, d) = (mv.index, mv.element);
        if let Some(degree) = ds.m(i, d) {
            if degree < self.min_degree[i] {
                return Err(match i {
                    0 => Contradiction::DegenerateFace { element: d, degree },
                    _ => Contradiction::DegenerateVertex { element: d, degree },
                });
            }
        }

        let bound = self.curvature_bound(ds)?;
        if bound < self.min_curvature {
            return Err(Contradiction::CurvatureTooLow { bound });
        }
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::MoveStack;
    use crate::symbol::DSymbolBuilder;

    fn single_chamber() -> DSymbol {
        let mut builder = DSymbolBuilder::new(2, 1);
        for i in 0..=2 {
            builder.glue(i, 0, 0).unwrap();
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_bound_uses_smallest_permitted_degree() {
        let rules = Rules2d::new(&BranchingOptions2d::default());
        let mut ds = single_chamber();
        assert_eq!(rules.curvature_bound(&ds), Ok(Curvature::new(1, 6)));
        ds.define_v(0, 0, 6);
        assert_eq!(rules.curvature_bound(&ds), Ok(Curvature::zero()));
    }

    #[test]
    fn test_hyperbolic_choices_are_rejected() {
        let rules = Rules2d::new(&BranchingOptions2d::default());
        let mut ds = single_chamber();
        let mut stack = MoveStack::new();
        rules.perform(&mut ds, &mut stack, Move::choice(0, 0, 4)).unwrap();
        let result = rules.perform(&mut ds, &mut stack, Move::choice(1, 0, 6));
        assert_eq!(
            result,
            Err(Contradiction::CurvatureTooLow {
                bound: Curvature::new(-1, 12)
            })
        );
    }

    #[test]
    fn test_degree_minimums() {
        let rules = Rules2d::new(&BranchingOptions2d::default().with_min_vertex_degree(4));
        let mut ds = single_chamber();
        assert_eq!(
            rules.perform(&mut ds, &mut MoveStack::new(), Move::choice(1, 0, 3)),
            Err(Contradiction::DegenerateVertex { element: 0, degree: 3 })
        );
    }

    #[test]
    fn test_unreachable_degree() {
        let rules = Rules2d::new(
            &BranchingOptions2d::default()
                .with_admissible_values(vec![1, 2])
                .with_min_face_degree(5)
                .with_min_vertex_degree(2),
        );
        let mut ds = single_chamber();
        assert_eq!(
            rules.perform(&mut ds, &mut MoveStack::new(), Move::choice(1, 0, 2)),
            Err(Contradiction::NoCompatibleValue { index: 0, element: 0 })
        );
    }
}
