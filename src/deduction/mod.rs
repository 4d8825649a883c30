// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Deduction engine.
//!
//! A proposed move is propagated through a FIFO work queue. Each dequeued
//! move is committed (recorded on the [`MoveStack`]) and then its consequences
//! are computed by the rule set, which either rejects the state with a
//! [`Contradiction`] or enqueues the moves it forces.
//!
//! Queue handling per move:
//! 1. a position that already holds the same value is skipped
//! 2. a position that holds a different value is a contradiction
//! 3. a deduced value the rules do not admit is a contradiction
//! 4. otherwise the value is defined and the move pushed on the stack
//!
//! On a contradiction the values committed so far stay in place. The initiating
//! choice is always the first move pushed, so undoing that choice removes
//! everything this propagation did.

pub mod errors;
pub mod extra;
pub mod rules2d;
pub mod rules3d;

pub use errors::{Contradiction, ContradictionKind};
pub use extra::{ExtraDeductions, NoExtraDeductions};
pub use rules2d::Rules2d;
pub use rules3d::Rules3d;

use crate::moves::{Move, MoveStack};
use crate::symbol::DSymbol;
use std::collections::VecDeque;
use tracing::trace;

/// A rule set the search driver can run.
pub trait BranchingRules: std::fmt::Debug {
    /// Dimension of the symbols these rules apply to.
    fn dim(&self) -> usize;

    /// Admissible values, ascending.
    fn admissible(&self) -> &[u32];

    /// Whether the deduced move `mv` may be committed. By default its value
    /// must be admissible.
    fn admits(&self, _ds: &DSymbol, mv: &Move) -> bool {
        self.admissible().contains(&mv.value)
    }

    /// The moves forced by `mv`, which is already committed to `ds`.
    fn consequences(&self, ds: &DSymbol, mv: &Move) -> Result<Vec<Move>, Contradiction>;

    /// Propagate the choice `mv`.
    ///
    /// # Panics
    ///
    /// Panics if the position of `mv` is already defined.
    fn perform(&self, ds: &mut DSymbol, stack: &mut MoveStack, mv: Move) -> Result<(), Contradiction> {
        assert!(
            !ds.defines_v(mv.index, mv.element),
            "choice v{}{}({}) = {} targets a defined position",
            mv.index,
            mv.index + 1,
            mv.element,
            mv.value
        );
        propagate(self, ds, stack, VecDeque::from([mv]))
    }

    /// Run the consequences of every preset branching number and propagate
    /// what they force.
    fn check_presets(&self, ds: &mut DSymbol, stack: &mut MoveStack) -> Result<(), Contradiction> {
        let mut presets = Vec::new();
        for i in 0..ds.dim() {
            for d in ds.orbit_reps(i) {
                if let Some(v) = ds.v(i, d) {
                    presets.push(Move::deduction(i, d, v));
                }
            }
        }
        for mv in presets {
            let forced = self.consequences(ds, &mv)?;
            propagate(self, ds, stack, forced.into())?;
        }
        Ok(())
    }
}

/// Drain `queue`, committing every move and enqueueing its consequences.
fn propagate<R>(
    rules: &R,
    ds: &mut DSymbol,
    stack: &mut MoveStack,
    mut queue: VecDeque<Move>,
) -> Result<(), Contradiction>
where
    R: BranchingRules + ?Sized,
{
    while let Some(mv) = queue.pop_front() {
        let mv = Move {
            element: ds.orbit_rep(mv.index, mv.element),
            ..mv
        };
        match ds.v(mv.index, mv.element) {
            Some(existing) if existing == mv.value => continue,
            Some(existing) => {
                return Err(Contradiction::ConflictingValue {
                    index: mv.index,
                    element: mv.element,
                    existing,
                    proposed: mv.value,
                })
            }
            None => {}
        }
        if !mv.is_choice && !rules.admits(ds, &mv) {
            return Err(Contradiction::NotAdmissible {
                index: mv.index,
                element: mv.element,
                value: mv.value,
            });
        }

        ds.define_v(mv.index, mv.element, mv.value);
        stack.push(mv);
        trace!(index = mv.index, element = mv.element, value = mv.value, choice = mv.is_choice, "commit");

        queue.extend(rules.consequences(ds, &mv)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BranchingOptions;
    use crate::symbol::DSymbolBuilder;

    fn single_chamber() -> DSymbol {
        let mut builder = DSymbolBuilder::new(3, 1);
        for i in 0..=3 {
            builder.glue(i, 0, 0).unwrap();
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_choice_commits_and_forces() {
        let rules = Rules3d::new(&BranchingOptions::default());
        let mut ds = single_chamber();
        let mut stack = MoveStack::new();
        rules.perform(&mut ds, &mut stack, Move::choice(0, 0, 6)).unwrap();
        // *6v2 is only spherical for v = 2
        assert_eq!(ds.v(1, 0), Some(2));
        assert_eq!(stack.as_slice(), &[Move::choice(0, 0, 6), Move::deduction(1, 0, 2)]);
    }

    #[test]
    fn test_contradiction_leaves_commits_for_undo() {
        let rules = Rules3d::new(&BranchingOptions::default());
        let mut ds = single_chamber();
        let mut stack = MoveStack::new();
        let result = rules.perform(&mut ds, &mut stack, Move::choice(0, 0, 2));
        assert_eq!(result, Err(Contradiction::DegenerateFace { element: 0, degree: 2 }));
        assert_eq!(stack.len(), 1);
        stack.undo_last_choice(&mut ds);
        assert_eq!(ds.v(0, 0), None);
    }

    #[test]
    #[should_panic(expected = "targets a defined position")]
    fn test_choice_on_defined_position_panics() {
        let rules = Rules3d::new(&BranchingOptions::default());
        let mut ds = single_chamber();
        ds.define_v(1, 0, 2);
        let _ = rules.perform(&mut ds, &mut MoveStack::new(), Move::choice(1, 0, 3));
    }

    #[test]
    fn test_presets_are_checked() {
        let rules = Rules3d::new(&BranchingOptions::default());
        let mut ds = single_chamber();
        ds.define_v(0, 0, 6);
        ds.define_v(1, 0, 3);
        let result = rules.check_presets(&mut ds, &mut MoveStack::new());
        assert!(matches!(
            result,
            Err(Contradiction::NonSphericalSubsymbol { indices: [0, 1, 2], .. })
        ));
    }
}
