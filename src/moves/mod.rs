// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Move stack for chronological backtracking.
//!
//! Every branching number defined during the search is recorded as a [`Move`]
//! so it can be undone exactly. A choice move marks a decision point; the
//! deductions it caused follow it on the stack. Undoing a choice pops
//! everything above it and the choice itself.
//!
//! # Memory Model
//!
//! - The stack is owned by the generator and is the only search history
//! - Undo is one write into the symbol per popped move
//! - A choice placeholder with value 0 defines nothing and undoes nothing

use crate::symbol::{Chamber, DSymbol};
use serde::{Deserialize, Serialize};

/// One assignment of a branching number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Index `i` of the `(i, i+1)` orbit.
    pub index: usize,
    /// Representative chamber of the orbit.
    pub element: Chamber,
    /// The branching number; 0 for a choice whose first candidate is pending.
    pub value: u32,
    pub is_choice: bool,
}

impl Move {
    pub fn choice(index: usize, element: Chamber, value: u32) -> Self {
        Self {
            index,
            element,
            value,
            is_choice: true,
        }
    }

    pub fn deduction(index: usize, element: Chamber, value: u32) -> Self {
        Self {
            index,
            element,
            value,
            is_choice: false,
        }
    }

    /// True for a choice that has not tried any candidate yet.
    pub fn is_placeholder(&self) -> bool {
        self.is_choice && self.value == 0
    }
}

/// The stack of moves made since the search started.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveStack {
    moves: Vec<Move>,
}

impl MoveStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    pub fn pop(&mut self) -> Option<Move> {
        self.moves.pop()
    }

    pub fn last(&self) -> Option<&Move> {
        self.moves.last()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Move> {
        self.moves.iter()
    }

    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    /// Number of choice moves on the stack, i.e. the search depth.
    pub fn choice_depth(&self) -> usize {
        self.moves.iter().filter(|mv| mv.is_choice).count()
    }

    /// Pop moves, undefining their values, up to and including the most recent
    /// choice, which is returned. Returns `None` once the stack is empty.
    pub fn undo_last_choice(&mut self, ds: &mut DSymbol) -> Option<Move> {
        while let Some(mv) = self.moves.pop() {
            if mv.value != 0 {
                ds.undefine_v(mv.index, mv.element);
            }
            if mv.is_choice {
                return Some(mv);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::DSymbolBuilder;

    fn blank() -> DSymbol {
        DSymbolBuilder::from_ops(3, vec![vec![1, 0], vec![0, 1], vec![0, 1], vec![0, 1]])
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn test_undo_restores_values_up_to_choice() {
        let mut ds = blank();
        let mut stack = MoveStack::new();

        ds.define_v(0, 0, 2);
        stack.push(Move::choice(0, 0, 2));
        ds.define_v(1, 0, 3);
        stack.push(Move::choice(1, 0, 3));
        ds.define_v(2, 0, 2);
        stack.push(Move::deduction(2, 0, 2));
        ds.define_v(1, 1, 2);
        stack.push(Move::deduction(1, 1, 2));
        assert_eq!(stack.choice_depth(), 2);

        let undone = stack.undo_last_choice(&mut ds);
        assert_eq!(undone, Some(Move::choice(1, 0, 3)));
        assert_eq!(stack.len(), 1);
        assert_eq!(ds.v(0, 0), Some(2));
        assert_eq!(ds.v(1, 0), None);
        assert_eq!(ds.v(1, 1), None);
        assert_eq!(ds.v(2, 0), None);
    }

    #[test]
    fn test_placeholder_undo_leaves_symbol_alone() {
        let mut ds = blank();
        ds.define_v(1, 0, 4);
        let mut stack = MoveStack::new();
        stack.push(Move::choice(1, 0, 0));
        assert!(stack.last().is_some_and(Move::is_placeholder));

        assert_eq!(stack.undo_last_choice(&mut ds), Some(Move::choice(1, 0, 0)));
        assert_eq!(ds.v(1, 0), Some(4));
    }

    #[test]
    fn test_undo_on_empty_stack() {
        let mut ds = blank();
        let mut stack = MoveStack::new();
        stack.push(Move::deduction(0, 0, 1));
        ds.define_v(0, 0, 1);
        assert_eq!(stack.undo_last_choice(&mut ds), None);
        assert!(stack.is_empty());
        assert_eq!(ds.v(0, 0), None);
    }
}
