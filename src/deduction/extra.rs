// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Pluggable deductions for the 3-dimensional generator.

use crate::moves::Move;
use crate::symbol::DSymbol;
use std::fmt;

/// Additional rules run after the degeneracy checks of every committed move.
///
/// `deduce` sees the symbol with the move already committed. It returns the
/// further moves it forces (as deductions), or `None` to reject the move.
pub trait ExtraDeductions: fmt::Debug {
    fn deduce(&self, ds: &DSymbol, mv: &Move) -> Option<Vec<Move>>;
}

/// The default: no extra deductions.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoExtraDeductions;

impl ExtraDeductions for NoExtraDeductions {
    fn deduce(&self, _ds: &DSymbol, _mv: &Move) -> Option<Vec<Move>> {
        Some(Vec::new())
    }
}
