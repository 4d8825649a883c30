// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Exact curvature of 2-dimensional symbols.
//!
//! The curvature of a 2-dimensional symbol is
//! `sum over chambers of (1/m_01 + 1/m_12 + 1/m_02) - size` with `m_02 = 2`.
//! It is positive for spherical, zero for euclidean and negative for
//! hyperbolic symbols, and decreases when any branching number grows.

use crate::symbol::{Chamber, DSymbol};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Add;

/// An exact rational curvature value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Curvature {
    numerator: i64,
    denominator: i64,
}

fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

impl Curvature {
    /// # Panics
    ///
    /// Panics if `denominator` is zero.
    pub fn new(numerator: i64, denominator: i64) -> Self {
        assert!(denominator != 0, "curvature with zero denominator");
        let sign = if denominator < 0 { -1 } else { 1 };
        let g = gcd(numerator, denominator).max(1);
        Self {
            numerator: sign * numerator / g,
            denominator: sign * denominator / g,
        }
    }

    pub fn zero() -> Self {
        Self::new(0, 1)
    }

    pub fn numerator(&self) -> i64 {
        self.numerator
    }

    pub fn denominator(&self) -> i64 {
        self.denominator
    }

    pub fn is_negative(&self) -> bool {
        self.cmp(&Curvature::zero()) == Ordering::Less
    }
}

impl Add for Curvature {
    type Output = Curvature;

    fn add(self, other: Curvature) -> Curvature {
        Curvature::new(
            self.numerator * other.denominator + other.numerator * self.denominator,
            self.denominator * other.denominator,
        )
    }
}

impl Default for Curvature {
    fn default() -> Self {
        Self::zero()
    }
}

impl PartialEq for Curvature {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Curvature {}

impl PartialOrd for Curvature {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Curvature {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = self.numerator as i128 * other.denominator as i128;
        let rhs = other.numerator as i128 * self.denominator as i128;
        // denominators may arrive unnormalized through serde
        let sign = (self.denominator.signum() * other.denominator.signum()) as i128;
        (sign * lhs).cmp(&(sign * rhs))
    }
}

impl fmt::Display for Curvature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denominator == 1 {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

/// Curvature of a 2-dimensional symbol.
///
/// Undefined branching numbers are taken from `fallback(index, chamber)`;
/// returns `None` if the fallback has no value for some undefined orbit.
pub fn curvature_2d<F>(ds: &DSymbol, mut fallback: F) -> Option<Curvature>
where
    F: FnMut(usize, Chamber) -> Option<u32>,
{
    debug_assert_eq!(ds.dim(), 2, "curvature_2d needs a 2-dimensional symbol");
    let mut total = Curvature::new(-(ds.size() as i64), 2);
    for i in 0..2 {
        for rep in ds.orbit_reps(i) {
            let v = match ds.v(i, rep) {
                Some(v) => v,
                None => fallback(i, rep)?,
            };
            let r = ds.r(i, rep);
            let orbit_size = ds.orbit(i, i + 1, rep).members.len() as i64;
            total = total + Curvature::new(orbit_size, (r * v) as i64);
        }
    }
    Some(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::DSymbolBuilder;

    fn single_chamber(v01: u32, v12: u32) -> DSymbol {
        let mut builder = DSymbolBuilder::new(2, 1);
        for i in 0..=2 {
            builder.glue(i, 0, 0).unwrap();
        }
        builder.set_v(0, 0, v01).unwrap().set_v(1, 0, v12).unwrap();
        builder.build().unwrap()
    }

    #[test]
    fn test_arithmetic() {
        let a = Curvature::new(1, 4) + Curvature::new(1, 3);
        assert_eq!(a, Curvature::new(7, 12));
        assert_eq!(Curvature::new(2, -4), Curvature::new(-1, 2));
        assert!(Curvature::new(-1, 12).is_negative());
        assert_eq!(Curvature::new(6, 3).to_string(), "2");
    }

    #[test]
    fn test_signs_of_regular_tilings() {
        let cube = curvature_2d(&single_chamber(4, 3), |_, _| None).unwrap();
        assert_eq!(cube, Curvature::new(1, 12));
        let squares = curvature_2d(&single_chamber(4, 4), |_, _| None).unwrap();
        assert_eq!(squares, Curvature::zero());
        let heptagons = curvature_2d(&single_chamber(7, 3), |_, _| None).unwrap();
        assert!(heptagons.is_negative());
    }

    #[test]
    fn test_fallback_fills_undefined_orbits() {
        let mut ds = single_chamber(3, 3);
        ds.undefine_v(1, 0);
        assert_eq!(curvature_2d(&ds, |_, _| None), None);
        let filled = curvature_2d(&ds, |i, _| if i == 1 { Some(3) } else { None }).unwrap();
        assert_eq!(filled, Curvature::new(1, 6));
    }
}
