// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Delaney symbols with partially defined branching numbers.
//!
//! A [`DSymbol`] is an arena of chambers `0..size` with one involution per
//! index `0..=dim` and one optional branching number (v-value) per orbit of
//! each index pair `(i, i+1)`. The ops are fixed once built; the search only
//! ever defines and undefines v-values.
//!
//! # Memory Model
//!
//! - Topology (ops, orbit tables): immutable after [`DSymbolBuilder::build`]
//! - Branching numbers: a flat `Vec<Option<u32>>` per index, addressed by orbit
//!   number, so undoing a move is a single write
//!
//! Chambers are 0-based everywhere in the API. The [`fmt::Display`] output uses
//! the conventional 1-based `<1.1:size dim:ops:ms>` notation.

pub mod canonical;
pub mod orbits;

pub use orbits::{walk_orbit, Orbit, OrbitTable};

use crate::error::SymbolError;
use std::fmt;

/// A chamber index.
pub type Chamber = usize;

/// A Delaney symbol whose ops are all defined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DSymbol {
    dim: usize,
    ops: Vec<Vec<Chamber>>,
    orbits: Vec<OrbitTable>,
    values: Vec<Vec<Option<u32>>>,
}

impl DSymbol {
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn size(&self) -> usize {
        self.ops[0].len()
    }

    /// The `i`-neighbor of `d`.
    pub fn op(&self, i: usize, d: Chamber) -> Chamber {
        self.ops[i][d]
    }

    /// Orbit table for the pair `(i, i+1)`.
    pub fn orbits(&self, i: usize) -> &OrbitTable {
        &self.orbits[i]
    }

    pub fn orbit_index(&self, i: usize, d: Chamber) -> usize {
        self.orbits[i].orbit_of(d)
    }

    pub fn orbit_count(&self, i: usize) -> usize {
        self.orbits[i].len()
    }

    /// Representatives of the `(i, i+1)`-orbits, smallest chamber first.
    pub fn orbit_reps(&self, i: usize) -> impl Iterator<Item = Chamber> + '_ {
        self.orbits[i].reps().iter().copied()
    }

    /// The `(i, j)`-orbit through `d`, for any two indices.
    pub fn orbit(&self, i: usize, j: usize, d: Chamber) -> Orbit {
        walk_orbit(&self.ops, i, j, d)
    }

    /// Representative of the `(i, i+1)`-orbit through `d`.
    pub fn orbit_rep(&self, i: usize, d: Chamber) -> Chamber {
        let table = &self.orbits[i];
        table.rep(table.orbit_of(d))
    }

    /// The r-value of the `(i, i+1)`-orbit through `d`.
    pub fn r(&self, i: usize, d: Chamber) -> u32 {
        let table = &self.orbits[i];
        table.r(table.orbit_of(d))
    }

    /// The branching number of the `(i, i+1)`-orbit through `d`, if defined.
    pub fn v(&self, i: usize, d: Chamber) -> Option<u32> {
        self.values[i][self.orbits[i].orbit_of(d)]
    }

    pub fn defines_v(&self, i: usize, d: Chamber) -> bool {
        self.v(i, d).is_some()
    }

    /// `r * v` for the `(i, i+1)`-orbit through `d`, if `v` is defined.
    pub fn m(&self, i: usize, d: Chamber) -> Option<u32> {
        self.v(i, d).map(|v| v * self.r(i, d))
    }

    /// Degree of the face through `d` (`m_01`).
    pub fn face_degree(&self, d: Chamber) -> Option<u32> {
        self.m(0, d)
    }

    /// Degree of the `(dim-1, dim)`-orbit through `d`; the edge degree of a
    /// 3-dimensional tiling.
    pub fn edge_degree(&self, d: Chamber) -> Option<u32> {
        self.m(self.dim - 1, d)
    }

    /// Set the branching number of the `(i, i+1)`-orbit through `d`.
    pub fn define_v(&mut self, i: usize, d: Chamber, v: u32) {
        let k = self.orbits[i].orbit_of(d);
        self.values[i][k] = Some(v);
    }

    pub fn undefine_v(&mut self, i: usize, d: Chamber) {
        let k = self.orbits[i].orbit_of(d);
        self.values[i][k] = None;
    }

    /// True if every branching number is defined.
    pub fn is_complete(&self) -> bool {
        self.values.iter().all(|vs| vs.iter().all(Option::is_some))
    }

    pub fn is_connected(&self) -> bool {
        let size = self.size();
        let mut seen = vec![false; size];
        let mut queue = vec![0];
        seen[0] = true;
        let mut count = 1;
        while let Some(d) = queue.pop() {
            for i in 0..=self.dim {
                let e = self.ops[i][d];
                if !seen[e] {
                    seen[e] = true;
                    count += 1;
                    queue.push(e);
                }
            }
        }
        count == size
    }

    /// Branching numbers in (chamber, index) order, the order used for
    /// canonical comparison.
    pub fn value_sequence(&self) -> Vec<Option<u32>> {
        let mut out = Vec::with_capacity(self.size() * self.dim);
        for d in 0..self.size() {
            for i in 0..self.dim {
                out.push(self.v(i, d));
            }
        }
        out
    }

    /// The same symbol with chamber `d` renamed to `perm[d]`.
    ///
    /// # Panics
    ///
    /// Panics if `perm` is not a permutation of `0..size`.
    pub fn renumbered(&self, perm: &[Chamber]) -> DSymbol {
        let size = self.size();
        assert_eq!(perm.len(), size, "permutation has wrong length");
        let mut ops = vec![vec![usize::MAX; size]; self.dim + 1];
        for (i, op) in self.ops.iter().enumerate() {
            for d in 0..size {
                ops[i][perm[d]] = perm[op[d]];
            }
        }
        assert!(
            ops.iter().all(|op| op.iter().all(|&e| e < size)),
            "renumbering is not a permutation"
        );

        let orbits: Vec<OrbitTable> = (0..self.dim)
            .map(|i| OrbitTable::compute(&ops, i, i + 1))
            .collect();
        let mut values: Vec<Vec<Option<u32>>> =
            orbits.iter().map(|table| vec![None; table.len()]).collect();
        for i in 0..self.dim {
            for d in self.orbit_reps(i) {
                let target = orbits[i].orbit_of(perm[d]);
                values[i][target] = self.v(i, d);
            }
        }

        DSymbol {
            dim: self.dim,
            ops,
            orbits,
            values,
        }
    }
}

impl fmt::Display for DSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<1.1:{} {}:", self.size(), self.dim)?;
        for i in 0..=self.dim {
            if i > 0 {
                write!(f, ",")?;
            }
            let images: Vec<String> = (0..self.size())
                .filter(|&d| self.ops[i][d] >= d)
                .map(|d| (self.ops[i][d] + 1).to_string())
                .collect();
            write!(f, "{}", images.join(" "))?;
        }
        write!(f, ":")?;
        for i in 0..self.dim {
            if i > 0 {
                write!(f, ",")?;
            }
            let ms: Vec<String> = self
                .orbit_reps(i)
                .map(|d| self.m(i, d).unwrap_or(0).to_string())
                .collect();
            write!(f, "{}", ms.join(" "))?;
        }
        write!(f, ">")
    }
}

#[derive(Debug, Clone, Copy)]
enum Branching {
    V(u32),
    M(u32),
}

/// Incremental construction of a [`DSymbol`].
///
/// # Example
///
/// ```
/// use dsym_branching::symbol::DSymbolBuilder;
///
/// // The single-chamber symbol of the cubic honeycomb.
/// let mut builder = DSymbolBuilder::new(3, 1);
/// for i in 0..=3 {
///     builder.glue(i, 0, 0).unwrap();
/// }
/// builder.set_v(0, 0, 4).unwrap().set_v(1, 0, 3).unwrap().set_v(2, 0, 4).unwrap();
/// let ds = builder.build().unwrap();
/// assert_eq!(ds.to_string(), "<1.1:1 3:1,1,1,1:4,3,4>");
/// ```
#[derive(Debug, Clone)]
pub struct DSymbolBuilder {
    dim: usize,
    size: usize,
    ops: Vec<Vec<Option<Chamber>>>,
    branching: Vec<(usize, Chamber, Branching)>,
}

impl DSymbolBuilder {
    pub fn new(dim: usize, size: usize) -> Self {
        Self {
            dim,
            size,
            ops: vec![vec![None; size]; dim + 1],
            branching: Vec::new(),
        }
    }

    /// Start from complete op tables, `ops[i][d]` being the `i`-neighbor of `d`.
    pub fn from_ops(dim: usize, ops: Vec<Vec<Chamber>>) -> Result<Self, SymbolError> {
        let size = ops.first().map_or(0, Vec::len);
        let mut builder = Self::new(dim, size);
        if ops.len() != dim + 1 {
            return Err(SymbolError::IndexOutOfRange {
                index: ops.len().saturating_sub(1),
                dim,
            });
        }
        for (i, op) in ops.iter().enumerate() {
            if op.len() != size {
                return Err(SymbolError::UndefinedNeighbor {
                    index: i,
                    chamber: op.len().min(size),
                });
            }
            for (d, &e) in op.iter().enumerate() {
                builder.check_chamber(e)?;
                builder.ops[i][d] = Some(e);
            }
        }
        Ok(builder)
    }

    fn check_chamber(&self, d: Chamber) -> Result<(), SymbolError> {
        if d >= self.size {
            return Err(SymbolError::ChamberOutOfRange {
                chamber: d,
                size: self.size,
            });
        }
        Ok(())
    }

    fn check_index(&self, i: usize, bound: usize) -> Result<(), SymbolError> {
        if i > bound {
            return Err(SymbolError::IndexOutOfRange {
                index: i,
                dim: self.dim,
            });
        }
        Ok(())
    }

    /// Make `d` and `e` each other's `i`-neighbors (`d == e` for a fixed point).
    pub fn glue(&mut self, i: usize, d: Chamber, e: Chamber) -> Result<&mut Self, SymbolError> {
        self.check_index(i, self.dim)?;
        self.check_chamber(d)?;
        self.check_chamber(e)?;
        self.ops[i][d] = Some(e);
        self.ops[i][e] = Some(d);
        Ok(self)
    }

    /// Preset the branching number of the `(i, i+1)`-orbit through `d`.
    pub fn set_v(&mut self, i: usize, d: Chamber, v: u32) -> Result<&mut Self, SymbolError> {
        self.check_index(i + 1, self.dim)?;
        self.check_chamber(d)?;
        if v == 0 {
            return Err(SymbolError::NonPositiveBranching { index: i, chamber: d });
        }
        self.branching.push((i, d, Branching::V(v)));
        Ok(self)
    }

    /// Preset the m-value of the `(i, i+1)`-orbit through `d`; it must be a
    /// multiple of the orbit's r-value.
    pub fn set_m(&mut self, i: usize, d: Chamber, m: u32) -> Result<&mut Self, SymbolError> {
        self.check_index(i + 1, self.dim)?;
        self.check_chamber(d)?;
        if m == 0 {
            return Err(SymbolError::NonPositiveBranching { index: i, chamber: d });
        }
        self.branching.push((i, d, Branching::M(m)));
        Ok(self)
    }

    pub fn build(&self) -> Result<DSymbol, SymbolError> {
        if self.size == 0 {
            return Err(SymbolError::Empty);
        }

        let mut ops = Vec::with_capacity(self.dim + 1);
        for (i, op) in self.ops.iter().enumerate() {
            let mut complete = Vec::with_capacity(self.size);
            for (d, e) in op.iter().enumerate() {
                match e {
                    Some(e) => complete.push(*e),
                    None => return Err(SymbolError::UndefinedNeighbor { index: i, chamber: d }),
                }
            }
            ops.push(complete);
        }

        for (i, op) in ops.iter().enumerate() {
            for d in 0..self.size {
                if op[op[d]] != d {
                    return Err(SymbolError::NotAnInvolution { index: i, chamber: d });
                }
            }
        }

        for i in 0..=self.dim {
            for j in (i + 2)..=self.dim {
                for d in 0..self.size {
                    let e = ops[j][ops[i][d]];
                    if ops[j][ops[i][e]] != d {
                        return Err(SymbolError::NonCommutingOps { i, j, chamber: d });
                    }
                }
            }
        }

        let orbits: Vec<OrbitTable> = (0..self.dim)
            .map(|i| OrbitTable::compute(&ops, i, i + 1))
            .collect();
        let mut values: Vec<Vec<Option<u32>>> =
            orbits.iter().map(|table| vec![None; table.len()]).collect();

        for &(i, d, branching) in &self.branching {
            let k = orbits[i].orbit_of(d);
            let v = match branching {
                Branching::V(v) => v,
                Branching::M(m) => {
                    let r = orbits[i].r(k);
                    if m % r != 0 {
                        return Err(SymbolError::IndivisibleDegree { index: i, chamber: d, m, r });
                    }
                    m / r
                }
            };
            values[i][k] = Some(v);
        }

        Ok(DSymbol {
            dim: self.dim,
            ops,
            orbits,
            values,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_chamber() -> DSymbol {
        // op 0 swaps the chambers, every other op fixes them
        DSymbolBuilder::from_ops(3, vec![vec![1, 0], vec![0, 1], vec![0, 1], vec![0, 1]])
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn test_orbit_queries() {
        let ds = two_chamber();
        assert_eq!(ds.size(), 2);
        assert_eq!(ds.orbit_count(0), 1);
        assert_eq!(ds.orbit_count(1), 2);
        assert_eq!(ds.orbit_count(2), 2);
        assert_eq!(ds.r(0, 1), 2);
        assert_eq!(ds.r(1, 1), 1);
        assert_eq!(ds.orbit_rep(0, 1), 0);
        assert_eq!(ds.orbit_reps(1).collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn test_define_and_undefine() {
        let mut ds = two_chamber();
        assert!(!ds.defines_v(0, 1));
        ds.define_v(0, 1, 2);
        assert_eq!(ds.v(0, 0), Some(2));
        assert_eq!(ds.face_degree(0), Some(4));
        ds.undefine_v(0, 0);
        assert_eq!(ds.m(0, 1), None);
    }

    #[test]
    fn test_completeness_and_sequence() {
        let mut ds = two_chamber();
        assert!(!ds.is_complete());
        ds.define_v(0, 0, 2);
        ds.define_v(1, 0, 2);
        ds.define_v(1, 1, 3);
        ds.define_v(2, 0, 4);
        ds.define_v(2, 1, 4);
        assert!(ds.is_complete());
        assert_eq!(
            ds.value_sequence(),
            vec![Some(2), Some(2), Some(4), Some(2), Some(3), Some(4)]
        );
        assert_eq!(ds.edge_degree(1), Some(4));
    }

    #[test]
    fn test_display_uses_one_based_notation() {
        let mut ds = two_chamber();
        ds.define_v(0, 0, 2);
        assert_eq!(ds.to_string(), "<1.1:2 3:2,1 2,1 2,1 2:4,0 0,0 0>");
    }

    #[test]
    fn test_renumbered_moves_values() {
        let mut ds = two_chamber();
        ds.define_v(1, 0, 3);
        let swapped = ds.renumbered(&[1, 0]);
        assert_eq!(swapped.v(1, 1), Some(3));
        assert_eq!(swapped.v(1, 0), None);
        assert_eq!(swapped.op(0, 0), 1);
    }

    #[test]
    fn test_builder_rejects_missing_neighbor() {
        let mut builder = DSymbolBuilder::new(2, 2);
        builder.glue(0, 0, 1).unwrap();
        builder.glue(1, 0, 0).unwrap();
        builder.glue(1, 1, 1).unwrap();
        builder.glue(2, 0, 0).unwrap();
        assert_eq!(
            builder.build(),
            Err(SymbolError::UndefinedNeighbor { index: 2, chamber: 1 })
        );
    }

    #[test]
    fn test_builder_rejects_non_commuting_ops() {
        // op 0 = (0 1), op 2 = (1 2): (op0 op2) has order 3
        let result = DSymbolBuilder::from_ops(2, vec![vec![1, 0, 2], vec![0, 1, 2], vec![0, 2, 1]])
            .unwrap()
            .build();
        assert!(matches!(result, Err(SymbolError::NonCommutingOps { i: 0, j: 2, .. })));
    }

    #[test]
    fn test_builder_rejects_indivisible_m() {
        let mut builder =
            DSymbolBuilder::from_ops(3, vec![vec![1, 0], vec![0, 1], vec![0, 1], vec![0, 1]]).unwrap();
        builder.set_m(0, 0, 3).unwrap();
        assert_eq!(
            builder.build(),
            Err(SymbolError::IndivisibleDegree { index: 0, chamber: 0, m: 3, r: 2 })
        );
    }

    #[test]
    fn test_disconnected_symbol() {
        let ds = DSymbolBuilder::from_ops(2, vec![vec![0, 1], vec![0, 1], vec![0, 1]])
            .unwrap()
            .build()
            .unwrap();
        assert!(!ds.is_connected());
    }
}
