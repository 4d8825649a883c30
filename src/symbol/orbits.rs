// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Orbits of two-generator sub-symbols.

use super::Chamber;

/// The orbits of one index pair, computed once from the (fixed) ops.
///
/// Orbits are numbered in order of their smallest chamber, which is also the
/// orbit representative. That numbering matches the (chamber, index) scan order
/// used by the search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrbitTable {
    orbit_of: Vec<usize>,
    reps: Vec<Chamber>,
    r: Vec<u32>,
}

impl OrbitTable {
    pub(crate) fn compute(ops: &[Vec<Chamber>], i: usize, j: usize) -> Self {
        let size = ops[i].len();
        let mut orbit_of = vec![usize::MAX; size];
        let mut reps = Vec::new();
        let mut r = Vec::new();

        for start in 0..size {
            if orbit_of[start] != usize::MAX {
                continue;
            }
            let orbit = walk_orbit(ops, i, j, start);
            let id = reps.len();
            for &d in &orbit.members {
                orbit_of[d] = id;
            }
            reps.push(start);
            r.push(orbit.r());
        }

        Self { orbit_of, reps, r }
    }

    /// Orbit number of chamber `d`.
    pub fn orbit_of(&self, d: Chamber) -> usize {
        self.orbit_of[d]
    }

    /// Representative (smallest chamber) of orbit `k`.
    pub fn rep(&self, k: usize) -> Chamber {
        self.reps[k]
    }

    pub fn reps(&self) -> &[Chamber] {
        &self.reps
    }

    /// The r-value of orbit `k`.
    pub fn r(&self, k: usize) -> u32 {
        self.r[k]
    }

    pub fn len(&self) -> usize {
        self.reps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reps.is_empty()
    }
}

/// One orbit of the pair `(i, j)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Orbit {
    /// Members in discovery order, starting with the chamber the walk began at.
    pub members: Vec<Chamber>,
    /// True if some member is fixed by `op_i` or `op_j`.
    pub is_chain: bool,
}

impl Orbit {
    /// Steps of `op_i op_j` needed to return to a chamber.
    pub fn r(&self) -> u32 {
        let n = self.members.len() as u32;
        if self.is_chain {
            n
        } else {
            n / 2
        }
    }
}

/// Collect the `(i, j)`-orbit through `start`.
pub fn walk_orbit(ops: &[Vec<Chamber>], i: usize, j: usize, start: Chamber) -> Orbit {
    let mut members = vec![start];
    let mut is_chain = false;
    let mut k = 0;
    while k < members.len() {
        let d = members[k];
        for &idx in &[i, j] {
            let e = ops[idx][d];
            if e == d {
                is_chain = true;
            } else if !members.contains(&e) {
                members.push(e);
            }
        }
        k += 1;
    }
    Orbit { members, is_chain }
}
