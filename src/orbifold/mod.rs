// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Local 2-dimensional analysis of 3-dimensional symbols.
//!
//! Every sub-symbol on three of the four indices describes the neighborhood of
//! a cell center (tile, face, edge or vertex). A 3-dimensional symbol is
//! locally euclidean when all of them are spherical 2-orbifolds.
//!
//! A [`LocalPiece`] is one connected sub-symbol, reduced to what the orbifold
//! classification needs:
//! - the underlying surface, read off the Euler characteristic computed with
//!   all branching numbers set to 1 (the topology does not depend on them)
//! - one entry per two-index orbit: cone (cycle orbit) or corner (chain orbit),
//!   with its order if known
//!
//! # Spherical orbifolds
//!
//! | surface          | admissible orbifolds                                    |
//! |------------------|---------------------------------------------------------|
//! | sphere           | `()`, `(n,n)`, `(2,2,n)`, `(2,3,3)`, `(2,3,4)`, `(2,3,5)` |
//! | disk             | `*`, `*nn`, `*22n`, `*233`, `*234`, `*235`, `n*`, `2*n`, `3*2` |
//! | projective plane | `x`, `nx`                                               |
//!
//! Orders equal to 1 are not orbifold points and are dropped before lookup.

pub mod curvature;

pub use curvature::{curvature_2d, Curvature};

use crate::symbol::{Chamber, DSymbol};
use std::collections::BTreeSet;

/// Underlying surface of a local piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Sphere,
    Disk,
    ProjectivePlane,
    /// Euler characteristic 0 or less; never spherical.
    NonPositive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointKind {
    Cone,
    Corner,
}

/// One two-index orbit of a local piece.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalOrbit {
    pub kind: PointKind,
    pub r: u32,
    /// Branching number; always known for non-adjacent index pairs (`2 / r`).
    pub value: Option<u32>,
    /// `(index, representative)` of the branching number in the enclosing
    /// symbol, for orbits of adjacent index pairs.
    pub slot: Option<(usize, Chamber)>,
}

/// A branching number that every spherical completion of a piece agrees on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForcedValue {
    pub index: usize,
    pub element: Chamber,
    pub value: u32,
}

/// Outcome of [`LocalPiece::analyze`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// No assignment of candidate values makes the piece spherical.
    Impossible,
    /// Spherical completions exist; the listed values are forced.
    Possible(Vec<ForcedValue>),
}

/// A connected sub-symbol on three indices.
#[derive(Debug, Clone)]
pub struct LocalPiece {
    pub indices: [usize; 3],
    pub chambers: Vec<Chamber>,
    pub surface: Surface,
    pub orbits: Vec<LocalOrbit>,
}

impl LocalPiece {
    /// The component of `root` under the ops in `indices`.
    pub fn extract(ds: &DSymbol, indices: [usize; 3], root: Chamber) -> Self {
        let mut indices = indices;
        indices.sort_unstable();
        let [a, b, c] = indices;

        let mut chambers = vec![root];
        let mut k = 0;
        while k < chambers.len() {
            let d = chambers[k];
            for &i in &indices {
                let e = ds.op(i, d);
                if !chambers.contains(&e) {
                    chambers.push(e);
                }
            }
            k += 1;
        }

        let boundary = chambers
            .iter()
            .any(|&d| indices.iter().any(|&i| ds.op(i, d) == d));

        let mut twice_euler = -(chambers.len() as i64);
        let mut orbits = Vec::new();
        for &(i, j) in &[(a, b), (a, c), (b, c)] {
            let mut seen: Vec<Chamber> = Vec::with_capacity(chambers.len());
            for &d in &chambers {
                if seen.contains(&d) {
                    continue;
                }
                let orbit = ds.orbit(i, j, d);
                seen.extend_from_slice(&orbit.members);
                twice_euler += if orbit.is_chain { 1 } else { 2 };

                let r = orbit.r();
                let (value, slot) = if j == i + 1 {
                    let rep = ds.orbit_rep(i, d);
                    (ds.v(i, rep), Some((i, rep)))
                } else {
                    (Some(2 / r), None)
                };
                orbits.push(LocalOrbit {
                    kind: if orbit.is_chain {
                        PointKind::Corner
                    } else {
                        PointKind::Cone
                    },
                    r,
                    value,
                    slot,
                });
            }
        }

        let surface = match (twice_euler, boundary) {
            (4, false) => Surface::Sphere,
            (2, true) => Surface::Disk,
            (2, false) => Surface::ProjectivePlane,
            _ => Surface::NonPositive,
        };

        Self {
            indices,
            chambers,
            surface,
            orbits,
        }
    }

    /// Decide whether the piece can still become spherical when undefined
    /// branching numbers are drawn from `candidates` (1 is always allowed),
    /// and which values every spherical completion shares.
    ///
    /// Undefined orbits of the same kind are interchangeable as far as the
    /// orbifold is concerned, so completions are enumerated as multisets of
    /// non-trivial orders, at most three points in total.
    pub fn analyze(&self, candidates: &[u32]) -> Verdict {
        let mut cones = Vec::new();
        let mut corners = Vec::new();
        let mut open_cones = Vec::new();
        let mut open_corners = Vec::new();
        for orbit in &self.orbits {
            match (orbit.value, orbit.kind, orbit.slot) {
                (Some(v), PointKind::Cone, _) if v > 1 => cones.push(v),
                (Some(v), PointKind::Corner, _) if v > 1 => corners.push(v),
                (Some(_), _, _) => {}
                (None, PointKind::Cone, Some(slot)) => open_cones.push(slot),
                (None, PointKind::Corner, Some(slot)) => open_corners.push(slot),
                (None, _, None) => unreachable!("fixed orbits always carry a value"),
            }
        }

        let mut values: Vec<u32> = candidates.iter().copied().filter(|&v| v > 1).collect();
        values.sort_unstable();
        values.dedup();

        let budget = 3usize.saturating_sub(cones.len() + corners.len());
        let mut cone_options = BTreeSet::new();
        let mut corner_options = BTreeSet::new();
        let mut feasible = false;

        for extra_cones in multisets(&values, budget.min(open_cones.len())) {
            let room = (budget - extra_cones.len()).min(open_corners.len());
            for extra_corners in multisets(&values, room) {
                let mut all_cones = cones.clone();
                all_cones.extend_from_slice(&extra_cones);
                let mut all_corners = corners.clone();
                all_corners.extend_from_slice(&extra_corners);
                if !is_spherical(self.surface, &all_cones, &all_corners) {
                    continue;
                }
                feasible = true;
                if extra_cones.len() < open_cones.len() {
                    cone_options.insert(1);
                }
                cone_options.extend(extra_cones.iter().copied());
                if extra_corners.len() < open_corners.len() {
                    corner_options.insert(1);
                }
                corner_options.extend(extra_corners.iter().copied());
            }
        }

        if !feasible {
            return Verdict::Impossible;
        }

        let mut forced = Vec::new();
        for (open, options) in [(&open_cones, &cone_options), (&open_corners, &corner_options)] {
            if open.is_empty() || options.len() != 1 {
                continue;
            }
            if let Some(&value) = options.iter().next() {
                forced.extend(open.iter().map(|&(index, element)| ForcedValue {
                    index,
                    element,
                    value,
                }));
            }
        }
        Verdict::Possible(forced)
    }

    /// True if every orbit is defined and the piece is spherical.
    pub fn is_spherical(&self) -> bool {
        self.orbits.iter().all(|orbit| orbit.value.is_some())
            && self.analyze(&[]) != Verdict::Impossible
    }
}

/// All multisets of size `0..=max_len` drawn from sorted `values`.
fn multisets(values: &[u32], max_len: usize) -> Vec<Vec<u32>> {
    fn extend(values: &[u32], from: usize, max_len: usize, current: &mut Vec<u32>, out: &mut Vec<Vec<u32>>) {
        out.push(current.clone());
        if current.len() == max_len {
            return;
        }
        for k in from..values.len() {
            current.push(values[k]);
            extend(values, k, max_len, current, out);
            current.pop();
        }
    }
    let mut out = Vec::new();
    extend(values, 0, max_len, &mut Vec::new(), &mut out);
    out
}

fn spherical_points(orders: &[u32]) -> bool {
    match orders {
        [] => true,
        [_] => false,
        [a, b] => a == b,
        [a, b, c] => *c == 2 && (*b == 2 || (*b == 3 && *a <= 5)),
        _ => false,
    }
}

/// Look up cone and corner orders (all `>= 2`) in the spherical table.
pub fn is_spherical(surface: Surface, cones: &[u32], corners: &[u32]) -> bool {
    let mut cones = cones.to_vec();
    cones.sort_unstable_by(|a, b| b.cmp(a));
    let mut corners = corners.to_vec();
    corners.sort_unstable_by(|a, b| b.cmp(a));

    match surface {
        Surface::Sphere => corners.is_empty() && spherical_points(&cones),
        Surface::Disk => match cones.as_slice() {
            [] => spherical_points(&corners),
            [c] => match corners.as_slice() {
                [] => true,
                [k] => *c == 2 || (*c == 3 && *k == 2),
                _ => false,
            },
            _ => false,
        },
        Surface::ProjectivePlane => corners.is_empty() && cones.len() <= 1,
        Surface::NonPositive => false,
    }
}

/// Every connected sub-symbol on `indices`, one per component.
pub fn local_pieces(ds: &DSymbol, indices: [usize; 3]) -> Vec<LocalPiece> {
    let mut covered = vec![false; ds.size()];
    let mut pieces = Vec::new();
    for d in 0..ds.size() {
        if covered[d] {
            continue;
        }
        let piece = LocalPiece::extract(ds, indices, d);
        for &e in &piece.chambers {
            covered[e] = true;
        }
        pieces.push(piece);
    }
    pieces
}

/// The four index triples of a 3-dimensional symbol.
pub const TRIPLES_3D: [[usize; 3]; 4] = [[1, 2, 3], [0, 2, 3], [0, 1, 3], [0, 1, 2]];

/// Necessary condition for a 3-dimensional symbol to have a locally euclidean
/// completion: every local piece must still be able to become spherical.
///
/// Undefined branching numbers may take any positive value here. Returns
/// false for symbols that are not 3-dimensional.
pub fn may_become_locally_euclidean_3d(ds: &DSymbol) -> bool {
    if ds.dim() != 3 {
        return false;
    }
    TRIPLES_3D.iter().all(|&indices| {
        local_pieces(ds, indices).iter().all(|piece| {
            let mut candidates: Vec<u32> = vec![2, 3, 4, 5];
            candidates.extend(piece.orbits.iter().filter_map(|orbit| orbit.value));
            piece.analyze(&candidates) != Verdict::Impossible
        })
    })
}

/// True if the symbol is complete and every local piece is spherical.
pub fn is_locally_euclidean_3d(ds: &DSymbol) -> bool {
    ds.dim() == 3 && ds.is_complete() && may_become_locally_euclidean_3d(ds)
}
