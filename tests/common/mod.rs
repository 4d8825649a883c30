// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use dsym_branching::{DSymbol, DSymbolBuilder};
use std::collections::BTreeSet;

/// Install a `fmt` subscriber writing through the test harness.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// A symbol with `size` chambers and the given op tables.
pub fn from_ops(dim: usize, ops: Vec<Vec<usize>>) -> DSymbol {
    DSymbolBuilder::from_ops(dim, ops)
        .expect("ops fit the symbol")
        .build()
        .expect("valid symbol")
}

/// One chamber fixed by every op.
pub fn single_chamber(dim: usize) -> DSymbol {
    from_ops(dim, vec![vec![0]; dim + 1])
}

/// Two chambers swapped by op 0 and fixed by every other op.
pub fn two_chamber_3d() -> DSymbol {
    from_ops(3, vec![vec![1, 0], vec![0, 1], vec![0, 1], vec![0, 1]])
}

/// A square face: four chambers in a chain along ops 0 and 1, op 2 trivial,
/// with the face degree preset to 4.
pub fn square_face_2d() -> DSymbol {
    let mut builder = DSymbolBuilder::from_ops(
        2,
        vec![vec![1, 0, 3, 2], vec![0, 2, 1, 3], vec![0, 1, 2, 3]],
    )
    .expect("ops fit the symbol");
    builder.set_m(0, 0, 4).expect("index in range");
    builder.build().expect("valid symbol")
}

/// Canonical forms of `solutions`, as text.
pub fn canonical_forms(solutions: &[DSymbol]) -> BTreeSet<String> {
    solutions.iter().map(|ds| ds.canonical().to_string()).collect()
}

/// Every way of filling the undefined orbits of `ds` with `values`.
pub fn all_completions(ds: &DSymbol, values: &[u32]) -> Vec<DSymbol> {
    let mut open = Vec::new();
    for i in 0..ds.dim() {
        for d in ds.orbit_reps(i) {
            if !ds.defines_v(i, d) {
                open.push((i, d));
            }
        }
    }
    let mut out = Vec::new();
    let mut current = ds.clone();
    fill(&mut current, &open, values, &mut out);
    out
}

fn fill(ds: &mut DSymbol, open: &[(usize, usize)], values: &[u32], out: &mut Vec<DSymbol>) {
    match open.split_first() {
        None => out.push(ds.clone()),
        Some((&(i, d), rest)) => {
            for &v in values {
                ds.define_v(i, d, v);
                fill(ds, rest, values, out);
            }
            ds.undefine_v(i, d);
        }
    }
}

/// Every involution of `0..size`, as a permutation table.
pub fn involutions(size: usize) -> Vec<Vec<usize>> {
    fn extend(table: &mut Vec<Option<usize>>, out: &mut Vec<Vec<usize>>) {
        let Some(d) = table.iter().position(Option::is_none) else {
            out.push(table.iter().flatten().copied().collect());
            return;
        };
        for e in d..table.len() {
            if table[e].is_none() {
                table[d] = Some(e);
                table[e] = Some(d);
                extend(table, out);
                table[d] = None;
                table[e] = None;
            }
        }
    }
    let mut out = Vec::new();
    extend(&mut vec![None; size], &mut out);
    out
}

/// Every connected 3-dimensional symbol with `size` chambers, one per op
/// table (isomorphic symbols are repeated).
pub fn connected_symbols_3d(size: usize) -> Vec<DSymbol> {
    let tables = involutions(size);
    let mut out = Vec::new();
    for a in &tables {
        for b in &tables {
            for c in &tables {
                for d in &tables {
                    let ops = vec![a.clone(), b.clone(), c.clone(), d.clone()];
                    let built = DSymbolBuilder::from_ops(3, ops).and_then(|builder| builder.build());
                    if let Ok(ds) = built {
                        if ds.is_connected() {
                            out.push(ds);
                        }
                    }
                }
            }
        }
    }
    out
}

/// Number of undefined orbits of `ds`.
pub fn open_orbits(ds: &DSymbol) -> usize {
    (0..ds.dim())
        .map(|i| ds.orbit_reps(i).filter(|&d| !ds.defines_v(i, d)).count())
        .sum()
}
