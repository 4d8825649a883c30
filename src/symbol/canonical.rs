// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Canonical numbering and automorphisms.
//!
//! Both are derived from the same breadth-first traversal. Starting at a
//! chamber, neighbors are numbered in order of discovery (chamber by chamber,
//! index by index). The traversal code lists the renumbered op tables followed
//! by the branching numbers in the new order. Two starts with equal codes are
//! related by exactly one automorphism; the start with the smallest code gives
//! the canonical numbering.
//!
//! Both operations assume a connected symbol. A disconnected symbol is returned
//! unchanged by [`DSymbol::canonical`] and only has the identity as automorphism.

use super::{Chamber, DSymbol};

/// Chambers in the order a traversal from `start` numbers them.
fn traversal(ds: &DSymbol, start: Chamber) -> (Vec<Chamber>, Vec<usize>) {
    let size = ds.size();
    let mut order = Vec::with_capacity(size);
    let mut number = vec![usize::MAX; size];
    order.push(start);
    number[start] = 0;

    let mut k = 0;
    while k < order.len() {
        let d = order[k];
        for i in 0..=ds.dim() {
            let e = ds.op(i, d);
            if number[e] == usize::MAX {
                number[e] = order.len();
                order.push(e);
            }
        }
        k += 1;
    }
    (order, number)
}

fn traversal_code(ds: &DSymbol, order: &[Chamber], number: &[usize]) -> Vec<usize> {
    let mut code = Vec::with_capacity(order.len() * (2 * ds.dim() + 1));
    for &d in order {
        for i in 0..=ds.dim() {
            code.push(number[ds.op(i, d)]);
        }
    }
    for &d in order {
        for i in 0..ds.dim() {
            code.push(ds.v(i, d).map_or(0, |v| v as usize));
        }
    }
    code
}

impl DSymbol {
    /// The symbol renumbered so that its traversal code is minimal.
    ///
    /// Isomorphic symbols (including equal preset branching numbers) have equal
    /// canonical forms.
    pub fn canonical(&self) -> DSymbol {
        if !self.is_connected() {
            return self.clone();
        }
        let mut best: Option<(Vec<usize>, Vec<usize>)> = None;
        for start in 0..self.size() {
            let (order, number) = traversal(self, start);
            let code = traversal_code(self, &order, &number);
            let better = match &best {
                None => true,
                Some((best_code, _)) => code < *best_code,
            };
            if better {
                best = Some((code, number));
            }
        }
        match best {
            Some((_, number)) => self.renumbered(&number),
            None => self.clone(),
        }
    }

    /// All automorphisms as permutation arrays, the identity first.
    ///
    /// An automorphism commutes with every op and maps each defined branching
    /// number onto an equal one (undefined onto undefined).
    pub fn automorphisms(&self) -> Vec<Vec<Chamber>> {
        let size = self.size();
        let identity: Vec<Chamber> = (0..size).collect();
        if !self.is_connected() {
            return vec![identity];
        }

        let (base_order, base_number) = traversal(self, 0);
        let base_code = traversal_code(self, &base_order, &base_number);

        let mut result = vec![identity];
        for start in 1..size {
            let (order, number) = traversal(self, start);
            if traversal_code(self, &order, &number) != base_code {
                continue;
            }
            let mut map = vec![0; size];
            for (k, &d) in base_order.iter().enumerate() {
                map[d] = order[k];
            }
            result.push(map);
        }
        result
    }
}
