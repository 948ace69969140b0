// Copyright 2020 Xavier Gillard
//
// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! This module turns the closed walks produced by the path searches into
//! proper odd cycles.
//!
//! A walk is inserted node by node into a doubly linked list (the `succ` and
//! `prev` arrays indexed by polarity node). Whenever a node `x` is met while
//! its negation `not x` is already part of the cycle, both are spliced out:
//! `x` and `not x` cannot both be false, so the neighbors of `not x` conflict
//! (by implication) with the neighbors of `x`. That keeps the cycle closed and
//! its length odd. Walks that cannot be repaired are rejected.

use crate::{negation, variable_of, Rejection};

/// A cleaned odd cycle. Consecutive nodes (cyclically) conflict with one
/// another, no node occurs twice and no variable occurs with both polarities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle {
    pub nodes: Vec<usize>,
}
impl Cycle {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
    /// The node the cycle is anchored at
    pub fn start(&self) -> usize {
        self.nodes[0]
    }
}

/// Reusable buffers to clean the walks found during one separation call.
#[derive(Debug, Clone)]
pub struct CycleBuilder {
    nb_vars: usize,
    repair: bool,
    allow_covered: bool,
    succ: Vec<usize>,
    prev: Vec<usize>,
    in_cycle: Vec<bool>,
    chain: Vec<usize>,
}

impl CycleBuilder {
    /// `repair` tells whether literal/negation pairs are spliced out (rather
    /// than rejected). `allow_covered` tells whether the variables covered by
    /// an earlier cut may occur in the cycle.
    pub fn new(nb_vars: usize, repair: bool, allow_covered: bool) -> Self {
        let nb_nodes = 2 * nb_vars;
        Self {
            nb_vars,
            repair,
            allow_covered,
            succ: vec![0; nb_nodes],
            prev: vec![0; nb_nodes],
            in_cycle: vec![false; nb_nodes],
            chain: vec![],
        }
    }

    /// Cleans the closed walk `walk` (whose last node conflicts with its
    /// first one). `covered[v]` tells whether the variable `v` already occurs
    /// in a cut of this round.
    pub fn clean_cycle(&mut self, walk: &[usize], covered: &[bool]) -> Result<Cycle, Rejection> {
        let result = self.splice(walk, covered);
        for &x in walk {
            self.in_cycle[x] = false;
        }
        result
    }

    fn splice(&mut self, walk: &[usize], covered: &[bool]) -> Result<Cycle, Rejection> {
        let Some(&start) = walk.first() else {
            return Err(Rejection::SubCycle);
        };
        let mut tail = start;
        let mut len = 0;
        for &x in walk {
            tail = self.insert(x, tail, start, covered, &mut len)?;
        }
        self.succ[tail] = start;
        self.prev[start] = tail;

        let mut nodes = Vec::with_capacity(len);
        let mut node = start;
        for _ in 0..len {
            nodes.push(node);
            node = self.succ[node];
        }
        debug_assert_eq!(start, node, "the cycle does not close");
        debug_assert!(walk.len() % 2 == 0 || len % 2 == 1, "an odd walk must yield an odd cycle");
        Ok(Cycle { nodes })
    }

    /// Appends `x` after `tail` (the last node of the open chain built so
    /// far), splicing out `x` and its negation when they collide. Returns the
    /// new last node of the chain.
    ///
    /// Nothing is linked before the collision is known: the successor of `x`
    /// in the walk is simply appended after whatever ends the chain.
    fn insert(&mut self, x: usize, tail: usize, start: usize, covered: &[bool], len: &mut usize) -> Result<usize, Rejection> {
        if !self.allow_covered && covered[variable_of(x, self.nb_vars).id()] {
            return Err(Rejection::Covered);
        }
        if self.in_cycle[x] {
            return Err(Rejection::SubCycle);
        }
        let nx = negation(x, self.nb_vars);
        if nx == start {
            return Err(Rejection::NegatedStart);
        }
        if !self.in_cycle[nx] {
            if *len > 0 {
                self.succ[tail] = x;
                self.prev[x] = tail;
            }
            self.in_cycle[x] = true;
            *len += 1;
            return Ok(x);
        }
        if !self.repair {
            return Err(Rejection::NegationPair);
        }

        // nx is neither the start nor unlinked: its predecessor is valid
        let a = self.prev[nx];
        let new_tail = if nx == tail {
            // a -> not x -> x   becomes   a
            a
        } else {
            // a -> not x -> c1 -> ... -> cn -> x   becomes   a -> cn -> ... -> c1
            self.chain.clear();
            let mut c = self.succ[nx];
            loop {
                self.chain.push(c);
                if c == tail {
                    break;
                }
                c = self.succ[c];
                debug_assert!(self.chain.len() <= self.succ.len(), "the chain does not reach the tail");
            }
            let mut p = a;
            for &c in self.chain.iter().rev() {
                self.succ[p] = c;
                self.prev[c] = p;
                p = c;
            }
            p
        };
        self.in_cycle[nx] = false;
        *len -= 1;
        Ok(new_tail)
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################


#[cfg(test)]
mod test_cycle_properties {
    use proptest::prelude::*;

    use crate::*;

    const N: usize = 4;

    fn odd_walk() -> impl Strategy<Value = Vec<usize>> {
        (1_usize..=4).prop_flat_map(|half| prop::collection::vec(0..2 * N, 2 * half + 1))
    }
    fn is_true(node: usize, assignment: usize) -> bool {
        let value = (assignment >> (node % N)) & 1 == 1;
        if node < N { value } else { !value }
    }
    /// Tells whether `u` and `v` cannot both be true in any 0/1 assignment
    /// where no two consecutive nodes of the closed walk are both true.
    fn implied_conflict(walk: &[usize], u: usize, v: usize) -> bool {
        let k = walk.len();
        (0..1_usize << N)
            .filter(|&a| (0..k).all(|i| !(is_true(walk[i], a) && is_true(walk[(i + 1) % k], a))))
            .all(|a| !(is_true(u, a) && is_true(v, a)))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(4096))]

        #[test]
        fn cleaning_yields_an_odd_cycle_without_duplicate_variable(walk in odd_walk()) {
            let mut builder = CycleBuilder::new(N, true, true);
            if let Ok(cycle) = builder.clean_cycle(&walk, &[false; N]) {
                prop_assert_eq!(1, cycle.len() % 2);
                prop_assert!(cycle.len() <= walk.len());
                prop_assert_eq!(walk[0], cycle.start());
                let mut vars: Vec<usize> = cycle.nodes.iter().map(|v| v % N).collect();
                vars.sort_unstable();
                vars.dedup();
                prop_assert_eq!(cycle.len(), vars.len());
            }
        }
        #[test]
        fn consecutive_nodes_of_a_cleaned_cycle_conflict(walk in odd_walk()) {
            let mut builder = CycleBuilder::new(N, true, true);
            if let Ok(cycle) = builder.clean_cycle(&walk, &[false; N]) {
                let k = cycle.len();
                for i in 0..k {
                    let (u, v) = (cycle.nodes[i], cycle.nodes[(i + 1) % k]);
                    prop_assert!(implied_conflict(&walk, u, v), "{:?} gives {:?}", walk, cycle.nodes);
                }
            }
        }
        #[test]
        fn cleaning_a_clean_cycle_changes_nothing(walk in odd_walk()) {
            let mut builder = CycleBuilder::new(N, true, true);
            if let Ok(cycle) = builder.clean_cycle(&walk, &[false; N]) {
                let again = builder.clean_cycle(&cycle.nodes, &[false; N]);
                prop_assert_eq!(Ok(cycle), again);
            }
        }
    }
}
