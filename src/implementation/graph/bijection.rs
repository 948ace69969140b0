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

//! This module defines the `BijectionGraph` used by the classical method.
//!
//! Each polarity node `p` of the conflict graph has two copies: `p` in the
//! first partition and `p + 2n` in the second one. Every conflict between `p`
//! and `q` gives the arcs `p -> q + 2n` and `p + 2n -> q`, so that each path
//! from `p` to `p + 2n` alternates between both partitions and has an odd
//! number of arcs. Projected back onto the conflict graph, such a path is an
//! odd closed walk through `p`.

use fxhash::FxHashSet;

use crate::{negation, Abort, Arc, ConflictGraph, FractionalPoint, GrowableBuffer, Host, MemoryBudget, SeparatorConfig};

#[derive(Debug, Clone)]
pub struct BijectionGraph {
    nb_vars: usize,
    /// The span of the arcs of each of the `4n` nodes
    span: Vec<(usize, usize)>,
    arcs: GrowableBuffer<Arc>,
}

impl BijectionGraph {
    /// Builds the bijection graph of all fractional nodes
    pub fn build<H: Host>(
        host: &H,
        point: &FractionalPoint,
        config: &SeparatorConfig,
        budget: &mut MemoryBudget) -> Result<Self, Abort>
    {
        let n = point.nb_vars();
        let half = 2 * n;
        budget.reserve_array::<(usize, usize)>(2 * half)?;

        let mut span = vec![(0, 0); 2 * half];
        let mut arcs = GrowableBuffer::new(budget)?;
        let mut seen = FxHashSet::default();
        let mut conflicts = vec![];

        for p in 0..half {
            if host.must_stop() {
                return Err(Abort::StopRequested);
            }
            if !point.is_fractional(p) {
                continue;
            }
            let start = arcs.len();
            conflicts.clear();
            point.for_each_conflict(host, p, &mut seen, &mut |v, w| conflicts.push((v, w)));
            for (v, weight) in conflicts.iter().copied() {
                arcs.push(Arc { target: v + half, weight }, budget)?;
            }
            if config.self_arcs && arcs.len() > start {
                arcs.push(Arc { target: negation(p, n) + half, weight: 0 }, budget)?;
            }
            span[p] = (start, arcs.len());
        }
        // mirror every arc of the first partition in the second one
        for p in 0..half {
            let (b, e) = span[p];
            let start = arcs.len();
            for i in b..e {
                let arc = arcs[i];
                arcs.push(Arc { target: arc.target - half, weight: arc.weight }, budget)?;
            }
            span[p + half] = (start, arcs.len());
        }

        Ok(Self { nb_vars: n, span, arcs })
    }
    /// Number of nodes in both partitions
    pub fn nb_copies(&self) -> usize {
        4 * self.nb_vars
    }
    /// The copy of `node` in the second partition
    pub fn twin(&self, node: usize) -> usize {
        node + 2 * self.nb_vars
    }
    /// The node of the conflict graph `node` is a copy of
    pub fn project(&self, node: usize) -> usize {
        node % (2 * self.nb_vars)
    }
    pub fn arcs(&self, node: usize) -> &[Arc] {
        let (b, e) = self.span[node];
        &self.arcs[b..e]
    }
}

impl ConflictGraph for BijectionGraph {
    fn nb_nodes(&self) -> usize {
        2 * self.nb_vars
    }
    fn is_adjacent(&self, a: usize, b: usize) -> bool {
        let (ta, tb) = (self.twin(a), self.twin(b));
        self.arcs(a).iter().any(|arc| arc.target == tb)
            || self.arcs(b).iter().any(|arc| arc.target == ta)
    }
    fn for_each_neighbor(&self, a: usize, f: &mut dyn FnMut(usize)) {
        for arc in self.arcs(a) {
            f(self.project(arc.target));
        }
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
