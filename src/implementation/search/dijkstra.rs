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

//! This module implements the shortest path search of the classical method:
//! a Dijkstra search in the bijection graph from a node to its twin.

use std::cmp::Ordering;

use binary_heap_plus::BinaryHeap;
use compare::Compare;

use crate::{Abort, BijectionGraph, MemoryBudget};

/// A tentative distance pushed on the heap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Label {
    node: usize,
    distance: u64,
    /// Insertion order, used to break ties
    seq: usize,
}

/// Orders the labels so that the heap pops the closest node first, and the
/// earliest inserted one among equally close nodes.
#[derive(Debug, Default, Clone, Copy)]
struct ClosestFirst;
impl Compare<Label> for ClosestFirst {
    fn compare(&self, l: &Label, r: &Label) -> Ordering {
        r.distance.cmp(&l.distance).then_with(|| r.seq.cmp(&l.seq))
    }
}

/// The buffers of the Dijkstra searches of one separation call
pub struct Dijkstra {
    distance: Vec<u64>,
    pred: Vec<Option<usize>>,
    settled: Vec<bool>,
    heap: BinaryHeap<Label, ClosestFirst>,
}

impl Dijkstra {
    pub fn new(nb_nodes: usize, budget: &mut MemoryBudget) -> Result<Self, Abort> {
        budget.reserve_array::<u64>(nb_nodes)?;
        budget.reserve_array::<Option<usize>>(nb_nodes)?;
        budget.reserve_array::<bool>(nb_nodes)?;
        Ok(Self {
            distance: vec![u64::MAX; nb_nodes],
            pred: vec![None; nb_nodes],
            settled: vec![false; nb_nodes],
            heap: BinaryHeap::from_vec_cmp(vec![], ClosestFirst),
        })
    }

    /// Computes the shortest path from `source` to `target`. Returns its
    /// length, or None when `target` cannot be reached. The search stops as
    /// soon as `target` is settled.
    pub fn shortest_path(&mut self, graph: &BijectionGraph, source: usize, target: usize) -> Option<u64> {
        self.distance.iter_mut().for_each(|d| *d = u64::MAX);
        self.pred.iter_mut().for_each(|p| *p = None);
        self.settled.iter_mut().for_each(|s| *s = false);
        self.heap.clear();

        let mut seq = 0;
        self.distance[source] = 0;
        self.heap.push(Label { node: source, distance: 0, seq });

        while let Some(Label { node, distance, .. }) = self.heap.pop() {
            if self.settled[node] {
                continue;
            }
            self.settled[node] = true;
            if node == target {
                return Some(distance);
            }
            for arc in graph.arcs(node) {
                let v = arc.target;
                if self.settled[v] {
                    continue;
                }
                let dv = distance.saturating_add(arc.weight);
                if dv < self.distance[v] {
                    seq += 1;
                    self.distance[v] = dv;
                    self.pred[v] = Some(node);
                    self.heap.push(Label { node: v, distance: dv, seq });
                }
            }
        }
        None
    }

    /// Searches a minimum weight odd closed walk through `start`. The walk is
    /// returned as the sequence of its nodes beginning with `start` (the arc
    /// from the last node back to `start` is implicit).
    pub fn odd_walk(&mut self, graph: &BijectionGraph, start: usize) -> Option<Vec<usize>> {
        let target = graph.twin(start);
        self.shortest_path(graph, start, target)?;

        let mut walk = vec![start];
        let mut node = self.pred[target]?;
        while node != start {
            walk.push(graph.project(node));
            node = self.pred[node]?;
            debug_assert!(walk.len() <= graph.nb_copies(), "the predecessor chain does not close");
        }
        debug_assert!(walk.len() % 2 == 1, "a walk through the bijection graph must be odd");
        Some(walk)
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
