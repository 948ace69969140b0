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

//! This module implements the path searches performed in a level graph.
//!
//! Given an edge `(s, t)` between two nodes of level `L`, an odd cycle through
//! the root is made of that edge plus two paths going down from `s` and `t`
//! to the root. These paths only follow backward arcs, so both of them have
//! exactly `L` arcs and the cycle has `2L + 1` nodes. The second path is
//! searched once everything around the first one has been blocked, which
//! keeps both paths apart.

use std::collections::VecDeque;

use crate::{Abort, LevelGraph, MemoryBudget};

/// The buffers of the searches performed in the level graph of one root
#[derive(Debug, Clone)]
pub struct PathSearch {
    distance: Vec<u64>,
    parent: Vec<Option<usize>>,
    in_queue: Vec<bool>,
    blocked: Vec<bool>,
    queue: VecDeque<usize>,
}

impl PathSearch {
    pub fn new(nb_nodes: usize, budget: &mut MemoryBudget) -> Result<Self, Abort> {
        budget.reserve_array::<u64>(nb_nodes)?;
        budget.reserve_array::<Option<usize>>(nb_nodes)?;
        budget.reserve_array::<bool>(2 * nb_nodes)?;
        budget.reserve_array::<usize>(nb_nodes)?;
        Ok(Self {
            distance: vec![u64::MAX; nb_nodes],
            parent: vec![None; nb_nodes],
            in_queue: vec![false; nb_nodes],
            blocked: vec![false; nb_nodes],
            queue: VecDeque::with_capacity(nb_nodes),
        })
    }

    /// Computes a shortest path from `source` down to the root of the graph.
    /// Returns the path as `[root, ..., source]`, or None when the root
    /// cannot be reached.
    pub fn shortest_path_to_root(&mut self, graph: &LevelGraph, source: usize) -> Option<Vec<usize>> {
        self.search(graph, source, false);
        self.path_from_root(graph.root(), source)
    }
    /// Same as `shortest_path_to_root` except that the blocked nodes (but the
    /// root) are avoided.
    pub fn unblocked_shortest_path_to_root(&mut self, graph: &LevelGraph, source: usize) -> Option<Vec<usize>> {
        self.search(graph, source, true);
        self.path_from_root(graph.root(), source)
    }
    /// Blocks the neighborhood of `path` (given as `[root, ..., source]`): all
    /// the neighbors of its inner nodes and the nodes below its source.
    pub fn block_root_path(&mut self, graph: &LevelGraph, path: &[usize]) {
        self.blocked.iter_mut().for_each(|b| *b = false);
        if path.len() < 2 {
            return;
        }
        let source = path[path.len() - 1];
        for &u in &path[1..path.len() - 1] {
            for arc in graph.forward_arcs(u).iter().chain(graph.backward_arcs(u).iter()) {
                self.blocked[arc.target] = true;
            }
            if let Some(level) = graph.level_of(u) {
                for edge in graph.same_level_edges(level) {
                    if edge.source == u {
                        self.blocked[edge.target] = true;
                    } else if edge.target == u {
                        self.blocked[edge.source] = true;
                    }
                }
            }
        }
        for arc in graph.backward_arcs(source) {
            self.blocked[arc.target] = true;
        }
    }
    pub fn is_blocked(&self, node: usize) -> bool {
        self.blocked[node]
    }

    /// Label correcting search from `source` along the backward arcs.
    ///
    /// The queue processes the nodes level after level (from the level of
    /// `source` downwards) and every arc goes one level down. Hence, when a
    /// node is dequeued, its distance is final and it never needs to be
    /// enqueued again.
    fn search(&mut self, graph: &LevelGraph, source: usize, avoid_blocked: bool) {
        let root = graph.root();
        self.distance.iter_mut().for_each(|d| *d = u64::MAX);
        self.parent.iter_mut().for_each(|p| *p = None);
        self.in_queue.iter_mut().for_each(|q| *q = false);
        self.queue.clear();

        self.distance[source] = 0;
        self.in_queue[source] = true;
        self.queue.push_back(source);
        while let Some(u) = self.queue.pop_front() {
            let du = self.distance[u];
            for arc in graph.backward_arcs(u) {
                let v = arc.target;
                if avoid_blocked && self.blocked[v] && v != root {
                    continue;
                }
                let dv = du.saturating_add(arc.weight);
                if dv < self.distance[v] {
                    self.distance[v] = dv;
                    self.parent[v] = Some(u);
                    if !self.in_queue[v] {
                        self.in_queue[v] = true;
                        self.queue.push_back(v);
                    }
                }
            }
        }
    }
    /// Follows the parents from the root back to `source`
    fn path_from_root(&self, root: usize, source: usize) -> Option<Vec<usize>> {
        if self.distance[root] == u64::MAX {
            return None;
        }
        let mut path = vec![root];
        let mut node = root;
        while node != source {
            node = self.parent[node]?;
            path.push(node);
            debug_assert!(path.len() <= self.parent.len(), "the parent chain does not reach the source");
        }
        Some(path)
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
