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

//! This module defines the `LevelGraph`: the layered graph which the
//! heuristic method grows breadth first from a root node.
//!
//! The root alone forms level 0. Processing level `L` enumerates the conflicts
//! of each of its nodes, admits the new partners into level `L + 1` (as long
//! as that level is not full) and records the arcs of the node:
//!
//! * *forward* arcs go to level `L + 1`,
//! * *backward* arcs go to level `L - 1`,
//! * *same level* edges stay in level `L`. Each of them is stored once, from
//!   its smallest endpoint.
//!
//! All the arcs of a node are recorded while that node is processed, so each
//! node owns a contiguous span of the forward and backward buffers. Same
//! level edges are grouped by level the same way.

use fxhash::FxHashSet;

use crate::{negation, Abort, ConflictGraph, FractionalPoint, GrowableBuffer, Host, MemoryBudget, SeparatorConfig};

/// An arc to `target`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arc {
    pub target: usize,
    pub weight: u64,
}
/// An edge between two nodes of the same level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub source: usize,
    pub target: usize,
    pub weight: u64,
}

/// A graph whose nodes are sorted in levels by their distance (in number of
/// hops) to a root.
#[derive(Debug, Clone)]
pub struct LevelGraph {
    nb_vars: usize,
    root: usize,
    max_level_size: usize,
    /// The level of each node (`None` when the node is not part of the graph)
    level: Vec<Option<usize>>,
    /// All the nodes of the graph, level after level
    members: Vec<usize>,
    /// `members[level_start[l]..level_start[l+1]]` are the nodes of level l
    level_start: Vec<usize>,
    /// The span of each node in `forward`
    forward_span: Vec<(usize, usize)>,
    /// The span of each node in `backward`
    backward_span: Vec<(usize, usize)>,
    forward: GrowableBuffer<Arc>,
    backward: GrowableBuffer<Arc>,
    same_level: GrowableBuffer<Edge>,
    /// `same_level[level_edges[l]..level_edges[l+1]]` are the edges of level l
    level_edges: Vec<usize>,
    seen: FxHashSet<usize>,
    scratch: Vec<(usize, u64)>,
}

impl LevelGraph {
    /// Creates a graph with `root` alone in level 0. Level `l > 0` will
    /// never hold more than `max_level_size` nodes.
    pub fn new(nb_vars: usize, root: usize, max_level_size: usize, budget: &mut MemoryBudget) -> Result<Self, Abort> {
        let nb_nodes = 2 * nb_vars;
        budget.reserve_array::<Option<usize>>(nb_nodes)?;
        budget.reserve_array::<usize>(nb_nodes)?;
        budget.reserve_array::<(usize, usize)>(2 * nb_nodes)?;

        let mut level = vec![None; nb_nodes];
        level[root] = Some(0);
        let mut members = Vec::with_capacity(nb_nodes);
        members.push(root);

        Ok(Self {
            nb_vars,
            root,
            max_level_size,
            level,
            members,
            level_start: vec![0, 1],
            forward_span: vec![(0, 0); nb_nodes],
            backward_span: vec![(0, 0); nb_nodes],
            forward: GrowableBuffer::new(budget)?,
            backward: GrowableBuffer::new(budget)?,
            same_level: GrowableBuffer::new(budget)?,
            level_edges: vec![0],
            seen: FxHashSet::default(),
            scratch: vec![],
        })
    }
    pub fn root(&self) -> usize {
        self.root
    }
    /// Number of levels created so far (the last one might still be empty)
    pub fn nb_levels(&self) -> usize {
        self.level_start.len() - 1
    }
    pub fn level_of(&self, node: usize) -> Option<usize> {
        self.level[node]
    }
    pub fn level_nodes(&self, level: usize) -> &[usize] {
        if level >= self.nb_levels() {
            &[]
        } else {
            &self.members[self.level_start[level]..self.level_start[level + 1]]
        }
    }
    pub fn forward_arcs(&self, node: usize) -> &[Arc] {
        let (b, e) = self.forward_span[node];
        &self.forward[b..e]
    }
    pub fn backward_arcs(&self, node: usize) -> &[Arc] {
        let (b, e) = self.backward_span[node];
        &self.backward[b..e]
    }
    /// The edges between two nodes of the given level (empty until that level
    /// has been processed)
    pub fn same_level_edges(&self, level: usize) -> &[Edge] {
        if level + 1 < self.level_edges.len() {
            &self.same_level[self.level_edges[level]..self.level_edges[level + 1]]
        } else {
            &[]
        }
    }

    /// Processes the last level of the graph: records the arcs of each of its
    /// nodes and fills the next level with their new conflict partners.
    /// Returns true iff the new level is not empty.
    pub fn create_next_level<H: Host>(
        &mut self,
        host: &H,
        point: &FractionalPoint,
        config: &SeparatorConfig,
        budget: &mut MemoryBudget) -> Result<bool, Abort>
    {
        let current = self.nb_levels() - 1;
        let begin = self.level_start[current];
        let end = self.members.len();
        // the next level starts right after the current one
        self.level_start[current + 1] = end;
        self.level_start.push(end);

        let mut scratch = std::mem::take(&mut self.scratch);
        for idx in begin..end {
            let u = self.members[idx];
            let fwd_start = self.forward.len();
            let bwd_start = self.backward.len();

            if config.self_arcs {
                let nu = negation(u, self.nb_vars);
                self.try_insert(nu, current + 1);
                self.add_arc(u, nu, 0, current, budget)?;
            }

            scratch.clear();
            point.for_each_conflict(host, u, &mut self.seen, &mut |v, w| scratch.push((v, w)));
            if current == 0 && config.sort_root_neighbors {
                scratch.sort_by(|a, b| point.fractionality(b.0).total_cmp(&point.fractionality(a.0)));
            }
            for (v, w) in scratch.iter().copied() {
                self.try_insert(v, current + 1);
                self.add_arc(u, v, w, current, budget)?;
            }

            self.forward_span[u] = (fwd_start, self.forward.len());
            self.backward_span[u] = (bwd_start, self.backward.len());
        }
        self.scratch = scratch;
        self.level_edges.push(self.same_level.len());

        let last = self.level_start.len() - 1;
        self.level_start[last] = self.members.len();
        Ok(self.members.len() > end)
    }

    /// Admits `node` in `level` if it is not in the graph yet and that level
    /// still has room for it.
    fn try_insert(&mut self, node: usize, level: usize) -> bool {
        let size = self.members.len() - self.level_start[level];
        if self.level[node].is_none() && size < self.max_level_size {
            self.level[node] = Some(level);
            self.members.push(node);
            true
        } else {
            false
        }
    }
    /// Records the arc from `u` (which lies in `level`) to `v` in the buffer
    /// that matches the level of `v`.
    fn add_arc(&mut self, u: usize, v: usize, weight: u64, level: usize, budget: &mut MemoryBudget) -> Result<(), Abort> {
        match self.level[v] {
            Some(l) if l == level + 1 => self.forward.push(Arc { target: v, weight }, budget),
            Some(l) if l + 1 == level => self.backward.push(Arc { target: v, weight }, budget),
            Some(l) if l == level && u < v => self.same_level.push(Edge { source: u, target: v, weight }, budget),
            _ => Ok(()),
        }
    }
}

impl ConflictGraph for LevelGraph {
    fn nb_nodes(&self) -> usize {
        2 * self.nb_vars
    }

    fn is_adjacent(&self, a: usize, b: usize) -> bool {
        let (la, lb) = match (self.level[a], self.level[b]) {
            (Some(la), Some(lb)) => (la, lb),
            _ => return false,
        };
        if la == lb {
            self.same_level_edges(la).iter()
                .any(|e| (e.source == a && e.target == b) || (e.source == b && e.target == a))
        } else if la + 1 == lb {
            self.forward_arcs(a).iter().any(|arc| arc.target == b)
                || self.backward_arcs(b).iter().any(|arc| arc.target == a)
        } else if lb + 1 == la {
            self.forward_arcs(b).iter().any(|arc| arc.target == a)
                || self.backward_arcs(a).iter().any(|arc| arc.target == b)
        } else {
            false
        }
    }

    fn for_each_neighbor(&self, a: usize, f: &mut dyn FnMut(usize)) {
        let la = match self.level[a] {
            Some(l) => l,
            None => return,
        };
        for arc in self.forward_arcs(a).iter().chain(self.backward_arcs(a).iter()) {
            f(arc.target);
        }
        for edge in self.same_level_edges(la) {
            if edge.source == a {
                f(edge.target);
            } else if edge.target == a {
                f(edge.source);
            }
        }
        // arcs stored on the other endpoint only
        if la > 0 {
            for &u in self.level_nodes(la - 1) {
                if self.forward_arcs(u).iter().any(|arc| arc.target == a) {
                    f(u);
                }
            }
        }
        for &u in self.level_nodes(la + 1) {
            if self.backward_arcs(u).iter().any(|arc| arc.target == a) {
                f(u);
            }
        }
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
