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

//! This module provides the fixtures shared by the unit tests: an in-memory
//! host solver and a conflict graph stored as an adjacency matrix.

use crate::*;

/// The literal `x_i`
pub fn pos(i: usize) -> Literal {
    Literal::positive(Variable(i))
}
/// The literal `not x_i`
pub fn neg(i: usize) -> Literal {
    Literal::negative(Variable(i))
}

/// A host whose conflicts are given explicitly (as symmetric implications or
/// as cliques) and which records everything the separator asks it to do.
#[derive(Debug, Clone, Default)]
pub struct TestHost {
    pub values: Vec<f64>,
    /// implications[node] are the implications of the literal `node`
    pub implications: Vec<Vec<Implication>>,
    pub cliques: Vec<Clique>,
    pub cuts: Vec<Cut>,
    pub bounds: Vec<(Variable, BoundType, f64)>,
    pub stop: bool,
    pub refuse_cuts: bool,
    pub depth: usize,
    pub calls: usize,
}
impl TestHost {
    pub fn new(values: Vec<f64>) -> Self {
        let n = values.len();
        Self { values, implications: vec![vec![]; 2 * n], ..Default::default() }
    }
    /// Records that literals `a` and `b` cannot both be true
    pub fn conflict(&mut self, a: Literal, b: Literal) -> &mut Self {
        let n = self.values.len();
        self.implications[a.node(n)].push(Self::excluding(b));
        self.implications[b.node(n)].push(Self::excluding(a));
        self
    }
    pub fn clique(&mut self, members: Vec<Literal>) -> &mut Self {
        self.cliques.push(Clique::new(members));
        self
    }
    /// The implication which forbids `lit` to be true
    fn excluding(lit: Literal) -> Implication {
        let bound = if lit.value { BoundType::Upper } else { BoundType::Lower };
        Implication { variable: lit.variable, bound }
    }
    /// The cuts added so far with their coefficients sorted by variable
    pub fn sorted_cuts(&self) -> Vec<Cut> {
        self.cuts.iter().cloned()
            .map(|mut cut| {
                cut.coefficients.sort_by_key(|(v, _)| *v);
                cut
            })
            .collect()
    }
}
impl Host for TestHost {
    fn nb_vars(&self) -> usize {
        self.values.len()
    }
    fn lp_value(&self, var: Variable) -> f64 {
        self.values[var.id()]
    }
    fn for_each_implication(&self, var: Variable, value: bool, f: &mut dyn FnMut(Implication)) {
        let node = Literal { variable: var, value }.node(self.values.len());
        for imp in self.implications[node].iter() {
            f(*imp);
        }
    }
    fn for_each_clique(&self, var: Variable, value: bool, f: &mut dyn FnMut(&Clique)) {
        let lit = Literal { variable: var, value };
        for clique in self.cliques.iter() {
            if clique.members.contains(&lit) {
                f(clique);
            }
        }
    }
    fn add_cut(&mut self, cut: &Cut) -> bool {
        if self.refuse_cuts {
            false
        } else {
            self.cuts.push(cut.clone());
            true
        }
    }
    fn tighten_bound(&mut self, var: Variable, bound: BoundType, value: f64) {
        self.bounds.push((var, bound, value));
    }
    fn must_stop(&self) -> bool {
        self.stop
    }
    fn depth(&self) -> usize {
        self.depth
    }
    fn nb_calls_at_node(&self) -> usize {
        self.calls
    }
}

/// A conflict graph given by its (symmetric) adjacency matrix
#[derive(Debug, Clone)]
pub struct AdjacencyMatrix {
    adjacent: Vec<Vec<bool>>,
}
impl AdjacencyMatrix {
    pub fn new(nb_nodes: usize) -> Self {
        Self { adjacent: vec![vec![false; nb_nodes]; nb_nodes] }
    }
    pub fn connect(&mut self, a: usize, b: usize) -> &mut Self {
        self.adjacent[a][b] = true;
        self.adjacent[b][a] = true;
        self
    }
}
impl ConflictGraph for AdjacencyMatrix {
    fn nb_nodes(&self) -> usize {
        self.adjacent.len()
    }
    fn is_adjacent(&self, a: usize, b: usize) -> bool {
        self.adjacent[a][b]
    }
    fn for_each_neighbor(&self, a: usize, f: &mut dyn FnMut(usize)) {
        for (b, connected) in self.adjacent[a].iter().enumerate() {
            if *connected {
                f(b);
            }
        }
    }
}
