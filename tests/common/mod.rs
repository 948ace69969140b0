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

//! An in-memory solver used by the integration tests. Its conflicts are
//! plain pairs of literals, enumerated as binary implications.
#![allow(dead_code)]

use std::cell::Cell;

use oddcycle::*;

pub fn pos(i: usize) -> Literal {
    Literal::positive(Variable(i))
}

#[derive(Debug, Default)]
pub struct Solver {
    pub values: Vec<f64>,
    pub conflicts: Vec<(Literal, Literal)>,
    pub cuts: Vec<Cut>,
    pub fixings: Vec<(Variable, BoundType, f64)>,
    /// must_stop answers true once it has been polled that many times
    pub stop_after: Option<usize>,
    polls: Cell<usize>,
}

impl Solver {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, ..Default::default() }
    }
    /// The chordless cycle x0 - x1 - ... - x(k-1) - x0 where all variables
    /// are set to `value`
    pub fn cycle(k: usize, value: f64) -> Self {
        let mut solver = Self::new(vec![value; k]);
        for i in 0..k {
            solver.conflict(pos(i), pos((i + 1) % k));
        }
        solver
    }
    pub fn conflict(&mut self, a: Literal, b: Literal) {
        self.conflicts.push((a, b));
    }
    /// The cuts in the order they were added, each of them with its
    /// coefficients sorted by variable
    pub fn sorted_cuts(&self) -> Vec<Cut> {
        self.cuts.iter().cloned()
            .map(|mut cut| {
                cut.coefficients.sort_by_key(|(v, _)| *v);
                cut
            })
            .collect()
    }
}

impl Host for Solver {
    fn nb_vars(&self) -> usize {
        self.values.len()
    }
    fn lp_value(&self, var: Variable) -> f64 {
        self.values[var.id()]
    }
    fn for_each_implication(&self, var: Variable, value: bool, f: &mut dyn FnMut(Implication)) {
        let lit = Literal { variable: var, value };
        for &(a, b) in self.conflicts.iter() {
            let other = if a == lit { b } else if b == lit { a } else { continue };
            let bound = if other.value { BoundType::Upper } else { BoundType::Lower };
            f(Implication { variable: other.variable, bound });
        }
    }
    fn for_each_clique(&self, _var: Variable, _value: bool, _f: &mut dyn FnMut(&Clique)) {}

    fn add_cut(&mut self, cut: &Cut) -> bool {
        self.cuts.push(cut.clone());
        true
    }
    fn tighten_bound(&mut self, var: Variable, bound: BoundType, value: f64) {
        self.fixings.push((var, bound, value));
    }
    fn must_stop(&self) -> bool {
        let polls = self.polls.get() + 1;
        self.polls.set(polls);
        matches!(self.stop_after, Some(limit) if polls > limit)
    }
}

pub fn separator(method: Method, config: SeparatorConfig) -> OddCycleSeparator {
    OddCycleSeparator::new(SeparatorConfig { method, ..config })
}
