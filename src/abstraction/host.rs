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

//! This module defines the `Host` trait: the narrow interface through which
//! the separator talks to the branch-and-cut solver it is plugged into.

use crate::{BoundType, Clique, Cut, Implication, Variable};

/// This trait describes what the separator needs to know about (and needs to
/// be able to do with) the solver that invokes it. Only the binary variables
/// of the problem are exposed: `Variable(0)` until `Variable(nb_vars() - 1)`.
///
/// Enumerations use callbacks rather than returning collections, so that a
/// host can expose its internal implication and clique tables without
/// materializing anything.
///
/// # Note
/// The conflict information is expected to be symmetric: whenever literal
/// `a` is reported to conflict with literal `b`, then `b` should be reported
/// to conflict with `a` as well. The separator does not crash on asymmetric
/// information, it only misses some cycles.
pub trait Host {
    /// Returns the number of binary variables of the problem
    fn nb_vars(&self) -> usize;
    /// Returns the value of the given variable in the current LP solution
    fn lp_value(&self, var: Variable) -> f64;

    /// Calls `f` on every binary implication whose antecedent is `var == value`
    fn for_each_implication(&self, var: Variable, value: bool, f: &mut dyn FnMut(Implication));
    /// Calls `f` on every clique which contains the literal `var == value`
    fn for_each_clique(&self, var: Variable, value: bool, f: &mut dyn FnMut(&Clique));

    /// Returns the number of implications whose antecedent is `var == value`
    fn nb_implications(&self, var: Variable, value: bool) -> usize {
        let mut count = 0;
        self.for_each_implication(var, value, &mut |_| count += 1);
        count
    }
    /// Returns the number of cliques containing the literal `var == value`
    fn nb_cliques(&self, var: Variable, value: bool) -> usize {
        let mut count = 0;
        self.for_each_clique(var, value, &mut |_| count += 1);
        count
    }

    /// Submits a cut to the solver. Returns true iff the cut was accepted.
    fn add_cut(&mut self, cut: &Cut) -> bool;
    /// Tightens the given bound of a variable: `Upper` sets its upper bound to
    /// `value` and `Lower` sets its lower bound to `value`.
    fn tighten_bound(&mut self, var: Variable, bound: BoundType, value: f64);

    /// Returns true when the solver wants the separation to end as soon as
    /// possible (time limit, memory limit, node limit, interruption...).
    fn must_stop(&self) -> bool {
        false
    }
    /// Depth of the current branch-and-bound node (0 at the root)
    fn depth(&self) -> usize {
        0
    }
    /// Number of times the separator has already been called at the current
    /// branch-and-bound node
    fn nb_calls_at_node(&self) -> usize {
        0
    }
    /// The tolerance used to decide whether a value is integral
    fn feastol(&self) -> f64 {
        1e-6
    }
}
