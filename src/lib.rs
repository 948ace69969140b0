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

//! # Odd cycle cuts
//! This crate implements an odd cycle separator for branch-and-cut solvers
//! working with binary variables. Whenever two literals (a variable or its
//! negation) cannot both be true, they are said to be in conflict. The
//! conflicts known to a solver (binary implications and cliques) form a
//! *conflict graph* over the literals, and every odd cycle `C` of that graph
//! yields the valid inequality
//!
//! ```plain
//!     sum(literals of C) <= (|C| - 1) / 2
//! ```
//!
//! The separator looks for the cycles which are violated by the current LP
//! solution and hands them over to the solver as cuts. It offers two methods:
//!
//! * The *classical* method builds a bipartite double cover of the conflict
//!   graph (the bijection graph) and finds the lightest odd cycles with a
//!   Dijkstra search from each node to its twin.
//! * The *level graph* method grows a breadth first layered graph from a set
//!   of roots and closes an odd cycle through the root for each edge joining
//!   two nodes of the same level.
//!
//! In both cases, the cycles are cleaned (repeated variables removed), they
//! can optionally be strengthened by sequential lifting, and they are turned
//! into cuts over the original variables. A cycle which degenerates to a
//! single literal proves that this literal must be false, in which case the
//! separator fixes the variable instead.
//!
//! ## Quick Example
//! The only thing you need to provide is an implementation of the `Host` trait
//! which lets the separator see the LP solution and conflicts of your solver
//! and submit its cuts. The following host holds three variables pairwise in
//! conflict (a triangle) all of which are set to one half by the LP.
//!
//! ```
//! # use oddcycle::*;
//! #
//! struct Triangle {
//!     clique: Clique,
//!     cuts  : Vec<Cut>,
//! }
//! impl Host for Triangle {
//!     fn nb_vars(&self) -> usize {
//!         3
//!     }
//!     fn lp_value(&self, _var: Variable) -> f64 {
//!         0.5
//!     }
//!     fn for_each_implication(&self, _var: Variable, _value: bool, _f: &mut dyn FnMut(Implication)) {
//!         // there are no binary implications in this example
//!     }
//!     fn for_each_clique(&self, _var: Variable, value: bool, f: &mut dyn FnMut(&Clique)) {
//!         if value {
//!             f(&self.clique)
//!         }
//!     }
//!     fn add_cut(&mut self, cut: &Cut) -> bool {
//!         self.cuts.push(cut.clone());
//!         true
//!     }
//!     fn tighten_bound(&mut self, _var: Variable, _bound: BoundType, _value: f64) {
//!         // no degenerate cycle in this example
//!     }
//! }
//!
//! let mut host = Triangle {
//!     clique: Clique::new((0..3).map(|i| Literal::positive(Variable(i))).collect()),
//!     cuts  : vec![],
//! };
//! let config = SeparatorConfigBuilder::default()
//!     .method(Method::Classical)
//!     .build()
//!     .unwrap();
//! let mut separator = OddCycleSeparator::new(config);
//!
//! assert_eq!(Outcome::Separated, separator.separate(&mut host));
//! assert_eq!(1, host.cuts.len());
//! assert_eq!(1.0, host.cuts[0].rhs);
//! ```
//!
//! The place to start exploring the API is `OddCycleSeparator` along with
//! `SeparatorConfig` which groups all the parameters of the search. The
//! building blocks (`LevelGraph`, `BijectionGraph`, `CycleBuilder`, `lift`,
//! `odd_cycle_cut`, ...) are exposed too, should you want to assemble a
//! separator of your own.
//!
//! The separator reports what it does through the `log` facade: `debug`
//! level for per-call decisions and summaries, `trace` level for individual
//! cycles. No logger is installed by this library.

mod common;
mod abstraction;
mod implementation;

pub use common::*;
pub use abstraction::*;
pub use implementation::*;

#[cfg(test)]
mod test_utils;
