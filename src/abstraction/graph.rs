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

//! This module defines the `ConflictGraph` trait: the view of a conflict graph
//! over polarity nodes that is shared by the level graphs and the bijection
//! graphs. Lifting is written once against this trait.

/// A conflict graph over the polarity nodes `0..nb_nodes()`. Two nodes are
/// adjacent iff the literals they denote cannot both be true.
///
/// Adjacency is symmetric regardless of which endpoint actually stores the
/// connection.
pub trait ConflictGraph {
    /// Number of polarity nodes (twice the number of binary variables)
    fn nb_nodes(&self) -> usize;
    /// Returns true iff `a` and `b` are connected in this graph
    fn is_adjacent(&self, a: usize, b: usize) -> bool;
    /// Calls `f` on each node adjacent to `a`. A neighbor may be reported more
    /// than once.
    fn for_each_neighbor(&self, a: usize, f: &mut dyn FnMut(usize));
}
