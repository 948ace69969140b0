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

//! This module defines the (few) reasons why an attempt at separating a cut
//! might fail. None of them is a fatal error: they all mean "nothing more to
//! gain from this root (or this call)".

use thiserror::Error;

/// Why the construction of a graph or a search had to be given up
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Abort {
    /// Growing a buffer would exceed the memory ceiling of the graph
    #[error("memory limit reached ({requested} bytes requested, {available} available)")]
    MemoryLimit { requested: usize, available: usize },
    /// The host asked the separator to stop
    #[error("the host requested to stop")]
    StopRequested,
}

/// Why a closed walk was not turned into a cut
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// One of the variables already occurs in a cut of the current round
    #[error("variable already covered by a cut of this round")]
    Covered,
    /// The walk visits the same node twice
    #[error("the walk contains a sub-cycle")]
    SubCycle,
    /// The walk contains a literal and its negation and repair is disabled
    #[error("the walk contains a literal and its negation")]
    NegationPair,
    /// The walk reaches the negation of its own start node
    #[error("the walk goes through the negation of its start node")]
    NegatedStart,
}
