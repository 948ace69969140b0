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

//! The classical method: one bijection graph for the whole call, and one
//! shortest odd walk per start node.

use log::debug;

use crate::{Abort, BijectionGraph, Dijkstra, Host, MemoryBudget};

use super::Round;

fn prepare<H: Host>(round: &Round<'_, H>) -> Result<(BijectionGraph, Dijkstra), Abort> {
    let mut budget = MemoryBudget::new(round.config.memory_limit);
    let graph = BijectionGraph::build(&*round.host, &round.point, round.config, &mut budget)?;
    let dijkstra = Dijkstra::new(graph.nb_copies(), &mut budget)?;
    Ok((graph, dijkstra))
}

/// Searches an odd cycle from each of the given start nodes. The start nodes
/// without two arcs, or already covered, do not count against the root
/// budget of the round. Returns the number of entries of `starts` which were
/// considered before the call stopped.
pub(crate) fn separate<H: Host>(round: &mut Round<'_, H>, starts: &[usize]) -> usize {
    let (graph, mut dijkstra) = match prepare(round) {
        Ok(prepared) => prepared,
        Err(Abort::MemoryLimit { requested, available }) => {
            round.statistics.nb_aborts += 1;
            debug!("bijection graph abandoned: {requested} bytes requested, {available} available");
            return 0;
        },
        Err(Abort::StopRequested) => return 0,
    };

    let mut scanned = 0;
    for &start in starts {
        if round.host.must_stop() || round.is_exhausted() || round.is_out_of_roots() {
            break;
        }
        scanned += 1;
        if graph.arcs(start).len() < 2 {
            continue;
        }
        if round.is_covered(start) && !round.config.search_multiple_cuts_per_node {
            continue;
        }
        round.nb_roots += 1;
        if let Some(walk) = dijkstra.odd_walk(&graph, start) {
            round.emit(&graph, &walk);
        }
    }
    scanned
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
