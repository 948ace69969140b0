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

//! The level graph method: grow a level graph from each root, and close an
//! odd cycle through the root for every edge between two nodes of a level.

use log::{debug, trace};

use crate::{Abort, Host, LevelGraph, MemoryBudget, PathSearch, Variable};

use super::Round;

/// Tries the given roots in turn. Only the roots which are not skipped count
/// against the root budget of the round. Returns the number of entries of
/// `roots` which were considered before the call stopped.
pub(crate) fn separate<H: Host>(round: &mut Round<'_, H>, roots: &[usize]) -> usize {
    let mut scanned = 0;
    for &root in roots {
        if round.host.must_stop() || round.is_exhausted() || round.is_out_of_roots() {
            break;
        }
        scanned += 1;
        if let Some(reason) = skip_reason(round, root) {
            trace!("root {root} skipped: {reason}");
            continue;
        }
        round.nb_roots += 1;
        match search_from_root(round, root) {
            Ok(()) => {},
            Err(Abort::MemoryLimit { requested, available }) => {
                round.statistics.nb_aborts += 1;
                debug!("root {root} abandoned: {requested} bytes requested, {available} available");
            },
            Err(Abort::StopRequested) => break,
        }
    }
    scanned
}

fn skip_reason<H: Host>(round: &Round<'_, H>, root: usize) -> Option<&'static str> {
    let point = &round.point;
    let n = point.nb_vars();
    let var = Variable(root % n);
    let value = root < n;
    let host = &*round.host;

    if round.is_covered(root) && !round.config.search_multiple_cuts_per_node {
        return Some("covered");
    }
    if !point.is_fractional(root) {
        return Some("integral");
    }
    let implications = host.nb_implications(var, value);
    let cliques = host.nb_cliques(var, value);
    let both_implications = implications + host.nb_implications(var, !value);
    let both_cliques = cliques + host.nb_cliques(var, !value);
    if both_implications < 2 && both_cliques < 1 {
        return Some("too few conflicts for the variable");
    }
    if implications < 1 && cliques < 1 {
        return Some("no conflict");
    }
    if !round.config.self_arcs && implications < 2 && cliques < 1 {
        return Some("too few conflicts");
    }
    None
}

/// Grows the level graph of `root` level after level and searches the same
/// level edges of each of them.
fn search_from_root<H: Host>(round: &mut Round<'_, H>, root: usize) -> Result<(), Abort> {
    let n = round.point.nb_vars();
    let nb_nodes = round.point.nb_nodes();
    let mut budget = MemoryBudget::new(round.config.memory_limit);
    let mut graph = LevelGraph::new(n, root, round.config.max_level_size(nb_nodes), &mut budget)?;
    let mut search = PathSearch::new(nb_nodes, &mut budget)?;

    let mut cuts_of_root = 0;
    let mut level = 0;
    loop {
        if round.host.must_stop() {
            return Err(Abort::StopRequested);
        }
        let grown = graph.create_next_level(&*round.host, &round.point, round.config, &mut budget)?;
        if level > 0 && (round.config.include_triangles || level > 1) {
            let max_cuts = round.config.max_cuts_per_level
                .min(round.config.max_cuts_per_root.saturating_sub(cuts_of_root))
                .min(round.cuts_left());
            cuts_of_root += search_level(round, &graph, &mut search, level, max_cuts);
        }
        level += 1;

        if !grown
            || level >= round.config.max_levels
            || cuts_of_root >= round.config.max_cuts_per_root
            || round.is_exhausted()
        {
            return Ok(());
        }
    }
}

/// Closes an odd cycle through each edge of `level`. Returns the number of
/// cuts (and fixings) emitted.
fn search_level<H: Host>(
    round: &mut Round<'_, H>,
    graph: &LevelGraph,
    search: &mut PathSearch,
    level: usize,
    max_cuts: usize) -> usize
{
    let mut found = 0;
    for edge in graph.same_level_edges(level) {
        if found >= max_cuts {
            break;
        }
        let Some(first) = search.shortest_path_to_root(graph, edge.source) else {
            continue;
        };
        search.block_root_path(graph, &first);
        if search.is_blocked(edge.target) {
            continue;
        }
        let Some(second) = search.unblocked_shortest_path_to_root(graph, edge.target) else {
            continue;
        };

        // target ... root ... source
        let walk: Vec<usize> = second.iter().rev()
            .chain(first[1..].iter())
            .copied()
            .collect();
        if round.emit(graph, &walk) {
            found += 1;
        }
    }
    found
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
