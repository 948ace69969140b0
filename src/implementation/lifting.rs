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

//! This module implements the lifting of odd cycle inequalities.
//!
//! Given an odd cycle `C` of length `k` and the inequality
//! `sum(x_c for c in C) <= (k - 1) / 2`, lifting greedily adds literals `i`
//! that conflict with some nodes of the cycle, with a coefficient that keeps
//! the inequality valid.
//!
//! The coefficient of `i` counts the chains of `C` that `i` covers: position
//! `j` of the cycle is *inner* when `i` conflicts with positions `j - 1`, `j`
//! and `j + 1`. A maximal run of `r` inner positions is worth
//! `floor((r + 1) / 2)`, and a candidate that conflicts with the whole cycle
//! is worth `(k - 1) / 2`. Whenever a literal `l` was lifted before and does
//! not conflict with `i`, both may be true at once. Hence, the positions
//! whose three nodes all conflict with `l` are not inner for `i`. That way,
//! the chains of two compatible lifted literals share at most their
//! endpoints, and their coefficients never add up above what the cycle can
//! give away.

use crate::{negation, ConflictGraph, SeparatorConfig};

/// Computes the lifting coefficients of the candidates of one cycle
pub struct ChainCounter<'a> {
    graph: &'a dyn ConflictGraph,
    cycle: &'a [usize],
    adjacent: Vec<bool>,
    inner: Vec<bool>,
}

impl <'a> ChainCounter<'a> {
    pub fn new(graph: &'a dyn ConflictGraph, cycle: &'a [usize]) -> Self {
        Self { graph, cycle, adjacent: vec![false; cycle.len()], inner: vec![false; cycle.len()] }
    }

    /// Returns the coefficient of `candidate` given the literals that were
    /// lifted so far.
    pub fn coefficient(&mut self, candidate: usize, lifted: &[(usize, usize)]) -> usize {
        let k = self.cycle.len();
        if k < 3 {
            return 0;
        }
        let prev = |j: usize| (j + k - 1) % k;
        let next = |j: usize| (j + 1) % k;

        for (j, &c) in self.cycle.iter().enumerate() {
            self.adjacent[j] = self.graph.is_adjacent(candidate, c);
        }
        for j in 0..k {
            self.inner[j] = self.adjacent[prev(j)] && self.adjacent[j] && self.adjacent[next(j)];
        }

        for &(l, _) in lifted {
            if self.graph.is_adjacent(candidate, l) {
                continue;
            }
            for (j, &c) in self.cycle.iter().enumerate() {
                self.adjacent[j] = self.graph.is_adjacent(l, c);
            }
            for j in 0..k {
                let (a, b) = (prev(j), next(j));
                if (self.inner[a] || self.inner[j] || self.inner[b])
                    && self.adjacent[a] && self.adjacent[j] && self.adjacent[b]
                {
                    self.inner[a] = false;
                    self.inner[j] = false;
                    self.inner[b] = false;
                }
            }
        }

        let first_outer = match self.inner.iter().position(|inner| !inner) {
            Some(j) => j,
            None => return (k - 1) / 2,
        };
        let mut coef = 0;
        let mut run = 0;
        for step in 1..=k {
            if self.inner[(first_outer + step) % k] {
                run += 1;
            } else {
                coef += (run + 1) / 2;
                run = 0;
            }
        }
        coef
    }
}

/// Greedily lifts the inequality of `cycle`. Returns the lifted literals
/// (polarity nodes) along with their coefficients, in the order they were
/// lifted.
///
/// `values` are the LP values of the polarity nodes. They are only used
/// when the candidates are ranked by `coefficient * value`.
pub fn lift(graph: &dyn ConflictGraph, cycle: &[usize], values: &[f64], config: &SeparatorConfig) -> Vec<(usize, usize)> {
    let nb_vars = graph.nb_nodes() / 2;
    let mut excluded = vec![false; graph.nb_nodes()];
    for &c in cycle {
        excluded[c] = true;
        excluded[negation(c, nb_vars)] = true;
    }
    let mut candidates = vec![];
    for &c in cycle {
        graph.for_each_neighbor(c, &mut |v| if !excluded[v] { candidates.push(v) });
    }
    candidates.sort_unstable();
    candidates.dedup();

    let mut counter = ChainCounter::new(graph, cycle);
    let mut alive = vec![true; candidates.len()];
    let mut coef = vec![0; candidates.len()];
    let mut lifted: Vec<(usize, usize)> = vec![];

    for round in 0_usize.. {
        let fresh = round == 0 || config.lift_coef_per_step;
        if fresh {
            for (i, &cand) in candidates.iter().enumerate() {
                if alive[i] {
                    coef[i] = counter.coefficient(cand, &lifted);
                    alive[i] = coef[i] > 0;
                }
            }
        }

        let mut best: Option<(usize, f64)> = None;
        for (i, &cand) in candidates.iter().enumerate() {
            if !alive[i] {
                continue;
            }
            let score = if config.lp_weighted_lifting { coef[i] as f64 * values[cand] } else { coef[i] as f64 };
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((i, score));
            }
        }
        let Some((i, _)) = best else { break };

        let cand = candidates[i];
        let c = if fresh { coef[i] } else { counter.coefficient(cand, &lifted) };
        alive[i] = false;
        if c > 0 {
            debug_assert!(lifted.iter().all(|&(l, _)| l != negation(cand, nb_vars)), "both polarities of a variable were lifted");
            lifted.push((cand, c));
            if let Ok(j) = candidates.binary_search(&negation(cand, nb_vars)) {
                alive[j] = false;
            }
        }
    }
    lifted
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_lifting {
    use crate::*;
    use crate::test_utils::*;
    use super::*;

    /// A 5-cycle on the nodes 0..5 of a graph over `nb_vars` variables
    fn five_cycle(nb_vars: usize) -> AdjacencyMatrix {
        let mut graph = AdjacencyMatrix::new(2 * nb_vars);
        for i in 0..5 {
            graph.connect(i, (i + 1) % 5);
        }
        graph
    }

    #[test]
    fn a_candidate_conflicting_with_the_whole_cycle_gets_the_full_rhs() {
        let mut graph = five_cycle(6);
        for i in 0..5 {
            graph.connect(5, i);
        }
        let cycle = [0, 1, 2, 3, 4];
        let mut counter = ChainCounter::new(&graph, &cycle);
        assert_eq!(2, counter.coefficient(5, &[]));
    }
    #[test]
    fn a_candidate_conflicting_with_two_neighbors_only_gets_nothing() {
        let mut graph = five_cycle(6);
        graph.connect(5, 0).connect(5, 1);
        let cycle = [0, 1, 2, 3, 4];
        let mut counter = ChainCounter::new(&graph, &cycle);
        assert_eq!(0, counter.coefficient(5, &[]));
    }
    #[test]
    fn a_chain_of_three_nodes_is_worth_one() {
        let mut graph = five_cycle(6);
        graph.connect(5, 0).connect(5, 1).connect(5, 2);
        let cycle = [0, 1, 2, 3, 4];
        let mut counter = ChainCounter::new(&graph, &cycle);
        assert_eq!(1, counter.coefficient(5, &[]));
    }
    #[test]
    fn a_chain_crossing_the_end_of_the_cycle_is_counted_once() {
        let mut graph = five_cycle(6);
        graph.connect(5, 3).connect(5, 4).connect(5, 0).connect(5, 1);
        let cycle = [0, 1, 2, 3, 4];
        let mut counter = ChainCounter::new(&graph, &cycle);
        // inner positions: 4 and 0, one run of length 2
        assert_eq!(1, counter.coefficient(5, &[]));
    }
    #[test]
    fn a_compatible_lifted_literal_blocks_the_chains_it_covers() {
        let mut graph = five_cycle(7);
        graph.connect(5, 0).connect(5, 1).connect(5, 2);
        graph.connect(6, 0).connect(6, 1).connect(6, 2);
        let cycle = [0, 1, 2, 3, 4];
        let mut counter = ChainCounter::new(&graph, &cycle);
        assert_eq!(1, counter.coefficient(6, &[]));
        assert_eq!(0, counter.coefficient(6, &[(5, 1)]));
    }
    #[test]
    fn a_conflicting_lifted_literal_blocks_nothing() {
        let mut graph = five_cycle(7);
        graph.connect(5, 0).connect(5, 1).connect(5, 2);
        graph.connect(6, 0).connect(6, 1).connect(6, 2);
        graph.connect(5, 6);
        let cycle = [0, 1, 2, 3, 4];
        let mut counter = ChainCounter::new(&graph, &cycle);
        assert_eq!(1, counter.coefficient(6, &[(5, 1)]));
    }
    #[test]
    fn the_wheel_hub_is_lifted_with_coefficient_two() {
        let mut graph = five_cycle(6);
        for i in 0..5 {
            graph.connect(5, i);
        }
        let values = vec![0.5; 12];
        let lifted = lift(&graph, &[0, 1, 2, 3, 4], &values, &SeparatorConfig::default());
        assert_eq!(vec![(5, 2)], lifted);
    }
    #[test]
    fn the_negations_of_the_cycle_are_never_candidates() {
        let mut graph = five_cycle(6);
        for i in 0..5 {
            graph.connect(i, i + 6);
        }
        let values = vec![0.5; 12];
        let lifted = lift(&graph, &[0, 1, 2, 3, 4], &values, &SeparatorConfig::default());
        assert!(lifted.is_empty());
    }
    #[test]
    fn the_negation_of_a_lifted_literal_is_not_lifted() {
        // 5 and not 5 both cover the chain 0, 1, 2 ; they do not conflict in this graph
        let mut graph = five_cycle(6);
        graph.connect(5, 0).connect(5, 1).connect(5, 2);
        graph.connect(11, 2).connect(11, 3).connect(11, 4);
        let values = vec![0.5; 12];
        let lifted = lift(&graph, &[0, 1, 2, 3, 4], &values, &SeparatorConfig::default());
        assert_eq!(vec![(5, 1)], lifted);
    }
    #[test]
    fn lp_weighting_prefers_the_candidate_with_the_largest_value() {
        let mut graph = five_cycle(7);
        graph.connect(5, 0).connect(5, 1).connect(5, 2);
        graph.connect(6, 2).connect(6, 3).connect(6, 4);
        let mut values = vec![0.5; 14];
        values[5] = 0.1;
        values[6] = 0.3;
        let config = SeparatorConfig { lp_weighted_lifting: true, ..Default::default() };
        let lifted = lift(&graph, &[0, 1, 2, 3, 4], &values, &config);
        assert_eq!((6, 1), lifted[0]);
    }
    #[test]
    fn without_weighting_ties_go_to_the_smallest_candidate() {
        let mut graph = five_cycle(7);
        graph.connect(5, 0).connect(5, 1).connect(5, 2);
        graph.connect(6, 2).connect(6, 3).connect(6, 4);
        let mut values = vec![0.5; 14];
        values[5] = 0.1;
        values[6] = 0.3;
        let lifted = lift(&graph, &[0, 1, 2, 3, 4], &values, &SeparatorConfig::default());
        assert_eq!((5, 1), lifted[0]);
    }
    #[test]
    fn stale_coefficients_are_checked_again_before_being_used() {
        let mut graph = five_cycle(7);
        graph.connect(5, 0).connect(5, 1).connect(5, 2);
        graph.connect(6, 0).connect(6, 1).connect(6, 2);
        let values = vec![0.5; 14];
        let config = SeparatorConfig { lift_coef_per_step: false, ..Default::default() };
        let lifted = lift(&graph, &[0, 1, 2, 3, 4], &values, &config);
        assert_eq!(vec![(5, 1)], lifted);
    }
}
