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

//! This module defines the `OddCycleSeparator`: the entry point of the crate.
//! Each call to `separate` decides whether it is worth running, picks the
//! roots (or start nodes) to try, and delegates the search to the classical
//! or level graph method. The cycles found by either method all go through
//! the same `Round::emit` to become cuts.

mod heuristic;
mod classical;

use log::{debug, trace};

use crate::{fixing, lift, odd_cycle_cut, ConflictGraph, CycleBuilder, FractionalPoint, Host, Method,
    Outcome, RootOrder, SeparatorConfig, Statistics, Variable};

/// What a separator remembers from one call to the next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeparatorState {
    /// The node where the next call resumes (unsorted root order only)
    pub last_root: usize,
    pub statistics: Statistics,
}

/// Separates odd cycle inequalities from the conflict graph of a host.
///
/// # Example
/// ```
/// # use oddcycle::*;
/// let config = SeparatorConfigBuilder::default()
///     .method(Method::LevelGraph)
///     .build()
///     .unwrap();
/// let separator = OddCycleSeparator::new(config);
/// assert_eq!(0, separator.statistics().nb_calls);
/// ```
#[derive(Debug, Clone, Default)]
pub struct OddCycleSeparator {
    config: SeparatorConfig,
    state: SeparatorState,
}

impl OddCycleSeparator {
    pub fn new(config: SeparatorConfig) -> Self {
        Self { config, state: SeparatorState::default() }
    }
    pub fn config(&self) -> &SeparatorConfig {
        &self.config
    }
    pub fn state(&self) -> &SeparatorState {
        &self.state
    }
    pub fn statistics(&self) -> Statistics {
        self.state.statistics
    }

    /// Looks for odd cycle inequalities violated by the current LP solution of
    /// the host and submits them. Degenerate cycles are turned into bound
    /// changes instead.
    pub fn separate<H: Host>(&mut self, host: &mut H) -> Outcome {
        if let Err(reason) = self.check_round_limits(host) {
            debug!("odd cycle separation skipped: {reason}");
            return Outcome::DidNotRun;
        }
        let point = FractionalPoint::new(host, &self.config);
        if let Err(reason) = self.check_instance(host, &point) {
            debug!("odd cycle separation skipped: {reason}");
            return Outcome::DidNotRun;
        }

        self.state.statistics.nb_calls += 1;
        let roots = self.roots(&point);
        let max_cuts = if host.depth() == 0 { self.config.max_sepa_cuts_root } else { self.config.max_sepa_cuts };
        let nb_vars = point.nb_vars();
        let max_roots = self.config.max_roots(point.nb_nodes());
        let before = self.state.statistics;

        let mut round = Round {
            host,
            config: &self.config,
            statistics: &mut self.state.statistics,
            builder: CycleBuilder::new(nb_vars, self.config.repair_cycles, self.config.allow_multiple_cuts_per_node),
            covered: vec![false; nb_vars],
            point,
            max_cuts,
            nb_cuts: 0,
            max_roots,
            nb_roots: 0,
            outcome: Outcome::DidNotFind,
        };
        let scanned = match self.config.method {
            Method::Classical  => classical::separate(&mut round, &roots),
            Method::LevelGraph => heuristic::separate(&mut round, &roots),
        };
        let outcome = round.outcome;
        let tried = round.nb_roots;

        // the unsorted scan never wraps: once it reaches the last node, the
        // next call starts over from the first one
        if self.config.root_order == RootOrder::Unsorted {
            let next = roots.first().map_or(0, |first| first + scanned);
            self.state.last_root = if next < 2 * nb_vars { next } else { 0 };
        }
        let after = self.state.statistics;
        debug!("odd cycle separation ({:?}): {} roots, {} cuts ({} lifted), {} fixings, {} aborts ; {:.1}% of all cuts lifted",
            self.config.method,
            tried,
            after.nb_cuts - before.nb_cuts,
            after.nb_lifted_cuts - before.nb_lifted_cuts,
            after.nb_fixings - before.nb_fixings,
            after.nb_aborts - before.nb_aborts,
            after.lifted_ratio());
        outcome
    }

    fn check_round_limits<H: Host>(&self, host: &H) -> Result<(), &'static str> {
        let limit = if host.depth() == 0 { self.config.max_rounds_root } else { self.config.max_rounds };
        match limit {
            Some(limit) if host.nb_calls_at_node() >= limit => Err("round limit reached"),
            _ => Ok(()),
        }
    }

    fn check_instance<H: Host>(&self, host: &H, point: &FractionalPoint) -> Result<(), &'static str> {
        let min_vars = if self.config.include_triangles { 3 } else { 5 };
        if point.nb_vars() < min_vars {
            return Err("too few binary variables");
        }
        if point.nb_fractional_vars() < min_vars {
            return Err("too few fractional variables");
        }
        let has_conflicts = (0..point.nb_vars()).any(|i| {
            let var = Variable(i);
            [true, false].iter().any(|&value| host.nb_implications(var, value) > 0 || host.nb_cliques(var, value) > 0)
        });
        if !has_conflicts {
            return Err("no implication and no clique");
        }
        Ok(())
    }

    /// The nodes which may serve as roots (or start nodes) in this call, in
    /// the order they are considered. Only the first `max_roots` of them
    /// which are not skipped get searched.
    fn roots(&self, point: &FractionalPoint) -> Vec<usize> {
        let n = point.nb_vars();
        let nb_nodes = point.nb_nodes();
        match self.config.root_order {
            RootOrder::Unsorted => {
                let first = if self.state.last_root < nb_nodes { self.state.last_root } else { 0 };
                (first..nb_nodes).collect()
            },
            order => {
                let mut vars: Vec<usize> = (0..n).collect();
                match order {
                    RootOrder::MaxLpValue       => vars.sort_by(|a, b| point.value(*b).total_cmp(&point.value(*a))),
                    RootOrder::MinLpValue       => vars.sort_by(|a, b| point.value(*a).total_cmp(&point.value(*b))),
                    RootOrder::MaxFractionality => vars.sort_by(|a, b| point.fractionality(*b).total_cmp(&point.fractionality(*a))),
                    RootOrder::MinFractionality => vars.sort_by(|a, b| point.fractionality(*a).total_cmp(&point.fractionality(*b))),
                    RootOrder::Unsorted         => {},
                }
                vars.iter().copied().chain(vars.iter().map(|v| v + n)).collect()
            }
        }
    }
}

/// The state of one separation call
pub(crate) struct Round<'a, H: Host> {
    pub host: &'a mut H,
    pub config: &'a SeparatorConfig,
    pub statistics: &'a mut Statistics,
    pub point: FractionalPoint,
    pub builder: CycleBuilder,
    /// The variables which occur in a cut of this call
    pub covered: Vec<bool>,
    /// Maximum number of cuts of this call
    pub max_cuts: usize,
    pub nb_cuts: usize,
    /// Maximum number of roots actually searched in this call
    pub max_roots: usize,
    pub nb_roots: usize,
    pub outcome: Outcome,
}

impl <H: Host> Round<'_, H> {
    pub fn cuts_left(&self) -> usize {
        self.max_cuts.saturating_sub(self.nb_cuts)
    }
    pub fn is_exhausted(&self) -> bool {
        self.cuts_left() == 0
    }
    /// Tells whether no other root may be searched in this call
    pub fn is_out_of_roots(&self) -> bool {
        self.nb_roots >= self.max_roots
    }
    pub fn is_covered(&self, node: usize) -> bool {
        self.covered[node % self.point.nb_vars()]
    }

    /// Turns a closed walk found in `graph` into a cut (or a fixing) and
    /// submits it to the host. Returns true iff the host received something.
    pub fn emit(&mut self, graph: &dyn ConflictGraph, walk: &[usize]) -> bool {
        let n = self.point.nb_vars();
        let cycle = match self.builder.clean_cycle(walk, &self.covered) {
            Ok(cycle) => cycle,
            Err(why) => {
                trace!("walk {walk:?} rejected: {why}");
                return false;
            }
        };
        if cycle.len() < 3 {
            let (var, bound, value) = fixing(cycle.start(), n);
            trace!("walk {walk:?} is degenerate: fixing {var:?} ({bound:?} {value})");
            self.host.tighten_bound(var, bound, value);
            self.statistics.nb_fixings += 1;
            self.outcome = Outcome::ReducedDomain;
            return true;
        }
        if cycle.len() == 3 && !self.config.include_triangles {
            return false;
        }

        let lifted = if self.config.lift {
            lift(graph, &cycle.nodes, self.point.values(), self.config)
        } else {
            vec![]
        };
        let cut = odd_cycle_cut(&cycle.nodes, &lifted, n);
        let efficacy = cut.efficacy(|v| self.point.lp_value(v));
        if efficacy <= self.config.min_efficacy {
            trace!("cycle {:?} is not violated enough (efficacy {efficacy})", cycle.nodes);
            return false;
        }
        if !self.host.add_cut(&cut) {
            trace!("cycle {:?} refused by the host", cycle.nodes);
            return false;
        }
        trace!("cycle {:?} lifted with {lifted:?} (efficacy {efficacy})", cycle.nodes);

        for &node in cycle.nodes.iter() {
            self.covered[node % n] = true;
        }
        self.nb_cuts += 1;
        self.statistics.nb_cuts += 1;
        if !lifted.is_empty() {
            self.statistics.nb_lifted_cuts += 1;
        }
        if self.outcome != Outcome::ReducedDomain {
            self.outcome = Outcome::Separated;
        }
        true
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
