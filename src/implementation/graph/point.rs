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

//! This module defines the `FractionalPoint`: a snapshot of the current LP
//! solution, seen from the polarity nodes. It knows which nodes may take part
//! in a violated cycle (the fractional ones), how much an arc between two
//! nodes weighs, and how to enumerate the conflicts of a node.

use fxhash::FxHashSet;

use crate::{negation, variable_of, Host, Literal, SeparatorConfig, Variable};

/// The LP values of all polarity nodes, plus what it takes to turn them into
/// arc weights.
#[derive(Debug, Clone)]
pub struct FractionalPoint {
    nb_vars: usize,
    /// `values[i]` is the LP value of node `i` (`x` or `1 - x`)
    values: Vec<f64>,
    scale: f64,
    min_weight: u64,
    feastol: f64,
}
impl FractionalPoint {
    pub fn new<H: Host>(host: &H, config: &SeparatorConfig) -> Self {
        let nb_vars = host.nb_vars();
        let mut values = vec![0.0; 2 * nb_vars];
        for i in 0..nb_vars {
            let x = host.lp_value(Variable(i));
            values[i] = x;
            values[i + nb_vars] = 1.0 - x;
        }
        Self {
            nb_vars,
            values,
            scale: config.scale as f64,
            min_weight: config.min_arc_weight,
            feastol: host.feastol(),
        }
    }
    pub fn nb_vars(&self) -> usize {
        self.nb_vars
    }
    pub fn nb_nodes(&self) -> usize {
        2 * self.nb_vars
    }
    /// LP value of each polarity node
    pub fn values(&self) -> &[f64] {
        &self.values
    }
    pub fn value(&self, node: usize) -> f64 {
        self.values[node]
    }
    pub fn lp_value(&self, var: Variable) -> f64 {
        self.values[var.id()]
    }
    pub fn is_fractional(&self, node: usize) -> bool {
        let x = self.values[node];
        x > self.feastol && x < 1.0 - self.feastol
    }
    /// Distance between the value of the node and the closest integer
    pub fn fractionality(&self, node: usize) -> f64 {
        let x = self.values[node];
        x.min(1.0 - x)
    }
    pub fn nb_fractional_vars(&self) -> usize {
        (0..self.nb_vars).filter(|i| self.is_fractional(*i)).count()
    }
    /// Weight of the arc between two conflicting nodes: the slack
    /// `1 - x_a - x_b` of their conflict, scaled and rounded up. Arcs between
    /// a node and its negation always weigh 0.
    pub fn weight(&self, a: usize, b: usize) -> u64 {
        if b == negation(a, self.nb_vars) {
            return 0;
        }
        let slack = self.scale * (1.0 - self.values[a] - self.values[b]) - self.feastol;
        let slack = slack.ceil();
        let weight = if slack > 0.0 { slack as u64 } else { 0 };
        weight.max(self.min_weight)
    }
    /// Calls `f(v, weight)` once for each fractional node `v` conflicting with
    /// `node` according to the implications and cliques of the host. The
    /// nodes of the variable of `node` itself are never reported.
    ///
    /// `seen` is a scratch set; its content is discarded.
    pub fn for_each_conflict<H: Host>(
        &self,
        host: &H,
        node: usize,
        seen: &mut FxHashSet<usize>,
        f: &mut dyn FnMut(usize, u64))
    {
        let n = self.nb_vars;
        let literal = Literal::from_node(node, n);
        let var = literal.variable;
        seen.clear();

        let mut visit = |v: usize| {
            if variable_of(v, n) == var || !self.is_fractional(v) || !seen.insert(v) {
                return;
            }
            f(v, self.weight(node, v));
        };
        host.for_each_implication(var, literal.value, &mut |imp| visit(imp.conflicting().node(n)));
        host.for_each_clique(var, literal.value, &mut |clique| {
            for member in clique.members.iter() {
                if *member != literal {
                    visit(member.node(n));
                }
            }
        });
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_point {
    use fxhash::FxHashSet;

    use crate::*;
    use crate::test_utils::*;
    use super::*;

    fn conflicts_of(host: &TestHost, point: &FractionalPoint, node: usize) -> Vec<(usize, u64)> {
        let mut seen = FxHashSet::default();
        let mut out = vec![];
        point.for_each_conflict(host, node, &mut seen, &mut |v, w| out.push((v, w)));
        out.sort_unstable();
        out
    }

    #[test]
    fn negated_nodes_take_the_complement_value() {
        let host = TestHost::new(vec![0.25, 0.5, 1.0]);
        let point = FractionalPoint::new(&host, &SeparatorConfig::default());
        assert_eq!(0.25, point.value(0));
        assert_eq!(0.75, point.value(3));
        assert_eq!(0.0, point.value(5));
        assert_eq!(2, point.nb_fractional_vars());
    }
    #[test]
    fn only_strictly_fractional_nodes_are_fractional() {
        let host = TestHost::new(vec![0.0, 0.5, 1.0, 1e-9]);
        let point = FractionalPoint::new(&host, &SeparatorConfig::default());
        assert!(!point.is_fractional(0));
        assert!(point.is_fractional(1));
        assert!(!point.is_fractional(2));
        assert!(!point.is_fractional(3));
        assert_eq!(1, point.nb_fractional_vars());
    }
    #[test]
    fn the_weight_is_the_scaled_slack_rounded_up() {
        let host = TestHost::new(vec![0.3, 0.4, 0.5, 0.8]);
        let point = FractionalPoint::new(&host, &SeparatorConfig::default());
        assert_eq!(300, point.weight(0, 1));
        assert_eq!(0, point.weight(2, 6));
        // 1 - 0.7 - 0.8 < 0
        assert_eq!(0, point.weight(4, 3));
    }
    #[test]
    fn the_weight_never_goes_below_the_floor() {
        let host = TestHost::new(vec![0.5, 0.5]);
        let config = SeparatorConfig { min_arc_weight: 7, ..Default::default() };
        let point = FractionalPoint::new(&host, &config);
        assert_eq!(7, point.weight(0, 1));
    }
    #[test]
    fn an_arc_to_the_own_negation_weighs_nothing() {
        let host = TestHost::new(vec![0.1, 0.5]);
        let config = SeparatorConfig { min_arc_weight: 7, ..Default::default() };
        let point = FractionalPoint::new(&host, &config);
        assert_eq!(0, point.weight(0, 2));
        assert_eq!(0, point.weight(2, 0));
    }
    #[test]
    fn an_upper_implication_yields_the_positive_node() {
        let mut host = TestHost::new(vec![0.5, 0.5]);
        host.conflict(pos(0), pos(1));
        let point = FractionalPoint::new(&host, &SeparatorConfig::default());
        assert_eq!(vec![(1, 0)], conflicts_of(&host, &point, 0));
        assert_eq!(vec![(0, 0)], conflicts_of(&host, &point, 1));
    }
    #[test]
    fn a_lower_implication_yields_the_negated_node() {
        let mut host = TestHost::new(vec![0.5, 0.25]);
        host.conflict(pos(0), neg(1));
        let point = FractionalPoint::new(&host, &SeparatorConfig::default());
        // 1 - 0.5 - 0.75 < 0
        assert_eq!(vec![(3, 0)], conflicts_of(&host, &point, 0));
        assert_eq!(vec![(0, 0)], conflicts_of(&host, &point, 3));
        assert!(conflicts_of(&host, &point, 1).is_empty());
    }
    #[test]
    fn clique_members_yield_the_node_of_their_polarity() {
        let mut host = TestHost::new(vec![0.2, 0.3, 0.4]);
        host.clique(vec![pos(0), neg(1), pos(2)]);
        let point = FractionalPoint::new(&host, &SeparatorConfig::default());
        // 1 - 0.2 - 0.7 = 0.1 ; 1 - 0.2 - 0.4 = 0.4
        assert_eq!(vec![(2, 400), (4, 100)], conflicts_of(&host, &point, 0));
    }
    #[test]
    fn a_conflict_reported_twice_is_enumerated_once() {
        let mut host = TestHost::new(vec![0.5, 0.5, 0.5]);
        host.conflict(pos(0), pos(1));
        host.clique(vec![pos(0), pos(1), pos(2)]);
        let point = FractionalPoint::new(&host, &SeparatorConfig::default());
        assert_eq!(vec![(1, 0), (2, 0)], conflicts_of(&host, &point, 0));
    }
    #[test]
    fn integral_partners_are_never_enumerated() {
        let mut host = TestHost::new(vec![0.5, 1.0, 0.5]);
        host.clique(vec![pos(0), pos(1), pos(2)]);
        let point = FractionalPoint::new(&host, &SeparatorConfig::default());
        assert_eq!(vec![(2, 0)], conflicts_of(&host, &point, 0));
    }
    #[test]
    fn the_variable_itself_is_never_enumerated() {
        let mut host = TestHost::new(vec![0.5, 0.5]);
        host.clique(vec![pos(0), neg(0), pos(1)]);
        let point = FractionalPoint::new(&host, &SeparatorConfig::default());
        assert_eq!(vec![(1, 0)], conflicts_of(&host, &point, 0));
    }
}
