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

//! This module defines the knobs that drive the behavior of an
//! `OddCycleSeparator`. The easiest way to obtain a configuration is through
//! the generated `SeparatorConfigBuilder`: any field left unset takes the
//! value of `SeparatorConfig::default()`.
//!
//! # Example
//! ```
//! # use oddcycle::*;
//! let config = SeparatorConfigBuilder::default()
//!     .method(Method::LevelGraph)
//!     .lift(true)
//!     .max_levels(10_usize)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(Method::LevelGraph, config.method);
//! assert!(config.lift);
//! assert_eq!(1000, config.scale);
//! ```

use derive_builder::Builder;

/// The strategy used to look for odd cycles
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Method {
    /// Shortest paths in the bipartite bijection graph (four copies of each
    /// variable). Exact: from a given start node, it finds a minimum weight
    /// odd closed walk.
    #[default]
    Classical,
    /// Heuristic search in a level graph grown breadth first from each root.
    /// Uses much less memory on large problems.
    LevelGraph,
}

/// The order in which the separator tries its roots (level graph method) or
/// start nodes (classical method).
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RootOrder {
    /// Natural variable order, resuming where the previous call stopped
    Unsorted,
    /// Decreasing LP value
    MaxLpValue,
    /// Increasing LP value
    MinLpValue,
    /// Decreasing fractionality `min(x, 1 - x)`
    #[default]
    MaxFractionality,
    /// Increasing fractionality `min(x, 1 - x)`
    MinFractionality,
}

/// The parameters of an odd cycle separator.
#[derive(Debug, Clone, PartialEq, Builder)]
#[builder(default, build_fn(validate = "Self::validate"))]
pub struct SeparatorConfig {
    /// Which graph (and search) to use
    pub method: Method,
    /// Strengthen the cuts with lifted variables
    pub lift: bool,
    /// Factor applied to `1 - x - y` before rounding it to an integer weight
    pub scale: u64,
    /// Lower bound on the weight of every (non self) arc
    pub min_arc_weight: u64,
    /// Connect each literal to its own negation (weight 0)
    pub self_arcs: bool,
    /// Splice out a variable and its negation when both occur in a cycle
    /// instead of dropping the cycle
    pub repair_cycles: bool,
    /// Emit cuts for cycles of length 3
    pub include_triangles: bool,
    /// Also try variables that already occur in a cut of this round as roots
    pub search_multiple_cuts_per_node: bool,
    /// Accept cycles going through variables that already occur in a cut of
    /// this round
    pub allow_multiple_cuts_per_node: bool,
    /// Rank lifting candidates by `coefficient * lp value` instead of
    /// `coefficient`
    pub lp_weighted_lifting: bool,
    /// Recompute the coefficient of every candidate after each lifted variable
    pub lift_coef_per_step: bool,
    /// Maximum number of cuts per round (not at the root node)
    pub max_sepa_cuts: usize,
    /// Maximum number of cuts per round at the root node
    pub max_sepa_cuts_root: usize,
    /// Maximum number of rounds per branch-and-bound node (`None` = unlimited)
    pub max_rounds: Option<usize>,
    /// Maximum number of rounds at the root node (`None` = unlimited)
    pub max_rounds_root: Option<usize>,
    /// Percentage of the polarity nodes tried as roots
    pub percent_testvars: usize,
    /// Number of roots tried on top of `percent_testvars`
    pub offset_testvars: usize,
    /// In which order the roots are tried
    pub root_order: RootOrder,
    /// Fill the first level with the root neighbors of highest fractionality
    pub sort_root_neighbors: bool,
    /// Percentage of the polarity nodes allowed in one level
    pub percent_nodes_per_level: usize,
    /// Number of nodes allowed in one level on top of `percent_nodes_per_level`
    pub offset_nodes_per_level: usize,
    /// Maximum number of levels of a level graph
    pub max_levels: usize,
    /// Maximum number of cuts found from one root
    pub max_cuts_per_root: usize,
    /// Maximum number of cuts found in one level
    pub max_cuts_per_level: usize,
    /// Cuts whose efficacy does not exceed this value are never submitted
    pub min_efficacy: f64,
    /// Ceiling (in bytes) on the memory used by one graph (`None` = unbounded)
    pub memory_limit: Option<usize>,
}

impl Default for SeparatorConfig {
    fn default() -> Self {
        Self {
            method                       : Method::Classical,
            lift                         : false,
            scale                        : 1000,
            min_arc_weight               : 0,
            self_arcs                    : true,
            repair_cycles                : true,
            include_triangles            : true,
            search_multiple_cuts_per_node: false,
            allow_multiple_cuts_per_node : true,
            lp_weighted_lifting          : false,
            lift_coef_per_step           : true,
            max_sepa_cuts                : 5000,
            max_sepa_cuts_root           : 5000,
            max_rounds                   : Some(10),
            max_rounds_root              : Some(10),
            percent_testvars             : 0,
            offset_testvars              : 100,
            root_order                   : RootOrder::MaxFractionality,
            sort_root_neighbors          : true,
            percent_nodes_per_level      : 100,
            offset_nodes_per_level       : 10,
            max_levels                   : 20,
            max_cuts_per_root            : 1,
            max_cuts_per_level           : 50,
            min_efficacy                 : 1e-4,
            memory_limit                 : None,
        }
    }
}

impl SeparatorConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(p) = self.percent_testvars {
            if p > 100 {
                return Err(format!("percent_testvars must be at most 100 (got {p})"));
            }
        }
        if let Some(p) = self.percent_nodes_per_level {
            if p > 100 {
                return Err(format!("percent_nodes_per_level must be at most 100 (got {p})"));
            }
        }
        if let Some(s) = self.scale {
            if s == 0 {
                return Err("scale must be at least 1".to_string());
            }
        }
        if let Some(e) = self.min_efficacy {
            if !e.is_finite() || e < 0.0 {
                return Err(format!("min_efficacy must be a non negative number (got {e})"));
            }
        }
        Ok(())
    }
}

impl SeparatorConfig {
    /// Number of roots (resp. start nodes) tried in one call when there are
    /// `nb_nodes` polarity nodes.
    pub fn max_roots(&self, nb_nodes: usize) -> usize {
        let extra = (nb_nodes * self.percent_testvars + 99) / 100;
        (self.offset_testvars + extra).min(nb_nodes)
    }
    /// Maximum number of nodes admitted in one level when there are `nb_nodes`
    /// polarity nodes.
    pub fn max_level_size(&self, nb_nodes: usize) -> usize {
        let extra = (nb_nodes * self.percent_nodes_per_level + 99) / 100;
        self.offset_nodes_per_level + extra
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
