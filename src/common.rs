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

//! This module defines the most basic data types that are used throughout all
//! the code of our library (both at the abstraction and implementation levels).
//! These are also the types a host solver is likely to work with.
//!
//! Internally, the separator never manipulates `Literal`s directly. It works
//! with *polarity nodes* instead: plain `usize` indices in `0..2n` where `i`
//! stands for the variable `i` itself and `i + n` for its negation. The free
//! functions at the end of the `LITERAL` section convert between both views.

// ----------------------------------------------------------------------------
// --- VARIABLE ---------------------------------------------------------------
// ----------------------------------------------------------------------------
/// This type denotes a binary variable from the problem at hand. Each variable
/// is identified with an integer ranging from 0 until `host.nb_vars()`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Variable(pub usize);
impl Variable {
    #[inline]
    /// This function returns the id (numeric value) of the variable.
    ///
    /// # Examples:
    /// ```
    /// # use oddcycle::Variable;
    /// assert_eq!(0, Variable(0).id());
    /// assert_eq!(1, Variable(1).id());
    /// assert_eq!(2, Variable(2).id());
    /// ```
    pub fn id(self) -> usize {
        self.0
    }
}

// ----------------------------------------------------------------------------
// --- LITERAL ----------------------------------------------------------------
// ----------------------------------------------------------------------------
/// A literal is one of the two polarities of a binary variable: either the
/// variable itself (`value == true`) or its negation (`value == false`).
/// Conflicts are always expressed between literals: two conflicting literals
/// cannot both be true at the same time.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Literal {
    pub variable: Variable,
    pub value   : bool,
}
impl Literal {
    /// The literal `var == 1`
    pub fn positive(variable: Variable) -> Self {
        Self { variable, value: true }
    }
    /// The literal `var == 0`
    pub fn negative(variable: Variable) -> Self {
        Self { variable, value: false }
    }
    /// The opposite polarity of the same variable
    pub fn negation(self) -> Self {
        Self { variable: self.variable, value: !self.value }
    }
    /// The polarity node standing for this literal in a problem with `n`
    /// binary variables.
    #[inline]
    pub fn node(self, n: usize) -> usize {
        if self.value { self.variable.id() } else { self.variable.id() + n }
    }
    /// The literal denoted by the given polarity node.
    #[inline]
    pub fn from_node(node: usize, n: usize) -> Self {
        if node < n {
            Self::positive(Variable(node))
        } else {
            Self::negative(Variable(node - n))
        }
    }
}

/// Returns the polarity node of the negation of `node`.
#[inline]
pub fn negation(node: usize, n: usize) -> usize {
    if node < n { node + n } else { node - n }
}
/// Returns the variable underlying the given polarity node.
#[inline]
pub fn variable_of(node: usize, n: usize) -> Variable {
    Variable(node % n)
}
/// Returns true iff the given polarity node denotes a negated variable.
#[inline]
pub fn is_negated(node: usize, n: usize) -> bool {
    node >= n
}

// ----------------------------------------------------------------------------
// --- IMPLICATIONS AND CLIQUES -----------------------------------------------
// ----------------------------------------------------------------------------
/// The bound an implication fixes its implied variable to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum BoundType {
    /// The implied variable is pushed to its lower bound: `y >= 1`.
    Lower,
    /// The implied variable is pushed to its upper bound: `y <= 0`.
    Upper,
}

/// A binary implication `x == value  =>  variable <= 0` (`Upper`) or
/// `x == value  =>  variable >= 1` (`Lower`). The antecedent is implicit: it
/// is the literal for which the host enumerates its implications.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Implication {
    pub variable: Variable,
    pub bound   : BoundType,
}
impl Implication {
    /// The literal which conflicts with the antecedent of this implication.
    /// (`x => y <= 0` means that `x` conflicts with `y`, while `x => y >= 1`
    /// means that `x` conflicts with `not y`).
    pub fn conflicting(self) -> Literal {
        match self.bound {
            BoundType::Upper => Literal::positive(self.variable),
            BoundType::Lower => Literal::negative(self.variable),
        }
    }
}

/// A clique is a set of literals among which at most one can be true.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Clique {
    pub members: Vec<Literal>,
}
impl Clique {
    pub fn new(members: Vec<Literal>) -> Self {
        Self { members }
    }
}

// ----------------------------------------------------------------------------
// --- CUT --------------------------------------------------------------------
// ----------------------------------------------------------------------------
/// A linear inequality `sum(coef * var) <= rhs` over the original binary
/// variables. This is what the separator hands over to the host.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cut {
    /// Each variable occurs at most once
    pub coefficients: Vec<(Variable, f64)>,
    pub rhs: f64,
}
impl Cut {
    /// The left hand side of the inequality evaluated at the given point.
    pub fn activity<F: Fn(Variable) -> f64>(&self, value: F) -> f64 {
        self.coefficients.iter().map(|(v, c)| c * value(*v)).sum()
    }
    /// The euclidean norm of the coefficient vector.
    pub fn norm(&self) -> f64 {
        self.coefficients.iter().map(|(_, c)| c * c).sum::<f64>().sqrt()
    }
    /// The distance between the given point and the hyperplane of the cut,
    /// positive iff the point violates the cut.
    pub fn efficacy<F: Fn(Variable) -> f64>(&self, value: F) -> f64 {
        let norm = self.norm();
        if norm == 0.0 {
            0.0
        } else {
            (self.activity(value) - self.rhs) / norm
        }
    }
}

// ----------------------------------------------------------------------------
// --- Results ----------------------------------------------------------------
// ----------------------------------------------------------------------------
/// The outcome of one call to the separator
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Outcome {
    /// The call was skipped (round limits, too few binary or fractional
    /// variables, no conflict information at all).
    DidNotRun,
    /// The search ran but no cut was added
    DidNotFind,
    /// At least one cut was accepted by the host
    Separated,
    /// A degenerate cycle allowed fixing a variable
    ReducedDomain,
}

/// Cumulative counters of one separator instance.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Statistics {
    /// Number of separation calls that actually ran
    pub nb_calls: usize,
    /// Number of cuts accepted by the host
    pub nb_cuts: usize,
    /// Number of accepted cuts which carry at least one lifted literal
    pub nb_lifted_cuts: usize,
    /// Number of variables fixed because of degenerate cycles
    pub nb_fixings: usize,
    /// Number of roots (or the whole classical graph) abandoned because the
    /// memory ceiling was hit
    pub nb_aborts: usize,
}
impl Statistics {
    /// Percentage of accepted cuts that have been lifted
    pub fn lifted_ratio(&self) -> f64 {
        if self.nb_cuts == 0 {
            0.0
        } else {
            100.0 * self.nb_lifted_cuts as f64 / self.nb_cuts as f64
        }
    }
}


// ############################################################################
// #### TESTS #################################################################
// ############################################################################
