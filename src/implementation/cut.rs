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

//! This module turns cleaned cycles into the inequalities handed over to the
//! host: odd cycle cuts (possibly lifted) and variable fixings.

use crate::{is_negated, variable_of, BoundType, Cut, Variable};

/// Builds the inequality `sum(l for l in cycle) + sum(c * l for (l, c) in lifted) <= (k - 1) / 2`
/// over the literals of the cycle and the lifted literals, and rewrites it
/// over the variables: a negated literal `1 - x` contributes `-c` to the
/// coefficient of `x` and `-c` to the right hand side.
pub fn odd_cycle_cut(cycle: &[usize], lifted: &[(usize, usize)], nb_vars: usize) -> Cut {
    debug_assert!(cycle.len() % 2 == 1, "an odd cycle must have an odd length");
    let mut coefficients = Vec::with_capacity(cycle.len() + lifted.len());
    let mut negated = 0.0;

    let terms = cycle.iter().map(|&node| (node, 1.0))
        .chain(lifted.iter().map(|&(node, c)| (node, c as f64)));
    for (node, c) in terms {
        let var = variable_of(node, nb_vars);
        if is_negated(node, nb_vars) {
            coefficients.push((var, -c));
            negated += c;
        } else {
            coefficients.push((var, c));
        }
    }
    let rhs = ((cycle.len() - 1) / 2) as f64 - negated;
    Cut { coefficients, rhs }
}

/// The bound change implied by a cycle that shrank down to its start node:
/// that literal conflicts with both polarities of some variable, hence it
/// must be false.
pub fn fixing(start: usize, nb_vars: usize) -> (Variable, BoundType, f64) {
    let var = variable_of(start, nb_vars);
    if is_negated(start, nb_vars) {
        (var, BoundType::Lower, 1.0)
    } else {
        (var, BoundType::Upper, 0.0)
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_cut {
    use crate::*;
    use super::*;

    #[test]
    fn a_positive_triangle_yields_the_clique_inequality() {
        let cut = odd_cycle_cut(&[0, 1, 2], &[], 3);
        assert_eq!(vec![(Variable(0), 1.0), (Variable(1), 1.0), (Variable(2), 1.0)], cut.coefficients);
        assert_eq!(1.0, cut.rhs);
    }
    #[test]
    fn negated_literals_get_a_negative_coefficient_and_lower_the_rhs() {
        // x0 + (1 - x1) + x2 + (1 - x3) + x4 <= 2
        let cut = odd_cycle_cut(&[0, 6, 2, 8, 4], &[], 5);
        assert_eq!((Variable(1), -1.0), cut.coefficients[1]);
        assert_eq!((Variable(3), -1.0), cut.coefficients[3]);
        assert_eq!(0.0, cut.rhs);
    }
    #[test]
    fn lifted_literals_carry_their_coefficient() {
        let cut = odd_cycle_cut(&[0, 1, 2, 3, 4], &[(5, 2)], 6);
        assert_eq!((Variable(5), 2.0), cut.coefficients[5]);
        assert_eq!(2.0, cut.rhs);
    }
    #[test]
    fn negated_lifted_literals_lower_the_rhs_by_their_coefficient() {
        let cut = odd_cycle_cut(&[0, 1, 2, 3, 4], &[(11, 2)], 6);
        assert_eq!((Variable(5), -2.0), cut.coefficients[5]);
        assert_eq!(0.0, cut.rhs);
    }
    #[test]
    fn the_five_cycle_cut_is_violated_by_the_half_point_and_valid_for_integral_points() {
        let cut = odd_cycle_cut(&[0, 1, 2, 3, 4], &[], 5);
        assert!(cut.efficacy(|_| 0.5) > 0.0);
        for bits in 0_u32..32 {
            let x = |v: Variable| ((bits >> v.id()) & 1) as f64;
            let feasible = (0..5).all(|i| x(Variable(i)) + x(Variable((i + 1) % 5)) <= 1.0);
            if feasible {
                assert!(cut.activity(x) <= cut.rhs);
            }
        }
    }
    #[test]
    fn a_positive_start_is_fixed_to_zero() {
        assert_eq!((Variable(2), BoundType::Upper, 0.0), fixing(2, 5));
    }
    #[test]
    fn a_negated_start_is_fixed_to_one() {
        assert_eq!((Variable(2), BoundType::Lower, 1.0), fixing(7, 5));
    }
}
