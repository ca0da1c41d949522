//! Greedy facility-closing cleanup.
//!
//! # Algorithm
//!
//! 1. Order the open facilities by descending fixed cost.
//! 2. For each, tentatively close it and reassign every customer to the
//!    cheapest remaining open facility.
//! 3. Keep the closure iff the result is still feasible and strictly
//!    cheaper; otherwise revert.
//! 4. Repeat the pass until it accepts no closure.
//!
//! At least one facility always stays open. Infeasible inputs are returned
//! untouched: closing facilities can only worsen an overload.

use crate::problem::Problem;
use crate::solution::Solution;

/// Tries to close expensive facilities on a feasible solution, returning a
/// solution that is never worse than the input.
///
/// # Examples
///
/// ```
/// use u_facloc::problem::Problem;
/// use u_facloc::search::greedy_drop;
/// use u_facloc::solution::Solution;
///
/// // Facility 1 is pure overhead: facility 0 can carry everyone cheaper.
/// let problem = Problem::new(
///     vec![20.0, 20.0],
///     vec![3.0, 30.0],
///     vec![5.0, 5.0],
///     vec![vec![1.0, 1.0], vec![1.0, 1.0]],
/// )
/// .unwrap();
/// let bloated = Solution::evaluated(&problem, vec![0, 1], &[0, 1]);
/// let trimmed = greedy_drop(&problem, &bloated);
/// assert_eq!(trimmed.open_facilities, vec![0]);
/// assert!(trimmed.total_cost() < bloated.total_cost());
/// ```
pub fn greedy_drop(problem: &Problem, solution: &Solution) -> Solution {
    if !solution.is_feasible || solution.open_facilities.len() <= 1 {
        return solution.clone();
    }

    let n = problem.num_customers();
    let mut best = solution.clone();
    loop {
        let mut accepted = false;

        let mut order = best.open_facilities.clone();
        order.sort_by(|&a, &b| problem.fixed_cost(b).total_cmp(&problem.fixed_cost(a)));

        for facility in order {
            if best.open_facilities.len() <= 1 {
                break;
            }
            // May already be gone from an earlier acceptance this pass.
            if !best.open_facilities.contains(&facility) {
                continue;
            }

            let remaining: Vec<usize> = best
                .open_facilities
                .iter()
                .copied()
                .filter(|&i| i != facility)
                .collect();
            let assignments: Vec<usize> = (0..n)
                .map(|j| problem.cheapest_open_facility(&remaining, j))
                .collect();
            let candidate = Solution::evaluated(problem, assignments, &remaining);

            if candidate.is_feasible && candidate.total_cost() < best.total_cost() {
                best = candidate;
                accepted = true;
            }
        }

        if !accepted {
            break;
        }
    }
    best
}
