//! Greedy construction heuristic.
//!
//! # Algorithm
//!
//! 1. Rank facilities by the efficiency ratio `fixed_cost / capacity`,
//!    ascending.
//! 2. Open facilities in that order until open capacity covers total demand.
//! 3. Assign every customer to its cheapest open facility.
//!
//! The result may be infeasible: step 3 ignores remaining capacity, and an
//! instance short on total capacity opens every facility and still
//! overloads. The tabu search accepts either case as a starting point.
//!
//! # Reference
//!
//! Jacobsen, S. K. (1983). "Heuristics for the capacitated plant location
//! model", *European Journal of Operational Research* 12(3), 253-261.

use crate::problem::Problem;
use crate::solution::Solution;

/// Builds an initial solution by efficiency-ordered opening and
/// cheapest-facility assignment.
///
/// # Examples
///
/// ```
/// use u_facloc::constructive::greedy_construct;
/// use u_facloc::problem::Problem;
///
/// let problem = Problem::new(
///     vec![10.0, 10.0, 10.0],
///     vec![5.0, 5.0, 50.0],
///     vec![4.0, 4.0, 4.0, 4.0],
///     vec![
///         vec![1.0, 1.0, 1.0, 1.0],
///         vec![2.0, 2.0, 2.0, 2.0],
///         vec![9.0, 9.0, 9.0, 9.0],
///     ],
/// )
/// .unwrap();
///
/// let initial = greedy_construct(&problem);
/// // The two efficient facilities cover the 16 units of demand.
/// assert_eq!(initial.open_facilities, vec![0, 1]);
/// ```
pub fn greedy_construct(problem: &Problem) -> Solution {
    let m = problem.num_facilities();
    let n = problem.num_customers();

    let mut ranked: Vec<usize> = (0..m).collect();
    ranked.sort_by(|&a, &b| {
        let ra = problem.fixed_cost(a) / problem.capacity(a);
        let rb = problem.fixed_cost(b) / problem.capacity(b);
        ra.total_cmp(&rb)
    });

    let total_demand = problem.total_demand();
    let mut open = Vec::new();
    let mut opened_capacity = 0.0;
    for &i in &ranked {
        if opened_capacity >= total_demand {
            break;
        }
        open.push(i);
        opened_capacity += problem.capacity(i);
    }

    let assignments: Vec<usize> = (0..n)
        .map(|j| problem.cheapest_open_facility(&open, j))
        .collect();

    Solution::evaluated(problem, assignments, &open)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opens_in_efficiency_order() {
        // Ratios: 0.5, 0.5, 5.0 — the expensive third facility stays closed.
        let p = Problem::new(
            vec![10.0, 10.0, 10.0],
            vec![5.0, 5.0, 50.0],
            vec![4.0, 4.0, 4.0, 4.0],
            vec![
                vec![1.0, 1.0, 1.0, 1.0],
                vec![2.0, 2.0, 2.0, 2.0],
                vec![9.0, 9.0, 9.0, 9.0],
            ],
        )
        .unwrap();
        let sol = greedy_construct(&p);
        assert_eq!(sol.open_facilities, vec![0, 1]);
        assert!((sol.total_fixed_cost - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_assigns_to_cheapest_open() {
        let p = Problem::new(
            vec![20.0, 20.0],
            vec![2.0, 2.0],
            vec![5.0, 5.0],
            vec![vec![1.0, 8.0], vec![8.0, 1.0]],
        )
        .unwrap();
        let sol = greedy_construct(&p);
        // 10 units of demand need both 20-capacity facilities? No — one
        // suffices, so only the first-ranked opens and serves everyone.
        assert_eq!(sol.open_facilities.len(), 1);
        let f = sol.open_facilities[0];
        assert!(sol.assignments.iter().all(|&i| i == f));
    }

    #[test]
    fn test_stops_opening_once_covered() {
        let p = Problem::new(
            vec![10.0, 10.0, 10.0],
            vec![1.0, 2.0, 3.0],
            vec![9.0, 9.0],
            vec![
                vec![1.0, 1.0],
                vec![1.0, 1.0],
                vec![1.0, 1.0],
            ],
        )
        .unwrap();
        let sol = greedy_construct(&p);
        // 18 demand, facilities ranked 0, 1, 2: two openings reach 20.
        assert_eq!(sol.open_facilities, vec![0, 1]);
    }

    #[test]
    fn test_insufficient_capacity_opens_everything() {
        let p = Problem::new(
            vec![5.0, 5.0],
            vec![1.0, 1.0],
            vec![4.0, 4.0, 4.0],
            vec![vec![1.0, 1.0, 1.0], vec![2.0, 2.0, 2.0]],
        )
        .unwrap();
        let sol = greedy_construct(&p);
        assert_eq!(sol.open_facilities, vec![0, 1]);
        assert!(!sol.is_feasible);
        assert!(sol.total_violation > 0.0);
    }

    #[test]
    fn test_feasible_when_assignment_fits() {
        let p = Problem::new(
            vec![10.0, 10.0],
            vec![3.0, 3.0],
            vec![6.0, 6.0],
            vec![vec![1.0, 9.0], vec![9.0, 1.0]],
        )
        .unwrap();
        let sol = greedy_construct(&p);
        assert!(sol.is_feasible);
        assert!((sol.total_assignment_cost - 2.0).abs() < 1e-12);
    }
}
