//! Solution snapshot types.

use crate::problem::Problem;

/// A complete assignment of customers to facilities with its derived costs.
///
/// Snapshots are fully owned: the search engine hands out copies that never
/// alias its internal state, so a stored best solution cannot be mutated by
/// later iterations.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    /// Facility serving each customer (`assignments[j]` = facility index).
    pub assignments: Vec<usize>,
    /// Open facility indices, ascending.
    pub open_facilities: Vec<usize>,
    /// Sum of fixed costs over open facilities.
    pub total_fixed_cost: f64,
    /// Sum of per-pair assignment costs.
    pub total_assignment_cost: f64,
    /// Sum of per-facility capacity overloads.
    pub total_violation: f64,
    /// True iff no facility is loaded beyond its capacity.
    pub is_feasible: bool,
}

impl Solution {
    /// Builds a solution from an assignment and open set, recomputing every
    /// aggregate from scratch.
    ///
    /// Facilities referenced by `assignments` are opened even when missing
    /// from `open_facilities`, so the open set always covers the assignment.
    pub fn evaluated(problem: &Problem, assignments: Vec<usize>, open_facilities: &[usize]) -> Self {
        let m = problem.num_facilities();
        let mut is_open = vec![false; m];
        for &i in open_facilities {
            is_open[i] = true;
        }
        for &i in &assignments {
            is_open[i] = true;
        }
        let open: Vec<usize> = (0..m).filter(|&i| is_open[i]).collect();

        let mut loads = vec![0.0; m];
        let mut assignment_cost = 0.0;
        for (j, &i) in assignments.iter().enumerate() {
            loads[i] += problem.demand(j);
            assignment_cost += problem.assignment_cost(i, j);
        }
        let fixed_cost: f64 = open.iter().map(|&i| problem.fixed_cost(i)).sum();
        let violation: f64 = (0..m)
            .map(|i| (loads[i] - problem.capacity(i)).max(0.0))
            .sum();

        Self {
            assignments,
            open_facilities: open,
            total_fixed_cost: fixed_cost,
            total_assignment_cost: assignment_cost,
            total_violation: violation,
            is_feasible: violation == 0.0,
        }
    }

    /// Total true cost: fixed plus assignment, excluding any penalty term.
    pub fn total_cost(&self) -> f64 {
        self.total_fixed_cost + self.total_assignment_cost
    }

    /// Per-facility capacity overloads as `(facility, excess)` pairs,
    /// ascending by facility index. Empty for feasible solutions.
    pub fn capacity_violations(&self, problem: &Problem) -> Vec<(usize, f64)> {
        let mut loads = vec![0.0; problem.num_facilities()];
        for (j, &i) in self.assignments.iter().enumerate() {
            loads[i] += problem.demand(j);
        }
        (0..problem.num_facilities())
            .filter_map(|i| {
                let excess = loads[i] - problem.capacity(i);
                (excess > 0.0).then_some((i, excess))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn problem() -> Problem {
        Problem::new(
            vec![10.0, 10.0],
            vec![5.0, 7.0],
            vec![6.0, 6.0, 6.0],
            vec![vec![1.0, 2.0, 3.0], vec![3.0, 2.0, 1.0]],
        )
        .unwrap()
    }

    #[test]
    fn test_evaluated_aggregates() {
        let p = problem();
        let sol = Solution::evaluated(&p, vec![0, 0, 1], &[0, 1]);
        assert_eq!(sol.open_facilities, vec![0, 1]);
        assert!((sol.total_fixed_cost - 12.0).abs() < 1e-12);
        assert!((sol.total_assignment_cost - 4.0).abs() < 1e-12);
        // Facility 0 carries 12 demand against capacity 10
        assert!((sol.total_violation - 2.0).abs() < 1e-12);
        assert!(!sol.is_feasible);
        assert!((sol.total_cost() - 16.0).abs() < 1e-12);
    }

    #[test]
    fn test_evaluated_opens_referenced_facilities() {
        let p = problem();
        // Facility 1 is used by the assignment but not declared open
        let sol = Solution::evaluated(&p, vec![0, 1, 1], &[0]);
        assert_eq!(sol.open_facilities, vec![0, 1]);
        assert!((sol.total_fixed_cost - 12.0).abs() < 1e-12);
        assert!(sol.is_feasible);
    }

    #[test]
    fn test_capacity_violations() {
        let p = problem();
        let overloaded = Solution::evaluated(&p, vec![0, 0, 0], &[0]);
        let viols = overloaded.capacity_violations(&p);
        assert_eq!(viols.len(), 1);
        assert_eq!(viols[0].0, 0);
        assert!((viols[0].1 - 8.0).abs() < 1e-12);

        let ok = Solution::evaluated(&p, vec![0, 1, 1], &[0, 1]);
        assert!(ok.capacity_violations(&p).is_empty());
    }
}
