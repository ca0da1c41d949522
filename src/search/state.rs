//! Mutable search state.
//!
//! One [`SearchState`] lives for the duration of a run and is mutated in
//! place by move application and perturbation. Every mutation keeps the
//! assignment, the open set, per-facility counts and loads, and the three
//! cost aggregates mutually consistent, so the objective is always a cheap
//! field read rather than a recomputation.

use super::moves::Move;
use crate::problem::Problem;
use crate::solution::Solution;

/// Change in a facility's capacity overload when its load moves from
/// `old_load` to `new_load`.
pub fn violation_delta(old_load: f64, new_load: f64, capacity: f64) -> f64 {
    (new_load - capacity).max(0.0) - (old_load - capacity).max(0.0)
}

/// Live solution state: assignment, open set, and derived aggregates.
#[derive(Debug, Clone)]
pub struct SearchState {
    /// Facility serving each customer.
    pub assignments: Vec<usize>,
    /// Number of customers assigned to each facility.
    pub counts: Vec<usize>,
    /// Demand carried by each facility.
    pub loads: Vec<f64>,
    /// Open facility indices, kept sorted ascending.
    pub open: Vec<usize>,
    /// Open-facility membership mask.
    pub is_open: Vec<bool>,
    /// Sum of fixed costs over the open set.
    pub total_fixed: f64,
    /// Sum of per-pair assignment costs.
    pub total_assignment: f64,
    /// Sum of per-facility capacity overloads.
    pub total_violation: f64,
    /// `total_fixed + total_assignment + alpha * total_violation`, using
    /// the alpha in effect at the last mutation.
    pub objective: f64,
    /// True iff `total_violation` is zero.
    pub feasible: bool,
}

impl SearchState {
    /// Builds the state from a caller-supplied assignment and open set.
    ///
    /// Facilities referenced by the assignment are opened even when absent
    /// from `declared_open`, so the open set always covers the assignment.
    pub fn build(
        problem: &Problem,
        assignments: &[usize],
        declared_open: &[usize],
        alpha: f64,
    ) -> Self {
        let m = problem.num_facilities();
        debug_assert_eq!(assignments.len(), problem.num_customers());

        let mut is_open = vec![false; m];
        for &i in declared_open {
            is_open[i] = true;
        }
        for &i in assignments {
            is_open[i] = true;
        }
        let open: Vec<usize> = (0..m).filter(|&i| is_open[i]).collect();

        let mut counts = vec![0usize; m];
        let mut loads = vec![0.0; m];
        let mut total_assignment = 0.0;
        for (j, &i) in assignments.iter().enumerate() {
            counts[i] += 1;
            loads[i] += problem.demand(j);
            total_assignment += problem.assignment_cost(i, j);
        }
        let total_fixed: f64 = open.iter().map(|&i| problem.fixed_cost(i)).sum();
        let total_violation: f64 = (0..m)
            .map(|i| (loads[i] - problem.capacity(i)).max(0.0))
            .sum();

        let mut state = Self {
            assignments: assignments.to_vec(),
            counts,
            loads,
            open,
            is_open,
            total_fixed,
            total_assignment,
            total_violation,
            objective: 0.0,
            feasible: false,
        };
        state.refresh_objective(alpha);
        state
    }

    /// Recomputes the cached objective and feasibility flag from the
    /// aggregates, using the given penalty coefficient.
    pub fn refresh_objective(&mut self, alpha: f64) {
        self.objective = self.total_fixed + self.total_assignment + alpha * self.total_violation;
        self.feasible = self.total_violation == 0.0;
    }

    /// An owned snapshot sharing no storage with the live state.
    pub fn snapshot(&self) -> Solution {
        Solution {
            assignments: self.assignments.clone(),
            open_facilities: self.open.clone(),
            total_fixed_cost: self.total_fixed,
            total_assignment_cost: self.total_assignment,
            total_violation: self.total_violation,
            is_feasible: self.feasible,
        }
    }

    fn insert_open(&mut self, facility: usize) {
        if !self.is_open[facility] {
            self.is_open[facility] = true;
            let pos = self.open.partition_point(|&i| i < facility);
            self.open.insert(pos, facility);
        }
    }

    fn remove_open(&mut self, facility: usize) {
        if self.is_open[facility] {
            self.is_open[facility] = false;
            let pos = self.open.partition_point(|&i| i < facility);
            self.open.remove(pos);
        }
    }

    /// Commits a move, updating every aggregate by its delta.
    ///
    /// Only the loads and violations of the one or two affected facilities
    /// are touched; the open set grows or shrinks when an assignee count
    /// crosses zero.
    pub fn apply(&mut self, problem: &Problem, mv: &Move, alpha: f64) {
        match *mv {
            Move::Relocate { customer, from, to } => {
                let demand = problem.demand(customer);
                self.total_assignment += problem.assignment_cost(to, customer)
                    - problem.assignment_cost(from, customer);

                let to_was_closed = !self.is_open[to];
                let from_empties = self.counts[from] == 1;
                if to_was_closed {
                    self.total_fixed += problem.fixed_cost(to);
                    self.insert_open(to);
                }
                self.assignments[customer] = to;
                self.counts[from] -= 1;
                self.counts[to] += 1;
                if from_empties {
                    self.total_fixed -= problem.fixed_cost(from);
                    self.remove_open(from);
                }

                let from_old = self.loads[from];
                let to_old = self.loads[to];
                self.loads[from] -= demand;
                self.loads[to] += demand;
                self.total_violation +=
                    violation_delta(from_old, self.loads[from], problem.capacity(from))
                        + violation_delta(to_old, self.loads[to], problem.capacity(to));
            }
            Move::Swap {
                first,
                second,
                first_facility,
                second_facility,
            } => {
                let d1 = problem.demand(first);
                let d2 = problem.demand(second);
                self.total_assignment += problem.assignment_cost(second_facility, first)
                    - problem.assignment_cost(first_facility, first)
                    + problem.assignment_cost(first_facility, second)
                    - problem.assignment_cost(second_facility, second);

                // Both facilities keep an assignee; fixed cost and the open
                // set are untouched.
                let k_old = self.loads[first_facility];
                let l_old = self.loads[second_facility];
                self.loads[first_facility] = k_old - d1 + d2;
                self.loads[second_facility] = l_old - d2 + d1;
                self.total_violation += violation_delta(
                    k_old,
                    self.loads[first_facility],
                    problem.capacity(first_facility),
                ) + violation_delta(
                    l_old,
                    self.loads[second_facility],
                    problem.capacity(second_facility),
                );

                self.assignments[first] = second_facility;
                self.assignments[second] = first_facility;
            }
        }
        self.refresh_objective(alpha);
    }

    /// Replaces the open set. Loads, counts, and aggregates are left stale;
    /// callers follow up with [`SearchState::reassign_all_to_cheapest`].
    pub fn set_open_set(&mut self, mut open: Vec<usize>) {
        open.sort_unstable();
        open.dedup();
        self.is_open.fill(false);
        for &i in &open {
            self.is_open[i] = true;
        }
        self.open = open;
    }

    /// Reassigns every customer to its cheapest open facility and rebuilds
    /// all aggregates from scratch with the given penalty coefficient.
    pub fn reassign_all_to_cheapest(&mut self, problem: &Problem, alpha: f64) {
        let m = problem.num_facilities();
        self.counts.fill(0);
        self.loads.fill(0.0);
        let mut total_assignment = 0.0;
        for j in 0..problem.num_customers() {
            let best = problem.cheapest_open_facility(&self.open, j);
            self.assignments[j] = best;
            self.counts[best] += 1;
            self.loads[best] += problem.demand(j);
            total_assignment += problem.assignment_cost(best, j);
        }
        self.total_assignment = total_assignment;
        self.total_fixed = self.open.iter().map(|&i| problem.fixed_cost(i)).sum();
        self.total_violation = (0..m)
            .map(|i| (self.loads[i] - problem.capacity(i)).max(0.0))
            .sum();
        self.refresh_objective(alpha);
    }
}
