//! Iterated tabu search execution engine.
//!
//! # Algorithm
//!
//! 1. Build the mutable state from the caller-supplied starting solution.
//! 2. At each iteration:
//!    a. Sample a relocate/swap neighborhood and score every candidate
//!       incrementally.
//!    b. Select the best candidate that is non-tabu or aspiration-admissible
//!       (feasible and strictly better than the best feasible found).
//!    c. Apply it, record the reversal in the tabu list, adapt the penalty.
//!    d. Track the best feasible solution and the stagnation counter; an
//!       iteration with no admissible candidate is a no-op that still
//!       counts as stagnation.
//!    e. On reaching the stagnation ceiling, perturb the open set and reset
//!       the counter.
//! 3. After the iteration budget, polish the best feasible solution with
//!    the greedy facility-closing pass.
//!
//! If no feasible state was ever reached, the final (penalized, infeasible)
//! state is returned so callers can inspect the residual overloads.

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::config::TabuConfig;
use super::moves::{evaluate, neighborhood, Move};
use super::penalty::PenaltyController;
use super::perturb::perturb;
use super::postprocess::greedy_drop;
use super::state::SearchState;
use super::tabu_list::TabuList;
use crate::problem::Problem;
use crate::solution::Solution;

/// Result of an iterated tabu search run.
#[derive(Debug, Clone)]
pub struct TabuResult {
    /// Best feasible solution found (after the greedy drop), or the final
    /// infeasible state when feasibility was never reached.
    pub best: Solution,
    /// Total iterations executed.
    pub iterations: usize,
    /// Iteration at which the best feasible solution was found.
    pub best_iteration: usize,
    /// Best-known objective at each iteration (infinite until the first
    /// feasible solution appears).
    pub cost_history: Vec<f64>,
    /// Externally supplied lower bound, stored for gap reporting only.
    pub lower_bound: Option<f64>,
}

impl TabuResult {
    /// Percentage gap of the best solution's cost over the lower bound,
    /// when a positive bound was supplied.
    pub fn gap(&self) -> Option<f64> {
        let lb = self.lower_bound?;
        (lb > 0.0).then(|| 100.0 * (self.best.total_cost() - lb) / lb)
    }
}

/// Iterated tabu search runner.
pub struct TabuSearch;

impl TabuSearch {
    /// Improves `initial` under the given configuration.
    ///
    /// The starting solution does not have to be feasible, and facilities
    /// referenced by its assignment are treated as open regardless of its
    /// open list. `lower_bound`, when given, is carried into the result for
    /// gap reporting and never influences the search.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_facloc::constructive::greedy_construct;
    /// use u_facloc::problem::Problem;
    /// use u_facloc::search::{TabuConfig, TabuSearch};
    ///
    /// let problem = Problem::new(
    ///     vec![10.0, 10.0],
    ///     vec![5.0, 5.0],
    ///     vec![4.0, 4.0, 4.0, 4.0],
    ///     vec![
    ///         vec![1.0, 1.0, 1.0, 1.0],
    ///         vec![2.0, 2.0, 2.0, 2.0],
    ///     ],
    /// )
    /// .unwrap();
    /// let initial = greedy_construct(&problem);
    /// let config = TabuConfig::default().with_max_iterations(50).with_seed(1);
    ///
    /// let result = TabuSearch::run(&problem, &initial, &config, Some(14.0));
    /// assert!(result.best.is_feasible);
    /// assert!(result.gap().is_some());
    /// ```
    pub fn run(
        problem: &Problem,
        initial: &Solution,
        config: &TabuConfig,
        lower_bound: Option<f64>,
    ) -> TabuResult {
        config.validate().expect("invalid TabuConfig");

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        let mut penalty = PenaltyController::new(config.alpha, config.epsilon);
        let mut tabu = TabuList::new(problem.num_customers(), problem.num_facilities());
        let mut state = SearchState::build(
            problem,
            &initial.assignments,
            &initial.open_facilities,
            penalty.alpha(),
        );

        let mut best_feasible: Option<Solution> = state.feasible.then(|| state.snapshot());
        let mut best_objective = if state.feasible {
            state.objective
        } else {
            f64::INFINITY
        };
        let mut best_iteration = 0;
        let mut stagnation = 0usize;
        let mut cost_history = Vec::with_capacity(config.max_iterations);

        for iteration in 0..config.max_iterations {
            let candidates = neighborhood(&state, problem, config.beta, &mut rng);

            let mut chosen: Option<Move> = None;
            let mut chosen_objective = f64::INFINITY;
            for mv in &candidates {
                let eval = evaluate(problem, &state, mv, penalty.alpha());
                if tabu.is_tabu(mv, iteration)
                    && !(eval.feasible && eval.objective < best_objective)
                {
                    continue;
                }
                if eval.objective < chosen_objective {
                    chosen = Some(*mv);
                    chosen_objective = eval.objective;
                }
            }

            if let Some(mv) = chosen {
                state.apply(problem, &mv, penalty.alpha());
                tabu.record(
                    &mv,
                    iteration,
                    config.tenure_min,
                    config.tenure_max,
                    &mut rng,
                );
                penalty.update(state.feasible);

                if state.feasible && state.objective < best_objective {
                    best_feasible = Some(state.snapshot());
                    best_objective = state.objective;
                    best_iteration = iteration;
                    stagnation = 0;
                } else {
                    stagnation += 1;
                }
            } else {
                // Nothing admissible this iteration; still counts as
                // stagnation so the perturbation can unstick the search.
                stagnation += 1;
            }

            cost_history.push(best_objective);

            if stagnation >= config.max_stagnation {
                perturb(
                    problem,
                    &mut state,
                    stagnation,
                    config.max_stagnation,
                    penalty.alpha(),
                    &mut rng,
                );
                stagnation = 0;
            }
        }

        let best = match best_feasible {
            Some(solution) => greedy_drop(problem, &solution),
            None => state.snapshot(),
        };

        TabuResult {
            best,
            iterations: cost_history.len(),
            best_iteration,
            cost_history,
            lower_bound,
        }
    }
}
