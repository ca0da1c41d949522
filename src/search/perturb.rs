//! Open-set diversification.
//!
//! When the search stagnates, one of seven operators mutates the open
//! facility set (or scrambles the assignment), after which every customer
//! is reassigned to its cheapest open facility and all aggregates are
//! rebuilt from scratch. The reassignment pass means the open-set change is
//! the only effect that survives into the next iteration; in particular the
//! shuffle operator's random assignment is always overwritten by it, an
//! inherited quirk kept as-is.
//!
//! Every operator leaves at least one facility open, and becomes a no-op
//! when its preconditions fail (e.g. nothing to close on a single-facility
//! instance). A no-op falls back to closing one facility so a triggered
//! perturbation still moves whenever the instance allows it.

use rand::Rng;

use super::state::SearchState;
use crate::problem::Problem;

/// Cap on the candidate combinations scored by the fixed-cost-biased
/// open-one-close-two operator.
const COMBO_SAMPLE_CAP: usize = 50;

/// The diversification operators, in escalation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerturbOperator {
    /// Close one random open facility (needs at least two open).
    CloseOne,
    /// Open one random closed facility.
    OpenOne,
    /// Close a random open facility and open a random closed one.
    SwapOpenClose,
    /// Randomly scatter every customer across the open facilities; the
    /// follow-up cheapest-reassignment pass voids the scatter.
    ShuffleReassign,
    /// Close about half the open facilities, keeping at least one.
    CloseHalf,
    /// Close one open facility and open up to two closed ones. Not produced
    /// by the selection policy; kept selectable on its own.
    CloseOneOpenTwo,
    /// Open one closed facility and close the one or two open facilities
    /// whose fixed costs best offset it. The most aggressive operator.
    OpenOneCloseTwo,
}

/// The operators eligible below the stagnation ceiling.
const MILD_OPERATORS: [PerturbOperator; 5] = [
    PerturbOperator::CloseOne,
    PerturbOperator::OpenOne,
    PerturbOperator::SwapOpenClose,
    PerturbOperator::ShuffleReassign,
    PerturbOperator::CloseHalf,
];

/// Picks an operator by stagnation severity: uniform among the mild five
/// below `max_stagnation`, the aggressive open-one-close-two at or above.
pub fn select_operator<R: Rng>(
    stagnation: usize,
    max_stagnation: usize,
    rng: &mut R,
) -> PerturbOperator {
    if stagnation < max_stagnation {
        MILD_OPERATORS[rng.random_range(0..MILD_OPERATORS.len())]
    } else {
        PerturbOperator::OpenOneCloseTwo
    }
}

/// Diversifies the state: applies the operator chosen for the given
/// stagnation severity (falling back to close-one when it cannot act),
/// then reassigns every customer to its cheapest open facility and
/// rebuilds all aggregates.
pub fn perturb<R: Rng>(
    problem: &Problem,
    state: &mut SearchState,
    stagnation: usize,
    max_stagnation: usize,
    alpha: f64,
    rng: &mut R,
) {
    let op = select_operator(stagnation, max_stagnation, rng);
    if !apply_operator(problem, state, op, rng) {
        apply_operator(problem, state, PerturbOperator::CloseOne, rng);
    }
    state.reassign_all_to_cheapest(problem, alpha);
}

/// Applies one operator to the open set (or assignment), returning whether
/// it acted. Loads and aggregates are left for the caller's reassignment
/// pass to rebuild.
pub fn apply_operator<R: Rng>(
    problem: &Problem,
    state: &mut SearchState,
    op: PerturbOperator,
    rng: &mut R,
) -> bool {
    let closed: Vec<usize> = (0..problem.num_facilities())
        .filter(|&i| !state.is_open[i])
        .collect();

    match op {
        PerturbOperator::CloseOne => {
            if state.open.len() < 2 {
                return false;
            }
            let mut open = state.open.clone();
            open.remove(rng.random_range(0..open.len()));
            state.set_open_set(open);
            true
        }
        PerturbOperator::OpenOne => {
            if closed.is_empty() {
                return false;
            }
            let mut open = state.open.clone();
            open.push(closed[rng.random_range(0..closed.len())]);
            state.set_open_set(open);
            true
        }
        PerturbOperator::SwapOpenClose => {
            if closed.is_empty() {
                return false;
            }
            let mut open = state.open.clone();
            let slot = rng.random_range(0..open.len());
            open[slot] = closed[rng.random_range(0..closed.len())];
            state.set_open_set(open);
            true
        }
        PerturbOperator::ShuffleReassign => {
            for j in 0..state.assignments.len() {
                state.assignments[j] = state.open[rng.random_range(0..state.open.len())];
            }
            true
        }
        PerturbOperator::CloseHalf => {
            if state.open.len() < 2 {
                return false;
            }
            let count = (state.open.len() / 2).max(1).min(state.open.len() - 1);
            let victims = rand::seq::index::sample(rng, state.open.len(), count);
            let open = state
                .open
                .iter()
                .enumerate()
                .filter(|&(idx, _)| !victims.iter().any(|v| v == idx))
                .map(|(_, &i)| i)
                .collect();
            state.set_open_set(open);
            true
        }
        PerturbOperator::CloseOneOpenTwo => {
            if state.open.len() < 2 || closed.is_empty() {
                return false;
            }
            let mut open = state.open.clone();
            open.remove(rng.random_range(0..open.len()));
            let openings = rand::seq::index::sample(rng, closed.len(), 2.min(closed.len()));
            open.extend(openings.iter().map(|idx| closed[idx]));
            state.set_open_set(open);
            true
        }
        PerturbOperator::OpenOneCloseTwo => {
            if state.open.len() < 2 || closed.is_empty() {
                return false;
            }
            let open = &state.open;
            let n_close = 2.min(open.len() - 1);
            let samples = COMBO_SAMPLE_CAP.min(closed.len() * (open.len() - 1));

            let mut best: Option<(usize, Vec<usize>)> = None;
            let mut best_delta = f64::INFINITY;
            for _ in 0..samples {
                let candidate = closed[rng.random_range(0..closed.len())];
                let picks: Vec<usize> = rand::seq::index::sample(rng, open.len(), n_close)
                    .iter()
                    .map(|idx| open[idx])
                    .collect();
                let delta = problem.fixed_cost(candidate)
                    - picks.iter().map(|&i| problem.fixed_cost(i)).sum::<f64>();
                if delta < best_delta {
                    best_delta = delta;
                    best = Some((candidate, picks));
                }
            }

            if let Some((candidate, picks)) = best {
                let mut open: Vec<usize> = state
                    .open
                    .iter()
                    .copied()
                    .filter(|i| !picks.contains(i))
                    .collect();
                open.push(candidate);
                state.set_open_set(open);
                true
            } else {
                false
            }
        }
    }
}
