//! Neighborhood generation and incremental move evaluation.
//!
//! # Algorithm
//!
//! 1. Sample `ceil(beta * n)` distinct customers uniformly (at least one).
//! 2. Relocate candidates: every sampled customer to every other facility.
//! 3. Swap candidates: every sampled pair assigned to different facilities.
//! 4. Shuffle the concatenated list so equal-objective candidates tie-break
//!    randomly rather than by enumeration order.
//!
//! Evaluation never mutates the state: a move touches at most two
//! facilities, so its objective effect is the sum of the assignment-cost
//! delta, the fixed-cost delta for open/close transitions, and the
//! violation delta of the affected pair recomputed from their post-move
//! loads.

use rand::seq::SliceRandom;
use rand::Rng;

use super::state::{violation_delta, SearchState};
use crate::problem::Problem;

/// A candidate neighborhood move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Reassign one customer from its current facility to another.
    Relocate {
        customer: usize,
        from: usize,
        to: usize,
    },
    /// Exchange the facilities of two customers at different facilities.
    Swap {
        first: usize,
        second: usize,
        first_facility: usize,
        second_facility: usize,
    },
}

/// Outcome of evaluating a move against a state.
#[derive(Debug, Clone, Copy)]
pub struct MoveEval {
    /// Objective of the state the move would produce.
    pub objective: f64,
    /// Whether that state would be feasible.
    pub feasible: bool,
    /// `objective` minus the state's current objective.
    pub delta: f64,
}

/// Draws `ceil(beta * n)` distinct customer indices, at least one.
pub fn sample_customers<R: Rng>(num_customers: usize, beta: f64, rng: &mut R) -> Vec<usize> {
    let size = ((beta * num_customers as f64).ceil() as usize).clamp(1, num_customers);
    rand::seq::index::sample(rng, num_customers, size).into_vec()
}

/// One relocate candidate per (sampled customer, other facility) pair.
pub fn relocate_moves(state: &SearchState, num_facilities: usize, sampled: &[usize]) -> Vec<Move> {
    let mut moves = Vec::new();
    for &j in sampled {
        let from = state.assignments[j];
        for to in 0..num_facilities {
            if to != from {
                moves.push(Move::Relocate {
                    customer: j,
                    from,
                    to,
                });
            }
        }
    }
    moves
}

/// One swap candidate per sampled pair assigned to different facilities.
pub fn swap_moves(state: &SearchState, sampled: &[usize]) -> Vec<Move> {
    let mut moves = Vec::new();
    for (idx, &j1) in sampled.iter().enumerate() {
        for &j2 in &sampled[idx + 1..] {
            let k = state.assignments[j1];
            let l = state.assignments[j2];
            if k != l {
                moves.push(Move::Swap {
                    first: j1,
                    second: j2,
                    first_facility: k,
                    second_facility: l,
                });
            }
        }
    }
    moves
}

/// Samples one customer subset and returns the shuffled relocate + swap
/// candidate list built from it.
pub fn neighborhood<R: Rng>(
    state: &SearchState,
    problem: &Problem,
    beta: f64,
    rng: &mut R,
) -> Vec<Move> {
    let sampled = sample_customers(problem.num_customers(), beta, rng);
    let mut moves = relocate_moves(state, problem.num_facilities(), &sampled);
    moves.extend(swap_moves(state, &sampled));
    moves.shuffle(rng);
    moves
}

/// Scores a move without mutating the state.
pub fn evaluate(problem: &Problem, state: &SearchState, mv: &Move, alpha: f64) -> MoveEval {
    let (delta_assignment, delta_fixed, delta_violation) = match *mv {
        Move::Relocate { customer, from, to } => {
            let demand = problem.demand(customer);
            let delta_assignment =
                problem.assignment_cost(to, customer) - problem.assignment_cost(from, customer);

            // Membership, not assignee count: a facility can sit open with
            // no assignees, already paying its fixed cost.
            let mut delta_fixed = 0.0;
            if !state.is_open[to] {
                delta_fixed += problem.fixed_cost(to);
            }
            if state.counts[from] == 1 {
                delta_fixed -= problem.fixed_cost(from);
            }

            let delta_violation = violation_delta(
                state.loads[from],
                state.loads[from] - demand,
                problem.capacity(from),
            ) + violation_delta(
                state.loads[to],
                state.loads[to] + demand,
                problem.capacity(to),
            );
            (delta_assignment, delta_fixed, delta_violation)
        }
        Move::Swap {
            first,
            second,
            first_facility,
            second_facility,
        } => {
            let d1 = problem.demand(first);
            let d2 = problem.demand(second);
            let delta_assignment = problem.assignment_cost(second_facility, first)
                - problem.assignment_cost(first_facility, first)
                + problem.assignment_cost(first_facility, second)
                - problem.assignment_cost(second_facility, second);

            let delta_violation = violation_delta(
                state.loads[first_facility],
                state.loads[first_facility] - d1 + d2,
                problem.capacity(first_facility),
            ) + violation_delta(
                state.loads[second_facility],
                state.loads[second_facility] - d2 + d1,
                problem.capacity(second_facility),
            );
            (delta_assignment, 0.0, delta_violation)
        }
    };

    let new_violation = state.total_violation + delta_violation;
    let objective = state.total_fixed
        + delta_fixed
        + state.total_assignment
        + delta_assignment
        + alpha * new_violation;
    MoveEval {
        objective,
        feasible: new_violation == 0.0,
        delta: objective - state.objective,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn problem() -> Problem {
        Problem::new(
            vec![10.0, 10.0, 6.0],
            vec![5.0, 7.0, 2.0],
            vec![4.0, 5.0, 3.0, 2.0],
            vec![
                vec![1.0, 2.0, 3.0, 4.0],
                vec![4.0, 3.0, 2.0, 1.0],
                vec![2.0, 2.0, 2.0, 2.0],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_sample_size_and_distinctness() {
        let mut rng = StdRng::seed_from_u64(1);
        let sampled = sample_customers(10, 0.4, &mut rng);
        assert_eq!(sampled.len(), 4);
        let mut unique = sampled.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), 4);

        // ceil rounds up and the minimum is one customer
        assert_eq!(sample_customers(10, 0.01, &mut rng).len(), 1);
        assert_eq!(sample_customers(3, 0.5, &mut rng).len(), 2);
        assert_eq!(sample_customers(5, 1.0, &mut rng).len(), 5);
    }

    #[test]
    fn test_relocate_moves_skip_source() {
        let p = problem();
        let s = SearchState::build(&p, &[0, 0, 1, 1], &[0, 1], 1.0);
        let moves = relocate_moves(&s, p.num_facilities(), &[0, 2]);
        assert_eq!(moves.len(), 4);
        for mv in &moves {
            match *mv {
                Move::Relocate { from, to, .. } => assert_ne!(from, to),
                _ => panic!("relocate generator produced a swap"),
            }
        }
    }

    #[test]
    fn test_swap_moves_skip_same_facility() {
        let p = problem();
        let s = SearchState::build(&p, &[0, 0, 1, 1], &[0, 1], 1.0);
        // Customers 0 and 1 share facility 0: no swap between them.
        let moves = swap_moves(&s, &[0, 1, 2]);
        assert_eq!(moves.len(), 2);
        for mv in &moves {
            match *mv {
                Move::Swap {
                    first_facility,
                    second_facility,
                    ..
                } => assert_ne!(first_facility, second_facility),
                _ => panic!("swap generator produced a relocate"),
            }
        }
    }

    #[test]
    fn test_neighborhood_covers_both_kinds() {
        let p = problem();
        let s = SearchState::build(&p, &[0, 0, 1, 1], &[0, 1], 1.0);
        let mut rng = StdRng::seed_from_u64(3);
        let moves = neighborhood(&s, &p, 1.0, &mut rng);
        // 4 customers × 2 alternative facilities + 4 cross-facility pairs
        assert_eq!(moves.len(), 12);
        assert!(moves.iter().any(|m| matches!(m, Move::Relocate { .. })));
        assert!(moves.iter().any(|m| matches!(m, Move::Swap { .. })));
    }

    #[test]
    fn test_evaluate_does_not_mutate() {
        let p = problem();
        let s = SearchState::build(&p, &[0, 0, 1, 1], &[0, 1], 10.0);
        let before = s.clone();
        let mv = Move::Relocate {
            customer: 0,
            from: 0,
            to: 2,
        };
        let _ = evaluate(&p, &s, &mv, 10.0);
        assert_eq!(s.assignments, before.assignments);
        assert_eq!(s.open, before.open);
        assert!((s.objective - before.objective).abs() < 1e-15);
    }

    #[test]
    fn test_evaluate_relocate_open_close() {
        let p = problem();
        let s = SearchState::build(&p, &[0, 0, 1, 1], &[0, 1], 10.0);
        // Customer 2 leaves facility 1 (stays open), opens facility 2.
        let eval = evaluate(
            &p,
            &s,
            &Move::Relocate {
                customer: 2,
                from: 1,
                to: 2,
            },
            10.0,
        );
        // Fixed +2, assignment 2 -> 2 (unchanged), no violation.
        assert!((eval.delta - 2.0).abs() < 1e-12);
        assert!(eval.feasible);
    }

    #[test]
    fn test_evaluate_relocate_into_open_empty_facility() {
        let p = problem();
        let s = SearchState::build(&p, &[0, 0, 1, 1], &[0, 1, 2], 10.0);
        let eval = evaluate(
            &p,
            &s,
            &Move::Relocate {
                customer: 2,
                from: 1,
                to: 2,
            },
            10.0,
        );
        // Facility 2 already pays its opening cost; assignment cost and
        // loads are unchanged too, so the move is free.
        assert!((eval.delta - 0.0).abs() < 1e-12);
    }

    // ---- Incremental vs. full recomputation ----

    fn random_instance(seed: u64) -> (Problem, SearchState, f64) {
        let mut rng = StdRng::seed_from_u64(seed);
        let m = rng.random_range(2..5usize);
        let n = rng.random_range(2..8usize);
        let capacities: Vec<f64> = (0..m).map(|_| rng.random_range(1..20) as f64).collect();
        let fixed: Vec<f64> = (0..m).map(|_| rng.random_range(0..50) as f64).collect();
        let demands: Vec<f64> = (0..n).map(|_| rng.random_range(1..10) as f64).collect();
        let costs: Vec<Vec<f64>> = (0..m)
            .map(|_| (0..n).map(|_| rng.random_range(0..30) as f64).collect())
            .collect();
        let problem = Problem::new(capacities, fixed, demands, costs).unwrap();
        let assignments: Vec<usize> = (0..n).map(|_| rng.random_range(0..m)).collect();
        // Occasionally declare extra open facilities with no assignees.
        let declared: Vec<usize> = (0..m).filter(|_| rng.random_bool(0.3)).collect();
        let alpha = rng.random_range(1..2000) as f64;
        let state = SearchState::build(&problem, &assignments, &declared, alpha);
        (problem, state, alpha)
    }

    fn random_move<R: Rng>(state: &SearchState, m: usize, rng: &mut R) -> Option<Move> {
        let n = state.assignments.len();
        if rng.random_bool(0.5) {
            let customer = rng.random_range(0..n);
            let from = state.assignments[customer];
            let to = (0..m).filter(|&l| l != from).nth(rng.random_range(0..m - 1))?;
            Some(Move::Relocate { customer, from, to })
        } else {
            for _ in 0..20 {
                let first = rng.random_range(0..n);
                let second = rng.random_range(0..n);
                let (k, l) = (state.assignments[first], state.assignments[second]);
                if first != second && k != l {
                    return Some(Move::Swap {
                        first,
                        second,
                        first_facility: k,
                        second_facility: l,
                    });
                }
            }
            None
        }
    }

    proptest! {
        #[test]
        fn prop_delta_matches_full_recompute(seed in 0u64..500) {
            let (problem, state, alpha) = random_instance(seed);
            let mut rng = StdRng::seed_from_u64(seed.wrapping_mul(31).wrapping_add(7));
            if let Some(mv) = random_move(&state, problem.num_facilities(), &mut rng) {
                let eval = evaluate(&problem, &state, &mv, alpha);

                let mut applied = state.clone();
                applied.apply(&problem, &mv, alpha);
                prop_assert!((eval.objective - applied.objective).abs() < 1e-9);
                prop_assert!((eval.delta - (applied.objective - state.objective)).abs() < 1e-9);
                prop_assert_eq!(eval.feasible, applied.feasible);

                // And the applied state must agree with a from-scratch build.
                let rebuilt =
                    SearchState::build(&problem, &applied.assignments, &applied.open, alpha);
                prop_assert!((applied.objective - rebuilt.objective).abs() < 1e-9);
                prop_assert!((applied.total_fixed - rebuilt.total_fixed).abs() < 1e-9);
                prop_assert!((applied.total_violation - rebuilt.total_violation).abs() < 1e-9);
            }
        }

        #[test]
        fn prop_aggregates_stay_consistent_over_move_chains(seed in 0u64..200) {
            let (problem, mut state, alpha) = random_instance(seed);
            let mut rng = StdRng::seed_from_u64(seed.wrapping_mul(73).wrapping_add(11));
            for _ in 0..12 {
                if let Some(mv) = random_move(&state, problem.num_facilities(), &mut rng) {
                    state.apply(&problem, &mv, alpha);
                }
            }
            let rebuilt = SearchState::build(&problem, &state.assignments, &state.open, alpha);
            prop_assert!((state.total_fixed - rebuilt.total_fixed).abs() < 1e-9);
            prop_assert!((state.total_assignment - rebuilt.total_assignment).abs() < 1e-9);
            prop_assert!((state.total_violation - rebuilt.total_violation).abs() < 1e-9);
            prop_assert!((state.objective - rebuilt.objective).abs() < 1e-9);
            prop_assert_eq!(&state.open, &rebuilt.open);
        }
    }
}
