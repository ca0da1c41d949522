//! Single-source capacitated facility location (SSCFLP) solver.
//!
//! Assigns each of n customers to exactly one of m facilities, where each
//! facility carries a fixed opening cost and a demand capacity and each
//! (facility, customer) pair carries an assignment cost. The goal is to
//! minimize total opening plus assignment cost; capacity overloads are
//! penalized rather than forbidden, so the solver degrades gracefully on
//! instances without enough capacity.
//!
//! # Pipeline
//!
//! 1. [`constructive::greedy_construct`] builds a starting solution by
//!    opening facilities in increasing fixed-cost-per-capacity order and
//!    assigning every customer to its cheapest open facility.
//! 2. [`search::TabuSearch`] improves it with an iterated tabu search:
//!    sampled relocate/swap neighborhoods evaluated incrementally, a
//!    time-windowed tabu list with aspiration, an adaptive capacity-penalty
//!    coefficient, and open-set diversification on stagnation.
//! 3. A greedy facility-closing pass cleans up the best feasible solution.
//!
//! An externally computed lower bound (e.g. from an LP relaxation) can be
//! passed through for optimality-gap reporting; the search itself never
//! uses it.
//!
//! # Architecture
//!
//! This crate sits at Layer 3 (Domains) in the U-Engine ecosystem: it binds
//! the facility-location domain to trajectory-search mechanics. It has no
//! I/O; [`report`] renders solutions to strings for display.
//!
//! # Examples
//!
//! ```
//! use u_facloc::constructive::greedy_construct;
//! use u_facloc::problem::Problem;
//! use u_facloc::search::{TabuConfig, TabuSearch};
//!
//! let problem = Problem::new(
//!     vec![10.0, 10.0],          // capacities
//!     vec![4.0, 6.0],            // fixed costs
//!     vec![3.0, 5.0, 4.0],       // demands
//!     vec![
//!         vec![1.0, 2.0, 1.5],   // assignment costs, facility 0
//!         vec![2.0, 1.0, 2.5],   // assignment costs, facility 1
//!     ],
//! )
//! .unwrap();
//!
//! let initial = greedy_construct(&problem);
//! let config = TabuConfig::default().with_max_iterations(100).with_seed(7);
//! let result = TabuSearch::run(&problem, &initial, &config, None);
//! assert!(result.best.is_feasible);
//! ```

pub mod constructive;
pub mod problem;
pub mod report;
pub mod search;
pub mod solution;
