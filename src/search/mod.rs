//! Iterated tabu search for the SSCFLP.
//!
//! A single-solution trajectory search over customer-to-facility
//! assignments. Each iteration samples a relocate/swap neighborhood,
//! scores every candidate incrementally against the current state, applies
//! the best admissible move, and records its reversal in a time-windowed
//! tabu list. Capacity overloads are admitted but penalized by an adaptive
//! coefficient, so the trajectory oscillates around the feasibility
//! boundary. Stagnation triggers open-set diversification, and a greedy
//! facility-closing pass polishes the best feasible solution found.
//!
//! # References
//!
//! - Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! - Cortinhal, M. J. & Captivo, M. E. (2003). "Upper and lower bounds for
//!   the single source capacitated location problem", *European Journal of
//!   Operational Research* 151(2), 333-351.
//! - Gendreau, M., Hertz, A. & Laporte, G. (1994). "A tabu search heuristic
//!   for the vehicle routing problem", *Management Science* 40(10), 1276-1290.
//!   (penalized-infeasibility scheme)

mod config;
mod moves;
mod penalty;
mod perturb;
mod postprocess;
mod runner;
mod state;
mod tabu_list;

pub use config::TabuConfig;
pub use perturb::PerturbOperator;
pub use postprocess::greedy_drop;
pub use runner::{TabuResult, TabuSearch};
