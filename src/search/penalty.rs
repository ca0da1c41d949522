//! Adaptive capacity-violation penalty.

/// Lower clamp for the penalty coefficient.
const ALPHA_MIN: f64 = 1e-6;
/// Upper clamp for the penalty coefficient.
const ALPHA_MAX: f64 = 1e9;

/// Self-tuning penalty coefficient for capacity overloads.
///
/// After each accepted iteration the coefficient is divided by
/// `1 + epsilon` if the resulting state is feasible and multiplied by it
/// otherwise, clamped to `[1e-6, 1e9]`. Runs that linger on the infeasible
/// side thus see violations priced ever higher, while comfortably feasible
/// runs relax the penalty enough to let the search cross the boundary in
/// pursuit of cheaper assignments.
#[derive(Debug, Clone)]
pub struct PenaltyController {
    alpha: f64,
    epsilon: f64,
}

impl PenaltyController {
    pub fn new(alpha: f64, epsilon: f64) -> Self {
        Self {
            alpha: alpha.clamp(ALPHA_MIN, ALPHA_MAX),
            epsilon,
        }
    }

    /// Current coefficient.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Adapts the coefficient to the feasibility of the latest state.
    pub fn update(&mut self, feasible: bool) {
        let factor = 1.0 + self.epsilon;
        self.alpha = if feasible {
            self.alpha / factor
        } else {
            self.alpha * factor
        }
        .clamp(ALPHA_MIN, ALPHA_MAX);
    }
}
