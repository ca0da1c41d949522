//! Search configuration.

/// Configuration parameters for the iterated tabu search.
///
/// # Penalty adaptation
///
/// Capacity overloads enter the objective scaled by a coefficient that
/// starts at `alpha` and is re-tuned once per iteration: divided by
/// `1 + epsilon` after a feasible iteration, multiplied by it after an
/// infeasible one. Persistent infeasibility therefore tightens the squeeze
/// until the search is pushed back across the feasibility boundary.
///
/// # Examples
///
/// ```
/// use u_facloc::search::TabuConfig;
///
/// let config = TabuConfig::default()
///     .with_max_iterations(500)
///     .with_beta(0.3)
///     .with_seed(42);
/// assert_eq!(config.max_iterations, 500);
/// assert!((config.beta - 0.3).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabuConfig {
    /// Iteration budget.
    pub max_iterations: usize,

    /// Initial capacity-violation penalty coefficient.
    pub alpha: f64,

    /// Penalty adaptation rate per iteration.
    pub epsilon: f64,

    /// Fraction of customers sampled per neighborhood, in (0, 1].
    pub beta: f64,

    /// Consecutive non-improving iterations before a perturbation fires.
    pub max_stagnation: usize,

    /// Shortest tabu tenure, in iterations.
    pub tenure_min: usize,

    /// Longest tabu tenure, in iterations.
    pub tenure_max: usize,

    /// Random seed (None for a nondeterministic run).
    pub seed: Option<u64>,
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self {
            max_iterations: 300,
            alpha: 1000.0,
            epsilon: 0.1,
            beta: 0.4,
            max_stagnation: 40,
            tenure_min: 10,
            tenure_max: 30,
            seed: None,
        }
    }
}

impl TabuConfig {
    /// Sets the iteration budget.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the initial penalty coefficient.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the penalty adaptation rate.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Sets the neighborhood sampling fraction.
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Sets the stagnation threshold that triggers perturbation.
    pub fn with_max_stagnation(mut self, n: usize) -> Self {
        self.max_stagnation = n;
        self
    }

    /// Sets the tabu tenure bounds, in iterations.
    pub fn with_tenure(mut self, min: usize, max: usize) -> Self {
        self.tenure_min = min;
        self.tenure_max = max;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_iterations == 0 {
            return Err("max_iterations must be positive".into());
        }
        if self.alpha <= 0.0 {
            return Err("alpha must be positive".into());
        }
        if self.epsilon <= 0.0 {
            return Err("epsilon must be positive".into());
        }
        if self.beta <= 0.0 || self.beta > 1.0 {
            return Err(format!("beta must be in (0, 1], got {}", self.beta));
        }
        if self.max_stagnation == 0 {
            return Err("max_stagnation must be positive".into());
        }
        if self.tenure_min == 0 || self.tenure_min > self.tenure_max {
            return Err(format!(
                "tenure bounds must satisfy 1 <= min <= max, got [{}, {}]",
                self.tenure_min, self.tenure_max
            ));
        }
        Ok(())
    }
}
