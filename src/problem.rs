//! Problem instance data.
//!
//! A [`Problem`] is immutable after construction and shared read-only by the
//! constructive heuristic, the search engine, and the reporting helpers.

/// An SSCFLP instance: m facilities, n customers, and an m×n assignment
/// cost matrix stored row-major.
///
/// All numeric inputs are expected to be non-negative; dimensions are
/// validated at construction.
///
/// # Examples
///
/// ```
/// use u_facloc::problem::Problem;
///
/// let problem = Problem::new(
///     vec![10.0, 8.0],
///     vec![5.0, 3.0],
///     vec![4.0, 4.0, 4.0],
///     vec![vec![1.0, 2.0, 3.0], vec![3.0, 2.0, 1.0]],
/// )
/// .unwrap();
/// assert_eq!(problem.num_facilities(), 2);
/// assert_eq!(problem.num_customers(), 3);
/// assert!((problem.assignment_cost(1, 2) - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Problem {
    capacities: Vec<f64>,
    fixed_costs: Vec<f64>,
    demands: Vec<f64>,
    /// Row-major m×n matrix: `assignment_costs[i * n + j]` is the cost of
    /// serving customer j from facility i.
    assignment_costs: Vec<f64>,
}

impl Problem {
    /// Creates an instance from per-facility capacities and fixed costs,
    /// per-customer demands, and an m×n assignment cost matrix given as
    /// rows (one row per facility).
    pub fn new(
        capacities: Vec<f64>,
        fixed_costs: Vec<f64>,
        demands: Vec<f64>,
        assignment_costs: Vec<Vec<f64>>,
    ) -> Result<Self, String> {
        let m = capacities.len();
        let n = demands.len();
        if m == 0 {
            return Err("at least one facility required".into());
        }
        if n == 0 {
            return Err("at least one customer required".into());
        }
        if fixed_costs.len() != m {
            return Err(format!(
                "expected {} fixed costs, got {}",
                m,
                fixed_costs.len()
            ));
        }
        if assignment_costs.len() != m {
            return Err(format!(
                "expected {} assignment cost rows, got {}",
                m,
                assignment_costs.len()
            ));
        }
        let mut flat = Vec::with_capacity(m * n);
        for (i, row) in assignment_costs.into_iter().enumerate() {
            if row.len() != n {
                return Err(format!(
                    "assignment cost row {} has length {}, expected {}",
                    i,
                    row.len(),
                    n
                ));
            }
            flat.extend(row);
        }
        Ok(Self {
            capacities,
            fixed_costs,
            demands,
            assignment_costs: flat,
        })
    }

    /// Number of facilities (m).
    pub fn num_facilities(&self) -> usize {
        self.capacities.len()
    }

    /// Number of customers (n).
    pub fn num_customers(&self) -> usize {
        self.demands.len()
    }

    /// Capacity of facility `i`.
    pub fn capacity(&self, i: usize) -> f64 {
        self.capacities[i]
    }

    /// Fixed opening cost of facility `i`.
    pub fn fixed_cost(&self, i: usize) -> f64 {
        self.fixed_costs[i]
    }

    /// Demand of customer `j`.
    pub fn demand(&self, j: usize) -> f64 {
        self.demands[j]
    }

    /// Cost of serving customer `j` from facility `i`.
    pub fn assignment_cost(&self, i: usize, j: usize) -> f64 {
        self.assignment_costs[i * self.num_customers() + j]
    }

    /// Sum of all customer demands.
    pub fn total_demand(&self) -> f64 {
        self.demands.iter().sum()
    }

    /// Sum of all facility capacities.
    pub fn total_capacity(&self) -> f64 {
        self.capacities.iter().sum()
    }

    /// The open facility with the cheapest assignment cost for customer `j`.
    ///
    /// Ties break toward the earlier facility in `open`. `open` must be
    /// non-empty.
    pub fn cheapest_open_facility(&self, open: &[usize], j: usize) -> usize {
        debug_assert!(!open.is_empty());
        let mut best = open[0];
        let mut best_cost = self.assignment_cost(best, j);
        for &i in &open[1..] {
            let c = self.assignment_cost(i, j);
            if c < best_cost {
                best = i;
                best_cost = c;
            }
        }
        best
    }
}
