//! Human-readable solution reports.
//!
//! Rendering is a presentation concern kept outside the search engine: the
//! functions here take a finished [`Solution`] and return a `String` the
//! caller can print or log.

use std::fmt::Write;

use crate::problem::Problem;
use crate::solution::Solution;

const RULE: &str = "------------------------------------------------------------";

/// Renders a per-facility breakdown of a solution: global totals,
/// feasibility, optimality gap against an optional lower bound, and each
/// open facility's load, utilization, and assigned customers.
pub fn detailed_report(problem: &Problem, solution: &Solution, lower_bound: Option<f64>) -> String {
    let mut out = String::new();
    let total_cost = solution.total_cost();

    let gap = match lower_bound {
        Some(lb) if lb > 0.0 => {
            let abs = total_cost - lb;
            format!("{:.2}% (abs: {:.2} vs LB={:.2})", 100.0 * abs / lb, abs, lb)
        }
        _ => "N/A (lower bound not provided)".to_string(),
    };

    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "FACILITY LOCATION REPORT");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(
        out,
        "Total Cost: {:.2} (Fixed: {:.2}, Assignment: {:.2})",
        total_cost, solution.total_fixed_cost, solution.total_assignment_cost
    );
    let _ = writeln!(out, "Feasible: {}", solution.is_feasible);
    let _ = writeln!(out, "Open Facilities: {}", solution.open_facilities.len());
    let _ = writeln!(out, "Lower Bound Gap: {gap}");
    let _ = writeln!(out, "{RULE}");

    for &i in &solution.open_facilities {
        let customers: Vec<usize> = solution
            .assignments
            .iter()
            .enumerate()
            .filter_map(|(j, &f)| (f == i).then_some(j))
            .collect();
        let load: f64 = customers.iter().map(|&j| problem.demand(j)).sum();
        let capacity = problem.capacity(i);
        let pct = if capacity > 0.0 {
            load / capacity * 100.0
        } else {
            0.0
        };

        let _ = writeln!(
            out,
            "FACILITY {} (Cap: {:.2}, Fixed: {:.2})",
            i,
            capacity,
            problem.fixed_cost(i)
        );
        let _ = writeln!(out, "  Load: {load:.2} / {capacity:.2} ({pct:.2}%)");
        let _ = writeln!(out, "  Assigned Customers (Total: {}):", customers.len());
        for j in customers {
            let _ = writeln!(
                out,
                "    - Cust {} (Dem: {:.2}, Cost: {:.2})",
                j,
                problem.demand(j),
                problem.assignment_cost(i, j)
            );
        }
        let _ = writeln!(out, "{RULE}");
    }

    if !solution.is_feasible {
        let _ = writeln!(out, "CAPACITY VIOLATIONS:");
        for (i, excess) in solution.capacity_violations(problem) {
            let _ = writeln!(out, "  Facility {i}: exceeds capacity by {excess:.2}");
        }
        let _ = writeln!(out, "{RULE}");
    }

    out
}
