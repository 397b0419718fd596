//! Solution quality metrics (KPIs).
//!
//! Computes human-facing indicators from a completed solution.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan | Latest arrival tick |
//! | Collisions | Colliding pair-ticks within the horizon |
//! | Total route length | Sum of move costs over all routes |
//! | Mean departure delay | Mean departure tick |
//! | Fitness | Optimizer objective |

use serde::Serialize;

use super::{Collision, FitnessEvaluator};
use crate::models::{MoveCosts, Solution, Tick};

/// Solution performance indicators.
#[derive(Debug, Clone, Serialize)]
pub struct SolutionKpi {
    /// Fleet size.
    pub agent_count: usize,
    /// Number of colliding pair-ticks.
    pub collision_count: usize,
    /// Collisions in detection order.
    pub collisions: Vec<Collision>,
    /// Latest arrival tick.
    pub makespan: Tick,
    /// Sum of move costs over all routes.
    pub total_route_length: f64,
    /// `total_route_length / agent_count` (0 for an empty fleet).
    pub avg_route_length: f64,
    /// Mean departure tick.
    pub mean_departure_delay: f64,
    /// Objective value.
    pub fitness: f64,
}

impl SolutionKpi {
    /// Computes KPIs for `solution`.
    ///
    /// # Arguments
    /// * `evaluator` - Horizon and penalty used for collisions and fitness.
    /// * `costs` - Move costs used for route lengths.
    pub fn calculate(solution: &Solution, evaluator: &FitnessEvaluator, costs: &MoveCosts) -> Self {
        let (fitness, report) = evaluator.evaluate_with_report(solution);
        let total_route_length: f64 = solution
            .plans()
            .iter()
            .map(|p| costs.route_cost(&p.route))
            .sum();
        let agent_count = solution.len();
        let avg_route_length = if agent_count == 0 {
            0.0
        } else {
            total_route_length / agent_count as f64
        };

        Self {
            agent_count,
            collision_count: report.count(),
            collisions: report.into_collisions(),
            makespan: solution.makespan(),
            total_route_length,
            avg_route_length,
            mean_departure_delay: solution.mean_departure_delay(),
            fitness,
        }
    }

    /// Whether no collisions were detected.
    pub fn is_conflict_free(&self) -> bool {
        self.collision_count == 0
    }
}
