//! Fitness function.
//!
//! ```text
//! fitness = -(makespan + mean_departure_delay) - penalty * collisions
//! ```
//!
//! Higher (less negative) is better. The penalty is applied once per
//! reported colliding pair-tick, so a pair that shares cells on three ticks
//! costs three penalties.

use super::conflicts::{detect_collisions, ConflictReport};
use crate::models::{Solution, Tick};

/// Penalty per colliding pair-tick used when none is configured.
pub const DEFAULT_COLLISION_PENALTY: f64 = 10_000.0;

/// Scores solutions for the optimizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitnessEvaluator {
    /// Ticks `0..horizon` are scanned for collisions.
    pub horizon: Tick,
    /// Cost of one colliding pair-tick.
    pub collision_penalty: f64,
}

impl FitnessEvaluator {
    /// Creates an evaluator with the default collision penalty.
    pub fn new(horizon: Tick) -> Self {
        Self {
            horizon,
            collision_penalty: DEFAULT_COLLISION_PENALTY,
        }
    }

    /// Sets the collision penalty.
    pub fn with_collision_penalty(mut self, penalty: f64) -> Self {
        self.collision_penalty = penalty;
        self
    }

    /// Computes fitness, re-running collision detection.
    pub fn evaluate(&self, solution: &Solution) -> f64 {
        self.evaluate_with_report(solution).0
    }

    /// Computes fitness and returns the collision report it was based on.
    pub fn evaluate_with_report(&self, solution: &Solution) -> (f64, ConflictReport) {
        let report = detect_collisions(solution, self.horizon);
        let fitness = self.score(
            solution.makespan(),
            solution.mean_departure_delay(),
            report.count(),
        );
        (fitness, report)
    }

    /// Combines the objective terms.
    #[inline]
    pub fn score(&self, makespan: Tick, mean_departure_delay: f64, collisions: usize) -> f64 {
        -(makespan as f64 + mean_departure_delay) - self.collision_penalty * collisions as f64
    }
}
