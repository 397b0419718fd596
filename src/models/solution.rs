//! Solution (full-fleet assignment) model.
//!
//! A solution holds exactly one [`Plan`] per agent, indexed by agent id.
//! Plans own their route buffers, so cloning a solution deep-copies every
//! route and two solutions can never observe each other's mutations.

use serde::{Deserialize, Serialize};

use super::{AgentId, Plan, Position, Tick};
use crate::metaheur::Individual;

/// A complete route/departure assignment for the fleet.
///
/// Higher fitness is better (maximization convention).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    plans: Vec<Plan>,
    /// Fitness from the most recent evaluation (`-inf` until evaluated).
    #[serde(skip, default = "unevaluated")]
    fitness: f64,
}

fn unevaluated() -> f64 {
    f64::NEG_INFINITY
}

impl Individual for Solution {
    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }
}

impl PartialEq for Solution {
    /// Structural equality: same routes and departures for every agent.
    fn eq(&self, other: &Self) -> bool {
        self.plans == other.plans
    }
}

impl Solution {
    /// Creates an unevaluated solution. `plans[i].agent_id` must equal `i`.
    pub fn new(plans: Vec<Plan>) -> Self {
        debug_assert!(plans.iter().enumerate().all(|(i, p)| p.agent_id == i));
        Self {
            plans,
            fitness: unevaluated(),
        }
    }

    /// All plans in agent-id order.
    #[inline]
    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    /// Mutable access to all plans.
    #[inline]
    pub fn plans_mut(&mut self) -> &mut [Plan] {
        &mut self.plans
    }

    /// Plan of one agent.
    #[inline]
    pub fn plan(&self, agent_id: AgentId) -> Option<&Plan> {
        self.plans.get(agent_id)
    }

    /// Mutable plan of one agent.
    #[inline]
    pub fn plan_mut(&mut self, agent_id: AgentId) -> Option<&mut Plan> {
        self.plans.get_mut(agent_id)
    }

    /// Fleet size.
    #[inline]
    pub fn len(&self) -> usize {
        self.plans.len()
    }

    /// Whether the fleet is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    /// Position of an agent at tick `t` (`None` if absent or unknown).
    pub fn position_at(&self, agent_id: AgentId, t: Tick) -> Option<Position> {
        self.plan(agent_id).and_then(|p| p.position_at(t))
    }

    /// Makespan: latest arrival tick over agents with a non-empty route.
    pub fn makespan(&self) -> Tick {
        self.plans.iter().filter_map(Plan::arrival).max().unwrap_or(0)
    }

    /// Sum of departure ticks.
    pub fn total_departure_delay(&self) -> u64 {
        self.plans.iter().map(|p| p.departure as u64).sum()
    }

    /// Mean departure tick (0 for an empty fleet).
    pub fn mean_departure_delay(&self) -> f64 {
        if self.plans.is_empty() {
            0.0
        } else {
            self.total_departure_delay() as f64 / self.plans.len() as f64
        }
    }
}
