//! Plan (per-agent gene) model.
//!
//! A plan is one agent's route and departure tick inside a single solution.
//! The agent is present on the grid from its departure tick up to and
//! including its arrival tick, and absent otherwise: it neither loiters at
//! the origin before departure nor lingers at the destination afterwards.

use serde::{Deserialize, Serialize};

use super::{AgentDemand, AgentId, Grid, Position};

/// Discrete simulation time step.
pub type Tick = u32;

/// Route and departure assignment of one agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// Agent this plan belongs to.
    pub agent_id: AgentId,
    /// Cells visited, origin and destination inclusive, one per tick.
    pub route: Vec<Position>,
    /// Tick at which the agent occupies `route[0]`.
    pub departure: Tick,
}

impl Plan {
    /// Creates a plan.
    pub fn new(agent_id: AgentId, route: Vec<Position>, departure: Tick) -> Self {
        Self {
            agent_id,
            route,
            departure,
        }
    }

    /// Arrival tick, `departure + len(route) - 1`. `None` for an empty route.
    #[inline]
    pub fn arrival(&self) -> Option<Tick> {
        if self.route.is_empty() {
            None
        } else {
            Some(self.departure + (self.route.len() - 1) as Tick)
        }
    }

    /// Position at tick `t`, or `None` when the agent is absent.
    #[inline]
    pub fn position_at(&self, t: Tick) -> Option<Position> {
        if t < self.departure {
            return None;
        }
        self.route.get((t - self.departure) as usize).copied()
    }

    /// Iterates `(tick, position)` over the whole flight.
    pub fn occupancy(&self) -> impl Iterator<Item = (Tick, Position)> + '_ {
        self.route
            .iter()
            .enumerate()
            .map(move |(i, &p)| (self.departure + i as Tick, p))
    }

    /// Checks the route invariants against the agent's demand.
    ///
    /// Endpoints must match origin/destination, every cell must be on the
    /// grid and consecutive cells must be one of the eight moves apart.
    pub fn is_valid_for(&self, demand: &AgentDemand, grid: &Grid) -> bool {
        if self.agent_id != demand.id {
            return false;
        }
        match (self.route.first(), self.route.last()) {
            (Some(&first), Some(&last)) => {
                first == demand.origin
                    && last == demand.destination
                    && self.route.iter().all(|&p| grid.is_valid(p))
                    && self.route.windows(2).all(|w| w[0].is_adjacent_to(w[1]))
            }
            _ => false,
        }
    }
}
