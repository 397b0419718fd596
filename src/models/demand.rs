//! Agent demand model.
//!
//! A demand is the immutable origin/destination request of one agent. It is
//! created once per scenario and never changes during optimization; the
//! mutable part of an agent's assignment lives in [`Plan`](super::Plan).

use serde::{Deserialize, Serialize};

use super::{Airport, AirportId, Position};

/// Agent identifier (dense, `0..fleet_size`; also the index into a solution).
pub type AgentId = usize;

/// Origin/destination request of a single agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentDemand {
    /// Unique agent identifier.
    pub id: AgentId,
    /// Departure airport.
    pub origin_airport: AirportId,
    /// Arrival airport (never equal to `origin_airport`).
    pub destination_airport: AirportId,
    /// Cell of the departure airport.
    pub origin: Position,
    /// Cell of the arrival airport.
    pub destination: Position,
}

impl AgentDemand {
    /// Creates a demand between two airports.
    pub fn between(id: AgentId, origin: &Airport, destination: &Airport) -> Self {
        Self {
            id,
            origin_airport: origin.id,
            destination_airport: destination.id,
            origin: origin.position,
            destination: destination.position,
        }
    }
}
