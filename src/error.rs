//! Error types.
//!
//! Expected search outcomes ("no route") are `Option::None`, not errors.
//! Everything here aborts the operation that produced it.

use std::path::PathBuf;

use crate::models::{AgentId, Position};
use crate::validation::ValidationError;

/// Invalid or unreadable configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("InvalidGridSize: grid size must be positive")]
    ZeroGridSize,
    #[error("InvalidFleetSize: fleet size must be positive")]
    ZeroFleetSize,
    #[error("TooFewAirports: at least 2 airports are required, got {count}")]
    TooFewAirports { count: usize },
    #[error("InvalidPlacementBudget: max_placement_attempts must be positive")]
    ZeroPlacementAttempts,
    #[error("InvalidPopulationSize: population size must be positive")]
    ZeroPopulationSize,
    #[error("InvalidTournamentSize: tournament size must be positive")]
    ZeroTournamentSize,
    #[error(
        "TournamentTooLarge: tournament_size={tournament_size} exceeds population_size={population_size}"
    )]
    TournamentTooLarge {
        tournament_size: usize,
        population_size: usize,
    },
    #[error("MutationRateOutOfRange: mutation_rate={0} is not within [0, 1]")]
    MutationRateOutOfRange(f64),
    #[error("InvalidConvergenceWindow: convergence window must be positive")]
    ZeroConvergenceWindow,
    #[error("InvalidSnapshotInterval: snapshot interval must be positive when set")]
    ZeroSnapshotInterval,
    #[error("InvalidHorizon: max_simulation_time must be positive")]
    ZeroHorizon,
    #[error("InvalidMoveCosts: costs must be finite and positive. orthogonal={orthogonal}, diagonal={diagonal}")]
    InvalidMoveCosts { orthogonal: f64, diagonal: f64 },
    #[error("InvalidCollisionPenalty: penalty must be finite and non-negative, got {0}")]
    InvalidCollisionPenalty(f64),
    #[error("ConfigIo: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("ConfigParse: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Scenario construction failure.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error(
        "PlacementExhausted: placed {placed} of {requested} airports with min distance {min_distance} after {attempts} attempts"
    )]
    PlacementExhausted {
        requested: usize,
        placed: usize,
        min_distance: u32,
        attempts: usize,
    },
    #[error("InvalidScenario: {}", summarize(.0))]
    Invalid(Vec<ValidationError>),
    #[error("ScenarioConfig: {0}")]
    Config(#[from] ConfigError),
}

fn summarize(issues: &[ValidationError]) -> String {
    issues
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Snapshot persistence failure.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("SnapshotIo: {0}")]
    Io(#[from] std::io::Error),
    #[error("SnapshotFormat: {0}")]
    Json(#[from] serde_json::Error),
    #[error("MissingGeneration: generation={0} has no snapshot")]
    MissingGeneration(usize),
    #[error("NonDenseAgents: generation={generation} record {index} has agent id {agent_id}")]
    NonDenseAgents {
        generation: usize,
        index: usize,
        agent_id: AgentId,
    },
}

/// Top-level planning failure.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("ConfigError: {0}")]
    Config(#[from] ConfigError),
    #[error("ScenarioError: {0}")]
    Scenario(#[from] ScenarioError),
    #[error("SnapshotError: {0}")]
    Snapshot(#[from] SnapshotError),
    #[error("Unreachable: agent {agent_id} has no route from {origin} to {destination}")]
    Unreachable {
        agent_id: AgentId,
        origin: Position,
        destination: Position,
    },
}
