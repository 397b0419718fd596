//! Fleet route and departure planning on a shared grid.
//!
//! Plans collision-aware routes and departure times for a fleet of agents
//! flying between airports on an 8-connected grid. Routes come from A*
//! search, conflicts are resolved with space-time A* against reserved
//! cells, and a genetic algorithm trades makespan and departure delay off
//! against collisions.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Position`, `Grid`, `Airport`,
//!   `AgentDemand`, `Plan`, `Solution`
//! - **`pathfinding`**: Spatial A*, space-time A*, `ReservationTable`
//! - **`evaluation`**: Collision detection, fitness, KPIs
//! - **`metaheur`**: Generic GA engine (`GaProblem`, `GaRunner`)
//! - **`ga`**: Fleet encoding and operators (`FleetGaProblem`)
//! - **`scenario`**: Scenario assembly and random generation
//! - **`validation`**: Input integrity checks (duplicate IDs, airport refs)
//! - **`config`**: `PlannerConfig` with JSON loading
//! - **`snapshot`**: Persisted per-generation records
//! - **`playback`**: Tick-by-tick replay queries
//! - **`planner`**: End-to-end facade
//!
//! # References
//!
//! - Hart, Nilsson & Raphael (1968), "A Formal Basis for the Heuristic
//!   Determination of Minimum Cost Paths"
//! - Silver (2005), "Cooperative Pathfinding"
//! - Goldberg (1989), "Genetic Algorithms in Search, Optimization, and
//!   Machine Learning"

pub mod config;
pub mod error;
pub mod evaluation;
pub mod ga;
pub mod metaheur;
pub mod models;
pub mod pathfinding;
pub mod planner;
pub mod playback;
pub mod scenario;
pub mod snapshot;
pub mod validation;

pub use config::{PlannerConfig, ScenarioConfig};
pub use error::{ConfigError, PlanError, ScenarioError, SnapshotError};
pub use planner::{FleetPlanner, PlanOutcome};
pub use scenario::Scenario;
pub use snapshot::{PlanRecord, SimulationRecord};
