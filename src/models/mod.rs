//! Fleet planning domain models.
//!
//! Provides the core data types for describing a planning problem
//! (grid, airports, agent demands) and its solutions (plans, solutions).
//!
//! # Domain Mappings
//!
//! | u-airspace | Air traffic | Warehouse robots | Drones |
//! |------------|-------------|------------------|--------|
//! | Airport | Airport | Pick station | Pad |
//! | AgentDemand | Flight request | Job | Delivery |
//! | Plan | Flight plan | Robot route | Mission |
//! | Solution | Traffic plan | Fleet schedule | Fleet plan |

mod airport;
mod demand;
mod grid;
mod plan;
mod position;
mod solution;

pub use airport::{Airport, AirportId};
pub use demand::{AgentDemand, AgentId};
pub use grid::{Grid, MoveCosts};
pub use plan::{Plan, Tick};
pub use position::{Direction, Position};
pub use solution::Solution;
