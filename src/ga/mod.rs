//! GA-based fleet route/departure optimization.
//!
//! Implements the fleet-specific encoding on top of the generic
//! [`metaheur`](crate::metaheur) engine.
//!
//! # Encoding
//!
//! An individual is a [`Solution`](crate::models::Solution): one
//! [`Plan`](crate::models::Plan) (route + departure tick) per agent, indexed
//! by agent id. Origin/destination are static per agent and never recombined.
//!
//! # Operators
//!
//! - [`single_point_crossover`]: swaps route and departure of every agent
//!   at or after a random cut index.
//! - [`mutate_departure_times`]: per-agent random departure offsets.
//! - [`repair_conflicts`]: reroutes one colliding agent with space-time A*
//!   against the rest of the fleet (best effort).
//!
//! # Reference
//! Silver (2005), "Cooperative Pathfinding"; Goldberg (1989), Ch. 3

pub mod operators;
mod problem;

pub use operators::{
    mutate_departure_times, repair_conflicts, single_point_crossover, RepairOutcome,
};
pub use problem::FleetGaProblem;
