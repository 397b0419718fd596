//! Domain-agnostic genetic algorithm engine.
//!
//! The two central traits, [`Individual`] and [`GaProblem`], define the
//! contract between the generic [`GaRunner`] and a domain-specific problem.
//! The runner owns population management, tournament selection, elitism,
//! best-tracking and convergence detection; the problem owns encoding,
//! evaluation, crossover and mutation.
//!
//! Fitness follows the maximization convention: higher is better.
//!
//! # Reference
//! Goldberg (1989), "Genetic Algorithms in Search, Optimization and
//! Machine Learning"

mod config;
mod runner;
mod selection;
mod types;

pub use config::GaConfig;
pub use runner::{GaResult, GaRunner, GaState, Termination, CONVERGENCE_EPSILON};
pub use selection::{best_index, elite_count, select_elite, tournament_select};
pub use types::{GaProblem, Individual};
