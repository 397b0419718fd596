//! Solution evaluation.
//!
//! - [`conflicts`]: same-cell-same-tick collision detection
//! - [`FitnessEvaluator`]: scalar objective maximized by the optimizer
//! - [`SolutionKpi`]: human-facing quality indicators

pub mod conflicts;
mod fitness;
mod kpi;

pub use conflicts::{collisions_at, detect_collisions, Collision, ConflictReport};
pub use fitness::{FitnessEvaluator, DEFAULT_COLLISION_PENALTY};
pub use kpi::SolutionKpi;
