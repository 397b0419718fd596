//! Planner configuration.
//!
//! Every section is `#[serde(default)]`, so a JSON file only needs the
//! fields it overrides:
//!
//! ```json
//! { "scenario": { "fleet_size": 20 }, "ga": { "max_generations": 200 } }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::evaluation::DEFAULT_COLLISION_PENALTY;
use crate::metaheur::GaConfig;
use crate::models::{MoveCosts, Tick};

/// Parameters of random scenario generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Side length of the square grid.
    pub grid_size: usize,
    /// Number of airports to place.
    pub airport_count: usize,
    /// Minimum Manhattan distance between any two airports.
    pub min_airport_distance: u32,
    /// Number of agents.
    pub fleet_size: usize,
    /// Candidate positions drawn before placement gives up.
    pub max_placement_attempts: usize,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            airport_count: 15,
            min_airport_distance: 4,
            fleet_size: 50,
            max_placement_attempts: 10_000,
        }
    }
}

impl ScenarioConfig {
    /// Sets the grid size.
    pub fn with_grid_size(mut self, size: usize) -> Self {
        self.grid_size = size;
        self
    }

    /// Sets the number of airports.
    pub fn with_airport_count(mut self, count: usize) -> Self {
        self.airport_count = count;
        self
    }

    /// Sets the minimum airport spacing.
    pub fn with_min_airport_distance(mut self, distance: u32) -> Self {
        self.min_airport_distance = distance;
        self
    }

    /// Sets the fleet size.
    pub fn with_fleet_size(mut self, size: usize) -> Self {
        self.fleet_size = size;
        self
    }

    /// Sets the placement attempt budget.
    pub fn with_max_placement_attempts(mut self, attempts: usize) -> Self {
        self.max_placement_attempts = attempts;
        self
    }

    /// Checks parameter ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size == 0 {
            return Err(ConfigError::ZeroGridSize);
        }
        if self.airport_count < 2 {
            return Err(ConfigError::TooFewAirports {
                count: self.airport_count,
            });
        }
        if self.fleet_size == 0 {
            return Err(ConfigError::ZeroFleetSize);
        }
        if self.max_placement_attempts == 0 {
            return Err(ConfigError::ZeroPlacementAttempts);
        }
        Ok(())
    }
}

/// Complete planner configuration.
///
/// # Example
/// ```
/// use u_airspace::config::PlannerConfig;
///
/// let config = PlannerConfig::from_json_str(r#"{ "max_simulation_time": 120 }"#).unwrap();
/// assert_eq!(config.max_simulation_time, 120);
/// assert_eq!(config.scenario.grid_size, 20);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Scenario generation parameters.
    pub scenario: ScenarioConfig,
    /// Orthogonal and diagonal move costs.
    pub movement: MoveCosts,
    /// GA parameters, including the seed.
    pub ga: GaConfig,
    /// Simulation horizon in ticks.
    pub max_simulation_time: Tick,
    /// Fitness penalty per colliding pair-tick.
    pub collision_penalty: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            scenario: ScenarioConfig::default(),
            movement: MoveCosts::default(),
            ga: GaConfig::default(),
            max_simulation_time: 200,
            collision_penalty: DEFAULT_COLLISION_PENALTY,
        }
    }
}

impl PlannerConfig {
    /// Parses a (possibly partial) JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Sets the scenario section.
    pub fn with_scenario(mut self, scenario: ScenarioConfig) -> Self {
        self.scenario = scenario;
        self
    }

    /// Sets the move costs.
    pub fn with_movement(mut self, movement: MoveCosts) -> Self {
        self.movement = movement;
        self
    }

    /// Sets the GA section.
    pub fn with_ga(mut self, ga: GaConfig) -> Self {
        self.ga = ga;
        self
    }

    /// Sets the simulation horizon.
    pub fn with_max_simulation_time(mut self, ticks: Tick) -> Self {
        self.max_simulation_time = ticks;
        self
    }

    /// Sets the collision penalty.
    pub fn with_collision_penalty(mut self, penalty: f64) -> Self {
        self.collision_penalty = penalty;
        self
    }

    /// Sets the GA seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.ga.seed = seed;
        self
    }

    /// Seed of the run (also names the snapshot file).
    pub fn seed(&self) -> u64 {
        self.ga.seed
    }

    /// Fails fast on the first invalid parameter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scenario.validate()?;
        let MoveCosts {
            orthogonal,
            diagonal,
        } = self.movement;
        let valid_cost = |c: f64| c.is_finite() && c > 0.0;
        if !valid_cost(orthogonal) || !valid_cost(diagonal) {
            return Err(ConfigError::InvalidMoveCosts {
                orthogonal,
                diagonal,
            });
        }
        self.ga.validate()?;
        if self.max_simulation_time == 0 {
            return Err(ConfigError::ZeroHorizon);
        }
        if !(self.collision_penalty.is_finite() && self.collision_penalty >= 0.0) {
            return Err(ConfigError::InvalidCollisionPenalty(self.collision_penalty));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PlannerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.scenario.grid_size, 20);
        assert_eq!(config.scenario.airport_count, 15);
        assert_eq!(config.scenario.fleet_size, 50);
        assert_eq!(config.ga.population_size, 100);
        assert_eq!(config.ga.snapshot_interval, Some(5));
        assert_eq!(config.seed(), 420);
        assert_eq!(config.max_simulation_time, 200);
        assert_eq!(config.collision_penalty, 10_000.0);
    }

    #[test]
    fn test_partial_json_overrides_only_named_fields() {
        let config = PlannerConfig::from_json_str(
            r#"{ "scenario": { "fleet_size": 7 }, "ga": { "seed": 1 }, "movement": { "diagonal": 1.5 } }"#,
        )
        .unwrap();
        assert_eq!(config.scenario.fleet_size, 7);
        assert_eq!(config.scenario.grid_size, 20);
        assert_eq!(config.seed(), 1);
        assert_eq!(config.ga.population_size, 100);
        assert_eq!(config.movement.diagonal, 1.5);
        assert_eq!(config.movement.orthogonal, 1.0);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            PlannerConfig::from_json_str("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = PlannerConfig::load("/nonexistent/planner.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_validation_failures() {
        let base = PlannerConfig::default();
        assert!(matches!(
            base.clone()
                .with_scenario(ScenarioConfig::default().with_grid_size(0))
                .validate(),
            Err(ConfigError::ZeroGridSize)
        ));
        assert!(matches!(
            base.clone()
                .with_scenario(ScenarioConfig::default().with_airport_count(1))
                .validate(),
            Err(ConfigError::TooFewAirports { count: 1 })
        ));
        assert!(matches!(
            base.clone()
                .with_scenario(ScenarioConfig::default().with_fleet_size(0))
                .validate(),
            Err(ConfigError::ZeroFleetSize)
        ));
        assert!(matches!(
            base.clone().with_max_simulation_time(0).validate(),
            Err(ConfigError::ZeroHorizon)
        ));
        assert!(matches!(
            base.clone()
                .with_movement(MoveCosts { orthogonal: 0.0, diagonal: 1.4 })
                .validate(),
            Err(ConfigError::InvalidMoveCosts { .. })
        ));
        assert!(matches!(
            base.clone().with_collision_penalty(f64::NAN).validate(),
            Err(ConfigError::InvalidCollisionPenalty(_))
        ));
        assert!(matches!(
            base.with_ga(GaConfig::default().with_population_size(0)).validate(),
            Err(ConfigError::ZeroPopulationSize)
        ));
    }
}
