//! Planning scenarios.
//!
//! A scenario is the static input of a planning run: the grid, the airports
//! and one origin/destination demand per agent. Scenarios are either
//! assembled from known data ([`Scenario::new`]) or drawn at random
//! ([`Scenario::generate`]).
//!
//! # Generation
//!
//! 1. Airports are placed at uniformly random cells and accepted only if
//!    their Manhattan distance to every accepted airport is at least
//!    `min_airport_distance`. Every draw, accepted or not, spends one
//!    attempt of the budget.
//! 2. Each airport receives one agent while the fleet lasts; the remaining
//!    agents go to uniformly random origin airports.
//! 3. Agents are numbered airport by airport in origin order, each flying to
//!    a uniformly random *other* airport.

use rand::prelude::IndexedRandom;
use rand::Rng;
use serde::Serialize;

use crate::config::ScenarioConfig;
use crate::error::ScenarioError;
use crate::models::{AgentDemand, Airport, AirportId, Grid, MoveCosts, Position};
use crate::validation::validate_scenario;

/// Grid, airports and agent demands of one planning problem.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scenario {
    grid: Grid,
    airports: Vec<Airport>,
    demands: Vec<AgentDemand>,
}

impl Scenario {
    /// Assembles a scenario from known data.
    ///
    /// # Errors
    /// [`ScenarioError::Invalid`] with every structural issue found.
    pub fn new(
        grid: Grid,
        airports: Vec<Airport>,
        demands: Vec<AgentDemand>,
    ) -> Result<Self, ScenarioError> {
        validate_scenario(&grid, &airports, &demands).map_err(ScenarioError::Invalid)?;
        Ok(Self {
            grid,
            airports,
            demands,
        })
    }

    /// Draws a random scenario.
    ///
    /// # Errors
    /// - [`ScenarioError::Config`] if `config` fails validation.
    /// - [`ScenarioError::PlacementExhausted`] if the attempt budget runs out
    ///   before all airports are placed.
    pub fn generate<R: Rng + ?Sized>(
        config: &ScenarioConfig,
        costs: MoveCosts,
        rng: &mut R,
    ) -> Result<Self, ScenarioError> {
        config.validate()?;
        let grid = Grid::new(config.grid_size).with_move_costs(costs);
        let airports = place_airports(&grid, config, rng)?;
        let demands = assign_agents(&airports, config.fleet_size, rng);

        tracing::debug!(
            airports = airports.len(),
            agents = demands.len(),
            grid_size = config.grid_size,
            "scenario generated"
        );
        Self::new(grid, airports, demands)
    }

    /// The grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Airports, indexed by airport id.
    pub fn airports(&self) -> &[Airport] {
        &self.airports
    }

    /// Agent demands, indexed by agent id.
    pub fn demands(&self) -> &[AgentDemand] {
        &self.demands
    }

    /// Number of agents.
    pub fn fleet_size(&self) -> usize {
        self.demands.len()
    }

    /// Number of agents departing from `airport`.
    pub fn departures_from(&self, airport: AirportId) -> usize {
        self.demands
            .iter()
            .filter(|d| d.origin_airport == airport)
            .count()
    }
}

fn place_airports<R: Rng + ?Sized>(
    grid: &Grid,
    config: &ScenarioConfig,
    rng: &mut R,
) -> Result<Vec<Airport>, ScenarioError> {
    let size = config.grid_size as i32;
    let mut airports: Vec<Airport> = Vec::with_capacity(config.airport_count);
    let mut attempts = 0;

    while airports.len() < config.airport_count && attempts < config.max_placement_attempts {
        let candidate = Position::new(rng.random_range(0..size), rng.random_range(0..size));
        let spaced = airports
            .iter()
            .all(|a| grid.manhattan_distance(candidate, a.position) >= config.min_airport_distance);
        if spaced {
            airports.push(Airport::new(airports.len(), candidate));
        }
        attempts += 1;
    }

    if airports.len() < config.airport_count {
        return Err(ScenarioError::PlacementExhausted {
            requested: config.airport_count,
            placed: airports.len(),
            min_distance: config.min_airport_distance,
            attempts,
        });
    }
    Ok(airports)
}

fn assign_agents<R: Rng + ?Sized>(
    airports: &[Airport],
    fleet_size: usize,
    rng: &mut R,
) -> Vec<AgentDemand> {
    if airports.len() < 2 {
        return Vec::new();
    }

    let mut per_airport = vec![0usize; airports.len()];
    for slot in per_airport.iter_mut().take(fleet_size) {
        *slot = 1;
    }
    for _ in airports.len().min(fleet_size)..fleet_size {
        per_airport[rng.random_range(0..airports.len())] += 1;
    }

    let mut demands = Vec::with_capacity(fleet_size);
    for (origin, &count) in airports.iter().zip(&per_airport) {
        let others: Vec<&Airport> = airports.iter().filter(|a| a.id != origin.id).collect();
        for _ in 0..count {
            if let Some(&destination) = others.choose(rng) {
                demands.push(AgentDemand::between(demands.len(), origin, destination));
            }
        }
    }
    demands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn small_config() -> ScenarioConfig {
        ScenarioConfig::default()
            .with_grid_size(12)
            .with_airport_count(5)
            .with_min_airport_distance(3)
            .with_fleet_size(12)
    }

    #[test]
    fn test_generate_rejects_zero_grid() {
        let config = small_config().with_grid_size(0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = Scenario::generate(&config, MoveCosts::default(), &mut rng).unwrap_err();
        assert!(matches!(err, ScenarioError::Config(ConfigError::ZeroGridSize)));
    }

    #[test]
    fn test_generate_rejects_single_airport() {
        let config = small_config().with_airport_count(1).with_fleet_size(5);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = Scenario::generate(&config, MoveCosts::default(), &mut rng).unwrap_err();
        assert!(matches!(
            err,
            ScenarioError::Config(ConfigError::TooFewAirports { count: 1 })
        ));
    }

    #[test]
    fn test_generated_scenario_is_valid() {
        let mut rng = ChaCha8Rng::seed_from_u64(420);
        let scenario = Scenario::generate(&small_config(), MoveCosts::default(), &mut rng).unwrap();

        assert_eq!(scenario.airports().len(), 5);
        assert_eq!(scenario.fleet_size(), 12);
        assert!(validate_scenario(scenario.grid(), scenario.airports(), scenario.demands()).is_ok());
    }

    #[test]
    fn test_airport_spacing() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let scenario = Scenario::generate(&small_config(), MoveCosts::default(), &mut rng).unwrap();
        let airports = scenario.airports();
        for (i, a) in airports.iter().enumerate() {
            assert_eq!(a.id, i);
            for b in &airports[i + 1..] {
                assert!(scenario.grid().manhattan_distance(a.position, b.position) >= 3);
            }
        }
    }

    #[test]
    fn test_every_airport_departs_and_ids_follow_origin() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let scenario = Scenario::generate(&small_config(), MoveCosts::default(), &mut rng).unwrap();
        for airport in scenario.airports() {
            assert!(scenario.departures_from(airport.id) >= 1);
        }
        let origins: Vec<AirportId> = scenario.demands().iter().map(|d| d.origin_airport).collect();
        assert!(origins.windows(2).all(|w| w[0] <= w[1]));
        assert!(scenario
            .demands()
            .iter()
            .all(|d| d.origin_airport != d.destination_airport));
    }

    #[test]
    fn test_small_fleet_uses_first_airports() {
        let config = small_config().with_fleet_size(3);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let scenario = Scenario::generate(&config, MoveCosts::default(), &mut rng).unwrap();
        let origins: Vec<AirportId> = scenario.demands().iter().map(|d| d.origin_airport).collect();
        assert_eq!(origins, vec![0, 1, 2]);
    }

    #[test]
    fn test_placement_exhausted() {
        let config = ScenarioConfig::default()
            .with_grid_size(3)
            .with_airport_count(5)
            .with_min_airport_distance(4)
            .with_max_placement_attempts(500);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let err = Scenario::generate(&config, MoveCosts::default(), &mut rng).unwrap_err();
        match err {
            ScenarioError::PlacementExhausted {
                requested,
                placed,
                attempts,
                ..
            } => {
                assert_eq!(requested, 5);
                assert!(placed < 5);
                assert_eq!(attempts, 500);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_same_seed_same_scenario() {
        let a = Scenario::generate(
            &small_config(),
            MoveCosts::default(),
            &mut ChaCha8Rng::seed_from_u64(9),
        )
        .unwrap();
        let b = Scenario::generate(
            &small_config(),
            MoveCosts::default(),
            &mut ChaCha8Rng::seed_from_u64(9),
        )
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_new_rejects_invalid_demands() {
        let grid = Grid::new(5);
        let airports = vec![
            Airport::new(0, Position::new(0, 0)),
            Airport::new(1, Position::new(4, 4)),
        ];
        let demands = vec![AgentDemand::between(0, &airports[0], &airports[0])];
        let err = Scenario::new(grid, airports, demands).unwrap_err();
        assert!(matches!(err, ScenarioError::Invalid(ref issues) if issues.len() == 1));
    }
}
