//! Planning facade.
//!
//! Wires the pieces together: configuration → scenario → GA problem →
//! [`GaRunner`] → outcome with KPIs → persisted record.
//!
//! # Example
//! ```no_run
//! use u_airspace::config::PlannerConfig;
//! use u_airspace::planner::FleetPlanner;
//!
//! let planner = FleetPlanner::new(PlannerConfig::default().with_seed(7))?;
//! let scenario = planner.generate_scenario()?;
//! let outcome = planner.plan(&scenario)?;
//! println!("fitness {:.2}", outcome.kpi.fitness);
//! outcome.to_record(&scenario).save("output")?;
//! # Ok::<(), u_airspace::error::PlanError>(())
//! ```

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::instrument;

use crate::config::PlannerConfig;
use crate::error::PlanError;
use crate::evaluation::SolutionKpi;
use crate::ga::FleetGaProblem;
use crate::metaheur::{GaResult, GaRunner};
use crate::models::Solution;
use crate::scenario::Scenario;
use crate::snapshot::SimulationRecord;

/// Result of one planning run.
#[derive(Debug, Clone)]
pub struct PlanOutcome {
    /// Seed the run was started with.
    pub seed: u64,
    /// Raw GA result (best, history, snapshots).
    pub result: GaResult<Solution>,
    /// Indicators of the best solution.
    pub kpi: SolutionKpi,
}

impl PlanOutcome {
    /// Best solution found.
    pub fn best(&self) -> &Solution {
        &self.result.best
    }

    /// Builds the persistable record of this run.
    pub fn to_record(&self, scenario: &Scenario) -> SimulationRecord {
        SimulationRecord::from_run(self.seed, scenario, &self.result)
    }
}

/// Validated entry point for planning runs.
#[derive(Debug, Clone)]
pub struct FleetPlanner {
    config: PlannerConfig,
}

impl FleetPlanner {
    /// Creates a planner.
    ///
    /// # Errors
    /// [`PlanError::Config`] if the configuration is invalid.
    pub fn new(config: PlannerConfig) -> Result<Self, PlanError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Draws the scenario for the configured seed.
    pub fn generate_scenario(&self) -> Result<Scenario, PlanError> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed());
        Ok(Scenario::generate(
            &self.config.scenario,
            self.config.movement,
            &mut rng,
        )?)
    }

    /// Builds the GA problem for `scenario`.
    pub fn build_problem(&self, scenario: &Scenario) -> Result<FleetGaProblem, PlanError> {
        Ok(FleetGaProblem::new(scenario.grid(), scenario.demands())?
            .with_horizon(self.config.max_simulation_time)
            .with_collision_penalty(self.config.collision_penalty))
    }

    /// Optimizes routes and departures for `scenario`.
    #[instrument(level = "info", skip_all, fields(seed = self.config.seed(), agents = scenario.fleet_size()))]
    pub fn plan(&self, scenario: &Scenario) -> Result<PlanOutcome, PlanError> {
        let problem = self.build_problem(scenario)?;
        let result = GaRunner::new(&problem, &self.config.ga)?.run();
        let kpi = SolutionKpi::calculate(
            &result.best,
            problem.evaluator(),
            scenario.grid().move_costs(),
        );

        tracing::info!(
            fitness = kpi.fitness,
            makespan = kpi.makespan,
            collisions = kpi.collision_count,
            generations = result.generations,
            "planning finished"
        );

        Ok(PlanOutcome {
            seed: self.config.seed(),
            result,
            kpi,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScenarioConfig;
    use crate::error::ConfigError;
    use crate::metaheur::GaConfig;
    use crate::playback::Playback;

    fn small_config(seed: u64) -> PlannerConfig {
        PlannerConfig::default()
            .with_scenario(
                ScenarioConfig::default()
                    .with_grid_size(10)
                    .with_airport_count(4)
                    .with_min_airport_distance(3)
                    .with_fleet_size(8),
            )
            .with_ga(
                GaConfig::default()
                    .with_population_size(16)
                    .with_max_generations(25)
                    .with_tournament_size(3)
                    .with_convergence_window(10)
                    .with_snapshot_interval(5),
            )
            .with_max_simulation_time(60)
            .with_seed(seed)
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = small_config(1).with_max_simulation_time(0);
        assert!(matches!(
            FleetPlanner::new(config),
            Err(PlanError::Config(ConfigError::ZeroHorizon))
        ));
    }

    #[test]
    fn test_end_to_end_plan() {
        let planner = FleetPlanner::new(small_config(420)).unwrap();
        let scenario = planner.generate_scenario().unwrap();
        let outcome = planner.plan(&scenario).unwrap();

        let best = outcome.best();
        assert_eq!(best.len(), 8);
        for (plan, demand) in best.plans().iter().zip(scenario.demands()) {
            assert!(plan.is_valid_for(demand, scenario.grid()));
            assert!(plan.departure <= 60 / 4);
        }

        let history = &outcome.result.fitness_history;
        assert_eq!(history.len(), outcome.result.generations + 1);
        assert!(outcome.result.best_fitness >= history[0]);
        assert!((outcome.kpi.fitness - outcome.result.best_fitness).abs() < 1e-9);
        assert_eq!(outcome.kpi.agent_count, 8);
    }

    #[test]
    fn test_same_seed_same_outcome() {
        let run = |seed| {
            let planner = FleetPlanner::new(small_config(seed)).unwrap();
            let scenario = planner.generate_scenario().unwrap();
            planner.plan(&scenario).unwrap()
        };
        let a = run(5);
        let b = run(5);
        assert_eq!(a.result.best, b.result.best);
        assert_eq!(a.result.fitness_history, b.result.fitness_history);
        assert_eq!(a.result.generations, b.result.generations);
    }

    #[test]
    fn test_record_replays_best() {
        let planner = FleetPlanner::new(small_config(11)).unwrap();
        let scenario = planner.generate_scenario().unwrap();
        let outcome = planner.plan(&scenario).unwrap();
        let record = outcome.to_record(&scenario);

        assert_eq!(record.available_generations.first(), Some(&0));
        let last = record.last_generation().unwrap();
        assert_eq!(last, outcome.result.generations);

        let playback = Playback::from_record(&record, 0, 60).unwrap();
        assert_eq!(playback.solution().len(), 8);
        assert_eq!(
            playback.total_collisions(),
            crate::evaluation::detect_collisions(playback.solution(), 60).count()
        );
    }
}
