//! Fleet GA problem definition.
//!
//! Implements [`GaProblem`] for route/departure optimization and bridges the
//! domain models ([`Grid`], [`AgentDemand`]) to the generic runner.
//!
//! # Reference
//! Silver (2005), "Cooperative Pathfinding"

use std::collections::HashMap;

use rand::Rng;

use super::operators::{mutate_departure_times, repair_conflicts, single_point_crossover};
use crate::error::{ConfigError, PlanError};
use crate::evaluation::FitnessEvaluator;
use crate::metaheur::GaProblem;
use crate::models::{AgentDemand, AirportId, Grid, Plan, Solution, Tick};
use crate::pathfinding::find_path;

/// GA problem definition for fleet planning.
///
/// Every individual of the initial population is a copy of the same seed
/// solution: the shortest spatial route for each agent and departures
/// staggered by one tick per agent sharing an origin airport. Diversity comes
/// from mutation.
///
/// # Example
/// ```
/// use u_airspace::ga::FleetGaProblem;
/// use u_airspace::metaheur::{GaConfig, GaRunner};
/// use u_airspace::models::{AgentDemand, Airport, Grid, Position};
///
/// let grid = Grid::new(8);
/// let a = Airport::new(0, Position::new(0, 0));
/// let b = Airport::new(1, Position::new(7, 7));
/// let demands = vec![AgentDemand::between(0, &a, &b), AgentDemand::between(1, &b, &a)];
///
/// let problem = FleetGaProblem::new(&grid, &demands).unwrap().with_horizon(50);
/// let config = GaConfig::default().with_population_size(10).with_max_generations(5);
/// let result = GaRunner::new(&problem, &config).unwrap().run();
/// assert_eq!(result.best.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct FleetGaProblem {
    grid: Grid,
    demands: Vec<AgentDemand>,
    seed_plans: Vec<Plan>,
    evaluator: FitnessEvaluator,
}

impl FleetGaProblem {
    /// Default simulation horizon (ticks).
    pub const DEFAULT_HORIZON: Tick = 200;

    /// Builds the problem and its seed solution.
    ///
    /// # Errors
    /// - [`PlanError::Config`] with [`ConfigError::ZeroFleetSize`] if
    ///   `demands` is empty.
    /// - [`PlanError::Unreachable`] if some agent has no spatial route
    ///   between its airports.
    pub fn new(grid: &Grid, demands: &[AgentDemand]) -> Result<Self, PlanError> {
        if demands.is_empty() {
            return Err(ConfigError::ZeroFleetSize.into());
        }

        let mut next_slot: HashMap<AirportId, Tick> = HashMap::new();
        let mut seed_plans = Vec::with_capacity(demands.len());

        for demand in demands {
            let route = find_path(grid, demand.origin, demand.destination, None).ok_or(
                PlanError::Unreachable {
                    agent_id: demand.id,
                    origin: demand.origin,
                    destination: demand.destination,
                },
            )?;
            let slot = next_slot.entry(demand.origin_airport).or_insert(0);
            seed_plans.push(Plan::new(demand.id, route, *slot));
            *slot += 1;
        }

        tracing::debug!(agents = seed_plans.len(), "seed routes planned");

        Ok(Self {
            grid: grid.clone(),
            demands: demands.to_vec(),
            seed_plans,
            evaluator: FitnessEvaluator::new(Self::DEFAULT_HORIZON),
        })
    }

    /// Sets the simulation horizon used for collision scanning, repair
    /// cutoffs and the departure range (`[0, horizon / 4]`).
    pub fn with_horizon(mut self, horizon: Tick) -> Self {
        self.evaluator.horizon = horizon;
        self
    }

    /// Sets the penalty per colliding pair-tick (default
    /// [`DEFAULT_COLLISION_PENALTY`](crate::evaluation::DEFAULT_COLLISION_PENALTY)).
    pub fn with_collision_penalty(mut self, penalty: f64) -> Self {
        self.evaluator = self.evaluator.with_collision_penalty(penalty);
        self
    }

    /// The grid agents fly on.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Agent demands, indexed by agent id.
    pub fn demands(&self) -> &[AgentDemand] {
        &self.demands
    }

    /// The evaluator used for fitness.
    pub fn evaluator(&self) -> &FitnessEvaluator {
        &self.evaluator
    }

    /// Simulation horizon (ticks).
    pub fn horizon(&self) -> Tick {
        self.evaluator.horizon
    }

    /// Latest departure tick timing mutation can assign.
    pub fn max_departure(&self) -> Tick {
        self.evaluator.horizon / 4
    }

    /// The seed solution every initial individual starts from.
    pub fn seed_solution(&self) -> Solution {
        Solution::new(self.seed_plans.clone())
    }
}

impl GaProblem for FleetGaProblem {
    type Individual = Solution;

    fn create_individual<R: Rng + ?Sized>(&self, _rng: &mut R) -> Solution {
        self.seed_solution()
    }

    fn evaluate(&self, solution: &Solution) -> f64 {
        self.evaluator.evaluate(solution)
    }

    fn crossover<R: Rng + ?Sized>(
        &self,
        parent1: &Solution,
        parent2: &Solution,
        rng: &mut R,
    ) -> Vec<Solution> {
        let (child1, child2) = single_point_crossover(parent1, parent2, rng);
        vec![child1, child2]
    }

    /// Timing mutation at the run's `rate`, then one conflict repair.
    fn mutate<R: Rng + ?Sized>(&self, solution: &mut Solution, rate: f64, rng: &mut R) {
        mutate_departure_times(solution, rate, self.max_departure(), rng);
        repair_conflicts(
            solution,
            &self.demands,
            &self.grid,
            self.evaluator.horizon,
            rng,
        );
    }

    fn on_generation(&self, generation: usize, best_fitness: f64) {
        tracing::trace!(generation, best_fitness, "fleet generation evaluated");
    }
}
