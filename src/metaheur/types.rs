//! Core trait definitions for the GA engine.

use rand::Rng;

/// A candidate solution in the GA population.
///
/// Individuals carry their own fitness value. The runner calls
/// [`GaProblem::evaluate`] and stores the result via
/// [`set_fitness`](Individual::set_fitness). `Clone` must be a deep copy:
/// the runner clones on every selection, elitism copy and best-record
/// update and then mutates the clones independently.
pub trait Individual: Clone {
    /// Fitness from the most recent evaluation (higher is better).
    fn fitness(&self) -> f64;

    /// Stores a freshly computed fitness.
    fn set_fitness(&mut self, fitness: f64);
}

/// Defines a GA optimization problem.
///
/// 1. **Initialization**: how to create an individual
/// 2. **Evaluation**: how to compute fitness
/// 3. **Crossover**: how to recombine two parents
/// 4. **Mutation**: how to perturb a child
///
/// All randomness comes from the `rng` argument so a seeded runner is
/// reproducible end to end.
pub trait GaProblem {
    /// The individual (solution) type for this problem.
    type Individual: Individual;

    /// Creates one member of the initial population.
    fn create_individual<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::Individual;

    /// Evaluates an individual. Called once per member per generation.
    fn evaluate(&self, individual: &Self::Individual) -> f64;

    /// Produces one or two offspring from two parents.
    ///
    /// The default implementation clones both parents (no crossover).
    fn crossover<R: Rng + ?Sized>(
        &self,
        parent1: &Self::Individual,
        parent2: &Self::Individual,
        _rng: &mut R,
    ) -> Vec<Self::Individual> {
        vec![parent1.clone(), parent2.clone()]
    }

    /// Mutates a child in place. `rate` is the run's validated
    /// [`GaConfig::mutation_rate`](super::GaConfig::mutation_rate), in `[0, 1]`.
    ///
    /// The default implementation is a no-op.
    fn mutate<R: Rng + ?Sized>(&self, _individual: &mut Self::Individual, _rate: f64, _rng: &mut R) {
    }

    /// Called after each generation is evaluated.
    fn on_generation(&self, _generation: usize, _best_fitness: f64) {}
}
