//! Generational GA runner.
//!
//! # Generation cycle
//!
//! 1. Elitism: the top [`elite_count`] members are copied unchanged.
//! 2. Tournament selection picks two parents (deep copies).
//! 3. The problem's crossover yields one or two children.
//! 4. The problem's mutation perturbs each child.
//! 5. Children fill the next population; a surplus child is discarded.
//! 6. Every member is re-evaluated (no fitness is carried over).
//! 7. The best-tracked individual is replaced only on strict improvement.
//! 8. Convergence: the run stops after `convergence_window` consecutive
//!    generations whose best fitness moved by less than
//!    [`CONVERGENCE_EPSILON`], or at `max_generations`.
//!
//! Construction evaluates generation 0, so a runner is always either
//! evolving or finished.

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::instrument;

use super::selection::{best_index, elite_count, select_elite, tournament_select};
use super::{GaConfig, GaProblem, Individual};
use crate::error::ConfigError;

/// Minimum change in per-generation best fitness that counts as progress.
pub const CONVERGENCE_EPSILON: f64 = 1e-6;

/// Runner lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GaState {
    /// `generation` has been evaluated and more may follow.
    Evolving { generation: usize },
    /// Stopped because the best fitness stagnated.
    Converged { generation: usize },
    /// Stopped at the generation cap.
    Capped { generation: usize },
}

impl GaState {
    /// Last evaluated generation.
    pub fn generation(&self) -> usize {
        match *self {
            GaState::Evolving { generation }
            | GaState::Converged { generation }
            | GaState::Capped { generation } => generation,
        }
    }

    /// Whether the run has finished.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GaState::Evolving { .. })
    }
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Converged,
    MaxGenerations,
}

/// Outcome of a GA run.
#[derive(Debug, Clone)]
pub struct GaResult<I> {
    /// Best individual seen in any generation.
    pub best: I,
    /// Fitness of `best`.
    pub best_fitness: f64,
    /// Best fitness of each generation, generation 0 first.
    pub fitness_history: Vec<f64>,
    /// Last evaluated generation.
    pub generations: usize,
    /// Why the run ended.
    pub termination: Termination,
    /// Generation best recorded at the configured interval.
    pub snapshots: BTreeMap<usize, I>,
}

/// Drives a [`GaProblem`] through generations.
///
/// # Example
/// ```ignore
/// let runner = GaRunner::new(&problem, &GaConfig::default().with_seed(7))?;
/// let result = runner.run();
/// println!("best = {}", result.best_fitness);
/// ```
pub struct GaRunner<'a, P: GaProblem> {
    problem: &'a P,
    config: &'a GaConfig,
    rng: ChaCha8Rng,
    state: GaState,
    population: Vec<P::Individual>,
    best: P::Individual,
    best_fitness: f64,
    fitness_history: Vec<f64>,
    previous_best: f64,
    stagnant: usize,
    snapshots: BTreeMap<usize, P::Individual>,
}

impl<'a, P: GaProblem> GaRunner<'a, P> {
    /// Validates `config`, creates and evaluates generation 0.
    #[instrument(level = "debug", skip_all, fields(population = config.population_size, seed = config.seed))]
    pub fn new(problem: &'a P, config: &'a GaConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

        let mut population: Vec<P::Individual> = (0..config.population_size)
            .map(|_| problem.create_individual(&mut rng))
            .collect();
        evaluate_all(problem, &mut population);

        let best = population[best_index(&population)].clone();
        let best_fitness = best.fitness();
        tracing::info!(generation = 0, best_fitness, "initial population evaluated");
        problem.on_generation(0, best_fitness);

        let mut snapshots = BTreeMap::new();
        if config.snapshot_interval.is_some() {
            snapshots.insert(0, best.clone());
        }

        let state = if config.max_generations == 0 {
            GaState::Capped { generation: 0 }
        } else {
            GaState::Evolving { generation: 0 }
        };

        Ok(Self {
            problem,
            config,
            rng,
            state,
            population,
            best,
            best_fitness,
            fitness_history: vec![best_fitness],
            previous_best: best_fitness,
            stagnant: 0,
            snapshots,
        })
    }

    /// Current lifecycle state.
    pub fn state(&self) -> GaState {
        self.state
    }

    /// Current population.
    pub fn population(&self) -> &[P::Individual] {
        &self.population
    }

    /// Best individual seen so far.
    pub fn best(&self) -> &P::Individual {
        &self.best
    }

    /// Per-generation best fitness so far.
    pub fn fitness_history(&self) -> &[f64] {
        &self.fitness_history
    }

    /// Evolves one generation. No-op once terminal.
    pub fn step(&mut self) -> GaState {
        let GaState::Evolving { generation } = self.state else {
            return self.state;
        };
        let generation = generation + 1;

        self.population = self.breed();
        evaluate_all(self.problem, &mut self.population);

        let leader = best_index(&self.population);
        let generation_best = self.population[leader].fitness();
        self.fitness_history.push(generation_best);

        if generation_best > self.best_fitness {
            self.best = self.population[leader].clone();
            self.best_fitness = generation_best;
        }

        if (generation_best - self.previous_best).abs() < CONVERGENCE_EPSILON {
            self.stagnant += 1;
        } else {
            self.stagnant = 0;
        }
        self.previous_best = generation_best;

        let converged = self.stagnant >= self.config.convergence_window;
        if let Some(interval) = self.config.snapshot_interval {
            if generation % interval == 0 || converged {
                let snapshot = self.population[leader].clone();
                self.snapshots.insert(generation, snapshot);
            }
        }

        tracing::debug!(generation, generation_best, best = self.best_fitness, stagnant = self.stagnant);
        if generation % 10 == 0 {
            tracing::info!(generation, best_fitness = generation_best, "progress");
        }
        self.problem.on_generation(generation, generation_best);

        self.state = if converged {
            tracing::info!(generation, best_fitness = self.best_fitness, "converged");
            GaState::Converged { generation }
        } else if generation >= self.config.max_generations {
            tracing::info!(generation, best_fitness = self.best_fitness, "generation cap reached");
            GaState::Capped { generation }
        } else {
            GaState::Evolving { generation }
        };
        self.state
    }

    /// Runs until convergence or the generation cap.
    #[instrument(level = "info", skip_all, fields(population = self.config.population_size, max_generations = self.config.max_generations))]
    pub fn run(mut self) -> GaResult<P::Individual> {
        while !self.step().is_terminal() {}
        self.into_result()
    }

    /// Finishes the run in its current state.
    pub fn into_result(self) -> GaResult<P::Individual> {
        let termination = match self.state {
            GaState::Converged { .. } => Termination::Converged,
            GaState::Evolving { .. } | GaState::Capped { .. } => Termination::MaxGenerations,
        };
        GaResult {
            best: self.best,
            best_fitness: self.best_fitness,
            fitness_history: self.fitness_history,
            generations: self.state.generation(),
            termination,
            snapshots: self.snapshots,
        }
    }

    /// Builds the next population from the current one.
    fn breed(&mut self) -> Vec<P::Individual> {
        let size = self.config.population_size;
        let mut next = select_elite(&self.population, elite_count(size));
        next.truncate(size);

        while next.len() < size {
            let parents = (
                tournament_select(&self.population, self.config.tournament_size, &mut self.rng),
                tournament_select(&self.population, self.config.tournament_size, &mut self.rng),
            );
            let (Some(p1), Some(p2)) = parents else {
                break;
            };
            let (p1, p2) = (p1.clone(), p2.clone());

            for mut child in self.problem.crossover(&p1, &p2, &mut self.rng) {
                if next.len() == size {
                    break;
                }
                self.problem
                    .mutate(&mut child, self.config.mutation_rate, &mut self.rng);
                next.push(child);
            }
        }
        next
    }
}

fn evaluate_all<P: GaProblem>(problem: &P, population: &mut [P::Individual]) {
    for member in population.iter_mut() {
        let fitness = problem.evaluate(member);
        member.set_fitness(fitness);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    /// Maximize -(x - 37)^2 over integers in 0..100.
    #[derive(Debug, Clone, PartialEq)]
    struct Guess {
        x: i64,
        fitness: f64,
    }

    impl Individual for Guess {
        fn fitness(&self) -> f64 {
            self.fitness
        }
        fn set_fitness(&mut self, fitness: f64) {
            self.fitness = fitness;
        }
    }

    struct Parabola;

    impl GaProblem for Parabola {
        type Individual = Guess;

        fn create_individual<R: Rng + ?Sized>(&self, rng: &mut R) -> Guess {
            Guess {
                x: rng.random_range(0..100),
                fitness: f64::NEG_INFINITY,
            }
        }

        fn evaluate(&self, g: &Guess) -> f64 {
            -((g.x - 37) as f64).powi(2)
        }

        fn crossover<R: Rng + ?Sized>(&self, a: &Guess, b: &Guess, _rng: &mut R) -> Vec<Guess> {
            let mid = Guess {
                x: (a.x + b.x) / 2,
                fitness: f64::NEG_INFINITY,
            };
            vec![mid, b.clone()]
        }

        fn mutate<R: Rng + ?Sized>(&self, g: &mut Guess, rate: f64, rng: &mut R) {
            if rng.random_bool(rate) {
                g.x = (g.x + rng.random_range(-3..=3)).clamp(0, 99);
            }
        }
    }

    /// Population whose fitness never changes.
    struct Flat;

    impl GaProblem for Flat {
        type Individual = Guess;

        fn create_individual<R: Rng + ?Sized>(&self, _rng: &mut R) -> Guess {
            Guess {
                x: 0,
                fitness: f64::NEG_INFINITY,
            }
        }

        fn evaluate(&self, _g: &Guess) -> f64 {
            -1.0
        }
    }

    #[test]
    fn test_history_has_generation_zero() {
        let config = GaConfig::default().with_population_size(10).with_max_generations(0);
        let result = GaRunner::new(&Parabola, &config).unwrap().run();
        assert_eq!(result.fitness_history.len(), 1);
        assert_eq!(result.generations, 0);
        assert_eq!(result.termination, Termination::MaxGenerations);
    }

    #[test]
    fn test_bounded_generations() {
        let config = GaConfig::default()
            .with_population_size(12)
            .with_tournament_size(3)
            .with_max_generations(15)
            .with_convergence_window(1000);
        let result = GaRunner::new(&Parabola, &config).unwrap().run();
        assert_eq!(result.fitness_history.len(), 16);
        assert_eq!(result.generations, 15);
    }

    #[test]
    fn test_best_fitness_monotone() {
        let config = GaConfig::default()
            .with_population_size(8)
            .with_tournament_size(2)
            .with_max_generations(30)
            .with_convergence_window(1000)
            .with_seed(3);
        let problem = Parabola;
        let mut runner = GaRunner::new(&problem, &config).unwrap();
        let mut last = runner.best().fitness();
        while !runner.step().is_terminal() {
            let now = runner.best().fitness();
            assert!(now >= last);
            last = now;
        }
        let result = runner.into_result();
        let max_seen = result
            .fitness_history
            .iter()
            .cloned()
            .fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(result.best_fitness, max_seen);
    }

    #[test]
    fn test_leader_survives_each_generation() {
        let config = GaConfig::default()
            .with_population_size(20)
            .with_tournament_size(3)
            .with_max_generations(100)
            .with_convergence_window(1000)
            .with_seed(17);
        let problem = Parabola;
        let mut runner = GaRunner::new(&problem, &config).unwrap();
        for _ in 0..20 {
            let leader = runner.population()[best_index(runner.population())].clone();
            let terminal = runner.step().is_terminal();
            let population = runner.population();
            assert!(population.contains(&leader));
            assert!(population[best_index(population)].fitness() >= leader.fitness());
            if terminal {
                break;
            }
        }
    }

    #[test]
    fn test_converges_on_flat_landscape() {
        let config = GaConfig::default()
            .with_population_size(5)
            .with_tournament_size(2)
            .with_convergence_window(4)
            .with_max_generations(100);
        let result = GaRunner::new(&Flat, &config).unwrap().run();
        assert_eq!(result.termination, Termination::Converged);
        assert_eq!(result.generations, 4);
        assert_eq!(result.fitness_history.len(), 5);
    }

    #[test]
    fn test_seed_reproducible() {
        let config = GaConfig::default()
            .with_population_size(10)
            .with_tournament_size(3)
            .with_max_generations(20)
            .with_seed(11);
        let a = GaRunner::new(&Parabola, &config).unwrap().run();
        let b = GaRunner::new(&Parabola, &config).unwrap().run();
        assert_eq!(a.fitness_history, b.fitness_history);
        assert_eq!(a.best, b.best);
    }

    #[test]
    fn test_snapshots_at_interval() {
        let config = GaConfig::default()
            .with_population_size(6)
            .with_tournament_size(2)
            .with_max_generations(10)
            .with_convergence_window(1000)
            .with_snapshot_interval(5);
        let result = GaRunner::new(&Parabola, &config).unwrap().run();
        let keys: Vec<usize> = result.snapshots.keys().copied().collect();
        assert_eq!(keys, vec![0, 5, 10]);
    }

    #[test]
    fn test_population_size_preserved() {
        let config = GaConfig::default()
            .with_population_size(7)
            .with_tournament_size(2)
            .with_max_generations(3);
        let mut runner = GaRunner::new(&Parabola, &config).unwrap();
        runner.step();
        assert_eq!(runner.population().len(), 7);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GaConfig::default().with_population_size(2).with_tournament_size(3);
        assert!(GaRunner::new(&Parabola, &config).is_err());
    }

    #[test]
    fn test_mutation_rate_out_of_range_rejected() {
        let config = GaConfig::default().with_mutation_rate(7.5);
        assert!(matches!(
            GaRunner::new(&Parabola, &config),
            Err(ConfigError::MutationRateOutOfRange(_))
        ));
    }
}
