//! GA run parameters.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Parameters of a GA run.
///
/// # Example
/// ```
/// use u_airspace::metaheur::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(20)
///     .with_max_generations(10)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    /// Individuals per generation.
    pub population_size: usize,
    /// Generation cap (generation 0 is the initial population).
    pub max_generations: usize,
    /// Individuals sampled per tournament.
    pub tournament_size: usize,
    /// Per-gene mutation probability in `[0, 1]`.
    pub mutation_rate: f64,
    /// Consecutive stagnant generations that end the run.
    pub convergence_window: usize,
    /// Seed of the run's random stream.
    pub seed: u64,
    /// Record the generation best every N generations (`None` disables).
    /// Generation 0 and a converged final generation are always recorded
    /// when enabled.
    pub snapshot_interval: Option<usize>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 1000,
            tournament_size: 5,
            mutation_rate: 0.5,
            convergence_window: 50,
            seed: 420,
            snapshot_interval: Some(5),
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the generation cap.
    pub fn with_max_generations(mut self, generations: usize) -> Self {
        self.max_generations = generations;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, size: usize) -> Self {
        self.tournament_size = size;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the convergence window.
    pub fn with_convergence_window(mut self, window: usize) -> Self {
        self.convergence_window = window;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Enables per-generation snapshots every `interval` generations.
    pub fn with_snapshot_interval(mut self, interval: usize) -> Self {
        self.snapshot_interval = Some(interval);
        self
    }

    /// Disables snapshots.
    pub fn without_snapshots(mut self) -> Self {
        self.snapshot_interval = None;
        self
    }

    /// Checks parameter ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::ZeroPopulationSize);
        }
        if self.tournament_size == 0 {
            return Err(ConfigError::ZeroTournamentSize);
        }
        if self.tournament_size > self.population_size {
            return Err(ConfigError::TournamentTooLarge {
                tournament_size: self.tournament_size,
                population_size: self.population_size,
            });
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::MutationRateOutOfRange(self.mutation_rate));
        }
        if self.convergence_window == 0 {
            return Err(ConfigError::ZeroConvergenceWindow);
        }
        if self.snapshot_interval == Some(0) {
            return Err(ConfigError::ZeroSnapshotInterval);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(GaConfig::default().validate().is_ok());
    }

    #[test]
    fn test_tournament_larger_than_population() {
        let err = GaConfig::default()
            .with_population_size(3)
            .with_tournament_size(4)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::TournamentTooLarge { tournament_size: 4, population_size: 3 }
        ));
    }

    #[test]
    fn test_mutation_rate_range() {
        for rate in [-0.1, 1.5, f64::NAN] {
            let err = GaConfig::default().with_mutation_rate(rate).validate().unwrap_err();
            assert!(matches!(err, ConfigError::MutationRateOutOfRange(_)));
        }
        assert!(GaConfig::default().with_mutation_rate(0.0).validate().is_ok());
        assert!(GaConfig::default().with_mutation_rate(1.0).validate().is_ok());
    }

    #[test]
    fn test_zero_sizes() {
        assert!(matches!(
            GaConfig::default().with_population_size(0).validate(),
            Err(ConfigError::ZeroPopulationSize)
        ));
        assert!(matches!(
            GaConfig::default().with_tournament_size(0).validate(),
            Err(ConfigError::ZeroTournamentSize)
        ));
        assert!(matches!(
            GaConfig::default().with_convergence_window(0).validate(),
            Err(ConfigError::ZeroConvergenceWindow)
        ));
        assert!(matches!(
            GaConfig::default().with_snapshot_interval(0).validate(),
            Err(ConfigError::ZeroSnapshotInterval)
        ));
        assert!(GaConfig::default().without_snapshots().validate().is_ok());
    }
}
