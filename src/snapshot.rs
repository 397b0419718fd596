//! Persisted simulation records.
//!
//! A [`SimulationRecord`] captures one planning run: the seed, the grid
//! size, the airports, the per-generation best solutions and the fitness
//! history. It is written as pretty-printed JSON named
//! `simulation_seed{seed}.json`:
//!
//! ```text
//! {
//!   "seed": 420,
//!   "grid_size": 20,
//!   "airports": [ { "id": 0, "position": [3, 7] }, ... ],
//!   "generations": { "0": [ <plan record>, ... ], "5": [ ... ] },
//!   "fitness_history": [ -31.4, ... ],
//!   "available_generations": [0, 5, ...]
//! }
//! ```

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;
use crate::metaheur::GaResult;
use crate::models::{AgentDemand, AgentId, Airport, AirportId, Plan, Position, Solution, Tick};
use crate::scenario::Scenario;

const FILE_PREFIX: &str = "simulation_seed";
const FILE_SUFFIX: &str = ".json";

/// One agent's demand and plan as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRecord {
    pub id: AgentId,
    pub start_airport_id: AirportId,
    pub destination_airport_id: AirportId,
    pub start_position: Position,
    pub destination_position: Position,
    pub route: Vec<Position>,
    pub departure_time: Tick,
}

impl PlanRecord {
    /// Combines a demand with its plan.
    pub fn from_plan(demand: &AgentDemand, plan: &Plan) -> Self {
        Self {
            id: demand.id,
            start_airport_id: demand.origin_airport,
            destination_airport_id: demand.destination_airport,
            start_position: demand.origin,
            destination_position: demand.destination,
            route: plan.route.clone(),
            departure_time: plan.departure,
        }
    }

    /// The stored plan.
    pub fn to_plan(&self) -> Plan {
        Plan::new(self.id, self.route.clone(), self.departure_time)
    }

    /// The stored demand.
    pub fn to_demand(&self) -> AgentDemand {
        AgentDemand {
            id: self.id,
            origin_airport: self.start_airport_id,
            destination_airport: self.destination_airport_id,
            origin: self.start_position,
            destination: self.destination_position,
        }
    }
}

/// A complete, replayable planning run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRecord {
    pub seed: u64,
    pub grid_size: usize,
    pub airports: Vec<Airport>,
    pub generations: BTreeMap<usize, Vec<PlanRecord>>,
    pub fitness_history: Vec<f64>,
    pub available_generations: Vec<usize>,
}

impl SimulationRecord {
    /// Builds a record from a finished run.
    ///
    /// Every snapshot of the run is stored. The overall best solution is
    /// additionally stored under the final generation when the run did not
    /// snapshot that generation itself.
    pub fn from_run(seed: u64, scenario: &Scenario, result: &GaResult<Solution>) -> Self {
        let encode = |solution: &Solution| -> Vec<PlanRecord> {
            scenario
                .demands()
                .iter()
                .zip(solution.plans())
                .map(|(demand, plan)| PlanRecord::from_plan(demand, plan))
                .collect()
        };

        let mut generations: BTreeMap<usize, Vec<PlanRecord>> = result
            .snapshots
            .iter()
            .map(|(&generation, solution)| (generation, encode(solution)))
            .collect();
        generations
            .entry(result.generations)
            .or_insert_with(|| encode(&result.best));

        Self {
            seed,
            grid_size: scenario.grid().size(),
            airports: scenario.airports().to_vec(),
            available_generations: generations.keys().copied().collect(),
            generations,
            fitness_history: result.fitness_history.clone(),
        }
    }

    /// File name used for `seed`.
    pub fn file_name(seed: u64) -> String {
        format!("{FILE_PREFIX}{seed}{FILE_SUFFIX}")
    }

    /// Serializes to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a record from JSON.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Writes the record into `dir` (created if missing) and returns the
    /// file path.
    pub fn save(&self, dir: impl AsRef<Path>) -> Result<PathBuf, SnapshotError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(Self::file_name(self.seed));
        let mut writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        tracing::info!(path = %path.display(), generations = self.generations.len(), "simulation saved");
        Ok(path)
    }

    /// Reads the record for `seed` from `dir`.
    pub fn load(dir: impl AsRef<Path>, seed: u64) -> Result<Self, SnapshotError> {
        let path = dir.as_ref().join(Self::file_name(seed));
        let reader = BufReader::new(File::open(&path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Seeds of all records stored in `dir`, ascending. A missing directory
    /// has no records.
    pub fn list_available(dir: impl AsRef<Path>) -> Result<Vec<u64>, SnapshotError> {
        let dir = dir.as_ref();
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut seeds = Vec::new();
        for entry in fs::read_dir(dir)? {
            let name = entry?.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            let seed = name
                .strip_prefix(FILE_PREFIX)
                .and_then(|rest| rest.strip_suffix(FILE_SUFFIX))
                .and_then(|digits| digits.parse::<u64>().ok());
            if let Some(seed) = seed {
                seeds.push(seed);
            }
        }
        seeds.sort_unstable();
        Ok(seeds)
    }

    /// Latest stored generation.
    pub fn last_generation(&self) -> Option<usize> {
        self.generations.keys().next_back().copied()
    }

    /// Rebuilds the solution stored for `generation`.
    pub fn solution(&self, generation: usize) -> Result<Solution, SnapshotError> {
        let records = self
            .generations
            .get(&generation)
            .ok_or(SnapshotError::MissingGeneration(generation))?;
        if let Some((index, record)) = records.iter().enumerate().find(|(i, r)| r.id != *i) {
            return Err(SnapshotError::NonDenseAgents {
                generation,
                index,
                agent_id: record.id,
            });
        }
        Ok(Solution::new(records.iter().map(PlanRecord::to_plan).collect()))
    }

    /// Demands stored for `generation`.
    pub fn demands(&self, generation: usize) -> Result<Vec<AgentDemand>, SnapshotError> {
        self.generations
            .get(&generation)
            .map(|records| records.iter().map(PlanRecord::to_demand).collect())
            .ok_or(SnapshotError::MissingGeneration(generation))
    }
}
