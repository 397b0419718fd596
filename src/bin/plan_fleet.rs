//! Command-line front end: plan a seeded scenario, inspect saved runs.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::info;
use u_airspace::models::Tick;
use u_airspace::playback::Playback;
use u_airspace::{FleetPlanner, PlanError, PlannerConfig, SimulationRecord};

#[derive(Parser, Debug)]
#[command(
    name = "plan_fleet",
    version,
    about = "Optimize fleet routes and departures on a grid"
)]
struct Cli {
    /// Directory simulation records are written to and read from.
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a scenario, optimize it and save the record.
    Run {
        /// Seeds to run, one record per seed (defaults to the configured seed).
        #[arg(long, num_args = 1..)]
        seed: Vec<u64>,
        /// JSON configuration file; omitted fields keep their defaults.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// List the seeds with a saved record.
    List,
    /// Print agent positions and collisions of a saved run at one tick.
    Replay {
        /// Seed of the saved record.
        seed: u64,
        /// Tick to inspect.
        tick: Tick,
        /// Generation to replay (defaults to the last stored one).
        #[arg(short, long)]
        generation: Option<usize>,
        /// Horizon used for collision detection.
        #[arg(long, default_value_t = 200)]
        horizon: Tick,
    },
}

fn main() -> Result<(), PlanError> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Command::Run { seed, config } => run(&cli.output_dir, &seed, config),
        Command::List => {
            for seed in SimulationRecord::list_available(&cli.output_dir)? {
                println!("{seed}");
            }
            Ok(())
        }
        Command::Replay {
            seed,
            tick,
            generation,
            horizon,
        } => replay(&cli.output_dir, seed, tick, generation, horizon),
    }
}

fn init_tracing() {
    // A subscriber installed earlier by a test harness or embedder stays in place.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init()
        .ok();
}

fn run(output_dir: &Path, seeds: &[u64], config: Option<PathBuf>) -> Result<(), PlanError> {
    let base = match config {
        Some(path) => PlannerConfig::load(path)?,
        None => PlannerConfig::default(),
    };
    let seeds = if seeds.is_empty() {
        vec![base.seed()]
    } else {
        seeds.to_vec()
    };

    for seed in seeds {
        let planner = FleetPlanner::new(base.clone().with_seed(seed))?;
        let scenario = planner.generate_scenario()?;
        info!(
            seed,
            airports = scenario.airports().len(),
            agents = scenario.fleet_size(),
            "scenario ready"
        );

        let outcome = planner.plan(&scenario)?;
        let kpi = &outcome.kpi;
        println!("seed {seed}");
        println!("  generations          {}", outcome.result.generations);
        println!("  termination          {:?}", outcome.result.termination);
        println!("  fitness              {:.3}", kpi.fitness);
        println!("  makespan             {}", kpi.makespan);
        println!("  mean departure delay {:.3}", kpi.mean_departure_delay);
        println!("  avg route length     {:.3}", kpi.avg_route_length);
        println!("  collisions           {}", kpi.collision_count);
        for collision in kpi.collisions.iter().take(10) {
            println!(
                "    tick {:>4}: agent {} / agent {}",
                collision.tick, collision.first, collision.second
            );
        }

        let path = outcome.to_record(&scenario).save(output_dir)?;
        println!("  saved                {}", path.display());
    }
    Ok(())
}

fn replay(
    output_dir: &Path,
    seed: u64,
    tick: Tick,
    generation: Option<usize>,
    horizon: Tick,
) -> Result<(), PlanError> {
    let record = SimulationRecord::load(output_dir, seed)?;
    let Some(generation) = generation.or_else(|| record.last_generation()) else {
        println!("seed {seed}: no stored generations");
        return Ok(());
    };
    let mut playback = Playback::from_record(&record, generation, horizon)?;
    playback.seek(tick);
    let tick = playback.tick();

    println!(
        "seed {seed} generation {generation} tick {tick}/{} airborne {}",
        playback.last_tick(),
        playback.active_count(tick)
    );
    for (agent, position) in playback.positions_at(tick) {
        if let Some(position) = position {
            println!("  agent {agent:>3} at {position}");
        }
    }
    for collision in playback.collisions_at(tick) {
        println!(
            "  collision: agent {} / agent {}",
            collision.first, collision.second
        );
    }
    println!("total collisions {}", playback.total_collisions());
    Ok(())
}
