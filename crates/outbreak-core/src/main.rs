//! Zombie Outbreak Simulation
//!
//! Headless runner: builds a simulation from tuning parameters and an
//! optional terrain map, steps it for a fixed number of ticks, and writes
//! periodic JSON snapshots for external renderers.

use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use outbreak_core::config::SimConfig;
use outbreak_core::output::{
    world_snapshot, write_current_state, write_snapshot_to_dir, SnapshotWriter,
};
use outbreak_core::Simulation;

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "outbreak_sim")]
#[command(about = "A zombie-outbreak cellular automaton over a toroidal terrain grid")]
struct Args {
    /// Random seed for reproducibility
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 500)]
    ticks: u64,

    /// Tuning file path (falls back to built-in defaults if missing)
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Terrain map as a JSON array of terrain-code rows
    #[arg(long)]
    terrain_map: Option<PathBuf>,

    /// Override the tuning file's snapshot interval
    #[arg(long)]
    snapshot_interval: Option<u64>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut config = match &args.tuning {
        Some(path) => match SimConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: could not load {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => SimConfig::load_or_default(),
    };
    if let Some(interval) = args.snapshot_interval {
        config.output.snapshot_interval = interval;
    }

    let terrain = match &args.terrain_map {
        Some(path) => {
            let rows: Vec<Vec<u8>> = match fs::read_to_string(path)
                .map_err(|e| e.to_string())
                .and_then(|json| serde_json::from_str(&json).map_err(|e| e.to_string()))
            {
                Ok(rows) => rows,
                Err(e) => {
                    eprintln!("Error: could not read terrain map {}: {}", path.display(), e);
                    return ExitCode::FAILURE;
                }
            };
            Some(rows)
        }
        None => None,
    };

    println!("Outbreak Simulation");
    println!("===================");
    println!("Seed: {}", args.seed);
    println!("Ticks: {}", args.ticks);
    println!("Snapshot interval: {}", config.output.snapshot_interval);
    println!();

    let snapshot_dir = config.output.snapshot_dir.clone();
    let snapshot_interval = config.output.snapshot_interval;
    if let Err(e) = fs::create_dir_all(&snapshot_dir) {
        eprintln!("Warning: could not create output directories: {}", e);
    }

    let mut sim = match Simulation::new(config, terrain.as_deref(), args.seed) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let population = sim.population();
    println!(
        "Created {}x{} grid with {} humans and {} zombies",
        sim.grid().width(),
        sim.grid().height(),
        population.humans,
        population.zombies
    );

    let mut writer = SnapshotWriter::new(snapshot_interval);

    // Initial snapshot so renderers have a tick-0 state
    let initial = world_snapshot(sim.grid(), 0, 0, writer.next_id(), "simulation_start");
    if let Err(e) = write_snapshot_to_dir(&initial, &snapshot_dir) {
        eprintln!("Warning: could not write initial snapshot: {}", e);
    }
    if let Err(e) = write_current_state(&initial, &snapshot_dir) {
        eprintln!("Warning: could not write current state: {}", e);
    }

    println!();
    println!("Starting simulation...");
    println!();

    for _ in 0..args.ticks {
        let stats = sim.step();
        let tick = sim.tick();

        if stats.deaths > 0 || stats.infections > 0 {
            tracing::debug!(
                tick,
                deaths = stats.deaths,
                infections = stats.infections,
                dropped = stats.dropped_agents,
                "tick events"
            );
        }

        if writer.should_snapshot(tick) {
            let snapshot = world_snapshot(
                sim.grid(),
                tick,
                sim.total_deaths(),
                writer.next_id(),
                "periodic",
            );
            if let Err(e) = write_snapshot_to_dir(&snapshot, &snapshot_dir) {
                eprintln!("Warning: could not write snapshot at tick {}: {}", tick, e);
            }
            if let Err(e) = write_current_state(&snapshot, &snapshot_dir) {
                eprintln!("Warning: could not write current state at tick {}: {}", tick, e);
            }
        }

        if tick % 50 == 0 {
            let population = sim.population();
            println!(
                "[Tick {:>5}] humans: {:>5} | infected: {:>4} | zombies: {:>5} | dead: {:>4} | total deaths: {}",
                tick,
                population.humans,
                population.infected,
                population.zombies,
                population.dead,
                sim.total_deaths()
            );
        }

        // No humans, infected, or zombies left: the outbreak is over.
        if sim.population().agents() == 0 {
            println!();
            println!("All agents gone at tick {}; stopping early.", tick);
            break;
        }
    }

    let final_snapshot = world_snapshot(
        sim.grid(),
        sim.tick(),
        sim.total_deaths(),
        writer.next_id(),
        "simulation_end",
    );
    if let Err(e) = write_snapshot_to_dir(&final_snapshot, &snapshot_dir) {
        eprintln!("Warning: could not write final snapshot: {}", e);
    }
    if let Err(e) = write_current_state(&final_snapshot, &snapshot_dir) {
        eprintln!("Warning: could not write final current state: {}", e);
    }

    let population = sim.population();
    println!();
    println!(
        "Simulation complete. Ran {} ticks: {} humans, {} infected, {} zombies remain; {} total deaths.",
        sim.tick(),
        population.humans,
        population.infected,
        population.zombies,
        sim.total_deaths()
    );
    println!("Generated {} snapshots.", writer.snapshot_count());

    ExitCode::SUCCESS
}
