//! Terrarium CLI entry point.
//!
//! Headless driver for the simulation core: runs the world at full speed
//! and prints periodic stats summaries.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use terrarium::{benchmark, SimulationConfig, World};

#[derive(Parser)]
#[command(name = "terrarium")]
#[command(version)]
#[command(about = "Spatial evolution simulator with procedural terrain")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation
    Run {
        /// Configuration file (YAML)
        #[arg(short, long, default_value = "config.yaml")]
        config: PathBuf,

        /// Number of ticks to simulate
        #[arg(short, long, default_value = "10000")]
        ticks: u64,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// Write stats history to this JSON file at the end
        #[arg(long)]
        stats_out: Option<PathBuf>,

        /// Quiet mode (minimal output)
        #[arg(short, long)]
        quiet: bool,
    },

    /// Run performance benchmark
    Benchmark {
        /// Number of ticks
        #[arg(short, long, default_value = "1000")]
        ticks: u64,

        /// Population size
        #[arg(short, long, default_value = "500")]
        population: usize,
    },

    /// Generate default configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = "config.yaml")]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            ticks,
            seed,
            stats_out,
            quiet,
        } => run_simulation(config, ticks, seed, stats_out, quiet),

        Commands::Benchmark { ticks, population } => run_benchmark(ticks, population),

        Commands::Init { output } => generate_config(output),
    }
}

fn run_simulation(
    config_path: PathBuf,
    ticks: u64,
    seed: Option<u64>,
    stats_out: Option<PathBuf>,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = if config_path.exists() {
        println!("Loading config from: {:?}", config_path);
        SimulationConfig::from_file(&config_path)?
    } else {
        println!("Using default configuration");
        SimulationConfig::default()
    };

    // RUST_LOG still wins over the configured level
    init_logger(&config.logging.log_level);

    let mut world = if let Some(s) = seed {
        println!("Using seed: {}", s);
        World::new_with_seed(config.clone(), s)
    } else {
        World::new(config.clone())
    };

    println!("Starting simulation");
    println!("  World: {}x{}", config.world.width, config.world.height);
    println!("  Initial population: {}", world.population());
    println!("  Ticks: {}", ticks);
    println!();

    let stats_interval = config.logging.stats_interval.max(1);
    let start = Instant::now();

    for i in 0..ticks {
        world.update();

        if !quiet && i % stats_interval == 0 {
            println!("{}", world.stats().summary());
        }
    }

    let elapsed = start.elapsed();
    let averages = world.trait_averages();

    println!();
    println!("=== Simulation Complete ===");
    println!("Time: {:.2}s", elapsed.as_secs_f64());
    println!("Ticks: {} ({:.1}/s)", world.tick(), world.tick() as f64 / elapsed.as_secs_f64());
    println!("Generation: {}", world.generation());
    println!("Final population: {}", world.population());
    println!("  Avg speed: {:.2} (higher = faster)", averages.speed);
    println!("  Avg size: {:.2} (higher = bigger)", averages.size);
    println!("  Avg sense: {:.2} (higher = better detection)", averages.sense);
    println!("Seed: {}", world.seed());

    if let Some(path) = stats_out {
        world.stats_history().save(path.to_str().ok_or("invalid stats path")?)?;
        println!("Stats history: {:?}", path);
    }

    Ok(())
}

fn init_logger(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run_benchmark(ticks: u64, population: usize) -> Result<(), Box<dyn std::error::Error>> {
    init_logger("info");
    println!("=== Terrarium Benchmark ===");
    println!("Ticks: {}", ticks);
    println!("Population: {}", population);
    println!();

    let result = benchmark(ticks, population);
    println!("{}", result);

    Ok(())
}

fn generate_config(output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    init_logger("info");
    let config = SimulationConfig::default();
    config.save(&output)?;
    println!("Configuration saved to: {:?}", output);
    Ok(())
}
