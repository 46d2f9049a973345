//! # Terrarium
//!
//! Spatial artificial-life simulator: a bounded 2D world of procedurally
//! generated terrain populated by creatures with heritable traits,
//! renewable food and water, and roaming predators.
//!
//! ## Features
//!
//! - **Procedural terrain**: layered gradient noise, smoothed and
//!   classified into six biomes that gate movement speed and resource
//!   density
//! - **Selection**: creatures carry speed/size/sense traits; the fittest
//!   pair up every generation and produce mutated offspring
//! - **Reproducible**: seeded random number generation end to end
//! - **Configurable**: YAML configuration files
//!
//! ## Quick Start
//!
//! ```rust
//! use terrarium::{SimulationConfig, World};
//!
//! let mut config = SimulationConfig::default();
//! config.world.width = 200;
//! config.world.height = 200;
//! config.world.initial_population = 50;
//!
//! let mut world = World::new_with_seed(config, 42);
//! world.run(200);
//!
//! println!("Generation: {}", world.generation());
//! println!("Population: {}", world.population());
//! ```
//!
//! The crate is the simulation core only: a presentation layer drives it
//! by calling [`World::update`] once per tick and reads entity positions,
//! terrain classification and population averages through read-only
//! accessors. Nothing here depends on how (or whether) the world is drawn.

pub mod config;
pub mod creature;
pub mod enemy;
pub mod noise;
pub mod resource;
pub mod stats;
pub mod terrain;
pub mod world;

// Re-export main types
pub use config::SimulationConfig;
pub use creature::Creature;
pub use enemy::Enemy;
pub use terrain::{Biome, Terrain};
pub use world::World;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run a quick benchmark
pub fn benchmark(ticks: u64, population: usize) -> BenchmarkResult {
    use std::time::Instant;

    let mut config = SimulationConfig::default();
    config.world.width = 500;
    config.world.height = 500;
    config.world.initial_population = population;

    let mut world = World::new(config);

    let start = Instant::now();
    world.run(ticks);
    let elapsed = start.elapsed();

    BenchmarkResult {
        ticks,
        initial_population: population,
        final_population: world.population(),
        final_generation: world.generation(),
        elapsed_secs: elapsed.as_secs_f64(),
        ticks_per_second: ticks as f64 / elapsed.as_secs_f64(),
    }
}

/// Benchmark result
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    pub ticks: u64,
    pub initial_population: usize,
    pub final_population: usize,
    pub final_generation: u32,
    pub elapsed_secs: f64,
    pub ticks_per_second: f64,
}

impl std::fmt::Display for BenchmarkResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Benchmark Results ===")?;
        writeln!(f, "Ticks: {}", self.ticks)?;
        writeln!(
            f,
            "Population: {} -> {}",
            self.initial_population, self.final_population
        )?;
        writeln!(f, "Generation: {}", self.final_generation)?;
        writeln!(f, "Time: {:.3}s", self.elapsed_secs)?;
        writeln!(f, "Speed: {:.1} ticks/s", self.ticks_per_second)?;
        Ok(())
    }
}
