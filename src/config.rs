//! Configuration for the simulation.
//!
//! Every tunable constant lives here, decoupled from any presentation
//! code. Supports YAML configuration files with sensible defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub world: WorldConfig,
    pub creature: CreatureConfig,
    pub resource: ResourceConfig,
    pub enemy: EnemyConfig,
    pub reproduction: ReproductionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// World dimensions, seeding and lifecycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    /// World width in cells
    pub width: u32,
    /// World height in cells
    pub height: u32,
    /// Number of creatures at start
    pub initial_population: usize,
    /// Food items spawned at start
    pub initial_food: usize,
    /// Water puddles spawned at start
    pub initial_water: usize,
    /// Enemies spawned at start
    pub initial_enemies: usize,
    /// Ticks between reproduction cycles
    pub reproduction_interval: u32,
    /// Creatures respawned when the population hits zero
    pub extinction_respawn: usize,
    /// Upper bound on rejection-sampling attempts for a walkable spawn cell
    pub spawn_attempt_limit: u32,
}

/// Creature movement, metabolism and sensing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatureConfig {
    /// Lower clamp for speed/size/sense traits
    pub trait_min: f64,
    /// Upper clamp for speed/size/sense traits
    pub trait_max: f64,
    /// Starting energy
    pub initial_energy: f64,
    /// Thirst level at which a creature dies
    pub max_thirst: f64,
    /// Energy drained per tick per unit of size
    pub metabolism_per_size: f64,
    /// Thirst gained per tick
    pub thirst_per_tick: f64,
    /// Thirst level above which dehydration drains extra energy
    pub dehydration_threshold: f64,
    /// Extra energy drained per tick while dehydrated
    pub dehydration_penalty: f64,
    /// Detection radius = sense * this factor
    pub sense_range_factor: f64,
    /// Velocity impulse toward a seek target, scaled by own speed
    pub seek_gain: f64,
    /// Amplitude of per-tick random velocity jitter
    pub jitter: f64,
    /// Top speed = speed trait * this factor * biome multiplier
    pub speed_factor: f64,
    /// Energy below which a creature seeks food
    pub hunger_threshold: f64,
    /// Thirst above which a creature seeks water
    pub thirst_seek_threshold: f64,
}

/// Food and water resources
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Energy gained from one food item
    pub food_energy: f64,
    /// Contact radius for eating
    pub food_radius: f64,
    /// Thirst removed by one water puddle
    pub water_quench: f64,
    /// Contact radius for drinking
    pub water_radius: f64,
    /// Chance per tick to spawn a food batch
    pub food_spawn_chance: f64,
    /// Food items per batch
    pub food_spawn_batch: usize,
    /// Chance per tick to spawn a water batch
    pub water_spawn_chance: f64,
    /// Water puddles per batch
    pub water_spawn_batch: usize,
}

/// Enemy (predator) behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyConfig {
    /// Starting energy
    pub initial_energy: f64,
    /// Per-instance speed is drawn uniformly from [speed_min, speed_max]
    pub speed_min: f64,
    pub speed_max: f64,
    /// Amplitude of wander jitter
    pub jitter: f64,
    /// Velocity impulse toward prey, scaled by own speed
    pub pursuit_gain: f64,
    /// Range within which enemies chase the nearest creature
    pub pursuit_radius: f64,
    /// Contact radius for a kill
    pub kill_radius: f64,
    /// Energy gained per kill
    pub kill_energy: f64,
    /// Energy lost every tick
    pub upkeep: f64,
    /// Population cap for enemies
    pub max_enemies: usize,
    /// Chance per tick to spawn one enemy (below the cap)
    pub spawn_chance: f64,
}

/// Reproduction and mutation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReproductionConfig {
    /// Probability that each trait of a child mutates
    pub mutation_rate: f64,
    /// Mutation perturbation is uniform in [-range, range]
    pub mutation_range: f64,
    /// Energy each parent spends per child
    pub cost: f64,
    /// Minimum energy to be eligible
    pub min_energy: f64,
    /// Minimum age in ticks to be eligible
    pub min_age: u32,
    /// Maximum thirst to be eligible
    pub max_thirst: f64,
    /// Weight of size in the fitness score `speed + sense - w * size`
    pub size_fitness_penalty: f64,
}

/// Logging and stats cadence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Ticks between stats history snapshots
    pub stats_interval: u64,
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            creature: CreatureConfig::default(),
            resource: ResourceConfig::default(),
            enemy: EnemyConfig::default(),
            reproduction: ReproductionConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 1000,
            initial_population: 500,
            initial_food: 150,
            initial_water: 80,
            initial_enemies: 5,
            reproduction_interval: 100,
            extinction_respawn: 20,
            spawn_attempt_limit: 10_000,
        }
    }
}

impl Default for CreatureConfig {
    fn default() -> Self {
        Self {
            trait_min: 0.1,
            trait_max: 10.0,
            initial_energy: 100.0,
            max_thirst: 150.0,
            metabolism_per_size: 0.5,
            thirst_per_tick: 1.0,
            dehydration_threshold: 100.0,
            dehydration_penalty: 1.0,
            sense_range_factor: 20.0,
            seek_gain: 0.1,
            jitter: 0.5,
            speed_factor: 0.5,
            hunger_threshold: 80.0,
            thirst_seek_threshold: 60.0,
        }
    }
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            food_energy: 50.0,
            food_radius: 10.0,
            water_quench: 50.0,
            water_radius: 12.0,
            food_spawn_chance: 0.1,
            food_spawn_batch: 5,
            water_spawn_chance: 0.1,
            water_spawn_batch: 3,
        }
    }
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            initial_energy: 150.0,
            speed_min: 2.5,
            speed_max: 4.5,
            jitter: 0.3,
            pursuit_gain: 0.15,
            pursuit_radius: 150.0,
            kill_radius: 10.0,
            kill_energy: 100.0,
            upkeep: 1.0,
            max_enemies: 8,
            spawn_chance: 0.002,
        }
    }
}

impl Default for ReproductionConfig {
    fn default() -> Self {
        Self {
            mutation_rate: 0.1,
            mutation_range: 1.0,
            cost: 40.0,
            min_energy: 100.0,
            min_age: 50,
            max_thirst: 100.0,
            size_fitness_penalty: 0.3,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            stats_interval: 50,
            log_level: "info".to_string(),
        }
    }
}

impl SimulationConfig {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: SimulationConfig = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.world.width == 0 || self.world.height == 0 {
            return Err("world dimensions must be > 0".to_string());
        }
        if self.world.initial_population == 0 {
            return Err("initial_population must be > 0".to_string());
        }
        if self.world.reproduction_interval == 0 {
            return Err("reproduction_interval must be > 0".to_string());
        }
        if self.creature.trait_min <= 0.0 || self.creature.trait_min >= self.creature.trait_max {
            return Err("trait bounds must satisfy 0 < trait_min < trait_max".to_string());
        }
        if self.enemy.speed_min > self.enemy.speed_max {
            return Err("enemy speed_min cannot exceed speed_max".to_string());
        }
        if !(0.0..=1.0).contains(&self.reproduction.mutation_rate) {
            return Err("mutation_rate must be in [0, 1]".to_string());
        }
        if self.world.spawn_attempt_limit == 0 {
            return Err("spawn_attempt_limit must be > 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_yaml_roundtrip() {
        let config = SimulationConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let loaded: SimulationConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(config.world.width, loaded.world.width);
        assert_eq!(config.reproduction.mutation_rate, loaded.reproduction.mutation_rate);
        assert_eq!(config.enemy.max_enemies, loaded.enemy.max_enemies);
    }

    #[test]
    fn test_invalid_configs_rejected() {
        let mut config = SimulationConfig::default();
        config.world.initial_population = 0;
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.creature.trait_min = 0.0;
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.reproduction.mutation_rate = 1.5;
        assert!(config.validate().is_err());
    }
}
