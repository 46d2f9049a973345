//! Statistics tracking for the simulation.

use crate::creature::Creature;
use serde::{Deserialize, Serialize};

/// Arithmetic means of the heritable traits across live creatures.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TraitAverages {
    pub speed: f64,
    pub size: f64,
    pub sense: f64,
}

impl TraitAverages {
    /// All zeros when the population is empty; never divides by zero.
    pub fn from_creatures(creatures: &[Creature]) -> Self {
        if creatures.is_empty() {
            return Self::default();
        }

        let n = creatures.len() as f64;
        Self {
            speed: creatures.iter().map(|c| c.speed()).sum::<f64>() / n,
            size: creatures.iter().map(|c| c.size()).sum::<f64>() / n,
            sense: creatures.iter().map(|c| c.sense()).sum::<f64>() / n,
        }
    }
}

/// Statistics snapshot for a simulation tick
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Stats {
    /// Current simulation tick
    pub tick: u64,
    /// Generation counter
    pub generation: u32,
    /// Live creature count
    pub population: usize,
    /// Trait means across live creatures
    pub traits: TraitAverages,
    /// Mean energy across live creatures
    pub energy_mean: f64,
    /// Mean thirst across live creatures
    pub thirst_mean: f64,
    /// Food items currently in the world
    pub food_available: usize,
    /// Water puddles currently in the world
    pub water_available: usize,
    /// Live enemy count
    pub enemies: usize,
    /// Births this tick
    pub births: usize,
    /// Deaths this tick (all causes)
    pub deaths: usize,
    /// Predation kills this tick
    pub kills: usize,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update from current simulation state.
    pub fn update(
        &mut self,
        creatures: &[Creature],
        food_available: usize,
        water_available: usize,
        enemies: usize,
    ) {
        self.population = creatures.len();
        self.traits = TraitAverages::from_creatures(creatures);

        if creatures.is_empty() {
            self.energy_mean = 0.0;
            self.thirst_mean = 0.0;
        } else {
            let n = creatures.len() as f64;
            self.energy_mean = creatures.iter().map(|c| c.energy).sum::<f64>() / n;
            self.thirst_mean = creatures.iter().map(|c| c.thirst).sum::<f64>() / n;
        }

        self.food_available = food_available;
        self.water_available = water_available;
        self.enemies = enemies;
    }

    /// Format stats as a one-line summary
    pub fn summary(&self) -> String {
        format!(
            "T:{:6} | Gen:{:3} | Pop:{:5} | Spd:{:.2} Siz:{:.2} Sns:{:.2} | Energy:{:.0} Thirst:{:.0} | Food:{:3} Water:{:3} Enemies:{:2}",
            self.tick,
            self.generation,
            self.population,
            self.traits.speed,
            self.traits.size,
            self.traits.sense,
            self.energy_mean,
            self.thirst_mean,
            self.food_available,
            self.water_available,
            self.enemies,
        )
    }
}

/// Historical statistics tracker
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StatsHistory {
    /// All recorded stats snapshots
    pub snapshots: Vec<Stats>,
    /// Recording interval in ticks
    pub interval: u64,
}

impl StatsHistory {
    pub fn new(interval: u64) -> Self {
        Self {
            snapshots: Vec::new(),
            interval,
        }
    }

    /// Record a stats snapshot
    pub fn record(&mut self, stats: Stats) {
        self.snapshots.push(stats);
    }

    /// Population over time
    pub fn population_series(&self) -> Vec<(u64, usize)> {
        self.snapshots.iter().map(|s| (s.tick, s.population)).collect()
    }

    /// Mean speed trait over time
    pub fn speed_series(&self) -> Vec<(u64, f64)> {
        self.snapshots.iter().map(|s| (s.tick, s.traits.speed)).collect()
    }

    /// Generation counter over time
    pub fn generation_series(&self) -> Vec<(u64, u32)> {
        self.snapshots.iter().map(|s| (s.tick, s.generation)).collect()
    }

    /// Save history to a JSON file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json)
    }

    /// Load history from a JSON file
    pub fn load(path: &str) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CreatureConfig;

    fn creature(speed: f64, size: f64, sense: f64) -> Creature {
        Creature::new(0.0, 0.0, speed, size, sense, &CreatureConfig::default())
    }

    #[test]
    fn test_trait_averages() {
        let creatures = vec![creature(2.0, 4.0, 6.0), creature(4.0, 6.0, 8.0)];

        let averages = TraitAverages::from_creatures(&creatures);
        assert_eq!(averages.speed, 3.0);
        assert_eq!(averages.size, 5.0);
        assert_eq!(averages.sense, 7.0);
    }

    #[test]
    fn test_averages_empty_population() {
        let averages = TraitAverages::from_creatures(&[]);
        assert_eq!(averages, TraitAverages::default());

        let mut stats = Stats::new();
        stats.update(&[], 3, 2, 1);
        assert_eq!(stats.population, 0);
        assert_eq!(stats.energy_mean, 0.0);
        assert_eq!(stats.food_available, 3);
    }

    #[test]
    fn test_stats_update() {
        let creatures = vec![creature(1.0, 1.0, 1.0), creature(3.0, 3.0, 3.0)];

        let mut stats = Stats::new();
        stats.update(&creatures, 10, 5, 2);

        assert_eq!(stats.population, 2);
        assert_eq!(stats.traits.speed, 2.0);
        assert_eq!(stats.energy_mean, 100.0);
        assert_eq!(stats.enemies, 2);
    }

    #[test]
    fn test_stats_history_series() {
        let mut history = StatsHistory::new(10);

        for i in 0..5u64 {
            let mut stats = Stats::new();
            stats.tick = i * 10;
            stats.population = (i as usize + 1) * 100;
            stats.generation = i as u32 + 1;
            stats.traits.speed = i as f64 * 0.5;
            history.record(stats);
        }

        let series = history.population_series();
        assert_eq!(series.len(), 5);
        assert_eq!(series[0], (0, 100));
        assert_eq!(series[4], (40, 500));

        let generations = history.generation_series();
        assert_eq!(generations[4], (40, 5));

        let speeds = history.speed_series();
        assert_eq!(speeds[0], (0, 0.0));
        assert_eq!(speeds[4], (40, 2.0));
    }

    #[test]
    fn test_history_save_load_roundtrip() {
        let mut history = StatsHistory::new(5);
        let mut stats = Stats::new();
        stats.tick = 42;
        stats.population = 7;
        stats.traits.sense = 3.25;
        history.record(stats);

        let path = std::env::temp_dir().join("terrarium_stats_history_test.json");
        let path = path.to_str().unwrap();
        history.save(path).unwrap();
        let loaded = StatsHistory::load(path).unwrap();
        std::fs::remove_file(path).ok();

        assert_eq!(loaded.interval, 5);
        assert_eq!(loaded.snapshots.len(), 1);
        assert_eq!(loaded.snapshots[0].tick, 42);
        assert_eq!(loaded.snapshots[0].population, 7);
        assert_eq!(loaded.snapshots[0].traits.sense, 3.25);
    }

    #[test]
    fn test_summary_contains_key_fields() {
        let mut stats = Stats::new();
        stats.tick = 123;
        stats.generation = 4;
        stats.population = 77;

        let line = stats.summary();
        assert!(line.contains("123"));
        assert!(line.contains("77"));
    }
}
