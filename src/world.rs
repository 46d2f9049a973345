//! World simulation engine - main simulation loop.
//!
//! The world owns the terrain, all entity collections and the random
//! number generator. One call to [`World::update`] advances the simulation
//! by exactly one tick; the phases inside a tick run in a fixed order
//! because later phases read state mutated by earlier ones.

use crate::config::SimulationConfig;
use crate::creature::Creature;
use crate::enemy::Enemy;
use crate::resource::{Food, Water};
use crate::stats::{Stats, StatsHistory, TraitAverages};
use crate::terrain::{Terrain, MAX_FOOD_WEIGHT, MAX_WATER_WEIGHT};
use log::warn;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// The simulation world
pub struct World {
    terrain: Terrain,

    creatures: Vec<Creature>,
    food: Vec<Food>,
    water: Vec<Water>,
    enemies: Vec<Enemy>,

    generation: u32,
    ticks_since_reproduction: u32,
    tick: u64,

    config: SimulationConfig,

    stats: Stats,
    stats_history: StatsHistory,

    // Random number generator (seeded for reproducibility)
    rng: ChaCha8Rng,
    seed: u64,

    births_this_tick: usize,
    deaths_this_tick: usize,
    kills_this_tick: usize,
}

impl World {
    /// Create a new world with an entropy-derived seed.
    pub fn new(config: SimulationConfig) -> Self {
        let seed = rand::thread_rng().gen();
        Self::new_with_seed(config, seed)
    }

    /// Create a new world with a specific seed for reproducibility.
    pub fn new_with_seed(config: SimulationConfig, seed: u64) -> Self {
        let terrain = Terrain::generate(config.world.width, config.world.height, seed);

        let mut world = Self {
            terrain,
            creatures: Vec::new(),
            food: Vec::new(),
            water: Vec::new(),
            enemies: Vec::new(),
            generation: 1,
            ticks_since_reproduction: 0,
            tick: 0,
            stats: Stats::new(),
            stats_history: StatsHistory::new(config.logging.stats_interval),
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            births_this_tick: 0,
            deaths_this_tick: 0,
            kills_this_tick: 0,
        };

        world.seed_entities();
        world
    }

    fn seed_entities(&mut self) {
        let limit = self.config.world.spawn_attempt_limit;

        for _ in 0..self.config.world.initial_population {
            match walkable_cell(&self.terrain, &mut self.rng, limit) {
                Some((x, y)) => {
                    let creature = Creature::random(x, y, &mut self.rng, &self.config.creature);
                    self.creatures.push(creature);
                }
                None => {
                    warn!("no walkable cell found for initial creature; skipping spawn");
                    break;
                }
            }
        }

        for _ in 0..self.config.world.initial_food {
            if let Some((x, y)) = food_cell(&self.terrain, &mut self.rng, limit) {
                self.food.push(Food::new(x, y));
            }
        }

        for _ in 0..self.config.world.initial_water {
            if let Some((x, y)) = water_cell(&self.terrain, &mut self.rng, limit) {
                self.water.push(Water::new(x, y));
            }
        }

        for _ in 0..self.config.world.initial_enemies {
            if let Some((x, y)) = walkable_cell(&self.terrain, &mut self.rng, limit) {
                let enemy = Enemy::new(x, y, &mut self.rng, &self.config.enemy);
                self.enemies.push(enemy);
            }
        }
    }

    /// Advance the simulation by one tick.
    pub fn update(&mut self) {
        self.births_this_tick = 0;
        self.deaths_this_tick = 0;
        self.kills_this_tick = 0;

        // Phase 1: creature sensing and movement
        self.move_creatures();

        // Phase 2: enemy pursuit and movement
        self.move_enemies();

        // Phase 3 + 4: resource consumption
        self.consume_food();
        self.consume_water();

        // Phase 5: predation
        self.resolve_predation();

        // Phase 6: metabolism and thirst accrual
        for creature in &mut self.creatures {
            creature.metabolize(&self.config.creature);
        }

        // Phase 7: remove the dead
        self.remove_dead();

        // Phase 8: periodic reproduction cycle
        self.ticks_since_reproduction += 1;
        if self.ticks_since_reproduction > self.config.world.reproduction_interval {
            self.reproduce();
            self.generation += 1;
            self.ticks_since_reproduction = 0;
        }

        // Phase 9: resource and enemy spawning
        self.spawn_entities();

        // Phase 10: extinction guard
        if self.creatures.is_empty() {
            self.repopulate();
        }

        self.tick += 1;
        self.update_stats();
    }

    fn move_creatures(&mut self) {
        let terrain = &self.terrain;
        let food = &self.food;
        let water = &self.water;
        let config = &self.config.creature;
        let width = self.config.world.width as f64;
        let height = self.config.world.height as f64;
        let rng = &mut self.rng;

        for creature in &mut self.creatures {
            creature.steer(food, water, config);
            let multiplier = terrain
                .biome_at(creature.x as i32, creature.y as i32)
                .speed_multiplier();
            creature.advance(width, height, multiplier, rng, config);
        }
    }

    fn move_enemies(&mut self) {
        let terrain = &self.terrain;
        let creatures = &self.creatures;
        let config = &self.config.enemy;
        let width = self.config.world.width as f64;
        let height = self.config.world.height as f64;
        let rng = &mut self.rng;

        for enemy in &mut self.enemies {
            enemy.pursue(creatures, config);
            let multiplier = terrain
                .biome_at(enemy.x as i32, enemy.y as i32)
                .speed_multiplier();
            enemy.advance(width, height, multiplier, rng, config);
        }
    }

    /// Each creature eats at most one food item per tick: the first one in
    /// iteration order within the contact radius. Consumed items are marked
    /// first and compacted afterwards so no item feeds two creatures.
    fn consume_food(&mut self) {
        let radius = self.config.resource.food_radius;
        let energy = self.config.resource.food_energy;
        let mut eaten = vec![false; self.food.len()];

        for creature in &mut self.creatures {
            for (idx, item) in self.food.iter().enumerate() {
                if !eaten[idx] && creature.distance_to(item.x, item.y) < radius {
                    creature.eat(energy);
                    eaten[idx] = true;
                    break;
                }
            }
        }

        let mut idx = 0;
        self.food.retain(|_| {
            let keep = !eaten[idx];
            idx += 1;
            keep
        });
    }

    fn consume_water(&mut self) {
        let radius = self.config.resource.water_radius;
        let quench = self.config.resource.water_quench;
        let mut drunk = vec![false; self.water.len()];

        for creature in &mut self.creatures {
            for (idx, puddle) in self.water.iter().enumerate() {
                if !drunk[idx] && creature.distance_to(puddle.x, puddle.y) < radius {
                    creature.drink(quench);
                    drunk[idx] = true;
                    break;
                }
            }
        }

        let mut idx = 0;
        self.water.retain(|_| {
            let keep = !drunk[idx];
            idx += 1;
            keep
        });
    }

    /// At most one kill per enemy per tick. Victims are marked during the
    /// scan and removed in a single compaction pass.
    fn resolve_predation(&mut self) {
        let radius = self.config.enemy.kill_radius;
        let mut killed = vec![false; self.creatures.len()];

        for enemy in &mut self.enemies {
            for (idx, creature) in self.creatures.iter().enumerate() {
                if !killed[idx] && enemy.distance_to(creature.x, creature.y) < radius {
                    killed[idx] = true;
                    enemy.feed(&self.config.enemy);
                    break;
                }
            }
        }

        let kills = killed.iter().filter(|&&k| k).count();
        self.kills_this_tick += kills;
        self.deaths_this_tick += kills;

        let mut idx = 0;
        self.creatures.retain(|_| {
            let keep = !killed[idx];
            idx += 1;
            keep
        });
    }

    fn remove_dead(&mut self) {
        let config = &self.config.creature;
        let before = self.creatures.len();
        self.creatures.retain(|c| c.is_alive(config));
        self.deaths_this_tick += before - self.creatures.len();

        self.enemies.retain(|e| e.is_alive());
    }

    /// Generational reproduction: rank eligible creatures by fitness, pair
    /// consecutive creatures from the top half, one child per pair.
    fn reproduce(&mut self) {
        let mut eligible: Vec<usize> = self
            .creatures
            .iter()
            .enumerate()
            .filter(|(_, c)| c.can_reproduce(&self.config.reproduction))
            .map(|(idx, _)| idx)
            .collect();

        eligible.sort_by(|&a, &b| {
            let fa = self.creatures[a].fitness(&self.config.reproduction);
            let fb = self.creatures[b].fitness(&self.config.reproduction);
            fb.partial_cmp(&fa).unwrap_or(std::cmp::Ordering::Equal)
        });

        // Only the top half of the ranking reproduces
        let parent_count = eligible.len() / 2;
        let mut children = Vec::new();

        let mut i = 0;
        while i + 1 < parent_count {
            let a = eligible[i];
            let b = eligible[i + 1];

            self.creatures[a].spend_reproduction_cost(&self.config.reproduction);
            self.creatures[b].spend_reproduction_cost(&self.config.reproduction);

            let child = self.creatures[a].offspring(
                &self.creatures[b],
                &mut self.rng,
                &self.config.creature,
                &self.config.reproduction,
            );
            children.push(child);

            i += 2;
        }

        self.births_this_tick += children.len();
        self.creatures.extend(children);
    }

    fn spawn_entities(&mut self) {
        let limit = self.config.world.spawn_attempt_limit;

        if self.rng.gen::<f64>() < self.config.resource.food_spawn_chance {
            for _ in 0..self.config.resource.food_spawn_batch {
                match food_cell(&self.terrain, &mut self.rng, limit) {
                    Some((x, y)) => self.food.push(Food::new(x, y)),
                    None => {
                        warn!("no food-bearing cell found after {limit} attempts");
                        break;
                    }
                }
            }
        }

        if self.rng.gen::<f64>() < self.config.resource.water_spawn_chance {
            for _ in 0..self.config.resource.water_spawn_batch {
                match water_cell(&self.terrain, &mut self.rng, limit) {
                    Some((x, y)) => self.water.push(Water::new(x, y)),
                    None => {
                        warn!("no water-bearing cell found after {limit} attempts");
                        break;
                    }
                }
            }
        }

        if self.enemies.len() < self.config.enemy.max_enemies
            && self.rng.gen::<f64>() < self.config.enemy.spawn_chance
        {
            if let Some((x, y)) = walkable_cell(&self.terrain, &mut self.rng, limit) {
                self.enemies.push(Enemy::new(x, y, &mut self.rng, &self.config.enemy));
            }
        }
    }

    /// Extinction guard: repopulate with random creatures on walkable
    /// terrain so the simulation never dead-ends at zero population.
    fn repopulate(&mut self) {
        warn!("population extinct at tick {}; respawning", self.tick);
        for _ in 0..self.config.world.extinction_respawn {
            match walkable_cell(&self.terrain, &mut self.rng, self.config.world.spawn_attempt_limit)
            {
                Some((x, y)) => {
                    let creature = Creature::random(x, y, &mut self.rng, &self.config.creature);
                    self.creatures.push(creature);
                }
                None => {
                    warn!("no walkable cell for respawn; world stays empty");
                    break;
                }
            }
        }
        self.births_this_tick += self.creatures.len();
    }

    fn update_stats(&mut self) {
        self.stats.tick = self.tick;
        self.stats.generation = self.generation;
        self.stats.births = self.births_this_tick;
        self.stats.deaths = self.deaths_this_tick;
        self.stats.kills = self.kills_this_tick;
        self.stats.update(
            &self.creatures,
            self.food.len(),
            self.water.len(),
            self.enemies.len(),
        );

        let interval = self.config.logging.stats_interval;
        if interval > 0 && self.tick % interval == 0 {
            self.stats_history.record(self.stats.clone());
        }
    }

    /// Run the simulation for a number of ticks.
    pub fn run(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.update();
        }
    }

    /// Run with a per-tick callback for progress reporting.
    pub fn run_with_callback<F>(&mut self, ticks: u64, mut callback: F)
    where
        F: FnMut(&World, u64),
    {
        for i in 0..ticks {
            self.update();
            callback(self, i);
        }
    }

    // ------------------------------------------------------------------
    // Read-only snapshot accessors for a presentation layer
    // ------------------------------------------------------------------

    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    pub fn creatures(&self) -> &[Creature] {
        &self.creatures
    }

    pub fn food(&self) -> &[Food] {
        &self.food
    }

    pub fn water(&self) -> &[Water] {
        &self.water
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn population(&self) -> usize {
        self.creatures.len()
    }

    pub fn is_extinct(&self) -> bool {
        self.creatures.is_empty()
    }

    /// Arithmetic mean of each trait across live creatures, 0 when empty.
    pub fn trait_averages(&self) -> TraitAverages {
        TraitAverages::from_creatures(&self.creatures)
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn stats_history(&self) -> &StatsHistory {
        &self.stats_history
    }

    /// Seed used for terrain and the random stream.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

/// Rejection-sample a walkable cell. Bounded by `limit` attempts; an
/// all-water terrain yields `None` instead of looping forever.
fn walkable_cell<R: Rng>(terrain: &Terrain, rng: &mut R, limit: u32) -> Option<(f64, f64)> {
    for _ in 0..limit {
        let x = rng.gen_range(0..terrain.width());
        let y = rng.gen_range(0..terrain.height());
        if terrain.biome_at(x, y).is_walkable() {
            return Some((x as f64, y as f64));
        }
    }
    None
}

/// Biome-weighted food placement: a sampled cell is accepted with
/// probability `weight / max_weight`, concentrating food in grass and
/// forest the way the biome table prescribes.
fn food_cell<R: Rng>(terrain: &Terrain, rng: &mut R, limit: u32) -> Option<(f64, f64)> {
    for _ in 0..limit {
        let x = rng.gen_range(0..terrain.width());
        let y = rng.gen_range(0..terrain.height());
        let weight = terrain.biome_at(x, y).food_spawn_weight();
        if weight > 0 && rng.gen_range(0..MAX_FOOD_WEIGHT) < weight {
            return Some((x as f64, y as f64));
        }
    }
    None
}

/// Biome-weighted water placement.
fn water_cell<R: Rng>(terrain: &Terrain, rng: &mut R, limit: u32) -> Option<(f64, f64)> {
    for _ in 0..limit {
        let x = rng.gen_range(0..terrain.width());
        let y = rng.gen_range(0..terrain.height());
        let weight = terrain.biome_at(x, y).water_spawn_weight();
        if weight > 0 && rng.gen_range(0..MAX_WATER_WEIGHT) < weight {
            return Some((x as f64, y as f64));
        }
    }
    None
}
