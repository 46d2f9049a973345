//! Creature agent: heritable traits, movement, metabolism, reproduction.

use crate::config::{CreatureConfig, ReproductionConfig};
use crate::resource::{Food, Water};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A creature in the world.
///
/// The three heritable traits (speed, size, sense) are clamped to the
/// configured range at every construction point and never change during a
/// creature's lifetime; only its movement and metabolic state mutates.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Creature {
    speed: f64,
    size: f64,
    sense: f64,

    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,

    pub energy: f64,
    pub thirst: f64,
    pub age: u32,
}

impl Creature {
    /// Create a creature at a position with the given traits (clamped).
    pub fn new(x: f64, y: f64, speed: f64, size: f64, sense: f64, config: &CreatureConfig) -> Self {
        Self {
            speed: speed.clamp(config.trait_min, config.trait_max),
            size: size.clamp(config.trait_min, config.trait_max),
            sense: sense.clamp(config.trait_min, config.trait_max),
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            energy: config.initial_energy,
            thirst: 0.0,
            age: 0,
        }
    }

    /// Create a creature with uniformly random traits.
    pub fn random<R: Rng>(x: f64, y: f64, rng: &mut R, config: &CreatureConfig) -> Self {
        let speed = rng.gen::<f64>() * config.trait_max;
        let size = rng.gen::<f64>() * config.trait_max;
        let sense = rng.gen::<f64>() * config.trait_max;
        Self::new(x, y, speed, size, sense, config)
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn sense(&self) -> f64 {
        self.sense
    }

    /// Detection radius, proportional to the sense trait.
    pub fn detection_range(&self, config: &CreatureConfig) -> f64 {
        self.sense * config.sense_range_factor
    }

    #[inline]
    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        let dx = x - self.x;
        let dy = y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Sensing and seeking: thirsty creatures head for the nearest water in
    /// detection range, hungry ones for the nearest food. Adds a velocity
    /// impulse toward the target; it never teleports.
    pub fn steer(&mut self, food: &[Food], water: &[Water], config: &CreatureConfig) {
        if self.thirst > config.thirst_seek_threshold {
            if let Some(target) = nearest(water.iter().map(|w| (w.x, w.y)), self) {
                if self.distance_to(target.0, target.1) < self.detection_range(config) {
                    self.seek(target.0, target.1, config.seek_gain);
                }
            }
        } else if self.energy < config.hunger_threshold {
            if let Some(target) = nearest(food.iter().map(|f| (f.x, f.y)), self) {
                if self.distance_to(target.0, target.1) < self.detection_range(config) {
                    self.seek(target.0, target.1, config.seek_gain);
                }
            }
        }
    }

    fn seek(&mut self, tx: f64, ty: f64, gain: f64) {
        let dx = tx - self.x;
        let dy = ty - self.y;
        let dist = (dx * dx + dy * dy).sqrt();
        if dist > 0.0 {
            self.vx += (dx / dist) * self.speed * gain;
            self.vy += (dy / dist) * self.speed * gain;
        }
    }

    /// One movement step: jitter, speed clamp, integration, boundary
    /// reflection. Ages the creature by one tick regardless of outcome.
    pub fn advance<R: Rng>(
        &mut self,
        world_width: f64,
        world_height: f64,
        biome_speed_multiplier: f64,
        rng: &mut R,
        config: &CreatureConfig,
    ) {
        self.vx += (rng.gen::<f64>() - 0.5) * config.jitter;
        self.vy += (rng.gen::<f64>() - 0.5) * config.jitter;

        let max_vel = config.speed_factor * self.speed * biome_speed_multiplier;
        let vel = (self.vx * self.vx + self.vy * self.vy).sqrt();
        if vel > max_vel {
            self.vx = self.vx / vel * max_vel;
            self.vy = self.vy / vel * max_vel;
        }

        self.x += self.vx;
        self.y += self.vy;

        // Reflect off the world edges, never wrap
        if self.x < 0.0 {
            self.x = 0.0;
            self.vx = self.vx.abs();
        }
        if self.x >= world_width {
            self.x = world_width - 1.0;
            self.vx = -self.vx.abs();
        }
        if self.y < 0.0 {
            self.y = 0.0;
            self.vy = self.vy.abs();
        }
        if self.y >= world_height {
            self.y = world_height - 1.0;
            self.vy = -self.vy.abs();
        }

        self.age += 1;
    }

    /// Gain energy from an eaten food item.
    pub fn eat(&mut self, food_energy: f64) {
        self.energy += food_energy;
    }

    /// Reduce thirst from a drunk water puddle. Thirst never goes negative.
    pub fn drink(&mut self, quench: f64) {
        self.thirst = (self.thirst - quench).max(0.0);
    }

    /// Per-tick metabolism: energy drain proportional to size, thirst
    /// accrual, and a dehydration penalty past the threshold.
    pub fn metabolize(&mut self, config: &CreatureConfig) {
        self.energy -= self.size * config.metabolism_per_size;
        self.thirst += config.thirst_per_tick;
        if self.thirst > config.dehydration_threshold {
            self.energy -= config.dehydration_penalty;
        }
    }

    #[inline]
    pub fn is_alive(&self, config: &CreatureConfig) -> bool {
        self.energy > 0.0 && self.thirst < config.max_thirst
    }

    /// Reproduction eligibility: all three gates must hold.
    #[inline]
    pub fn can_reproduce(&self, config: &ReproductionConfig) -> bool {
        self.energy >= config.min_energy
            && self.age >= config.min_age
            && self.thirst < config.max_thirst
    }

    /// Selection score used to rank reproduction candidates.
    pub fn fitness(&self, config: &ReproductionConfig) -> f64 {
        self.speed + self.sense - self.size * config.size_fitness_penalty
    }

    /// Pay the energy cost of one reproduction.
    pub fn spend_reproduction_cost(&mut self, config: &ReproductionConfig) {
        self.energy -= config.cost;
    }

    /// Produce a child with this creature and a partner: trait-wise parent
    /// average with independent per-trait mutation, positioned at the
    /// parents' midpoint.
    pub fn offspring<R: Rng>(
        &self,
        partner: &Creature,
        rng: &mut R,
        creature_config: &CreatureConfig,
        repro_config: &ReproductionConfig,
    ) -> Creature {
        let mut speed = (self.speed + partner.speed) / 2.0;
        let mut size = (self.size + partner.size) / 2.0;
        let mut sense = (self.sense + partner.sense) / 2.0;

        for trait_value in [&mut speed, &mut size, &mut sense] {
            if rng.gen::<f64>() < repro_config.mutation_rate {
                *trait_value += (rng.gen::<f64>() - 0.5) * 2.0 * repro_config.mutation_range;
            }
        }

        let x = (self.x + partner.x) / 2.0;
        let y = (self.y + partner.y) / 2.0;

        Creature::new(x, y, speed, size, sense, creature_config)
    }
}

/// Nearest point to a creature from an iterator of positions.
fn nearest<I: Iterator<Item = (f64, f64)>>(points: I, from: &Creature) -> Option<(f64, f64)> {
    let mut best: Option<(f64, f64)> = None;
    let mut best_dist = f64::MAX;

    for (x, y) in points {
        let dist = from.distance_to(x, y);
        if dist < best_dist {
            best_dist = dist;
            best = Some((x, y));
        }
    }

    best
}
