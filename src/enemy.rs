//! Enemy agent: a predator that pursues creatures.

use crate::config::EnemyConfig;
use crate::creature::Creature;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A predator. Speed is fixed per instance, drawn at creation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Enemy {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub energy: f64,
    speed: f64,
}

impl Enemy {
    pub fn new<R: Rng>(x: f64, y: f64, rng: &mut R, config: &EnemyConfig) -> Self {
        Self {
            x,
            y,
            vx: (rng.gen::<f64>() - 0.5) * 2.0,
            vy: (rng.gen::<f64>() - 0.5) * 2.0,
            energy: config.initial_energy,
            speed: rng.gen_range(config.speed_min..=config.speed_max),
        }
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    #[inline]
    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        let dx = x - self.x;
        let dy = y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Pursue the nearest creature when one is inside the pursuit radius.
    pub fn pursue(&mut self, creatures: &[Creature], config: &EnemyConfig) {
        let mut best: Option<(f64, f64)> = None;
        let mut best_dist = f64::MAX;

        for c in creatures {
            let dist = self.distance_to(c.x, c.y);
            if dist < best_dist {
                best_dist = dist;
                best = Some((c.x, c.y));
            }
        }

        if let Some((tx, ty)) = best {
            if best_dist < config.pursuit_radius {
                let dx = tx - self.x;
                let dy = ty - self.y;
                if best_dist > 0.0 {
                    self.vx += (dx / best_dist) * self.speed * config.pursuit_gain;
                    self.vy += (dy / best_dist) * self.speed * config.pursuit_gain;
                }
            }
        }
    }

    /// Wander jitter, speed clamp, integration and boundary reflection.
    /// Loses upkeep energy every tick regardless of action.
    pub fn advance<R: Rng>(
        &mut self,
        world_width: f64,
        world_height: f64,
        biome_speed_multiplier: f64,
        rng: &mut R,
        config: &EnemyConfig,
    ) {
        self.vx += (rng.gen::<f64>() - 0.5) * config.jitter;
        self.vy += (rng.gen::<f64>() - 0.5) * config.jitter;

        let max_vel = self.speed * biome_speed_multiplier;
        let vel = (self.vx * self.vx + self.vy * self.vy).sqrt();
        if vel > max_vel {
            self.vx = self.vx / vel * max_vel;
            self.vy = self.vy / vel * max_vel;
        }

        self.x += self.vx;
        self.y += self.vy;

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

        self.energy -= config.upkeep;
    }

    /// Energy reward for a successful kill.
    pub fn feed(&mut self, config: &EnemyConfig) {
        self.energy += config.kill_energy;
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.energy > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CreatureConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn enemy_config() -> EnemyConfig {
        EnemyConfig::default()
    }

    #[test]
    fn test_speed_drawn_from_range() {
        let config = enemy_config();
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        for _ in 0..200 {
            let e = Enemy::new(0.0, 0.0, &mut rng, &config);
            assert!((config.speed_min..=config.speed_max).contains(&e.speed()));
            assert_eq!(e.energy, config.initial_energy);
        }
    }

    #[test]
    fn test_upkeep_drains_energy() {
        let config = enemy_config();
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let mut e = Enemy::new(500.0, 500.0, &mut rng, &config);

        let before = e.energy;
        e.advance(1000.0, 1000.0, 1.0, &mut rng, &config);
        assert_eq!(e.energy, before - config.upkeep);
    }

    #[test]
    fn test_feed_and_death() {
        let config = enemy_config();
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let mut e = Enemy::new(0.0, 0.0, &mut rng, &config);

        e.feed(&config);
        assert_eq!(e.energy, config.initial_energy + config.kill_energy);

        e.energy = 0.0;
        assert!(!e.is_alive());
    }

    #[test]
    fn test_pursuit_inside_radius() {
        let config = enemy_config();
        let creature_config = CreatureConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(14);
        let mut e = Enemy::new(100.0, 100.0, &mut rng, &config);
        e.vx = 0.0;
        e.vy = 0.0;

        let prey = vec![Creature::new(150.0, 100.0, 1.0, 1.0, 1.0, &creature_config)];
        e.pursue(&prey, &config);

        assert!(e.vx > 0.0, "enemy should accelerate toward prey");
        assert_eq!(e.vy, 0.0);
    }

    #[test]
    fn test_no_pursuit_outside_radius() {
        let config = enemy_config();
        let creature_config = CreatureConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(15);
        let mut e = Enemy::new(0.0, 0.0, &mut rng, &config);
        e.vx = 0.0;
        e.vy = 0.0;

        let prey = vec![Creature::new(900.0, 900.0, 1.0, 1.0, 1.0, &creature_config)];
        e.pursue(&prey, &config);

        assert_eq!(e.vx, 0.0);
        assert_eq!(e.vy, 0.0);
    }

    #[test]
    fn test_boundary_reflection() {
        let config = enemy_config();
        let mut rng = ChaCha8Rng::seed_from_u64(16);
        let mut e = Enemy::new(0.5, 99.5, &mut rng, &config);
        e.vx = -10.0;
        e.vy = 10.0;

        e.advance(100.0, 100.0, 1.0, &mut rng, &config);

        assert!(e.x >= 0.0 && e.y <= 99.0);
        assert!(e.vx >= 0.0);
        assert!(e.vy <= 0.0);
    }
}
