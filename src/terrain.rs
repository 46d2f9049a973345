//! Procedural terrain: height field synthesis and biome classification.
//!
//! The height map is built from layered Perlin noise, smoothed once with a
//! 3x3 mean filter, and classified into a fixed six-biome table. Terrain is
//! immutable after construction; all queries are read-only.

use crate::noise::PerlinNoise;
use serde::{Deserialize, Serialize};

/// Number of noise octaves summed per cell.
const OCTAVES: u32 = 5;
/// Base sampling frequency in cells.
const BASE_FREQUENCY: f64 = 0.01;
/// Frequency multiplier per octave.
const LACUNARITY: f64 = 2.0;
/// Amplitude multiplier per octave.
const PERSISTENCE: f64 = 0.5;

/// Terrain classification bucket.
///
/// The set is closed: six biomes, each with a fixed height interval,
/// walkability, movement-speed multiplier and resource spawn weights.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Biome {
    Water,
    Sand,
    Grass,
    Forest,
    Mountain,
    Snow,
}

/// Declared biome order for height lookup. First half-open interval
/// containing the height wins; anything above the table falls back to Snow.
const BIOME_TABLE: [(Biome, f64, f64); 6] = [
    (Biome::Water, 0.0, 0.30),
    (Biome::Sand, 0.30, 0.45),
    (Biome::Grass, 0.45, 0.65),
    (Biome::Forest, 0.65, 0.80),
    (Biome::Mountain, 0.80, 0.90),
    (Biome::Snow, 0.90, 1.0),
];

impl Biome {
    /// Classify a height value in [0, 1].
    pub fn from_height(height: f64) -> Self {
        for &(biome, min, max) in &BIOME_TABLE {
            if height >= min && height < max {
                return biome;
            }
        }
        Biome::Snow
    }

    /// Height interval [min, max) this biome occupies.
    pub fn height_range(&self) -> (f64, f64) {
        BIOME_TABLE
            .iter()
            .find(|(b, _, _)| b == self)
            .map(|&(_, min, max)| (min, max))
            .unwrap_or((0.9, 1.0))
    }

    /// Can land creatures stand here?
    pub fn is_walkable(&self) -> bool {
        *self != Biome::Water
    }

    /// Movement speed multiplier in [0, 1].
    pub fn speed_multiplier(&self) -> f64 {
        match self {
            Biome::Water => 0.0,
            Biome::Sand => 0.7,
            Biome::Grass => 1.0,
            Biome::Forest => 0.8,
            Biome::Mountain => 0.6,
            Biome::Snow => 0.5,
        }
    }

    /// Relative food spawn weight.
    pub fn food_spawn_weight(&self) -> u32 {
        match self {
            Biome::Grass => 10,
            Biome::Forest => 15,
            Biome::Sand => 3,
            Biome::Mountain => 2,
            Biome::Water | Biome::Snow => 0,
        }
    }

    /// Relative water spawn weight.
    pub fn water_spawn_weight(&self) -> u32 {
        match self {
            Biome::Grass => 5,
            Biome::Forest => 8,
            _ => 0,
        }
    }

}

/// Largest food spawn weight in the biome table, used to normalize
/// acceptance probabilities during biome-weighted placement.
pub const MAX_FOOD_WEIGHT: u32 = 15;
/// Largest water spawn weight in the biome table.
pub const MAX_WATER_WEIGHT: u32 = 8;

/// Immutable world terrain: a width x height grid of heights and biomes.
pub struct Terrain {
    width: i32,
    height: i32,
    height_map: Vec<f64>,
    biome_map: Vec<Biome>,
}

impl Terrain {
    /// Generate terrain from a seed in one pass: octave synthesis,
    /// smoothing, biome classification.
    pub fn generate(width: u32, height: u32, seed: u64) -> Self {
        let noise = PerlinNoise::new(seed);
        let (w, h) = (width as usize, height as usize);
        let mut height_map = vec![0.0f64; w * h];

        for y in 0..h {
            for x in 0..w {
                let mut frequency = BASE_FREQUENCY;
                let mut amplitude = 1.0;
                let mut value = 0.0;
                let mut max_value = 0.0;

                for _ in 0..OCTAVES {
                    value += noise.noise(x as f64 * frequency, y as f64 * frequency) * amplitude;
                    max_value += amplitude;
                    frequency *= LACUNARITY;
                    amplitude *= PERSISTENCE;
                }

                height_map[y * w + x] = value / max_value;
            }
        }

        Self::smooth(&mut height_map, w, h);

        let biome_map = height_map.iter().map(|&v| Biome::from_height(v)).collect();

        Self {
            width: width as i32,
            height: height as i32,
            height_map,
            biome_map,
        }
    }

    /// One 3x3 mean pass over interior cells. Border cells keep their raw
    /// synthesized height.
    fn smooth(height_map: &mut [f64], w: usize, h: usize) {
        if w < 3 || h < 3 {
            return;
        }

        let original = height_map.to_vec();
        for y in 1..h - 1 {
            for x in 1..w - 1 {
                let mut sum = 0.0;
                for dy in -1i32..=1 {
                    for dx in -1i32..=1 {
                        let nx = (x as i32 + dx) as usize;
                        let ny = (y as i32 + dy) as usize;
                        sum += original[ny * w + nx];
                    }
                }
                height_map[y * w + x] = sum / 9.0;
            }
        }
    }

    /// Biome at cell (x, y). Out-of-bounds coordinates return Water so
    /// downstream movement and spawn code needs no separate bounds checks.
    pub fn biome_at(&self, x: i32, y: i32) -> Biome {
        if x < 0 || x >= self.width || y < 0 || y >= self.height {
            return Biome::Water;
        }
        self.biome_map[(y * self.width + x) as usize]
    }

    /// Smoothed height at cell (x, y), 0.0 when out of bounds.
    pub fn height_at(&self, x: i32, y: i32) -> f64 {
        if x < 0 || x >= self.width || y < 0 || y >= self.height {
            return 0.0;
        }
        self.height_map[(y * self.width + x) as usize]
    }

    /// Whether any cell is walkable. Degenerate all-water maps make spawn
    /// placement impossible; callers check this once instead of looping
    /// forever.
    pub fn has_walkable_cell(&self) -> bool {
        self.biome_map.iter().any(|b| b.is_walkable())
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }
}

#[cfg(test)]
impl Terrain {
    /// Build terrain from an explicit height map, bypassing noise synthesis.
    pub(crate) fn from_heights(width: u32, height: u32, height_map: Vec<f64>) -> Self {
        assert_eq!(height_map.len(), (width * height) as usize);
        let biome_map = height_map.iter().map(|&v| Biome::from_height(v)).collect();
        Self {
            width: width as i32,
            height: height as i32,
            height_map,
            biome_map,
        }
    }
}
