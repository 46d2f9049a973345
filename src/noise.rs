//! Seeded 2D gradient noise for terrain synthesis.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Classic Perlin gradient noise over a seeded permutation table.
///
/// The same seed always produces the same field; sampling is a pure
/// function of (seed, x, y).
pub struct PerlinNoise {
    perm: [u8; 512],
}

impl PerlinNoise {
    /// Build the permutation table from a seed.
    pub fn new(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let mut p: Vec<u8> = (0..=255).collect();

        // Fisher-Yates shuffle
        for i in (1..256).rev() {
            let j = rng.gen_range(0..=i);
            p.swap(i, j);
        }

        // Duplicate so that perm[perm[x] + y + 1] never indexes out of range
        let mut perm = [0u8; 512];
        for i in 0..512 {
            perm[i] = p[i & 255];
        }

        Self { perm }
    }

    /// Sample noise at (x, y). Returns a value in [0, 1).
    ///
    /// Gradient interpolation at the four corners of the containing unit
    /// cell, blended with the quintic fade curve `6t^5 - 15t^4 + 10t^3`.
    pub fn noise(&self, x: f64, y: f64) -> f64 {
        let xi = (x.floor() as i64 & 255) as usize;
        let yi = (y.floor() as i64 & 255) as usize;

        let xf = x - x.floor();
        let yf = y - y.floor();

        let u = fade(xf);
        let v = fade(yf);

        let aa = self.hash(xi, yi);
        let ab = self.hash(xi, yi + 1);
        let ba = self.hash(xi + 1, yi);
        let bb = self.hash(xi + 1, yi + 1);

        let x1 = lerp(grad(aa, xf, yf), grad(ba, xf - 1.0, yf), u);
        let x2 = lerp(grad(ab, xf, yf - 1.0), grad(bb, xf - 1.0, yf - 1.0), u);

        // Map from [-1, 1] to [0, 1]
        (lerp(x1, x2, v) + 1.0) / 2.0
    }

    #[inline]
    fn hash(&self, xi: usize, yi: usize) -> u8 {
        self.perm[self.perm[xi] as usize + yi]
    }
}

#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

/// Gradient selection from the low 4 bits of the hash.
#[inline]
fn grad(hash: u8, x: f64, y: f64) -> f64 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        0.0
    };
    let u = if h & 1 == 0 { u } else { -u };
    let v = if h & 2 == 0 { v } else { -v };
    u + v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_deterministic_per_seed() {
        let a = PerlinNoise::new(42);
        let b = PerlinNoise::new(42);

        for i in 0..100 {
            let x = i as f64 * 0.173;
            let y = i as f64 * 0.511;
            assert_eq!(a.noise(x, y), b.noise(x, y));
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = PerlinNoise::new(1);
        let b = PerlinNoise::new(2);

        let mut any_diff = false;
        for i in 0..100 {
            let x = i as f64 * 0.37;
            if (a.noise(x, x) - b.noise(x, x)).abs() > 1e-12 {
                any_diff = true;
                break;
            }
        }
        assert!(any_diff, "Two seeds produced identical fields");
    }

    #[test]
    fn test_noise_in_unit_range() {
        for seed in [0u64, 7, 12345, u64::MAX] {
            let noise = PerlinNoise::new(seed);
            for i in 0..500 {
                let x = (i as f64 - 250.0) * 0.83;
                let y = (i as f64) * 0.29;
                let v = noise.noise(x, y);
                assert!((0.0..1.0).contains(&v), "noise({x}, {y}) = {v} out of range");
            }
        }
    }

    #[test]
    fn test_noise_continuity() {
        let noise = PerlinNoise::new(99);
        let mut prev = noise.noise(0.0, 0.0);
        for i in 1..1000 {
            let v = noise.noise(i as f64 * 0.001, 0.0);
            assert!((v - prev).abs() < 0.01, "discontinuity at step {i}");
            prev = v;
        }
    }
}
