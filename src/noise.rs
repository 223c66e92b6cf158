//! Seeded 3D gradient noise.
//!
//! Classic Perlin construction: integer lattice corners are hashed through a
//! seeded permutation table to one of twelve edge gradients, and the corner
//! contributions are blended with the quintic fade curve. The field is
//! continuous everywhere (including across lattice boundaries), zero on the
//! lattice itself, and fully determined by the seed.

use crate::error::{Error, Result};

const PERMUTATION: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219,
    203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211, 133, 230,
    220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209, 76,
    132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173,
    186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212, 207, 206,
    59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44, 154, 163,
    70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232,
    178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162,
    241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157, 184, 84, 204,
    176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114, 67, 29, 24, 72, 243, 141,
    128, 195, 78, 66, 215, 61, 156, 180,
];

const GRADIENTS: [[f64; 3]; 12] = [
    [1.0, 1.0, 0.0],
    [-1.0, 1.0, 0.0],
    [1.0, -1.0, 0.0],
    [-1.0, -1.0, 0.0],
    [1.0, 0.0, 1.0],
    [-1.0, 0.0, 1.0],
    [1.0, 0.0, -1.0],
    [-1.0, 0.0, -1.0],
    [0.0, 1.0, 1.0],
    [0.0, -1.0, 1.0],
    [0.0, 1.0, -1.0],
    [0.0, -1.0, -1.0],
];

/// Output range of [`NoiseField::sample`].
pub const RANGE: (f64, f64) = (-1.0, 1.0);

#[derive(Clone)]
pub struct NoiseField {
    seed: f64,
    perm: [usize; 512],
    grad: [[f64; 3]; 512],
}

impl NoiseField {
    /// Builds the lattice tables from `seed`. Seeds in `(0, 1)` are spread
    /// over 16 bits first, so `rand::random::<f64>()` is a good source.
    pub fn seeded(seed: f64) -> Result<Self> {
        let mut field = Self {
            seed,
            perm: [0; 512],
            grad: [[0.0; 3]; 512],
        };
        field.reseed(seed)?;
        Ok(field)
    }

    /// Replaces the tables in place. On error the previous tables are kept.
    pub fn reseed(&mut self, seed: f64) -> Result<()> {
        if !seed.is_finite() {
            return Err(Error::invalid(format!("noise seed must be finite, got {seed}")));
        }

        let mut spread = seed;
        if spread > 0.0 && spread < 1.0 {
            spread *= 65536.0;
        }
        let mut bits = spread.floor() as i64;
        if bits < 256 {
            bits |= bits << 8;
        }
        let low = (bits & 255) as usize;
        let high = ((bits >> 8) & 255) as usize;

        for (i, &p) in PERMUTATION.iter().enumerate() {
            let v = if i & 1 == 1 {
                p as usize ^ low
            } else {
                p as usize ^ high
            };
            self.perm[i] = v;
            self.perm[i + 256] = v;
            self.grad[i] = GRADIENTS[v % 12];
            self.grad[i + 256] = GRADIENTS[v % 12];
        }
        self.seed = seed;

        log::debug!("noise field seeded with {seed}");
        Ok(())
    }

    pub fn seed(&self) -> f64 {
        self.seed
    }

    /// Samples the field. Always within [`RANGE`] for finite input.
    pub fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        let (xf, yf, zf) = (x.floor(), y.floor(), z.floor());
        let (x, y, z) = (x - xf, y - yf, z - zf);
        let xi = lattice(xf);
        let yi = lattice(yf);
        let zi = lattice(zf);

        let perm = &self.perm;
        let corner = |dx: usize, dy: usize, dz: usize| {
            let g = self.grad[xi + dx + perm[yi + dy + perm[zi + dz]]];
            g[0] * (x - dx as f64) + g[1] * (y - dy as f64) + g[2] * (z - dz as f64)
        };

        let n000 = corner(0, 0, 0);
        let n001 = corner(0, 0, 1);
        let n010 = corner(0, 1, 0);
        let n011 = corner(0, 1, 1);
        let n100 = corner(1, 0, 0);
        let n101 = corner(1, 0, 1);
        let n110 = corner(1, 1, 0);
        let n111 = corner(1, 1, 1);

        let u = fade(x);
        let v = fade(y);
        let w = fade(z);

        let value = lerp(
            lerp(lerp(n000, n100, u), lerp(n001, n101, u), w),
            lerp(lerp(n010, n110, u), lerp(n011, n111, u), w),
            v,
        );

        value.clamp(RANGE.0, RANGE.1)
    }
}

impl std::fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseField").field("seed", &self.seed).finish()
    }
}

fn lattice(floor: f64) -> usize {
    (floor as i64 & 255) as usize
}

fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    (1.0 - t) * a + t * b
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn field(seed: f64) -> NoiseField {
        NoiseField::seeded(seed).unwrap()
    }

    #[test]
    fn test_golden_value_for_seed_42() {
        let noise = field(42.0);
        let value = noise.sample(0.03, 90.0 * 0.03, 0.0);
        assert_relative_eq!(value, 0.134086276868759, epsilon = 1e-12);
        assert_relative_eq!(noise.sample(0.5, 0.5, 0.5), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_on_lattice_points() {
        let noise = field(7.0);
        for p in [(0.0, 0.0, 0.0), (1.0, 2.0, 3.0), (-4.0, 17.0, 255.0), (300.0, -2.0, 9.0)] {
            assert_eq!(noise.sample(p.0, p.1, p.2), 0.0);
        }
    }

    #[test]
    fn test_deterministic_for_same_seed() {
        let a = field(0.3141);
        let b = field(0.3141);
        for i in 0..200 {
            let t = i as f64 * 0.173;
            let first = a.sample(t, t * 0.7 - 3.0, t * 1.3 + 0.5);
            assert_eq!(first, a.sample(t, t * 0.7 - 3.0, t * 1.3 + 0.5));
            assert_eq!(first, b.sample(t, t * 0.7 - 3.0, t * 1.3 + 0.5));
        }
    }

    #[test]
    fn test_seed_changes_field() {
        let a = field(1.0);
        let b = field(2.0);
        let differs = (0..50).any(|i| {
            let t = i as f64 * 0.37 + 0.11;
            a.sample(t, 0.5, 0.25) != b.sample(t, 0.5, 0.25)
        });
        assert!(differs);
    }

    #[test]
    fn test_output_stays_in_range() {
        for seed in [0.0, 0.5, 42.0, 12345.0] {
            let noise = field(seed);
            for i in 0..2000 {
                let t = i as f64 * 0.0931;
                let v = noise.sample(t * 1.7 - 40.0, t * 0.3, -t);
                assert!(v >= RANGE.0 && v <= RANGE.1, "sample {v} out of range");
            }
        }
    }

    #[test]
    fn test_continuous_across_lattice_boundaries() {
        let noise = field(42.0);
        let boundaries = [(1.0, 0.5, 0.5), (0.5, 2.0, 0.5), (0.5, 0.5, -3.0), (255.0, 256.0, 0.25)];

        for (x, y, z) in boundaries {
            let mut last_gap = f64::INFINITY;
            for delta in [1e-1, 1e-2, 1e-3, 1e-4, 1e-5, 1e-6] {
                let below = noise.sample(x - delta, y - delta, z - delta);
                let above = noise.sample(x + delta, y + delta, z + delta);
                let gap = (above - below).abs();
                assert!(gap <= 10.0 * delta, "gap {gap} too large at delta {delta}");
                last_gap = gap;
            }
            assert!(last_gap < 1e-4);
        }
    }

    #[test]
    fn test_rejects_non_finite_seed() {
        assert!(matches!(NoiseField::seeded(f64::NAN), Err(Error::InvalidArgument(_))));

        let mut noise = field(42.0);
        let before = noise.sample(0.25, 0.5, 0.75);
        assert!(noise.reseed(f64::INFINITY).is_err());
        assert_eq!(noise.seed(), 42.0);
        assert_eq!(noise.sample(0.25, 0.5, 0.75), before);
    }

    #[test]
    fn test_reseed_replaces_tables() {
        let mut noise = field(1.0);
        noise.reseed(42.0).unwrap();
        assert_eq!(noise.seed(), 42.0);
        assert_relative_eq!(noise.sample(0.5, 0.5, 0.5), 0.25, epsilon = 1e-12);
    }
}
