use {
    crate::utils::{cubic_interpolate, fade, wrap_index},
    glam::DVec2,
    rand::{Rng, seq::SliceRandom},
};

pub type Vector2 = DVec2;

pub const TABLE_SIZE: usize = 256;
pub const PERMUTATION_LEN: usize = TABLE_SIZE * 2;

const CORNERS: [Vector2; 4] = [
    DVec2::new(0.0, 0.0),
    DVec2::new(0.0, 1.0),
    DVec2::new(1.0, 0.0),
    DVec2::new(1.0, 1.0),
];

/// Shuffles `0..=255` and lays it out twice, so `table[i] == table[i + 256]`.
pub fn build_permutation_table<R: Rng>(rng: &mut R) -> [u8; PERMUTATION_LEN] {
    let mut temp: [u8; TABLE_SIZE] = std::array::from_fn(|i| i as u8);
    temp[..].shuffle(rng);

    let mut permutations = [0u8; PERMUTATION_LEN];
    permutations[..TABLE_SIZE].copy_from_slice(&temp);
    permutations[TABLE_SIZE..].copy_from_slice(&temp);
    permutations
}

/// One unit gradient per permutation slot. Candidates are drawn in the square
/// and kept only inside the unit disk so directions come out uniform.
pub fn build_gradient_table<R: Rng>(rng: &mut R) -> [Vector2; TABLE_SIZE] {
    std::array::from_fn(|_| {
        loop {
            let candidate = DVec2::new(
                rng.random::<f64>() * 2.0 - 1.0,
                rng.random::<f64>() * 2.0 - 1.0,
            );
            let length_squared = candidate.length_squared();
            if length_squared > 0.0 && length_squared < 1.0 {
                break candidate.normalize();
            }
        }
    })
}

/// Corner weight: `fade(uv.x) * fade(uv.y)`.
pub fn fade_weight(uv: Vector2) -> f64 {
    fade(uv.x) * fade(uv.y)
}

/// Read-only lookup tables backing one noise map. Shared by reference across
/// worker threads once built.
#[derive(Debug, Clone)]
pub struct NoiseTables {
    permutations: [u8; PERMUTATION_LEN],
    gradients: [Vector2; TABLE_SIZE],
}

impl NoiseTables {
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        let permutations = build_permutation_table(rng);
        let gradients = build_gradient_table(rng);
        log::debug!("built noise tables");

        Self {
            permutations,
            gradients,
        }
    }

    pub fn from_parts(
        permutations: [u8; PERMUTATION_LEN],
        gradients: [Vector2; TABLE_SIZE],
    ) -> Self {
        Self {
            permutations,
            gradients,
        }
    }

    /// Gradient of the lattice point `(x, y)`, hashed through the permutation
    /// table twice so the two axes do not alias.
    pub fn gradient_at(&self, x: i64, y: i64) -> Vector2 {
        let first = self.permutations[wrap_index(x, PERMUTATION_LEN)];
        let second =
            self.permutations[wrap_index(i64::from(first).wrapping_add(y), PERMUTATION_LEN)];
        self.gradients[usize::from(second) % TABLE_SIZE]
    }

    /// Gradient noise at `point`, clamped to `[-1, 1]`.
    pub fn noise(&self, point: Vector2) -> f64 {
        let cell = point.floor();

        let total: f64 = CORNERS
            .iter()
            .map(|&offset| {
                let corner = cell + offset;
                let uv = point - corner;
                let gradient = self.gradient_at(corner.x as i64, corner.y as i64);
                fade_weight(uv) * gradient.dot(uv)
            })
            .sum();

        total.clamp(-1.0, 1.0)
    }

    /// Lattice noise resampled bicubically over a 4x4 neighbourhood, with the
    /// lattice spread `stretch` units apart.
    pub fn stretched_noise(&self, point: Vector2, stretch: f64) -> f64 {
        let scaled = point / stretch;
        let origin = scaled.floor();
        let frac = scaled - origin;

        let rows: [f64; 4] = std::array::from_fn(|j| {
            let samples = std::array::from_fn(|i| {
                self.noise(origin + DVec2::new(i as f64, j as f64))
            });
            cubic_interpolate(samples, frac.x)
        });

        cubic_interpolate(rows, frac.y)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        rand::{SeedableRng, rngs::StdRng},
    };

    fn tables(seed: u64) -> NoiseTables {
        NoiseTables::new(&mut StdRng::seed_from_u64(seed))
    }

    #[test]
    fn vector_operations() {
        let a = Vector2::new(3.0, 4.0);
        let b = Vector2::new(1.0, -2.0);
        assert_eq!(a.length(), 5.0);
        assert_eq!(a + b, Vector2::new(4.0, 2.0));
        assert_eq!(a - b, Vector2::new(2.0, 6.0));
        assert_eq!(a.dot(b), -5.0);
        assert!((a.normalize().length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn permutation_table_holds_each_value_twice() {
        for seed in 0..8 {
            let table = build_permutation_table(&mut StdRng::seed_from_u64(seed));
            let mut counts = [0usize; TABLE_SIZE];
            for &value in &table {
                counts[usize::from(value)] += 1;
            }
            assert!(counts.iter().all(|&c| c == 2));
            for i in 0..TABLE_SIZE {
                assert_eq!(table[i], table[i + TABLE_SIZE]);
            }
        }
    }

    #[test]
    fn permutation_table_is_shuffled() {
        let table = build_permutation_table(&mut StdRng::seed_from_u64(7));
        let identity: Vec<u8> = (0..=255).collect();
        assert_ne!(&table[..TABLE_SIZE], &identity[..]);
    }

    #[test]
    fn gradients_are_unit_length() {
        for seed in 0..8 {
            let gradients = build_gradient_table(&mut StdRng::seed_from_u64(seed));
            for gradient in gradients {
                assert!((gradient.length() - 1.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn noise_stays_in_range() {
        let tables = tables(42);
        for yi in -40..40 {
            for xi in -40..40 {
                let point = Vector2::new(f64::from(xi) * 0.37, f64::from(yi) * 0.53);
                let value = tables.noise(point);
                assert!((-1.0..=1.0).contains(&value), "{value} at {point}");
            }
        }
    }

    #[test]
    fn lattice_point_takes_diagonal_corner_only() {
        let tables = tables(3);
        for (x, y) in [(0_i64, 0_i64), (5, 9), (-3, 12), (-100, -7), (511, 511)] {
            let value = tables.noise(Vector2::new(x as f64, y as f64));
            let diagonal = tables.gradient_at(x + 1, y + 1);
            let expected = diagonal.dot(Vector2::NEG_ONE).clamp(-1.0, 1.0);
            assert!((value - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn origin_corner_contributes_nothing_at_lattice_point() {
        let uv = Vector2::ZERO;
        let gradient = tables(1).gradient_at(0, 0);
        assert_eq!(gradient.dot(uv), 0.0);
        assert_eq!(fade_weight(Vector2::new(0.0, -1.0)), 0.0);
        assert_eq!(fade_weight(Vector2::new(-1.0, 0.0)), 0.0);
        assert_eq!(fade_weight(Vector2::NEG_ONE), 1.0);
    }

    #[test]
    fn double_lookup_with_identity_permutation() {
        let permutations = std::array::from_fn(|i| (i % TABLE_SIZE) as u8);
        let gradients = std::array::from_fn(|i| Vector2::from_angle(i as f64));
        let tables = NoiseTables::from_parts(permutations, gradients);

        assert_eq!(tables.gradient_at(3, 4), gradients[7]);
        assert_eq!(tables.gradient_at(200, 100), gradients[44]);
        assert_eq!(tables.gradient_at(-1, 0), gradients[255]);
    }

    #[test]
    fn negative_coordinates_wrap_like_positive_ones() {
        let tables = tables(11);
        assert_eq!(tables.gradient_at(-1, 4), tables.gradient_at(511, 4));
        assert_eq!(tables.gradient_at(6, -2), tables.gradient_at(6, 510));
        assert_eq!(
            tables.gradient_at(-1024, -1024),
            tables.gradient_at(0, 0)
        );

        let point = Vector2::new(-3.25, -0.5);
        let shifted = point + Vector2::new(PERMUTATION_LEN as f64, 0.0);
        assert!((tables.noise(point) - tables.noise(shifted)).abs() < 1e-9);
    }

    #[test]
    fn stretched_noise_on_stretch_multiple_samples_lattice() {
        let tables = tables(5);
        let stretch = 4.0;
        for (a, b) in [(0.0, 0.0), (2.0, 3.0), (-1.0, 6.0)] {
            let value = tables.stretched_noise(Vector2::new(a * stretch, b * stretch), stretch);
            let lattice = tables.noise(Vector2::new(a + 1.0, b + 1.0));
            assert!((value - lattice).abs() < 1e-12);
        }
    }

    #[test]
    fn same_seed_same_noise() {
        let a = tables(99);
        let b = tables(99);
        assert_eq!(a.permutations, b.permutations);
        assert_eq!(a.gradients, b.gradients);
        for i in 0..50 {
            let point = Vector2::new(f64::from(i) * 1.7, f64::from(i) * -0.9);
            assert_eq!(a.stretched_noise(point, 10.0), b.stretched_noise(point, 10.0));
        }
    }
}
