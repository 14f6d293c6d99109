use {
    crate::{
        error::{Result, TerrainError},
        heightfield::HeightField,
        layer::{Octave, merge_layers},
        noise::NoiseTables,
    },
    rand::Rng,
    std::time::Instant,
};

#[derive(Debug, Clone, PartialEq)]
pub struct TerrainConfig {
    pub width: u32,
    pub height: u32,
    pub octaves: Vec<Octave>,
    pub redistribution: f64,
    pub water_level: f64,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 600,
            octaves: Octave::series(3, 100.0, 2.0, 0.5),
            redistribution: 0.72,
            water_level: 0.1,
        }
    }
}

impl TerrainConfig {
    pub fn amplitude_weights(&self) -> Vec<f64> {
        self.octaves.iter().map(|octave| octave.amplitude).collect()
    }

    /// Checks everything `generate_terrain` would otherwise reject halfway.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(TerrainError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.octaves.is_empty() {
            return Err(TerrainError::EmptyLayers);
        }
        for octave in &self.octaves {
            octave.validate_extent(self.width, self.height)?;
        }

        let weight_sum: f64 = self.octaves.iter().map(|octave| octave.amplitude).sum();
        if !(weight_sum.is_finite() && weight_sum > 0.0) {
            return Err(TerrainError::InvalidWeightSum(weight_sum));
        }
        if !(self.redistribution.is_finite() && self.redistribution > 0.0) {
            return Err(TerrainError::InvalidExponent(self.redistribution));
        }
        if !(0.0..=1.0).contains(&self.water_level) {
            return Err(TerrainError::InvalidWaterLevel(self.water_level));
        }
        Ok(())
    }
}

pub struct TerrainBuilder {
    config: TerrainConfig,
}

impl TerrainBuilder {
    pub fn new() -> Self {
        Self {
            config: TerrainConfig::default(),
        }
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.config.width = width;
        self.config.height = height;
        self
    }

    pub fn octaves(mut self, octaves: Vec<Octave>) -> Self {
        self.config.octaves = octaves;
        self
    }

    pub fn octave_series(
        mut self,
        count: usize,
        stretch: f64,
        lacunarity: f64,
        persistence: f64,
    ) -> Self {
        self.config.octaves = Octave::series(count, stretch, lacunarity, persistence);
        self
    }

    pub fn redistribution(mut self, exponent: f64) -> Self {
        self.config.redistribution = exponent;
        self
    }

    pub fn water_level(mut self, level: f64) -> Self {
        self.config.water_level = level;
        self
    }

    pub fn build(self) -> Result<TerrainConfig> {
        self.config.validate()?;
        if !(0.25..=4.0).contains(&self.config.redistribution) {
            log::warn!(
                "redistribution exponent {} will flatten or spike most of the map",
                self.config.redistribution
            );
        }
        Ok(self.config)
    }
}

impl Default for TerrainBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders every octave with its own freshly drawn tables and merges them.
pub fn generate_terrain<R: Rng>(config: &TerrainConfig, rng: &mut R) -> Result<HeightField> {
    config.validate()?;

    let mut layers = Vec::with_capacity(config.octaves.len());
    for (i, octave) in config.octaves.iter().enumerate() {
        log::debug!(
            "octave {i}: frequency {}, stretch {}, amplitude {}",
            octave.frequency,
            octave.stretch,
            octave.amplitude
        );
        let start = Instant::now();
        let tables = NoiseTables::new(rng);
        layers.push(octave.render(&tables, config.width, config.height)?);
        log::info!("octave {i} generated in {}ms", start.elapsed().as_millis());
    }

    let start = Instant::now();
    let merged = merge_layers(
        &config.amplitude_weights(),
        config.redistribution,
        config.water_level,
        &layers,
    )?;
    let (lowest, highest) = merged.range();
    log::info!(
        "merged {} layers in {}ms (heights {lowest:.3}..{highest:.3})",
        layers.len(),
        start.elapsed().as_millis()
    );

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        rand::{SeedableRng, rngs::StdRng},
    };

    #[test]
    fn default_matches_reference_render() {
        let config = TerrainConfig::default();
        assert_eq!((config.width, config.height), (600, 600));
        assert_eq!(config.amplitude_weights(), vec![1.0, 0.5, 0.25]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_validates() {
        assert!(matches!(
            TerrainBuilder::new().octaves(Vec::new()).build(),
            Err(TerrainError::EmptyLayers)
        ));
        assert!(matches!(
            TerrainBuilder::new().size(0, 10).build(),
            Err(TerrainError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            TerrainBuilder::new().octave_series(2, -1.0, 2.0, 0.5).build(),
            Err(TerrainError::InvalidStretch(_))
        ));
        assert!(matches!(
            TerrainBuilder::new()
                .octaves(vec![Octave::new(1.0, 10.0, 0.0)])
                .build(),
            Err(TerrainError::InvalidWeightSum(_))
        ));
        assert!(matches!(
            TerrainBuilder::new()
                .octaves(vec![Octave::new(1.0, 1e-310, 1.0)])
                .build(),
            Err(TerrainError::SampleOverflow { .. })
        ));
    }

    #[test]
    fn terrain_respects_water_floor() {
        let config = TerrainBuilder::new()
            .size(32, 24)
            .octave_series(3, 6.0, 2.0, 0.5)
            .water_level(0.2)
            .build()
            .unwrap();
        let field = generate_terrain(&config, &mut StdRng::seed_from_u64(77)).unwrap();
        assert_eq!(field.dimensions(), (32, 24));
        assert!(field.values().iter().all(|v| (0.2..=1.0).contains(v)));
    }

    #[test]
    fn terrain_is_reproducible() {
        let config = TerrainBuilder::new().size(16, 16).build().unwrap();
        let a = generate_terrain(&config, &mut StdRng::seed_from_u64(5)).unwrap();
        let b = generate_terrain(&config, &mut StdRng::seed_from_u64(5)).unwrap();
        assert_eq!(a, b);
    }
}
