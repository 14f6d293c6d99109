use {
    crate::{
        error::{Result, TerrainError},
        heightfield::HeightField,
        noise::{NoiseTables, Vector2},
    },
    rand::Rng,
    rayon::prelude::*,
};

/// One noise layer: sample spacing, lattice stretch and weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Octave {
    pub frequency: f64,
    pub stretch: f64,
    pub amplitude: f64,
}

impl Octave {
    pub fn new(frequency: f64, stretch: f64, amplitude: f64) -> Self {
        Self {
            frequency,
            stretch,
            amplitude,
        }
    }

    /// `count` octaves, each `lacunarity` times the previous frequency and
    /// `persistence` times its amplitude, starting from 1 and 1.
    pub fn series(count: usize, stretch: f64, lacunarity: f64, persistence: f64) -> Vec<Self> {
        let mut frequency = 1.0;
        let mut amplitude = 1.0;
        let mut octaves = Vec::with_capacity(count);

        for _ in 0..count {
            octaves.push(Self::new(frequency, stretch, amplitude));
            frequency *= lacunarity;
            amplitude *= persistence;
        }

        octaves
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.frequency.is_finite() && self.frequency > 0.0) {
            return Err(TerrainError::InvalidFrequency(self.frequency));
        }
        if !(self.stretch.is_finite() && self.stretch > 0.0) {
            return Err(TerrainError::InvalidStretch(self.stretch));
        }
        if !self.amplitude.is_finite() {
            return Err(TerrainError::InvalidAmplitude(self.amplitude));
        }
        Ok(())
    }

    /// Rejects octaves whose sample coordinates overflow on a `width` x
    /// `height` grid, which would otherwise turn into NaN heights.
    pub fn validate_extent(&self, width: u32, height: u32) -> Result<()> {
        self.validate()?;
        let extent = f64::from(width.max(height).saturating_sub(1)) * self.frequency;
        if !(extent.is_finite() && (extent / self.stretch).is_finite()) {
            return Err(TerrainError::SampleOverflow {
                frequency: self.frequency,
                stretch: self.stretch,
            });
        }
        Ok(())
    }

    /// Evaluates this octave over a `width` x `height` grid using `tables`.
    /// Each value is clamped to `[0, 1]` and halved.
    pub fn render(&self, tables: &NoiseTables, width: u32, height: u32) -> Result<HeightField> {
        self.validate_extent(width, height)?;
        let mut field = HeightField::new(width, height)?;

        field
            .values_mut()
            .par_chunks_mut(width as usize)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, value) in row.iter_mut().enumerate() {
                    let point = Vector2::new(x as f64, y as f64) * self.frequency;
                    let sample = tables.stretched_noise(point, self.stretch) * self.amplitude;
                    *value = sample.clamp(0.0, 1.0) * 0.5;
                }
            });

        Ok(field)
    }
}

/// Builds fresh noise tables from `rng` and renders a single octave with them.
pub fn generate_noise_map<R: Rng>(
    width: u32,
    height: u32,
    octave_frequency: f64,
    stretch: f64,
    amplitude: f64,
    rng: &mut R,
) -> Result<HeightField> {
    let octave = Octave::new(octave_frequency, stretch, amplitude);
    if width == 0 || height == 0 {
        return Err(TerrainError::InvalidDimensions { width, height });
    }
    octave.validate_extent(width, height)?;

    let tables = NoiseTables::new(rng);
    octave.render(&tables, width, height)
}

/// Averages `layers` by the total of `amplitude_weights`, applies the
/// redistribution curve and raises everything below `water_level` to it.
pub fn merge_layers(
    amplitude_weights: &[f64],
    redistribution_exponent: f64,
    water_level: f64,
    layers: &[HeightField],
) -> Result<HeightField> {
    let first = layers.first().ok_or(TerrainError::EmptyLayers)?;
    if amplitude_weights.len() != layers.len() {
        return Err(TerrainError::WeightCountMismatch {
            weights: amplitude_weights.len(),
            layers: layers.len(),
        });
    }

    let weight_sum: f64 = amplitude_weights.iter().sum();
    if !(weight_sum.is_finite() && weight_sum > 0.0) {
        return Err(TerrainError::InvalidWeightSum(weight_sum));
    }
    if !(redistribution_exponent.is_finite() && redistribution_exponent > 0.0) {
        return Err(TerrainError::InvalidExponent(redistribution_exponent));
    }
    if !(0.0..=1.0).contains(&water_level) {
        return Err(TerrainError::InvalidWaterLevel(water_level));
    }

    let expected = first.dimensions();
    if let Some((index, layer)) = layers
        .iter()
        .enumerate()
        .find(|(_, layer)| layer.dimensions() != expected)
    {
        return Err(TerrainError::LayerShapeMismatch {
            index,
            expected,
            found: layer.dimensions(),
        });
    }

    let (width, height) = expected;
    let mut merged = HeightField::new(width, height)?;

    merged
        .values_mut()
        .par_iter_mut()
        .enumerate()
        .for_each(|(i, value)| {
            let sum: f64 = layers.iter().map(|layer| layer.values()[i]).sum();
            *value = redistribute(sum / weight_sum, redistribution_exponent, water_level);
        });

    Ok(merged)
}

fn redistribute(normalized: f64, exponent: f64, water_level: f64) -> f64 {
    normalized.powf(exponent).max(water_level).clamp(0.0, 1.0)
}
