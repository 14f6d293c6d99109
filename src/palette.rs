#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(value: f64) -> Self {
        Self::new(value, value, value)
    }

    /// Linear `[0, 1] -> [0, 255]` per channel, rounded.
    pub fn to_rgb8(&self) -> [u8; 3] {
        [channel(self.r), channel(self.g), channel(self.b)]
    }
}

fn channel(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Palette {
    #[default]
    Grayscale,
    Terrain,
}

impl Palette {
    pub fn color(&self, height: f64, water_level: f64) -> Color {
        match self {
            Self::Grayscale => Color::gray(height),
            Self::Terrain => TerrainBand::classify(height, water_level).color(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerrainBand {
    Water,
    Shore,
    Lowland,
    Forest,
    Rock,
    Snow,
}

impl TerrainBand {
    /// Bands above the shore are fixed heights; the shore hugs the water level.
    pub fn classify(height: f64, water_level: f64) -> Self {
        match height {
            h if h <= water_level => Self::Water,
            h if h < water_level + 0.03 => Self::Shore,
            h if h < 0.45 => Self::Lowland,
            h if h < 0.6 => Self::Forest,
            h if h < 0.75 => Self::Rock,
            _ => Self::Snow,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Self::Water => Color::new(0.12, 0.28, 0.56),
            Self::Shore => Color::new(0.82, 0.76, 0.52),
            Self::Lowland => Color::new(0.35, 0.6, 0.27),
            Self::Forest => Color::new(0.2, 0.42, 0.2),
            Self::Rock => Color::new(0.5, 0.46, 0.42),
            Self::Snow => Color::new(0.95, 0.95, 0.97),
        }
    }
}
