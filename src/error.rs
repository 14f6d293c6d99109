pub type Result<T> = std::result::Result<T, TerrainError>;

#[derive(Debug, thiserror::Error)]
pub enum TerrainError {
    #[error("invalid dimensions: {width}x{height} (both must be at least 1)")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("invalid stretch: {0} (must be finite and greater than zero)")]
    InvalidStretch(f64),

    #[error("invalid octave frequency: {0} (must be finite and greater than zero)")]
    InvalidFrequency(f64),

    #[error("invalid amplitude: {0} (must be finite)")]
    InvalidAmplitude(f64),

    #[error("sample coordinates overflow with frequency {frequency} and stretch {stretch}")]
    SampleOverflow { frequency: f64, stretch: f64 },

    #[error("no layers to merge")]
    EmptyLayers,

    #[error("amplitude weights sum to {0}, expected a positive total")]
    InvalidWeightSum(f64),

    #[error("got {weights} amplitude weights for {layers} layers")]
    WeightCountMismatch { weights: usize, layers: usize },

    #[error("layer {index} is {found:?}, expected {expected:?} like the first layer")]
    LayerShapeMismatch {
        index: usize,
        expected: (u32, u32),
        found: (u32, u32),
    },

    #[error("invalid redistribution exponent: {0} (must be finite and greater than zero)")]
    InvalidExponent(f64),

    #[error("invalid water level: {0} (must lie in [0, 1])")]
    InvalidWaterLevel(f64),

    #[error("{colors} colors for a {width}x{height} image")]
    ColorCountMismatch {
        colors: usize,
        width: u32,
        height: u32,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}
