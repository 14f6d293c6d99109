mod error;
mod heightfield;
mod layer;
mod noise;
mod palette;
mod raster;
mod terrain;
mod utils;

pub use error::*;
pub use heightfield::*;
pub use layer::*;
pub use noise::*;
pub use palette::*;
pub use raster::*;
pub use terrain::*;
pub use utils::{cubic_interpolate, fade};
