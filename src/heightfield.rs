use crate::error::{Result, TerrainError};

/// Dense row-major grid of heights.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightField {
    width: u32,
    height: u32,
    data: Vec<f64>,
}

impl HeightField {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::from_vec(width, height, vec![0.0; width as usize * height as usize])
    }

    pub fn filled(width: u32, height: u32, value: f64) -> Result<Self> {
        Self::from_vec(width, height, vec![value; width as usize * height as usize])
    }

    pub fn from_vec(width: u32, height: u32, data: Vec<f64>) -> Result<Self> {
        if width == 0 || height == 0 || data.len() != width as usize * height as usize {
            return Err(TerrainError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> f64 {
        self.data[self.index(x, y)]
    }

    pub fn values(&self) -> &[f64] {
        &self.data
    }

    pub(crate) fn values_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Smallest and largest value.
    pub fn range(&self) -> (f64, f64) {
        self.data
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }

    fn index(&self, x: u32, y: u32) -> usize {
        assert!(x < self.width && y < self.height, "({x}, {y}) out of bounds");
        y as usize * self.width as usize + x as usize
    }
}
