use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::UmbraError;
use crate::math::cell_index;

/// Immutable grid of terrain heights, row-major (`index = y * width + x`).
///
/// Every height is finite and non-negative; this is checked on
/// construction so lookups never have to.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightField {
    width: u32,
    height: u32,
    heights: Vec<f32>,
}

impl HeightField {
    /// Wrap an existing row-major height buffer.
    pub fn new(width: u32, height: u32, heights: Vec<f32>) -> Result<Self, UmbraError> {
        check_dimensions(width, height)?;
        let expected = width as usize * height as usize;
        if heights.len() != expected {
            return Err(UmbraError::HeightCountMismatch {
                expected,
                actual: heights.len(),
            });
        }
        if let Some(i) = heights.iter().position(|h| !h.is_finite() || *h < 0.0) {
            return Err(UmbraError::InvalidHeight {
                x: (i % width as usize) as u32,
                y: (i / width as usize) as u32,
                value: heights[i],
            });
        }
        Ok(Self {
            width,
            height,
            heights,
        })
    }

    /// A field with every cell at the same elevation.
    pub fn flat(width: u32, height: u32, elevation: f32) -> Result<Self, UmbraError> {
        check_dimensions(width, height)?;
        Self::new(
            width,
            height,
            vec![elevation; width as usize * height as usize],
        )
    }

    /// Build a field by evaluating `f(x, y)` for every cell.
    pub fn from_fn(
        width: u32,
        height: u32,
        mut f: impl FnMut(u32, u32) -> f32,
    ) -> Result<Self, UmbraError> {
        check_dimensions(width, height)?;
        let mut heights = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                heights.push(f(x, y));
            }
        }
        Self::new(width, height, heights)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of cells in the grid.
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Height of cell `(x, y)`. Coordinates are clamped into the grid.
    pub fn get(&self, x: u32, y: u32) -> f32 {
        let x = x.min(self.width - 1) as usize;
        let y = y.min(self.height - 1) as usize;
        self.heights[y * self.width as usize + x]
    }

    /// Height under a continuous planar position. Each coordinate is
    /// truncated to its cell index and clamped into the grid.
    pub fn height_at(&self, pos: Vec2) -> f32 {
        let x = cell_index(pos.x, self.width);
        let y = cell_index(pos.y, self.height);
        self.heights[y * self.width as usize + x]
    }

    /// Whether a continuous planar position lies inside `[0, W) x [0, H)`.
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= 0.0 && pos.y >= 0.0 && pos.x < self.width as f32 && pos.y < self.height as f32
    }

    /// Point on the terrain surface of cell `(x, y)`, lifted by `offset`.
    pub fn surface_point(&self, x: u32, y: u32, offset: f32) -> Vec3 {
        Vec3::new(x as f32, y as f32, self.get(x, y) + offset)
    }

    /// Row-major height buffer.
    pub fn as_slice(&self) -> &[f32] {
        &self.heights
    }

    /// Highest terrain point in the field.
    pub fn max_height(&self) -> f32 {
        self.heights.iter().copied().fold(0.0, f32::max)
    }

    /// Check a light list against this field: non-empty, finite, and
    /// planar position inside the grid. Any number of lights is accepted.
    pub fn check_lights(&self, lights: &[LightSource]) -> Result<(), UmbraError> {
        if lights.is_empty() {
            return Err(UmbraError::NoLightSources);
        }
        for (index, light) in lights.iter().enumerate() {
            if !light.is_finite() {
                return Err(UmbraError::NonFiniteLight { index });
            }
            if !self.contains(light.planar()) {
                return Err(UmbraError::LightOutOfBounds {
                    index,
                    x: light.x,
                    y: light.y,
                    width: self.width,
                    height: self.height,
                });
            }
        }
        Ok(())
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<(), UmbraError> {
    if width == 0 || height == 0 {
        return Err(UmbraError::InvalidDimensions { width, height });
    }
    Ok(())
}

/// Point light in grid units. `h` is the light's height above the
/// field's zero level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightSource {
    pub x: f32,
    pub y: f32,
    pub h: f32,
}

impl LightSource {
    pub const fn new(x: f32, y: f32, h: f32) -> Self {
        Self { x, y, h }
    }

    /// Build a light from UV coordinates in `[0, 1]`, scaled to a
    /// `width x height` grid.
    pub fn from_normalized(u: f32, v: f32, h: f32, width: u32, height: u32) -> Self {
        Self {
            x: u * width as f32,
            y: v * height as f32,
            h,
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.h)
    }

    pub fn planar(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.h.is_finite()
    }
}

/// Per-cell lightness produced by a render pass, row-major like
/// [`HeightField`].
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowField {
    width: u32,
    height: u32,
    values: Vec<f32>,
}

impl ShadowField {
    /// A field with every cell set to `value`.
    pub fn filled(width: u32, height: u32, value: f32) -> Self {
        Self {
            width,
            height,
            values: vec![value; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Lightness of cell `(x, y)`.
    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.values[y as usize * self.width as usize + x as usize]
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    /// Mutable row-major buffer; used by the renderer to fill rows.
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.values
    }

    /// Smallest and largest value in the field.
    pub fn min_max(&self) -> (f32, f32) {
        self.values
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }

    pub fn mean(&self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        self.values.iter().sum::<f32>() / self.values.len() as f32
    }
}
