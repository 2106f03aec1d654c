use thiserror::Error;

/// Invalid-input conditions rejected before a render pass starts.
/// Once inputs validate, rendering is total.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UmbraError {
    #[error("grid dimensions must be positive (got {width}x{height})")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("height field expects {expected} samples, got {actual}")]
    HeightCountMismatch { expected: usize, actual: usize },

    #[error("height at ({x}, {y}) must be finite and non-negative (got {value})")]
    InvalidHeight { x: u32, y: u32, value: f32 },

    #[error("at least one light source is required")]
    NoLightSources,

    #[error("light source {index} has non-finite coordinates")]
    NonFiniteLight { index: usize },

    #[error("light source {index} at ({x}, {y}) lies outside the {width}x{height} grid")]
    LightOutOfBounds {
        index: usize,
        x: f32,
        y: f32,
        width: u32,
        height: u32,
    },

    #[error("ray march step count must be at least 1")]
    InvalidStepCount,

    #[error("max travel distance must be finite and positive (got {0})")]
    InvalidTravelDistance(f32),
}
