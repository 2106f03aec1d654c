//! Single source of truth for shared constants.
//! Defaults here are used by the trace config, the built-in scenes and
//! the bench runner.

/// Side length of the sample height field in cells.
pub const DEFAULT_GRID_SIZE: u32 = 100;

/// Number of samples taken per ray by the step-marching strategies.
pub const DEFAULT_RAY_MARCH_STEPS: u32 = 50;

/// Distance at which a decaying light contributes nothing.
/// Occluded lights are treated as having travelled exactly this far.
pub const DEFAULT_MAX_TRAVEL_DISTANCE: f32 = 100.0;

/// Slack allowed when comparing terrain against a ray's height, so f32
/// rounding at a ray's endpoint never reads as occlusion. A ray counts
/// as blocked only when `terrain > z + OCCLUSION_EPSILON`; rays grazing
/// less than this far below a ridge stay lit.
pub const OCCLUSION_EPSILON: f32 = 1e-4;

/// Lightness floor of shader-style shading (`max(lightness, 0.2)`).
pub const SHADER_LIGHTNESS_FLOOR: f32 = 0.2;

/// Height bias shader-style shading adds to the start point of each ray
/// so a surface does not shadow itself.
pub const SHADER_SURFACE_OFFSET: f32 = 0.01;

/// Elevation of the sample plateau.
pub const PLATEAU_ELEVATION: f32 = 1.0;

/// Lower corner of the sample plateau (inclusive, both axes).
pub const PLATEAU_MIN: u32 = 40;

/// Side length of the sample plateau in cells.
pub const PLATEAU_SIZE: u32 = 20;

/// Wavelength divisor of the sine terrain (`sin(x / 25)`).
pub const WAVE_PERIOD: f32 = 25.0;
