use serde::{Deserialize, Serialize};
use umbra_core::constants::{DEFAULT_MAX_TRAVEL_DISTANCE, DEFAULT_RAY_MARCH_STEPS};
use umbra_core::UmbraError;

/// How a ray between a cell and a light is sampled.
///
/// All four share the same contract; they differ in how many terrain
/// lookups they spend and how closely they follow the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// `steps` equally spaced samples from the cell toward the light.
    UniformMarch,
    /// Like `UniformMarch`, but each step advances at least one cell
    /// along the dominant axis and rays that leave the grid stop.
    AdaptiveMarch,
    /// One sample per crossed cell, traced from the light to the cell.
    Bresenham,
    /// Bresenham traversal, summing a squared distance falloff per light
    /// instead of counting occluded lights.
    BresenhamDecay,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::UniformMarch,
        Strategy::AdaptiveMarch,
        Strategy::Bresenham,
        Strategy::BresenhamDecay,
    ];

    /// Whether `steps` bounds the sample count for this strategy.
    pub fn uses_steps(self) -> bool {
        matches!(self, Strategy::UniformMarch | Strategy::AdaptiveMarch)
    }

    /// Whether cell values are a visible-light fraction in `[0, 1]`.
    pub fn is_binary(self) -> bool {
        !matches!(self, Strategy::BresenhamDecay)
    }

    pub fn label(self) -> &'static str {
        match self {
            Strategy::UniformMarch => "uniform-march",
            Strategy::AdaptiveMarch => "adaptive-march",
            Strategy::Bresenham => "bresenham",
            Strategy::BresenhamDecay => "bresenham-decay",
        }
    }
}

/// Parameters of a render pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    pub strategy: Strategy,
    /// Samples per ray for the marching strategies.
    pub steps: u32,
    /// Falloff range for `BresenhamDecay`; also the penalty distance of
    /// an occluded light.
    pub max_travel_distance: f32,
    /// Added to the terrain height of the target cell.
    pub surface_offset: f32,
    /// Lower bound applied to every cell value when set.
    pub min_lightness: Option<f32>,
    /// Render rows on the rayon pool.
    pub parallel: bool,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Bresenham,
            steps: DEFAULT_RAY_MARCH_STEPS,
            max_travel_distance: DEFAULT_MAX_TRAVEL_DISTANCE,
            surface_offset: 0.0,
            min_lightness: None,
            parallel: true,
        }
    }
}

impl TraceConfig {
    pub fn with_strategy(strategy: Strategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), UmbraError> {
        if self.strategy.uses_steps() && self.steps == 0 {
            return Err(UmbraError::InvalidStepCount);
        }
        if !self.max_travel_distance.is_finite() || self.max_travel_distance <= 0.0 {
            return Err(UmbraError::InvalidTravelDistance(self.max_travel_distance));
        }
        Ok(())
    }
}
