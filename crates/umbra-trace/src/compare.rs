//! Side-by-side renders of two configurations, used to check the
//! marching strategies against the Bresenham traversal.

use serde::{Deserialize, Serialize};
use umbra_core::{HeightField, LightSource, UmbraError};

use crate::config::{Strategy, TraceConfig};
use crate::renderer::render_shadow_field;

/// Cell values within this distance count as matching.
pub const MATCH_TOLERANCE: f32 = 1e-4;

/// How closely two renders of the same scene agree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Agreement {
    pub matching_cells: usize,
    pub total_cells: usize,
    pub max_abs_diff: f32,
}

impl Agreement {
    /// Fraction of cells that match, in `[0, 1]`.
    pub fn ratio(&self) -> f64 {
        if self.total_cells == 0 {
            return 1.0;
        }
        self.matching_cells as f64 / self.total_cells as f64
    }

    pub fn is_exact(&self) -> bool {
        self.matching_cells == self.total_cells
    }
}

/// Render the scene with both configurations and compare cell by cell.
pub fn agreement(
    field: &HeightField,
    lights: &[LightSource],
    a: &TraceConfig,
    b: &TraceConfig,
) -> Result<Agreement, UmbraError> {
    let left = render_shadow_field(field, lights, a)?;
    let right = render_shadow_field(field, lights, b)?;

    let mut matching_cells = 0;
    let mut max_abs_diff = 0.0f32;
    for (&l, &r) in left.as_slice().iter().zip(right.as_slice()) {
        let diff = (l - r).abs();
        if diff <= MATCH_TOLERANCE {
            matching_cells += 1;
        }
        max_abs_diff = max_abs_diff.max(diff);
    }

    Ok(Agreement {
        matching_cells,
        total_cells: left.as_slice().len(),
        max_abs_diff,
    })
}

/// Compare `config` against the exact traversal with otherwise identical
/// settings. Decaying configs are compared against `BresenhamDecay`,
/// binary ones against `Bresenham`.
pub fn against_ground_truth(
    field: &HeightField,
    lights: &[LightSource],
    config: &TraceConfig,
) -> Result<Agreement, UmbraError> {
    let reference = TraceConfig {
        strategy: if config.strategy.is_binary() {
            Strategy::Bresenham
        } else {
            Strategy::BresenhamDecay
        },
        ..*config
    };
    agreement(field, lights, config, &reference)
}
