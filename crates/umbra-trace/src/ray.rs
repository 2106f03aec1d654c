use glam::Vec3;
use umbra_core::constants::OCCLUSION_EPSILON;
use umbra_core::math::{decay_factor, dominant_extent};
use umbra_core::{HeightField, LightSource};

use crate::bresenham::bresenham;
use crate::config::{Strategy, TraceConfig};
use crate::march::{adaptive_march, uniform_march};

/// Result of testing one light against one target point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayOutcome {
    /// Terrain rose above the ray at some sampled point.
    pub occluded: bool,
    /// Terrain lookups performed before the ray finished or stopped.
    pub samples: u32,
    /// Straight-line 3D distance between light and target.
    pub distance: f32,
}

impl RayOutcome {
    pub(crate) fn clear(samples: u32, distance: f32) -> Self {
        Self {
            occluded: false,
            samples,
            distance,
        }
    }

    pub(crate) fn blocked(samples: u32, distance: f32) -> Self {
        Self {
            occluded: true,
            samples,
            distance,
        }
    }

    /// Contribution of this light under distance decay: occluded lights
    /// count as having travelled the full range and add nothing.
    pub fn decayed(&self, max_travel_distance: f32) -> f32 {
        let travelled = if self.occluded {
            max_travel_distance
        } else {
            self.distance
        };
        decay_factor(travelled, max_travel_distance)
    }
}

/// Whether terrain under `way_point` rises above the ray at that point.
/// Differences within `OCCLUSION_EPSILON` are rounding noise, not terrain.
pub(crate) fn blocks(field: &HeightField, way_point: Vec3) -> bool {
    field.height_at(way_point.truncate()) > way_point.z + OCCLUSION_EPSILON
}

/// Trace the ray between `light` and `target` with the configured
/// strategy.
///
/// A light directly above or below the target (zero planar distance)
/// is never occluded and costs no samples.
pub fn trace_ray(
    field: &HeightField,
    light: &LightSource,
    target: Vec3,
    config: &TraceConfig,
) -> RayOutcome {
    let light = light.position();
    let distance = (light - target).length();
    if dominant_extent(light - target) == 0.0 {
        return RayOutcome::clear(0, distance);
    }

    match config.strategy {
        Strategy::UniformMarch => uniform_march(field, target, light, config.steps),
        Strategy::AdaptiveMarch => adaptive_march(field, target, light, config.steps),
        Strategy::Bresenham | Strategy::BresenhamDecay => bresenham(field, light, target),
    }
}
