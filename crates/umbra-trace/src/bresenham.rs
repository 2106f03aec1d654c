//! Grid-aligned line traversal from a light to its target.
//!
//! The ray advances by `direction / max(|dx|, |dy|)`, so every step
//! moves exactly one cell along the dominant axis and each crossed cell
//! is sampled once. This is the reference the marching strategies are
//! compared against.

use glam::Vec3;
use umbra_core::math::dominant_extent;
use umbra_core::HeightField;

use crate::ray::{blocks, RayOutcome};

/// Walk from `light` to `target`, sampling `floor(max(|dx|, |dy|)) + 1`
/// waypoints (both endpoints included) unless terrain blocks the ray
/// first. Coincident planar positions perform no samples.
pub fn bresenham(field: &HeightField, light: Vec3, target: Vec3) -> RayOutcome {
    let direction = target - light;
    let distance = direction.length();
    let max_dist = dominant_extent(direction);
    if max_dist == 0.0 {
        return RayOutcome::clear(0, distance);
    }

    let delta = direction / max_dist;
    let last = max_dist as u32;
    for i in 0..=last {
        let way_point = light + i as f32 * delta;
        if blocks(field, way_point) {
            return RayOutcome::blocked(i + 1, distance);
        }
    }
    RayOutcome::clear(last + 1, distance)
}

/// Number of samples an unoccluded Bresenham ray takes between two points.
pub fn traversal_length(light: Vec3, target: Vec3) -> u32 {
    let max_dist = dominant_extent(target - light);
    if max_dist == 0.0 {
        0
    } else {
        max_dist as u32 + 1
    }
}
