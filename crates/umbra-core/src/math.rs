use glam::Vec3;

/// Truncate a continuous coordinate to a cell index along an axis of
/// `extent` cells. Truncation is toward zero; the result is clamped into
/// `[0, extent)` so lookups can never leave the grid.
pub fn cell_index(coord: f32, extent: u32) -> usize {
    let max = extent.saturating_sub(1) as usize;
    if coord.is_nan() || coord <= 0.0 {
        return 0;
    }
    (coord.trunc() as usize).min(max)
}

/// Largest planar component of a vector: `max(|x|, |y|)`.
/// This is the number of unit steps a grid-aligned line needs.
pub fn dominant_extent(v: Vec3) -> f32 {
    v.x.abs().max(v.y.abs())
}

/// Normalized, squared falloff of a light that travelled `distance`:
/// `((max - d) / max)^2`.
///
/// An occluded light is charged `d == max` and contributes exactly 0.
/// Distances are not clamped; a light farther than `max` contributes
/// the square of a negative ratio.
pub fn decay_factor(distance: f32, max_travel_distance: f32) -> f32 {
    let f = (max_travel_distance - distance) / max_travel_distance;
    f * f
}

/// Fraction of lights with an unobstructed path: `1 - occluded / total`.
pub fn visible_fraction(occluded: u32, total: u32) -> f32 {
    if total == 0 {
        return 1.0;
    }
    1.0 - occluded as f32 / total as f32
}
