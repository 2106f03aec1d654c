//! Diffuse colors derived from terrain height.

use umbra_core::HeightField;

/// Per-cell albedo `(h * 0.5, 1 - h * 0.5, 0)`: low ground green, high
/// ground red. Channels are clamped to `[0, 1]`.
pub fn height_tint(field: &HeightField) -> Vec<[f32; 3]> {
    field
        .as_slice()
        .iter()
        .map(|&h| {
            let r = (h * 0.5).clamp(0.0, 1.0);
            let g = (1.0 - h * 0.5).clamp(0.0, 1.0);
            [r, g, 0.0]
        })
        .collect()
}
