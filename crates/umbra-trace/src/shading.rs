//! Turning lightness into final colors.
//! Shader-style shading multiplies a diffuse color by lightness and floors
//! lightness at [`SHADER_LIGHTNESS_FLOOR`] so shadows never go black.

use umbra_core::ShadowField;

pub use umbra_core::constants::SHADER_LIGHTNESS_FLOOR;

/// `max(value, floor)` when a floor is configured.
pub fn apply_floor(value: f32, floor: Option<f32>) -> f32 {
    match floor {
        Some(f) => value.max(f),
        None => value,
    }
}

/// Scale each cell's albedo by its lightness. `albedo` is row-major
/// like the shadow field; extra entries on either side are ignored.
pub fn modulate(albedo: &[[f32; 3]], shadow: &ShadowField) -> Vec<[f32; 3]> {
    albedo
        .iter()
        .zip(shadow.as_slice())
        .map(|(rgb, &l)| [rgb[0] * l, rgb[1] * l, rgb[2] * l])
        .collect()
}
