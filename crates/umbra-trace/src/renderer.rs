use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use umbra_core::math::visible_fraction;
use umbra_core::{HeightField, LightSource, ShadowField, UmbraError};

use crate::config::{Strategy, TraceConfig};
use crate::ray::trace_ray;
use crate::shading::apply_floor;

/// Operation counters for one render pass. Diagnostic only; the
/// shadow field does not depend on them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStats {
    /// (cell, light) pairs traced.
    pub rays: u64,
    /// Rays that hit terrain.
    pub occluded_rays: u64,
    /// Terrain height lookups.
    pub samples: u64,
}

impl RenderStats {
    pub fn merge(self, other: Self) -> Self {
        Self {
            rays: self.rays + other.rays,
            occluded_rays: self.occluded_rays + other.occluded_rays,
            samples: self.samples + other.samples,
        }
    }

    /// Mean terrain lookups per traced ray.
    pub fn samples_per_ray(&self) -> f64 {
        if self.rays == 0 {
            return 0.0;
        }
        self.samples as f64 / self.rays as f64
    }
}

/// Compute the lightness of every cell of `field` with respect to
/// `lights`.
pub fn render_shadow_field(
    field: &HeightField,
    lights: &[LightSource],
    config: &TraceConfig,
) -> Result<ShadowField, UmbraError> {
    render_with_stats(field, lights, config).map(|(shadow, _)| shadow)
}

/// [`render_shadow_field`], also returning the pass's operation counters.
pub fn render_with_stats(
    field: &HeightField,
    lights: &[LightSource],
    config: &TraceConfig,
) -> Result<(ShadowField, RenderStats), UmbraError> {
    config.validate()?;
    field.check_lights(lights)?;

    let width = field.width() as usize;
    let mut shadow = ShadowField::filled(field.width(), field.height(), 0.0);
    let rows = shadow.as_mut_slice();

    // Rows are independent: each writes only its own cells.
    let stats = if config.parallel {
        rows.par_chunks_mut(width)
            .enumerate()
            .map(|(y, row)| render_row(field, lights, config, y as u32, row))
            .reduce(RenderStats::default, RenderStats::merge)
    } else {
        rows.chunks_mut(width)
            .enumerate()
            .map(|(y, row)| render_row(field, lights, config, y as u32, row))
            .fold(RenderStats::default(), RenderStats::merge)
    };

    log::debug!(
        "Rendered {}x{} shadow field ({}, {} lights): {} rays, {} occluded, {} samples",
        field.width(),
        field.height(),
        config.strategy.label(),
        lights.len(),
        stats.rays,
        stats.occluded_rays,
        stats.samples
    );

    Ok((shadow, stats))
}

/// Lightness of a single cell. Inputs are validated like a full pass.
pub fn lightness_at(
    field: &HeightField,
    lights: &[LightSource],
    config: &TraceConfig,
    x: u32,
    y: u32,
) -> Result<f32, UmbraError> {
    config.validate()?;
    field.check_lights(lights)?;
    let mut stats = RenderStats::default();
    Ok(cell_lightness(field, lights, config, x, y, &mut stats))
}

fn render_row(
    field: &HeightField,
    lights: &[LightSource],
    config: &TraceConfig,
    y: u32,
    row: &mut [f32],
) -> RenderStats {
    let mut stats = RenderStats::default();
    for (x, cell) in row.iter_mut().enumerate() {
        *cell = cell_lightness(field, lights, config, x as u32, y, &mut stats);
    }
    stats
}

fn cell_lightness(
    field: &HeightField,
    lights: &[LightSource],
    config: &TraceConfig,
    x: u32,
    y: u32,
    stats: &mut RenderStats,
) -> f32 {
    let target = field.surface_point(x, y, config.surface_offset);

    let mut occluded = 0u32;
    let mut decayed = 0.0f32;
    for light in lights {
        let outcome = trace_ray(field, light, target, config);
        stats.rays += 1;
        stats.samples += outcome.samples as u64;
        if outcome.occluded {
            stats.occluded_rays += 1;
            occluded += 1;
        }
        decayed += outcome.decayed(config.max_travel_distance);
    }

    let value = match config.strategy {
        Strategy::BresenhamDecay => decayed,
        _ => visible_fraction(occluded, lights.len() as u32),
    };
    apply_floor(value, config.min_lightness)
}

#[cfg(test)]
mod tests {
    use super::*;
    use umbra_core::math::decay_factor;

    fn plateau() -> HeightField {
        HeightField::from_fn(100, 100, |x, y| {
            if (40..60).contains(&x) && (40..60).contains(&y) {
                1.0
            } else {
                0.0
            }
        })
        .unwrap()
    }

    fn sample_lights() -> Vec<LightSource> {
        vec![
            LightSource::new(10.0, 10.0, 1.5),
            LightSource::new(90.0, 20.0, 0.5),
        ]
    }

    #[test]
    fn test_flat_field_fully_lit() {
        let field = HeightField::flat(100, 100, 0.0).unwrap();
        for strategy in [
            Strategy::UniformMarch,
            Strategy::AdaptiveMarch,
            Strategy::Bresenham,
        ] {
            let shadow =
                render_shadow_field(&field, &sample_lights(), &TraceConfig::with_strategy(strategy))
                    .unwrap();
            assert!(
                shadow.as_slice().iter().all(|&v| v == 1.0),
                "{strategy:?} shadowed a flat field"
            );
        }
    }

    #[test]
    fn test_light_on_target_cell() {
        let field = plateau();
        let lights = [LightSource::new(50.0, 50.0, 0.5)];
        for strategy in [
            Strategy::UniformMarch,
            Strategy::AdaptiveMarch,
            Strategy::Bresenham,
        ] {
            let value =
                lightness_at(&field, &lights, &TraceConfig::with_strategy(strategy), 50, 50)
                    .unwrap();
            assert_eq!(value, 1.0, "{strategy:?}");
        }
    }

    #[test]
    fn test_plateau_casts_shadow_behind_it() {
        let field = plateau();
        let lights = [LightSource::new(10.0, 10.0, 1.5)];
        let config = TraceConfig::with_strategy(Strategy::Bresenham);
        let shadow = render_shadow_field(&field, &lights, &config).unwrap();
        // in the lee of the plateau, away from the light
        assert_eq!(shadow.get(65, 65), 0.0);
        // between light and plateau
        assert_eq!(shadow.get(20, 20), 1.0);
        // plateau top faces the light
        assert_eq!(shadow.get(50, 50), 1.0);
    }

    #[test]
    fn test_binary_values_are_fractions_of_lights() {
        let field = plateau();
        let config = TraceConfig::with_strategy(Strategy::Bresenham);
        let shadow = render_shadow_field(&field, &sample_lights(), &config).unwrap();
        for &v in shadow.as_slice() {
            assert!(v == 0.0 || v == 0.5 || v == 1.0, "unexpected lightness {v}");
        }
        assert!(shadow.as_slice().contains(&0.5));
    }

    #[test]
    fn test_bresenham_sample_count_on_open_field() {
        let field = HeightField::flat(100, 100, 0.0).unwrap();
        let lights = [LightSource::new(10.0, 10.0, 1.5)];
        let config = TraceConfig::with_strategy(Strategy::Bresenham);
        let (_, stats) = render_with_stats(&field, &lights, &config).unwrap();

        let mut expected = 0u64;
        for y in 0..100i32 {
            for x in 0..100i32 {
                let d = (x - 10).abs().max((y - 10).abs());
                if d > 0 {
                    expected += d as u64 + 1;
                }
            }
        }
        assert_eq!(stats.samples, expected);
        assert_eq!(stats.rays, 10_000);
        assert_eq!(stats.occluded_rays, 0);
    }

    #[test]
    fn test_decay_unoccluded_matches_formula() {
        let field = plateau();
        let lights = sample_lights();
        let config = TraceConfig::with_strategy(Strategy::BresenhamDecay);
        let shadow = render_shadow_field(&field, &lights, &config).unwrap();

        // (30, 10) sees both lights over open ground
        let target = field.surface_point(30, 10, 0.0);
        let expected: f32 = lights
            .iter()
            .map(|l| decay_factor((l.position() - target).length(), 100.0))
            .sum();
        assert!((shadow.get(30, 10) - expected).abs() < 1e-5);
    }

    #[test]
    fn test_decay_occluded_light_contributes_zero() {
        let field = plateau();
        let lights = [LightSource::new(10.0, 10.0, 1.5)];
        let config = TraceConfig::with_strategy(Strategy::BresenhamDecay);
        let shadow = render_shadow_field(&field, &lights, &config).unwrap();
        assert_eq!(shadow.get(65, 65), 0.0);
        assert!(shadow.get(20, 20) > 0.0);
    }

    #[test]
    fn test_decay_light_beyond_travel_range() {
        let field = HeightField::flat(100, 100, 0.0).unwrap();
        let lights = [LightSource::new(10.0, 10.0, 1.5)];
        let config = TraceConfig::with_strategy(Strategy::BresenhamDecay);
        let shadow = render_shadow_field(&field, &lights, &config).unwrap();

        // the far corner is ~125.9 away, past the 100 unit range
        let d = (lights[0].position() - field.surface_point(99, 99, 0.0)).length();
        assert!(d > 100.0);
        let expected = ((100.0 - d) / 100.0).powi(2);
        assert!(expected > 0.06);
        assert!((shadow.get(99, 99) - expected).abs() < 1e-5);
    }

    #[test]
    fn test_many_lights_render() {
        let field = HeightField::flat(100, 100, 0.0).unwrap();
        let lights: Vec<_> = (0..65)
            .map(|i| LightSource::new(i as f32, 50.0, 2.0))
            .collect();
        let config = TraceConfig::with_strategy(Strategy::Bresenham);
        let (shadow, stats) = render_with_stats(&field, &lights, &config).unwrap();
        assert!(shadow.as_slice().iter().all(|&v| v == 1.0));
        assert_eq!(stats.rays, 65 * 10_000);
    }

    #[test]
    fn test_min_lightness_floor() {
        let field = plateau();
        let lights = [LightSource::new(10.0, 10.0, 1.5)];
        let config = TraceConfig {
            min_lightness: Some(0.2),
            ..TraceConfig::with_strategy(Strategy::Bresenham)
        };
        let shadow = render_shadow_field(&field, &lights, &config).unwrap();
        assert_eq!(shadow.get(65, 65), 0.2);
        assert_eq!(shadow.get(20, 20), 1.0);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let field = plateau();
        for strategy in Strategy::ALL {
            let parallel = TraceConfig::with_strategy(strategy);
            let sequential = TraceConfig {
                parallel: false,
                ..parallel
            };
            let (a, stats_a) = render_with_stats(&field, &sample_lights(), &parallel).unwrap();
            let (b, stats_b) = render_with_stats(&field, &sample_lights(), &sequential).unwrap();
            assert_eq!(a, b, "{strategy:?}");
            assert_eq!(stats_a, stats_b, "{strategy:?}");
        }
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let field = plateau();
        let config = TraceConfig::default();
        assert_eq!(
            render_shadow_field(&field, &[], &config),
            Err(UmbraError::NoLightSources)
        );
        assert_eq!(
            render_shadow_field(&field, &[LightSource::new(f32::INFINITY, 1.0, 1.0)], &config),
            Err(UmbraError::NonFiniteLight { index: 0 })
        );
        let zero_steps = TraceConfig {
            steps: 0,
            ..TraceConfig::with_strategy(Strategy::UniformMarch)
        };
        assert_eq!(
            render_shadow_field(&field, &sample_lights(), &zero_steps),
            Err(UmbraError::InvalidStepCount)
        );
    }

    #[test]
    fn test_adaptive_march_cheaper_than_uniform() {
        let field = plateau();
        let (_, uniform) = render_with_stats(
            &field,
            &sample_lights(),
            &TraceConfig::with_strategy(Strategy::UniformMarch),
        )
        .unwrap();
        let (_, adaptive) = render_with_stats(
            &field,
            &sample_lights(),
            &TraceConfig::with_strategy(Strategy::AdaptiveMarch),
        )
        .unwrap();
        assert!(
            adaptive.samples < uniform.samples,
            "adaptive {} vs uniform {}",
            adaptive.samples,
            uniform.samples
        );
    }
}
