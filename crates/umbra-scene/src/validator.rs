use std::collections::HashSet;

use thiserror::Error;
use umbra_world::TerrainKind;

use crate::SceneConfig;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Duplicate scene name '{0}'")]
    DuplicateSceneName(String),
    #[error("Scene '{name}' has zero-sized grid {width}x{height}")]
    ZeroDimensions { name: String, width: u32, height: u32 },
    #[error("Scene '{name}' has no light sources")]
    NoLights { name: String },
    #[error("Scene '{name}' light {index} has non-finite coordinates")]
    NonFiniteLight { name: String, index: usize },
    #[error("Scene '{name}' light {index} at ({x}, {y}) is outside the grid")]
    LightOutsideGrid {
        name: String,
        index: usize,
        x: f32,
        y: f32,
    },
    #[error("Scene '{name}' uses a marching strategy with zero steps")]
    ZeroSteps { name: String },
    #[error("Scene '{name}' max_travel_distance {value} must be finite and positive")]
    InvalidTravelDistance { name: String, value: f32 },
    #[error("Scene '{name}' min_lightness {value} must be finite and non-negative")]
    InvalidLightnessFloor { name: String, value: f32 },
    #[error("Scene '{name}' terrain elevation {value} must be finite and non-negative")]
    InvalidElevation { name: String, value: f32 },
    #[error("Scene '{name}' terrain {param} {value} must be finite and positive")]
    InvalidTerrainScale {
        name: String,
        param: &'static str,
        value: f64,
    },
    #[error("Scene '{name}' plateau does not overlap the grid")]
    PlateauOutsideGrid { name: String },
}

/// Validate a single scene, collecting every problem found.
pub fn validate_scene(scene: &SceneConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let name = || scene.name.clone();

    let has_area = scene.width > 0 && scene.height > 0;
    if !has_area {
        errors.push(ValidationError::ZeroDimensions {
            name: name(),
            width: scene.width,
            height: scene.height,
        });
    }

    // Lights
    if scene.lights.is_empty() {
        errors.push(ValidationError::NoLights { name: name() });
    }
    for (index, light) in scene.lights.iter().enumerate() {
        if !light.is_finite() {
            errors.push(ValidationError::NonFiniteLight {
                name: name(),
                index,
            });
            continue;
        }
        let inside = light.x >= 0.0
            && light.y >= 0.0
            && light.x < scene.width as f32
            && light.y < scene.height as f32;
        if has_area && !inside {
            errors.push(ValidationError::LightOutsideGrid {
                name: name(),
                index,
                x: light.x,
                y: light.y,
            });
        }
    }

    // Trace settings
    let trace = &scene.trace;
    if trace.strategy.uses_steps() && trace.steps == 0 {
        errors.push(ValidationError::ZeroSteps { name: name() });
    }
    if !trace.max_travel_distance.is_finite() || trace.max_travel_distance <= 0.0 {
        errors.push(ValidationError::InvalidTravelDistance {
            name: name(),
            value: trace.max_travel_distance,
        });
    }
    if let Some(floor) = trace.min_lightness {
        if !floor.is_finite() || floor < 0.0 {
            errors.push(ValidationError::InvalidLightnessFloor {
                name: name(),
                value: floor,
            });
        }
    }

    // Terrain
    let elevations: Vec<f32> = match &scene.terrain {
        TerrainKind::Flat { elevation } => vec![*elevation],
        TerrainKind::Plateau { elevation, .. } => vec![*elevation],
        TerrainKind::Waves { block, .. } => block.iter().map(|b| b.elevation).collect(),
        TerrainKind::Noise { amplitude, .. } => vec![*amplitude],
    };
    for value in elevations {
        if !value.is_finite() || value < 0.0 {
            errors.push(ValidationError::InvalidElevation { name: name(), value });
        }
    }
    let scales: Vec<(&'static str, f64)> = match &scene.terrain {
        TerrainKind::Waves { period, .. } => vec![("period", *period as f64)],
        TerrainKind::Noise { scale, .. } => vec![("scale", *scale)],
        TerrainKind::Flat { .. } | TerrainKind::Plateau { .. } => vec![],
    };
    for (param, value) in scales {
        if !value.is_finite() || value <= 0.0 {
            errors.push(ValidationError::InvalidTerrainScale {
                name: name(),
                param,
                value,
            });
        }
    }
    if let TerrainKind::Plateau {
        x, y, width, depth, ..
    } = scene.terrain
    {
        let overlaps = width > 0 && depth > 0 && x < scene.width && y < scene.height;
        if has_area && !overlaps {
            errors.push(ValidationError::PlateauOutsideGrid { name: name() });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a set of scenes: each scene individually, plus unique names.
pub fn validate_scenes(scenes: &[SceneConfig]) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let mut seen_names = HashSet::new();
    for scene in scenes {
        if !seen_names.insert(scene.name.as_str()) {
            errors.push(ValidationError::DuplicateSceneName(scene.name.clone()));
        }
        if let Err(scene_errors) = validate_scene(scene) {
            errors.extend(scene_errors);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use umbra_core::LightSource;
    use umbra_trace::{Strategy, TraceConfig};

    fn plateau_scene(name: &str) -> SceneConfig {
        SceneConfig {
            name: name.into(),
            width: 100,
            height: 100,
            terrain: TerrainKind::sample_plateau(),
            lights: vec![LightSource::new(10.0, 10.0, 1.5)],
            trace: TraceConfig::default(),
        }
    }

    #[test]
    fn test_valid_scene_passes() {
        assert!(validate_scene(&plateau_scene("ok")).is_ok());
    }

    #[test]
    fn test_every_error_collected() {
        let scene = SceneConfig {
            lights: vec![
                LightSource::new(150.0, 10.0, 1.0),
                LightSource::new(f32::NAN, 1.0, 1.0),
            ],
            trace: TraceConfig {
                strategy: Strategy::UniformMarch,
                steps: 0,
                max_travel_distance: -1.0,
                min_lightness: Some(-0.5),
                ..TraceConfig::default()
            },
            ..plateau_scene("broken")
        };
        let errors = validate_scene(&scene).unwrap_err();
        assert_eq!(errors.len(), 5, "{errors:?}");
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::LightOutsideGrid { index: 0, .. })));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::NonFiniteLight { index: 1, .. })));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::ZeroSteps { .. })));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::InvalidTravelDistance { .. })));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::InvalidLightnessFloor { .. })));
    }

    #[test]
    fn test_zero_steps_allowed_for_bresenham() {
        let scene = SceneConfig {
            trace: TraceConfig {
                steps: 0,
                ..TraceConfig::with_strategy(Strategy::Bresenham)
            },
            ..plateau_scene("line")
        };
        assert!(validate_scene(&scene).is_ok());
    }

    #[test]
    fn test_zero_dimensions_and_no_lights() {
        let scene = SceneConfig {
            width: 0,
            lights: vec![],
            ..plateau_scene("empty")
        };
        let errors = validate_scene(&scene).unwrap_err();
        assert!(errors.contains(&ValidationError::ZeroDimensions {
            name: "empty".into(),
            width: 0,
            height: 100
        }));
        assert!(errors.contains(&ValidationError::NoLights {
            name: "empty".into()
        }));
    }

    #[test]
    fn test_plateau_outside_grid() {
        let scene = SceneConfig {
            terrain: TerrainKind::Plateau {
                x: 200,
                y: 0,
                width: 10,
                depth: 10,
                elevation: 1.0,
            },
            ..plateau_scene("offgrid")
        };
        let errors = validate_scene(&scene).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::PlateauOutsideGrid {
                name: "offgrid".into()
            }]
        );
    }

    #[test]
    fn test_negative_elevation() {
        let scene = SceneConfig {
            terrain: TerrainKind::Flat { elevation: -1.0 },
            ..plateau_scene("pit")
        };
        let errors = validate_scene(&scene).unwrap_err();
        assert!(matches!(
            errors[0],
            ValidationError::InvalidElevation { value, .. } if value == -1.0
        ));
    }

    #[test]
    fn test_duplicate_scene_names() {
        let scenes = [plateau_scene("twin"), plateau_scene("twin")];
        let errors = validate_scenes(&scenes).unwrap_err();
        assert_eq!(errors, vec![ValidationError::DuplicateSceneName("twin".into())]);
    }

    #[test]
    fn test_non_finite_noise_scale_rejected() {
        let scene = SceneConfig {
            terrain: TerrainKind::Noise {
                seed: 7,
                scale: f64::NAN,
                amplitude: 2.0,
            },
            ..plateau_scene("hills")
        };
        let errors = validate_scene(&scene).unwrap_err();
        assert_eq!(errors.len(), 1, "{errors:?}");
        assert!(matches!(
            errors[0],
            ValidationError::InvalidTerrainScale { param: "scale", .. }
        ));
    }

    #[test]
    fn test_non_positive_wave_period_rejected() {
        for period in [0.0, -3.0, f32::INFINITY] {
            let scene = SceneConfig {
                terrain: TerrainKind::Waves { period, block: None },
                ..plateau_scene("waves")
            };
            let errors = validate_scene(&scene).unwrap_err();
            assert!(
                matches!(
                    errors[..],
                    [ValidationError::InvalidTerrainScale { param: "period", .. }]
                ),
                "period {period}: {errors:?}"
            );
        }
    }

    #[test]
    fn test_many_lights_accepted() {
        let scene = SceneConfig {
            lights: (0..100)
                .map(|i| LightSource::new(i as f32, 5.0, 2.0))
                .collect(),
            ..plateau_scene("crowd")
        };
        assert!(validate_scene(&scene).is_ok());
    }
}
