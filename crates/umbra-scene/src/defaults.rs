//! Built-in scenes, and the RON scene files bundled under `data/scenes`.

use umbra_core::constants::{DEFAULT_GRID_SIZE, SHADER_LIGHTNESS_FLOOR, SHADER_SURFACE_OFFSET};
use umbra_core::LightSource;
use umbra_trace::{Strategy, TraceConfig};
use umbra_world::{Block, TerrainKind};

use crate::loader::{load_all_scenes, LoadError};
use crate::SceneConfig;

/// RON sources of the bundled scenes, in name order.
pub const BUNDLED_SCENES: [&str; 4] = [
    include_str!("../../../data/scenes/decay.ron"),
    include_str!("../../../data/scenes/noise.ron"),
    include_str!("../../../data/scenes/plateau.ron"),
    include_str!("../../../data/scenes/waves.ron"),
];

/// Parse every bundled scene.
pub fn bundled_scenes() -> Result<Vec<SceneConfig>, LoadError> {
    load_all_scenes(&BUNDLED_SCENES)
}

/// 100x100 flat field with a 20x20 plateau of height 1, lit from
/// (10, 10, 1.5) and (90, 20, 0.5).
pub fn plateau_two_lights() -> SceneConfig {
    SceneConfig {
        name: "plateau".into(),
        width: DEFAULT_GRID_SIZE,
        height: DEFAULT_GRID_SIZE,
        terrain: TerrainKind::sample_plateau(),
        lights: vec![
            LightSource::new(10.0, 10.0, 1.5),
            LightSource::new(90.0, 20.0, 0.5),
        ],
        trace: TraceConfig::with_strategy(Strategy::Bresenham),
    }
}

/// The plateau field under distance falloff, with the low light moved
/// to the west side.
pub fn decay_two_lights() -> SceneConfig {
    SceneConfig {
        name: "decay".into(),
        lights: vec![
            LightSource::new(10.0, 10.0, 1.5),
            LightSource::new(20.0, 60.0, 0.5),
        ],
        trace: TraceConfig::with_strategy(Strategy::BresenhamDecay),
        ..plateau_two_lights()
    }
}

/// Sine terrain with a tall block, using shader-style offset and floor.
pub fn waves_block() -> SceneConfig {
    SceneConfig {
        name: "waves".into(),
        width: 240,
        height: 180,
        terrain: TerrainKind::Waves {
            period: 25.0,
            block: Some(Block {
                x: 101,
                y: 101,
                width: 19,
                depth: 19,
                elevation: 2.0,
            }),
        },
        lights: vec![LightSource::new(120.0, 90.0, 2.5)],
        trace: TraceConfig {
            steps: 25,
            surface_offset: SHADER_SURFACE_OFFSET,
            min_lightness: Some(SHADER_LIGHTNESS_FLOOR),
            ..TraceConfig::with_strategy(Strategy::UniformMarch)
        },
    }
}
