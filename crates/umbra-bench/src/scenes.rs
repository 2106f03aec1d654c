use std::path::Path;

use umbra_core::LightSource;
use umbra_scene::defaults::{bundled_scenes, plateau_two_lights};
use umbra_scene::{load_scene_dir, LoadError, SceneConfig};
use umbra_world::TerrainKind;

/// Grid sizes of the plateau ladder, in cells per side.
pub const PLATEAU_LADDER: [u32; 2] = [200, 400];

/// The bundled scenes followed by larger copies of the plateau scene.
pub fn standard_scenes() -> Result<Vec<SceneConfig>, LoadError> {
    let mut scenes = bundled_scenes()?;
    scenes.extend(PLATEAU_LADDER.iter().map(|&size| scaled_plateau(size)));
    Ok(scenes)
}

/// Scenes from a directory of RON files, or the standard suite.
pub fn load_scenes(dir: Option<&Path>) -> Result<Vec<SceneConfig>, LoadError> {
    match dir {
        Some(dir) => load_scene_dir(dir),
        None => standard_scenes(),
    }
}

/// The two-light plateau scene stretched to `size x size`. Plateau and
/// lights keep their relative positions.
pub fn scaled_plateau(size: u32) -> SceneConfig {
    let base = plateau_two_lights();
    let factor = size as f32 / base.width as f32;
    let scale = |v: u32| (v as f32 * factor).round() as u32;

    let terrain = match base.terrain {
        TerrainKind::Plateau {
            x,
            y,
            width,
            depth,
            elevation,
        } => TerrainKind::Plateau {
            x: scale(x),
            y: scale(y),
            width: scale(width),
            depth: scale(depth),
            elevation,
        },
        other => other,
    };
    let lights = base
        .lights
        .iter()
        .map(|l| LightSource::new(l.x * factor, l.y * factor, l.h))
        .collect();

    SceneConfig {
        name: format!("plateau-{size}"),
        width: size,
        height: size,
        terrain,
        lights,
        ..base
    }
}
