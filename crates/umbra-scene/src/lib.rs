pub mod defaults;
pub mod loader;
pub mod validator;

use serde::{Deserialize, Serialize};
use umbra_core::{LightSource, UmbraError};
use umbra_trace::TraceConfig;
use umbra_world::{Scene, TerrainKind};

pub use loader::{load_all_scenes, load_scene_dir, load_scene_file, load_scene_from_str, LoadError};
pub use validator::{validate_scene, validate_scenes, ValidationError};

/// A scene as described in a RON file: grid size, terrain recipe,
/// lights and the trace settings to render it with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub terrain: TerrainKind,
    pub lights: Vec<LightSource>,
    #[serde(default)]
    pub trace: TraceConfig,
}

impl SceneConfig {
    /// Generate the height field and attach the lights.
    pub fn build(&self) -> Result<Scene, UmbraError> {
        Scene::build(
            self.name.clone(),
            &self.terrain,
            self.width,
            self.height,
            self.lights.clone(),
        )
    }
}

/// Build the scene described by `config`.
pub fn build_scene(config: &SceneConfig) -> Result<Scene, UmbraError> {
    config.build()
}
