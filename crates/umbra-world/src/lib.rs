pub mod terrain;
pub mod tint;

use umbra_core::{HeightField, LightSource, UmbraError};

pub use terrain::{generate_field, Block, SimplexTerrain, TerrainKind};

/// A height field together with the lights that shine on it.
/// Immutable once built; render passes borrow it read-only.
#[derive(Debug, Clone)]
pub struct Scene {
    name: String,
    field: HeightField,
    lights: Vec<LightSource>,
}

impl Scene {
    /// Generate the terrain and check the lights against it.
    pub fn build(
        name: impl Into<String>,
        terrain: &TerrainKind,
        width: u32,
        height: u32,
        lights: Vec<LightSource>,
    ) -> Result<Self, UmbraError> {
        let field = generate_field(terrain, width, height)?;
        Self::from_parts(name, field, lights)
    }

    /// Wrap an existing field.
    pub fn from_parts(
        name: impl Into<String>,
        field: HeightField,
        lights: Vec<LightSource>,
    ) -> Result<Self, UmbraError> {
        field.check_lights(&lights)?;
        let name = name.into();
        log::debug!(
            "Scene '{}': {}x{} field, {} lights",
            name,
            field.width(),
            field.height(),
            lights.len()
        );
        Ok(Self {
            name,
            field,
            lights,
        })
    }

    /// The reference scene: 100x100 plateau field lit by a high light at
    /// (10, 10) and a low one at (90, 20).
    pub fn sample() -> Result<Self, UmbraError> {
        Self::build(
            "sample",
            &TerrainKind::sample_plateau(),
            100,
            100,
            vec![
                LightSource::new(10.0, 10.0, 1.5),
                LightSource::new(90.0, 20.0, 0.5),
            ],
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field(&self) -> &HeightField {
        &self.field
    }

    pub fn lights(&self) -> &[LightSource] {
        &self.lights
    }
}
