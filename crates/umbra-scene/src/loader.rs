use std::path::Path;

use thiserror::Error;

use crate::SceneConfig;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to parse scene RON: {0}")]
    SceneParseError(String),
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Parse a single scene RON string.
pub fn load_scene_from_str(ron_str: &str) -> Result<SceneConfig, LoadError> {
    let options = ron::Options::default();
    options
        .from_str(ron_str)
        .map_err(|e| LoadError::SceneParseError(e.to_string()))
}

/// Parse several scene sources, keeping their order.
pub fn load_all_scenes(sources: &[&str]) -> Result<Vec<SceneConfig>, LoadError> {
    sources.iter().map(|s| load_scene_from_str(s)).collect()
}

/// Read and parse one scene file.
pub fn load_scene_file(path: &Path) -> Result<SceneConfig, LoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_scene_from_str(&contents)
}

/// Load every `*.ron` file in a directory, sorted by file name.
pub fn load_scene_dir(dir: &Path) -> Result<Vec<SceneConfig>, LoadError> {
    let io_err = |source: std::io::Error| LoadError::Io {
        path: dir.display().to_string(),
        source,
    };

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.extension().is_some_and(|ext| ext == "ron") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut scenes = Vec::with_capacity(paths.len());
    for path in &paths {
        let scene = load_scene_file(path)?;
        log::debug!("Loaded scene '{}' from {}", scene.name, path.display());
        scenes.push(scene);
    }
    if scenes.is_empty() {
        log::warn!("No scene files found in {}", dir.display());
    }
    Ok(scenes)
}
