pub mod report;
pub mod runner;
pub mod scenes;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BenchError {
    #[error(transparent)]
    Load(#[from] umbra_scene::LoadError),
    #[error(transparent)]
    Render(#[from] umbra_core::UmbraError),
    #[error("Invalid scene set: {0}")]
    Invalid(String),
    #[error("Failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
