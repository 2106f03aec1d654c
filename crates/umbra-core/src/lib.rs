pub mod constants;
pub mod error;
pub mod math;
pub mod types;

pub use error::UmbraError;
pub use types::{HeightField, LightSource, ShadowField};
