pub mod bresenham;
pub mod compare;
pub mod config;
pub mod march;
pub mod ray;
pub mod renderer;
pub mod shading;

pub use compare::{against_ground_truth, agreement, Agreement};
pub use config::{Strategy, TraceConfig};
pub use ray::{trace_ray, RayOutcome};
pub use renderer::{lightness_at, render_shadow_field, render_with_stats, RenderStats};
