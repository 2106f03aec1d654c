use std::time::Instant;

use umbra_core::UmbraError;
use umbra_scene::SceneConfig;
use umbra_trace::{against_ground_truth, render_with_stats, RenderStats, Strategy, TraceConfig};
use umbra_world::Scene;

/// Timing data for a single benchmark run.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TimingSeries {
    pub mean_ms: f64,
    pub median_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
}

/// Result of rendering one scene with one strategy.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BenchmarkResult {
    pub scene_name: String,
    pub strategy: Strategy,
    pub width: u32,
    pub height: u32,
    pub light_count: usize,
    pub iterations: u32,
    /// Terrain lookups of one pass.
    pub samples: u64,
    pub occluded_rays: u64,
    /// Fraction of cells equal to the Bresenham render.
    pub agreement: f64,
    pub timings: TimingSeries,
}

impl BenchmarkResult {
    /// Key used to match results against a baseline.
    pub fn key(&self) -> String {
        format!("{}/{}", self.scene_name, self.strategy.label())
    }
}

/// Renders scenes on the CPU and times each pass.
pub struct BenchmarkRunner {
    iterations: u32,
}

impl BenchmarkRunner {
    pub fn new(iterations: u32) -> Self {
        Self {
            iterations: iterations.max(1),
        }
    }

    /// Run every strategy over one scene. The scene's own trace settings
    /// are kept apart from the strategy.
    pub fn run_scene(&self, config: &SceneConfig) -> Result<Vec<BenchmarkResult>, UmbraError> {
        let scene = config.build()?;
        log::info!(
            "Running scene '{}' ({}x{}, {} lights)...",
            scene.name(),
            scene.field().width(),
            scene.field().height(),
            scene.lights().len()
        );

        Strategy::ALL
            .iter()
            .map(|&strategy| {
                let trace = TraceConfig {
                    strategy,
                    ..config.trace
                };
                self.run_strategy(&scene, &trace)
            })
            .collect()
    }

    /// Time `iterations` passes of one configuration.
    pub fn run_strategy(
        &self,
        scene: &Scene,
        trace: &TraceConfig,
    ) -> Result<BenchmarkResult, UmbraError> {
        let field = scene.field();
        let lights = scene.lights();

        let mut frame_times = Vec::with_capacity(self.iterations as usize);
        let mut stats = RenderStats::default();
        for _ in 0..self.iterations {
            let frame_start = Instant::now();
            let (_, pass_stats) = render_with_stats(field, lights, trace)?;
            frame_times.push(frame_start.elapsed().as_secs_f64() * 1000.0);
            stats = pass_stats;
        }

        let agreement = against_ground_truth(field, lights, trace)?;
        let timings = compute_timings(&frame_times);
        log::info!(
            "  {}: mean={:.2}ms, p95={:.2}ms, {:.1} samples/ray, agreement={:.3}",
            trace.strategy.label(),
            timings.mean_ms,
            timings.p95_ms,
            stats.samples_per_ray(),
            agreement.ratio()
        );

        Ok(BenchmarkResult {
            scene_name: scene.name().to_string(),
            strategy: trace.strategy,
            width: field.width(),
            height: field.height(),
            light_count: lights.len(),
            iterations: self.iterations,
            samples: stats.samples,
            occluded_rays: stats.occluded_rays,
            agreement: agreement.ratio(),
            timings,
        })
    }
}

/// Compute timing statistics from a list of frame times in milliseconds.
pub(crate) fn compute_timings(times: &[f64]) -> TimingSeries {
    if times.is_empty() {
        return TimingSeries {
            mean_ms: 0.0,
            median_ms: 0.0,
            p95_ms: 0.0,
            p99_ms: 0.0,
            min_ms: 0.0,
            max_ms: 0.0,
        };
    }

    let mut sorted = times.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };
    let p95_idx = ((n as f64) * 0.95).ceil() as usize;
    let p99_idx = ((n as f64) * 0.99).ceil() as usize;

    TimingSeries {
        mean_ms: mean,
        median_ms: median,
        p95_ms: sorted[p95_idx.min(n - 1)],
        p99_ms: sorted[p99_idx.min(n - 1)],
        min_ms: sorted[0],
        max_ms: sorted[n - 1],
    }
}
