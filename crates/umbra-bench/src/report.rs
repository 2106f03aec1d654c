use std::path::Path;

use crate::runner::BenchmarkResult;

/// A complete baseline containing results from all scenes.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Baseline {
    pub timestamp: String,
    pub results: Vec<BenchmarkResult>,
}

/// Which measurement regressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    MeanTime,
    Samples,
}

impl Metric {
    pub fn label(self) -> &'static str {
        match self {
            Metric::MeanTime => "mean time",
            Metric::Samples => "samples",
        }
    }
}

/// A result that got worse than its baseline by more than the threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct Regression {
    pub key: String,
    pub metric: Metric,
    pub pct_change: f64,
}

/// Load a baseline from a JSON file. Returns None if the file doesn't exist
/// or cannot be parsed.
pub fn load_baseline(path: &Path) -> Option<Baseline> {
    let contents = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&contents).ok()
}

/// Save a baseline to a JSON file.
pub fn save_baseline(path: &Path, baseline: &Baseline) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(baseline).map_err(std::io::Error::other)?;
    std::fs::write(path, json)
}

fn pct_change(current: f64, base: f64) -> Option<f64> {
    if base > 0.0 {
        Some((current - base) / base * 100.0)
    } else {
        None
    }
}

/// Compare current results against a baseline, matching on scene and
/// strategy. Mean time and sample count are checked separately.
pub fn compare(
    current: &[BenchmarkResult],
    baseline: &Baseline,
    threshold_pct: f64,
) -> Vec<Regression> {
    let mut regressions = Vec::new();

    for result in current {
        let key = result.key();
        let Some(base) = baseline.results.iter().find(|b| b.key() == key) else {
            continue;
        };

        let checks = [
            (
                Metric::MeanTime,
                pct_change(result.timings.mean_ms, base.timings.mean_ms),
            ),
            (
                Metric::Samples,
                pct_change(result.samples as f64, base.samples as f64),
            ),
        ];
        for (metric, change) in checks {
            if let Some(pct) = change.filter(|&pct| pct > threshold_pct) {
                regressions.push(Regression {
                    key: key.clone(),
                    metric,
                    pct_change: pct,
                });
            }
        }
    }

    regressions
}

/// Format results as a markdown summary table.
pub fn format_markdown(results: &[BenchmarkResult]) -> String {
    let mut out = String::new();
    out.push_str("| Scene | Strategy | Grid | Lights | Samples | Agreement | Mean (ms) | Median (ms) | P95 (ms) | P99 (ms) | Min (ms) | Max (ms) |\n");
    out.push_str("|-------|----------|------|--------|---------|-----------|-----------|-------------|----------|----------|----------|----------|\n");

    for r in results {
        out.push_str(&format!(
            "| {} | {} | {}x{} | {} | {} | {:.3} | {:.2} | {:.2} | {:.2} | {:.2} | {:.2} | {:.2} |\n",
            r.scene_name,
            r.strategy.label(),
            r.width,
            r.height,
            r.light_count,
            r.samples,
            r.agreement,
            r.timings.mean_ms,
            r.timings.median_ms,
            r.timings.p95_ms,
            r.timings.p99_ms,
            r.timings.min_ms,
            r.timings.max_ms,
        ));
    }

    out
}

/// Format a comparison report showing regressions.
pub fn format_comparison(regressions: &[Regression], threshold_pct: f64) -> String {
    if regressions.is_empty() {
        return format!(
            "All scenes within {:.0}% threshold. No regressions detected.\n",
            threshold_pct
        );
    }

    let mut out = String::new();
    out.push_str(&format!(
        "REGRESSIONS DETECTED (>{:.0}% threshold):\n",
        threshold_pct
    ));
    for r in regressions {
        out.push_str(&format!(
            "  - {} ({}): +{:.1}%\n",
            r.key,
            r.metric.label(),
            r.pct_change
        ));
    }
    out
}
