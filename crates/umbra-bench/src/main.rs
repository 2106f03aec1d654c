use std::path::PathBuf;
use std::process;
use std::str::FromStr;

use umbra_bench::report;
use umbra_bench::runner::BenchmarkRunner;
use umbra_bench::scenes;
use umbra_bench::BenchError;

struct Options {
    baseline_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    scene_dir: Option<PathBuf>,
    regression_threshold: f64,
    iterations: u32,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = parse_args(std::env::args().collect());
    match run(&options) {
        Ok(0) => log::info!("Benchmark complete."),
        Ok(regressions) => {
            eprintln!(
                "ERROR: {} regressions detected, exiting with code 1",
                regressions
            );
            process::exit(1);
        }
        Err(e) => {
            eprintln!("ERROR: {e}");
            process::exit(1);
        }
    }
}

/// Run the suite and return the number of regressions found.
fn run(options: &Options) -> Result<usize, BenchError> {
    let scene_configs = scenes::load_scenes(options.scene_dir.as_deref())?;
    if let Err(errors) = umbra_scene::validate_scenes(&scene_configs) {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        return Err(BenchError::Invalid(messages.join("; ")));
    }

    let runner = BenchmarkRunner::new(options.iterations);
    let mut results = Vec::new();
    for config in &scene_configs {
        results.extend(runner.run_scene(config)?);
    }

    // Print markdown summary
    println!("\n## Benchmark Results\n");
    println!("{}", report::format_markdown(&results));

    // Save output baseline
    if let Some(ref path) = options.output_path {
        let baseline = report::Baseline {
            timestamp: run_timestamp(),
            results: results.clone(),
        };
        report::save_baseline(path, &baseline).map_err(|source| BenchError::Io {
            path: path.display().to_string(),
            source,
        })?;
        log::info!("Saved baseline to {}", path.display());
    }

    // Compare against baseline
    let mut regression_count = 0;
    if let Some(ref path) = options.baseline_path {
        if let Some(baseline) = report::load_baseline(path) {
            let regressions =
                report::compare(&results, &baseline, options.regression_threshold);
            println!(
                "{}",
                report::format_comparison(&regressions, options.regression_threshold)
            );
            regression_count = regressions.len();
        } else {
            log::warn!("Baseline file not found: {}", path.display());
        }
    }

    Ok(regression_count)
}

fn parse_args(args: Vec<String>) -> Options {
    let mut options = Options {
        baseline_path: None,
        output_path: None,
        scene_dir: None,
        regression_threshold: 10.0,
        iterations: 10,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--baseline" => {
                i += 1;
                options.baseline_path = Some(PathBuf::from(flag_value(&args, i, "--baseline")));
            }
            "--output" => {
                i += 1;
                options.output_path = Some(PathBuf::from(flag_value(&args, i, "--output")));
            }
            "--scenes" => {
                i += 1;
                options.scene_dir = Some(PathBuf::from(flag_value(&args, i, "--scenes")));
            }
            "--regression-threshold" => {
                i += 1;
                options.regression_threshold = parse_value(&args, i, "--regression-threshold");
            }
            "--iterations" => {
                i += 1;
                options.iterations = parse_value(&args, i, "--iterations");
            }
            "--help" | "-h" => {
                eprintln!("Usage: bench-runner [OPTIONS]");
                eprintln!("  --baseline <path>              Load baseline JSON for comparison");
                eprintln!("  --output <path>                Save current results as JSON baseline");
                eprintln!(
                    "  --regression-threshold <pct>   Regression threshold percentage (default: 10)"
                );
                eprintln!("  --iterations <n>               Render passes per scene and strategy (default: 10)");
                eprintln!("  --scenes <dir>                 Load *.ron scenes from a directory instead of the built-in suite");
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    options
}

fn flag_value<'a>(args: &'a [String], i: usize, flag: &str) -> &'a str {
    match args.get(i) {
        Some(value) => value,
        None => {
            eprintln!("Missing value for {}", flag);
            process::exit(1);
        }
    }
}

fn parse_value<T: FromStr>(args: &[String], i: usize, flag: &str) -> T {
    let raw = flag_value(args, i, flag);
    match raw.parse() {
        Ok(value) => value,
        Err(_) => {
            eprintln!("Invalid {} value: {}", flag, raw);
            process::exit(1);
        }
    }
}

/// Seconds since the Unix epoch, tagged for the baseline file.
fn run_timestamp() -> String {
    let secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("bench-{}", secs)
}
