//! Render one bundled scene and write its shadow field as a plain PGM
//! image, scaled so the brightest cell is white.
//!
//! Usage: cargo run -p umbra-scene --example shadow_map -- plateau > plateau.pgm

use std::io::Write;

use umbra_scene::defaults::bundled_scenes;
use umbra_trace::render_with_stats;

fn main() {
    let name = std::env::args().nth(1).unwrap_or_else(|| "plateau".into());
    let scenes = bundled_scenes().expect("Failed to load bundled scenes");
    let Some(config) = scenes.into_iter().find(|s| s.name == name) else {
        eprintln!("Unknown scene '{name}'");
        std::process::exit(2);
    };

    let scene = config.build().expect("Failed to build scene");
    let (shadow, stats) = render_with_stats(scene.field(), scene.lights(), &config.trace)
        .expect("Failed to render scene");
    eprintln!(
        "{}: {} rays, {} occluded, {:.1} samples/ray",
        name,
        stats.rays,
        stats.occluded_rays,
        stats.samples_per_ray()
    );

    let (_, max) = shadow.min_max();
    let scale = if max > 0.0 { 255.0 / max } else { 0.0 };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "P2\n{} {}\n255", shadow.width(), shadow.height()).expect("write failed");
    for y in 0..shadow.height() {
        let row: Vec<String> = (0..shadow.width())
            .map(|x| ((shadow.get(x, y) * scale).round() as u8).to_string())
            .collect();
        writeln!(out, "{}", row.join(" ")).expect("write failed");
    }
}
