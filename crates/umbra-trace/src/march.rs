//! Step-marching ray tests. Both walk from the target cell toward the
//! light and stop at the first sample where terrain rises above the ray.

use glam::Vec3;
use umbra_core::math::dominant_extent;
use umbra_core::HeightField;

use crate::ray::{blocks, RayOutcome};

/// Sample `steps` equally spaced points `start + (s / steps) * (end - start)`
/// for `s in 0..steps`. Cost is `steps` lookups per unoccluded ray no
/// matter how close the light is.
pub fn uniform_march(field: &HeightField, start: Vec3, end: Vec3, steps: u32) -> RayOutcome {
    let direction = end - start;
    let distance = direction.length();

    for s in 0..steps {
        let way_point = start + (s as f32 / steps as f32) * direction;
        if blocks(field, way_point) {
            return RayOutcome::blocked(s + 1, distance);
        }
    }
    RayOutcome::clear(steps, distance)
}

/// March with steps of at least one cell along the dominant axis.
///
/// The step is `(end - start) / steps`; when its dominant planar
/// component is below 1 it is rescaled to exactly 1, unless the whole
/// planar span is below one cell, in which case the raw step is kept.
/// The ray advances before each sample and aborts as soon as a waypoint
/// leaves the grid.
///
/// The march does not always spend `steps` samples: it is capped at
/// `min(steps, ceil(span / dominant(step)))`, so a rescaled unit step
/// never carries the ray past `end`. A light 3 cells away costs 3
/// samples, not `steps`.
pub fn adaptive_march(field: &HeightField, start: Vec3, end: Vec3, steps: u32) -> RayOutcome {
    let direction = end - start;
    let distance = direction.length();
    let span = dominant_extent(direction);
    if span == 0.0 || steps == 0 {
        return RayOutcome::clear(0, distance);
    }

    let mut delta = direction / steps as f32;
    let dominant = dominant_extent(delta);
    if dominant < 1.0 && span >= 1.0 {
        delta /= dominant;
    }
    let needed = (span / dominant_extent(delta)).ceil() as u32;
    let count = steps.min(needed.max(1));

    let mut samples = 0;
    let mut way_point = start;
    for _ in 0..count {
        way_point += delta;
        if !field.contains(way_point.truncate()) {
            break;
        }
        samples += 1;
        if blocks(field, way_point) {
            return RayOutcome::blocked(samples, distance);
        }
    }
    RayOutcome::clear(samples, distance)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall_at_x(x_wall: u32, elevation: f32) -> HeightField {
        HeightField::from_fn(100, 100, |x, _| if x == x_wall { elevation } else { 0.0 }).unwrap()
    }

    #[test]
    fn test_uniform_spends_every_step_when_clear() {
        let field = HeightField::flat(100, 100, 0.0).unwrap();
        let outcome = uniform_march(
            &field,
            Vec3::new(50.0, 50.0, 0.0),
            Vec3::new(52.0, 50.0, 1.0),
            50,
        );
        assert!(!outcome.occluded);
        assert_eq!(outcome.samples, 50);
    }

    #[test]
    fn test_uniform_early_exit() {
        let field = wall_at_x(30, 5.0);
        let outcome = uniform_march(
            &field,
            Vec3::new(20.0, 50.0, 0.0),
            Vec3::new(70.0, 50.0, 1.0),
            50,
        );
        assert!(outcome.occluded);
        // sample s lands on x = 20 + s, so the wall is hit at s = 10
        assert_eq!(outcome.samples, 11);
    }

    #[test]
    fn test_adaptive_uses_unit_steps_for_near_lights() {
        let field = HeightField::flat(100, 100, 0.0).unwrap();
        let outcome = adaptive_march(
            &field,
            Vec3::new(50.0, 50.0, 0.0),
            Vec3::new(56.0, 53.0, 1.0),
            50,
        );
        assert!(!outcome.occluded);
        assert_eq!(outcome.samples, 6);
    }

    #[test]
    fn test_adaptive_stops_at_near_light() {
        // a tall wall just past the light must not be reached
        let field = wall_at_x(54, 50.0);
        let outcome = adaptive_march(
            &field,
            Vec3::new(50.0, 50.0, 0.0),
            Vec3::new(53.0, 50.0, 1.0),
            50,
        );
        assert!(!outcome.occluded);
        assert_eq!(outcome.samples, 3);
    }

    #[test]
    fn test_adaptive_keeps_raw_step_for_far_lights() {
        let field = HeightField::flat(200, 10, 0.0).unwrap();
        let outcome = adaptive_march(
            &field,
            Vec3::new(0.0, 5.0, 0.0),
            Vec3::new(150.0, 5.0, 1.0),
            50,
        );
        assert_eq!(outcome.samples, 50);
    }

    #[test]
    fn test_adaptive_sub_cell_span_keeps_raw_step() {
        let field = HeightField::flat(10, 10, 0.0).unwrap();
        let outcome = adaptive_march(
            &field,
            Vec3::new(5.0, 5.0, 0.0),
            Vec3::new(5.5, 5.0, 1.0),
            50,
        );
        assert!(!outcome.occluded);
        assert_eq!(outcome.samples, 50);
    }

    #[test]
    fn test_adaptive_aborts_when_leaving_grid() {
        let field = HeightField::flat(20, 20, 0.0).unwrap();
        // end point beyond the grid: the ray stops at the boundary
        let outcome = adaptive_march(
            &field,
            Vec3::new(10.0, 10.0, 0.0),
            Vec3::new(40.0, 10.0, 1.0),
            50,
        );
        assert!(!outcome.occluded);
        assert_eq!(outcome.samples, 9);
    }

    #[test]
    fn test_adaptive_detects_wall() {
        let field = wall_at_x(30, 5.0);
        let outcome = adaptive_march(
            &field,
            Vec3::new(20.0, 50.0, 0.0),
            Vec3::new(40.0, 50.0, 1.0),
            50,
        );
        assert!(outcome.occluded);
        assert_eq!(outcome.samples, 10);
    }
}
