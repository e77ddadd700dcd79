//! Per-frame sparkle math.
//!
//! Everything here is a pure function of a sparkle's stored attributes and
//! the shared elapsed time. `sparkle.wgsl` evaluates the same formulas on the
//! GPU; keep the two in lockstep.

use super::field::{ParticleSet, Sparkle};
use crate::constants::*;
use glam::{Mat4, Vec3};

/// Sparkle-local animation clock.
#[inline]
pub fn local_time(elapsed: f32, speed: f32) -> f32 {
    elapsed * 0.55 * speed
}

/// Small per-axis wobble added to the rest position.
#[inline]
pub fn wobble(s: &Sparkle, elapsed: f32) -> Vec3 {
    let t = local_time(elapsed, s.speed);
    let lateral = 0.012 + 0.018 * s.jitter;
    Vec3::new(
        (t * 0.9 + s.phase).cos() * lateral,
        (t + s.phase).sin() * (0.018 + 0.022 * s.jitter),
        (t * 1.1 + s.phase).sin() * lateral,
    )
}

#[inline]
pub fn animated_position(s: &Sparkle, elapsed: f32) -> Vec3 {
    s.position + wobble(s, elapsed)
}

/// Brightness/hue driver in \[0, 1\].
#[inline]
pub fn twinkle(s: &Sparkle, elapsed: f32) -> f32 {
    0.5 + 0.5 * (elapsed * s.speed * 2.1 + s.phase).sin()
}

/// Perspective-scaled point size in device pixels, clamped to \[1, 10\].
#[inline]
pub fn base_point_size(base_size: f32, pixel_ratio: f32, view_depth: f32) -> f32 {
    let dist = view_depth.max(SPARKLE_MIN_DEPTH);
    (base_size * pixel_ratio / dist).clamp(SPARKLE_MIN_PX, SPARKLE_MAX_PX)
}

#[inline]
pub fn point_size(base_size: f32, pixel_ratio: f32, view_depth: f32, twinkle: f32) -> f32 {
    base_point_size(base_size, pixel_ratio, view_depth) * (0.65 + 0.75 * twinkle)
}

#[inline]
pub fn color(twinkle: f32) -> Vec3 {
    Vec3::from(SPARKLE_COOL_RGB).lerp(Vec3::from(SPARKLE_WARM_RGB), twinkle)
}

/// GLSL/WGSL `smoothstep`, including the reversed-edge form.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Alpha at distance `d` from the point center (point coords span \[0, 1\]).
///
/// `None` means the fragment lies outside the circular footprint.
#[inline]
pub fn fragment_alpha(d: f32, twinkle: f32, alpha: f32) -> Option<f32> {
    if d > 0.5 {
        return None;
    }
    let core = smoothstep(0.22, 0.0, d);
    let glow = smoothstep(0.5, 0.12, d);
    Some(alpha * (0.25 * core + 0.75 * glow) * (0.35 + 0.65 * twinkle))
}

/// Projection-side inputs for CPU evaluation.
#[derive(Clone, Copy, Debug)]
pub struct SparkleView {
    pub view: Mat4,
    pub pixel_ratio: f32,
    pub base_size: f32,
}

/// Render attributes for one sparkle on one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SparkleAttributes {
    pub position: Vec3,
    pub twinkle: f32,
    pub size_px: f32,
    pub color: Vec3,
}

#[inline]
pub fn evaluate(s: &Sparkle, elapsed: f32, view: &SparkleView) -> SparkleAttributes {
    let position = animated_position(s, elapsed);
    let w = twinkle(s, elapsed);
    let depth = -view.view.transform_point3(position).z;
    SparkleAttributes {
        position,
        twinkle: w,
        size_px: point_size(view.base_size, view.pixel_ratio, depth, w),
        color: color(w),
    }
}

/// Evaluate every sparkle in `set` for `elapsed` seconds.
pub fn animate(set: &ParticleSet, elapsed: f32, view: &SparkleView) -> Vec<SparkleAttributes> {
    set.as_slice()
        .iter()
        .map(|s| evaluate(s, elapsed, view))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sparkle(phase: f32, speed: f32, jitter: f32) -> Sparkle {
        Sparkle {
            position: Vec3::new(0.3, 0.4, -0.2),
            phase,
            speed,
            jitter,
        }
    }

    #[test]
    fn wobble_is_zero_phase_at_time_zero() {
        let s = sparkle(0.0, 1.0, 0.0);
        let w = wobble(&s, 0.0);
        assert!((w.x - 0.012).abs() < 1e-6);
        assert_eq!(w.y, 0.0);
        assert_eq!(w.z, 0.0);
    }

    #[test]
    fn smoothstep_reversed_edges_fall_off() {
        assert_eq!(smoothstep(0.22, 0.0, 0.0), 1.0);
        assert_eq!(smoothstep(0.22, 0.0, 0.3), 0.0);
        let mid = smoothstep(0.5, 0.12, 0.31);
        assert!(mid > 0.0 && mid < 1.0);
    }

    #[test]
    fn fragment_outside_footprint_is_discarded() {
        assert!(fragment_alpha(0.51, 1.0, 0.3).is_none());
        assert!(fragment_alpha(0.5, 1.0, 0.3).is_some());
    }

    #[test]
    fn center_fragment_reaches_full_alpha_at_peak_twinkle() {
        let a = fragment_alpha(0.0, 1.0, SPARKLE_ALPHA).unwrap();
        assert!((a - SPARKLE_ALPHA).abs() < 1e-6);
    }

    #[test]
    fn color_endpoints_are_palette() {
        assert_eq!(color(0.0), Vec3::from(SPARKLE_COOL_RGB));
        assert!((color(1.0) - Vec3::from(SPARKLE_WARM_RGB)).length() < 1e-6);
    }

    #[test]
    fn near_points_clamp_to_max_size() {
        assert_eq!(base_point_size(6.5, 2.0, 0.0), SPARKLE_MAX_PX);
        assert_eq!(base_point_size(6.5, 1.0, 1.0e6), SPARKLE_MIN_PX);
    }
}
