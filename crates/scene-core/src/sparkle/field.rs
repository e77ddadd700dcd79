//! Rejection-sampled sparkle placement around a model.
//!
//! Candidates are drawn inside an oblate spheroid enclosing the model and
//! discarded when they land in one of two keep-clear zones: a vertical
//! cylinder through the model, and a flat disk around the text sign. The
//! loop is bounded by an attempt budget, so a crowded volume yields fewer
//! sparkles instead of spinning.

use crate::bounds::Aabb;
use crate::constants::*;
use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

/// One sparkle as uploaded to the GPU instance buffer.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Sparkle {
    /// Rest position; animation offsets are applied on top of this.
    pub position: Vec3,
    pub phase: f32,
    pub speed: f32,
    pub jitter: f32,
}

/// The two regions sparkles must stay out of.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExclusionZones {
    pub center: Vec3,
    /// Radius of the sampling spheroid before y flattening.
    pub radius: f32,
    pub model_radius: f32,
    pub model_y0: f32,
    pub model_y1: f32,
    pub text_radius: f32,
    pub text_y0: f32,
    pub text_y1: f32,
}

impl ExclusionZones {
    pub fn new(bounds: &Aabb, text_y: f32) -> Self {
        let center = bounds.center();
        let size = bounds.size();
        let radius = sampling_radius(bounds);
        Self {
            center,
            radius,
            model_radius: radius * MODEL_CLEAR_RADIUS,
            model_y0: center.y - size.y * MODEL_CLEAR_BELOW,
            model_y1: center.y + size.y * MODEL_CLEAR_ABOVE,
            text_radius: radius * TEXT_CLEAR_RADIUS,
            text_y0: text_y - TEXT_CLEAR_BELOW,
            text_y1: text_y + TEXT_CLEAR_ABOVE,
        }
    }

    /// Distance from the vertical axis through the box center.
    #[inline]
    pub fn radial_distance(&self, p: Vec3) -> f32 {
        let dx = p.x - self.center.x;
        let dz = p.z - self.center.z;
        (dx * dx + dz * dz).sqrt()
    }

    #[inline]
    pub fn in_model_zone(&self, p: Vec3) -> bool {
        self.radial_distance(p) < self.model_radius && p.y > self.model_y0 && p.y < self.model_y1
    }

    #[inline]
    pub fn in_text_zone(&self, p: Vec3) -> bool {
        p.y > self.text_y0 && p.y < self.text_y1 && self.radial_distance(p) < self.text_radius
    }

    #[inline]
    pub fn rejects(&self, p: Vec3) -> bool {
        self.in_model_zone(p) || self.in_text_zone(p)
    }
}

/// Sampling radius derived from the largest box dimension.
///
/// A zero-size box still yields the additive pad.
#[inline]
pub fn sampling_radius(bounds: &Aabb) -> f32 {
    bounds.max_dimension() * SPARKLE_RADIUS_SCALE + SPARKLE_RADIUS_PAD
}

/// Immutable set of sparkles produced for one model load.
#[derive(Clone, Debug, Default)]
pub struct ParticleSet {
    pub sparkles: Vec<Sparkle>,
    /// How many were asked for; `len()` may be smaller.
    pub requested: usize,
    /// Candidates drawn before the loop stopped.
    pub attempts: usize,
}

impl ParticleSet {
    pub fn len(&self) -> usize {
        self.sparkles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sparkles.is_empty()
    }

    pub fn is_short(&self) -> bool {
        self.sparkles.len() < self.requested
    }

    pub fn as_slice(&self) -> &[Sparkle] {
        &self.sparkles
    }
}

/// Place up to `count` sparkles around `bounds`, keeping the model and the
/// text at height `text_y` clear.
///
/// At most `count * 35` candidates are drawn. Running out of attempts is not
/// an error: the returned set is simply short.
pub fn generate<R: Rng + ?Sized>(
    bounds: &Aabb,
    count: usize,
    text_y: f32,
    rng: &mut R,
) -> ParticleSet {
    let zones = ExclusionZones::new(bounds, text_y);
    let budget = count.saturating_mul(SPARKLE_ATTEMPTS_PER_PARTICLE);
    let mut sparkles = Vec::with_capacity(count);
    let mut attempts = 0usize;

    while sparkles.len() < count && attempts < budget {
        attempts += 1;

        let p = sample_candidate(&zones, rng);
        if zones.rejects(p) {
            continue;
        }

        sparkles.push(Sparkle {
            position: p,
            phase: rng.gen::<f32>() * TAU,
            speed: SPARKLE_SPEED_MIN + rng.gen::<f32>() * SPARKLE_SPEED_SPAN,
            jitter: rng.gen::<f32>(),
        });
    }

    ParticleSet {
        sparkles,
        requested: count,
        attempts,
    }
}

fn sample_candidate<R: Rng + ?Sized>(zones: &ExclusionZones, rng: &mut R) -> Vec3 {
    let u: f32 = rng.gen();
    let v: f32 = rng.gen();
    let theta = TAU * u;
    let phi = (2.0 * v - 1.0).clamp(-1.0, 1.0).acos();
    let r = zones.radius * rng.gen::<f32>().powf(SPARKLE_RADIAL_EXPONENT);

    let offset = Vec3::new(
        r * phi.sin() * theta.cos(),
        r * phi.cos() * SPARKLE_Y_FLATTEN + SPARKLE_Y_LIFT,
        r * phi.sin() * theta.sin(),
    );
    zones.center + offset
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn sparkle_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Sparkle>(), 24);
    }

    #[test]
    fn zero_count_draws_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        let set = generate(&Aabb::point(Vec3::ZERO), 0, 0.0, &mut rng);
        assert!(set.is_empty());
        assert_eq!(set.attempts, 0);
        assert!(!set.is_short());
    }

    #[test]
    fn zones_match_box_proportions() {
        let b = Aabb::new(Vec3::new(-0.5, 0.0, -0.5), Vec3::new(0.5, 2.0, 0.5));
        let z = ExclusionZones::new(&b, 3.0);
        assert!((z.radius - (2.0 * 0.95 + 0.25)).abs() < 1e-6);
        assert!((z.model_radius - z.radius * 0.35).abs() < 1e-6);
        assert!((z.model_y0 - 0.8).abs() < 1e-6);
        assert!((z.model_y1 - 2.8).abs() < 1e-6);
        assert!((z.text_y0 - 2.82).abs() < 1e-6);
        assert!((z.text_y1 - 3.25).abs() < 1e-6);
    }

    #[test]
    fn zone_edges_are_open() {
        let b = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let z = ExclusionZones::new(&b, 10.0);
        let on_floor_edge = Vec3::new(z.center.x, z.model_y0, z.center.z);
        assert!(!z.in_model_zone(on_floor_edge));
        let inside = Vec3::new(z.center.x, z.center.y, z.center.z);
        assert!(z.in_model_zone(inside));
    }
}
