//! Where things go once the model's size is known, plus idle motion.

use crate::bounds::Aabb;
use crate::constants::*;
use glam::{Mat4, Vec3};

/// Scene-level tunables that are not sparkle-specific.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneParams {
    pub sign_text: String,
    pub model_size: f32,
    pub floor_gap: f32,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            sign_text: BIRTHDAY_TEXT.to_string(),
            model_size: MODEL_DESIRED_SIZE,
            floor_gap: MODEL_FLOOR_GAP,
        }
    }
}

/// Uniform scale + translation that centers a model and stands it on the floor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModelFit {
    pub scale: f32,
    pub offset: Vec3,
}

impl ModelFit {
    pub fn new(raw: &Aabb, params: &SceneParams) -> Self {
        let max_dim = raw.max_dimension();
        let scale = params.model_size / if max_dim > 0.0 { max_dim } else { 1.0 };
        let center = raw.center();
        let mut offset = -center * scale;
        // lift so the lowest point rests just above y = 0
        let min_y = (raw.min.y - center.y) * scale;
        offset.y += -min_y + params.floor_gap;
        Self { scale, offset }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_translation(self.offset) * Mat4::from_scale(Vec3::splat(self.scale))
    }

    pub fn apply(&self, raw: &Aabb) -> Aabb {
        raw.scaled_translated(self.scale, self.offset)
    }
}

/// Anchor points derived from the fitted model bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneLayout {
    pub fit: ModelFit,
    pub bounds: Aabb,
    pub sign_position: Vec3,
    pub orbit_target: Vec3,
}

impl SceneLayout {
    pub fn new(raw: &Aabb, params: &SceneParams) -> Self {
        let fit = ModelFit::new(raw, params);
        let bounds = fit.apply(raw);
        let center = bounds.center();
        let size = bounds.size();
        Self {
            fit,
            bounds,
            sign_position: center + Vec3::new(0.0, size.y * SIGN_LIFT_FRACTION + SIGN_LIFT_PAD, 0.0),
            orbit_target: center + Vec3::new(0.0, size.y * ORBIT_TARGET_LIFT, 0.0),
        }
    }

    /// Height the sparkle generator keeps clear for the sign.
    pub fn text_y(&self) -> f32 {
        self.sign_position.y
    }
}

/// Sign scale multiplier at `t` seconds.
#[inline]
pub fn sign_pulse(t: f32) -> f32 {
    1.0 + SIGN_PULSE_AMOUNT * (t * SIGN_PULSE_RATE).sin()
}

/// Model yaw in radians at `t` seconds.
#[inline]
pub fn model_sway(t: f32) -> f32 {
    MODEL_SWAY_AMOUNT * (t * MODEL_SWAY_RATE).sin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_scales_to_desired_and_sits_on_floor() {
        let raw = Aabb::new(Vec3::new(10.0, -5.0, 0.0), Vec3::new(14.0, -3.0, 1.0));
        let layout = SceneLayout::new(&raw, &SceneParams::default());
        assert!((layout.bounds.max_dimension() - MODEL_DESIRED_SIZE).abs() < 1e-5);
        assert!((layout.bounds.min.y - MODEL_FLOOR_GAP).abs() < 1e-5);
        assert!(layout.bounds.center().x.abs() < 1e-5);
        assert!(layout.bounds.center().z.abs() < 1e-5);
    }

    #[test]
    fn degenerate_model_uses_unit_scale() {
        let raw = Aabb::point(Vec3::new(1.0, 2.0, 3.0));
        let fit = ModelFit::new(&raw, &SceneParams::default());
        assert!((fit.scale - MODEL_DESIRED_SIZE).abs() < 1e-6);
        assert!(fit.offset.is_finite());
    }

    #[test]
    fn sign_floats_above_model() {
        let raw = Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0));
        let layout = SceneLayout::new(&raw, &SceneParams::default());
        let h = layout.bounds.size().y;
        let expected = layout.bounds.center().y + h * 0.92 + 0.35;
        assert!((layout.text_y() - expected).abs() < 1e-5);
        assert!(layout.text_y() > layout.bounds.max.y);
    }

    #[test]
    fn idle_motion_is_bounded() {
        for i in 0..500 {
            let t = i as f32 * 0.37;
            assert!((sign_pulse(t) - 1.0).abs() <= SIGN_PULSE_AMOUNT + 1e-6);
            assert!(model_sway(t).abs() <= MODEL_SWAY_AMOUNT + 1e-6);
        }
    }
}
