//! Camera description, orbit controller and zoom limits.
//!
//! These types avoid platform APIs; both frontends feed pointer/wheel input
//! into [`OrbitCamera`] and build matrices from the resulting [`Camera`].

use crate::constants::*;
use glam::{Mat4, Vec3};
use std::f32::consts::{PI, TAU};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
}

/// Allowed camera-to-target distance range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomLimits {
    pub min: f32,
    pub max: f32,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min: ZOOM_IN_LIMIT,
            max: ZOOM_OUT_LIMIT,
        }
    }
}

impl ZoomLimits {
    #[inline]
    pub fn clamp(&self, d: f32) -> f32 {
        d.max(self.min).min(self.max)
    }

    /// Two-decimal readout shown next to the zoom slider.
    pub fn label(&self, d: f32) -> String {
        format!("{:.2}", self.clamp(d))
    }
}

/// Orbit controller around a target point with damped rotation and pan.
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub limits: ZoomLimits,
    pub damping: f32,
    radius: f32,
    theta: f32, // azimuth around +Y, measured from +Z
    phi: f32,   // polar angle from +Y
    theta_delta: f32,
    phi_delta: f32,
    pending_scale: f32,
    pan_offset: Vec3,
}

impl OrbitCamera {
    pub fn new(eye: Vec3, target: Vec3, limits: ZoomLimits) -> Self {
        let mut cam = Self {
            target,
            limits,
            damping: ORBIT_DAMPING,
            radius: 1.0,
            theta: 0.0,
            phi: PI / 2.0,
            theta_delta: 0.0,
            phi_delta: 0.0,
            pending_scale: 1.0,
            pan_offset: Vec3::ZERO,
        };
        cam.set_eye(eye);
        cam
    }

    fn set_eye(&mut self, eye: Vec3) {
        let offset = eye - self.target;
        let r = offset.length();
        if r > 0.0 {
            self.theta = offset.x.atan2(offset.z);
            self.phi = (offset.y / r).clamp(-1.0, 1.0).acos();
        }
        self.radius = self.limits.clamp(r);
        self.clamp_phi();
    }

    fn clamp_phi(&mut self) {
        self.phi = self.phi.clamp(ORBIT_POLAR_EPS, PI - ORBIT_POLAR_EPS);
    }

    pub fn eye(&self) -> Vec3 {
        let s = self.phi.sin();
        self.target
            + Vec3::new(
                self.radius * s * self.theta.sin(),
                self.radius * self.phi.cos(),
                self.radius * s * self.theta.cos(),
            )
    }

    pub fn distance(&self) -> f32 {
        self.radius
    }

    /// Move the target while keeping the eye where it is, then re-clamp.
    pub fn set_target(&mut self, target: Vec3) {
        let eye = self.eye();
        self.target = target;
        self.pan_offset = Vec3::ZERO;
        self.set_eye(eye);
    }

    /// Keep the viewing direction, place the eye at the clamped distance.
    /// Returns the distance actually applied.
    pub fn set_distance(&mut self, d: f32) -> f32 {
        self.radius = self.limits.clamp(d);
        self.pending_scale = 1.0;
        self.radius
    }

    /// Drag rotation in pixels relative to the viewport height.
    pub fn rotate_by_pixels(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        self.theta_delta -= TAU * dx / h * ORBIT_ROTATE_SPEED;
        self.phi_delta -= TAU * dy / h * ORBIT_ROTATE_SPEED;
    }

    /// Screen-space pan: the target slides along the camera's right and up
    /// axes so the point under the cursor follows it at target depth.
    pub fn pan_by_pixels(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        let eye = self.eye();
        let forward = (self.target - eye).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward);
        let half_height = self.radius * (CAMERA_FOVY_DEG.to_radians() * 0.5).tan();
        let scale = 2.0 * half_height / h * ORBIT_PAN_SPEED;
        self.pan_offset += -right * (dx * scale) + up * (dy * scale);
    }

    /// Wheel dolly; positive `notches` zooms out.
    pub fn dolly(&mut self, notches: f32) {
        self.pending_scale *= ORBIT_ZOOM_STEP.powf(-notches);
    }

    /// Apply pending input with damping. Returns true when the eye moved.
    pub fn update(&mut self) -> bool {
        let before = self.eye();

        self.theta = (self.theta + self.theta_delta * self.damping) % TAU;
        self.phi += self.phi_delta * self.damping;
        self.clamp_phi();
        self.target += self.pan_offset * self.damping;
        self.radius = self.limits.clamp(self.radius * self.pending_scale);

        self.theta_delta *= 1.0 - self.damping;
        self.phi_delta *= 1.0 - self.damping;
        self.pan_offset *= 1.0 - self.damping;
        self.pending_scale = 1.0;

        before.distance_squared(self.eye()) > 1.0e-12
    }

    /// Camera for this orbit at the given aspect ratio.
    pub fn camera(&self, aspect: f32) -> Camera {
        Camera {
            eye: self.eye(),
            target: self.target,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(Vec3::from(CAMERA_START_EYE), Vec3::ZERO, ZoomLimits::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_clamp_both_ends() {
        let z = ZoomLimits::default();
        assert_eq!(z.clamp(1.6), 3.0);
        assert_eq!(z.clamp(9.0), 4.0);
        assert_eq!(z.clamp(3.5), 3.5);
        assert_eq!(z.label(1.6), "3.00");
    }

    #[test]
    fn eye_round_trips_through_spherical() {
        let eye = Vec3::new(1.0, 2.0, 2.5);
        let cam = OrbitCamera::new(eye, Vec3::ZERO, ZoomLimits { min: 0.1, max: 10.0 });
        assert!((cam.eye() - eye).length() < 1e-4);
    }

    #[test]
    fn start_eye_is_pushed_out_to_min_distance() {
        let cam = OrbitCamera::default();
        assert_eq!(cam.distance(), ZOOM_IN_LIMIT);
        let dir = Vec3::from(CAMERA_START_EYE).normalize();
        assert!((cam.eye().normalize() - dir).length() < 1e-4);
    }

    #[test]
    fn set_distance_keeps_direction() {
        let mut cam = OrbitCamera::default();
        let dir = (cam.eye() - cam.target).normalize();
        assert_eq!(cam.set_distance(3.7), 3.7);
        let eye = cam.eye();
        assert!(((eye - cam.target).length() - 3.7).abs() < 1e-4);
        assert!(((eye - cam.target).normalize() - dir).length() < 1e-4);
    }

    #[test]
    fn damped_rotation_decays() {
        let mut cam = OrbitCamera::default();
        cam.rotate_by_pixels(100.0, 0.0, 800.0);
        assert!(cam.update());
        for _ in 0..2000 {
            cam.update();
        }
        assert!(!cam.update());
    }

    #[test]
    fn horizontal_pan_slides_target_sideways() {
        let mut cam = OrbitCamera::new(Vec3::new(0.0, 0.0, 3.5), Vec3::ZERO, ZoomLimits::default());
        // half the viewport height to the right
        cam.pan_by_pixels(400.0, 0.0, 800.0);
        for _ in 0..2000 {
            cam.update();
        }
        let half_height = 3.5 * (CAMERA_FOVY_DEG.to_radians() * 0.5).tan();
        // camera right is +X here; the scene follows the cursor, so the target goes -X
        assert!((cam.target.x + half_height).abs() < 1e-3, "{:?}", cam.target);
        assert!(cam.target.y.abs() < 1e-5);
        assert!((cam.distance() - 3.5).abs() < 1e-5);
        assert!(((cam.eye() - cam.target) - Vec3::new(0.0, 0.0, 3.5)).length() < 1e-3);
    }

    #[test]
    fn dragging_down_pans_target_up() {
        let mut cam = OrbitCamera::default();
        let start = cam.target;
        cam.pan_by_pixels(0.0, 50.0, 800.0);
        assert!(cam.update());
        assert!(cam.target.y > start.y);
    }

    #[test]
    fn set_target_drops_pending_pan() {
        let mut cam = OrbitCamera::default();
        cam.pan_by_pixels(300.0, 0.0, 800.0);
        cam.set_target(Vec3::new(0.0, 1.0, 0.0));
        cam.update();
        assert_eq!(cam.target, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn dolly_is_clamped() {
        let mut cam = OrbitCamera::default();
        cam.dolly(50.0);
        cam.update();
        assert_eq!(cam.distance(), ZOOM_OUT_LIMIT);
    }
}
