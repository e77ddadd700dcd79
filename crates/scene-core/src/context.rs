//! Render context: everything the frame callback reads, in one owned value.
//!
//! Frontends keep a `SceneContext` behind their loop, feed it input and a
//! clock, and hand the resulting [`FrameAttributes`] to the GPU.

use crate::bounds::Aabb;
use crate::camera::{Camera, OrbitCamera};
use crate::color::srgb_to_linear_rgb;
use crate::constants::*;
use crate::layout::{model_sway, sign_pulse, SceneLayout, SceneParams};
use crate::sparkle::{self, ParticleSet, SparkleParams, SparkleView};
use crate::uniforms::{MeshUniforms, SignUniforms, SparkleUniforms};
use glam::{Mat4, Vec2, Vec3, Vec4};
use rand::Rng;

/// Per-frame values derived from the context and the elapsed time.
#[derive(Clone, Debug)]
pub struct FrameAttributes {
    pub elapsed: f32,
    pub camera: Camera,
    pub model_matrix: Mat4,
    pub sign_position: Vec3,
    /// World-space sign size after the pulse.
    pub sign_size: Vec2,
    pub resolution: [f32; 2],
    pub pixel_ratio: f32,
    pub sparkle_size: f32,
    pub sparkle_alpha: f32,
}

impl FrameAttributes {
    pub fn view_proj(&self) -> Mat4 {
        self.camera.projection_matrix() * self.camera.view_matrix()
    }

    pub fn model_uniforms(&self) -> MeshUniforms {
        self.mesh_uniforms(self.model_matrix)
    }

    pub fn floor_uniforms(&self) -> MeshUniforms {
        self.mesh_uniforms(Mat4::IDENTITY)
    }

    fn mesh_uniforms(&self, model: Mat4) -> MeshUniforms {
        MeshUniforms {
            view_proj: self.view_proj().to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            eye_exposure: Vec4::from((self.camera.eye, TONE_EXPOSURE)).to_array(),
            fog: Vec4::from((Vec3::from(srgb_to_linear_rgb(FOG_RGB)), FOG_DENSITY)).to_array(),
        }
    }

    pub fn sparkle_uniforms(&self) -> SparkleUniforms {
        SparkleUniforms {
            view: self.camera.view_matrix().to_cols_array_2d(),
            proj: self.camera.projection_matrix().to_cols_array_2d(),
            resolution: self.resolution,
            time: self.elapsed,
            pixel_ratio: self.pixel_ratio,
            size: self.sparkle_size,
            alpha: self.sparkle_alpha,
            _pad: [0.0; 2],
        }
    }

    pub fn sign_uniforms(&self) -> SignUniforms {
        let view = self.camera.view_matrix();
        let right = view.row(0).truncate() * (self.sign_size.x * 0.5);
        let up = view.row(1).truncate() * (self.sign_size.y * 0.5);
        SignUniforms {
            view_proj: self.view_proj().to_cols_array_2d(),
            center: Vec4::from((self.sign_position, 1.0)).to_array(),
            right: Vec4::from((right, 0.0)).to_array(),
            up: Vec4::from((up, 0.0)).to_array(),
        }
    }

    /// Inputs for evaluating sparkles on the CPU with this frame's camera.
    pub fn sparkle_view(&self) -> SparkleView {
        SparkleView {
            view: self.camera.view_matrix(),
            pixel_ratio: self.pixel_ratio,
            base_size: self.sparkle_size,
        }
    }
}

/// Owned scene state driven by a single per-frame callback.
#[derive(Clone, Debug)]
pub struct SceneContext {
    pub params: SceneParams,
    pub sparkle_params: SparkleParams,
    pub orbit: OrbitCamera,
    pub layout: Option<SceneLayout>,
    pub particles: ParticleSet,
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: f32,
}

impl SceneContext {
    pub fn new(params: SceneParams, sparkle_params: SparkleParams) -> Self {
        Self {
            params,
            sparkle_params,
            orbit: OrbitCamera::default(),
            layout: None,
            particles: ParticleSet::default(),
            width: 1,
            height: 1,
            pixel_ratio: 1.0,
        }
    }

    /// Lay out the scene around freshly loaded model bounds.
    ///
    /// Replaces any previous layout and particle set wholesale.
    pub fn load_model<R: Rng + ?Sized>(&mut self, raw_bounds: &Aabb, rng: &mut R) -> &SceneLayout {
        let layout = SceneLayout::new(raw_bounds, &self.params);
        self.particles = sparkle::generate(
            &layout.bounds,
            self.sparkle_params.count,
            layout.text_y(),
            rng,
        );
        if self.particles.is_short() {
            log::debug!(
                "[sparkles] placed {}/{} after {} attempts",
                self.particles.len(),
                self.particles.requested,
                self.particles.attempts
            );
        }
        self.orbit.set_target(layout.orbit_target);
        self.orbit.set_distance(CAMERA_START_DISTANCE);
        self.layout.insert(layout)
    }

    pub fn set_viewport(&mut self, width: u32, height: u32, pixel_ratio: f32) {
        self.width = width.max(1);
        self.height = height.max(1);
        self.pixel_ratio = pixel_ratio;
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Advance damped orbit input. Returns true when the camera moved.
    pub fn update_controls(&mut self) -> bool {
        self.orbit.update()
    }

    /// Pure frame evaluation; no state changes.
    pub fn frame(&self, elapsed: f32) -> FrameAttributes {
        let sway = Mat4::from_rotation_y(model_sway(elapsed));
        let fit = self
            .layout
            .map(|l| l.fit.matrix())
            .unwrap_or(Mat4::IDENTITY);
        let sign_position = self
            .layout
            .map(|l| l.sign_position)
            .unwrap_or(Vec3::new(0.0, SIGN_LIFT_PAD, 0.0));
        let pulse = sign_pulse(elapsed);
        FrameAttributes {
            elapsed,
            camera: self.orbit.camera(self.aspect()),
            model_matrix: sway * fit,
            sign_position,
            sign_size: Vec2::new(SIGN_WIDTH, SIGN_HEIGHT) * pulse,
            resolution: [self.width as f32, self.height as f32],
            pixel_ratio: self.pixel_ratio,
            sparkle_size: self.sparkle_params.base_size,
            sparkle_alpha: self.sparkle_params.base_alpha,
        }
    }
}

impl Default for SceneContext {
    fn default() -> Self {
        Self::new(SceneParams::default(), SparkleParams::default())
    }
}
