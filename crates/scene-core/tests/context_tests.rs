// Host-side tests for the render context and its frame evaluation.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use scene_core::*;

fn loaded_context(seed: u64) -> SceneContext {
    let mut ctx = SceneContext::default();
    ctx.set_viewport(1280, 720, 2.0);
    let raw = Aabb::new(Vec3::new(-3.0, -1.0, -2.0), Vec3::new(3.0, 9.0, 2.0));
    ctx.load_model(&raw, &mut StdRng::seed_from_u64(seed));
    ctx
}

#[test]
fn load_model_places_sparkles_and_camera() {
    let ctx = loaded_context(1);
    let layout = ctx.layout.expect("layout after load");
    assert_eq!(ctx.particles.len(), SPARKLE_COUNT);
    assert_eq!(ctx.orbit.target, layout.orbit_target);
    // start distance 1.6 is below the zoom-in limit
    assert_eq!(ctx.orbit.distance(), ZOOM_IN_LIMIT);
}

#[test]
fn reloading_replaces_the_particle_set() {
    let mut ctx = loaded_context(1);
    let first = ctx.particles.sparkles.clone();
    let raw = Aabb::new(Vec3::ZERO, Vec3::new(1.0, 0.5, 1.0));
    ctx.load_model(&raw, &mut StdRng::seed_from_u64(2));
    assert_ne!(first, ctx.particles.sparkles);
    assert_eq!(ctx.particles.requested, SPARKLE_COUNT);
}

#[test]
fn frame_is_pure() {
    let ctx = loaded_context(3);
    let a = ctx.frame(4.2);
    let b = ctx.frame(4.2);
    assert_eq!(a.sparkle_uniforms(), b.sparkle_uniforms());
    assert_eq!(a.model_uniforms(), b.model_uniforms());
    assert_eq!(a.sign_uniforms(), b.sign_uniforms());
}

#[test]
fn sparkle_uniforms_carry_knobs_and_viewport() {
    let ctx = loaded_context(4);
    let u = ctx.frame(1.5).sparkle_uniforms();
    assert_eq!(u.time, 1.5);
    assert_eq!(u.pixel_ratio, 2.0);
    assert_eq!(u.size, SPARKLE_SIZE);
    assert_eq!(u.alpha, SPARKLE_ALPHA);
    assert_eq!(u.resolution, [1280.0, 720.0]);
}

#[test]
fn sign_pulses_around_its_base_size() {
    let ctx = loaded_context(5);
    for i in 0..100 {
        let f = ctx.frame(i as f32 * 0.1);
        assert!((f.sign_size.x / SIGN_WIDTH - 1.0).abs() <= 0.02 + 1e-6);
        assert!((f.sign_size.y / SIGN_HEIGHT - 1.0).abs() <= 0.02 + 1e-6);
    }
}

#[test]
fn sign_billboard_axes_face_the_camera() {
    let ctx = loaded_context(6);
    let f = ctx.frame(0.0);
    let u = f.sign_uniforms();
    let right = Vec3::new(u.right[0], u.right[1], u.right[2]);
    let up = Vec3::new(u.up[0], u.up[1], u.up[2]);
    let forward = (f.camera.target - f.camera.eye).normalize();
    assert!(right.dot(forward).abs() < 1e-4);
    assert!(up.dot(forward).abs() < 1e-4);
    assert!((right.length() - SIGN_WIDTH * 0.5).abs() < 1e-4);
}

#[test]
fn cpu_sparkles_project_inside_size_limits() {
    let ctx = loaded_context(7);
    let f = ctx.frame(2.0);
    for a in animate(&ctx.particles, f.elapsed, &f.sparkle_view()) {
        assert!(a.size_px >= 1.0 * 0.65 - 1e-6);
        assert!(a.size_px <= 10.0 * 1.4 + 1e-5);
    }
}

#[test]
fn controls_report_movement_only_while_damping() {
    let mut ctx = loaded_context(8);
    assert!(!ctx.update_controls());
    ctx.orbit.rotate_by_pixels(40.0, 10.0, 720.0);
    assert!(ctx.update_controls());
}

#[test]
fn colours_reach_the_screen_as_authored() {
    use scene_core::color::{linear_to_srgb_rgb, to_unorm8};
    let ctx = loaded_context(9);
    let fog = ctx.frame(0.0).model_uniforms().fog;
    // the shader gets linear fog; encoding it again gives back #05060a
    assert_eq!(to_unorm8(linear_to_srgb_rgb([fog[0], fog[1], fog[2]])), [5, 6, 10]);
    assert_eq!(fog[3], FOG_DENSITY);
    // sparkle colours are written raw to a unorm target
    assert_eq!(to_unorm8(color(0.0).to_array()), [166, 217, 255]);
    assert_eq!(CLEAR_RGB, [0.0, 0.0, 0.0]);
}
