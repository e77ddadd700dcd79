// Host-side tests for page wiring constants.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
fn dom_ids_match_the_page() {
    assert_eq!(CANVAS_ID, "app-canvas");
    assert_eq!(ZOOM_SLIDER_ID, "zoom");
    assert_eq!(ZOOM_VALUE_ID, "zoomVal");
    assert_eq!(UI_ID, "ui");
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn sign_raster_is_wide_and_sized_for_the_quad() {
    assert!(SIGN_CANVAS_WIDTH > SIGN_CANVAS_HEIGHT);
    // 4:1 raster on a 1.25 x 0.32 quad keeps glyphs close to square
    let raster = SIGN_CANVAS_WIDTH as f32 / SIGN_CANVAS_HEIGHT as f32;
    let quad = scene_core::SIGN_WIDTH / scene_core::SIGN_HEIGHT;
    assert!((raster / quad - 1.0).abs() < 0.05);
    assert!(SIGN_OUTLINE_PX > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn zoom_fallback_is_clamped_into_range() {
    let limits = scene_core::ZoomLimits::default();
    assert_eq!(limits.clamp(ZOOM_SLIDER_DEFAULT), limits.min);
}
