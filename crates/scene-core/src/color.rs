//! sRGB transfer helpers.
//!
//! Colour constants are display (sRGB-encoded) values, as written in hex.
//! Lighting runs on linear values and the mesh shader encodes its result
//! back to sRGB itself, so surfaces are configured with a non-sRGB format.

/// Display value of a `0xRRGGBB` hex colour.
pub fn hex_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[inline]
pub fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

pub fn srgb_to_linear_rgb(c: [f32; 3]) -> [f32; 3] {
    c.map(srgb_to_linear)
}

pub fn linear_to_srgb_rgb(c: [f32; 3]) -> [f32; 3] {
    c.map(linear_to_srgb)
}

/// What an 8-bit unorm target stores for `c`.
pub fn to_unorm8(c: [f32; 3]) -> [u8; 3] {
    c.map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
}
