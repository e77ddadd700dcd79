//! Uniform block layouts shared with the WGSL programs.
//!
//! Field order and padding mirror the `struct` declarations in `shaders/`.

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    /// xyz = camera eye, w = tone-mapping exposure.
    pub eye_exposure: [f32; 4],
    /// rgb = fog colour, a = exp2 density.
    pub fog: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SparkleUniforms {
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub resolution: [f32; 2],
    pub time: f32,
    pub pixel_ratio: f32,
    pub size: f32,
    pub alpha: f32,
    pub _pad: [f32; 2],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SignUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub center: [f32; 4],
    /// Camera right axis scaled by half the sign width.
    pub right: [f32; 4],
    /// Camera up axis scaled by half the sign height.
    pub up: [f32; 4],
}
