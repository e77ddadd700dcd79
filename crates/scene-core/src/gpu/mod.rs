//! wgpu renderer for the scene, shared by the web and native frontends.
//!
//! The frontend owns the surface; this type owns device, queue, pipelines and
//! per-scene buffers, and draws one frame into a given swapchain view:
//! floor, model, sparkles (additive, no depth write), then the sign.

mod helpers;
mod targets;

use crate::color::srgb_to_linear_rgb;
use crate::constants::{CLEAR_RGB, FLOOR_RGB, FLOOR_SIZE};
use crate::context::FrameAttributes;
use crate::model::{MeshVertex, ModelMesh};
use crate::sparkle::{ParticleSet, Sparkle};
use crate::uniforms::{MeshUniforms, SignUniforms, SparkleUniforms};
use helpers::PipelineSpec;
use targets::DepthTarget;
use wgpu::util::DeviceExt;

const QUAD_CORNERS: [[f32; 2]; 6] = [
    [-0.5, -0.5],
    [0.5, -0.5],
    [0.5, 0.5],
    [-0.5, -0.5],
    [0.5, 0.5],
    [-0.5, 0.5],
];

struct MeshDraw {
    vb: wgpu::Buffer,
    count: u32,
    uniforms: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

struct SignDraw {
    _tex: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

/// Pick a surface format the shaders can write display values to.
///
/// Prefers plain 8-bit unorm; an sRGB format would re-encode the output.
pub fn surface_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    use wgpu::TextureFormat as F;
    formats
        .iter()
        .copied()
        .find(|f| matches!(f, F::Bgra8Unorm | F::Rgba8Unorm))
        .or_else(|| formats.iter().copied().find(|f| !f.is_srgb()))
        .or_else(|| {
            let f = formats.first().copied()?;
            log::warn!("[gpu] only sRGB surface formats offered; colours will be too bright");
            Some(f)
        })
}

pub struct SceneRenderer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    depth: DepthTarget,
    clear_color: wgpu::Color,

    mesh_pipeline: wgpu::RenderPipeline,
    mesh_bgl: wgpu::BindGroupLayout,
    floor: MeshDraw,
    model: Option<MeshDraw>,

    quad_vb: wgpu::Buffer,

    sparkle_pipeline: wgpu::RenderPipeline,
    sparkle_uniforms: wgpu::Buffer,
    sparkle_bind_group: wgpu::BindGroup,
    sparkle_vb: Option<wgpu::Buffer>,
    sparkle_count: u32,

    sign_pipeline: wgpu::RenderPipeline,
    sign_uniforms: wgpu::Buffer,
    sign_bind_group: wgpu::BindGroup,
    sign_tex_bgl: wgpu::BindGroupLayout,
    sign_sampler: wgpu::Sampler,
    sign: Option<SignDraw>,
}

impl SceneRenderer {
    pub fn new(
        device: wgpu::Device,
        queue: wgpu::Queue,
        color_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let depth = DepthTarget::new(&device, width, height);

        // Lit meshes (model + floor)
        let mesh_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("mesh_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::MESH_WGSL.into()),
        });
        let mesh_bgl = helpers::uniform_bgl(&device, "mesh_bgl", wgpu::ShaderStages::VERTEX_FRAGMENT);
        let mesh_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("mesh_pl"),
            bind_group_layouts: &[&mesh_bgl],
            push_constant_ranges: &[],
        });
        let mesh_buffers = [wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x3],
        }];
        let mesh_pipeline = helpers::make_pipeline(
            &device,
            &PipelineSpec {
                label: "mesh_pipeline",
                layout: &mesh_pl,
                shader: &mesh_shader,
                buffers: &mesh_buffers,
                color_format,
                blend: Some(wgpu::BlendState::REPLACE),
                depth_write: true,
                depth_compare: wgpu::CompareFunction::Less,
                cull_mode: None,
            },
        );
        let floor = Self::mesh_draw(&device, &mesh_bgl, "floor", &floor_vertices());

        // Shared unit quad for sparkles and the sign
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&QUAD_CORNERS),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let quad_layout = wgpu::VertexBufferLayout {
            array_stride: (std::mem::size_of::<f32>() * 2) as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![0 => Float32x2],
        };

        // Sparkles: one quad instance per sparkle
        let sparkle_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sparkle_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::SPARKLE_WGSL.into()),
        });
        let sparkle_bgl =
            helpers::uniform_bgl(&device, "sparkle_bgl", wgpu::ShaderStages::VERTEX_FRAGMENT);
        let sparkle_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sparkle_pl"),
            bind_group_layouts: &[&sparkle_bgl],
            push_constant_ranges: &[],
        });
        let sparkle_buffers = [
            quad_layout.clone(),
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<Sparkle>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &wgpu::vertex_attr_array![
                    1 => Float32x3,
                    2 => Float32,
                    3 => Float32,
                    4 => Float32
                ],
            },
        ];
        let sparkle_pipeline = helpers::make_pipeline(
            &device,
            &PipelineSpec {
                label: "sparkle_pipeline",
                layout: &sparkle_pl,
                shader: &sparkle_shader,
                buffers: &sparkle_buffers,
                color_format,
                blend: Some(helpers::ADDITIVE),
                depth_write: false,
                depth_compare: wgpu::CompareFunction::LessEqual,
                cull_mode: None,
            },
        );
        let sparkle_uniforms = helpers::uniform_buffer::<SparkleUniforms>(&device, "sparkle_uniforms");
        let sparkle_bind_group =
            helpers::uniform_bind_group(&device, "sparkle_bg", &sparkle_bgl, &sparkle_uniforms);

        // Sign: uniforms in group 0, texture in group 1
        let sign_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sign_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::SIGN_WGSL.into()),
        });
        let sign_bgl = helpers::uniform_bgl(&device, "sign_bgl", wgpu::ShaderStages::VERTEX);
        let sign_tex_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sign_tex_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });
        let sign_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sign_pl"),
            bind_group_layouts: &[&sign_bgl, &sign_tex_bgl],
            push_constant_ranges: &[],
        });
        let sign_pipeline = helpers::make_pipeline(
            &device,
            &PipelineSpec {
                label: "sign_pipeline",
                layout: &sign_pl,
                shader: &sign_shader,
                buffers: &[quad_layout],
                color_format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                depth_write: false,
                depth_compare: wgpu::CompareFunction::Always,
                cull_mode: None,
            },
        );
        let sign_uniforms = helpers::uniform_buffer::<SignUniforms>(&device, "sign_uniforms");
        let sign_bind_group = helpers::uniform_bind_group(&device, "sign_bg", &sign_bgl, &sign_uniforms);
        let sign_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("sign_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self {
            device,
            queue,
            depth,
            clear_color: wgpu::Color {
                r: CLEAR_RGB[0] as f64,
                g: CLEAR_RGB[1] as f64,
                b: CLEAR_RGB[2] as f64,
                a: 1.0,
            },
            mesh_pipeline,
            mesh_bgl,
            floor,
            model: None,
            quad_vb,
            sparkle_pipeline,
            sparkle_uniforms,
            sparkle_bind_group,
            sparkle_vb: None,
            sparkle_count: 0,
            sign_pipeline,
            sign_uniforms,
            sign_bind_group,
            sign_tex_bgl,
            sign_sampler,
            sign: None,
        }
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    fn mesh_draw(
        device: &wgpu::Device,
        bgl: &wgpu::BindGroupLayout,
        label: &str,
        vertices: &[MeshVertex],
    ) -> MeshDraw {
        let vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}_vb")),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let uniforms = helpers::uniform_buffer::<MeshUniforms>(device, &format!("{label}_uniforms"));
        let bind_group = helpers::uniform_bind_group(device, &format!("{label}_bg"), bgl, &uniforms);
        MeshDraw {
            vb,
            count: vertices.len() as u32,
            uniforms,
            bind_group,
        }
    }

    /// Replace the model geometry.
    pub fn set_model(&mut self, mesh: &ModelMesh) {
        self.model = Some(Self::mesh_draw(&self.device, &self.mesh_bgl, "model", &mesh.vertices));
    }

    /// Replace the sparkle instances. An empty set simply draws nothing.
    pub fn set_sparkles(&mut self, set: &ParticleSet) {
        self.sparkle_count = set.len() as u32;
        self.sparkle_vb = (!set.is_empty()).then(|| {
            self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("sparkle_vb"),
                contents: bytemuck::cast_slice(set.as_slice()),
                usage: wgpu::BufferUsages::VERTEX,
            })
        });
    }

    /// Upload the rasterised sign as tightly packed RGBA8 rows of display values.
    pub fn set_sign_image(&mut self, rgba: &[u8], width: u32, height: u32) {
        if width == 0 || height == 0 || rgba.len() < (4 * width * height) as usize {
            log::warn!("[sign] ignoring image {width}x{height} with {} bytes", rgba.len());
            return;
        }
        let (tex, view) = helpers::create_texture(
            &self.device,
            "sign_tex",
            width,
            height,
            wgpu::TextureFormat::Rgba8Unorm,
            wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        );
        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &tex,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sign_tex_bg"),
            layout: &self.sign_tex_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sign_sampler),
                },
            ],
        });
        self.sign = Some(SignDraw {
            _tex: tex,
            bind_group,
        });
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.depth.recreate_if_needed(&self.device, width, height);
    }

    /// Encode and submit one frame into `target`.
    pub fn render(&self, target: &wgpu::TextureView, frame: &FrameAttributes) {
        self.queue
            .write_buffer(&self.floor.uniforms, 0, bytemuck::bytes_of(&frame.floor_uniforms()));
        if let Some(m) = &self.model {
            self.queue
                .write_buffer(&m.uniforms, 0, bytemuck::bytes_of(&frame.model_uniforms()));
        }
        self.queue.write_buffer(
            &self.sparkle_uniforms,
            0,
            bytemuck::bytes_of(&frame.sparkle_uniforms()),
        );
        self.queue
            .write_buffer(&self.sign_uniforms, 0, bytemuck::bytes_of(&frame.sign_uniforms()));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            rpass.set_pipeline(&self.mesh_pipeline);
            for draw in std::iter::once(&self.floor).chain(self.model.as_ref()) {
                rpass.set_bind_group(0, &draw.bind_group, &[]);
                rpass.set_vertex_buffer(0, draw.vb.slice(..));
                rpass.draw(0..draw.count, 0..1);
            }

            if let Some(vb) = &self.sparkle_vb {
                rpass.set_pipeline(&self.sparkle_pipeline);
                rpass.set_bind_group(0, &self.sparkle_bind_group, &[]);
                rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
                rpass.set_vertex_buffer(1, vb.slice(..));
                rpass.draw(0..QUAD_CORNERS.len() as u32, 0..self.sparkle_count);
            }

            if let Some(sign) = &self.sign {
                rpass.set_pipeline(&self.sign_pipeline);
                rpass.set_bind_group(0, &self.sign_bind_group, &[]);
                rpass.set_bind_group(1, &sign.bind_group, &[]);
                rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
                rpass.draw(0..QUAD_CORNERS.len() as u32, 0..1);
            }
        }
        self.queue.submit(Some(encoder.finish()));
    }
}

fn floor_vertices() -> [MeshVertex; 6] {
    let h = FLOOR_SIZE * 0.5;
    let color = srgb_to_linear_rgb(FLOOR_RGB);
    let v = |x: f32, z: f32| MeshVertex {
        position: [x, 0.0, z],
        normal: [0.0, 1.0, 0.0],
        color,
    };
    [
        v(-h, -h),
        v(-h, h),
        v(h, h),
        v(-h, -h),
        v(h, h),
        v(h, -h),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::TextureFormat as F;

    #[test]
    fn surface_format_skips_srgb_variants() {
        let offered = [F::Bgra8UnormSrgb, F::Rgba16Float, F::Bgra8Unorm];
        assert_eq!(surface_format(&offered), Some(F::Bgra8Unorm));
        assert_eq!(surface_format(&[F::Rgba8UnormSrgb, F::Rgba16Float]), Some(F::Rgba16Float));
        assert_eq!(surface_format(&[F::Bgra8UnormSrgb]), Some(F::Bgra8UnormSrgb));
        assert_eq!(surface_format(&[]), None);
    }

    #[test]
    fn floor_is_linear_and_clear_is_black() {
        let v = floor_vertices();
        assert_eq!(v[0].color, srgb_to_linear_rgb(FLOOR_RGB));
        assert_eq!(CLEAR_RGB, [0.0; 3]);
    }
}
