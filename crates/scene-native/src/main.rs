mod sign;

use rand::rngs::StdRng;
use rand::SeedableRng;
use scene_core::gpu::SceneRenderer;
use scene_core::SceneContext;
use std::path::PathBuf;
use std::time::Instant;
use winit::{
    event::*,
    event_loop::EventLoop,
    keyboard::{Key, ModifiersState, NamedKey},
    window::WindowBuilder,
};

const DEFAULT_MODEL_PATH: &str = "model.obj";
// Slider-equivalent step for the +/- keys
const KEY_ZOOM_STEP: f32 = 0.1;

struct GpuState<'w> {
    window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    config: wgpu::SurfaceConfiguration,
    renderer: SceneRenderer,
}

impl<'w> GpuState<'w> {
    async fn new(window: &'w winit::window::Window) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = scene_core::gpu::surface_format(&surface_caps.formats)
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let width = size.width.max(1);
        let height = size.height.max(1);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let renderer = SceneRenderer::new(device, queue, format, width, height);
        Ok(Self {
            window,
            surface,
            config,
            renderer,
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(self.renderer.device(), &self.config);
        self.renderer.resize(new_size.width, new_size.height);
        log::debug!("resized to {}x{}", new_size.width, new_size.height);
    }

    fn render(&mut self, scene: &SceneContext, elapsed: f32) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.renderer.render(&view, &scene.frame(elapsed));
        frame.present();
        Ok(())
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Drag {
    Rotate,
    Pan,
}

#[derive(Default)]
struct Pointer {
    drag: Option<Drag>,
    last: Option<(f64, f64)>,
    modifiers: ModifiersState,
}

impl Pointer {
    /// Left rotates, or pans with ctrl/shift/super held; right pans.
    fn press(&mut self, button: MouseButton, state: ElementState) {
        let pan_modifier = self.modifiers.control_key()
            || self.modifiers.shift_key()
            || self.modifiers.super_key();
        self.drag = match (state, button) {
            (ElementState::Released, _) => None,
            (ElementState::Pressed, MouseButton::Left) if pan_modifier => Some(Drag::Pan),
            (ElementState::Pressed, MouseButton::Left) => Some(Drag::Rotate),
            (ElementState::Pressed, MouseButton::Right) => Some(Drag::Pan),
            (ElementState::Pressed, _) => self.drag,
        };
    }
}

fn pixel_ratio(window: &winit::window::Window) -> f32 {
    window.scale_factor().min(scene_core::MAX_PIXEL_RATIO) as f32
}

/// One dolly step per wheel event. winit reports scroll-up as positive;
/// dolly treats positive as zoom out.
fn wheel_notches(delta: MouseScrollDelta) -> f32 {
    let y = match delta {
        MouseScrollDelta::LineDelta(_, y) => y as f64,
        MouseScrollDelta::PixelDelta(p) => p.y,
    };
    if y > 0.0 {
        -1.0
    } else if y < 0.0 {
        1.0
    } else {
        0.0
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut args = std::env::args().skip(1);
    let model_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH));
    let font_path = args.next().map(PathBuf::from);

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Happy Birthday")
        .build(&event_loop)?;

    let mut state = pollster::block_on(GpuState::new(&window))?;
    let mut scene = SceneContext::default();
    let size = window.inner_size();
    scene.set_viewport(size.width, size.height, pixel_ratio(&window));

    match scene_core::model::from_obj_path(&model_path) {
        Ok(mesh) => {
            scene.load_model(&mesh.bounds, &mut StdRng::from_entropy());
            log::info!(
                "loaded {} ({} triangles), {}/{} sparkles",
                model_path.display(),
                mesh.triangle_count(),
                scene.particles.len(),
                scene.particles.requested
            );
            state.renderer.set_model(&mesh);
            state.renderer.set_sparkles(&scene.particles);
        }
        Err(e) => log::error!("could not load {}: {e}", model_path.display()),
    }

    match sign::find_font(font_path) {
        Some((path, font)) => {
            let img = sign::rasterize(&font, &scene.params.sign_text);
            state.renderer.set_sign_image(&img.rgba, img.width, img.height);
            log::info!("sign rasterised with {}", path.display());
        }
        None => log::warn!("no usable font found; pass one as the second argument to show the sign"),
    }

    let start = Instant::now();
    let mut pointer = Pointer::default();

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent {
            event: WindowEvent::Resized(size),
            ..
        } => {
            scene.set_viewport(size.width, size.height, pixel_ratio(state.window));
            state.resize(size);
        }
        Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } => elwt.exit(),
        Event::WindowEvent {
            event: WindowEvent::ModifiersChanged(m),
            ..
        } => pointer.modifiers = m.state(),
        Event::WindowEvent {
            event: WindowEvent::MouseInput { state: btn_state, button, .. },
            ..
        } => pointer.press(button, btn_state),
        Event::WindowEvent {
            event: WindowEvent::CursorMoved { position, .. },
            ..
        } => {
            if let (Some(drag), Some((lx, ly))) = (pointer.drag, pointer.last) {
                let h = state.window.inner_size().height as f32;
                let (dx, dy) = ((position.x - lx) as f32, (position.y - ly) as f32);
                match drag {
                    Drag::Rotate => scene.orbit.rotate_by_pixels(dx, dy, h),
                    Drag::Pan => scene.orbit.pan_by_pixels(dx, dy, h),
                }
            }
            pointer.last = Some((position.x, position.y));
        }
        Event::WindowEvent {
            event: WindowEvent::MouseWheel { delta, .. },
            ..
        } => scene.orbit.dolly(wheel_notches(delta)),
        Event::WindowEvent {
            event:
                WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            logical_key,
                            state: ElementState::Pressed,
                            ..
                        },
                    ..
                },
            ..
        } => {
            let d = scene.orbit.distance();
            match logical_key.as_ref() {
                Key::Character("+") | Key::Character("=") => {
                    scene.orbit.set_distance(d - KEY_ZOOM_STEP);
                }
                Key::Character("-") => {
                    scene.orbit.set_distance(d + KEY_ZOOM_STEP);
                }
                Key::Named(NamedKey::Escape) => elwt.exit(),
                _ => {}
            }
        }
        Event::AboutToWait => {
            scene.update_controls();
            match state.render(&scene, start.elapsed().as_secs_f32()) {
                Ok(_) => state.window.request_redraw(),
                Err(wgpu::SurfaceError::Lost) => state.resize(state.window.inner_size()),
                Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                Err(_) => {}
            }
        }
        _ => {}
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_steps_once_per_event() {
        assert_eq!(wheel_notches(MouseScrollDelta::LineDelta(0.0, 3.0)), -1.0);
        assert_eq!(wheel_notches(MouseScrollDelta::LineDelta(0.0, -0.2)), 1.0);
        let big = winit::dpi::PhysicalPosition::new(0.0, -480.0);
        assert_eq!(wheel_notches(MouseScrollDelta::PixelDelta(big)), 1.0);
        assert_eq!(wheel_notches(MouseScrollDelta::LineDelta(2.0, 0.0)), 0.0);
    }

    #[test]
    fn buttons_pick_rotate_or_pan() {
        let mut p = Pointer::default();
        p.press(MouseButton::Left, ElementState::Pressed);
        assert!(p.drag == Some(Drag::Rotate));
        p.press(MouseButton::Left, ElementState::Released);
        assert!(p.drag.is_none());
        p.press(MouseButton::Right, ElementState::Pressed);
        assert!(p.drag == Some(Drag::Pan));
        p.press(MouseButton::Right, ElementState::Released);

        p.modifiers = ModifiersState::SHIFT;
        p.press(MouseButton::Left, ElementState::Pressed);
        assert!(p.drag == Some(Drag::Pan));
    }
}
