#![cfg(target_arch = "wasm32")]
use instant::Instant;
use rand::rngs::StdRng;
use rand::SeedableRng;
use scene_core::{SceneContext, ZoomLimits};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod assets;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod render;
mod sign;
mod zoom;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("scene-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = dom::element_by_id(&document, constants::CANVAS_ID)?;

    // Avoid grabbing a 2D context here to allow WebGPU to acquire the canvas
    let (width, height, dpr) = dom::sync_canvas_backing_size(&canvas);

    let scene = Rc::new(RefCell::new(SceneContext::default()));
    scene.borrow_mut().set_viewport(width, height, dpr as f32);

    let zoom = match zoom::ZoomUi::bind(&document, ZoomLimits::default()) {
        Ok(z) => Some(z),
        Err(e) => {
            log::warn!("[zoom] slider unavailable: {e}");
            None
        }
    };

    let mut gpu = frame::init_gpu(&canvas).await;

    if let Some(g) = &mut gpu {
        let text = scene.borrow().params.sign_text.clone();
        match sign::rasterize(&document, &text) {
            Ok(img) => g.set_sign_image(&img.rgba, img.width, img.height),
            Err(e) => log::warn!("[sign] {e}"),
        }
    }

    // The floor and sign still render if the model never arrives
    match assets::load_model().await {
        Ok(mesh) => {
            let mut s = scene.borrow_mut();
            s.load_model(&mesh.bounds, &mut StdRng::from_entropy());
            log::info!(
                "[sparkles] {}/{} placed",
                s.particles.len(),
                s.particles.requested
            );
            if let Some(g) = &mut gpu {
                g.set_model(&mesh);
                g.set_sparkles(&s.particles);
            }
            if let Some(z) = &zoom {
                z.show(s.orbit.distance());
            }
        }
        Err(e) => log::error!("[model] load failed: {e:#}"),
    }

    if let Some(ui) = document.get_element_by_id(constants::UI_ID) {
        let _ = ui.set_attribute("data-ready", "true");
    }

    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        scene: scene.clone(),
        zoom: zoom.clone(),
    });

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        scene,
        canvas,
        zoom,
        gpu,
        started: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
