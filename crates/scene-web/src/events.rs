use crate::constants::ZOOM_SLIDER_DEFAULT;
use crate::dom;
use crate::input::{self, DragMode, DragState};
use crate::zoom::ZoomUi;
use scene_core::SceneContext;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub scene: Rc<RefCell<SceneContext>>,
    pub zoom: Option<ZoomUi>,
}

/// Orbit drag, pan drag, wheel dolly and the zoom slider.
pub fn wire_input_handlers(w: InputWiring) {
    let drag = Rc::new(RefCell::new(DragState::default()));
    let target: &web::EventTarget = w.canvas.as_ref();

    {
        let drag = drag.clone();
        let canvas = w.canvas.clone();
        dom::add_listener(target, "pointerdown", move |ev: web::PointerEvent| {
            let pan_modifier = ev.ctrl_key() || ev.meta_key() || ev.shift_key();
            let Some(mode) = input::drag_mode(ev.button(), pan_modifier) else {
                return;
            };
            drag.borrow_mut().begin(
                ev.pointer_id(),
                mode,
                ev.client_x() as f32,
                ev.client_y() as f32,
            );
            let _ = canvas.set_pointer_capture(ev.pointer_id());
        });
    }
    // right-drag pans, so keep the browser menu away
    dom::add_listener(target, "contextmenu", |ev: web::Event| ev.prevent_default());
    {
        let drag = drag.clone();
        let canvas = w.canvas.clone();
        let scene = w.scene.clone();
        dom::add_listener(target, "pointermove", move |ev: web::PointerEvent| {
            let mut drag = drag.borrow_mut();
            let delta = drag.move_to(ev.pointer_id(), ev.client_x() as f32, ev.client_y() as f32);
            if let Some([dx, dy]) = delta {
                let h = canvas.client_height() as f32;
                let mut scene = scene.borrow_mut();
                match drag.mode {
                    DragMode::Rotate => scene.orbit.rotate_by_pixels(dx, dy, h),
                    DragMode::Pan => scene.orbit.pan_by_pixels(dx, dy, h),
                }
            }
        });
    }
    for name in ["pointerup", "pointercancel"] {
        let drag = drag.clone();
        dom::add_listener(target, name, move |ev: web::PointerEvent| {
            drag.borrow_mut().end(ev.pointer_id());
        });
    }
    {
        let scene = w.scene.clone();
        dom::add_listener(target, "wheel", move |ev: web::WheelEvent| {
            ev.prevent_default();
            scene
                .borrow_mut()
                .orbit
                .dolly(input::wheel_notches(ev.delta_y()));
        });
    }

    if let Some(zoom) = w.zoom {
        let scene = w.scene.clone();
        let ui = zoom.clone();
        let slider: &web::EventTarget = zoom.slider.as_ref();
        dom::add_listener(slider, "input", move |_ev: web::Event| {
            let wanted = input::slider_distance(&ui.value(), ZOOM_SLIDER_DEFAULT);
            let applied = scene.borrow_mut().orbit.set_distance(wanted);
            ui.show_label(applied);
        });
    }
}
