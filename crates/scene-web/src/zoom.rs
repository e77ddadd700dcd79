use crate::constants::{ZOOM_SLIDER_ID, ZOOM_VALUE_ID};
use crate::dom;
use scene_core::ZoomLimits;
use web_sys as web;

/// The zoom range slider and its numeric readout.
#[derive(Clone)]
pub struct ZoomUi {
    pub slider: web::HtmlInputElement,
    label: Option<web::HtmlElement>,
    limits: ZoomLimits,
}

impl ZoomUi {
    /// Bind to the page controls and constrain the slider to `limits`.
    pub fn bind(document: &web::Document, limits: ZoomLimits) -> anyhow::Result<Self> {
        let slider: web::HtmlInputElement = dom::element_by_id(document, ZOOM_SLIDER_ID)?;
        slider.set_min(&limits.min.to_string());
        slider.set_max(&limits.max.to_string());
        slider.set_step("0.01");
        let label = dom::element_by_id::<web::HtmlElement>(document, ZOOM_VALUE_ID).ok();
        if label.is_none() {
            log::warn!("[zoom] #{ZOOM_VALUE_ID} missing, readout disabled");
        }
        Ok(Self {
            slider,
            label,
            limits,
        })
    }

    pub fn value(&self) -> String {
        self.slider.value()
    }

    /// Reflect the camera distance in the slider and readout.
    pub fn show(&self, distance: f32) {
        let d = self.limits.clamp(distance);
        self.slider.set_value(&format!("{d:.2}"));
        self.show_label(d);
    }

    pub fn show_label(&self, distance: f32) {
        if let Some(l) = &self.label {
            l.set_inner_text(&self.limits.label(distance));
        }
    }
}
