// Page wiring and asset locations for the web frontend

// DOM ids
pub const CANVAS_ID: &str = "app-canvas";
pub const UI_ID: &str = "ui";
pub const ZOOM_SLIDER_ID: &str = "zoom";
pub const ZOOM_VALUE_ID: &str = "zoomVal";

// Assets, relative to the page
pub const MODEL_OBJ_URL: &str = "./model.obj";
pub const MODEL_MTL_URL: &str = "./material.mtl";

// Text sign raster (high res = sharp)
pub const SIGN_CANVAS_WIDTH: u32 = 2048;
pub const SIGN_CANVAS_HEIGHT: u32 = 512;
pub const SIGN_FONT: &str = "900 170px system-ui, -apple-system, Segoe UI, Roboto";
pub const SIGN_OUTLINE_PX: f64 = 22.0;
pub const SIGN_OUTLINE_STYLE: &str = "rgba(0,0,0,0.85)";
pub const SIGN_FILL_STYLE: &str = "rgba(255,255,255,0.98)";

// Fallback when the slider has no parsable value yet
pub const ZOOM_SLIDER_DEFAULT: f32 = 1.6;
