use crate::constants::*;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Raster of the birthday sign, tightly packed RGBA8 rows.
pub struct SignImage {
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Draw `text` centred on an offscreen 2D canvas with a dark outline.
pub fn rasterize(document: &web::Document, text: &str) -> anyhow::Result<SignImage> {
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!(format!("create canvas: {:?}", e)))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!(format!("not a canvas: {:?}", e)))?;
    canvas.set_width(SIGN_CANVAS_WIDTH);
    canvas.set_height(SIGN_CANVAS_HEIGHT);

    let ctx: web::CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|e| anyhow::anyhow!(format!("get_context: {:?}", e)))?
        .ok_or_else(|| anyhow::anyhow!("no 2d context"))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!(format!("not a 2d context: {:?}", e)))?;

    let w = SIGN_CANVAS_WIDTH as f64;
    let h = SIGN_CANVAS_HEIGHT as f64;
    ctx.clear_rect(0.0, 0.0, w, h);
    ctx.set_font(SIGN_FONT);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");

    // outline first so the fill sits on top
    ctx.set_line_width(SIGN_OUTLINE_PX);
    ctx.set_line_join("round");
    ctx.set_stroke_style_str(SIGN_OUTLINE_STYLE);
    ctx.stroke_text(text, w * 0.5, h * 0.5)
        .map_err(|e| anyhow::anyhow!(format!("stroke_text: {:?}", e)))?;

    ctx.set_fill_style_str(SIGN_FILL_STYLE);
    ctx.fill_text(text, w * 0.5, h * 0.5)
        .map_err(|e| anyhow::anyhow!(format!("fill_text: {:?}", e)))?;

    let data = ctx
        .get_image_data(0.0, 0.0, w, h)
        .map_err(|e| anyhow::anyhow!(format!("get_image_data: {:?}", e)))?;
    Ok(SignImage {
        rgba: data.data().0,
        width: SIGN_CANVAS_WIDTH,
        height: SIGN_CANVAS_HEIGHT,
    })
}
