use crate::constants::{MODEL_MTL_URL, MODEL_OBJ_URL};
use scene_core::ModelMesh;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Fetch `url` and return the body bytes. Non-2xx responses are errors.
pub async fn fetch_bytes(url: &str) -> anyhow::Result<Vec<u8>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp: web::Response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| anyhow::anyhow!(format!("fetch {url}: {:?}", e)))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!(format!("fetch {url}: not a Response: {:?}", e)))?;
    if !resp.ok() {
        anyhow::bail!("fetch {url}: HTTP {}", resp.status());
    }
    let buf = JsFuture::from(
        resp.array_buffer()
            .map_err(|e| anyhow::anyhow!(format!("{url}: array_buffer: {:?}", e)))?,
    )
    .await
    .map_err(|e| anyhow::anyhow!(format!("{url}: body: {:?}", e)))?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}

/// Load the OBJ model and its material library. A missing MTL only loses colours.
pub async fn load_model() -> anyhow::Result<ModelMesh> {
    let obj = fetch_bytes(MODEL_OBJ_URL).await?;
    let mtl = match fetch_bytes(MODEL_MTL_URL).await {
        Ok(b) => Some(b),
        Err(e) => {
            log::warn!("[model] materials unavailable, using default colour: {e}");
            None
        }
    };
    let mesh = scene_core::model::from_obj_bytes(&obj, mtl.as_deref())?;
    log::info!(
        "[model] {} triangles, bounds {:?}..{:?}",
        mesh.triangle_count(),
        mesh.bounds.min,
        mesh.bounds.max
    );
    Ok(mesh)
}
