use crate::constants::{CANVAS_ID, CONFIG_ATTR_PREFIX};
use face_core::config::OVERRIDE_KEYS;
use face_core::FaceConfig;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn find_canvas(document: &web::Document) -> anyhow::Result<web::HtmlCanvasElement> {
    let el = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?;
    el.dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

// Keep the canvas backing store in step with its CSS size
pub fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

/// Build the face config from `data-*` attributes on the canvas.
///
/// Bad values are logged and skipped; an invalid combination falls back to
/// the defaults rather than refusing to start.
pub fn read_config(canvas: &web::HtmlCanvasElement) -> FaceConfig {
    let mut config = FaceConfig::default();
    for key in OVERRIDE_KEYS {
        let attr = format!("{}{}", CONFIG_ATTR_PREFIX, key);
        if let Some(value) = canvas.get_attribute(&attr) {
            if let Err(e) = config.apply_override(key, &value) {
                log::warn!("ignoring {}: {}", attr, e);
            }
        }
    }
    match config.validate() {
        Ok(()) => config,
        Err(e) => {
            log::warn!("invalid face config ({}); using defaults", e);
            FaceConfig {
                color: config.color,
                ..FaceConfig::default()
            }
        }
    }
}
