use wasm_bindgen::JsValue;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Window inner size in CSS pixels, zero when unavailable.
pub fn viewport_css_size() -> (f32, f32) {
    let Some(w) = web::window() else {
        return (0.0, 0.0);
    };
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|j| j.as_f64()).unwrap_or(0.0) as f32;
    (dim(w.inner_width()), dim(w.inner_height()))
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
