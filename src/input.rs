use glam::Vec2;
use web_sys as web;

/// Pointer position relative to the canvas and the canvas size, both in CSS px.
#[inline]
pub fn pointer_css(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> (Vec2, Vec2) {
    let rect = canvas.get_bounding_client_rect();
    let pos = Vec2::new(
        ev.client_x() as f32 - rect.left() as f32,
        ev.client_y() as f32 - rect.top() as f32,
    );
    (pos, Vec2::new(rect.width() as f32, rect.height() as f32))
}
