use crate::constants::WHEEL_ZOOM_PER_PIXEL;
use crate::core::{pointer_on_circle, Gesture};
use crate::dom;
use crate::frame::FrameContext;
use crate::input;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type App = Rc<RefCell<FrameContext<'static>>>;

/// Register every pointer, touch, wheel and resize listener. Called once.
pub fn wire_input_handlers(app: &App) {
    let canvas = app.borrow().canvas.clone();
    let document = app.borrow().document.clone();
    wire_pointerdown(app, &canvas);
    wire_pointermove(app, &canvas);
    wire_pointerup(app, &document);
    wire_touchstart(app, &document);
    wire_wheel(app, &canvas);
    wire_resize(&canvas);
}

fn trackball_point(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> glam::Vec2 {
    let (pos, size) = input::pointer_css(ev, canvas);
    pointer_on_circle(pos.x, pos.y, size.x, size.y)
}

fn wire_pointerdown(app: &App, canvas: &web::HtmlCanvasElement) {
    let app = app.clone();
    let canvas_for_closure = canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if ev.button() != 0 {
            return;
        }
        let p = trackball_point(&ev, &canvas_for_closure);
        app.borrow_mut().controls.pointer_down(p);
        _ = canvas_for_closure.set_pointer_capture(ev.pointer_id());
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(app: &App, canvas: &web::HtmlCanvasElement) {
    let app = app.clone();
    let canvas = canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let mut a = app.borrow_mut();
        if a.controls.is_dragging() {
            let p = trackball_point(&ev, &canvas);
            a.controls.pointer_move(p);
        }
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_pointerup(app: &App, document: &web::Document) {
    let app = app.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let mut a = app.borrow_mut();
        a.controls.pointer_up();
        // Touch releases are handled by touchstart
        if ev.pointer_type() != "touch" {
            a.play_gesture(Gesture::PointerUp);
        }
    }) as Box<dyn FnMut(_)>);
    _ = document.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_touchstart(app: &App, document: &web::Document) {
    let app = app.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::TouchEvent| {
        let touches = ev.touches().length();
        if touches == 1 {
            ev.prevent_default();
        }
        app.borrow_mut()
            .play_gesture(Gesture::TouchStart { touches });
    }) as Box<dyn FnMut(_)>);
    // Non-passive so a single touch can suppress scrolling and synthetic clicks
    let opts = web::AddEventListenerOptions::new();
    opts.set_passive(false);
    _ = document.add_event_listener_with_callback_and_add_event_listener_options(
        "touchstart",
        closure.as_ref().unchecked_ref(),
        &opts,
    );
    closure.forget();
}

fn wire_wheel(app: &App, canvas: &web::HtmlCanvasElement) {
    let app = app.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        ev.prevent_default();
        app.borrow_mut()
            .controls
            .wheel(ev.delta_y() as f32 * WHEEL_ZOOM_PER_PIXEL);
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_resize(canvas: &web::HtmlCanvasElement) {
    let canvas_resize = canvas.clone();
    let closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
