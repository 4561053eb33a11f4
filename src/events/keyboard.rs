use crate::core::mode_for_key;
use crate::frame::FrameContext;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_global_keydown(ev: &web::KeyboardEvent, app: &Rc<RefCell<FrameContext<'static>>>) {
    if ev.repeat() || ev.ctrl_key() || ev.meta_key() || ev.alt_key() {
        return;
    }
    let current = app.borrow().visualizer.mode();
    if let Some(mode) = mode_for_key(&ev.key(), current) {
        app.borrow_mut().set_mode(mode);
        ev.prevent_default();
    }
}

pub fn wire_global_keydown(app: Rc<RefCell<FrameContext<'static>>>) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &app);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
