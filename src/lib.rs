#![cfg(target_arch = "wasm32")]
use crate::core::{Mode, ScenePopulation};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;

type App = Rc<RefCell<frame::FrameContext<'static>>>;

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

fn with_app(f: impl FnOnce(&mut frame::FrameContext<'static>)) {
    APP.with(|slot| match slot.borrow().as_ref() {
        Some(app) => f(&mut app.borrow_mut()),
        None => log::warn!("app not initialized yet"),
    });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("tonal-orbit starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id("app-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #app-canvas"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    // Backing size must be set before the surface is configured
    dom::sync_canvas_backing_size(&canvas);

    let mut rng = StdRng::from_entropy();
    let population = ScenePopulation::build(&mut rng);
    log::info!(
        "[scene] lines={} cubes={} markers={}",
        population.lines.len(),
        population.cubes.len(),
        population.markers.len()
    );

    let gpu = frame::init_gpu(&canvas, &population).await?;
    let synth = audio::Synth::new()?;

    let app: App = Rc::new(RefCell::new(frame::FrameContext::new(
        document.clone(),
        canvas,
        population,
        gpu,
        synth,
        rng,
    )));
    app.borrow_mut().set_mode(Mode::Major);

    events::wire_input_handlers(&app);
    events::wire_global_keydown(app.clone());
    APP.with(|slot| *slot.borrow_mut() = Some(app.clone()));

    frame::start_loop(app);
    Ok(())
}

#[wasm_bindgen]
pub fn to_major() {
    with_app(|a| a.set_mode(Mode::Major));
}

#[wasm_bindgen]
pub fn to_minor() {
    with_app(|a| a.set_mode(Mode::Minor));
}

#[wasm_bindgen]
pub fn toggle_mode() {
    with_app(|a| {
        let next = a.visualizer.mode().toggled();
        a.set_mode(next);
    });
}
