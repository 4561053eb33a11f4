use crate::audio::Synth;
use crate::constants::*;
use crate::core::{
    initial_eye, pick_note, Camera, Gesture, Mode, Rgb, ScenePopulation, TrackballControls,
    TrackballParams, Visualizer, Voice, FOG_COLOR, NOTE_HOLD_SEC,
};
use crate::dom;
use crate::overlay;
use crate::render;
use instant::Instant;
use rand::rngs::StdRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn trackball_params() -> TrackballParams {
    TrackballParams {
        rotate_speed: TRACKBALL_ROTATE_SPEED,
        zoom_speed: TRACKBALL_ZOOM_SPEED,
        damping: TRACKBALL_DAMPING,
        min_distance: TRACKBALL_MIN_DISTANCE,
        max_distance: TRACKBALL_MAX_DISTANCE,
        reference_fps: TRACKBALL_REFERENCE_FPS,
    }
}

/// Everything the frame callback and the event handlers share.
pub struct FrameContext<'a> {
    pub document: web::Document,
    pub canvas: web::HtmlCanvasElement,

    pub visualizer: Visualizer,
    pub camera: Camera,
    pub controls: TrackballControls,
    pub population: ScenePopulation,

    pub voice: Voice,
    pub synth: Synth,
    pub rng: StdRng,

    pub gpu: render::GpuState<'a>,
    pub last_instant: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn new(
        document: web::Document,
        canvas: web::HtmlCanvasElement,
        population: ScenePopulation,
        gpu: render::GpuState<'a>,
        synth: Synth,
        rng: StdRng,
    ) -> Self {
        let (view_w, view_h) = dom::viewport_css_size();
        let aspect = canvas.width().max(1) as f32 / canvas.height().max(1) as f32;
        Self {
            document,
            canvas,
            visualizer: Visualizer::new(Rgb::from_bytes(FOG_COLOR)),
            camera: Camera::new(initial_eye(view_w, view_h), aspect),
            controls: TrackballControls::new(trackball_params()),
            population,
            voice: Voice::default(),
            synth,
            rng,
            gpu,
            last_instant: Instant::now(),
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        let level = self.synth.level();
        self.visualizer.step(level, dt_sec);

        self.controls.update(&mut self.camera, dt_sec);
        self.camera.drift(CAMERA_DRIFT_PER_FRAME);

        let w = self.canvas.width();
        let h = self.canvas.height();
        self.camera.set_viewport(w as f32, h as f32);
        self.gpu.resize_if_needed(w, h);
        match self
            .gpu
            .render(&self.camera, self.visualizer.visuals(), &self.population)
        {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("surface lost, reconfiguring");
                self.gpu.reconfigure();
            }
            Err(e) => log::error!("render error: {:?}", e),
        }
    }

    /// Pick a note for the gesture from the active mode and sound it.
    pub fn play_gesture(&mut self, gesture: Gesture) {
        let Some(midi) = pick_note(self.visualizer.mode().notes(), gesture, &mut self.rng) else {
            return;
        };
        self.synth.resume();
        let note = self.voice.trigger(midi, self.synth.now(), NOTE_HOLD_SEC);
        log::info!("[note] midi={} hz={:.2}", note.midi, note.frequency_hz);
        self.synth.play(&note);
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if self.visualizer.mode() != mode {
            log::info!("[mode] {}", mode.name());
        }
        self.visualizer.set_mode(mode);
        overlay::show_mode(&self.document, mode);
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    population: &ScenePopulation,
) -> anyhow::Result<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    render::GpuState::new(leaked_canvas, population).await
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
