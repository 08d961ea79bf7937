#![cfg(target_arch = "wasm32")]
use face_core::{render, FaceAnimator, Silence, VolumeSource};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod canvas;
mod constants;
mod dom;
mod frame;
mod scheduler;

use constants::VOLUME_SOURCE_ATTR;

thread_local! {
    static RUNNING: RefCell<Option<frame::FrameLoop>> = const { RefCell::new(None) };
    static EXTERNAL_VOLUME: audio::ExternalVolume = audio::ExternalVolume::default();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("face-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Feed the mouth from JavaScript when the canvas uses
/// `data-volume-source="external"`.
#[wasm_bindgen]
pub fn set_volume(volume: f64) {
    EXTERNAL_VOLUME.with(|v| v.set(volume));
}

/// Stop animating and cancel every pending blink callback.
#[wasm_bindgen]
pub fn stop() {
    if let Some(running) = RUNNING.with(|r| r.borrow_mut().take()) {
        running.stop();
    }
}

/// Draw a single face frame onto an arbitrary 2D context.
#[wasm_bindgen]
pub fn render_face(
    ctx: web::CanvasRenderingContext2d,
    eye_scale: f64,
    mouth_scale: f64,
    color: Option<String>,
) {
    let mut surface = canvas::CanvasSurface::new(ctx);
    render(&mut surface, eye_scale, mouth_scale, color.as_deref());
}

async fn pick_volume_source(canvas: &web::HtmlCanvasElement) -> Box<dyn VolumeSource> {
    let wanted = canvas
        .get_attribute(VOLUME_SOURCE_ATTR)
        .unwrap_or_else(|| "microphone".to_string());
    if wanted == "external" {
        log::info!("volume driven from JavaScript");
        return Box::new(EXTERNAL_VOLUME.with(|v| v.clone()));
    }
    match audio::microphone_volume().await {
        Ok(mic) => Box::new(mic),
        Err(e) => {
            log::warn!("no microphone ({:?}); mouth stays closed", e);
            Box::new(Silence)
        }
    }
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas = dom::find_canvas(&document)?;
    dom::wire_canvas_resize(&canvas);

    let config = dom::read_config(&canvas);
    log::info!(
        "[face] color={:?} blink_speed={} smoothing={} amplification={}",
        config.color,
        config.blink.speed,
        config.smoothing.retain,
        config.smoothing.amplification
    );

    let surface = canvas::CanvasSurface::from_canvas(&canvas)?;
    let scheduler: Rc<dyn face_core::Scheduler> = Rc::new(scheduler::BrowserScheduler::new()?);
    let volume = pick_volume_source(&canvas).await;
    let animator = FaceAnimator::new(scheduler, volume, config);

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(animator, surface)));
    let running = frame::start_loop(frame_ctx);
    // Replace any earlier loop so only one face animates per page
    if let Some(previous) = RUNNING.with(|r| r.borrow_mut().replace(running)) {
        previous.stop();
    }
    Ok(())
}
