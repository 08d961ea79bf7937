use crate::constants::{ANALYSER_FFT_SIZE, MIC_GAIN};
use face_core::{rms, VolumeSource};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Microphone loudness read from an `AnalyserNode` each time it is polled.
pub struct AnalyserVolume {
    // Keeps the graph alive for as long as the face listens
    _audio_ctx: web::AudioContext,
    _source: web::MediaStreamAudioSourceNode,
    analyser: web::AnalyserNode,
    buf: RefCell<Vec<f32>>,
}

impl VolumeSource for AnalyserVolume {
    fn volume(&self) -> f64 {
        let mut buf = self.buf.borrow_mut();
        self.analyser.get_float_time_domain_data(&mut buf);
        (rms(&buf) * MIC_GAIN).min(1.0)
    }
}

// Create analyser and an appropriately sized buffer
fn create_analyser(audio_ctx: &web::AudioContext) -> anyhow::Result<(web::AnalyserNode, Vec<f32>)> {
    let analyser = web::AnalyserNode::new(audio_ctx).map_err(|e| {
        log::error!("AnalyserNode error: {:?}", e);
        anyhow::anyhow!("{:?}", e)
    })?;
    analyser.set_fft_size(ANALYSER_FFT_SIZE);
    let buf = vec![0.0_f32; analyser.fft_size() as usize];
    Ok((analyser, buf))
}

/// Ask for the microphone and route it into an analyser.
pub async fn microphone_volume() -> anyhow::Result<AnalyserVolume> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let devices = window
        .navigator()
        .media_devices()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let mut constraints = web::MediaStreamConstraints::new();
    #[allow(deprecated)]
    constraints.audio(&JsValue::TRUE);
    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let stream: web::MediaStream = JsFuture::from(promise)
        .await
        .map_err(|e| anyhow::anyhow!("microphone denied: {:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let audio_ctx = web::AudioContext::new().map_err(|e| anyhow::anyhow!("{:?}", e))?;
    _ = audio_ctx.resume();
    let source = audio_ctx
        .create_media_stream_source(&stream)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let (analyser, buf) = create_analyser(&audio_ctx)?;
    source
        .connect_with_audio_node(&analyser)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    log::info!("microphone connected (fft {})", analyser.fft_size());
    Ok(AnalyserVolume {
        _audio_ctx: audio_ctx,
        _source: source,
        analyser,
        buf: RefCell::new(buf),
    })
}

/// Volume pushed in from JavaScript, e.g. the level of a remote voice stream.
#[derive(Clone, Default)]
pub struct ExternalVolume {
    level: Rc<Cell<f64>>,
}

impl ExternalVolume {
    pub fn set(&self, volume: f64) {
        // Smoother state is never reset, so only finite non-negative levels go in
        let v = if volume.is_finite() { volume.max(0.0) } else { 0.0 };
        self.level.set(v);
    }
}

impl VolumeSource for ExternalVolume {
    fn volume(&self) -> f64 {
        self.level.get()
    }
}
