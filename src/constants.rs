/// Browser host constants.
///
/// Face geometry and animation tuning live in `face_core::constants`; these
/// only concern how the page is wired up.

// DOM
pub const CANVAS_ID: &str = "face-canvas";
pub const CONFIG_ATTR_PREFIX: &str = "data-"; // e.g. data-color, data-blink-speed
pub const VOLUME_SOURCE_ATTR: &str = "data-volume-source"; // "microphone" | "external"

// Microphone analysis
pub const ANALYSER_FFT_SIZE: u32 = 1024;
pub const MIC_GAIN: f64 = 4.0; // raw speech RMS sits well below 0.25
