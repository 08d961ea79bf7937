//! Face layout and animation tuning constants.
//!
//! Layout values are expressed as divisors of the surface size so the face
//! scales with whatever canvas it is drawn on.

// Face disc
pub const FACE_MARGIN_PX: f64 = 10.0; // gap between face edge and surface edge
pub const GRADIENT_INNER_RATIO: f64 = 0.5; // lighter stop starts at half the face radius
pub const LIGHTEN_OFFSET: u8 = 40; // added to each channel for the lighter stop

// Eyes
pub const EYE_RADIUS_DIVISOR: f64 = 16.0; // eye radius = width / 16
pub const EYE_OFFSET_X_DIVISOR: f64 = 5.0; // eye centers at +-width / 5
pub const EYE_OFFSET_Y_DIVISOR: f64 = 12.0; // eye centers at -height / 12
pub const PUPIL_RATIO: f64 = 0.5;
pub const GLINT_OFFSET_RATIO: f64 = 0.3; // of the pupil radius, up and left
pub const GLINT_RADIUS_DIVISOR: f64 = 2.5; // of the pupil radius
pub const GLINT_ALPHA: f64 = 0.9;
pub const LID_RADIUS_RATIO: f64 = 1.5;

// Mouth
pub const MOUTH_OFFSET_Y_DIVISOR: f64 = 7.0; // mouth center at +height / 7
pub const MOUTH_HALF_WIDTH_DIVISOR: f64 = 8.0;
pub const MOUTH_HEIGHT_DIVISOR: f64 = 6.0; // half-height = height / 6 * mouth_scale
pub const MOUTH_MIN_HALF_HEIGHT_PX: f64 = 5.0;

// Palette
pub const SCLERA_HEX: &str = "#FFFFFF";
pub const FEATURE_HEX: &str = "#333333"; // pupils and mouth

// Blink timing (milliseconds)
pub const BLINK_DURATION_MS: f64 = 150.0;
pub const BLINK_MIN_INTERVAL_MS: f64 = 2000.0;
pub const BLINK_INTERVAL_JITTER_MS: f64 = 3000.0; // delay = min + random() * jitter
pub const BLINK_SPEED: f64 = 1.0;

// Volume smoothing
pub const SMOOTHING_RETAIN: f64 = 0.7; // s = s * retain + v * (1 - retain)
pub const MOUTH_AMPLIFICATION: f64 = 1.5;
