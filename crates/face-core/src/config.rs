//! Tunable parameters with defaults matching the stock face.

use crate::constants::*;
use rand::Rng;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be finite, got {value}")]
    NotFinite { name: &'static str, value: f64 },
    #[error("{name} must be greater than zero, got {value}")]
    NotPositive { name: &'static str, value: f64 },
    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f64 },
    #[error("smoothing retain factor must be in [0, 1), got {0}")]
    RetainOutOfRange(f64),
}

fn finite(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NotFinite { name, value })
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if finite(name, value)? > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if finite(name, value)? >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BlinkConfig {
    /// Length of one close-and-open curve at speed 1.
    pub duration_ms: f64,
    /// Shortest wait between blinks.
    pub min_interval_ms: f64,
    /// Random extra wait added on top of `min_interval_ms`.
    pub interval_jitter_ms: f64,
    /// Playback rate of the blink curve; 2.0 blinks twice as fast.
    pub speed: f64,
    /// Fixed RNG seed for reproducible blink timing.
    pub seed: Option<u64>,
}

impl Default for BlinkConfig {
    fn default() -> Self {
        Self {
            duration_ms: BLINK_DURATION_MS,
            min_interval_ms: BLINK_MIN_INTERVAL_MS,
            interval_jitter_ms: BLINK_INTERVAL_JITTER_MS,
            speed: BLINK_SPEED,
            seed: None,
        }
    }
}

impl BlinkConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("blink duration", self.duration_ms)?;
        non_negative("blink interval", self.min_interval_ms)?;
        non_negative("blink interval jitter", self.interval_jitter_ms)?;
        positive("blink speed", self.speed)
    }

    /// Wait before the next blink: `min + random() * jitter`.
    pub fn sample_delay<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.min_interval_ms + rng.gen::<f64>() * self.interval_jitter_ms
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SmootherConfig {
    /// Weight kept from the previous smoothed value each update.
    pub retain: f64,
    /// Multiplier from smoothed volume to mouth openness.
    pub amplification: f64,
}

impl Default for SmootherConfig {
    fn default() -> Self {
        Self {
            retain: SMOOTHING_RETAIN,
            amplification: MOUTH_AMPLIFICATION,
        }
    }
}

impl SmootherConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let retain = finite("smoothing retain factor", self.retain)?;
        if !(0.0..1.0).contains(&retain) {
            return Err(ConfigError::RetainOutOfRange(retain));
        }
        non_negative("mouth amplification", self.amplification)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FaceConfig {
    pub blink: BlinkConfig,
    pub smoothing: SmootherConfig,
    /// Face base color, `#RRGGBB` or any CSS color; white when unset.
    pub color: Option<String>,
}

impl FaceConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.blink.validate()?;
        self.smoothing.validate()
    }

    /// Apply a textual override such as `blink-speed=2`.
    ///
    /// Unknown keys are ignored and reported as `Ok(false)` so hosts can pass
    /// through whatever attributes or variables they find.
    pub fn apply_override(&mut self, key: &str, value: &str) -> Result<bool, ConfigParseError> {
        let number = || {
            value.trim().parse::<f64>().map_err(|_| ConfigParseError::Number {
                key: key.to_string(),
                value: value.to_string(),
            })
        };
        match key {
            "color" => self.color = Some(value.trim().to_string()).filter(|c| !c.is_empty()),
            "blink-speed" => self.blink.speed = number()?,
            "blink-duration" => self.blink.duration_ms = number()?,
            "blink-interval" => self.blink.min_interval_ms = number()?,
            "blink-jitter" => self.blink.interval_jitter_ms = number()?,
            "blink-seed" => {
                self.blink.seed = Some(value.trim().parse::<u64>().map_err(|_| {
                    ConfigParseError::Number {
                        key: key.to_string(),
                        value: value.to_string(),
                    }
                })?)
            }
            "smoothing" => self.smoothing.retain = number()?,
            "amplification" => self.smoothing.amplification = number()?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigParseError {
    #[error("{key}: {value:?} is not a number")]
    Number { key: String, value: String },
}

/// Keys understood by [`FaceConfig::apply_override`].
pub const OVERRIDE_KEYS: &[&str] = &[
    "color",
    "blink-speed",
    "blink-duration",
    "blink-interval",
    "blink-jitter",
    "blink-seed",
    "smoothing",
    "amplification",
];
