use crate::config::SmootherConfig;

/// Single-pole low-pass filter turning raw volume into mouth openness.
///
/// Each accepted sample updates `s = s * retain + v * (1 - retain)`; the mouth
/// value is `s * amplification`. Nothing is clamped.
#[derive(Clone, Debug)]
pub struct VolumeSmoother {
    config: SmootherConfig,
    smoothed: f64,
    last_sample: Option<f64>,
}

impl Default for VolumeSmoother {
    fn default() -> Self {
        Self::new(SmootherConfig::default())
    }
}

impl VolumeSmoother {
    pub fn new(config: SmootherConfig) -> Self {
        Self {
            config,
            smoothed: 0.0,
            last_sample: None,
        }
    }

    /// Fold in one sample unconditionally and return the new mouth value.
    pub fn push(&mut self, volume: f64) -> f64 {
        let retain = self.config.retain;
        self.smoothed = self.smoothed * retain + volume * (1.0 - retain);
        self.last_sample = Some(volume);
        self.mouth_scale()
    }

    /// Fold in `volume` only if it differs from the last sample seen.
    ///
    /// Hosts that poll a volume source every frame call this so the filter
    /// advances once per delivered sample rather than once per frame. Returns
    /// whether the sample was applied.
    pub fn observe(&mut self, volume: f64) -> bool {
        if self.last_sample == Some(volume) {
            return false;
        }
        self.push(volume);
        true
    }

    /// Smoothed volume before amplification.
    pub fn smoothed(&self) -> f64 {
        self.smoothed
    }

    pub fn mouth_scale(&self) -> f64 {
        self.smoothed * self.config.amplification
    }

    pub fn config(&self) -> &SmootherConfig {
        &self.config
    }
}
