//! Per-frame composition of the blink and volume signals.

use crate::blink::BlinkController;
use crate::config::FaceConfig;
use crate::face::FaceParameters;
use crate::scheduler::Scheduler;
use crate::smoother::VolumeSmoother;
use crate::volume::VolumeSource;
use std::rc::Rc;

pub struct FaceAnimator {
    blink: BlinkController,
    smoother: VolumeSmoother,
    volume: Box<dyn VolumeSource>,
    color: Option<String>,
}

impl FaceAnimator {
    pub fn new(scheduler: Rc<dyn Scheduler>, volume: Box<dyn VolumeSource>, config: FaceConfig) -> Self {
        let FaceConfig {
            blink,
            smoothing,
            color,
        } = config;
        Self {
            blink: BlinkController::new(scheduler, blink),
            smoother: VolumeSmoother::new(smoothing),
            volume,
            color,
        }
    }

    /// Sample the volume source and report the current shape parameters.
    pub fn tick(&mut self) -> FaceParameters {
        let v = self.volume.volume();
        self.smoother.observe(v);
        self.parameters()
    }

    /// Current parameters without sampling the volume.
    pub fn parameters(&self) -> FaceParameters {
        FaceParameters {
            eye_scale: self.blink.eye_scale(),
            mouth_scale: self.smoother.mouth_scale(),
        }
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn blink(&self) -> &BlinkController {
        &self.blink
    }

    pub fn smoother(&self) -> &VolumeSmoother {
        &self.smoother
    }

    /// Cancel all pending blink callbacks.
    pub fn dispose(&self) {
        self.blink.dispose();
    }
}
