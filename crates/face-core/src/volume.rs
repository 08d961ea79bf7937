/// Something that can report the current audio volume.
///
/// Readings are non-negative and typically below 1. Sources are polled once
/// per animation tick; how often the underlying value changes is up to them.
pub trait VolumeSource {
    fn volume(&self) -> f64;
}

impl<F: Fn() -> f64> VolumeSource for F {
    fn volume(&self) -> f64 {
        self()
    }
}

/// A source that never makes a sound.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silence;

impl VolumeSource for Silence {
    fn volume(&self) -> f64 {
        0.0
    }
}

/// Root-mean-square of a block of samples, clamped to `[0, 1]`.
pub fn rms(samples: &[f32]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f64 = samples.iter().map(|&s| (s as f64) * (s as f64)).sum();
    (sum / samples.len() as f64).sqrt().clamp(0.0, 1.0)
}
