//! Platform-independent core of the talking face: drawing, blinking and
//! volume smoothing. Front-ends supply a [`Surface`], a [`Scheduler`] and a
//! [`VolumeSource`].

pub mod animator;
pub mod blink;
pub mod color;
pub mod config;
pub mod constants;
pub mod easing;
pub mod face;
pub mod raster;
pub mod scheduler;
pub mod smoother;
pub mod surface;
pub mod volume;

pub use animator::FaceAnimator;
pub use blink::{BlinkController, BlinkSession};
pub use color::{Color, ColorError, FacePalette, Rgb, Rgba};
pub use config::{BlinkConfig, ConfigError, ConfigParseError, FaceConfig, SmootherConfig};
pub use constants::*;
pub use face::{render, render_params, FaceGeometry, FaceParameters};
pub use raster::Raster;
pub use scheduler::{FrameCallback, FrameHandle, ManualScheduler, Scheduler, TimerCallback, TimerHandle};
pub use smoother::VolumeSmoother;
pub use surface::{Paint, Surface};
pub use volume::{rms, Silence, VolumeSource};
