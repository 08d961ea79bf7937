use anyhow::Context;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::rc::Rc;

use face_core::config::OVERRIDE_KEYS;
use face_core::{render_params, FaceAnimator, FaceConfig, ManualScheduler, Raster, Scheduler};

const DEFAULT_FRAMES: u32 = 300;
const DEFAULT_SIZE: u32 = 256;
const FRAME_MS: f64 = 1000.0 / 60.0;

struct Args {
    out_dir: PathBuf,
    frames: u32,
    size: u32,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut it = std::env::args().skip(1);
    let out_dir = PathBuf::from(it.next().unwrap_or_else(|| "frames".to_string()));
    let frames = match it.next() {
        Some(s) => s.parse().with_context(|| format!("frame count {s:?}"))?,
        None => DEFAULT_FRAMES,
    };
    let size = match it.next() {
        Some(s) => s.parse().with_context(|| format!("surface size {s:?}"))?,
        None => DEFAULT_SIZE,
    };
    Ok(Args {
        out_dir,
        frames,
        size: size.max(1),
    })
}

// FACE_BLINK_SPEED=2 -> blink-speed=2
fn config_from_env() -> anyhow::Result<FaceConfig> {
    let mut config = FaceConfig::default();
    for key in OVERRIDE_KEYS {
        let var = format!("FACE_{}", key.to_ascii_uppercase().replace('-', "_"));
        if let Ok(value) = std::env::var(&var) {
            config
                .apply_override(key, &value)
                .with_context(|| format!("reading {var}"))?;
        }
    }
    config.validate()?;
    Ok(config)
}

// Speech-like loudness: a fast syllable wobble gated by a slow phrase envelope
fn synthetic_volume(t_ms: f64) -> f64 {
    let syllables = (t_ms * 0.012).sin().abs();
    let phrase = ((t_ms * 0.0011).sin() * 1.4).clamp(0.0, 1.0);
    syllables * phrase * 0.6
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = parse_args()?;
    let config = config_from_env()?;
    log::info!(
        "rendering {} frames at {}x{} into {}",
        args.frames,
        args.size,
        args.size,
        args.out_dir.display()
    );
    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;

    let clock = Rc::new(ManualScheduler::new());
    let scheduler: Rc<dyn Scheduler> = clock.clone();
    let volume_clock = clock.clone();
    let mut animator = FaceAnimator::new(
        scheduler,
        Box::new(move || synthetic_volume(volume_clock.now_ms())),
        config,
    );
    let mut raster = Raster::new(args.size, args.size);

    let mut min_eye = 1.0_f64;
    let mut max_mouth = 0.0_f64;
    for i in 0..args.frames {
        clock.advance(FRAME_MS);
        let params = animator.tick();
        min_eye = min_eye.min(params.eye_scale);
        max_mouth = max_mouth.max(params.mouth_scale);
        render_params(&mut raster, params, animator.color());

        let path = args.out_dir.join(format!("frame_{i:04}.ppm"));
        let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
        let mut out = BufWriter::new(file);
        raster.write_ppm(&mut out)?;
        out.flush()?;
        log::trace!("{} eye={:.3} mouth={:.3}", path.display(), params.eye_scale, params.mouth_scale);
    }

    animator.dispose();
    log::info!(
        "done: {} blinks, min eye {:.2}, max mouth {:.2}, {} callbacks left",
        animator.blink().blink_count(),
        min_eye,
        max_mouth,
        clock.pending_frames() + clock.pending_timers()
    );
    Ok(())
}
