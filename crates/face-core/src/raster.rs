//! CPU raster surface.
//!
//! Coverage is sampled once at each pixel center (no anti-aliasing), which
//! keeps output exactly reproducible across runs. Used by the native host
//! and by tests that inspect pixels.

use crate::color::{Rgb, Rgba};
use crate::surface::{Paint, Surface};
use glam::DVec2;
use smallvec::SmallVec;
use std::io::{self, Write};

#[derive(Clone, Copy, Debug, PartialEq)]
struct ClipCircle {
    center: DVec2,
    radius: f64,
}

impl ClipCircle {
    #[inline]
    fn contains(&self, p: DVec2) -> bool {
        p.distance_squared(self.center) <= self.radius * self.radius
    }
}

pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
    clips: SmallVec<[ClipCircle; 4]>,
    saved: SmallVec<[usize; 4]>,
}

impl Raster {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 4]; width as usize * height as usize],
            clips: SmallVec::new(),
            saved: SmallVec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGBA of one pixel; `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[(y * self.width + x) as usize])
    }

    /// Row-major RGBA8 bytes.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Binary PPM (P6), composited over white.
    pub fn write_ppm<W: Write>(&self, mut out: W) -> io::Result<()> {
        write!(out, "P6\n{} {}\n255\n", self.width, self.height)?;
        let mut row = Vec::with_capacity(self.width as usize * 3);
        for line in self.pixels.chunks(self.width.max(1) as usize) {
            row.clear();
            for px in line {
                let a = px[3] as u32;
                for c in &px[..3] {
                    row.push(((*c as u32 * a + 255 * (255 - a)) / 255) as u8);
                }
            }
            out.write_all(&row)?;
        }
        Ok(())
    }

    fn fill_where(&mut self, min: DVec2, max: DVec2, paint: &Paint, inside: impl Fn(DVec2) -> bool) {
        let sampler = Sampler::new(paint);
        let x0 = min.x.floor().max(0.0) as u32;
        let y0 = min.y.floor().max(0.0) as u32;
        let x1 = (max.x.ceil().max(0.0) as u32).min(self.width);
        let y1 = (max.y.ceil().max(0.0) as u32).min(self.height);
        for y in y0..y1 {
            for x in x0..x1 {
                let p = DVec2::new(x as f64 + 0.5, y as f64 + 0.5);
                if !inside(p) || !self.clips.iter().all(|c| c.contains(p)) {
                    continue;
                }
                let idx = (y * self.width + x) as usize;
                self.pixels[idx] = blend_over(self.pixels[idx], sampler.sample(p));
            }
        }
    }
}

impl Surface for Raster {
    fn size(&self) -> (f64, f64) {
        (self.width as f64, self.height as f64)
    }

    fn clear(&mut self) {
        self.pixels.fill([0; 4]);
    }

    fn save(&mut self) {
        self.saved.push(self.clips.len());
    }

    fn restore(&mut self) {
        if let Some(len) = self.saved.pop() {
            self.clips.truncate(len);
        }
    }

    fn clip_circle(&mut self, center: DVec2, radius: f64) {
        self.clips.push(ClipCircle { center, radius });
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, paint: &Paint) {
        let r = DVec2::splat(radius.abs());
        let r2 = radius * radius;
        self.fill_where(center - r, center + r, paint, |p| {
            p.distance_squared(center) <= r2
        });
    }

    fn fill_lower_half_ellipse(&mut self, center: DVec2, radii: DVec2, paint: &Paint) {
        if radii.x <= 0.0 || radii.y <= 0.0 {
            return;
        }
        let min = DVec2::new(center.x - radii.x, center.y);
        let max = center + radii;
        self.fill_where(min, max, paint, |p| {
            let d = (p - center) / radii;
            p.y >= center.y && d.length_squared() <= 1.0
        });
    }
}

// Paint with its colors resolved once per fill instead of once per pixel.
enum Sampler {
    Solid(Rgba),
    Radial {
        center: DVec2,
        inner_radius: f64,
        outer_radius: f64,
        inner: Rgba,
        outer: Rgba,
    },
}

impl Sampler {
    fn new(paint: &Paint) -> Self {
        let resolve = |c: &crate::color::Color| {
            c.resolve().unwrap_or_else(|| {
                log::debug!("raster cannot resolve color {:?}; painting white", c);
                Rgba::opaque(Rgb::WHITE)
            })
        };
        match paint {
            Paint::Solid(c) => Sampler::Solid(resolve(c)),
            Paint::Radial {
                center,
                inner_radius,
                outer_radius,
                inner,
                outer,
            } => Sampler::Radial {
                center: *center,
                inner_radius: *inner_radius,
                outer_radius: *outer_radius,
                inner: resolve(inner),
                outer: resolve(outer),
            },
        }
    }

    fn sample(&self, p: DVec2) -> Rgba {
        match self {
            Sampler::Solid(c) => *c,
            Sampler::Radial {
                center,
                inner_radius,
                outer_radius,
                inner,
                outer,
            } => {
                let span = outer_radius - inner_radius;
                let t = if span > 0.0 {
                    ((p.distance(*center) - inner_radius) / span).clamp(0.0, 1.0)
                } else {
                    1.0
                };
                lerp_rgba(*inner, *outer, t)
            }
        }
    }
}

fn lerp_rgba(a: Rgba, b: Rgba, t: f64) -> Rgba {
    let ch = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * t).round() as u8;
    Rgba {
        rgb: Rgb::new(ch(a.rgb.r, b.rgb.r), ch(a.rgb.g, b.rgb.g), ch(a.rgb.b, b.rgb.b)),
        a: a.a + (b.a - a.a) * t,
    }
}

// Source-over on straight alpha.
fn blend_over(dst: [u8; 4], src: Rgba) -> [u8; 4] {
    let sa = src.a.clamp(0.0, 1.0);
    let da = dst[3] as f64 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return [0; 4];
    }
    let ch = |s: u8, d: u8| {
        ((s as f64 * sa + d as f64 * da * (1.0 - sa)) / out_a)
            .round()
            .clamp(0.0, 255.0) as u8
    };
    [
        ch(src.rgb.r, dst[0]),
        ch(src.rgb.g, dst[1]),
        ch(src.rgb.b, dst[2]),
        (out_a * 255.0).round() as u8,
    ]
}
