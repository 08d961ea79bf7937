//! Drawing port the face renderer paints through.
//!
//! The operations mirror the subset of a 2D canvas the face needs, so the
//! browser implementation maps onto `CanvasRenderingContext2d` one call at a
//! time while software surfaces can rasterize them directly.

use crate::color::Color;
use glam::DVec2;

#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Solid(Color),
    /// Concentric radial gradient. Points closer than `inner_radius` get
    /// `inner`, points beyond `outer_radius` get `outer`.
    Radial {
        center: DVec2,
        inner_radius: f64,
        outer_radius: f64,
        inner: Color,
        outer: Color,
    },
}

pub trait Surface {
    /// Pixel size of the surface.
    fn size(&self) -> (f64, f64);

    /// Reset every pixel to transparent.
    fn clear(&mut self);

    /// Push the current clip so it can be restored.
    fn save(&mut self);
    fn restore(&mut self);

    /// Intersect the clip with a circle.
    fn clip_circle(&mut self, center: DVec2, radius: f64);

    fn fill_circle(&mut self, center: DVec2, radius: f64, paint: &Paint);

    /// Fill the lower half of an axis-aligned ellipse, flat edge on top.
    fn fill_lower_half_ellipse(&mut self, center: DVec2, radii: DVec2, paint: &Paint);
}
