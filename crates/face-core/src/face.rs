//! Stateless face drawing.
//!
//! Every call clears the surface and redraws the whole face from the two
//! openness parameters, so repeated calls with the same arguments produce the
//! same image.

use crate::color::FacePalette;
use crate::constants::*;
use crate::surface::{Paint, Surface};
use glam::DVec2;

/// Per-frame shape parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceParameters {
    /// 1 = fully open, 0 = fully closed.
    pub eye_scale: f64,
    /// Openness multiplier for the mouth, unbounded above.
    pub mouth_scale: f64,
}

impl Default for FaceParameters {
    fn default() -> Self {
        Self {
            eye_scale: 1.0,
            mouth_scale: 0.0,
        }
    }
}

/// Layout derived from the surface size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceGeometry {
    pub center: DVec2,
    pub face_radius: f64,
    pub eye_radius: f64,
    pub pupil_radius: f64,
    pub left_eye: DVec2,
    pub right_eye: DVec2,
    pub mouth_center: DVec2,
    pub mouth_half_width: f64,
    height: f64,
}

impl FaceGeometry {
    pub fn for_size(width: f64, height: f64) -> Self {
        let center = DVec2::new(width / 2.0, height / 2.0);
        let eye_radius = width / EYE_RADIUS_DIVISOR;
        let eye_offset = DVec2::new(width / EYE_OFFSET_X_DIVISOR, -height / EYE_OFFSET_Y_DIVISOR);
        Self {
            center,
            face_radius: width / 2.0 - FACE_MARGIN_PX,
            eye_radius,
            pupil_radius: eye_radius * PUPIL_RATIO,
            left_eye: DVec2::new(center.x - eye_offset.x, center.y + eye_offset.y),
            right_eye: DVec2::new(center.x + eye_offset.x, center.y + eye_offset.y),
            mouth_center: DVec2::new(center.x, center.y + height / MOUTH_OFFSET_Y_DIVISOR),
            mouth_half_width: width / MOUTH_HALF_WIDTH_DIVISOR,
            height,
        }
    }

    /// Vertical offset of the eyelid center from the eye center.
    ///
    /// `-2r` (parked above the eye) when open, `0` (covering it) when closed.
    /// Values outside `[0, 1]` extrapolate.
    #[inline]
    pub fn lid_offset_y(&self, eye_scale: f64) -> f64 {
        -self.eye_radius * 2.0 + self.eye_radius * 2.0 * (1.0 - eye_scale)
    }

    #[inline]
    pub fn lid_radius(&self) -> f64 {
        self.eye_radius * LID_RADIUS_RATIO
    }

    /// Mouth half-height; never thinner than the pixel floor.
    #[inline]
    pub fn mouth_half_height(&self, mouth_scale: f64) -> f64 {
        MOUTH_MIN_HALF_HEIGHT_PX.max(self.mouth_height_factor() * mouth_scale)
    }

    #[inline]
    pub fn mouth_height_factor(&self) -> f64 {
        self.height / MOUTH_HEIGHT_DIVISOR
    }

    #[inline]
    pub fn glint_center(&self, eye: DVec2) -> DVec2 {
        eye - DVec2::splat(self.pupil_radius * GLINT_OFFSET_RATIO)
    }

    #[inline]
    pub fn glint_radius(&self) -> f64 {
        self.pupil_radius / GLINT_RADIUS_DIVISOR
    }
}

/// Paint the face onto `surface`.
///
/// `color` is the face base color; `#RRGGBB` values get a lighter gradient
/// center, anything else is used flat, and `None` means white.
pub fn render<S: Surface + ?Sized>(
    surface: &mut S,
    eye_scale: f64,
    mouth_scale: f64,
    color: Option<&str>,
) {
    let (width, height) = surface.size();
    let geo = FaceGeometry::for_size(width, height);
    let palette = FacePalette::from_color(color);

    surface.clear();

    // Face
    surface.fill_circle(
        geo.center,
        geo.face_radius,
        &Paint::Radial {
            center: geo.center,
            inner_radius: geo.face_radius * GRADIENT_INNER_RATIO,
            outer_radius: geo.face_radius,
            inner: palette.inner.clone(),
            outer: palette.skin.clone(),
        },
    );

    // Eyes
    for eye in [geo.left_eye, geo.right_eye] {
        draw_eye(surface, &geo, &palette, eye, eye_scale);
    }

    // Mouth
    surface.fill_lower_half_ellipse(
        geo.mouth_center,
        DVec2::new(geo.mouth_half_width, geo.mouth_half_height(mouth_scale)),
        &Paint::Solid(palette.feature.clone()),
    );
}

pub fn render_params<S: Surface + ?Sized>(surface: &mut S, params: FaceParameters, color: Option<&str>) {
    render(surface, params.eye_scale, params.mouth_scale, color);
}

fn draw_eye<S: Surface + ?Sized>(
    surface: &mut S,
    geo: &FaceGeometry,
    palette: &FacePalette,
    eye: DVec2,
    eye_scale: f64,
) {
    surface.save();
    surface.clip_circle(eye, geo.eye_radius);

    surface.fill_circle(eye, geo.eye_radius, &Paint::Solid(palette.sclera.clone()));
    surface.fill_circle(eye, geo.pupil_radius, &Paint::Solid(palette.feature.clone()));
    surface.fill_circle(
        geo.glint_center(eye),
        geo.glint_radius(),
        &Paint::Solid(palette.glint.clone()),
    );

    // Lid last so it covers everything above as it closes
    let lid = eye + DVec2::new(0.0, geo.lid_offset_y(eye_scale));
    surface.fill_circle(lid, geo.lid_radius(), &Paint::Solid(palette.skin.clone()));

    surface.restore();
}
