use face_core::{Paint, Surface};
use glam::DVec2;
use std::f64::consts::{PI, TAU};
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// `CanvasRenderingContext2d` as a face drawing surface.
///
/// Individual canvas call failures are dropped; at worst one frame draws
/// wrong.
pub struct CanvasSurface {
    ctx: web::CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(ctx: web::CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    pub fn from_canvas(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        Ok(Self::new(ctx))
    }

    #[allow(deprecated)]
    fn apply_paint(&self, paint: &Paint) {
        match paint {
            Paint::Solid(c) => self.ctx.set_fill_style(&JsValue::from_str(&c.to_css())),
            Paint::Radial {
                center,
                inner_radius,
                outer_radius,
                inner,
                outer,
            } => {
                let gradient = match self.ctx.create_radial_gradient(
                    center.x,
                    center.y,
                    *inner_radius,
                    center.x,
                    center.y,
                    *outer_radius,
                ) {
                    Ok(g) => g,
                    Err(e) => {
                        log::warn!("createRadialGradient failed: {:?}", e);
                        self.ctx.set_fill_style(&JsValue::from_str(&outer.to_css()));
                        return;
                    }
                };
                _ = gradient.add_color_stop(0.0, &inner.to_css());
                _ = gradient.add_color_stop(1.0, &outer.to_css());
                self.ctx.set_fill_style(&gradient);
            }
        }
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> (f64, f64) {
        match self.ctx.canvas() {
            Some(c) => (c.width() as f64, c.height() as f64),
            None => (0.0, 0.0),
        }
    }

    fn clear(&mut self) {
        let (w, h) = self.size();
        self.ctx.clear_rect(0.0, 0.0, w, h);
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn clip_circle(&mut self, center: DVec2, radius: f64) {
        self.ctx.begin_path();
        _ = self.ctx.arc(center.x, center.y, radius, 0.0, TAU);
        self.ctx.clip();
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, paint: &Paint) {
        self.apply_paint(paint);
        self.ctx.begin_path();
        _ = self.ctx.arc(center.x, center.y, radius, 0.0, TAU);
        self.ctx.fill();
    }

    fn fill_lower_half_ellipse(&mut self, center: DVec2, radii: DVec2, paint: &Paint) {
        self.apply_paint(paint);
        self.ctx.begin_path();
        _ = self
            .ctx
            .ellipse(center.x, center.y, radii.x, radii.y, 0.0, 0.0, PI);
        self.ctx.close_path();
        self.ctx.fill();
    }
}
