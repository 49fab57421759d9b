use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::render::DrawingSurface;

/// [`DrawingSurface`] backed by a browser 2D context. Draws in device pixels
/// with an identity context transform.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    pub fn clear(&mut self, width: f64, height: f64) {
        self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok();
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    pub fn draw_tile(&mut self, image: &HtmlImageElement, x: f64, y: f64, width: f64, height: f64) {
        self.ctx
            .draw_image_with_html_image_element_and_dw_and_dh(image, x, y, width, height)
            .ok();
    }
}

impl DrawingSurface for CanvasSurface {
    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64) {
        self.ctx.arc(x, y, radius, start_angle, end_angle).ok();
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn set_stroke_style(&mut self, style: &str) {
        self.ctx.set_stroke_style_str(style);
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }

    fn clip(&mut self) {
        self.ctx.clip();
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.ctx.set_global_alpha(alpha);
    }
}
