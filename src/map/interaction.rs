// Default map interactions: drag to pan, wheel to zoom.

use crate::render::Pixel;

/// Pixels of wheel travel per zoom level.
const WHEEL_PIXELS_PER_ZOOM: f64 = 300.0;
const WHEEL_LINE_PIXELS: f64 = 40.0;
const WHEEL_PAGE_PIXELS: f64 = 800.0;

#[derive(Debug, Default, Clone)]
pub struct DragPan {
    last: Option<Pixel>,
}

impl DragPan {
    pub fn start(&mut self, at: Pixel) {
        self.last = Some(at);
    }

    pub fn is_active(&self) -> bool {
        self.last.is_some()
    }

    /// Delta since the previous position while a drag is active.
    pub fn drag_to(&mut self, at: Pixel) -> Option<(f64, f64)> {
        let last = self.last?;
        self.last = Some(at);
        Some((at.x - last.x, at.y - last.y))
    }

    pub fn end(&mut self) {
        self.last = None;
    }
}

/// Zoom change for a `wheel` event. `delta_mode` follows `WheelEvent`
/// (0 pixels, 1 lines, 2 pages). Scrolling down zooms out.
pub fn wheel_zoom_delta(delta_y: f64, delta_mode: u32) -> f64 {
    let pixels = match delta_mode {
        1 => delta_y * WHEEL_LINE_PIXELS,
        2 => delta_y * WHEEL_PAGE_PIXELS,
        _ => delta_y,
    };
    (-pixels / WHEEL_PIXELS_PER_ZOOM).clamp(-1.0, 1.0)
}
