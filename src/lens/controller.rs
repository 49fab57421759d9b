use std::cell::Cell;
use std::f64::consts::PI;
use std::rc::Rc;

use super::state::{LensState, RadiusStep};
use crate::config::LensConfig;
use crate::render::{DrawingSurface, LayerHooks, Pixel, RenderEvent};
use crate::util::{clog, cwarn};

/// Capability to ask the map for another frame. Requests may be coalesced.
pub trait RedrawHandle {
    fn request_redraw(&self);
}

/// The lens circle for one frame, in device pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LensCircle {
    pub center: Pixel,
    pub radius: f64,
    pub ring_width: f64,
}

pub struct LensController {
    config: LensConfig,
    state: Cell<LensState>,
    // Set between a prerender save and its postrender restore.
    saved: Cell<bool>,
    redraw: Rc<dyn RedrawHandle>,
}

impl LensController {
    pub fn new(config: LensConfig, redraw: Rc<dyn RedrawHandle>) -> Self {
        Self {
            state: Cell::new(LensState::new(&config)),
            saved: Cell::new(false),
            config,
            redraw,
        }
    }

    pub fn state(&self) -> LensState {
        self.state.get()
    }

    pub fn radius(&self) -> f64 {
        self.state.get().radius
    }

    pub fn on_pointer_move(&self, pixel: Pixel) {
        let mut state = self.state.get();
        state.center = Some(pixel);
        self.state.set(state);
        self.redraw.request_redraw();
    }

    pub fn on_pointer_leave(&self) {
        let mut state = self.state.get();
        state.center = None;
        self.state.set(state);
        self.redraw.request_redraw();
    }

    /// Handles a `keydown` key. Returns `true` when the key adjusted the lens,
    /// in which case the caller should suppress the browser default.
    pub fn on_key_down(&self, key: &str) -> bool {
        let Some(step) = RadiusStep::from_key(key) else {
            return false;
        };
        let mut state = self.state.get();
        let before = state.radius;
        state.step_radius(step, &self.config);
        self.state.set(state);
        if state.radius != before {
            clog(&format!("lens radius: {} -> {}", before, state.radius));
        }
        self.redraw.request_redraw();
        true
    }

    /// Projects the lens through `transform` (event pixel to device pixel).
    ///
    /// The device radius is measured by transforming a second point on the
    /// circle, so any scale or rotation in `transform` is accounted for.
    pub fn lens_circle(&self, transform: impl Fn(Pixel) -> Pixel) -> Option<LensCircle> {
        let state = self.state.get();
        let center = state.center?;
        let pixel = transform(center);
        let offset = transform(center.offset(state.radius, 0.0));
        let radius = offset.distance(pixel);
        Some(LensCircle {
            center: pixel,
            radius,
            ring_width: self.config.ring_width * radius / state.radius,
        })
    }

    /// Saves the surface and clips it to the lens circle. With no pointer
    /// over the map the clip is empty and nothing of the layer is painted.
    pub fn before_layer_paint<S>(&self, event: &mut RenderEvent<'_, S>)
    where
        S: DrawingSurface + ?Sized,
    {
        if self.saved.get() {
            cwarn("lens: prerender without matching postrender, restoring stale state");
            event.surface().restore();
        }
        let circle = self.lens_circle(|p| event.transform_pixel(p));
        let surface = event.surface();
        surface.save();
        self.saved.set(true);
        surface.begin_path();
        if let Some(circle) = circle {
            surface.arc(circle.center.x, circle.center.y, circle.radius, 0.0, 2.0 * PI);
            surface.set_line_width(circle.ring_width);
            surface.set_stroke_style(&self.config.ring_color);
            surface.stroke();
        }
        surface.clip();
    }

    /// Restores the state saved by [`Self::before_layer_paint`].
    pub fn after_layer_paint<S>(&self, event: &mut RenderEvent<'_, S>)
    where
        S: DrawingSurface + ?Sized,
    {
        if self.saved.replace(false) {
            event.surface().restore();
        }
    }
}

impl<S: DrawingSurface + ?Sized> LayerHooks<S> for LensController {
    fn prerender(&self, event: &mut RenderEvent<'_, S>) {
        self.before_layer_paint(event);
    }

    fn postrender(&self, event: &mut RenderEvent<'_, S>) {
        self.after_layer_paint(event);
    }
}
