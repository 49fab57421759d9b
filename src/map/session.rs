use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent, WheelEvent};
use yew::Callback;

use super::interaction::{wheel_zoom_delta, DragPan};
use super::renderer::MapRenderer;
use super::scheduler::RedrawScheduler;
use super::view::Size;
use crate::config::MapConfig;
use crate::error::MapError;
use crate::lens::{LensController, RedrawHandle};
use crate::render::Pixel;
use crate::util::clog;

/// A mounted map: renderer, lens and the DOM listeners driving them.
/// Dropping it detaches every listener and cancels pending frames.
pub struct MapSession {
    renderer: Rc<RefCell<MapRenderer>>,
    scheduler: Rc<RedrawScheduler>,
    container: HtmlElement,
    _listeners: Vec<EventListener>,
}

impl MapSession {
    pub fn mount(
        container: HtmlElement,
        canvas: HtmlCanvasElement,
        config: &MapConfig,
        on_radius: Callback<f64>,
    ) -> Result<Self, MapError> {
        let window = web_sys::window().ok_or(MapError::MissingWindow)?;
        let document = window.document().ok_or(MapError::MissingDocument)?;

        let scheduler = RedrawScheduler::new();
        let redraw: Rc<dyn RedrawHandle> = scheduler.clone();
        let renderer = Rc::new(RefCell::new(MapRenderer::new(
            canvas.clone(),
            config,
            redraw.clone(),
        )?));
        let lens = Rc::new(LensController::new(config.lens.clone(), redraw.clone()));
        {
            let mut r = renderer.borrow_mut();
            for (index, layer) in config.layers.iter().enumerate() {
                if layer.clipped_by_lens {
                    r.add_layer_hooks(index, lens.clone());
                }
            }
        }
        let draw: Rc<dyn Fn()> = {
            let renderer = Rc::downgrade(&renderer);
            Rc::new(move || {
                if let Some(renderer) = renderer.upgrade() {
                    if let Ok(mut r) = renderer.try_borrow_mut() {
                        r.render_frame();
                    }
                }
            })
        };
        scheduler.set_draw(draw);

        let drag = Rc::new(RefCell::new(DragPan::default()));
        let mut listeners = Vec::new();

        // lens follows the pointer; a held primary button also pans
        {
            let renderer = renderer.clone();
            let lens = lens.clone();
            let drag = drag.clone();
            let redraw = redraw.clone();
            listeners.push(EventListener::new(&container, "mousemove", move |event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let pixel = renderer.borrow().event_pixel(event);
                if let Some((dx, dy)) = drag.borrow_mut().drag_to(pixel) {
                    renderer.borrow_mut().view_mut().pan_by(dx, dy);
                    redraw.request_redraw();
                }
                lens.on_pointer_move(pixel);
            }));
        }
        {
            let lens = lens.clone();
            listeners.push(EventListener::new(&container, "mouseout", move |_| {
                lens.on_pointer_leave();
            }));
        }
        {
            let lens = lens.clone();
            let on_radius = on_radius.clone();
            listeners.push(EventListener::new_with_options(
                &document,
                "keydown",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                        return;
                    };
                    if lens.on_key_down(&event.key()) {
                        event.prevent_default();
                        on_radius.emit(lens.radius());
                    }
                },
            ));
        }
        {
            let renderer = renderer.clone();
            let drag = drag.clone();
            listeners.push(EventListener::new(&canvas, "mousedown", move |event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                if event.button() == 0 {
                    let pixel = renderer.borrow().event_pixel(event);
                    drag.borrow_mut().start(pixel);
                }
            }));
        }
        {
            let drag = drag.clone();
            listeners.push(EventListener::new(&window, "mouseup", move |_| {
                drag.borrow_mut().end();
            }));
        }
        {
            let renderer = renderer.clone();
            let redraw = redraw.clone();
            listeners.push(EventListener::new_with_options(
                &canvas,
                "wheel",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    let Some(event) = event.dyn_ref::<WheelEvent>() else {
                        return;
                    };
                    event.prevent_default();
                    let delta = wheel_zoom_delta(event.delta_y(), event.delta_mode());
                    let mut r = renderer.borrow_mut();
                    let anchor = r.event_pixel(event);
                    let size = r.css_size();
                    if r.view_mut().zoom_by(delta, anchor, size) {
                        redraw.request_redraw();
                    }
                },
            ));
        }
        for (target, kind) in [
            (window.unchecked_ref::<web_sys::EventTarget>(), "resize"),
            (document.unchecked_ref::<web_sys::EventTarget>(), "fullscreenchange"),
        ] {
            let redraw = redraw.clone();
            listeners.push(EventListener::new(target, kind, move |_| {
                redraw.request_redraw();
            }));
        }

        {
            let r = renderer.borrow();
            let size = r.css_size();
            let names: Vec<&str> = r.layers().iter().map(|l| l.name()).collect();
            clog(&format!(
                "map mounted: {}x{} css px, pixel ratio {}, layers [{}]",
                size.width,
                size.height,
                r.pixel_ratio(),
                names.join(", ")
            ));
        }
        on_radius.emit(lens.radius());
        scheduler.request_redraw();

        Ok(Self {
            renderer,
            scheduler,
            container,
            _listeners: listeners,
        })
    }

    /// Zooms around the viewport center.
    pub fn zoom_by(&self, delta: f64) {
        let changed = {
            let mut r = self.renderer.borrow_mut();
            let size: Size = r.css_size();
            let center = Pixel::new(size.width / 2.0, size.height / 2.0);
            r.view_mut().zoom_by(delta, center, size)
        };
        if changed {
            self.scheduler.request_redraw();
        }
    }

    pub fn toggle_fullscreen(&self) -> Result<(), MapError> {
        let document = web_sys::window()
            .ok_or(MapError::MissingWindow)?
            .document()
            .ok_or(MapError::MissingDocument)?;
        if document.fullscreen_element().is_some() {
            document.exit_fullscreen();
        } else {
            self.container.request_fullscreen()?;
        }
        Ok(())
    }
}

impl Drop for MapSession {
    fn drop(&mut self) {
        self.scheduler.stop();
    }
}
