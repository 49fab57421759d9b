use std::rc::Rc;

use super::geometry::{Pixel, PixelTransform};
use super::surface::DrawingSurface;

/// What a layer hook sees for one layer paint: the shared surface and the
/// transform from event (CSS) pixels to the surface's device pixels.
pub struct RenderEvent<'a, S: DrawingSurface + ?Sized> {
    surface: &'a mut S,
    transform: PixelTransform,
}

impl<'a, S: DrawingSurface + ?Sized> RenderEvent<'a, S> {
    pub fn new(surface: &'a mut S, transform: PixelTransform) -> Self {
        Self { surface, transform }
    }

    pub fn surface(&mut self) -> &mut S {
        self.surface
    }

    pub fn transform(&self) -> PixelTransform {
        self.transform
    }

    /// Maps an event pixel into the drawing surface's pixel space.
    pub fn transform_pixel(&self, pixel: Pixel) -> Pixel {
        self.transform.apply(pixel)
    }
}

/// Callbacks wrapped around a single layer's paint.
pub trait LayerHooks<S: DrawingSurface + ?Sized> {
    fn prerender(&self, event: &mut RenderEvent<'_, S>);
    fn postrender(&self, event: &mut RenderEvent<'_, S>);
}

struct PostrenderGuard<'a, 'h, S: DrawingSurface + ?Sized> {
    event: RenderEvent<'a, S>,
    hooks: &'h [Rc<dyn LayerHooks<S>>],
}

impl<S: DrawingSurface + ?Sized> Drop for PostrenderGuard<'_, '_, S> {
    fn drop(&mut self) {
        for hook in self.hooks.iter().rev() {
            hook.postrender(&mut self.event);
        }
    }
}

/// Runs `paint` between the prerender and postrender hooks of a layer.
///
/// Postrender hooks run in reverse registration order and are dispatched from
/// a drop guard, so they still run when `paint` returns early or unwinds.
pub fn paint_layer<S, R>(
    surface: &mut S,
    transform: PixelTransform,
    hooks: &[Rc<dyn LayerHooks<S>>],
    paint: impl FnOnce(&mut S) -> R,
) -> R
where
    S: DrawingSurface + ?Sized,
{
    let mut guard = PostrenderGuard {
        event: RenderEvent::new(surface, transform),
        hooks,
    };
    for hook in hooks {
        hook.prerender(&mut guard.event);
    }
    paint(guard.event.surface())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    use super::*;
    use crate::render::{Op, RecordingSurface};

    struct Tracer {
        name: &'static str,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl LayerHooks<RecordingSurface> for Tracer {
        fn prerender(&self, event: &mut RenderEvent<'_, RecordingSurface>) {
            event.surface().save();
            self.log.borrow_mut().push(format!("pre:{}", self.name));
        }

        fn postrender(&self, event: &mut RenderEvent<'_, RecordingSurface>) {
            event.surface().restore();
            self.log.borrow_mut().push(format!("post:{}", self.name));
        }
    }

    fn tracers(log: &Rc<RefCell<Vec<String>>>) -> Vec<Rc<dyn LayerHooks<RecordingSurface>>> {
        vec![
            Rc::new(Tracer { name: "a", log: log.clone() }),
            Rc::new(Tracer { name: "b", log: log.clone() }),
        ]
    }

    #[test]
    fn hooks_wrap_paint_in_nested_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let hooks = tracers(&log);
        let mut surface = RecordingSurface::default();
        let painted = paint_layer(&mut surface, PixelTransform::identity(), &hooks, |s| {
            log.borrow_mut().push("paint".into());
            s.stroke();
            7
        });
        assert_eq!(painted, 7);
        assert_eq!(
            *log.borrow(),
            vec!["pre:a", "pre:b", "paint", "post:b", "post:a"]
        );
        assert_eq!(surface.depth, 0);
    }

    #[test]
    fn postrender_runs_when_paint_fails() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let hooks = tracers(&log);
        let mut surface = RecordingSurface::default();
        let result: Result<(), &str> =
            paint_layer(&mut surface, PixelTransform::identity(), &hooks, |_| {
                Err("tile fetch failed")
            });
        assert!(result.is_err());
        assert_eq!(surface.depth, 0);
        assert_eq!(log.borrow().last().map(String::as_str), Some("post:a"));
    }

    #[test]
    fn postrender_runs_when_paint_panics() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let hooks = tracers(&log);
        let mut surface = RecordingSurface::default();
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            paint_layer(
                &mut surface,
                PixelTransform::identity(),
                &hooks,
                |_| -> Result<(), String> { panic!("injected paint fault") },
            )
        }));
        assert!(outcome.is_err());
        assert_eq!(surface.depth, 0);
        assert_eq!(surface.count(&Op::Restore), 2);
    }

    #[test]
    fn transform_pixel_uses_event_transform() {
        let mut surface = RecordingSurface::default();
        let event = RenderEvent::new(&mut surface, PixelTransform::scale(2.0));
        assert_eq!(
            event.transform_pixel(Pixel::new(10.0, 20.0)),
            Pixel::new(20.0, 40.0)
        );
    }
}
