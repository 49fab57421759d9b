use std::ops::{Deref, DerefMut};

/// The subset of a 2D canvas context the renderer and lens draw through.
///
/// `save`/`restore` form a stack; every `save` must be matched by exactly one
/// `restore`, otherwise clip and style state leaks into later drawing.
pub trait DrawingSurface {
    fn save(&mut self);
    fn restore(&mut self);
    fn begin_path(&mut self);
    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64);
    fn set_line_width(&mut self, width: f64);
    fn set_stroke_style(&mut self, style: &str);
    fn stroke(&mut self);
    /// Intersects the clip region with the current path.
    fn clip(&mut self);
    fn set_global_alpha(&mut self, alpha: f64);
}

/// Saved drawing state, restored when the guard drops.
pub struct SaveGuard<'a, S: DrawingSurface + ?Sized> {
    surface: &'a mut S,
}

impl<'a, S: DrawingSurface + ?Sized> SaveGuard<'a, S> {
    pub fn new(surface: &'a mut S) -> Self {
        surface.save();
        Self { surface }
    }
}

impl<S: DrawingSurface + ?Sized> Deref for SaveGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: DrawingSurface + ?Sized> DerefMut for SaveGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: DrawingSurface + ?Sized> Drop for SaveGuard<'_, S> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}


#[cfg(test)]
mod tests {
    use super::recording::{Op, RecordingSurface};
    use super::*;

    #[test]
    fn guard_restores_on_drop() {
        let mut surface = RecordingSurface::default();
        {
            let mut guard = SaveGuard::new(&mut surface);
            guard.set_global_alpha(0.5);
        }
        assert_eq!(surface.depth, 0);
        assert_eq!(
            surface.ops,
            vec![Op::Save, Op::GlobalAlpha(0.5), Op::Restore]
        );
    }

    #[test]
    fn guard_restores_on_early_return() {
        fn paint(surface: &mut RecordingSurface, fail: bool) -> Result<(), &'static str> {
            let mut guard = SaveGuard::new(surface);
            guard.begin_path();
            if fail {
                return Err("tile decode failed");
            }
            guard.stroke();
            Ok(())
        }
        let mut surface = RecordingSurface::default();
        assert!(paint(&mut surface, true).is_err());
        assert_eq!(surface.depth, 0);
        assert_eq!(surface.count(&Op::Stroke), 0);
    }
}
