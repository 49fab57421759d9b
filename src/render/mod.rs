//! Frame plumbing shared by the map renderer and the lens: pixel geometry,
//! the drawing-surface abstraction and the per-layer hook dispatch.

pub mod geometry;
pub mod hooks;
pub mod surface;

pub use geometry::{Pixel, PixelTransform};
pub use hooks::{paint_layer, LayerHooks, RenderEvent};
pub use surface::{DrawingSurface, SaveGuard};

#[cfg(test)]
pub use surface::recording::{Op, RecordingSurface};
