//! The historical-imagery lens: pointer/keyboard driven state and the
//! prerender/postrender pair that clips a layer to the lens circle.

pub mod controller;
pub mod state;

pub use controller::{LensCircle, LensController, RedrawHandle};
pub use state::{LensState, RadiusStep};
