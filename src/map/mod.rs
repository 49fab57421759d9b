//! The tile map the lens sits on: projection, sources, view, the canvas
//! renderer and the DOM session that wires input to it.

pub mod canvas;
pub mod interaction;
pub mod layer;
pub mod projection;
pub mod renderer;
pub mod scheduler;
pub mod session;
pub mod source;
pub mod tiles;
pub mod view;

pub use session::MapSession;
