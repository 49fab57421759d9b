pub mod app;
pub mod attribution_panel;
pub mod lens_hint;
pub mod map_controls;

pub use app::App;
