//! Interactive two-layer tile map with a circular lens that reveals the
//! historical layer under the pointer.

pub mod components;
pub mod config;
pub mod error;
pub mod lens;
pub mod map;
pub mod render;
pub mod util;
