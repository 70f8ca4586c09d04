pub mod config;
pub mod debug;
pub mod error;
pub mod magnetic_boots;
pub mod physics;

pub use physics::*;
pub use debug::{toggle_debug_text, toggle_force_trace, set_debug_text, set_force_trace};
