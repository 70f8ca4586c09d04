pub mod attraction;
pub mod candidates;
pub mod physics_world;
pub mod spatial_grid;

pub use attraction::*;
pub use candidates::*;
pub use physics_world::*;
pub use spatial_grid::*;
