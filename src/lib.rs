pub mod engine;

pub use engine::{
    config::{BootsConfig, MagnetConfig},
    error::{ConfigError, Result},
    magnetic_boots::{
        BodyReaction, BootsForces, BootsInput, Capability, Contact, Feet, MagneticBoots,
        PointForce,
    },
    physics::attraction::{
        combine, compute_net_attraction, estimated_range, force_magnitude_at, is_in_range,
        Attraction,
    },
    physics::candidates::{Candidate, CandidateSelector, ContainerQuery, DEFAULT_CONTAINER_RANGE},
    physics::physics_world::{Body, BodyId, Container, ContainerId, PhysicsWorld},
    physics::spatial_grid::{GridConfig, SpatialGrid},
};
