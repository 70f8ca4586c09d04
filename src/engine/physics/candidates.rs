use glam::Vec3;

use crate::engine::{
    config::MagnetConfig,
    physics::{
        attraction::is_in_range,
        physics_world::{BodyId, Container, ContainerId},
    },
};

/// Radius around the wearer inside which containers get a per-body check.
///
/// Roughly the host's physics bubble. Chosen large relative to any reachable
/// magnet range; it is a tunable approximation, not a derived bound.
pub const DEFAULT_CONTAINER_RANGE: f32 = 2500.0;

/// Coarse, container-level lookup by position.
pub trait ContainerQuery {
    /// Calls `visit` for every container strictly closer than `radius` to `center`.
    fn containers_within(&self, center: Vec3, radius: f32, visit: &mut dyn FnMut(&Container));
}

/// Linear scan over every container.
impl ContainerQuery for [Container] {
    fn containers_within(&self, center: Vec3, radius: f32, visit: &mut dyn FnMut(&Container)) {
        for container in self {
            if center.distance(container.position) < radius {
                visit(container);
            }
        }
    }
}

/// A body that passed both filter stages
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub container: ContainerId,
    pub body: BodyId,
    pub position: Vec3,
}

/// Two-stage filter producing the bodies the boots act on this step.
#[derive(Debug, Clone, Copy)]
pub struct CandidateSelector {
    pub container_range: f32,
}

impl Default for CandidateSelector {
    fn default() -> Self {
        Self { container_range: DEFAULT_CONTAINER_RANGE }
    }
}

impl CandidateSelector {
    pub fn new(container_range: f32) -> Self {
        Self { container_range }
    }

    /// Bodies near `wearer_position` that feel more than the detectable minimum.
    ///
    /// `exclude` is the wearer's own container; its bodies are never candidates.
    pub fn select<Q>(
        &self,
        query: &Q,
        wearer_position: Vec3,
        exclude: Option<ContainerId>,
        magnet: &MagnetConfig,
    ) -> Vec<Candidate>
    where
        Q: ContainerQuery + ?Sized,
    {
        let mut candidates = Vec::new();

        let mut visit = |container: &Container| {
            if Some(container.id) == exclude {
                return;
            }

            for body in &container.bodies {
                let distance = wearer_position.distance(body.position);
                if is_in_range(distance, magnet.strength_per_unit, magnet.min_detectable_force) {
                    candidates.push(Candidate {
                        container: container.id,
                        body: body.id,
                        position: body.position,
                    });
                }
            }
        };
        query.containers_within(wearer_position, self.container_range, &mut visit);

        candidates
    }
}
