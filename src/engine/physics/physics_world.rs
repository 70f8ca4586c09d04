use glam::Vec3;

use crate::engine::{
    magnetic_boots::{BootsForces, PointForce},
    physics::candidates::ContainerQuery,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContainerId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId(pub u32);

/// A point mass owned by the host simulation (a vessel part, an EVA kerbal)
#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyId,

    pub position: Vec3,
    pub velocity: Vec3,

    pub mass: f32,

    // Internal state
    pub(crate) force_accumulator: Vec3,
}

impl Body {
    pub fn new(position: Vec3, mass: f32) -> Self {
        Self {
            id: BodyId(0),
            position,
            velocity: Vec3::ZERO,
            mass: mass.max(0.001), // Prevent division by zero
            force_accumulator: Vec3::ZERO,
        }
    }

    /// Set the initial velocity
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Apply a force to this body (will be integrated next physics step)
    pub fn apply_force(&mut self, force: Vec3) {
        self.force_accumulator += force;
    }

    pub fn pending_force(&self) -> Vec3 {
        self.force_accumulator
    }

    pub fn clear_forces(&mut self) {
        self.force_accumulator = Vec3::ZERO;
    }

    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * self.velocity.length_squared()
    }
}

/// A coarse grouping of bodies sharing an approximate position (a vessel)
#[derive(Debug, Clone)]
pub struct Container {
    pub id: ContainerId,
    pub name: String,
    /// Mass-weighted centre of the member bodies, refreshed every step
    pub position: Vec3,
    pub bodies: Vec<Body>,
}

impl Container {
    pub fn new(name: &str) -> Self {
        Self {
            id: ContainerId(0),
            name: name.to_string(),
            position: Vec3::ZERO,
            bodies: Vec::new(),
        }
    }

    pub fn with_body(mut self, body: Body) -> Self {
        self.bodies.push(body);
        self
    }

    pub fn total_mass(&self) -> f32 {
        self.bodies.iter().map(|b| b.mass).sum()
    }

    pub fn get_body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn get_body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    fn recenter(&mut self) {
        let total_mass = self.total_mass();
        if total_mass > 0.0 {
            let weighted = self
                .bodies
                .iter()
                .fold(Vec3::ZERO, |sum, b| sum + b.position * b.mass);
            self.position = weighted / total_mass;
        }
    }
}

/// Stand-in for the host simulation: owns every container and integrates
/// point masses once per fixed step. No collision response.
pub struct PhysicsWorld {
    containers: Vec<Container>,
    next_container_id: u32,
    next_body_id: u32,
    substeps: u32,
}

impl PhysicsWorld {
    /// Create a new physics world
    pub fn new() -> Self {
        Self {
            containers: Vec::new(),
            next_container_id: 0,
            next_body_id: 0,
            substeps: 1,
        }
    }

    /// Add a container, assigning fresh ids to it and all of its bodies
    pub fn add_container(&mut self, mut container: Container) -> ContainerId {
        let id = ContainerId(self.next_container_id);
        self.next_container_id += 1;

        container.id = id;
        for body in &mut container.bodies {
            body.id = BodyId(self.next_body_id);
            self.next_body_id += 1;
        }
        container.recenter();
        self.containers.push(container);

        id
    }

    /// Remove a container from the physics world
    pub fn remove_container(&mut self, id: ContainerId) -> Option<Container> {
        let index = self.containers.iter().position(|c| c.id == id)?;
        Some(self.containers.remove(index))
    }

    pub fn get_container(&self, id: ContainerId) -> Option<&Container> {
        self.containers.iter().find(|c| c.id == id)
    }

    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    pub fn get_body(&self, container: ContainerId, body: BodyId) -> Option<&Body> {
        self.get_container(container)?.get_body(body)
    }

    pub fn get_body_mut(&mut self, container: ContainerId, body: BodyId) -> Option<&mut Body> {
        self.containers
            .iter_mut()
            .find(|c| c.id == container)?
            .get_body_mut(body)
    }

    /// Queue a force on a body. Returns false if the body no longer exists.
    pub fn apply_force(&mut self, container: ContainerId, body: BodyId, force: Vec3) -> bool {
        match self.get_body_mut(container, body) {
            Some(b) => {
                b.apply_force(force);
                true
            }
            None => false,
        }
    }

    /// Route the output of one boots step onto the wearer and the bodies it acts on.
    ///
    /// Point forces are applied at the body centre; the world has no rotation.
    pub fn apply_boots_forces(&mut self, wearer: (ContainerId, BodyId), forces: &BootsForces) {
        let (container, body) = wearer;
        for PointForce { force, .. } in &forces.wearer {
            self.apply_force(container, body, *force);
        }
        for reaction in &forces.reactions {
            self.apply_force(reaction.container, reaction.body, reaction.force);
        }
    }

    /// Step the simulation forward by dt seconds
    pub fn step(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }

        let sub_dt = dt / self.substeps as f32;

        // Queued forces are held constant across substeps
        for i in 0..self.substeps {
            let last = i + 1 == self.substeps;
            self.step_internal(sub_dt, last);
        }
    }

    fn step_internal(&mut self, dt: f32, clear_forces: bool) {
        for container in &mut self.containers {
            for body in &mut container.bodies {
                // Semi-implicit Euler: velocity first, then position
                let acceleration = body.force_accumulator / body.mass;
                body.velocity += acceleration * dt;
                body.position += body.velocity * dt;

                if clear_forces {
                    body.clear_forces();
                }
            }
            container.recenter();
        }
    }

    /// Set the number of physics substeps (higher = more accurate but slower)
    pub fn set_substeps(&mut self, substeps: u32) {
        self.substeps = substeps.max(1);
    }

    /// Get physics world statistics
    pub fn stats(&self) -> PhysicsStats {
        let total_containers = self.containers.len();
        let total_bodies = self.containers.iter().map(|c| c.bodies.len()).sum();
        let total_kinetic_energy = self
            .containers
            .iter()
            .flat_map(|c| c.bodies.iter())
            .map(|b| b.kinetic_energy())
            .sum();

        PhysicsStats {
            total_containers,
            total_bodies,
            total_kinetic_energy,
        }
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl ContainerQuery for PhysicsWorld {
    fn containers_within(&self, center: Vec3, radius: f32, visit: &mut dyn FnMut(&Container)) {
        self.containers.as_slice().containers_within(center, radius, visit);
    }
}

/// Physics world statistics for debugging
#[derive(Debug, Clone)]
pub struct PhysicsStats {
    pub total_containers: usize,
    pub total_bodies: usize,
    pub total_kinetic_energy: f32,
}
