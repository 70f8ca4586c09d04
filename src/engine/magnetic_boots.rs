//! Magnetic boots worn by an EVA character.
//!
//! The host drives this once per fixed physics step. It owns the wearer, the
//! bodies and the collision state; the boots only read positions and hand back
//! forces for the host to apply.
//!
//! Two modes:
//! - **Attraction**: no contact this step. Nearby bodies pull the wearer with
//!   an inverse-square force, split evenly across both feet. Optionally each
//!   body gets the opposite pull.
//! - **Adhesion**: the wearer touches a body. A fixed force of the current
//!   strength presses the feet onto the contact along its normal, with the
//!   opposite force on the touched body. The host should treat the wearer as
//!   grounded while this holds.

use glam::Vec3;

use crate::{
    debug_print,
    engine::{
        config::BootsConfig,
        error::Result,
        physics::{
            attraction::{combine, Attraction},
            candidates::{CandidateSelector, ContainerQuery},
            physics_world::{BodyId, ContainerId},
        },
    },
    force_trace,
};

/// Whether a wearer has the boots, and whether they are switched on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Capability {
    #[default]
    Absent,
    Disabled,
    Enabled,
}

/// Where each boot is this step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Feet {
    pub left: Vec3,
    pub right: Vec3,
}

impl Feet {
    pub fn new(left: Vec3, right: Vec3) -> Self {
        Self { left, right }
    }

    /// Both feet at one point
    pub fn together(position: Vec3) -> Self {
        Self { left: position, right: position }
    }

    pub fn center(&self) -> Vec3 {
        (self.left + self.right) * 0.5
    }
}

/// A touch reported by the host's collision system
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub container: ContainerId,
    pub body: BodyId,
    pub point: Vec3,
    pub normal: Vec3,
}

/// Everything the host supplies for one step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BootsInput {
    pub position: Vec3,
    pub feet: Feet,
    /// The wearer's own container, never attracted to itself
    pub own_container: Option<ContainerId>,
    pub contact: Option<Contact>,
    /// Host-side gate, e.g. false while the character is on a ladder
    pub eligible: bool,
}

impl BootsInput {
    pub fn new(position: Vec3, feet: Feet) -> Self {
        Self {
            position,
            feet,
            own_container: None,
            contact: None,
            eligible: true,
        }
    }

    pub fn with_own_container(mut self, container: ContainerId) -> Self {
        self.own_container = Some(container);
        self
    }

    pub fn with_contact(mut self, contact: Contact) -> Self {
        self.contact = Some(contact);
        self
    }

    pub fn with_eligible(mut self, eligible: bool) -> Self {
        self.eligible = eligible;
        self
    }
}

/// A force applied at a world-space point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointForce {
    pub force: Vec3,
    pub point: Vec3,
}

/// Force the boots exert back on another body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyReaction {
    pub container: ContainerId,
    pub body: BodyId,
    pub force: Vec3,
    pub point: Vec3,
}

/// Result of one step
#[derive(Debug, Clone, PartialEq)]
pub struct BootsForces {
    /// Left foot, then right foot
    pub wearer: [PointForce; 2],
    pub reactions: Vec<BodyReaction>,
    /// Combined attraction before it is negated and split; zero in adhesion mode
    pub net_attraction: Vec3,
    pub estimated_range: f32,
    /// The host should mark the wearer as landed
    pub grounded: bool,
    pub candidates: usize,
}

impl BootsForces {
    pub fn total_on_wearer(&self) -> Vec3 {
        self.wearer[0].force + self.wearer[1].force
    }
}

/// The boots on one wearer
#[derive(Debug, Clone, Default)]
pub struct MagneticBoots {
    capability: Capability,
    config: BootsConfig,
}

impl MagneticBoots {
    /// Boots for one wearer, not yet attached. Fails if `config` does not
    /// validate.
    pub fn new(config: BootsConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            capability: Capability::Absent,
            config,
        })
    }

    pub fn capability(&self) -> Capability {
        self.capability
    }

    pub fn is_active(&self) -> bool {
        self.capability == Capability::Enabled
    }

    pub fn config(&self) -> &BootsConfig {
        &self.config
    }

    pub fn estimated_range(&self) -> f32 {
        self.config.magnet.estimated_range()
    }

    /// Give the wearer boots, switched off. No effect if already present.
    pub fn attach(&mut self) {
        if self.capability == Capability::Absent {
            self.capability = Capability::Disabled;
            debug_print!("MagneticBoots added");
        }
    }

    pub fn detach(&mut self) {
        if self.capability != Capability::Absent {
            self.capability = Capability::Absent;
            debug_print!("MagneticBoots removed");
        }
    }

    /// Flip the boots on or off. Returns whether they are now on; without
    /// boots this does nothing.
    pub fn toggle(&mut self) -> bool {
        self.capability = match self.capability {
            Capability::Absent => return false,
            Capability::Disabled => Capability::Enabled,
            Capability::Enabled => Capability::Disabled,
        };
        debug_print!("MagneticBoots toggled: {}", self.is_active());
        self.is_active()
    }

    /// Host hook: a crew member left a vessel. Only EVA characters get boots.
    pub fn on_crew_eva(&mut self, is_eva_character: bool) {
        if is_eva_character {
            self.attach();
        }
    }

    /// Host hook: an EVA character is boarding a vessel.
    pub fn on_crew_board(&mut self, is_eva_character: bool) {
        if is_eva_character {
            self.detach();
        }
    }

    pub fn set_strength(&mut self, strength_per_unit: f32) -> Result<()> {
        self.config.magnet = self.config.magnet.with_strength(strength_per_unit)?;
        Ok(())
    }

    pub fn increase_strength(&mut self) -> f32 {
        self.config.magnet.step_strength(1)
    }

    pub fn decrease_strength(&mut self) -> f32 {
        self.config.magnet.step_strength(-1)
    }

    /// Forces for this physics step, or `None` when the boots do nothing.
    pub fn step<Q>(&self, input: &BootsInput, query: &Q) -> Option<BootsForces>
    where
        Q: ContainerQuery + ?Sized,
    {
        if !self.is_active() || !input.eligible {
            return None;
        }

        let forces = match input.contact {
            Some(contact) => self.adhesion(input, &contact),
            None => self.attraction(input, query),
        };
        Some(forces)
    }

    fn adhesion(&self, input: &BootsInput, contact: &Contact) -> BootsForces {
        let strength = self.config.magnet.strength_per_unit;
        let normal = contact.normal.normalize_or_zero();

        let per_foot = PointForce { force: -normal * strength / 2.0, point: contact.point };
        let reaction = BodyReaction {
            container: contact.container,
            body: contact.body,
            force: normal * strength,
            point: contact.point,
        };

        force_trace!("Adhesion force: {} at {:?}", strength, input.position);

        BootsForces {
            wearer: [per_foot, per_foot],
            reactions: vec![reaction],
            net_attraction: Vec3::ZERO,
            estimated_range: self.estimated_range(),
            grounded: true,
            candidates: 0,
        }
    }

    fn attraction<Q>(&self, input: &BootsInput, query: &Q) -> BootsForces
    where
        Q: ContainerQuery + ?Sized,
    {
        let magnet = &self.config.magnet;
        let selector = CandidateSelector::new(self.config.container_range);
        let candidates = selector.select(query, input.position, input.own_container, magnet);

        let attractions: Vec<Attraction> = candidates
            .iter()
            .map(|c| magnet.attraction_to(input.position, c.position))
            .collect();
        let net = combine(&attractions);

        let reactions = if self.config.attract_bodies {
            candidates
                .iter()
                .zip(&attractions)
                .map(|(c, a)| BodyReaction {
                    container: c.container,
                    body: c.body,
                    force: a.force,
                    point: c.position,
                })
                .collect()
        } else {
            Vec::new()
        };

        force_trace!("Attraction force: {} from {} bodies", net.length(), candidates.len());

        BootsForces {
            wearer: [
                PointForce { force: -net / 2.0, point: input.feet.left },
                PointForce { force: -net / 2.0, point: input.feet.right },
            ],
            reactions,
            net_attraction: net,
            estimated_range: magnet.estimated_range(),
            grounded: false,
            candidates: candidates.len(),
        }
    }
}
