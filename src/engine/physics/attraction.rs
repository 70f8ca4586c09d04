use glam::Vec3;

/// Strength of the boots' field at `distance`, capped at `max_force`.
///
/// Falls off with the inverse square of the distance. A zero distance (or any
/// input that would produce infinity or NaN before the cap) yields `max_force`.
pub fn force_magnitude_at(distance: f32, strength_per_unit: f32, max_force: f32) -> f32 {
    if distance <= 0.0 {
        return max_force;
    }

    let raw = strength_per_unit / (distance * distance);
    if raw.is_nan() {
        return max_force;
    }
    raw.min(max_force)
}

/// True when a body at `distance` feels more than `min_detectable_force`.
pub fn is_in_range(distance: f32, strength_per_unit: f32, min_detectable_force: f32) -> bool {
    force_magnitude_at(distance, strength_per_unit, f32::INFINITY) > min_detectable_force
}

/// Distance at which the field drops to `min_detectable_force`.
///
/// Display only, filtering always goes through [`is_in_range`].
pub fn estimated_range(strength_per_unit: f32, min_detectable_force: f32) -> f32 {
    (strength_per_unit / min_detectable_force).sqrt()
}

/// A single attraction force between the wearer and one body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attraction {
    /// Normalized direction multiplied by the magnitude. Never NaN.
    pub force: Vec3,
}

impl Attraction {
    pub fn new(magnitude: f32, direction: Vec3) -> Self {
        let force = direction.normalize_or_zero() * magnitude;

        if force.is_finite() {
            Self { force }
        } else {
            Self { force: Vec3::ZERO }
        }
    }

    /// Attraction between a wearer at `self_position` and a body at `body_position`.
    ///
    /// The force points from the body towards the wearer. Negate it before
    /// applying it to the wearer; apply it as-is to pull the body in.
    pub fn to(
        self_position: Vec3,
        body_position: Vec3,
        strength_per_unit: f32,
        max_force: f32,
    ) -> Self {
        let distance = self_position.distance(body_position);
        let magnitude = force_magnitude_at(distance, strength_per_unit, max_force);
        Self::new(magnitude, self_position - body_position)
    }

    pub fn magnitude(&self) -> f32 {
        self.force.length()
    }
}

/// Sum of all attraction forces.
///
/// Forces are added in a canonical order so any permutation of the same
/// input produces the same bits.
pub fn combine(attractions: &[Attraction]) -> Vec3 {
    let mut forces: Vec<Vec3> = attractions.iter().map(|a| a.force).collect();
    forces.sort_by(|a, b| {
        a.x.total_cmp(&b.x)
            .then(a.y.total_cmp(&b.y))
            .then(a.z.total_cmp(&b.z))
    });

    forces.into_iter().fold(Vec3::ZERO, |sum, force| sum + force)
}

/// Net attraction on a wearer from every candidate position.
pub fn compute_net_attraction<I>(
    wearer_position: Vec3,
    candidates: I,
    strength_per_unit: f32,
    max_force: f32,
) -> Vec3
where
    I: IntoIterator<Item = Vec3>,
{
    let attractions: Vec<Attraction> = candidates
        .into_iter()
        .map(|body| Attraction::to(wearer_position, body, strength_per_unit, max_force))
        .collect();

    combine(&attractions)
}
