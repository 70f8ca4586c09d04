//! Boots configuration.
//!
//! The magnet strength lives on a fixed slider: `[0.05, 1.0]` in steps of
//! `0.05`. The slider's bounds double as the force model's limits, the lower
//! bound being the weakest force still felt and the upper bound the cap.
//!
//! Configs can be written by hand as JSON; every field is optional:
//!
//! ```json
//! {
//!   "magnet": { "strength_per_unit": 0.25 },
//!   "container_range": 2500.0,
//!   "attract_bodies": true
//! }
//! ```

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::engine::{
    error::{ConfigError, Result},
    physics::{
        attraction::{estimated_range, force_magnitude_at, is_in_range, Attraction},
        candidates::DEFAULT_CONTAINER_RANGE,
    },
};

/// Slack when checking that a strength sits on a slider step
const STEP_TOLERANCE: f32 = 1.0e-3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MagnetConfig {
    /// Field strength per boot, arbitrary units
    pub strength_per_unit: f32,
    /// Weakest force the boots register, also the slider minimum
    pub min_detectable_force: f32,
    /// Force cap, also the slider maximum
    pub max_force: f32,
    pub strength_step: f32,
}

impl Default for MagnetConfig {
    fn default() -> Self {
        Self {
            strength_per_unit: 0.1,
            min_detectable_force: 0.05,
            max_force: 1.0,
            strength_step: 0.05,
        }
    }
}

impl MagnetConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy with a new strength, rejecting values off the slider.
    pub fn with_strength(mut self, strength_per_unit: f32) -> Result<Self> {
        self.strength_per_unit = strength_per_unit;
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        self.validate_bounds()?;

        let Self {
            strength_per_unit,
            min_detectable_force: min,
            max_force: max,
            strength_step: step,
        } = *self;

        let slack = STEP_TOLERANCE * step;
        if !(strength_per_unit >= min - slack && strength_per_unit <= max + slack) {
            return Err(ConfigError::StrengthOutOfRange { value: strength_per_unit, min, max });
        }

        let steps = (strength_per_unit - min) / step;
        if (steps - steps.round()).abs() > STEP_TOLERANCE {
            return Err(ConfigError::StrengthOffStep { value: strength_per_unit, min, step });
        }

        Ok(())
    }

    /// Slider ends and step, without looking at the current strength
    fn validate_bounds(&self) -> Result<()> {
        let (min, max, step) = (self.min_detectable_force, self.max_force, self.strength_step);

        if !(min.is_finite() && max.is_finite() && min > 0.0 && min <= max) {
            return Err(ConfigError::InvalidBounds(format!(
                "need 0 < min_detectable_force <= max_force, got {min} and {max}"
            )));
        }
        if !(step.is_finite() && step > 0.0) {
            return Err(ConfigError::InvalidBounds(format!(
                "strength_step must be > 0, got {step}"
            )));
        }
        Ok(())
    }

    /// Number of slider notches above the minimum
    fn max_steps(&self) -> i32 {
        let span = (self.max_force - self.min_detectable_force) / self.strength_step;
        (span + STEP_TOLERANCE).floor() as i32
    }

    /// Moves the slider `steps` notches (negative goes down), clamped to its ends.
    ///
    /// Inverted or non-finite slider bounds leave the strength untouched.
    pub fn step_strength(&mut self, steps: i32) -> f32 {
        if self.validate_bounds().is_err() {
            return self.strength_per_unit;
        }
        let offset = self.strength_per_unit - self.min_detectable_force;
        let current = (offset / self.strength_step).round() as i32;
        let target = current.saturating_add(steps).clamp(0, self.max_steps().max(0));

        self.strength_per_unit =
            (self.min_detectable_force + target as f32 * self.strength_step).min(self.max_force);
        self.strength_per_unit
    }

    pub fn force_at(&self, distance: f32) -> f32 {
        force_magnitude_at(distance, self.strength_per_unit, self.max_force)
    }

    pub fn in_range(&self, distance: f32) -> bool {
        is_in_range(distance, self.strength_per_unit, self.min_detectable_force)
    }

    pub fn estimated_range(&self) -> f32 {
        estimated_range(self.strength_per_unit, self.min_detectable_force)
    }

    pub fn attraction_to(&self, self_position: Vec3, body_position: Vec3) -> Attraction {
        Attraction::to(self_position, body_position, self.strength_per_unit, self.max_force)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootsConfig {
    pub magnet: MagnetConfig,
    /// Containers further than this are skipped before any per-body check
    pub container_range: f32,
    /// Pull candidate bodies towards the wearer with the opposite force
    pub attract_bodies: bool,
}

impl Default for BootsConfig {
    fn default() -> Self {
        Self {
            magnet: MagnetConfig::default(),
            container_range: DEFAULT_CONTAINER_RANGE,
            attract_bodies: false,
        }
    }
}

impl BootsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_magnet(mut self, magnet: MagnetConfig) -> Self {
        self.magnet = magnet;
        self
    }

    /// Must cover the magnet's reach at full strength, see [`BootsConfig::validate`].
    pub fn with_container_range(mut self, container_range: f32) -> Self {
        self.container_range = container_range;
        self
    }

    pub fn with_attract_bodies(mut self, attract_bodies: bool) -> Self {
        self.attract_bodies = attract_bodies;
        self
    }

    /// Checks the magnet, then that `container_range` reaches at least as far
    /// as the magnet can at the top of the slider. A shorter range would drop
    /// in-range bodies at the container stage.
    pub fn validate(&self) -> Result<()> {
        self.magnet.validate()?;
        let range = self.container_range;
        if !(range.is_finite() && range > 0.0) {
            return Err(ConfigError::InvalidContainerRange(range));
        }

        let reach = estimated_range(self.magnet.max_force, self.magnet.min_detectable_force);
        if range < reach {
            return Err(ConfigError::ContainerRangeTooShort { range, reach });
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(MagnetConfig::default().validate().is_ok());
        assert!(BootsConfig::default().validate().is_ok());
    }

    #[test]
    fn strength_must_sit_on_the_slider() {
        assert!(MagnetConfig::new().with_strength(0.35).is_ok());
        assert!(MagnetConfig::new().with_strength(1.0).is_ok());
        assert!(matches!(
            MagnetConfig::new().with_strength(1.2),
            Err(ConfigError::StrengthOutOfRange { .. })
        ));
        assert!(matches!(
            MagnetConfig::new().with_strength(0.01),
            Err(ConfigError::StrengthOutOfRange { .. })
        ));
        assert!(matches!(
            MagnetConfig::new().with_strength(0.12),
            Err(ConfigError::StrengthOffStep { .. })
        ));
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let magnet = MagnetConfig { min_detectable_force: 2.0, ..MagnetConfig::default() };
        assert!(matches!(magnet.validate(), Err(ConfigError::InvalidBounds(_))));

        let magnet = MagnetConfig { strength_step: 0.0, ..MagnetConfig::default() };
        assert!(matches!(magnet.validate(), Err(ConfigError::InvalidBounds(_))));
    }

    #[test]
    fn stepping_clamps_at_the_ends() {
        let mut magnet = MagnetConfig::default();
        assert_relative_eq!(magnet.step_strength(1), 0.15, epsilon = 1.0e-6);
        assert_relative_eq!(magnet.step_strength(-10), 0.05, epsilon = 1.0e-6);
        assert_relative_eq!(magnet.step_strength(100), 1.0, epsilon = 1.0e-6);
        assert!(magnet.validate().is_ok());
    }

    #[test]
    fn json_fills_missing_fields() {
        let json = r#"{ "magnet": { "strength_per_unit": 0.25 }, "attract_bodies": true }"#;
        let config = BootsConfig::from_json_str(json).unwrap();
        assert_relative_eq!(config.magnet.strength_per_unit, 0.25);
        assert_relative_eq!(config.magnet.max_force, 1.0);
        assert_eq!(config.container_range, DEFAULT_CONTAINER_RANGE);
        assert!(config.attract_bodies);

        let round = BootsConfig::from_json_str(&config.to_json_string().unwrap()).unwrap();
        assert_eq!(round, config);
    }

    #[test]
    fn bad_json_is_reported() {
        assert!(matches!(BootsConfig::from_json_str("{ nope"), Err(ConfigError::Parse(_))));
        assert!(matches!(
            BootsConfig::from_json_str(r#"{ "container_range": -1.0 }"#),
            Err(ConfigError::InvalidContainerRange(_))
        ));
        assert!(matches!(
            BootsConfig::load("/definitely/not/here.json"),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn stepping_with_broken_bounds_is_a_no_op() {
        let mut magnet = MagnetConfig {
            min_detectable_force: 1.0,
            max_force: 0.5,
            ..MagnetConfig::default()
        };
        assert_eq!(magnet.step_strength(1), 0.1);
        assert_eq!(magnet.step_strength(-3), 0.1);

        let mut magnet = MagnetConfig { strength_step: f32::NAN, ..MagnetConfig::default() };
        assert_eq!(magnet.step_strength(2), 0.1);
    }

    #[test]
    fn stepping_from_off_slider_snaps_back_on() {
        let mut magnet = MagnetConfig { strength_per_unit: 7.0, ..MagnetConfig::default() };
        assert_relative_eq!(magnet.step_strength(0), 1.0, epsilon = 1.0e-6);
        assert!(magnet.validate().is_ok());
    }

    #[test]
    fn container_range_must_cover_the_magnet_reach() {
        // Full strength reaches sqrt(1.0 / 0.05) ~ 4.47
        let short = BootsConfig::default().with_container_range(0.5);
        assert!(matches!(
            short.validate(),
            Err(ConfigError::ContainerRangeTooShort { range, .. }) if range == 0.5
        ));
        assert!(matches!(
            BootsConfig::from_json_str(r#"{ "container_range": 4.0 }"#),
            Err(ConfigError::ContainerRangeTooShort { .. })
        ));
        assert!(BootsConfig::default().with_container_range(5.0).validate().is_ok());
    }
}
