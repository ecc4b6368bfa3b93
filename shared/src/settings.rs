//! Player controller tuning.
//!
//! Loaded from a RON file by the client (`assets/config/controller.ron`). Every field has a
//! default, so a config file only needs to list the values it overrides.

use std::fmt;
use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// All tunables consumed by the movement, look, footstep, bob and targeting steps.
#[derive(Resource, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ControllerSettings {
    /// Base walk speed in units per second.
    pub move_speed: f32,
    /// Speed multiplier while sprint is held.
    pub sprint_speed_multiplier: f32,
    /// Rate at which the current speed approaches its target (per second).
    pub sprint_transit_speed: f32,
    /// Downward acceleration magnitude.
    pub gravity: f32,
    /// Apex height of a jump.
    pub jump_height: f32,
    /// Vertical velocity held while grounded so the body stays stuck to slopes.
    pub grounded_stick_velocity: f32,
    /// Look scaling, in degrees per input unit per second.
    pub mouse_sensitivity: f32,
    /// Camera pitch clamp in degrees (applied symmetrically).
    pub pitch_limit: f32,
    /// Base seconds between footsteps at walking speed.
    pub step_interval: f32,
    /// Lower bound on the rescheduled footstep interval.
    pub min_step_interval: f32,
    /// Length of the downward surface probe.
    pub footstep_probe_distance: f32,
    /// Below this speed the player counts as standing still.
    pub min_move_speed: f32,
    pub bob_frequency: f32,
    pub bob_amplitude: f32,
    /// Length of the interaction ray cast from the camera.
    pub interaction_distance: f32,
    /// Camera height above the body origin.
    pub eye_height: f32,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            sprint_speed_multiplier: 2.0,
            sprint_transit_speed: 5.0,
            gravity: 9.81,
            jump_height: 2.0,
            grounded_stick_velocity: -2.0,
            mouse_sensitivity: 10.0,
            pitch_limit: 90.0,
            step_interval: 0.5,
            min_step_interval: 0.1,
            footstep_probe_distance: 5.0,
            min_move_speed: 0.1,
            bob_frequency: 1.0,
            bob_amplitude: 1.0,
            interaction_distance: 3.0,
            eye_height: 1.6,
        }
    }
}

/// Failure to load settings from disk.
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(ron::error::SpannedError),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "failed to read controller settings: {e}"),
            SettingsError::Parse(e) => write!(f, "failed to parse controller settings: {e}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<ron::error::SpannedError> for SettingsError {
    fn from(e: ron::error::SpannedError) -> Self {
        SettingsError::Parse(e)
    }
}

impl ControllerSettings {
    /// Parse settings from RON text. Missing fields take their defaults.
    pub fn from_ron_str(text: &str) -> Result<Self, ron::error::SpannedError> {
        let settings: ControllerSettings = ron::from_str(text)?;
        Ok(settings.sanitized())
    }

    /// Read and parse a RON settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Ok(Self::from_ron_str(&text)?)
    }

    /// Replace values the per-frame math cannot tolerate with their defaults.
    ///
    /// Multipliers and intervals must stay strictly positive: the footstep reschedule divides
    /// by the speed multiplier.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        fn non_negative(value: &mut f32, fallback: f32) {
            if !value.is_finite() || *value < 0.0 {
                *value = fallback;
            }
        }
        fn positive(value: &mut f32, fallback: f32) {
            if !value.is_finite() || *value <= 0.0 {
                *value = fallback;
            }
        }

        non_negative(&mut self.move_speed, defaults.move_speed);
        positive(&mut self.sprint_speed_multiplier, defaults.sprint_speed_multiplier);
        non_negative(&mut self.sprint_transit_speed, defaults.sprint_transit_speed);
        non_negative(&mut self.gravity, defaults.gravity);
        non_negative(&mut self.jump_height, defaults.jump_height);
        non_negative(&mut self.mouse_sensitivity, defaults.mouse_sensitivity);
        non_negative(&mut self.pitch_limit, defaults.pitch_limit);
        non_negative(&mut self.step_interval, defaults.step_interval);
        positive(&mut self.min_step_interval, defaults.min_step_interval);
        non_negative(&mut self.footstep_probe_distance, defaults.footstep_probe_distance);
        non_negative(&mut self.min_move_speed, defaults.min_move_speed);
        non_negative(&mut self.bob_frequency, defaults.bob_frequency);
        non_negative(&mut self.bob_amplitude, defaults.bob_amplitude);
        non_negative(&mut self.interaction_distance, defaults.interaction_distance);
        non_negative(&mut self.eye_height, defaults.eye_height);
        if !self.grounded_stick_velocity.is_finite() {
            self.grounded_stick_velocity = defaults.grounded_stick_velocity;
        }
        self.pitch_limit = self.pitch_limit.min(90.0);

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings = ControllerSettings::from_ron_str("(move_speed: 7.5, jump_height: 1.0)")
            .expect("valid ron");

        assert_eq!(settings.move_speed, 7.5);
        assert_eq!(settings.jump_height, 1.0);
        assert_eq!(settings.step_interval, 0.5);
        assert_eq!(settings.interaction_distance, 3.0);
    }

    #[test]
    fn test_default_values_round_out_file() {
        let settings = ControllerSettings::from_ron_str("(move_speed: 5.0)").expect("valid ron");
        assert_eq!(settings, ControllerSettings::default());
    }

    #[test]
    fn test_bad_values_are_replaced() {
        let settings = ControllerSettings::from_ron_str(
            "(sprint_speed_multiplier: 0.0, min_step_interval: -1.0, gravity: -3.0, pitch_limit: 170.0)",
        )
        .expect("valid ron");

        assert_eq!(settings.sprint_speed_multiplier, 2.0);
        assert_eq!(settings.min_step_interval, 0.1);
        assert_eq!(settings.gravity, 9.81);
        assert_eq!(settings.pitch_limit, 90.0);
    }

    #[test]
    fn test_parse_error_is_reported() {
        assert!(ControllerSettings::from_ron_str("(move_speed: \"fast\")").is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ControllerSettings::load("definitely/not/here.ron").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }
}
