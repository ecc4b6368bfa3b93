//! Speed-driven camera noise gains.

use crate::settings::ControllerSettings;

/// Gains handed to the camera-noise effect.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BobParams {
    pub frequency: f32,
    pub amplitude: f32,
}

impl BobParams {
    pub const ZERO: BobParams = BobParams {
        frequency: 0.0,
        amplitude: 0.0,
    };
}

/// Bob gains for the settled motion of this frame. Zero when airborne or standing still.
pub fn camera_bob(
    settings: &ControllerSettings,
    grounded: bool,
    speed: f32,
    speed_multiplier: f32,
) -> BobParams {
    if grounded && speed > settings.min_move_speed {
        BobParams {
            frequency: settings.bob_frequency * speed_multiplier,
            amplitude: settings.bob_amplitude * speed_multiplier,
        }
    } else {
        BobParams::ZERO
    }
}
