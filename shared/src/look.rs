//! Mouse look: yaw turns the body, pitch tilts only the camera.

use bevy::prelude::*;

use crate::physics::CharacterBody;
use crate::settings::ControllerSettings;
use crate::state::PlayerState;

/// Apply this frame's look input.
///
/// Yaw rotates the body (which steers movement); pitch accumulates in `state.pitch`, clamped to
/// `±pitch_limit` degrees.
pub fn apply_look(
    state: &mut PlayerState,
    settings: &ControllerSettings,
    body: &mut CharacterBody,
    dt: f32,
) {
    let mouse_x = state.look_input.x * settings.mouse_sensitivity * dt;
    let mouse_y = state.look_input.y * settings.mouse_sensitivity * dt;

    if !mouse_y.is_nan() {
        state.pitch = (state.pitch + mouse_y).clamp(-settings.pitch_limit, settings.pitch_limit);
    }

    // Right is a clockwise turn seen from above, i.e. negative about +Y.
    if mouse_x.is_finite() {
        body.yaw = (body.yaw - mouse_x.to_radians()).rem_euclid(std::f32::consts::TAU);
    }
}

/// Camera rotation relative to the body.
#[inline]
pub fn camera_local_rotation(pitch_degrees: f32) -> Quat {
    Quat::from_rotation_x(pitch_degrees.to_radians())
}

/// World-space camera rotation for a body and pitch.
#[inline]
pub fn camera_rotation(body: &CharacterBody, pitch_degrees: f32) -> Quat {
    body.rotation() * camera_local_rotation(pitch_degrees)
}
