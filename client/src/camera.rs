//! First-person camera bob.
//!
//! Runs after the frame's movement has settled; the controller's late step supplies the gains.

use std::f32::consts::TAU;

use bevy::prelude::*;
use interior_shared::PlayerController;

use crate::player::{LocalPlayer, PlayerCamera};

/// Bob cycles per second at unit frequency gain
const BOB_RATE: f32 = 1.8;
/// Vertical bob at unit amplitude gain (meters)
const BOB_HEIGHT: f32 = 0.035;
/// Side-to-side sway at unit amplitude gain (meters)
const BOB_SWAY: f32 = 0.02;
/// How fast the camera settles back to the eye when the bob stops
const SETTLE_RATE: f32 = 10.0;

/// Offset the camera from the eye position by the current bob
pub fn apply_camera_bob(
    time: Res<Time>,
    players: Query<&PlayerController, With<LocalPlayer>>,
    mut cameras: Query<(&mut PlayerCamera, &mut Transform)>,
) {
    let Ok(controller) = players.single() else {
        return;
    };
    let Ok((mut camera, mut transform)) = cameras.single_mut() else {
        return;
    };

    let bob = controller.late_update();
    let dt = time.delta_secs();

    if bob.frequency > 0.0 && bob.amplitude > 0.0 {
        camera.bob_phase = (camera.bob_phase + bob.frequency * BOB_RATE * TAU * dt).rem_euclid(2.0 * TAU);
        let offset = Vec3::new(
            (camera.bob_phase * 0.5).sin() * BOB_SWAY,
            camera.bob_phase.sin().abs() * BOB_HEIGHT,
            0.0,
        ) * bob.amplitude;
        transform.translation = camera.eye_offset + offset;
    } else {
        let t = 1.0 - (-SETTLE_RATE * dt).exp();
        transform.translation = transform.translation.lerp(camera.eye_offset, t);
        camera.bob_phase = 0.0;
    }
}
