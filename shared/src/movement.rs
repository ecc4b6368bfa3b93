//! Ground movement: smoothed sprint speed, jumping and gravity.

use bevy::prelude::*;

use crate::physics::CharacterBody;
use crate::settings::ControllerSettings;
use crate::state::PlayerState;

/// Move `current` toward `target` by the fraction `rate * dt` (clamped to 1).
///
/// Never overshoots: the result always lies between `current` and `target`.
#[inline]
pub fn smooth_toward(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    let t = (rate * dt).clamp(0.0, 1.0);
    current + (target - current) * t
}

/// Launch velocity reaching `jump_height` under `gravity`.
#[inline]
pub fn jump_velocity(jump_height: f32, gravity: f32) -> f32 {
    (jump_height * 2.0 * gravity).sqrt()
}

/// Pick the speed multiplier from the sprint button and ease `current_speed` toward it.
pub fn update_sprint(state: &mut PlayerState, settings: &ControllerSettings, dt: f32) -> f32 {
    state.current_speed_multiplier = if state.sprint_input {
        settings.sprint_speed_multiplier
    } else {
        1.0
    };

    let target = settings.move_speed * state.current_speed_multiplier;
    state.current_speed = smooth_toward(state.current_speed, target, settings.sprint_transit_speed, dt);
    state.current_speed
}

/// Integrate vertical velocity for this frame.
///
/// Grounded: stick to the ground, or launch if a jump is pending (consuming it).
/// Airborne: fall with no terminal velocity.
pub fn update_vertical_velocity(
    state: &mut PlayerState,
    settings: &ControllerSettings,
    grounded: bool,
    dt: f32,
) -> f32 {
    if grounded {
        state.vertical_velocity = settings.grounded_stick_velocity;

        if state.jump_input {
            state.vertical_velocity = jump_velocity(settings.jump_height, settings.gravity);
            state.jump_input = false;
        }
    } else {
        state.vertical_velocity -= settings.gravity * dt;
    }

    state.vertical_velocity
}

/// Horizontal direction for a move input, relative to the body's facing.
#[inline]
pub fn planar_direction(body: &CharacterBody, input: Vec2) -> Vec3 {
    body.right() * input.x + body.forward() * input.y
}

/// Displacement for this frame: facing-relative horizontal motion at the smoothed speed plus
/// the integrated vertical velocity.
pub fn ground_movement(
    state: &mut PlayerState,
    settings: &ControllerSettings,
    body: &CharacterBody,
    dt: f32,
) -> Vec3 {
    let speed = update_sprint(state, settings, dt);

    let mut velocity = planar_direction(body, state.move_input) * speed;
    velocity.y = update_vertical_velocity(state, settings, body.grounded, dt);

    velocity * dt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smoothing_converges_without_overshoot() {
        let mut speed = 0.0;
        let target = 10.0;
        let mut last = speed;
        for _ in 0..200 {
            speed = smooth_toward(speed, target, 5.0, 1.0 / 60.0);
            assert!(speed >= last);
            assert!(speed <= target);
            last = speed;
        }
        assert!((target - speed).abs() < 1e-3);

        // Decelerating from above the target
        let mut speed = 10.0;
        for _ in 0..200 {
            let next = smooth_toward(speed, 5.0, 5.0, 1.0 / 60.0);
            assert!(next <= speed && next >= 5.0);
            speed = next;
        }
    }

    #[test]
    fn test_large_step_lands_on_target() {
        assert_eq!(smooth_toward(0.0, 10.0, 5.0, 1.0), 10.0);
    }

    #[test]
    fn test_sprint_multiplier_follows_button() {
        let settings = ControllerSettings::default();
        let mut state = PlayerState::new();

        state.sprint_input = true;
        update_sprint(&mut state, &settings, 0.1);
        assert_eq!(state.current_speed_multiplier, 2.0);
        assert!((state.current_speed - 5.0).abs() < 1e-5); // 0 -> 10 by half

        state.sprint_input = false;
        update_sprint(&mut state, &settings, 0.1);
        assert_eq!(state.current_speed_multiplier, 1.0);
        assert!((state.current_speed - 5.0).abs() < 1e-5); // already at the walk target
    }

    #[test]
    fn test_jump_velocity_ignores_prior_velocity() {
        let settings = ControllerSettings::default();
        for prior in [-30.0, -2.0, 0.0, 4.5] {
            let mut state = PlayerState::new();
            state.vertical_velocity = prior;
            state.jump_input = true;

            let v = update_vertical_velocity(&mut state, &settings, true, 0.016);

            assert_eq!(v, (settings.jump_height * 2.0 * settings.gravity).sqrt());
            assert!(!state.jump_input);
        }
    }

    #[test]
    fn test_grounded_without_jump_sticks() {
        let settings = ControllerSettings::default();
        let mut state = PlayerState::new();
        state.vertical_velocity = -12.0;

        let v = update_vertical_velocity(&mut state, &settings, true, 0.016);
        assert_eq!(v, settings.grounded_stick_velocity);
    }

    #[test]
    fn test_gravity_is_linear_and_unbounded() {
        let settings = ControllerSettings::default();
        let mut state = PlayerState::new();
        let dt = 0.02;

        for _ in 0..10_000 {
            let before = state.vertical_velocity;
            let after = update_vertical_velocity(&mut state, &settings, false, dt);
            assert_eq!(after, before - settings.gravity * dt);
        }
        assert!(state.vertical_velocity < -1000.0);
    }

    #[test]
    fn test_airborne_jump_is_kept_for_landing() {
        let settings = ControllerSettings::default();
        let mut state = PlayerState::new();
        state.jump_input = true;

        update_vertical_velocity(&mut state, &settings, false, 0.016);
        assert!(state.jump_input);
    }

    #[test]
    fn test_zero_input_still_falls() {
        let settings = ControllerSettings::default();
        let mut state = PlayerState::new();
        let body = CharacterBody::new(Vec3::new(0.0, 10.0, 0.0));

        let displacement = ground_movement(&mut state, &settings, &body, 0.1);

        assert_eq!(displacement.x, 0.0);
        assert_eq!(displacement.z, 0.0);
        assert!(displacement.y < 0.0);
    }

    #[test]
    fn test_movement_is_facing_relative() {
        let settings = ControllerSettings::default();
        let mut state = PlayerState::new();
        state.current_speed = settings.move_speed;
        state.move_input = Vec2::new(0.0, 1.0);
        let mut body = CharacterBody::new(Vec3::ZERO);
        body.grounded = true;
        body.yaw = std::f32::consts::FRAC_PI_2;

        let displacement = ground_movement(&mut state, &settings, &body, 0.1);

        // Facing -X after a quarter turn left
        assert!((displacement.x + 0.5).abs() < 1e-4);
        assert!(displacement.z.abs() < 1e-4);
    }
}
