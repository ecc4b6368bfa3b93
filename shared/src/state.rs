//! Player-side mutable state, owned by the controller and rewritten every frame.

use bevy::prelude::*;

use crate::input::{ButtonPhase, FrameInput};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlayerState {
    pub move_input: Vec2,
    pub look_input: Vec2,
    /// Requested jump. Stays set until applied on the ground.
    pub jump_input: bool,
    /// Sprint button currently held.
    pub sprint_input: bool,
    /// Requested interaction. Consumed by every targeting step.
    pub interact_input: bool,

    pub vertical_velocity: f32,
    /// Smoothed horizontal speed.
    pub current_speed: f32,
    /// 1.0 while walking, the sprint multiplier while sprinting.
    pub current_speed_multiplier: f32,

    /// Camera pitch accumulator in degrees, positive looks up.
    pub pitch: f32,
    /// Absolute time (seconds) before which no footstep may fire.
    pub next_step_time: f32,
}

impl PlayerState {
    pub fn new() -> Self {
        Self {
            current_speed_multiplier: 1.0,
            ..default()
        }
    }

    /// Fold this frame's input into the latched flags.
    ///
    /// Axes overwrite. Jump only ever latches on; sprint follows the button level; interact
    /// latches on press and clears on release.
    pub fn latch(&mut self, input: &FrameInput) {
        self.move_input = input.movement;
        self.look_input = input.look;

        if input.jump == ButtonPhase::Pressed {
            self.jump_input = true;
        }

        self.sprint_input = input.sprint.is_down();

        match input.interact {
            ButtonPhase::Pressed => self.interact_input = true,
            ButtonPhase::Released => self.interact_input = false,
            ButtonPhase::Held | ButtonPhase::Idle => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axes_take_latest_value() {
        let mut state = PlayerState::new();
        state.latch(&FrameInput {
            movement: Vec2::new(1.0, 0.0),
            look: Vec2::new(3.0, -2.0),
            ..default()
        });
        state.latch(&FrameInput {
            movement: Vec2::new(0.0, 1.0),
            ..default()
        });

        assert_eq!(state.move_input, Vec2::new(0.0, 1.0));
        assert_eq!(state.look_input, Vec2::ZERO);
    }

    #[test]
    fn test_jump_latches_until_cleared() {
        let mut state = PlayerState::new();
        state.latch(&FrameInput {
            jump: ButtonPhase::Pressed,
            ..default()
        });
        state.latch(&FrameInput {
            jump: ButtonPhase::Released,
            ..default()
        });

        assert!(state.jump_input);
    }

    #[test]
    fn test_sprint_is_level() {
        let mut state = PlayerState::new();
        state.latch(&FrameInput {
            sprint: ButtonPhase::Held,
            ..default()
        });
        assert!(state.sprint_input);

        state.latch(&FrameInput {
            sprint: ButtonPhase::Released,
            ..default()
        });
        assert!(!state.sprint_input);
    }

    #[test]
    fn test_interact_press_and_release() {
        let mut state = PlayerState::new();
        state.latch(&FrameInput {
            interact: ButtonPhase::Pressed,
            ..default()
        });
        assert!(state.interact_input);

        state.latch(&FrameInput {
            interact: ButtonPhase::Released,
            ..default()
        });
        assert!(!state.interact_input);
    }
}
