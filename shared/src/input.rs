//! Per-frame input snapshot.
//!
//! The client decodes devices into one `FrameInput` per frame; the controller latches it into
//! `PlayerState` before running any subsystem.

use bevy::prelude::*;

/// Phase of a logical button during one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ButtonPhase {
    #[default]
    Idle,
    /// Went down this frame.
    Pressed,
    /// Down since an earlier frame.
    Held,
    /// Went up this frame.
    Released,
}

impl ButtonPhase {
    pub fn from_button(just_pressed: bool, pressed: bool, just_released: bool) -> Self {
        if just_pressed {
            ButtonPhase::Pressed
        } else if pressed {
            ButtonPhase::Held
        } else if just_released {
            ButtonPhase::Released
        } else {
            ButtonPhase::Idle
        }
    }

    pub fn is_down(self) -> bool {
        matches!(self, ButtonPhase::Pressed | ButtonPhase::Held)
    }
}

/// Decoded input for one frame.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// x = strafe (right positive), y = forward.
    pub movement: Vec2,
    /// x = yaw (right positive), y = pitch (up positive). Raw device delta for this frame.
    pub look: Vec2,
    pub jump: ButtonPhase,
    pub sprint: ButtonPhase,
    pub interact: ButtonPhase,
}
