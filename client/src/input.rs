//! Player input handling
//!
//! Keyboard and mouse are sampled once per frame into [`FrameInput`], which the controller
//! latches at the start of its update.

use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions, PrimaryWindow, WindowFocused};
use interior_shared::{ButtonPhase, FrameInput};

fn button_phase<T>(input: &ButtonInput<T>, buttons: &[T]) -> ButtonPhase
where
    T: Copy + Eq + std::hash::Hash + Send + Sync + 'static,
{
    ButtonPhase::from_button(
        input.any_just_pressed(buttons.iter().copied()),
        input.any_pressed(buttons.iter().copied()),
        input.any_just_released(buttons.iter().copied()),
    )
}

/// Sample keyboard and mouse into this frame's [`FrameInput`]
pub fn gather_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut mouse_motion: MessageReader<MouseMotion>,
    cursor_opts: Query<&CursorOptions, With<PrimaryWindow>>,
    mut frame_input: ResMut<FrameInput>,
) {
    let mut movement = Vec2::ZERO;
    if keyboard.pressed(KeyCode::KeyW) {
        movement.y += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) {
        movement.y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) {
        movement.x += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyA) {
        movement.x -= 1.0;
    }

    let mut delta = Vec2::ZERO;
    for motion in mouse_motion.read() {
        delta += motion.delta;
    }

    // Mouse look only while the cursor is captured
    let captured = cursor_opts
        .single()
        .is_ok_and(|cursor| cursor.grab_mode != CursorGrabMode::None);
    if !captured {
        delta = Vec2::ZERO;
    }

    *frame_input = FrameInput {
        movement: movement.clamp_length_max(1.0),
        // Screen Y grows downward; look input is up-positive
        look: Vec2::new(delta.x, -delta.y),
        jump: button_phase(&keyboard, &[KeyCode::Space]),
        sprint: button_phase(&keyboard, &[KeyCode::ShiftLeft, KeyCode::ShiftRight]),
        interact: button_phase(&keyboard, &[KeyCode::KeyE]),
    };
}

fn set_cursor_locked(cursor: &mut CursorOptions, locked: bool) {
    if locked {
        cursor.grab_mode = CursorGrabMode::Locked;
        cursor.visible = false;
    } else {
        cursor.grab_mode = CursorGrabMode::None;
        cursor.visible = true;
    }
}

/// Lock the cursor on startup, when the window regains focus and on left click
pub fn grab_cursor(
    mut cursor_opts: Query<&mut CursorOptions, With<PrimaryWindow>>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut focus: MessageReader<WindowFocused>,
    mut started: Local<bool>,
) {
    let Ok(mut cursor) = cursor_opts.single_mut() else {
        return;
    };

    let regained_focus = focus.read().any(|event| event.focused);
    if !*started || regained_focus || mouse_button.just_pressed(MouseButton::Left) {
        set_cursor_locked(&mut cursor, true);
        *started = true;
    }
}

/// Release the cursor on Escape
pub fn release_cursor(
    mut cursor_opts: Query<&mut CursorOptions, With<PrimaryWindow>>,
    keyboard: Res<ButtonInput<KeyCode>>,
) {
    if !keyboard.just_pressed(KeyCode::Escape) {
        return;
    }
    if let Ok(mut cursor) = cursor_opts.single_mut() {
        set_cursor_locked(&mut cursor, false);
        info!("Cursor released");
    }
}
