//! HUD: center dot crosshair and the interaction prompt below it.

use bevy::prelude::*;
use interior_shared::InteractionPrompt;

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_hud);
        app.add_systems(Update, update_prompt.after(crate::player::drive_player));
    }
}

/// Marker for the crosshair root
#[derive(Component)]
pub struct Crosshair;

/// Marker for the prompt text
#[derive(Component)]
pub struct PromptText;

pub fn spawn_hud(mut commands: Commands) {
    // Root container (full screen, centered)
    commands
        .spawn((
            Crosshair,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            Pickable::IGNORE,
        ))
        .with_children(|parent| {
            parent.spawn((
                Node {
                    width: Val::Px(4.0),
                    height: Val::Px(4.0),
                    ..default()
                },
                BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.85)),
                BorderRadius::all(Val::Px(2.0)),
            ));
        });

    commands.spawn((
        PromptText,
        Text::new(""),
        TextFont {
            font_size: 20.0,
            ..default()
        },
        TextColor(Color::srgb(0.95, 0.95, 0.9)),
        TextLayout::new_with_justify(Justify::Center),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Percent(55.0),
            width: Val::Percent(100.0),
            ..default()
        },
        Visibility::Hidden,
    ));
}

/// Mirror the prompt resource into the HUD text
pub fn update_prompt(
    prompt: Res<InteractionPrompt>,
    mut texts: Query<(&mut Text, &mut Visibility), With<PromptText>>,
) {
    if !prompt.is_changed() {
        return;
    }
    let Ok((mut text, mut visibility)) = texts.single_mut() else {
        return;
    };

    if prompt.visible {
        **text = prompt.text.clone();
        *visibility = Visibility::Visible;
    } else {
        *visibility = Visibility::Hidden;
    }
}
