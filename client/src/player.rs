//! Local player: spawning and the per-frame controller drive.

use bevy::prelude::*;
use interior_shared::look::camera_local_rotation;
use interior_shared::{
    ActorId, ControllerSettings, FrameContext, FrameInput, InteractableSet, InteractionPrompt,
    PlayerController, SceneColliders,
};

use crate::audio::{FootstepAudio, FootstepMessage};
use crate::doors::WorldEffectMessage;
use crate::GameRng;

/// Actor identity doors check the player against
pub const PLAYER_ACTOR: ActorId = ActorId(0);

/// Hallway, facing the living room
const SPAWN_POINT: Vec3 = Vec3::new(0.0, 0.1, 2.0);

/// Field of view in degrees
const CAMERA_FOV: f32 = 70.0;

/// Marker for the locally controlled player body
#[derive(Component)]
pub struct LocalPlayer;

/// First-person camera, child of the player body
#[derive(Component)]
pub struct PlayerCamera {
    /// Eye offset from the feet, before bob
    pub eye_offset: Vec3,
    /// Bob oscillator phase (radians)
    pub bob_phase: f32,
}

pub fn spawn_player(mut commands: Commands, settings: Res<ControllerSettings>) {
    let controller = PlayerController::new(settings.clone(), SPAWN_POINT, PLAYER_ACTOR);
    let eye_offset = Vec3::Y * settings.eye_height;

    commands
        .spawn((
            LocalPlayer,
            controller,
            Transform::from_translation(SPAWN_POINT),
            Visibility::default(),
        ))
        .with_children(|parent| {
            parent.spawn((
                PlayerCamera {
                    eye_offset,
                    bob_phase: 0.0,
                },
                Camera3d::default(),
                Projection::Perspective(PerspectiveProjection {
                    fov: CAMERA_FOV.to_radians(),
                    ..default()
                }),
                Transform::from_translation(eye_offset),
            ));
        });

    info!("Player spawned at {:?}", SPAWN_POINT);
}

/// Run one controller frame and hand its results to presentation
pub fn drive_player(
    time: Res<Time>,
    input: Res<FrameInput>,
    colliders: Res<SceneColliders>,
    footstep_audio: Res<FootstepAudio>,
    mut interactables: ResMut<InteractableSet>,
    mut rng: ResMut<GameRng>,
    mut prompt: ResMut<InteractionPrompt>,
    mut players: Query<(&mut PlayerController, &mut Transform), With<LocalPlayer>>,
    mut cameras: Query<&mut Transform, (With<PlayerCamera>, Without<LocalPlayer>)>,
    mut footsteps: MessageWriter<FootstepMessage>,
    mut effects: MessageWriter<WorldEffectMessage>,
) {
    let Ok((mut controller, mut transform)) = players.single_mut() else {
        return;
    };

    let output = controller.update(
        &input,
        FrameContext {
            dt: time.delta_secs(),
            now: time.elapsed_secs(),
            physics: &*colliders,
            footsteps: &footstep_audio.pools,
            interactables: &mut *interactables,
            rng: &mut rng.0,
        },
    );

    transform.translation = controller.body.position;
    transform.rotation = controller.body.rotation();
    if let Ok(mut camera) = cameras.single_mut() {
        camera.rotation = camera_local_rotation(controller.state.pitch);
    }

    if let Some(clip) = output.footstep {
        footsteps.write(FootstepMessage(clip));
    }
    for effect in output.effects {
        effects.write(WorldEffectMessage(effect));
    }

    // Only touch the resource on change so the HUD sees real changes
    if *prompt != output.targeting.prompt {
        *prompt = output.targeting.prompt;
    }
}
