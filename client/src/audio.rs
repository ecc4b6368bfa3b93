//! Footstep audio
//!
//! Clips live at `audio/footsteps/{surface}_{n}.ogg`. Each surface pool is filled with every
//! numbered clip found on disk; a surface with no clips simply stays silent.

use std::path::Path;

use bevy::prelude::*;
use bevy::audio::Volume;
use interior_shared::footsteps::ALL_SURFACE_KINDS;
use interior_shared::FootstepPools;

/// Highest clip number probed per surface
const MAX_CLIPS_PER_SURFACE: usize = 8;

const FOOTSTEP_VOLUME: f32 = 0.6;

pub struct FootstepAudioPlugin;

impl Plugin for FootstepAudioPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FootstepAudio>();
        app.add_message::<FootstepMessage>();
        app.add_systems(Startup, setup_footstep_audio);
        app.add_systems(Update, play_footsteps.after(crate::player::drive_player));
    }
}

/// Footstep clips by surface
#[derive(Resource, Default)]
pub struct FootstepAudio {
    pub pools: FootstepPools<Handle<AudioSource>>,
}

/// A footstep fired this frame
#[derive(Message, Clone, Debug)]
pub struct FootstepMessage(pub Handle<AudioSource>);

/// Marker for one-shot footstep audio entities
#[derive(Component)]
pub struct FootstepSound;

fn clip_path(surface: &str, n: usize) -> String {
    format!("audio/footsteps/{}_{}.ogg", surface, n)
}

/// Load footstep pools from the asset folder
pub fn setup_footstep_audio(mut commands: Commands, asset_server: Res<AssetServer>) {
    let asset_root = crate::get_asset_path();
    let mut audio = FootstepAudio::default();

    for surface in ALL_SURFACE_KINDS {
        let pool = audio.pools.pool_mut(surface);
        for n in 1..=MAX_CLIPS_PER_SURFACE {
            let path = clip_path(surface.id(), n);
            if Path::new(&asset_root).join(&path).exists() {
                pool.push(asset_server.load(path));
            }
        }
        if pool.is_empty() {
            warn!("No footstep clips for surface '{}'", surface.id());
        } else {
            info!("Footstep pool '{}': {} clips", surface.id(), pool.len());
        }
    }

    commands.insert_resource(audio);
}

/// Play each fired footstep as a one-shot
pub fn play_footsteps(mut commands: Commands, mut footsteps: MessageReader<FootstepMessage>) {
    for FootstepMessage(clip) in footsteps.read() {
        commands.spawn((
            FootstepSound,
            AudioPlayer::new(clip.clone()),
            PlaybackSettings::DESPAWN.with_volume(Volume::Linear(FOOTSTEP_VOLUME)),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_paths_follow_surface_ids() {
        let paths: Vec<String> = ALL_SURFACE_KINDS.iter().map(|s| clip_path(s.id(), 1)).collect();
        assert_eq!(
            paths,
            [
                "audio/footsteps/ground_1.ogg",
                "audio/footsteps/floor_1.ogg",
                "audio/footsteps/wood_1.ogg",
                "audio/footsteps/carpet_1.ogg",
            ]
        );
        assert_eq!(clip_path("wood", MAX_CLIPS_PER_SURFACE), "audio/footsteps/wood_8.ogg");
    }
}
