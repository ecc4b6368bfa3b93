//! Interior walkthrough - first-person exploration of a small apartment
//!
//! Renders the scene, reads keyboard/mouse input and drives the shared player controller.

mod audio;
mod camera;
mod doors;
mod hud;
mod input;
mod player;
mod settings;
mod world;

use bevy::prelude::*;
use bevy::asset::AssetPlugin;
use bevy::window::WindowResolution;
use rand::rngs::StdRng;
use rand::SeedableRng;
use interior_shared::{FrameInput, InteractionPrompt};

/// Randomness for footstep selection and color changes
#[derive(Resource)]
pub struct GameRng(pub StdRng);

/// Get the asset path - for bundled macOS apps, use path relative to executable
fn get_asset_path() -> String {
    // Try to find assets relative to executable (for .app bundles)
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let bundled_assets = exe_dir.join("assets");
            if bundled_assets.exists() {
                info!("Using bundled assets at: {:?}", bundled_assets);
                return bundled_assets.to_string_lossy().to_string();
            }
        }
    }
    // Fall back to default "assets" folder (for development)
    "assets".to_string()
}

fn main() {
    let asset_path = get_asset_path();

    let mut app = App::new();

    app.add_plugins(DefaultPlugins
        .set(WindowPlugin {
            primary_window: Some(Window {
                title: "Interior".to_string(),
                resolution: WindowResolution::new(1280, 720),
                ..default()
            }),
            ..default()
        })
        .set(AssetPlugin {
            file_path: asset_path.clone(),
            ..default()
        })
    );

    // Controller tuning is read before anything spawns
    app.add_plugins(settings::SettingsPlugin { asset_path });

    app.insert_resource(GameRng(StdRng::from_entropy()));
    app.init_resource::<FrameInput>();
    app.init_resource::<InteractionPrompt>();

    app.add_plugins(world::WorldPlugin);
    app.add_plugins(audio::FootstepAudioPlugin);
    app.add_plugins(doors::DoorsPlugin);
    app.add_plugins(hud::HudPlugin);

    app.add_systems(Startup, player::spawn_player.after(world::spawn_world));

    // ORDER MATTERS: input -> controller -> presentation of the frame's results.
    app.add_systems(
        Update,
        (
            input::grab_cursor,
            input::release_cursor,
            input::gather_input,
            player::drive_player,
        )
            .chain(),
    );

    // Camera bob reads the motion the frame settled on
    app.add_systems(PostUpdate, camera::apply_camera_bob.before(bevy::transform::TransformSystems::Propagate));

    info!("Starting Interior walkthrough");
    app.run();
}
