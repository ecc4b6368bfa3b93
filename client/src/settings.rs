//! Controller tuning loaded from `config/controller.ron` under the asset folder.
//!
//! A missing or broken file never stops the game: the built-in defaults are used instead.

use std::io::ErrorKind;
use std::path::PathBuf;

use bevy::prelude::*;
use interior_shared::{ControllerSettings, SettingsError};

const SETTINGS_FILE: &str = "config/controller.ron";

pub struct SettingsPlugin {
    pub asset_path: String,
}

impl Plugin for SettingsPlugin {
    fn build(&self, app: &mut App) {
        let path = PathBuf::from(&self.asset_path).join(SETTINGS_FILE);
        app.insert_resource(load_or_default(&path));
    }
}

fn load_or_default(path: &std::path::Path) -> ControllerSettings {
    match ControllerSettings::load(path) {
        Ok(settings) => {
            info!("Loaded controller settings from {:?}", path);
            settings
        }
        Err(SettingsError::Io(e)) if e.kind() == ErrorKind::NotFound => {
            info!("No controller settings at {:?}, using defaults", path);
            ControllerSettings::default()
        }
        Err(e) => {
            warn!("Failed to load controller settings from {:?}: {}. Using defaults", path, e);
            ControllerSettings::default()
        }
    }
}
