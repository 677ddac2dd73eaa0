//! Loads the player's persisted stats.
//!
//! Saves are small TOML files under the platform data directory. Only reading
//! happens here; a missing file means a fresh game.

use std::io;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigLoaded, SaveConfig};
use crate::stats::CharacterStats;

pub struct SavePlugin;

impl Plugin for SavePlugin {
  fn build(&self, app: &mut App) {
    app.add_systems(PreStartup, init_save_manager);
  }
}

fn init_save_manager(mut commands: Commands, config: Res<ConfigLoaded>) {
  let manager = SaveManager::from_config(&config.save);
  info!("Player save file: {}", manager.path().display());
  commands.insert_resource(manager);
}

/// The persisted part of a character.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PlayerSave {
  pub max_health: u32,
  pub current_health: u32,
  pub damage: u32,
  pub defence: u32,
}

impl PlayerSave {
  pub fn apply_to(&self, stats: &mut CharacterStats) {
    stats.max_health = self.max_health;
    stats.current_health = self.current_health.min(self.max_health);
    stats.damage = self.damage;
    stats.defence = self.defence;
  }
}

#[derive(Resource, Debug, Clone)]
pub struct SaveManager {
  path: PathBuf,
}

impl SaveManager {
  pub fn at(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  pub fn from_config(config: &SaveConfig) -> Self {
    let path = dirs::data_dir()
      .unwrap_or_else(|| PathBuf::from("."))
      .join(&config.directory)
      .join("saves")
      .join(&config.file_name);
    Self::at(path)
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Returns `Ok(None)` when no save exists yet.
  pub fn load_player_data(&self) -> Result<Option<PlayerSave>, SaveError> {
    let source = match std::fs::read_to_string(&self.path) {
      Ok(source) => source,
      Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
      Err(e) => return Err(SaveError::Io(e)),
    };
    toml::from_str(&source).map(Some).map_err(SaveError::Parse)
  }
}

/// Error loading a player save.
#[derive(Debug)]
pub enum SaveError {
  Io(io::Error),
  Parse(toml::de::Error),
}

impl std::fmt::Display for SaveError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Io(e) => write!(f, "I/O error: {}", e),
      Self::Parse(e) => write!(f, "malformed save: {}", e),
    }
  }
}

impl std::error::Error for SaveError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::Io(e) => Some(e),
      Self::Parse(e) => Some(e),
    }
  }
}
