mod plugin;

use std::path::Path;

use bevy::{asset::Asset, prelude::*, reflect::TypePath};
pub use plugin::ConfigPlugin;
use serde::{Deserialize, Deserializer, de};

pub const CONFIG_ASSET_PATH: &str = "config/game.config.toml";

/// Path of the config file relative to the working directory.
pub const CONFIG_FILE_PATH: &str = "assets/config/game.config.toml";

const EMBEDDED_CONFIG: &str = include_str!("../../assets/config/game.config.toml");

#[derive(Asset, TypePath, Deserialize, Debug, Clone)]
pub struct GameConfig {
  pub window: WindowConfig,
  pub camera: CameraConfig,
  pub physics: PhysicsConfig,
  pub player: PlayerConfig,
  pub world: WorldConfig,
  pub save: SaveConfig,
}

impl GameConfig {
  pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
    toml::from_str(source).map_err(ConfigError::Parse)
  }

  pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let source = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
    Self::from_toml_str(&source)
  }

  /// The config compiled into the binary.
  pub fn embedded() -> Result<Self, ConfigError> {
    Self::from_toml_str(EMBEDDED_CONFIG)
  }

  /// Startup config: read from disk on native, embedded on WASM where there
  /// is no filesystem.
  pub fn load_startup() -> Result<Self, ConfigError> {
    #[cfg(target_family = "wasm")]
    let config = Self::embedded();
    #[cfg(not(target_family = "wasm"))]
    let config = Self::load(CONFIG_FILE_PATH);
    config
  }
}

#[derive(Deserialize, Debug, Clone)]
pub struct WindowConfig {
  pub width: u32,
  pub height: u32,
  pub title: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CameraConfig {
  pub viewport_width: f32,
  pub viewport_height: f32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PhysicsConfig {
  pub gravity: f32,
}

/// Starting values for the player character. Read once when the player is
/// spawned.
#[derive(Deserialize, Debug, Clone)]
pub struct PlayerConfig {
  pub spawn_x: f32,
  pub spawn_y: f32,
  pub collider_radius: f32,
  pub collider_length: f32,
  /// Multiplied by the fixed timestep to get horizontal velocity.
  pub run_speed: f32,
  pub jump_force: f32,
  pub max_air_jumps: u32,
  pub max_health: u32,
  pub damage: u32,
  pub defence: u32,
  #[serde(default = "default_hurt_time")]
  pub hurt_time: f32,
  #[serde(default = "default_impact_force")]
  pub impact_force: f32,
  #[serde(default = "default_ground_check_radius")]
  pub ground_check_radius: f32,
  pub sprite_size: [f32; 2],
  #[serde(deserialize_with = "deserialize_hex_color")]
  pub color: [f32; 3],
  #[serde(deserialize_with = "deserialize_hex_color")]
  pub hurt_color: [f32; 3],
}

fn default_hurt_time() -> f32 {
  0.4
}

fn default_impact_force() -> f32 {
  4.0
}

fn default_ground_check_radius() -> f32 {
  0.1
}

#[derive(Deserialize, Debug, Clone)]
pub struct WorldConfig {
  pub ground: GroundConfig,
  #[serde(default)]
  pub platforms: Vec<RectConfig>,
  #[serde(default)]
  pub enemies: Vec<EnemyConfig>,
  #[serde(default)]
  pub spikes: Vec<SpikeConfig>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GroundConfig {
  pub y_position: f32,
  pub width: f32,
  pub height: f32,
  #[serde(deserialize_with = "deserialize_hex_color")]
  pub color: [f32; 3],
}

#[derive(Deserialize, Debug, Clone)]
pub struct RectConfig {
  pub x: f32,
  pub y: f32,
  pub width: f32,
  pub height: f32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct EnemyConfig {
  pub x: f32,
  pub y: f32,
  pub size: f32,
  pub health: u32,
  pub damage: u32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SpikeConfig {
  pub x: f32,
  pub y: f32,
  pub width: f32,
  pub height: f32,
  pub damage: u32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SaveConfig {
  pub directory: String,
  pub file_name: String,
}

fn deserialize_hex_color<'de, D>(deserializer: D) -> Result<[f32; 3], D::Error>
where
  D: Deserializer<'de>,
{
  let s: String = Deserialize::deserialize(deserializer)?;
  let s = s.trim_start_matches('#');
  if s.len() != 6 || !s.is_ascii() {
    return Err(de::Error::custom("hex color must be 6 hex digits"));
  }
  let r = u8::from_str_radix(&s[0..2], 16).map_err(de::Error::custom)?;
  let g = u8::from_str_radix(&s[2..4], 16).map_err(de::Error::custom)?;
  let b = u8::from_str_radix(&s[4..6], 16).map_err(de::Error::custom)?;
  Ok([r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0])
}

/// Error reading or parsing the game config.
#[derive(Debug)]
pub enum ConfigError {
  Io(std::io::Error),
  Parse(toml::de::Error),
}

impl std::fmt::Display for ConfigError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Io(e) => write!(f, "failed to read config: {}", e),
      Self::Parse(e) => write!(f, "failed to parse config: {}", e),
    }
  }
}

impl std::error::Error for ConfigError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::Io(e) => Some(e),
      Self::Parse(e) => Some(e),
    }
  }
}

#[derive(Resource)]
pub struct ConfigHandle(pub Handle<GameConfig>);

#[derive(Resource, Debug, Clone)]
pub struct ConfigLoaded {
  pub window: WindowConfig,
  pub camera: CameraConfig,
  pub physics: PhysicsConfig,
  pub player: PlayerConfig,
  pub world: WorldConfig,
  pub save: SaveConfig,
}

impl From<GameConfig> for ConfigLoaded {
  fn from(config: GameConfig) -> Self {
    Self {
      window: config.window,
      camera: config.camera,
      physics: config.physics,
      player: config.player,
      world: config.world,
      save: config.save,
    }
  }
}
