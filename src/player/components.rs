use bevy::ecs::entity::EntityHashSet;
use bevy::prelude::*;

use crate::config::PlayerConfig;

#[derive(Component)]
pub struct Player;

/// Marker for the visual child entity (sprite, facing, hurt tint)
#[derive(Component)]
pub struct PlayerVisual;

/// Marker for the sensor child under the player's feet.
#[derive(Component)]
pub struct GroundCheck;

/// Ground colliders currently overlapping a [`GroundCheck`] sensor.
#[derive(Component, Default, Debug)]
pub struct GroundContacts(pub EntityHashSet);

impl GroundContacts {
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

/// Spike sensors the player is standing in.
#[derive(Component, Default, Debug)]
pub struct SpikeOverlaps(pub EntityHashSet);

#[derive(Component, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grounded(pub bool);

/// Input sampled each frame, consumed on the physics tick.
#[derive(Component, Default, Debug, Clone, Copy)]
pub struct ControllerInput {
  /// Horizontal axis in `[-1, 1]`.
  pub horizontal: f32,
  /// Set on the frame the jump button goes down, cleared by the next tick.
  pub jump_pressed: bool,
  pub jump_held: bool,
}

#[derive(Component, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
  #[default]
  Right,
  Left,
}

impl Facing {
  pub fn from_axis(horizontal: f32) -> Self {
    if horizontal > 0.0 { Self::Right } else { Self::Left }
  }

  pub fn sign(self) -> f32 {
    match self {
      Self::Right => 1.0,
      Self::Left => -1.0,
    }
  }
}

/// Tuning read once from config when the player is spawned.
#[derive(Component, Debug, Clone)]
pub struct CharacterData {
  pub run_speed: f32,
  pub jump_force: f32,
  pub max_air_jumps: u32,
  pub hurt_time: f32,
  pub impact_force: f32,
  pub ground_check_radius: f32,
  pub hurt_color: Color,
}

impl From<&PlayerConfig> for CharacterData {
  fn from(config: &PlayerConfig) -> Self {
    let [r, g, b] = config.hurt_color;
    Self {
      run_speed: config.run_speed,
      jump_force: config.jump_force,
      max_air_jumps: config.max_air_jumps,
      hurt_time: config.hurt_time,
      impact_force: config.impact_force,
      ground_check_radius: config.ground_check_radius,
      hurt_color: Color::srgb(r, g, b),
    }
  }
}

/// Child entities found when the controller is wired up.
#[derive(Component, Debug, Clone, Copy)]
pub struct ControllerRig {
  pub ground_check: Entity,
  pub visual: Entity,
}

/// Sprite tint captured at wiring time, restored when a hurt flash ends.
#[derive(Component, Debug, Clone, Copy)]
pub struct OriginalAppearance {
  pub color: Color,
}

/// Present while the player is hurt. Movement and jumping are suspended until
/// the timer runs out.
#[derive(Component, Debug)]
pub struct HurtFlash {
  pub timer: Timer,
}

impl HurtFlash {
  pub fn new(seconds: f32) -> Self {
    Self {
      timer: Timer::from_seconds(seconds, TimerMode::Once),
    }
  }
}

/// Terminal: nothing but the death animation runs once this is inserted.
#[derive(Component, Debug)]
pub struct Dead;

/// Flags for the sprite animator.
#[derive(Component, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerAnimator {
  pub idle: bool,
  pub jump: bool,
  pub fall: bool,
  pub hurt: bool,
  pub dead: bool,
}

/// Tag for colliders that hurt the player on contact.
#[derive(Component, Debug, Default)]
pub struct Enemy;

/// Tag for sensors that hurt the player for as long as they overlap.
#[derive(Component, Debug, Default)]
pub struct Spike;
