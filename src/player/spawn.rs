use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::{
  CharacterData, ControllerInput, Facing, GroundCheck, GroundContacts, Grounded, Player,
  PlayerAnimator, PlayerVisual, SpikeOverlaps,
};
use super::motor::PlayerMotor;
use crate::config::{ConfigLoaded, PlayerConfig};
use crate::core::layers;
use crate::input::{PlayerInput, player_input_actions};
use crate::stats::CharacterStats;

pub fn spawn_player(mut commands: Commands, config: Res<ConfigLoaded>) {
  let player = &config.player;
  let spawn_pos = Vec3::new(player.spawn_x, player.spawn_y, 0.0);

  info!("Spawning player at {:?}", spawn_pos);
  commands.spawn((
    controller_bundle(player, spawn_pos),
    PlayerInput,
    player_input_actions(),
  ));
}

/// Everything the controller needs on the player, without input bindings.
///
/// The body is a rotation-locked dynamic capsule. Two children hang off it: a
/// ball sensor at the feet that only sees the ground layer, and the sprite,
/// which is mirrored for facing and tinted by the hurt flash.
pub fn controller_bundle(config: &PlayerConfig, position: Vec3) -> impl Bundle {
  let data = CharacterData::from(config);
  let ground_check_radius = data.ground_check_radius;

  // Rapier capsule_y uses half_height (cylinder part) and radius
  let half_height = config.collider_length / 2.0;
  let feet = -(half_height + config.collider_radius);
  let [r, g, b] = config.color;

  (
    (
      Player,
      Transform::from_translation(position),
      Visibility::default(),
      RigidBody::Dynamic,
      Collider::capsule_y(half_height, config.collider_radius),
      LockedAxes::ROTATION_LOCKED,
      Velocity::zero(),
      ActiveEvents::COLLISION_EVENTS,
      layers::player_groups(),
    ),
    (
      PlayerMotor::new(&data),
      CharacterStats::new(config.max_health, config.damage, config.defence),
      ControllerInput::default(),
      Grounded::default(),
      Facing::default(),
      SpikeOverlaps::default(),
      PlayerAnimator::default(),
      data,
    ),
    children![
      (
        GroundCheck,
        GroundContacts::default(),
        Transform::from_xyz(0.0, feet, 0.0),
        Collider::ball(ground_check_radius),
        Sensor,
        ActiveEvents::COLLISION_EVENTS,
        layers::ground_check_groups(),
      ),
      (
        PlayerVisual,
        Sprite {
          color: Color::srgb(r, g, b),
          custom_size: Some(Vec2::new(config.sprite_size[0], config.sprite_size[1])),
          ..default()
        },
        Transform::from_xyz(0.0, 0.0, 10.0),
      ),
    ],
  )
}
