use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::config::ConfigLoaded;
use crate::core::layers;
use crate::game_state::{EndGameObserver, GameEnded};
use crate::player::components::{Enemy, Spike};
use crate::stats::CharacterStats;

const PLATFORM_COLOR: Color = Color::srgb(0.36, 0.42, 0.38);
const ENEMY_COLOR: Color = Color::srgb(0.62, 0.2, 0.55);
const SPIKE_COLOR: Color = Color::srgb(0.78, 0.78, 0.82);

pub fn spawn_level(mut commands: Commands, config: Res<ConfigLoaded>) {
  let ground = &config.world.ground;

  // Rapier cuboid uses half-extents
  commands.spawn((
    Sprite {
      color: Color::srgb(ground.color[0], ground.color[1], ground.color[2]),
      custom_size: Some(Vec2::new(ground.width, ground.height)),
      ..default()
    },
    Transform::from_xyz(0.0, ground.y_position, 0.0),
    RigidBody::Fixed,
    Collider::cuboid(ground.width / 2.0, ground.height / 2.0),
    layers::ground_groups(),
  ));

  for platform in &config.world.platforms {
    commands.spawn((
      Sprite {
        color: PLATFORM_COLOR,
        custom_size: Some(Vec2::new(platform.width, platform.height)),
        ..default()
      },
      Transform::from_xyz(platform.x, platform.y, 0.0),
      RigidBody::Fixed,
      Collider::cuboid(platform.width / 2.0, platform.height / 2.0),
      layers::ground_groups(),
    ));
  }

  // The enemy body carries the sprite; its hitbox is a child so knockback
  // pushes away from the body's centre.
  for enemy in &config.world.enemies {
    let half = enemy.size / 2.0;
    commands.spawn((
      EndGameObserver,
      Sprite {
        color: ENEMY_COLOR,
        custom_size: Some(Vec2::splat(enemy.size)),
        ..default()
      },
      Transform::from_xyz(enemy.x, enemy.y, 0.0),
      RigidBody::Fixed,
      children![(
        Enemy,
        CharacterStats::new(enemy.health, enemy.damage, 0),
        Transform::default(),
        Collider::cuboid(half, half),
        layers::hazard_groups(),
      )],
    ));
  }

  for spike in &config.world.spikes {
    commands.spawn((
      Spike,
      CharacterStats::attacker(spike.damage),
      Sprite {
        color: SPIKE_COLOR,
        custom_size: Some(Vec2::new(spike.width, spike.height)),
        ..default()
      },
      Transform::from_xyz(spike.x, spike.y, 1.0),
      RigidBody::Fixed,
      Collider::cuboid(spike.width / 2.0, spike.height / 2.0),
      Sensor,
      layers::hazard_groups(),
    ));
  }

  info!(
    "Level spawned: {} platforms, {} enemies, {} spikes",
    config.world.platforms.len(),
    config.world.enemies.len(),
    config.world.spikes.len()
  );
}

/// Enemies fade out once the player has been defeated.
pub fn tint_ended_enemies(
  mut enemies: Query<&mut Sprite, (With<EndGameObserver>, Added<GameEnded>)>,
) {
  for mut sprite in &mut enemies {
    sprite.color = sprite.color.with_alpha(0.4);
  }
}
