use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::{
  CharacterData, ControllerInput, ControllerRig, Dead, HurtFlash, OriginalAppearance, Player,
  PlayerVisual,
};
use crate::stats::{CharacterStats, take_damage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HazardKind {
  Enemy,
  Spike,
}

/// The player touched something that hurts.
#[derive(Message, Debug, Clone, Copy)]
pub struct HazardContact {
  pub player: Entity,
  /// The collider that was touched.
  pub attacker: Entity,
  pub kind: HazardKind,
}

/// Velocity that throws the player directly away from `attacker`.
pub fn knockback(player: Vec2, attacker: Vec2, impact_force: f32) -> Vec2 {
  (player - attacker) * impact_force
}

pub fn apply_hazard_damage(
  mut commands: Commands,
  mut contacts: MessageReader<HazardContact>,
  mut players: Query<
    (
      &mut CharacterStats,
      &mut Velocity,
      &mut ControllerInput,
      &GlobalTransform,
      &CharacterData,
      &ControllerRig,
    ),
    (With<Player>, Without<Dead>),
  >,
  attackers: Query<(&CharacterStats, Option<&ChildOf>), Without<Player>>,
  transforms: Query<&GlobalTransform>,
  mut sprites: Query<&mut Sprite, With<PlayerVisual>>,
) {
  for contact in contacts.read() {
    let Ok((mut stats, mut velocity, mut input, transform, data, rig)) =
      players.get_mut(contact.player)
    else {
      continue;
    };
    if stats.current_health == 0 {
      continue;
    }

    let Ok((attacker_stats, parent)) = attackers.get(contact.attacker) else {
      warn!(
        "{:?} contact from {:?} without stats, ignoring",
        contact.kind, contact.attacker
      );
      continue;
    };

    let dealt = take_damage(attacker_stats, &mut stats);
    debug!(
      "{:?} {:?} hit player for {}, health {}/{}",
      contact.kind, contact.attacker, dealt, stats.current_health, stats.max_health
    );

    // Inserting over an existing flash restarts its timer.
    commands.entity(contact.player).insert(HurtFlash::new(data.hurt_time));
    input.jump_pressed = false;
    if let Ok(mut sprite) = sprites.get_mut(rig.visual) {
      sprite.color = data.hurt_color;
    }

    // Hitboxes are usually children of the body that owns them; push away
    // from the body.
    let origin = parent
      .and_then(|parent| transforms.get(parent.parent()).ok())
      .or_else(|| transforms.get(contact.attacker).ok());
    if let Some(origin) = origin {
      velocity.linvel = knockback(
        transform.translation().truncate(),
        origin.translation().truncate(),
        data.impact_force,
      );
    }
  }
}

/// Counts down the hurt flash and puts the original tint back when it ends.
pub fn tick_hurt_flash(
  mut commands: Commands,
  time: Res<Time>,
  mut players: Query<(Entity, &mut HurtFlash, &ControllerRig, &OriginalAppearance)>,
  mut sprites: Query<&mut Sprite, With<PlayerVisual>>,
) {
  for (entity, mut flash, rig, appearance) in &mut players {
    flash.timer.tick(time.delta());
    if !flash.timer.just_finished() {
      continue;
    }

    if let Ok(mut sprite) = sprites.get_mut(rig.visual) {
      sprite.color = appearance.color;
    }
    commands.entity(entity).remove::<HurtFlash>();
  }
}
