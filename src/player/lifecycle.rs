use bevy::prelude::*;

use super::components::{
  ControllerRig, Dead, GroundCheck, OriginalAppearance, Player, PlayerAnimator, PlayerVisual,
};
use super::error::ControllerError;
use crate::game_state::GameManager;
use crate::save::SaveManager;
use crate::stats::CharacterStats;

/// Finds the ground check and visual children of a newly spawned player and
/// captures the sprite tint. Fails if the rig is incomplete.
pub fn wire_player(
  mut commands: Commands,
  players: Query<(Entity, Option<&Children>, Has<CharacterStats>), Added<Player>>,
  ground_checks: Query<(), With<GroundCheck>>,
  visuals: Query<&Sprite, With<PlayerVisual>>,
) -> Result {
  for (player, children, has_stats) in &players {
    if !has_stats {
      return Err(ControllerError::MissingStats { player }.into());
    }

    let children: Vec<Entity> = children.map(|c| c.iter().collect()).unwrap_or_default();

    let ground_check = children
      .iter()
      .copied()
      .find(|&child| ground_checks.contains(child))
      .ok_or(ControllerError::MissingGroundCheck { player })?;

    let (visual, color) = children
      .iter()
      .find_map(|&child| visuals.get(child).ok().map(|sprite| (child, sprite.color)))
      .ok_or(ControllerError::MissingVisual { player })?;

    commands.entity(player).insert((
      ControllerRig {
        ground_check,
        visual,
      },
      OriginalAppearance { color },
    ));
    debug!("Wired player {:?}", player);
  }

  Ok(())
}

/// Registers a freshly wired player and loads its saved stats.
pub fn start_player(
  mut players: Query<(Entity, &mut CharacterStats), Added<ControllerRig>>,
  mut manager: ResMut<GameManager>,
  save: Res<SaveManager>,
) {
  for (player, mut stats) in &mut players {
    manager.register_player(player);

    match save.load_player_data() {
      Ok(Some(data)) => {
        data.apply_to(&mut stats);
        info!(
          "Loaded player data: health {}/{}",
          stats.current_health, stats.max_health
        );
      }
      Ok(None) => info!("No player save at {}", save.path().display()),
      Err(e) => warn!("Could not load player data: {}", e),
    }
  }
}

/// Zero health ends the game. Runs once per player.
pub fn check_death(
  mut commands: Commands,
  mut players: Query<
    (Entity, &CharacterStats, &mut PlayerAnimator),
    (With<ControllerRig>, Without<Dead>),
  >,
  mut manager: ResMut<GameManager>,
) {
  for (player, stats, mut animator) in &mut players {
    if !stats.is_dead() {
      continue;
    }

    info!("Player {:?} died", player);
    animator.dead = true;
    commands.entity(player).insert(Dead);
    manager.notify_observers(&mut commands, player);
    manager.game_over();
  }
}
