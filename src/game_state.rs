//! Scene-wide state the player controller reports to: who the player is,
//! whether the game is over, and whether the scene is paused.

use bevy::prelude::*;

pub struct GameStatePlugin;

impl Plugin for GameStatePlugin {
  fn build(&self, app: &mut App) {
    app
      .init_resource::<GameManager>()
      .init_resource::<ScenePause>()
      .add_observer(broadcast_game_end);
  }
}

#[derive(Resource, Debug, Default)]
pub struct GameManager {
  player: Option<Entity>,
  over: bool,
}

impl GameManager {
  pub fn register_player(&mut self, player: Entity) {
    if let Some(previous) = self.player.replace(player) {
      if previous != player {
        warn!("Player {:?} replaces registered player {:?}", player, previous);
      }
    }
    info!("Registered player {:?}", player);
  }

  pub fn player(&self) -> Option<Entity> {
    self.player
  }

  /// Tells every [`EndGameObserver`] that `player` has been defeated.
  pub fn notify_observers(&self, commands: &mut Commands, player: Entity) {
    commands.trigger(PlayerDefeated { player });
  }

  pub fn game_over(&mut self) {
    if !self.over {
      self.over = true;
      info!("Game over");
    }
  }

  pub fn is_over(&self) -> bool {
    self.over
  }
}

/// Polled by the controller every frame and physics tick.
#[derive(Resource, Debug, Default)]
pub struct ScenePause {
  pub paused: bool,
}

/// Run condition: true while the scene is not paused.
pub fn not_paused(pause: Res<ScenePause>) -> bool {
  !pause.paused
}

#[derive(Event, Debug, Clone, Copy)]
pub struct PlayerDefeated {
  pub player: Entity,
}

/// Entities that want to hear about the end of the game.
#[derive(Component, Debug, Default)]
pub struct EndGameObserver;

/// Inserted on every [`EndGameObserver`] once the player is defeated.
#[derive(Component, Debug)]
pub struct GameEnded;

fn broadcast_game_end(
  defeated: On<PlayerDefeated>,
  mut commands: Commands,
  observers: Query<Entity, (With<EndGameObserver>, Without<GameEnded>)>,
) {
  let mut notified = 0;
  for entity in &observers {
    commands.entity(entity).insert(GameEnded);
    notified += 1;
  }
  debug!(
    "Player {:?} defeated, notified {} observers",
    defeated.event().player,
    notified
  );
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn game_over_is_idempotent() {
    let mut manager = GameManager::default();
    assert!(!manager.is_over());

    manager.game_over();
    manager.game_over();

    assert!(manager.is_over());
  }

  #[test]
  fn observers_receive_game_end() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins).add_plugins(GameStatePlugin);

    let watcher = app.world_mut().spawn(EndGameObserver).id();
    let bystander = app.world_mut().spawn_empty().id();
    let player = app.world_mut().spawn_empty().id();

    app.world_mut().trigger(PlayerDefeated { player });
    app.update();

    assert!(app.world().get::<GameEnded>(watcher).is_some());
    assert!(app.world().get::<GameEnded>(bystander).is_none());
  }
}
