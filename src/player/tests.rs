use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy::transform::TransformPlugin;
use bevy_rapier2d::prelude::*;
use bevy_rapier2d::rapier::geometry::CollisionEventFlags;
use tempfile::TempDir;

use super::components::*;
use super::motor::{AIR_SPEED_FACTOR, JumpState, PlayerMotor};
use super::{ControllerPlugin, controller_bundle};
use crate::config::{GameConfig, PlayerConfig};
use crate::game_state::{EndGameObserver, GameEnded, GameManager, PlayerDefeated, ScenePause};
use crate::save::{PlayerSave, SaveManager};
use crate::stats::CharacterStats;

const TICK_HZ: f64 = 64.0;
const TICK: f32 = 1.0 / 64.0;

fn test_config() -> PlayerConfig {
  let mut config =
    GameConfig::from_toml_str(include_str!("../../assets/config/game.config.toml"))
      .unwrap()
      .player;
  config.spawn_x = 0.0;
  config.spawn_y = 0.0;
  config.run_speed = 320.0;
  config.jump_force = 8.0;
  config.max_air_jumps = 1;
  config.max_health = 10;
  config.defence = 0;
  config.hurt_time = 0.4;
  config.impact_force = 4.0;
  config
}

/// Headless app where every `update()` after the first runs exactly one
/// fixed tick.
fn test_app(save_dir: &TempDir) -> App {
  let mut app = App::new();
  app
    .add_plugins(MinimalPlugins)
    .add_plugins(TransformPlugin)
    .insert_resource(Time::<Fixed>::from_hz(TICK_HZ))
    .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
      1.0 / TICK_HZ,
    )))
    .insert_resource(SaveManager::at(save_dir.path().join("player.toml")))
    .add_message::<CollisionEvent>()
    .add_plugins(ControllerPlugin);
  app
}

struct Harness {
  app: App,
  player: Entity,
  ground_check: Entity,
  visual: Entity,
  _save_dir: TempDir,
}

impl Harness {
  fn new() -> Self {
    Self::with(test_config(), None)
  }

  fn with(config: PlayerConfig, save: Option<PlayerSave>) -> Self {
    let save_dir = tempfile::tempdir().unwrap();
    if let Some(save) = save {
      std::fs::write(
        save_dir.path().join("player.toml"),
        toml::to_string(&save).unwrap(),
      )
      .unwrap();
    }

    let mut app = test_app(&save_dir);
    let player = app
      .world_mut()
      .spawn(controller_bundle(&config, Vec3::ZERO))
      .id();
    // Wires the rig; the first frame has no elapsed time, so no tick yet.
    app.update();

    let rig = *app
      .world()
      .get::<ControllerRig>(player)
      .expect("player should be wired after the first frame");

    Self {
      app,
      player,
      ground_check: rig.ground_check,
      visual: rig.visual,
      _save_dir: save_dir,
    }
  }

  fn tick(&mut self) {
    self.app.update();
  }

  fn ticks(&mut self, count: usize) {
    for _ in 0..count {
      self.app.update();
    }
  }

  fn stand_on_ground(&mut self) {
    let ground = self.app.world_mut().spawn_empty().id();
    self
      .app
      .world_mut()
      .get_mut::<GroundContacts>(self.ground_check)
      .unwrap()
      .0
      .insert(ground);
  }

  fn input(&mut self) -> Mut<'_, ControllerInput> {
    self
      .app
      .world_mut()
      .get_mut::<ControllerInput>(self.player)
      .unwrap()
  }

  fn motor(&self) -> &PlayerMotor {
    self.app.world().get::<PlayerMotor>(self.player).unwrap()
  }

  fn motor_mut(&mut self) -> Mut<'_, PlayerMotor> {
    self
      .app
      .world_mut()
      .get_mut::<PlayerMotor>(self.player)
      .unwrap()
  }

  fn velocity(&self) -> Vec2 {
    self.app.world().get::<Velocity>(self.player).unwrap().linvel
  }

  fn set_velocity(&mut self, linvel: Vec2) {
    self
      .app
      .world_mut()
      .get_mut::<Velocity>(self.player)
      .unwrap()
      .linvel = linvel;
  }

  fn stats(&self) -> &CharacterStats {
    self.app.world().get::<CharacterStats>(self.player).unwrap()
  }

  fn is_hurt(&self) -> bool {
    self.app.world().get::<HurtFlash>(self.player).is_some()
  }

  fn is_dead(&self) -> bool {
    self.app.world().get::<Dead>(self.player).is_some()
  }

  fn sprite_color(&self) -> Color {
    self.app.world().get::<Sprite>(self.visual).unwrap().color
  }

  /// An enemy body at `position` with a hitbox child that deals `damage`.
  /// The hitbox sits one unit above the body. Returns the hitbox, which is
  /// what rapier reports contacts against.
  fn spawn_enemy(&mut self, position: Vec2, damage: u32) -> Entity {
    let body = self
      .app
      .world_mut()
      .spawn((Transform::from_translation(position.extend(0.0)), EndGameObserver))
      .id();
    let hitbox = self
      .app
      .world_mut()
      .spawn((
        Enemy,
        CharacterStats::attacker(damage),
        Transform::from_xyz(0.0, 1.0, 0.0),
        ChildOf(body),
      ))
      .id();
    // Propagate transforms before anything touches the enemy.
    self.tick();
    hitbox
  }

  fn collide(&mut self, other: Entity) {
    self.app.world_mut().write_message(CollisionEvent::Started(
      self.player,
      other,
      CollisionEventFlags::empty(),
    ));
  }
}

#[test]
fn grounded_jump_launches_with_jump_force() {
  let mut h = Harness::new();
  h.stand_on_ground();
  h.tick();
  assert_eq!(h.motor().state, JumpState::Idle);

  h.input().jump_pressed = true;
  h.tick();

  assert_eq!(h.velocity().y, 8.0);
  assert_eq!(h.motor().state, JumpState::Jumping);
  assert_eq!(h.motor().speed, 320.0 * AIR_SPEED_FACTOR);
  assert!(!h.input().jump_pressed, "the tick consumes the jump edge");
}

#[test]
fn descending_while_airborne_switches_to_falling() {
  let mut h = Harness::new();
  h.motor_mut().state = JumpState::Jumping;
  h.set_velocity(Vec2::new(0.0, -1.0));

  h.tick();

  assert!(!h.app.world().get::<Grounded>(h.player).unwrap().0);
  assert_eq!(h.motor().state, JumpState::Falling);
}

#[test]
fn air_jump_is_spent_once() {
  let mut h = Harness::new();
  h.set_velocity(Vec2::new(0.0, -1.0));

  h.input().jump_pressed = true;
  h.tick();
  assert_eq!(h.velocity().y, 8.0);
  assert_eq!(h.motor().air_jumps_left, 0);

  h.set_velocity(Vec2::new(0.0, -1.0));
  h.input().jump_pressed = true;
  h.tick();

  assert_eq!(h.velocity().y, -1.0);
  assert_eq!(h.motor().air_jumps_left, 0);
  assert_eq!(h.motor().state, JumpState::Falling);
}

#[test]
fn horizontal_input_sets_velocity_and_facing() {
  let mut h = Harness::new();
  h.stand_on_ground();
  h.set_velocity(Vec2::new(0.0, -0.5));

  h.input().horizontal = -1.0;
  h.tick();

  assert_eq!(h.velocity(), Vec2::new(-320.0 * TICK, -0.5));
  assert_eq!(
    *h.app.world().get::<Facing>(h.player).unwrap(),
    Facing::Left
  );
  let scale = h.app.world().get::<Transform>(h.visual).unwrap().scale;
  assert_eq!(scale.x, -1.0);

  h.input().horizontal = 0.5;
  h.tick();

  assert_eq!(h.velocity().x, 0.5 * 320.0 * TICK);
  let scale = h.app.world().get::<Transform>(h.visual).unwrap().scale;
  assert_eq!(scale.x, 1.0);
}

#[test]
fn no_horizontal_input_leaves_velocity_alone() {
  let mut h = Harness::new();
  h.stand_on_ground();
  h.set_velocity(Vec2::new(3.0, 0.0));

  h.tick();

  assert_eq!(h.velocity().x, 3.0);
}

#[test]
fn ground_sensor_events_drive_grounded() {
  let mut h = Harness::new();
  let ground = h.app.world_mut().spawn_empty().id();

  h.app.world_mut().write_message(CollisionEvent::Started(
    h.ground_check,
    ground,
    CollisionEventFlags::SENSOR,
  ));
  h.tick();
  assert!(h.app.world().get::<Grounded>(h.player).unwrap().0);

  h.app.world_mut().write_message(CollisionEvent::Stopped(
    ground,
    h.ground_check,
    CollisionEventFlags::SENSOR,
  ));
  h.tick();
  assert!(!h.app.world().get::<Grounded>(h.player).unwrap().0);
}

#[test]
fn enemy_contact_hurts_and_knocks_back() {
  let mut h = Harness::new();
  let hitbox = h.spawn_enemy(Vec2::new(3.0, 0.0), 4);

  h.collide(hitbox);
  h.tick();

  assert_eq!(h.stats().current_health, 6);
  assert!(h.is_hurt());
  // Pushed away from the body at (3, 0), not the hitbox at (3, 1).
  assert_eq!(h.velocity(), Vec2::new(-12.0, 0.0));
  assert_eq!(h.sprite_color(), Color::srgb(1.0, 0.0, 0.0));
}

#[test]
fn contact_without_stats_is_ignored() {
  let mut h = Harness::new();
  let stranger = h
    .app
    .world_mut()
    .spawn((Enemy, Transform::from_xyz(1.0, 0.0, 0.0)))
    .id();
  h.tick();

  h.collide(stranger);
  h.tick();

  assert_eq!(h.stats().current_health, 10);
  assert!(!h.is_hurt());
  assert_eq!(h.velocity(), Vec2::ZERO);
}

#[test]
fn hurt_suspends_movement_and_jumping() {
  let mut h = Harness::new();
  h.stand_on_ground();
  h.tick();

  h.app
    .world_mut()
    .entity_mut(h.player)
    .insert(HurtFlash::new(10.0));
  h.input().horizontal = 1.0;
  h.input().jump_pressed = true;
  h.ticks(3);

  assert_eq!(h.velocity(), Vec2::ZERO);
  assert_eq!(h.motor().state, JumpState::Idle);
}

#[test]
fn hurt_flash_restores_original_tint() {
  let mut h = Harness::new();
  let original = h.sprite_color();
  let hitbox = h.spawn_enemy(Vec2::new(-2.0, 0.0), 1);

  h.collide(hitbox);
  h.tick();
  h.ticks(20);
  assert!(h.is_hurt());
  assert_ne!(h.sprite_color(), original);

  h.ticks(10);
  assert!(!h.is_hurt());
  assert_eq!(h.sprite_color(), original);
}

#[test]
fn repeated_hits_restart_the_flash() {
  let mut h = Harness::new();
  let original = h.sprite_color();
  let hitbox = h.spawn_enemy(Vec2::new(2.0, 0.0), 1);

  h.collide(hitbox);
  h.tick();
  h.ticks(20);

  h.collide(hitbox);
  h.tick();
  h.ticks(20);
  // 0.65s after the first hit, but only 0.33s after the second.
  assert!(h.is_hurt());
  assert_eq!(h.stats().current_health, 8);

  h.ticks(10);
  assert!(!h.is_hurt());
  assert_eq!(h.sprite_color(), original);
}

#[test]
fn despawning_cancels_a_pending_flash() {
  let mut h = Harness::new();
  let hitbox = h.spawn_enemy(Vec2::new(2.0, 0.0), 1);
  h.collide(hitbox);
  h.tick();
  assert!(h.is_hurt());

  h.app.world_mut().entity_mut(h.player).despawn();
  h.ticks(40);

  assert!(h.app.world().get_entity(h.player).is_err());
  assert!(h.app.world().get_entity(h.visual).is_err());
  let mut flashes = h.app.world_mut().query::<&HurtFlash>();
  assert_eq!(flashes.iter(h.app.world()).count(), 0);
}

#[derive(Resource, Default)]
struct DefeatCount(u32);

#[test]
fn lethal_hit_ends_the_game_once() {
  let mut h = Harness::new();
  h.app.init_resource::<DefeatCount>();
  h.app
    .add_observer(|_: On<PlayerDefeated>, mut count: ResMut<DefeatCount>| {
      count.0 += 1;
    });
  let hitbox = h.spawn_enemy(Vec2::new(1.0, 0.0), 10);

  h.collide(hitbox);
  h.tick();

  assert_eq!(h.stats().current_health, 0);
  assert!(h.is_hurt());
  assert!(h.is_dead());
  assert!(h.app.world().resource::<GameManager>().is_over());
  assert!(h.app.world().get::<PlayerAnimator>(h.player).unwrap().dead);

  h.ticks(5);
  assert_eq!(h.app.world().resource::<DefeatCount>().0, 1);

  let enemy_body = h.app.world().get::<ChildOf>(hitbox).unwrap().parent();
  assert!(h.app.world().get::<GameEnded>(enemy_body).is_some());
}

#[test]
fn dead_player_stops_reacting() {
  let mut h = Harness::new();
  let hitbox = h.spawn_enemy(Vec2::new(1.0, 0.0), 10);
  h.collide(hitbox);
  h.tick();
  assert!(h.is_dead());
  h.ticks(40);
  assert!(!h.is_hurt());

  h.stand_on_ground();
  h.set_velocity(Vec2::ZERO);
  h.input().horizontal = 1.0;
  h.input().jump_pressed = true;
  h.collide(hitbox);
  h.ticks(3);

  assert_eq!(h.velocity(), Vec2::ZERO);
  assert!(!h.is_hurt());
  assert_eq!(h.stats().current_health, 0);
}

#[test]
fn spikes_hurt_on_every_tick_of_overlap() {
  let mut h = Harness::new();
  let spike = h
    .app
    .world_mut()
    .spawn((
      Spike,
      CharacterStats::attacker(1),
      Transform::from_xyz(0.0, -1.0, 0.0),
    ))
    .id();
  h.tick();

  h.app.world_mut().write_message(CollisionEvent::Started(
    spike,
    h.player,
    CollisionEventFlags::SENSOR,
  ));
  h.tick();
  assert_eq!(h.stats().current_health, 9);
  assert_eq!(h.velocity(), Vec2::new(0.0, 4.0));

  h.tick();
  assert_eq!(h.stats().current_health, 8);

  h.app.world_mut().write_message(CollisionEvent::Stopped(
    spike,
    h.player,
    CollisionEventFlags::SENSOR,
  ));
  h.ticks(3);
  assert_eq!(h.stats().current_health, 8);
}

#[test]
fn paused_scene_freezes_the_tick() {
  let mut h = Harness::new();
  h.stand_on_ground();
  h.tick();

  h.app.world_mut().resource_mut::<ScenePause>().paused = true;
  h.input().jump_pressed = true;
  h.tick();
  assert_eq!(h.velocity(), Vec2::ZERO);
  assert!(h.input().jump_pressed);

  h.app.world_mut().resource_mut::<ScenePause>().paused = false;
  h.tick();
  assert_eq!(h.velocity().y, 8.0);
}

#[test]
fn animator_follows_controller_state() {
  let mut h = Harness::new();
  h.stand_on_ground();
  h.tick();
  assert_eq!(
    *h.app.world().get::<PlayerAnimator>(h.player).unwrap(),
    PlayerAnimator {
      idle: true,
      ..default()
    }
  );

  h.input().jump_pressed = true;
  h.tick();
  let animator = *h.app.world().get::<PlayerAnimator>(h.player).unwrap();
  assert!(animator.jump);
  assert!(!animator.idle);
}

#[test]
fn saved_stats_replace_configured_ones() {
  let save = PlayerSave {
    max_health: 50,
    current_health: 20,
    damage: 3,
    defence: 1,
  };
  let h = Harness::with(test_config(), Some(save));

  assert_eq!(
    *h.stats(),
    CharacterStats {
      max_health: 50,
      current_health: 20,
      damage: 3,
      defence: 1,
    }
  );
  assert_eq!(
    h.app.world().resource::<GameManager>().player(),
    Some(h.player)
  );
}

#[test]
#[should_panic]
fn player_without_ground_check_fails_to_wire() {
  let save_dir = tempfile::tempdir().unwrap();
  let mut app = test_app(&save_dir);

  app.world_mut().spawn((
    Player,
    CharacterStats::new(10, 1, 0),
    children![(PlayerVisual, Sprite::default())],
  ));
  app.update();
}
