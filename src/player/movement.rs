use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::{
  ControllerInput, ControllerRig, Dead, Facing, GroundCheck, GroundContacts, Grounded, HurtFlash,
  Player, PlayerVisual,
};
use super::motor::PlayerMotor;

/// Publishes the ground-check sensor's overlap state. Must run before the
/// jump and movement systems on every tick.
pub fn detect_ground(
  mut players: Query<(&ControllerRig, &mut Grounded), (With<Player>, Without<Dead>)>,
  ground_checks: Query<&GroundContacts, With<GroundCheck>>,
) {
  for (rig, mut grounded) in &mut players {
    let on_ground = ground_checks
      .get(rig.ground_check)
      .is_ok_and(|contacts| !contacts.is_empty());
    grounded.set_if_neq(Grounded(on_ground));
  }
}

pub fn step_jump(
  mut players: Query<
    (
      &mut PlayerMotor,
      &mut Velocity,
      &Grounded,
      &mut ControllerInput,
    ),
    (With<Player>, Without<Dead>, Without<HurtFlash>),
  >,
) {
  for (mut motor, mut velocity, grounded, mut input) in &mut players {
    let jump_pressed = std::mem::take(&mut input.jump_pressed);
    let previous = motor.state;

    if motor.step(grounded.0, jump_pressed, &mut velocity.linvel) {
      debug!(
        "Jump: grounded={}, air_jumps_left={}",
        grounded.0, motor.air_jumps_left
      );
    }
    if motor.state != previous {
      trace!("Jump state {:?} -> {:?}", previous, motor.state);
    }
  }
}

/// Horizontal velocity for one tick. The axis is scaled by the tick length,
/// so `speed` is expressed per tick rather than per second.
pub fn horizontal_velocity(horizontal: f32, speed: f32, timestep: f32) -> f32 {
  horizontal * speed * timestep
}

pub fn apply_movement(
  mut players: Query<
    (
      &PlayerMotor,
      &ControllerInput,
      &ControllerRig,
      &mut Velocity,
      &mut Facing,
    ),
    (With<Player>, Without<Dead>, Without<HurtFlash>),
  >,
  mut visuals: Query<&mut Transform, With<PlayerVisual>>,
  time: Res<Time<Fixed>>,
) {
  let timestep = time.timestep().as_secs_f32();

  for (motor, input, rig, mut velocity, mut facing) in &mut players {
    if input.horizontal == 0.0 {
      continue;
    }

    velocity.linvel.x = horizontal_velocity(input.horizontal, motor.speed, timestep);
    facing.set_if_neq(Facing::from_axis(input.horizontal));

    if let Ok(mut visual) = visuals.get_mut(rig.visual) {
      visual.scale.x = facing.sign() * visual.scale.x.abs();
    }
  }
}
