use bevy::prelude::*;

use super::components::{Dead, HurtFlash, PlayerAnimator};
use super::motor::{JumpState, PlayerMotor};

/// Mirrors controller state into the animator flags once per frame.
pub fn sync_animation_flags(
  mut players: Query<(&PlayerMotor, Has<HurtFlash>, Has<Dead>, &mut PlayerAnimator)>,
) {
  for (motor, hurt, dead, mut animator) in &mut players {
    animator.set_if_neq(PlayerAnimator {
      idle: motor.state == JumpState::Idle,
      jump: motor.state == JumpState::Jumping,
      fall: motor.state == JumpState::Falling,
      hurt,
      dead,
    });
  }
}
