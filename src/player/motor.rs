//! Jump, fall and air-jump bookkeeping for one physics tick.

use bevy::prelude::*;

use super::components::CharacterData;

/// Horizontal speed while airborne, as a fraction of the run speed.
pub const AIR_SPEED_FACTOR: f32 = 0.9;

/// Vertical speeds below this count as "not rising".
pub const RISING_THRESHOLD: f32 = 0.1;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpState {
  #[default]
  Idle,
  Jumping,
  Falling,
}

#[derive(Component, Debug, Clone)]
pub struct PlayerMotor {
  pub speed: f32,
  pub run_speed: f32,
  pub jump_force: f32,
  pub max_air_jumps: u32,
  pub air_jumps_left: u32,
  pub state: JumpState,
}

impl PlayerMotor {
  pub fn new(data: &CharacterData) -> Self {
    Self {
      speed: data.run_speed,
      run_speed: data.run_speed,
      jump_force: data.jump_force,
      max_air_jumps: data.max_air_jumps,
      air_jumps_left: data.max_air_jumps,
      state: JumpState::Idle,
    }
  }

  /// Runs the jump rules for one tick and returns whether the player jumped.
  ///
  /// The rules are evaluated in a fixed order and later ones see the velocity
  /// written by earlier ones, so a launch this tick is never mistaken for a
  /// landing.
  pub fn step(&mut self, grounded: bool, jump_pressed: bool, velocity: &mut Vec2) -> bool {
    let mut launched = false;

    if grounded && jump_pressed {
      self.launch(velocity);
      launched = true;
    } else if !grounded && velocity.y < RISING_THRESHOLD {
      self.state = JumpState::Falling;
    }

    if grounded && velocity.y < RISING_THRESHOLD {
      self.speed = self.run_speed;
      self.air_jumps_left = self.max_air_jumps;
    } else if !grounded && jump_pressed && self.air_jumps_left > 0 {
      self.launch(velocity);
      self.air_jumps_left -= 1;
      launched = true;
    }

    if self.state == JumpState::Jumping && grounded {
      // Touched down exactly at the apex.
      if velocity.y < RISING_THRESHOLD {
        self.state = JumpState::Falling;
      }
    } else if grounded {
      self.state = JumpState::Idle;
    }

    launched
  }

  fn launch(&mut self, velocity: &mut Vec2) {
    self.speed = self.run_speed * AIR_SPEED_FACTOR;
    velocity.y = self.jump_force;
    self.state = JumpState::Jumping;
  }
}
