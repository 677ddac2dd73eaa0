mod animation;
pub mod components;
mod contacts;
pub mod damage;
pub mod error;
mod lifecycle;
pub mod motor;
pub mod movement;
mod spawn;

#[cfg(test)]
mod tests;

use bevy::prelude::*;

pub use damage::{HazardContact, HazardKind};
pub use error::ControllerError;
pub use motor::{JumpState, PlayerMotor};
pub use spawn::controller_bundle;

use crate::game_state::{GameStatePlugin, not_paused};

/// Spawns the player from config and runs its controller.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
  fn build(&self, app: &mut App) {
    app
      .add_plugins(ControllerPlugin)
      .add_systems(Startup, spawn::spawn_player);
  }
}

/// The controller systems on their own: no spawning, no input bindings, no
/// physics backend. Expects a [`crate::save::SaveManager`] resource.
pub struct ControllerPlugin;

impl Plugin for ControllerPlugin {
  fn build(&self, app: &mut App) {
    app
      .add_plugins(GameStatePlugin)
      .add_message::<HazardContact>()
      // Wire children, then register and load the save
      .add_systems(
        PreUpdate,
        (lifecycle::wire_player, lifecycle::start_player).chain(),
      )
      // Contacts from the previous physics step
      .add_systems(FixedPreUpdate, contacts::track_contacts)
      .add_systems(
        FixedUpdate,
        (
          movement::detect_ground,
          movement::step_jump,
          movement::apply_movement,
          contacts::emit_spike_contacts,
        )
          .chain()
          .run_if(not_paused),
      )
      .add_systems(
        Update,
        (
          damage::apply_hazard_damage.run_if(not_paused),
          damage::tick_hurt_flash,
          lifecycle::check_death,
          animation::sync_animation_flags,
        )
          .chain(),
      );
  }
}
