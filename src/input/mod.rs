pub mod actions;
mod bindings;
mod sampling;

pub use actions::{Jump, Move, Pause, PlayerInput};
use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;
pub use bindings::player_input_actions;

use crate::game_state::not_paused;

pub struct InputPlugin;

impl Plugin for InputPlugin {
  fn build(&self, app: &mut App) {
    app
      .add_plugins(EnhancedInputPlugin)
      .add_input_context::<PlayerInput>()
      .add_systems(
        Update,
        (
          sampling::toggle_pause,
          sampling::sample_player_input.run_if(not_paused),
        )
          .chain(),
      );
  }
}
