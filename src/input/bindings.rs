use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;

use super::actions::{Jump, Move, Pause, PlayerInput};

pub fn player_input_actions() -> impl Bundle {
  actions!(PlayerInput[
      (
          Action::<Move>::new(),
          Bindings::spawn((
              Bidirectional::ad_keys(),
              Bidirectional::left_right_arrow(),
          )),
      ),
      (
          Action::<Jump>::new(),
          bindings![KeyCode::Space],
      ),
      (
          Action::<Pause>::new(),
          bindings![KeyCode::Escape],
      ),
  ])
}
