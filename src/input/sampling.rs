use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;

use super::actions::{Jump, Move, Pause, PlayerInput};
use crate::game_state::ScenePause;
use crate::player::components::{ControllerInput, Dead, HurtFlash, Player};

/// Copies the action values into [`ControllerInput`].
///
/// The jump edge is latched here and cleared by the physics tick that
/// consumes it, so a press between two ticks is never lost. Hurt players
/// get neither movement nor jumps.
pub fn sample_player_input(
  mut players: Query<
    (&Actions<PlayerInput>, &mut ControllerInput, Has<HurtFlash>),
    (With<Player>, Without<Dead>),
  >,
  move_actions: Query<(&Action<Move>, &ActionState)>,
  jump_actions: Query<&ActionState, With<Action<Jump>>>,
) {
  for (actions, mut input, hurt) in &mut players {
    let mut move_value = 0.0;
    let mut jump_held = false;

    for action_entity in actions.iter() {
      if let Ok((action, action_state)) = move_actions.get(action_entity) {
        // Only use input when action is active (Fired or Ongoing)
        if matches!(action_state, ActionState::Fired | ActionState::Ongoing) {
          move_value = (**action).clamp(-1.0, 1.0);
        }
      }
      if let Ok(action_state) = jump_actions.get(action_entity) {
        jump_held |= matches!(action_state, ActionState::Fired | ActionState::Ongoing);
      }
    }

    latch_input(&mut input, move_value, jump_held, hurt);
  }
}

/// Applies one frame of raw input. The held state is tracked even while
/// hurt, so a button kept down through the flash cannot fire a second jump.
pub fn latch_input(input: &mut ControllerInput, horizontal: f32, jump_held: bool, hurt: bool) {
  if hurt {
    input.horizontal = 0.0;
    input.jump_pressed = false;
  } else {
    input.horizontal = horizontal;
    if jump_held && !input.jump_held {
      input.jump_pressed = true;
    }
  }
  input.jump_held = jump_held;
}

/// Escape toggles the pause. Pausing also stops virtual time, which halts
/// the fixed loop and the hurt-flash timer.
pub fn toggle_pause(
  actions: Query<&Actions<PlayerInput>>,
  pause_actions: Query<&ActionState, With<Action<Pause>>>,
  mut was_held: Local<bool>,
  mut pause: ResMut<ScenePause>,
  mut time: ResMut<Time<Virtual>>,
) {
  let held = actions.iter().any(|actions| {
    actions.iter().any(|action_entity| {
      pause_actions
        .get(action_entity)
        .is_ok_and(|state| matches!(state, ActionState::Fired | ActionState::Ongoing))
    })
  });

  if held && !*was_held {
    pause.paused = !pause.paused;
    if pause.paused {
      time.pause();
      info!("Paused");
    } else {
      time.unpause();
      info!("Resumed");
    }
  }
  *was_held = held;
}
