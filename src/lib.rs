//! Player controller for a 2D platformer.
//!
//! The controller reads input, resolves ground contact, runs the jump/fall
//! state machine, reacts to enemies and spikes with damage, knockback and a
//! hurt flash, and reports death to the [`game_state::GameManager`].

pub mod config;
pub mod core;
pub mod game_state;
pub mod input;
pub mod player;
pub mod save;
pub mod stats;
pub mod world;
