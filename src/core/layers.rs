//! Collision layers shared by every collider in the level.
//!
//! - **Membership:** which layer a collider sits on
//! - **Filter:** which layers it is allowed to touch
//!
//! Both sides must accept each other for rapier to report a contact, so the
//! ground check only ever sees colliders on [`GROUND`].

use bevy_rapier2d::prelude::{CollisionGroups, Group};

/// The player's body collider.
pub const PLAYER: Group = Group::GROUP_1;

/// Floors and platforms the player can stand on.
pub const GROUND: Group = Group::GROUP_2;

/// The small sensor under the player's feet.
pub const GROUND_CHECK: Group = Group::GROUP_3;

/// Enemies and spikes.
pub const HAZARD: Group = Group::GROUP_4;

pub fn player_groups() -> CollisionGroups {
  CollisionGroups::new(PLAYER, GROUND | HAZARD)
}

pub fn ground_check_groups() -> CollisionGroups {
  CollisionGroups::new(GROUND_CHECK, GROUND)
}

pub fn ground_groups() -> CollisionGroups {
  CollisionGroups::new(GROUND, PLAYER | GROUND_CHECK | HAZARD)
}

pub fn hazard_groups() -> CollisionGroups {
  CollisionGroups::new(HAZARD, PLAYER | GROUND)
}
