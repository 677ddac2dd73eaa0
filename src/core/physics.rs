use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
  fn build(&self, app: &mut App) {
    // Step rapier on the fixed clock so ground contacts and velocities change
    // at the same cadence as the controller's physics tick.
    app.add_plugins(RapierPhysicsPlugin::<NoUserData>::default().in_fixed_schedule());
  }
}
