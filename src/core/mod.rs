pub(crate) mod camera;
pub mod layers;
mod physics;

use bevy::prelude::*;

pub use physics::PhysicsPlugin;

pub struct CorePlugin;

impl Plugin for CorePlugin {
  fn build(&self, app: &mut App) {
    app
      .add_plugins(PhysicsPlugin)
      .add_systems(Startup, camera::setup_camera)
      .add_systems(PostUpdate, camera::camera_follow);
  }
}
