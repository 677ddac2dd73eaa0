mod level;

use bevy::prelude::*;

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
  fn build(&self, app: &mut App) {
    app
      .add_systems(Startup, level::spawn_level)
      .add_systems(Update, level::tint_ended_enemies);
  }
}
