use bevy::{
  prelude::*,
  window::{PresentMode, WindowResolution},
};
use platformer::{config, core, input, player, save, world};

fn main() -> AppExit {
  let config = match config::GameConfig::load_startup() {
    Ok(config) => config,
    Err(e) => {
      eprintln!("{}: {}", config::CONFIG_FILE_PATH, e);
      return AppExit::error();
    }
  };

  let mut app = App::new();

  app.insert_resource(Time::<Fixed>::from_hz(60.0));

  app
    .add_plugins(
      DefaultPlugins
        .set(ImagePlugin::default_nearest())
        .set(WindowPlugin {
          primary_window: Some(Window {
            resolution: WindowResolution::new(config.window.width, config.window.height),
            title: config.window.title.clone(),
            present_mode: PresentMode::AutoVsync,
            ..default()
          }),
          ..default()
        }),
    )
    .insert_resource(config::ConfigLoaded::from(config))
    .add_plugins(config::ConfigPlugin)
    .add_plugins(core::CorePlugin)
    .add_plugins(input::InputPlugin)
    .add_plugins(save::SavePlugin)
    .add_plugins(player::PlayerPlugin)
    .add_plugins(world::WorldPlugin);

  app.run()
}
