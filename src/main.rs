mod camera;
mod content;
mod core;
#[cfg(feature = "dev-tools")]
mod debug;
mod grid;
mod level;
mod movement;
mod probe;
mod save;
mod ui;

use avian3d::prelude::*;
use bevy::prelude::*;

fn main() {
    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "KulaWarp".to_string(),
            resolution: (1280, 720).into(),
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    .add_plugins(PhysicsPlugins::default())
    .insert_resource(ClearColor(Color::srgb(0.05, 0.06, 0.09)))
    .add_plugins((
        core::CorePlugin,
        content::ContentPlugin,
        save::SavePlugin,
        movement::MovementPlugin,
        camera::CameraPlugin,
        level::LevelPlugin,
        ui::UiPlugin,
    ));

    #[cfg(feature = "dev-tools")]
    app.add_plugins(debug::DebugPlugin);

    app.run();
}
