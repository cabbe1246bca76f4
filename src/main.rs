mod shared;
mod input;
mod navigation;
mod wizard;
mod journal;
mod screens;
mod store;
mod data;

use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};

use shared::*;

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Daybook".into(),
                        resolution: WindowResolution::new(
                            CAPTURE_WIDTH as f32,
                            CAPTURE_HEIGHT as f32,
                        ),
                        present_mode: PresentMode::AutoVsync,
                        resizable: false,
                        ..default()
                    }),
                    ..default()
                })
                .set(ImagePlugin::default_nearest()),
        )
        // App state
        .init_state::<AppState>()
        // Events
        .add_event::<WizardAssignEvent>()
        .add_event::<WizardResetEvent>()
        .add_event::<DayViewRequestEvent>()
        .add_event::<ImageViewRequestEvent>()
        .add_event::<RecordSavedEvent>()
        .add_event::<SaveFailedEvent>()
        .add_event::<SelectionRejectedEvent>()
        // Domain plugins
        .add_plugins(data::DataPlugin)
        .add_plugins(input::InputPlugin)
        .add_plugins(store::StorePlugin)
        .add_plugins(screens::ScreensPlugin)
        .add_plugins(navigation::NavigationPlugin)
        .add_plugins(wizard::WizardPlugin)
        .add_plugins(journal::JournalPlugin)
        // Camera
        .add_systems(Startup, setup_camera)
        .run();
}

fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Transform::from_scale(Vec3::splat(1.0 / WORLD_SCALE)),
    ));
}
