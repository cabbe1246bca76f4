use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::shared::*;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PointerInput>()
            .add_systems(PreUpdate, read_pointer);
    }
}

/// The single point where hardware input becomes pointer actions.
///
/// Converts the cursor into world coordinates through the 2D camera and
/// snapshots press/release edges for this frame. Domains only ever read
/// the resulting `PointerInput` resource.
fn read_pointer(
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<Camera2d>>,
    mut pointer: ResMut<PointerInput>,
) {
    pointer.pressed = mouse.just_pressed(MouseButton::Left);
    pointer.released = mouse.just_released(MouseButton::Left);
    pointer.world_pos = None;

    let Ok(window) = windows.get_single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Ok((camera, camera_transform)) = cameras.get_single() else {
        return;
    };
    if let Ok(world) = camera.viewport_to_world_2d(camera_transform, cursor) {
        pointer.world_pos = Some(world);
    }
}
