use bevy::prelude::*;

use super::{palette, spawn_control, spawn_screen_root};
use crate::shared::*;
use crate::store::EventImageStore;

/// Full-screen display for a single saved event image.
pub fn spawn_image_view_screen(
    mut commands: Commands,
    mut controls: ResMut<ControlRegistry>,
) {
    let root = spawn_screen_root(
        &mut commands,
        ScreenId::ImageView,
        palette::BACKDROP_DARK,
        false,
    );

    commands.entity(root).with_children(|parent| {
        parent.spawn((
            SceneViewDisplay,
            Sprite::from_color(Color::WHITE, Vec2::new(8.2, 6.1)),
            Transform::from_xyz(0.0, 0.2, 0.1),
        ));

        spawn_control(
            parent,
            &mut controls,
            ScreenId::ImageView,
            ControlCategory::Back,
            ControlPayload::None,
            Vec2::new(-4.6, 3.3),
            Vec2::new(0.7, 0.7),
            0.2,
            palette::ARROW,
            true,
        );
    });
}

/// Swaps the clicked day-view thumbnail onto the big display as the
/// transition into the image view starts.
pub fn handle_image_view_request(
    mut events: EventReader<ImageViewRequestEvent>,
    store: Res<EventImageStore>,
    mut images: ResMut<Assets<Image>>,
    mut displays: Query<&mut Sprite, With<SceneViewDisplay>>,
) {
    for event in events.read() {
        let raster = match store.load_image(&event.path) {
            Ok(raster) => raster,
            Err(err) => {
                warn!("[Screens] Image view load failed: {}", err);
                continue;
            }
        };
        let handle = images.add(texture_from_rgba(&raster));
        for mut sprite in &mut displays {
            sprite.image = handle.clone();
            sprite.custom_size = Some(Vec2::new(8.2, 6.1));
        }
        info!("[Screens] Image view showing {}", event.path.display());
    }
}
