use bevy::prelude::*;

use super::{palette, spawn_control, spawn_screen_root};
use crate::shared::*;

/// The per-day event view: a headline, six add-event slots in a 3×2 grid
/// and a back arrow. Each slot carries a hidden thumbnail display that
/// the journal fills in (and enables for clicking) once a saved record
/// exists for the shown day.
pub fn spawn_day_view_screen(
    mut commands: Commands,
    mut controls: ResMut<ControlRegistry>,
    mut texts: ResMut<ScreenTextRegistry>,
) {
    let root = spawn_screen_root(&mut commands, ScreenId::DayView, palette::BACKDROP_DAY, false);

    commands.entity(root).with_children(|parent| {
        let title = parent
            .spawn((
                DayViewTitleText,
                Text2d::new(""),
                TextFont {
                    font_size: 40.0,
                    ..default()
                },
                TextColor(Color::srgb(0.15, 0.12, 0.10)),
                Transform::from_xyz(0.0, 3.1, 0.3).with_scale(Vec3::splat(1.0 / WORLD_SCALE)),
            ))
            .id();
        texts.register(ScreenId::DayView, title);

        let slot_size = Vec2::new(2.4, 1.7);
        for slot in 1..=EVENT_SLOTS {
            let col = ((slot - 1) % 3) as f32;
            let row = ((slot - 1) / 3) as f32;
            let pos = Vec2::new(-3.0 + col * 3.0, 0.9 - row * 2.3);

            let button = parent
                .spawn((
                    EventSlotButton { slot },
                    Sprite::from_color(palette::SLOT_EMPTY, slot_size),
                    Transform::from_xyz(pos.x, pos.y, 0.2),
                ))
                .id();
            controls.register(ControlEntry {
                entity: button,
                screen: ScreenId::DayView,
                rect: Rect::from_center_size(pos, slot_size),
                z: 0.2,
                category: ControlCategory::AddEvent,
                payload: ControlPayload::Slot(slot),
                enabled: true,
                pressed_tint: true,
            });

            // Thumbnail overlay: sits above the button, starts hidden and
            // unhittable until the journal loads a record into it.
            let display = parent
                .spawn((
                    EventSlotDisplay { slot },
                    Sprite::from_color(Color::WHITE, slot_size * 0.94),
                    Transform::from_xyz(pos.x, pos.y, 0.3),
                    Visibility::Hidden,
                ))
                .id();
            controls.register(ControlEntry {
                entity: display,
                screen: ScreenId::DayView,
                rect: Rect::from_center_size(pos, slot_size * 0.94),
                z: 0.3,
                category: ControlCategory::SavedImage,
                payload: ControlPayload::Slot(slot),
                enabled: false,
                pressed_tint: false,
            });
        }

        spawn_control(
            parent,
            &mut controls,
            ScreenId::DayView,
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
