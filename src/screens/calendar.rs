use bevy::prelude::*;

use super::{palette, spawn_control, spawn_screen_root};
use crate::shared::*;

/// Static part of the calendar screen: month headline, weekday strip and
/// the back arrow. The date cells themselves are populated by the
/// journal, which owns the month-grid math.
pub fn spawn_calendar_screen(
    mut commands: Commands,
    mut controls: ResMut<ControlRegistry>,
    mut texts: ResMut<ScreenTextRegistry>,
) {
    let root = spawn_screen_root(
        &mut commands,
        ScreenId::Calendar,
        palette::BACKDROP_CALENDAR,
        false,
    );

    commands.entity(root).with_children(|parent| {
        let month = parent
            .spawn((
                CalendarMonthText,
                Text2d::new(""),
                TextFont {
                    font_size: 45.0,
                    ..default()
                },
                TextColor(Color::srgb(0.15, 0.12, 0.10)),
                Transform::from_xyz(0.0, 3.1, 0.3).with_scale(Vec3::splat(1.0 / WORLD_SCALE)),
            ))
            .id();
        texts.register(ScreenId::Calendar, month);

        for (i, name) in ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"]
            .iter()
            .enumerate()
        {
            let x = CAL_GRID_ORIGIN.x + i as f32 * CAL_COLUMN_OFFSET;
            super::spawn_label(
                parent,
                &mut texts,
                ScreenId::Calendar,
                name,
                Vec2::new(x, CAL_GRID_ORIGIN.y + 0.75),
                24.0,
            );
        }

        spawn_control(
            parent,
            &mut controls,
            ScreenId::Calendar,
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
