use bevy::prelude::*;

use super::{palette, spawn_control, spawn_label, spawn_screen_root};
use crate::shared::*;

/// The first screen the user sees: today's date and the three entry
/// points (calendar, today, review).
pub fn spawn_main_menu(
    mut commands: Commands,
    mut controls: ResMut<ControlRegistry>,
    mut texts: ResMut<ScreenTextRegistry>,
    today: Res<TodayDate>,
) {
    let root = spawn_screen_root(&mut commands, ScreenId::MainMenu, palette::BACKDROP_PAPER, true);
    let month_label = today.0.format("%B").to_string();
    let day_label = today.0.format("%d").to_string();

    commands.entity(root).with_children(|parent| {
        spawn_label(
            parent,
            &mut texts,
            ScreenId::MainMenu,
            "Daybook",
            Vec2::new(0.0, 3.0),
            55.0,
        );

        let month = parent
            .spawn((
                MainMenuMonthText,
                Text2d::new(month_label),
                TextFont {
                    font_size: 42.0,
                    ..default()
                },
                TextColor(Color::srgb(0.15, 0.12, 0.10)),
                Transform::from_xyz(0.0, 1.9, 0.3).with_scale(Vec3::splat(1.0 / WORLD_SCALE)),
            ))
            .id();
        texts.register(ScreenId::MainMenu, month);

        let day = parent
            .spawn((
                MainMenuDayText,
                Text2d::new(day_label),
                TextFont {
                    font_size: 72.0,
                    ..default()
                },
                TextColor(Color::srgb(0.55, 0.25, 0.20)),
                Transform::from_xyz(0.0, 1.1, 0.3).with_scale(Vec3::splat(1.0 / WORLD_SCALE)),
            ))
            .id();
        texts.register(ScreenId::MainMenu, day);

        let options = [
            (ControlCategory::OpenCalendar, "Calendar", -2.8),
            (ControlCategory::OpenToday, "Today", 0.0),
            (ControlCategory::Review, "Review", 2.8),
        ];
        for (category, label, x) in options {
            spawn_control(
                parent,
                &mut controls,
                ScreenId::MainMenu,
                category,
                ControlPayload::None,
                Vec2::new(x, -0.8),
                Vec2::new(1.9, 1.9),
                0.2,
                palette::BUTTON,
                true,
            );
            spawn_label(
                parent,
                &mut texts,
                ScreenId::MainMenu,
                label,
                Vec2::new(x, -2.2),
                30.0,
            );
        }
    });

    info!("[Screens] Main menu ready for {}", today.0);
}
