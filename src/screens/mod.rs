//! Screen construction — spawns the five screen hierarchies once at
//! startup and registers every interactive control and text element in
//! the flat registries the other domains dispatch against.
//!
//! Screens are world-space sprite trees. Only the main menu starts
//! visible; the navigation plugin moves the roots around during slides.

mod calendar;
mod day_view;
mod image_view;
mod main_menu;
mod wizard_screen;

use bevy::prelude::*;

use crate::shared::*;

pub struct ScreensPlugin;

impl Plugin for ScreensPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ControlRegistry>()
            .init_resource::<ScreenTextRegistry>()
            .add_systems(
                OnEnter(AppState::Running),
                (
                    main_menu::spawn_main_menu,
                    calendar::spawn_calendar_screen,
                    day_view::spawn_day_view_screen,
                    wizard_screen::spawn_wizard_screen,
                    image_view::spawn_image_view_screen,
                ),
            )
            .add_systems(
                Update,
                image_view::handle_image_view_request.run_if(in_state(AppState::Running)),
            );
    }
}

/// Spawns a screen root with its backdrop. Inactive screens start hidden
/// and pushed back so they never peek through the active one.
pub(crate) fn spawn_screen_root(
    commands: &mut Commands,
    id: ScreenId,
    backdrop: Color,
    visible: bool,
) -> Entity {
    // Pushed-back screens sit at negative z: in 2D, higher z draws on top.
    let (z, visibility) = if visible {
        (0.0, Visibility::Visible)
    } else {
        (-DEPTH_BASE, Visibility::Hidden)
    };
    commands
        .spawn((
            ScreenRoot { id },
            Sprite::from_color(backdrop, Vec2::new(STAGE_WIDTH, STAGE_HEIGHT)),
            Transform::from_xyz(0.0, 0.0, z),
            visibility,
        ))
        .id()
}

/// Spawns an interactive control sprite under `parent` and registers it
/// for hit-testing. The registry rect is where the control sits while its
/// screen is centered — the only position it can be clicked at.
#[allow(clippy::too_many_arguments)]
pub(crate) fn spawn_control(
    parent: &mut ChildBuilder,
    registry: &mut ControlRegistry,
    screen: ScreenId,
    category: ControlCategory,
    payload: ControlPayload,
    pos: Vec2,
    size: Vec2,
    z: f32,
    color: Color,
    pressed_tint: bool,
) -> Entity {
    let entity = parent
        .spawn((
            Sprite::from_color(color, size),
            Transform::from_xyz(pos.x, pos.y, z),
        ))
        .id();
    registry.register(ControlEntry {
        entity,
        screen,
        rect: Rect::from_center_size(pos, size),
        z,
        category,
        payload,
        enabled: true,
        pressed_tint,
    });
    entity
}

/// Spawns a static text element and registers it for transition toggling.
/// Font sizes are in pixels; the transform scales them into world units.
pub(crate) fn spawn_label(
    parent: &mut ChildBuilder,
    texts: &mut ScreenTextRegistry,
    screen: ScreenId,
    value: &str,
    pos: Vec2,
    font_size: f32,
) -> Entity {
    let entity = parent
        .spawn((
            Text2d::new(value),
            TextFont {
                font_size,
                ..default()
            },
            TextColor(Color::srgb(0.15, 0.12, 0.10)),
            Transform::from_xyz(pos.x, pos.y, 0.3).with_scale(Vec3::splat(1.0 / WORLD_SCALE)),
        ))
        .id();
    texts.register(screen, entity);
    entity
}

/// Shared palette colors for controls without dedicated art.
pub(crate) mod palette {
    use bevy::prelude::Color;

    pub const BACKDROP_PAPER: Color = Color::srgb(0.96, 0.93, 0.86);
    pub const BACKDROP_CALENDAR: Color = Color::srgb(0.91, 0.89, 0.80);
    pub const BACKDROP_DAY: Color = Color::srgb(0.93, 0.90, 0.84);
    pub const BACKDROP_DARK: Color = Color::srgb(0.16, 0.16, 0.18);
    pub const BUTTON: Color = Color::srgb(0.80, 0.68, 0.50);
    pub const ARROW: Color = Color::srgb(0.45, 0.38, 0.30);
    pub const TICK: Color = Color::srgb(0.36, 0.62, 0.36);
    pub const SLOT_EMPTY: Color = Color::srgb(0.86, 0.82, 0.74);
    pub const HEADER: Color = Color::srgb(0.75, 0.72, 0.66);
}
