//! Navigation domain — owns which screen is on top.
//!
//! Pointer presses are hit-tested against the control registry and mapped
//! to slide-transition requests; the transitions module guards, animates
//! and completes them. Pressed controls darken while held and are
//! guaranteed to revert on release, whatever happened in between.

pub mod transitions;

use bevy::prelude::*;
use std::path::PathBuf;

use crate::shared::*;
use crate::store::EventImageStore;

/// The day the user is working with: `"0"` (today) until a calendar date
/// is clicked, then that date's `ddMMyyyy` key.
#[derive(Resource, Debug, Clone)]
pub struct SelectedDayKey(pub String);

impl Default for SelectedDayKey {
    fn default() -> Self {
        Self("0".to_string())
    }
}

/// A control currently held down with its pre-press color, so release
/// can always restore it.
#[derive(Resource, Debug, Clone, Default)]
pub struct PressedControl {
    pub entity: Option<Entity>,
    pub original: Option<Color>,
}

/// Asks the transitions module for a slide. Guarding happens there; a
/// request that loses the guard is dropped without side effects.
#[derive(Event, Debug, Clone)]
pub struct TransitionRequest {
    pub target: ScreenId,
    pub reversed: bool,
    pub hook: TransitionHook,
}

/// Side effect to fire once a requested slide actually starts. Day-view
/// population is not listed here: every slide into the day view reloads
/// it from the selected day, whichever control started the slide.
#[derive(Debug, Clone, Default)]
pub enum TransitionHook {
    #[default]
    None,
    OpenWizard {
        slot: u8,
    },
    OpenImageView {
        path: PathBuf,
    },
}

pub struct NavigationPlugin;

impl Plugin for NavigationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<NavigationState>()
            .init_resource::<SelectedDayKey>()
            .init_resource::<PressedControl>()
            .init_resource::<ControlRegistry>()
            .init_resource::<ScreenTextRegistry>()
            .add_event::<TransitionRequest>()
            .add_systems(
                Update,
                (
                    handle_pointer_down,
                    transitions::begin_requested_transitions,
                    transitions::tick_transitions,
                    handle_pointer_up,
                )
                    .chain()
                    .run_if(in_state(AppState::Running)),
            );
    }
}

/// Dims a control sprite while the pointer is held on it.
pub fn acquire_pressed_tint(
    pressed: &mut PressedControl,
    sprites: &mut Query<&mut Sprite>,
    entity: Entity,
) {
    if let Ok(mut sprite) = sprites.get_mut(entity) {
        pressed.entity = Some(entity);
        pressed.original = Some(sprite.color);
        sprite.color = darken(sprite.color);
    }
}

/// Reverts the held control, if any. Unconditional: a press with no
/// matching release path must never leave a stuck-dark control.
pub fn release_pressed_tint(pressed: &mut PressedControl, sprites: &mut Query<&mut Sprite>) {
    if let (Some(entity), Some(original)) = (pressed.entity.take(), pressed.original.take()) {
        if let Ok(mut sprite) = sprites.get_mut(entity) {
            sprite.color = original;
        }
    }
}

fn darken(color: Color) -> Color {
    let c = color.to_srgba();
    Color::srgb(c.red * 0.6, c.green * 0.6, c.blue * 0.6)
}

/// Hit-tests navigation controls and turns known actions into transition
/// requests. No hit, or a hit on a wizard-owned control, changes nothing
/// here.
#[allow(clippy::too_many_arguments)]
fn handle_pointer_down(
    pointer: Res<PointerInput>,
    registry: Res<ControlRegistry>,
    nav: Res<NavigationState>,
    today: Res<TodayDate>,
    store: Res<EventImageStore>,
    mut selected_day: ResMut<SelectedDayKey>,
    mut pressed: ResMut<PressedControl>,
    mut sprites: Query<&mut Sprite>,
    mut requests: EventWriter<TransitionRequest>,
) {
    if !pointer.pressed {
        return;
    }
    let Some(point) = pointer.world_pos else {
        return;
    };
    let Some(hit) = registry.hit_test(nav.current, point) else {
        return;
    };
    let entity = hit.entity;
    let category = hit.category;
    let payload = hit.payload.clone();
    let wants_tint = hit.pressed_tint;

    // Wizard-screen controls have their own dispatcher.
    let is_navigation_control = matches!(
        category,
        ControlCategory::OpenCalendar
            | ControlCategory::OpenToday
            | ControlCategory::Review
            | ControlCategory::Back
            | ControlCategory::AddEvent
            | ControlCategory::CalendarDate
            | ControlCategory::SavedImage
    );
    if !is_navigation_control {
        return;
    }

    if wants_tint {
        acquire_pressed_tint(&mut pressed, &mut sprites, entity);
    }

    match category {
        ControlCategory::OpenCalendar => {
            requests.send(TransitionRequest {
                target: ScreenId::Calendar,
                reversed: false,
                hook: TransitionHook::None,
            });
        }
        ControlCategory::OpenToday => {
            selected_day.0 = "0".to_string();
            requests.send(TransitionRequest {
                target: ScreenId::DayView,
                reversed: false,
                hook: TransitionHook::None,
            });
        }
        ControlCategory::Review => {
            // Recognised, tinted, and deliberately wired to nothing.
        }
        ControlCategory::Back => {
            requests.send(TransitionRequest {
                target: nav.previous,
                reversed: true,
                hook: TransitionHook::None,
            });
        }
        ControlCategory::AddEvent => {
            let ControlPayload::Slot(slot) = payload else {
                return;
            };
            requests.send(TransitionRequest {
                target: ScreenId::Wizard,
                reversed: false,
                hook: TransitionHook::OpenWizard { slot },
            });
        }
        ControlCategory::CalendarDate => {
            let ControlPayload::DateKey(date_key) = payload else {
                return;
            };
            selected_day.0 = date_key;
            requests.send(TransitionRequest {
                target: ScreenId::DayView,
                reversed: false,
                hook: TransitionHook::None,
            });
        }
        ControlCategory::SavedImage => {
            let ControlPayload::Slot(slot) = payload else {
                return;
            };
            let Ok(date) = parse_event_date(&selected_day.0, today.0) else {
                warn!(
                    "[Navigation] Selected day key {:?} would not parse",
                    selected_day.0
                );
                return;
            };
            let key = short_date_key(date);
            let Some(record) = store.scan_day(&key).into_iter().find(|r| r.slot == slot) else {
                warn!("[Navigation] No saved record for {} slot {}", key, slot);
                return;
            };
            requests.send(TransitionRequest {
                target: ScreenId::ImageView,
                reversed: false,
                hook: TransitionHook::OpenImageView { path: record.path },
            });
        }
        _ => unreachable!("non-navigation categories are filtered above"),
    }
}

/// Pointer released: whatever was pressed goes back to its normal look.
fn handle_pointer_up(
    pointer: Res<PointerInput>,
    mut pressed: ResMut<PressedControl>,
    mut sprites: Query<&mut Sprite>,
) {
    if pointer.released {
        release_pressed_tint(&mut pressed, &mut sprites);
    }
}
