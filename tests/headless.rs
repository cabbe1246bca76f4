//! Headless integration tests for Daybook.
//!
//! These tests exercise the app's ECS logic without a window or GPU.
//! They use Bevy's `MinimalPlugins` to tick the app, a manual time step
//! for deterministic slide timing, and a temp-dir image store. Pointer
//! interaction is driven by writing the `PointerInput` resource directly,
//! exactly what the input plugin would produce for real clicks.
//!
//! Run with: `cargo test --test headless`

use bevy::asset::{AssetApp, AssetPlugin};
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use std::time::Duration;

use daybook::data::DataPlugin;
use daybook::journal::JournalPlugin;
use daybook::navigation::NavigationPlugin;
use daybook::screens::ScreensPlugin;
use daybook::shared::*;
use daybook::store::EventImageStore;
use daybook::wizard::capture::SaveGate;
use daybook::wizard::WizardPlugin;

// ─────────────────────────────────────────────────────────────────────────────
// Test App Builder
// ─────────────────────────────────────────────────────────────────────────────

/// Builds a minimal app with every domain plugin but NO rendering,
/// windowing, or hardware input. `with_screens` controls whether the
/// screen hierarchies exist; leaving them out starves the wizard's save
/// gate, which the timeout test exploits.
fn build_test_app(store_root: &std::path::Path, with_screens: bool) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(StatesPlugin);
    app.add_plugins(AssetPlugin::default());
    app.init_asset::<Image>();

    // Deterministic frame time: every update advances exactly 50 ms.
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(
        50,
    )));

    app.init_state::<AppState>();

    // Shared events (mirrors main.rs)
    app.add_event::<WizardAssignEvent>()
        .add_event::<WizardResetEvent>()
        .add_event::<DayViewRequestEvent>()
        .add_event::<ImageViewRequestEvent>()
        .add_event::<RecordSavedEvent>()
        .add_event::<SaveFailedEvent>()
        .add_event::<SelectionRejectedEvent>();

    // Pointer snapshot resource, normally owned by the input plugin.
    app.init_resource::<PointerInput>();

    app.insert_resource(EventImageStore::new(store_root));

    app.add_plugins(DataPlugin);
    if with_screens {
        app.add_plugins(ScreensPlugin);
    }
    app.add_plugins(NavigationPlugin);
    app.add_plugins(WizardPlugin);
    app.add_plugins(JournalPlugin);

    app
}

/// Boots through Loading into Running and spawns the screens.
fn boot(app: &mut App) {
    app.update(); // OnEnter(Loading): registries + reference date
    app.update(); // OnEnter(Running): screens
    app.update(); // first Running frame: calendar population
    assert_eq!(
        app.world().resource::<State<AppState>>().get(),
        &AppState::Running,
        "app should reach Running after boot"
    );
}

fn run_frames(app: &mut App, frames: u32) {
    for _ in 0..frames {
        app.update();
    }
}

/// One click at a world point: press frame, then release frame.
fn press_at(app: &mut App, point: Vec2) {
    {
        let mut pointer = app.world_mut().resource_mut::<PointerInput>();
        pointer.pressed = true;
        pointer.released = false;
        pointer.world_pos = Some(point);
    }
    app.update();
    {
        let mut pointer = app.world_mut().resource_mut::<PointerInput>();
        pointer.pressed = false;
        pointer.released = true;
    }
    app.update();
    {
        let mut pointer = app.world_mut().resource_mut::<PointerInput>();
        pointer.released = false;
    }
}

/// Ticks until the active slide finishes (progress 1.0 takes 0.4 s =
/// 8 frames at the manual step; 12 leaves slack).
fn finish_slide(app: &mut App) {
    run_frames(app, 12);
    assert!(
        !app.world()
            .resource::<NavigationState>()
            .transition_in_progress(),
        "slide should have completed"
    );
}

fn current_screen(app: &App) -> ScreenId {
    app.world().resource::<NavigationState>().current
}

// ─────────────────────────────────────────────────────────────────────────────
// Boot & layout
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_headless_boot_reaches_running_with_screens() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = build_test_app(dir.path(), true);
    boot(&mut app);

    let mut roots = app.world_mut().query::<&ScreenRoot>();
    let spawned: Vec<ScreenId> = roots.iter(app.world()).map(|root| root.id).collect();
    for id in ScreenId::ALL {
        assert!(spawned.contains(&id), "{id:?} screen should be spawned");
    }

    let registry = app.world().resource::<ControlRegistry>();
    for category in [
        ControlCategory::OpenCalendar,
        ControlCategory::OpenToday,
        ControlCategory::Review,
        ControlCategory::AddEvent,
        ControlCategory::ConfirmAnswer,
        ControlCategory::PaletteCharacter,
        ControlCategory::PaletteObject,
        ControlCategory::CalendarDate,
    ] {
        assert!(
            registry.entries.iter().any(|e| e.category == category),
            "{category:?} control should be registered"
        );
    }

    // One clickable date cell per day of the current month.
    let today = app.world().resource::<TodayDate>().0;
    let days = daybook::journal::month_grid::month_grid(today).len();
    let cells = registry
        .entries
        .iter()
        .filter(|e| e.category == ControlCategory::CalendarDate)
        .count();
    assert_eq!(cells, days);
}

// ─────────────────────────────────────────────────────────────────────────────
// Navigation
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_click_navigates_to_calendar_and_back() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = build_test_app(dir.path(), true);
    boot(&mut app);

    assert_eq!(current_screen(&app), ScreenId::MainMenu);

    // Calendar option on the main menu.
    press_at(&mut app, Vec2::new(-2.8, -0.8));
    assert!(app
        .world()
        .resource::<NavigationState>()
        .transition_in_progress());
    finish_slide(&mut app);
    assert_eq!(current_screen(&app), ScreenId::Calendar);

    // Back arrow returns to the menu.
    press_at(&mut app, Vec2::new(-4.6, 3.3));
    finish_slide(&mut app);
    assert_eq!(current_screen(&app), ScreenId::MainMenu);
}

#[test]
fn test_clicking_nothing_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = build_test_app(dir.path(), true);
    boot(&mut app);

    press_at(&mut app, Vec2::new(4.9, -3.7));
    assert!(!app
        .world()
        .resource::<NavigationState>()
        .transition_in_progress());
    assert_eq!(current_screen(&app), ScreenId::MainMenu);
}

#[test]
fn test_requests_during_slide_are_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = build_test_app(dir.path(), true);
    boot(&mut app);

    press_at(&mut app, Vec2::new(-2.8, -0.8)); // calendar
    assert!(app
        .world()
        .resource::<NavigationState>()
        .transition_in_progress());

    // Mid-slide click on the today option must not retarget the slide.
    press_at(&mut app, Vec2::new(0.0, -0.8));
    finish_slide(&mut app);
    assert_eq!(current_screen(&app), ScreenId::Calendar);
}

#[test]
fn test_day_view_is_never_previous() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = build_test_app(dir.path(), true);
    boot(&mut app);

    press_at(&mut app, Vec2::new(-2.8, -0.8)); // calendar
    finish_slide(&mut app);

    // Click a date cell: its rect sits at the cell's grid position.
    let cell_pos = {
        let registry = app.world().resource::<ControlRegistry>();
        registry
            .entries
            .iter()
            .find(|e| e.category == ControlCategory::CalendarDate)
            .map(|e| e.rect.center())
            .expect("calendar should have date cells")
    };
    press_at(&mut app, cell_pos);
    finish_slide(&mut app);
    assert_eq!(current_screen(&app), ScreenId::DayView);

    // Backing out of the day view lands on the menu, not the calendar.
    assert_eq!(
        app.world().resource::<NavigationState>().previous,
        ScreenId::MainMenu
    );
    press_at(&mut app, Vec2::new(-4.6, 3.3));
    finish_slide(&mut app);
    assert_eq!(current_screen(&app), ScreenId::MainMenu);
}

// ─────────────────────────────────────────────────────────────────────────────
// Full wizard flow
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_wizard_flow_saves_image_and_fills_slot() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = build_test_app(dir.path(), true);
    boot(&mut app);

    // Main menu -> today's day view.
    press_at(&mut app, Vec2::new(0.0, -0.8));
    finish_slide(&mut app);
    assert_eq!(current_screen(&app), ScreenId::DayView);

    // Slot 1 -> wizard.
    press_at(&mut app, Vec2::new(-3.0, 0.9));
    finish_slide(&mut app);
    assert_eq!(current_screen(&app), ScreenId::Wizard);

    let today = app.world().resource::<TodayDate>().0;
    let expected_name = format!("{}_1", short_date_key(today));
    {
        let draft = app.world().resource::<EventDraft>();
        assert_eq!(
            draft.save_name.as_ref().map(|n| n.to_string()),
            Some(expected_name.clone())
        );
        assert_eq!(draft.stage, DraftStage::ChooseBackground);
    }

    // Question 1: flip one background forward.
    press_at(&mut app, Vec2::new(4.6, 0.0));
    run_frames(&mut app, 12);
    assert_eq!(
        app.world().resource::<EventDraft>().background_index,
        1,
        "forward arrow should advance the background"
    );

    // Confirm -> question 2, characters slide in.
    press_at(&mut app, Vec2::new(4.0, -3.3));
    run_frames(&mut app, 12);
    assert_eq!(
        app.world().resource::<EventDraft>().stage,
        DraftStage::PlaceCharacters
    );

    // Pick the first character from the palette; it is held, then a
    // click into the scene drops it there.
    press_at(&mut app, Vec2::new(CHAR_PALETTE_IN.x, CHAR_PALETTE_IN.y));
    {
        let draft = app.world().resource::<EventDraft>();
        assert_eq!(draft.entities.len(), 1);
        assert!(draft.held.is_some(), "palette click should hold the entity");
    }
    press_at(&mut app, Vec2::new(0.8, -1.2));
    {
        let draft = app.world().resource::<EventDraft>();
        assert!(draft.held.is_none(), "scene click should drop the entity");
        assert_eq!(draft.entities[0].position, Vec2::new(0.8, -1.2));
    }

    // Confirm -> question 3, objects in; place nothing.
    press_at(&mut app, Vec2::new(4.0, -3.3));
    run_frames(&mut app, 12);
    assert_eq!(
        app.world().resource::<EventDraft>().stage,
        DraftStage::PlaceObjects
    );

    // Confirm -> saved stage. The object palette slides out, the gate
    // opens, and the composition lands on disk.
    press_at(&mut app, Vec2::new(4.0, -3.3));
    run_frames(&mut app, 30);

    let draft = app.world().resource::<EventDraft>();
    assert_eq!(draft.stage, DraftStage::Saved);
    assert!(draft.saved, "draft should be marked saved");
    let saved_path = dir.path().join(format!("{}.png", expected_name));
    assert!(saved_path.exists(), "composition should be written");

    // The journal's pending swap fills slot 1 and makes it clickable.
    run_frames(&mut app, 4);
    let registry = app.world().resource::<ControlRegistry>();
    let slot_entry = registry
        .entries
        .iter()
        .find(|e| {
            e.category == ControlCategory::SavedImage && e.payload == ControlPayload::Slot(1)
        })
        .expect("slot 1 display should be registered");
    assert!(slot_entry.enabled, "slot 1 display should be clickable");

    // Leaving the wizard resets the draft and lands on the day view;
    // one more back reaches the menu (dead-end rule).
    press_at(&mut app, Vec2::new(-4.6, 3.4));
    finish_slide(&mut app);
    assert_eq!(current_screen(&app), ScreenId::DayView);
    let draft = app.world().resource::<EventDraft>();
    assert_eq!(draft.stage, DraftStage::ChooseBackground);
    assert!(draft.entities.is_empty());
    assert!(!draft.saved);

    press_at(&mut app, Vec2::new(-4.6, 3.3));
    finish_slide(&mut app);
    assert_eq!(current_screen(&app), ScreenId::MainMenu);
}

#[test]
fn test_malformed_assign_leaves_draft_unnamed() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = build_test_app(dir.path(), true);
    boot(&mut app);

    app.world_mut().send_event(WizardAssignEvent {
        slot: 2,
        date_key: "9germany".to_string(),
    });
    run_frames(&mut app, 2);

    assert!(app.world().resource::<EventDraft>().save_name.is_none());
}

// ─────────────────────────────────────────────────────────────────────────────
// Bounded polling
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_save_gate_times_out_without_palette_rest() {
    let dir = tempfile::tempdir().unwrap();
    // No screens: the object palette bar never exists, so the gate can
    // never observe it at rest and must give up within its budget.
    let mut app = build_test_app(dir.path(), false);
    app.update();
    app.update();

    let today = app.world().resource::<TodayDate>().0;
    {
        let mut draft = app.world_mut().resource_mut::<EventDraft>();
        draft.set_save_name(1, "0", today).unwrap();
        draft.advance_stage();
        draft.advance_stage();
        draft.advance_stage();
        assert_eq!(draft.stage, DraftStage::Saved);
    }

    run_frames(&mut app, SAVE_POLL_MAX_FRAMES + 2);

    let gate = app.world().resource::<SaveGate>();
    assert!(gate.failed, "gate should latch failed after its budget");
    assert!(!app.world().resource::<EventDraft>().saved);

    let events = app.world().resource::<Events<SaveFailedEvent>>();
    let mut cursor = events.get_cursor();
    assert!(
        cursor
            .read(events)
            .any(|e| matches!(e.reason, FlowError::PollTimeout(_))),
        "timeout should surface as a SaveFailedEvent"
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Day view population
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_day_view_populates_from_store() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = build_test_app(dir.path(), true);
    boot(&mut app);

    let today = app.world().resource::<TodayDate>().0;
    let key = short_date_key(today);
    let store = EventImageStore::new(dir.path());
    let tile = image::RgbaImage::from_pixel(8, 8, image::Rgba([40, 90, 200, 255]));
    for slot in [2u8, 5u8] {
        store
            .write_image(
                &SaveName {
                    date_key: key.clone(),
                    slot,
                },
                &tile,
            )
            .unwrap();
    }

    app.world_mut().send_event(DayViewRequestEvent {
        date_key: "0".to_string(),
    });
    run_frames(&mut app, 2);

    let registry = app.world().resource::<ControlRegistry>();
    for slot in 1..=EVENT_SLOTS {
        let entry = registry
            .entries
            .iter()
            .find(|e| {
                e.category == ControlCategory::SavedImage
                    && e.payload == ControlPayload::Slot(slot)
            })
            .expect("every slot has a display entry");
        assert_eq!(
            entry.enabled,
            slot == 2 || slot == 5,
            "only stored slots should be clickable (slot {slot})"
        );
    }

    // The headline carries the corrected ordinal suffix.
    let expected = daybook::journal::day_view::day_title(today);
    let mut titles = app
        .world_mut()
        .query_filtered::<&Text2d, With<DayViewTitleText>>();
    let title = titles.single(app.world());
    assert_eq!(title.0, expected);
}
