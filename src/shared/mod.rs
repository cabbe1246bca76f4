//! Shared components, resources, events, and states for Daybook.
//!
//! This is the type contract. Every domain plugin imports from here.
//! No domain imports from any other domain directly.

use bevy::prelude::*;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

// ═══════════════════════════════════════════════════════════════════════
// APP STATE — top-level state machine
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum AppState {
    #[default]
    Loading,
    Running,
}

// ═══════════════════════════════════════════════════════════════════════
// SCREENS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScreenId {
    MainMenu,
    Calendar,
    DayView,
    Wizard,
    ImageView,
}

impl ScreenId {
    pub const ALL: [ScreenId; 5] = [
        ScreenId::MainMenu,
        ScreenId::Calendar,
        ScreenId::DayView,
        ScreenId::Wizard,
        ScreenId::ImageView,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ScreenId::MainMenu => "main_menu",
            ScreenId::Calendar => "calendar",
            ScreenId::DayView => "day_view",
            ScreenId::Wizard => "wizard",
            ScreenId::ImageView => "image_view",
        }
    }
}

/// Marker on each screen root entity.
#[derive(Component, Debug, Clone, Copy)]
pub struct ScreenRoot {
    pub id: ScreenId,
}

// ═══════════════════════════════════════════════════════════════════════
// NAVIGATION
// ═══════════════════════════════════════════════════════════════════════

/// An in-flight screen slide. Progress runs 0.0 → 1.0 at SLIDE_RATE per
/// wall-clock second; the incoming screen lerps from `start` to center.
#[derive(Debug, Clone)]
pub struct SlideTransition {
    pub target: ScreenId,
    pub reversed: bool,
    pub progress: f32,
    pub start: Vec3,
}

#[derive(Resource, Debug, Clone)]
pub struct NavigationState {
    pub current: ScreenId,
    pub previous: ScreenId,
    pub transition: Option<SlideTransition>,
    /// Depth the outgoing screen is pushed back to. Decreases per
    /// transition and wraps back to DEPTH_BASE at the floor so repeated
    /// switching never drifts without bound.
    pub depth_offset: f32,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self {
            current: ScreenId::MainMenu,
            previous: ScreenId::MainMenu,
            transition: None,
            depth_offset: DEPTH_BASE,
        }
    }
}

impl NavigationState {
    pub fn transition_in_progress(&self) -> bool {
        self.transition.is_some()
    }

    /// Starts a slide toward `target`. Returns false (and changes nothing)
    /// when the target is already current or another slide is running —
    /// both are expected inputs, not errors.
    pub fn begin(&mut self, target: ScreenId, reversed: bool) -> bool {
        if target == self.current || self.transition.is_some() {
            return false;
        }
        let start_x = if reversed { -SLIDE_DISTANCE } else { SLIDE_DISTANCE };
        self.transition = Some(SlideTransition {
            target,
            reversed,
            progress: 0.0,
            start: Vec3::new(start_x, 0.0, 0.0),
        });
        true
    }

    /// Depth to push the outgoing screen back to for this slide.
    pub fn next_depth_offset(&mut self) -> f32 {
        if self.depth_offset < DEPTH_FLOOR {
            self.depth_offset = DEPTH_BASE;
        }
        self.depth_offset -= DEPTH_STEP;
        self.depth_offset
    }

    /// Finishes the active slide and updates current/previous.
    ///
    /// The wizard and day-view screens never become `previous`: backing
    /// out of them must land on the main menu, otherwise the back arrow
    /// loops into a transient flow. Returns the screen switched to.
    pub fn complete(&mut self) -> Option<ScreenId> {
        let transition = self.transition.take()?;
        self.previous = if self.current == ScreenId::Wizard {
            ScreenId::MainMenu
        } else if transition.target == ScreenId::DayView {
            ScreenId::MainMenu
        } else {
            self.current
        };
        self.current = transition.target;
        Some(self.current)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// CONTROLS — the hit-testing contract
// ═══════════════════════════════════════════════════════════════════════

/// Every interactive control belongs to exactly one category. Dispatch is
/// a match on this enum, never on name strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlCategory {
    // Navigation screens
    OpenCalendar,
    OpenToday,
    Review,
    Back,
    AddEvent,
    CalendarDate,
    SavedImage,
    // Wizard screen
    BackgroundBack,
    BackgroundForward,
    ConfirmAnswer,
    PaletteCharacter,
    PaletteObject,
}

/// Extra data a control carries to its handler.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ControlPayload {
    #[default]
    None,
    /// `ddMMyyyy` key of a calendar day.
    DateKey(String),
    /// Event slot 1..=6 on the day view.
    Slot(u8),
    /// Palette selector name, e.g. "adultMale" or "objCake".
    Selector(String),
}

#[derive(Debug, Clone)]
pub struct ControlEntry {
    pub entity: Entity,
    pub screen: ScreenId,
    /// World-space rect, valid while the owning screen sits centered.
    pub rect: Rect,
    pub z: f32,
    pub category: ControlCategory,
    pub payload: ControlPayload,
    pub enabled: bool,
    /// Whether the control darkens while the pointer is held on it.
    pub pressed_tint: bool,
}

/// Flat registry of interactive controls, one entry per control entity.
/// Replaces scene-graph raycasting: the pointer systems ask this registry
/// for the topmost enabled control of the active screen at a point.
#[derive(Resource, Debug, Clone, Default)]
pub struct ControlRegistry {
    pub entries: Vec<ControlEntry>,
}

impl ControlRegistry {
    /// Registers a control, replacing any previous entry for the entity.
    pub fn register(&mut self, entry: ControlEntry) {
        if let Some(existing) = self.entries.iter_mut().find(|e| e.entity == entry.entity) {
            *existing = entry;
        } else {
            self.entries.push(entry);
        }
    }

    pub fn set_enabled(&mut self, entity: Entity, enabled: bool) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.entity == entity) {
            entry.enabled = enabled;
        }
    }

    pub fn remove(&mut self, entity: Entity) {
        self.entries.retain(|e| e.entity != entity);
    }

    /// Topmost enabled control of `screen` containing `point`, if any.
    pub fn hit_test(&self, screen: ScreenId, point: Vec2) -> Option<&ControlEntry> {
        self.entries
            .iter()
            .filter(|e| e.screen == screen && e.enabled && e.rect.contains(point))
            .max_by(|a, b| a.z.total_cmp(&b.z))
    }
}

/// Flat registry of text elements per screen, toggled during slides so
/// outgoing text never bleeds through the incoming screen.
#[derive(Resource, Debug, Clone, Default)]
pub struct ScreenTextRegistry {
    pub elements: HashMap<ScreenId, Vec<Entity>>,
}

impl ScreenTextRegistry {
    pub fn register(&mut self, screen: ScreenId, entity: Entity) {
        self.elements.entry(screen).or_default().push(entity);
    }

    pub fn for_screen(&self, screen: ScreenId) -> &[Entity] {
        self.elements.get(&screen).map(Vec::as_slice).unwrap_or(&[])
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SCREEN ELEMENT MARKERS
// ═══════════════════════════════════════════════════════════════════════

/// Month name on the main menu.
#[derive(Component, Debug, Clone, Copy)]
pub struct MainMenuMonthText;

/// Day-of-month number on the main menu.
#[derive(Component, Debug, Clone, Copy)]
pub struct MainMenuDayText;

/// Month name on the calendar screen.
#[derive(Component, Debug, Clone, Copy)]
pub struct CalendarMonthText;

/// One date cell on the calendar grid.
#[derive(Component, Debug, Clone, Copy)]
pub struct CalendarDayCell {
    pub day_number: u32,
}

/// "Wednesday 3rd September" headline on the day view.
#[derive(Component, Debug, Clone, Copy)]
pub struct DayViewTitleText;

/// One of the six add-event buttons on the day view.
#[derive(Component, Debug, Clone, Copy)]
pub struct EventSlotButton {
    pub slot: u8,
}

/// The saved-image thumbnail shown over a filled slot.
#[derive(Component, Debug, Clone, Copy)]
pub struct EventSlotDisplay {
    pub slot: u8,
}

/// Full-screen display on the image-view screen.
#[derive(Component, Debug, Clone, Copy)]
pub struct SceneViewDisplay;

/// The wizard's question prompt.
#[derive(Component, Debug, Clone, Copy)]
pub struct QuestionText;

/// The wizard's confirm tick.
#[derive(Component, Debug, Clone, Copy)]
pub struct ConfirmTick;

/// Root of the six-background strip on the wizard screen.
#[derive(Component, Debug, Clone, Copy)]
pub struct BackgroundStrip;

/// Background switch arrows; `forward` distinguishes the pair.
#[derive(Component, Debug, Clone, Copy)]
pub struct BackgroundArrow {
    pub forward: bool,
}

/// Sliding bar holding the character palette.
#[derive(Component, Debug, Clone, Copy)]
pub struct CharacterPaletteBar;

/// Sliding bar holding the object palette.
#[derive(Component, Debug, Clone, Copy)]
pub struct ObjectPaletteBar;

/// Bar behind whichever palette is on screen.
#[derive(Component, Debug, Clone, Copy)]
pub struct HeaderBar;

/// Parent of everything the user has placed into the draft scene.
#[derive(Component, Debug, Clone, Copy)]
pub struct ComposedSceneRoot;

/// Sprite mirroring one DraftEntity.
#[derive(Component, Debug, Clone, Copy)]
pub struct PlacedSprite {
    pub draft_id: u32,
}

/// Delete affordance riding on a placed sprite.
#[derive(Component, Debug, Clone, Copy)]
pub struct DeleteBadge {
    pub draft_id: u32,
}

// ═══════════════════════════════════════════════════════════════════════
// POINTER INPUT
// ═══════════════════════════════════════════════════════════════════════

/// The single frame-scoped pointer snapshot every domain reads.
/// Filled in PreUpdate by the input plugin; nothing else touches hardware.
#[derive(Resource, Debug, Clone, Default)]
pub struct PointerInput {
    pub pressed: bool,
    pub released: bool,
    pub world_pos: Option<Vec2>,
}

// ═══════════════════════════════════════════════════════════════════════
// EVENT WIZARD
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DraftStage {
    #[default]
    ChooseBackground,
    PlaceCharacters,
    PlaceObjects,
    Saved,
}

impl DraftStage {
    pub fn next(self) -> Self {
        match self {
            DraftStage::ChooseBackground => DraftStage::PlaceCharacters,
            DraftStage::PlaceCharacters => DraftStage::PlaceObjects,
            DraftStage::PlaceObjects | DraftStage::Saved => DraftStage::Saved,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterKind {
    AdultMale,
    AdultFemale,
    OlderMale,
    OlderFemale,
    TeenMale,
    TeenFemale,
    BabyMale,
    BabyFemale,
}

impl CharacterKind {
    pub const ALL: [CharacterKind; 8] = [
        CharacterKind::AdultMale,
        CharacterKind::AdultFemale,
        CharacterKind::OlderMale,
        CharacterKind::OlderFemale,
        CharacterKind::TeenMale,
        CharacterKind::TeenFemale,
        CharacterKind::BabyMale,
        CharacterKind::BabyFemale,
    ];

    pub fn selector(self) -> &'static str {
        match self {
            CharacterKind::AdultMale => "adultMale",
            CharacterKind::AdultFemale => "adultFemale",
            CharacterKind::OlderMale => "olderMale",
            CharacterKind::OlderFemale => "olderFemale",
            CharacterKind::TeenMale => "teenMale",
            CharacterKind::TeenFemale => "teenFemale",
            CharacterKind::BabyMale => "babyMale",
            CharacterKind::BabyFemale => "babyFemale",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Balloons,
    Cake,
    Football,
    TennisBall,
    Mail,
}

impl ObjectKind {
    pub const ALL: [ObjectKind; 5] = [
        ObjectKind::Balloons,
        ObjectKind::Cake,
        ObjectKind::Football,
        ObjectKind::TennisBall,
        ObjectKind::Mail,
    ];

    pub fn selector(self) -> &'static str {
        match self {
            ObjectKind::Balloons => "objBalloons",
            ObjectKind::Cake => "objCake",
            ObjectKind::Football => "objFootball",
            ObjectKind::TennisBall => "objTennisBall",
            ObjectKind::Mail => "objMail",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Character(CharacterKind),
    Object(ObjectKind),
}

impl EntityKind {
    /// Maps a palette selector name to its variant. Unrecognised names are
    /// an explicit rejection, never a silent drop.
    pub fn from_selector(selector: &str) -> Result<EntityKind, FlowError> {
        for kind in CharacterKind::ALL {
            if kind.selector() == selector {
                return Ok(EntityKind::Character(kind));
            }
        }
        for kind in ObjectKind::ALL {
            if kind.selector() == selector {
                return Ok(EntityKind::Object(kind));
            }
        }
        Err(FlowError::UnknownSelector(selector.to_string()))
    }

    pub fn selector(self) -> &'static str {
        match self {
            EntityKind::Character(c) => c.selector(),
            EntityKind::Object(o) => o.selector(),
        }
    }
}

/// One character or object placed into the draft scene.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftEntity {
    pub id: u32,
    pub kind: EntityKind,
    pub position: Vec2,
}

/// Outcome of a place-or-grab interaction, for logging and affordances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrabOutcome {
    Created(u32),
    Grabbed(u32),
    Released(u32),
}

/// The in-progress, unsaved event composition.
///
/// Pure state machine: systems feed it pointer results and it never
/// touches the ECS, so the whole flow is unit-testable.
#[derive(Resource, Debug, Clone, Default)]
pub struct EventDraft {
    pub stage: DraftStage,
    pub background_index: usize,
    pub entities: Vec<DraftEntity>,
    pub held: Option<u32>,
    pub save_name: Option<SaveName>,
    pub saved: bool,
    next_id: u32,
}

impl EventDraft {
    /// Back to the first question with an empty scene. The save name is
    /// kept: it was assigned on entry and stays valid for this visit.
    pub fn reset(&mut self) {
        self.stage = DraftStage::ChooseBackground;
        self.background_index = 0;
        self.entities.clear();
        self.held = None;
        self.saved = false;
    }

    pub fn advance_stage(&mut self) -> DraftStage {
        self.stage = self.stage.next();
        self.stage
    }

    /// Computes the save key for this draft: `ddMMyy` of the chosen date
    /// plus the day-view slot. `raw_date` is `"0"` for today, otherwise a
    /// strict `ddMMyyyy` string.
    pub fn set_save_name(
        &mut self,
        slot: u8,
        raw_date: &str,
        today: NaiveDate,
    ) -> Result<(), FlowError> {
        let date = parse_event_date(raw_date, today)?;
        self.save_name = Some(SaveName {
            date_key: short_date_key(date),
            slot,
        });
        Ok(())
    }

    /// Instantiates a new entity from the palette at `position` and holds
    /// it. A previously held entity is released in place first, so at most
    /// one entity is ever held.
    pub fn spawn_entity(&mut self, kind: EntityKind, position: Vec2) -> u32 {
        self.held = None;
        self.next_id += 1;
        let id = self.next_id;
        self.entities.push(DraftEntity { id, kind, position });
        self.held = Some(id);
        id
    }

    /// Grabs an existing entity, or releases the held one at `position`.
    /// Returns None when `id` does not exist (stale hit).
    pub fn grab_or_release(&mut self, id: u32, position: Vec2) -> Option<GrabOutcome> {
        match self.held {
            Some(held_id) => {
                let entity = self.entities.iter_mut().find(|e| e.id == held_id)?;
                entity.position = position;
                self.held = None;
                Some(GrabOutcome::Released(held_id))
            }
            None => {
                self.entities.iter().find(|e| e.id == id)?;
                self.held = Some(id);
                Some(GrabOutcome::Grabbed(id))
            }
        }
    }

    /// Moves the held entity, if any, to the pointer position.
    pub fn drag_to(&mut self, position: Vec2) {
        if let Some(held_id) = self.held {
            if let Some(entity) = self.entities.iter_mut().find(|e| e.id == held_id) {
                entity.position = position;
            }
        }
    }

    pub fn delete_entity(&mut self, id: u32) -> bool {
        let before = self.entities.len();
        self.entities.retain(|e| e.id != id);
        if self.held == Some(id) {
            self.held = None;
        }
        self.entities.len() != before
    }

    pub fn entity(&self, id: u32) -> Option<&DraftEntity> {
        self.entities.iter().find(|e| e.id == id)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SAVE NAMES & RECORDS
// ═══════════════════════════════════════════════════════════════════════

/// Identifier a finished composition is persisted under: `ddMMyy_<slot>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SaveName {
    pub date_key: String,
    pub slot: u8,
}

impl SaveName {
    pub fn file_name(&self) -> String {
        format!("{}.png", self)
    }
}

impl fmt::Display for SaveName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.date_key, self.slot)
    }
}

/// A persisted composition found in the content directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedEventRecord {
    /// `ddMMyy` form.
    pub date_key: String,
    pub slot: u8,
    pub path: PathBuf,
}

/// Sidecar metadata written next to each image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordMeta {
    pub date_key: String,
    pub slot: u8,
    pub saved_at: u64,
}

/// The reference date the whole app runs against, captured once at
/// startup. Injected so tests run on a fixed day.
#[derive(Resource, Debug, Clone, Copy)]
pub struct TodayDate(pub NaiveDate);

// ═══════════════════════════════════════════════════════════════════════
// DATE HELPERS
// ═══════════════════════════════════════════════════════════════════════

/// `ddMMyy` form used in save names and day-view lookups.
pub fn short_date_key(date: NaiveDate) -> String {
    format!(
        "{:02}{:02}{:02}",
        date.day(),
        date.month(),
        date.year() % 100
    )
}

/// `ddMMyyyy` form used to name calendar days.
pub fn full_date_key(date: NaiveDate) -> String {
    format!("{:02}{:02}{}", date.day(), date.month(), date.year())
}

/// Resolves a day-selection string: `"0"` is today, anything else must be
/// exactly eight ASCII digits forming a real `ddMMyyyy` date.
pub fn parse_event_date(raw: &str, today: NaiveDate) -> Result<NaiveDate, FlowError> {
    if raw == "0" {
        return Ok(today);
    }
    if raw.len() != 8 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FlowError::MalformedDate(raw.to_string()));
    }
    let day: u32 = raw[0..2].parse().unwrap_or(0);
    let month: u32 = raw[2..4].parse().unwrap_or(0);
    let year: i32 = raw[4..8].parse().unwrap_or(0);
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| FlowError::MalformedDate(raw.to_string()))
}

// ═══════════════════════════════════════════════════════════════════════
// ERRORS
// ═══════════════════════════════════════════════════════════════════════

/// The workflow error taxonomy. Everything else is a silent no-op by
/// design (no hit, same-screen transition, re-entrant animation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// A clicked palette entry matched no known variant.
    UnknownSelector(String),
    /// A day-selection string was not `"0"` or a valid `ddMMyyyy` date.
    MalformedDate(String),
    /// A bounded per-frame poll ran out of retries.
    PollTimeout(&'static str),
}

impl fmt::Display for FlowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowError::UnknownSelector(s) => write!(f, "unknown palette selector: {s:?}"),
            FlowError::MalformedDate(s) => write!(f, "malformed date string: {s:?}"),
            FlowError::PollTimeout(what) => write!(f, "{what} poll exceeded its retry budget"),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS — cross-domain communication
// ═══════════════════════════════════════════════════════════════════════

/// Navigation → wizard: the user is entering the wizard for a day slot.
#[derive(Event, Debug, Clone)]
pub struct WizardAssignEvent {
    pub slot: u8,
    /// `"0"` for today, else `ddMMyyyy`.
    pub date_key: String,
}

/// Navigation → wizard: the wizard screen was left unsaved.
#[derive(Event, Debug, Clone)]
pub struct WizardResetEvent;

/// Navigation → journal: populate the day view for a selected day.
#[derive(Event, Debug, Clone)]
pub struct DayViewRequestEvent {
    /// `"0"` for today, else `ddMMyyyy`.
    pub date_key: String,
}

/// Navigation → screens: show a saved image full-screen.
#[derive(Event, Debug, Clone)]
pub struct ImageViewRequestEvent {
    pub path: PathBuf,
}

/// Wizard → journal: a composition finished writing to disk.
#[derive(Event, Debug, Clone)]
pub struct RecordSavedEvent {
    pub save_name: SaveName,
    pub path: PathBuf,
}

/// Wizard → anyone listening: the save flow gave up.
#[derive(Event, Debug, Clone)]
pub struct SaveFailedEvent {
    pub reason: FlowError,
}

/// Wizard → anyone listening: a palette click matched no known variant.
#[derive(Event, Debug, Clone)]
pub struct SelectionRejectedEvent {
    pub selector: String,
}

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

/// How far off-center an incoming screen starts, world units.
pub const SLIDE_DISTANCE: f32 = 10.0;
/// Normalized slide progress per second (full slide in 0.4 s).
pub const SLIDE_RATE: f32 = 2.5;

pub const DEPTH_BASE: f32 = 50.0;
pub const DEPTH_FLOOR: f32 = 10.0;
pub const DEPTH_STEP: f32 = 0.5;

pub const BACKGROUND_COUNT: usize = 6;
/// World distance between adjacent backgrounds on the strip.
pub const BACKGROUND_STEP: f32 = 10.25;

/// Rest position of the character palette bar when slid into view, and
/// the y it retreats to off-frame.
pub const CHAR_PALETTE_IN: Vec3 = Vec3::new(-3.0, 3.15, 0.4);
pub const CHAR_PALETTE_OUT_Y: f32 = 5.0;
pub const OBJ_PALETTE_IN: Vec3 = Vec3::new(-2.2, 3.15, 0.4);
pub const OBJ_PALETTE_OUT_Y: f32 = 6.0;

/// Depth placed entities ride at, above the background strip.
pub const ENTITY_DEPTH: f32 = 0.4;

pub const EVENT_SLOTS: u8 = 6;

pub const CAPTURE_WIDTH: u32 = 1024;
pub const CAPTURE_HEIGHT: u32 = 768;

/// Frame budgets for the two per-frame polls. Both compensate for work
/// whose completion is not directly observable; neither may stall forever.
pub const SAVE_POLL_MAX_FRAMES: u32 = 600;
pub const IMAGE_SWAP_MAX_FRAMES: u32 = 600;

/// Calendar grid spacing: one column per weekday, one row per week.
pub const CAL_COLUMN_OFFSET: f32 = 1.12;
pub const CAL_ROW_OFFSET: f32 = -0.74;
/// Two-digit day numbers center slightly left of their box; nudge right.
pub const CAL_TWO_DIGIT_NUDGE: f32 = 0.07;
/// Top-left origin of the calendar grid, world units.
pub const CAL_GRID_ORIGIN: Vec2 = Vec2::new(-3.36, 1.6);

/// Pixels per world unit (camera zoom); a 1024×768 window shows the
/// 10.24 × 7.68 unit stage.
pub const WORLD_SCALE: f32 = 100.0;
pub const STAGE_WIDTH: f32 = 10.24;
pub const STAGE_HEIGHT: f32 = 7.68;

// ═══════════════════════════════════════════════════════════════════════
// TEXTURE PLUMBING
// ═══════════════════════════════════════════════════════════════════════

/// Wraps a decoded raster into a displayable texture asset.
pub fn texture_from_rgba(image: &image::RgbaImage) -> Image {
    use bevy::render::render_asset::RenderAssetUsages;
    use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

    Image::new(
        Extent3d {
            width: image.width(),
            height: image.height(),
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        image.as_raw().clone(),
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
    )
}
