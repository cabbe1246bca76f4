//! Wizard domain — the three-question event creation flow.
//!
//! Strictly linear: choose a background, place characters, place
//! objects, save. The only way back is a full reset, which navigation
//! requests whenever the wizard screen is left. All draft mutation goes
//! through the `EventDraft` state machine; the systems here translate
//! pointer hits into draft calls and mirror the draft into sprites.

pub mod capture;
pub mod palette;

use bevy::prelude::*;
use std::collections::HashMap;

use crate::data::{EntityArtRegistry, QuestionSet};
use crate::navigation::{acquire_pressed_tint, PressedControl};
use crate::shared::*;
use palette::{slide_bar, StripSlide};

/// Delete affordance geometry, relative to its entity's center.
const BADGE_OFFSET: Vec2 = Vec2::new(0.35, 0.5);
const BADGE_SIZE: Vec2 = Vec2::new(0.26, 0.26);

/// Sprite + badge pair mirroring one draft entity.
#[derive(Debug, Clone, Copy)]
pub struct PlacedView {
    pub sprite: Entity,
    pub badge: Entity,
}

/// Index from draft entity id to its spawned sprites, so the mirror
/// systems reconcile instead of respawning.
#[derive(Resource, Debug, Clone, Default)]
pub struct PlacedSpriteIndex {
    pub map: HashMap<u32, PlacedView>,
}

pub struct WizardPlugin;

impl Plugin for WizardPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EventDraft>()
            .init_resource::<StripSlide>()
            .init_resource::<capture::SaveGate>()
            .init_resource::<PlacedSpriteIndex>()
            .init_resource::<ControlRegistry>()
            .add_systems(
                Update,
                (
                    handle_wizard_assign,
                    handle_wizard_reset,
                    handle_wizard_pointer,
                    drag_held_entity,
                    sync_placed_sprites,
                    update_wizard_policy,
                    palette::tick_strip_slide,
                    palette::tick_bar_slides,
                    capture::poll_save_gate,
                )
                    .chain()
                    .run_if(in_state(AppState::Running)),
            );
    }
}

/// Entry hook: navigation forwards the clicked slot and the working day.
/// A malformed date is flagged and leaves the draft without a save name;
/// the save gate will then time out instead of writing under a bogus key.
fn handle_wizard_assign(
    mut events: EventReader<WizardAssignEvent>,
    today: Res<TodayDate>,
    mut draft: ResMut<EventDraft>,
    mut gate: ResMut<capture::SaveGate>,
) {
    for event in events.read() {
        gate.reset();
        match draft.set_save_name(event.slot, &event.date_key, today.0) {
            Ok(()) => {
                if let Some(name) = &draft.save_name {
                    info!("[Wizard] Assigned save name {}", name);
                }
            }
            Err(err) => {
                draft.save_name = None;
                warn!("[Wizard] {}", err);
            }
        }
    }
}

/// Exit hook: back to question one with an empty scene. The palette bars
/// glide out the way they came; the placed-sprite mirror despawns the
/// scene contents on its next run.
#[allow(clippy::too_many_arguments)]
fn handle_wizard_reset(
    mut events: EventReader<WizardResetEvent>,
    mut commands: Commands,
    mut draft: ResMut<EventDraft>,
    mut gate: ResMut<capture::SaveGate>,
    mut strip_slide: ResMut<StripSlide>,
    questions: Res<QuestionSet>,
    mut strips: Query<&mut Transform, With<BackgroundStrip>>,
    char_bars: Query<(Entity, &Transform), (With<CharacterPaletteBar>, Without<BackgroundStrip>)>,
    obj_bars: Query<
        (Entity, &Transform),
        (
            With<ObjectPaletteBar>,
            Without<CharacterPaletteBar>,
            Without<BackgroundStrip>,
        ),
    >,
    mut question_texts: Query<&mut Text2d, With<QuestionText>>,
) {
    for _ in events.read() {
        draft.reset();
        gate.reset();
        strip_slide.active = None;

        // Background strip snaps back to the first image.
        for mut transform in &mut strips {
            transform.translation.x = 0.0;
            transform.translation.y = 0.0;
        }

        for (entity, transform) in &char_bars {
            slide_bar(
                &mut commands,
                entity,
                transform.translation,
                Vec3::new(CHAR_PALETTE_IN.x, CHAR_PALETTE_OUT_Y, CHAR_PALETTE_IN.z),
            );
        }
        for (entity, transform) in &obj_bars {
            slide_bar(
                &mut commands,
                entity,
                transform.translation,
                Vec3::new(OBJ_PALETTE_IN.x, OBJ_PALETTE_OUT_Y, OBJ_PALETTE_IN.z),
            );
        }

        for mut text in &mut question_texts {
            text.0 = questions.prompts[0].to_string();
        }

        info!("[Wizard] Reset to question one");
    }
}

/// Dispatches wizard-screen pointer presses: background arrows, the
/// confirm tick, palette items, delete badges, and placed entities.
#[allow(clippy::too_many_arguments)]
fn handle_wizard_pointer(
    pointer: Res<PointerInput>,
    nav: Res<NavigationState>,
    registry: Res<ControlRegistry>,
    mut commands: Commands,
    mut draft: ResMut<EventDraft>,
    art: Res<EntityArtRegistry>,
    questions: Res<QuestionSet>,
    mut strip_slide: ResMut<StripSlide>,
    mut pressed: ResMut<PressedControl>,
    mut sprites: Query<&mut Sprite>,
    strips: Query<&Transform, With<BackgroundStrip>>,
    char_bars: Query<(Entity, &Transform), (With<CharacterPaletteBar>, Without<BackgroundStrip>)>,
    obj_bars: Query<
        (Entity, &Transform),
        (
            With<ObjectPaletteBar>,
            Without<CharacterPaletteBar>,
            Without<BackgroundStrip>,
        ),
    >,
    mut question_texts: Query<&mut Text2d, With<QuestionText>>,
    mut rejected: EventWriter<SelectionRejectedEvent>,
) {
    if !pointer.pressed || nav.current != ScreenId::Wizard || nav.transition_in_progress() {
        return;
    }
    let Some(point) = pointer.world_pos else {
        return;
    };

    if let Some(hit) = registry.hit_test(ScreenId::Wizard, point) {
        let entity = hit.entity;
        let category = hit.category;
        let payload = hit.payload.clone();
        let wants_tint = hit.pressed_tint;

        match category {
            ControlCategory::BackgroundBack | ControlCategory::BackgroundForward => {
                if draft.stage != DraftStage::ChooseBackground {
                    return;
                }
                if wants_tint {
                    acquire_pressed_tint(&mut pressed, &mut sprites, entity);
                }
                let forward = category == ControlCategory::BackgroundForward;
                start_background_slide(&mut draft, &mut strip_slide, &strips, forward);
            }
            ControlCategory::ConfirmAnswer => {
                if draft.stage == DraftStage::Saved {
                    return;
                }
                if wants_tint {
                    acquire_pressed_tint(&mut pressed, &mut sprites, entity);
                }
                advance_question(
                    &mut commands,
                    &mut draft,
                    &questions,
                    &char_bars,
                    &obj_bars,
                    &mut question_texts,
                );
            }
            ControlCategory::PaletteCharacter | ControlCategory::PaletteObject => {
                if draft.stage == DraftStage::Saved {
                    return;
                }
                let ControlPayload::Selector(selector) = payload else {
                    return;
                };
                match EntityKind::from_selector(&selector) {
                    Ok(kind) => {
                        let id = draft.spawn_entity(kind, point);
                        debug!("[Wizard] Placed {} as entity {}", selector, id);
                    }
                    Err(err) => {
                        warn!("[Wizard] {}", err);
                        rejected.send(SelectionRejectedEvent { selector });
                    }
                }
            }
            // Navigation-owned controls (the back arrow) are dispatched
            // by the navigation plugin.
            _ => {}
        }
        return;
    }

    // Nothing from the registry: the press lands in the scene itself.
    if draft.stage == DraftStage::Saved {
        return;
    }

    if let Some(held) = draft.held {
        // The held entity follows the pointer, so any press drops it.
        draft.grab_or_release(held, point);
        debug!("[Wizard] Released entity {}", held);
        return;
    }

    if let Some(id) = badge_hit(&draft, point) {
        draft.delete_entity(id);
        info!("[Wizard] Deleted entity {}", id);
        return;
    }

    if let Some(id) = placed_entity_hit(&draft, &art, point) {
        draft.grab_or_release(id, point);
        debug!("[Wizard] Grabbed entity {}", id);
    }
}

/// Topmost delete badge under the point, among badges currently shown.
fn badge_hit(draft: &EventDraft, point: Vec2) -> Option<u32> {
    draft
        .entities
        .iter()
        .rev()
        .find(|e| {
            draft.held != Some(e.id)
                && Rect::from_center_size(e.position + BADGE_OFFSET, BADGE_SIZE).contains(point)
        })
        .map(|e| e.id)
}

/// Topmost placed entity under the point.
fn placed_entity_hit(draft: &EventDraft, art: &EntityArtRegistry, point: Vec2) -> Option<u32> {
    draft
        .entities
        .iter()
        .rev()
        .find(|e| Rect::from_center_size(e.position, art.get(e.kind).size).contains(point))
        .map(|e| e.id)
}

/// Confirm tick: advances the stage and runs its reveal/retreat slides.
fn advance_question(
    commands: &mut Commands,
    draft: &mut EventDraft,
    questions: &QuestionSet,
    char_bars: &Query<(Entity, &Transform), (With<CharacterPaletteBar>, Without<BackgroundStrip>)>,
    obj_bars: &Query<
        (Entity, &Transform),
        (
            With<ObjectPaletteBar>,
            Without<CharacterPaletteBar>,
            Without<BackgroundStrip>,
        ),
    >,
    question_texts: &mut Query<&mut Text2d, With<QuestionText>>,
) {
    let stage = draft.advance_stage();
    for mut text in question_texts.iter_mut() {
        text.0 = questions.label_for(stage).to_string();
    }

    let char_out = Vec3::new(CHAR_PALETTE_IN.x, CHAR_PALETTE_OUT_Y, CHAR_PALETTE_IN.z);
    let obj_out = Vec3::new(OBJ_PALETTE_IN.x, OBJ_PALETTE_OUT_Y, OBJ_PALETTE_IN.z);

    match stage {
        DraftStage::PlaceCharacters => {
            for (entity, transform) in char_bars.iter() {
                slide_bar(commands, entity, transform.translation, CHAR_PALETTE_IN);
            }
        }
        DraftStage::PlaceObjects => {
            for (entity, transform) in char_bars.iter() {
                slide_bar(commands, entity, transform.translation, char_out);
            }
            for (entity, transform) in obj_bars.iter() {
                slide_bar(commands, entity, transform.translation, OBJ_PALETTE_IN);
            }
        }
        DraftStage::Saved => {
            for (entity, transform) in obj_bars.iter() {
                slide_bar(commands, entity, transform.translation, obj_out);
            }
            // The held entity, if any, is dropped where it is.
            draft.held = None;
        }
        DraftStage::ChooseBackground => {}
    }

    info!("[Wizard] Question advanced to {:?}", stage);
}

/// Moves the background strip one image over, adjusting the bounds index.
/// Guarded against re-entry while a slide is already running.
fn start_background_slide(
    draft: &mut EventDraft,
    slide: &mut StripSlide,
    strips: &Query<&Transform, With<BackgroundStrip>>,
    forward: bool,
) {
    if slide.in_progress() {
        return;
    }
    let index = draft.background_index;
    if forward && index + 1 >= BACKGROUND_COUNT {
        return;
    }
    if !forward && index == 0 {
        return;
    }

    let Some(from) = strips.iter().next().map(|t| t.translation) else {
        return;
    };
    let step = if forward {
        -BACKGROUND_STEP
    } else {
        BACKGROUND_STEP
    };
    draft.background_index = if forward { index + 1 } else { index - 1 };
    slide.active = Some(palette::StripSlideState {
        from,
        to: from + Vec3::new(step, 0.0, 0.0),
        progress: 0.0,
    });
    debug!(
        "[Wizard] Background slide to index {}",
        draft.background_index
    );
}

/// While an entity is held it follows the pointer every frame.
fn drag_held_entity(pointer: Res<PointerInput>, mut draft: ResMut<EventDraft>) {
    if draft.held.is_none() {
        return;
    }
    if let Some(position) = pointer.world_pos {
        draft.drag_to(position);
    }
}

/// Mirrors the draft into sprites: spawns missing placed entities,
/// despawns deleted ones, tracks positions, and keeps each delete badge
/// shown exactly when its entity is resting and the draft is editable.
fn sync_placed_sprites(
    mut commands: Commands,
    draft: Res<EventDraft>,
    art: Res<EntityArtRegistry>,
    mut index: ResMut<PlacedSpriteIndex>,
    scene_roots: Query<Entity, With<ComposedSceneRoot>>,
    mut transforms: Query<&mut Transform, With<PlacedSprite>>,
    mut badge_visibility: Query<&mut Visibility, With<DeleteBadge>>,
) {
    let Ok(scene_root) = scene_roots.get_single() else {
        return;
    };

    for entity in &draft.entities {
        if index.map.contains_key(&entity.id) {
            continue;
        }
        let def = art.get(entity.kind);
        let badge = commands
            .spawn((
                DeleteBadge {
                    draft_id: entity.id,
                },
                Sprite::from_color(Color::srgb(0.85, 0.20, 0.20), BADGE_SIZE),
                Transform::from_xyz(BADGE_OFFSET.x, BADGE_OFFSET.y, 0.05),
                Visibility::Hidden,
            ))
            .id();
        let sprite = commands
            .spawn((
                PlacedSprite {
                    draft_id: entity.id,
                },
                Sprite::from_color(def.color, def.size),
                Transform::from_xyz(entity.position.x, entity.position.y, 0.0),
            ))
            .id();
        commands.entity(sprite).add_child(badge);
        commands.entity(scene_root).add_child(sprite);
        index.map.insert(entity.id, PlacedView { sprite, badge });
    }

    let stale: Vec<u32> = index
        .map
        .keys()
        .filter(|id| draft.entity(**id).is_none())
        .copied()
        .collect();
    for id in stale {
        if let Some(view) = index.map.remove(&id) {
            commands.entity(view.sprite).despawn_recursive();
        }
    }

    for entity in &draft.entities {
        let Some(view) = index.map.get(&entity.id) else {
            continue;
        };
        if let Ok(mut transform) = transforms.get_mut(view.sprite) {
            transform.translation.x = entity.position.x;
            transform.translation.y = entity.position.y;
        }
        if let Ok(mut visibility) = badge_visibility.get_mut(view.badge) {
            let shown = draft.held != Some(entity.id) && draft.stage != DraftStage::Saved;
            *visibility = if shown {
                Visibility::Visible
            } else {
                Visibility::Hidden
            };
        }
    }
}

/// Per-frame visibility policy, mirroring the draft state exactly:
/// background arrows only exist on question one and hide at the strip's
/// ends, the header bar frames the palette questions, and the confirm
/// tick disappears once everything is answered.
fn update_wizard_policy(
    draft: Res<EventDraft>,
    mut registry: ResMut<ControlRegistry>,
    mut elements: Query<
        (
            Entity,
            &mut Visibility,
            Option<&BackgroundArrow>,
            Option<&HeaderBar>,
            Option<&ConfirmTick>,
        ),
        Or<(With<BackgroundArrow>, With<HeaderBar>, With<ConfirmTick>)>,
    >,
) {
    for (entity, mut visibility, arrow, header, _tick) in &mut elements {
        let shown = if let Some(arrow) = arrow {
            draft.stage == DraftStage::ChooseBackground
                && if arrow.forward {
                    draft.background_index + 1 < BACKGROUND_COUNT
                } else {
                    draft.background_index > 0
                }
        } else if header.is_some() {
            matches!(
                draft.stage,
                DraftStage::PlaceCharacters | DraftStage::PlaceObjects
            )
        } else {
            draft.stage != DraftStage::Saved
        };

        *visibility = if shown {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
        if header.is_none() {
            registry.set_enabled(entity, shown);
        }
    }

    // Palette items are clickable only during their own question.
    for entry in registry.entries.iter_mut() {
        match entry.category {
            ControlCategory::PaletteCharacter => {
                entry.enabled = draft.stage == DraftStage::PlaceCharacters;
            }
            ControlCategory::PaletteObject => {
                entry.enabled = draft.stage == DraftStage::PlaceObjects;
            }
            _ => {}
        }
    }
}
