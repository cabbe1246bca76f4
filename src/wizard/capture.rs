//! Save pipeline for a finished draft: a bounded per-frame gate that
//! waits for the object palette to clear the frame, then a CPU-side
//! composition of the scene, a PNG write, and the saved-record
//! notification.

use bevy::prelude::*;
use image::{imageops, RgbaImage};

use crate::data::{ComposeArtRegistry, COMPOSE_SCALE};
use crate::shared::*;
use crate::store::EventImageStore;

/// Retry state of the save gate. `failed` latches after the frame budget
/// runs out so the poll stops instead of spinning forever.
#[derive(Resource, Debug, Clone, Default)]
pub struct SaveGate {
    pub attempts: u32,
    pub failed: bool,
}

impl SaveGate {
    pub fn reset(&mut self) {
        self.attempts = 0;
        self.failed = false;
    }
}

/// Renders the draft onto the chosen background in placement order.
/// Positions are world units measured from the stage center.
pub fn compose_scene(background: &RgbaImage, placements: &[(&RgbaImage, Vec2)]) -> RgbaImage {
    let mut canvas = if background.dimensions() == (CAPTURE_WIDTH, CAPTURE_HEIGHT) {
        background.clone()
    } else {
        imageops::resize(
            background,
            CAPTURE_WIDTH,
            CAPTURE_HEIGHT,
            imageops::FilterType::Triangle,
        )
    };

    for (tile, position) in placements {
        let x = (CAPTURE_WIDTH as f32 / 2.0 + position.x * COMPOSE_SCALE
            - tile.width() as f32 / 2.0)
            .round() as i64;
        let y = (CAPTURE_HEIGHT as f32 / 2.0
            - position.y * COMPOSE_SCALE
            - tile.height() as f32 / 2.0)
            .round() as i64;
        imageops::overlay(&mut canvas, *tile, x, y);
    }

    canvas
}

/// Runs every frame once the draft reaches its final stage. The capture
/// is gated on the object palette having fully slid out of frame — the
/// slide's completion is only observable through its transform, so the
/// gate re-checks each frame within a bounded budget.
pub fn poll_save_gate(
    mut draft: ResMut<EventDraft>,
    mut gate: ResMut<SaveGate>,
    compose_art: Res<ComposeArtRegistry>,
    store: Res<EventImageStore>,
    bars: Query<&Transform, With<ObjectPaletteBar>>,
    mut saved_events: EventWriter<RecordSavedEvent>,
    mut failed_events: EventWriter<SaveFailedEvent>,
) {
    if draft.stage != DraftStage::Saved || draft.saved || gate.failed {
        return;
    }

    let bar_rest = Vec3::new(OBJ_PALETTE_IN.x, OBJ_PALETTE_OUT_Y, OBJ_PALETTE_IN.z);
    let bar_clear = bars
        .iter()
        .any(|transform| transform.translation.distance(bar_rest) < 0.01);

    if !bar_clear || draft.save_name.is_none() {
        bump_attempts(&mut gate, &mut failed_events);
        return;
    }
    let Some(save_name) = draft.save_name.clone() else {
        return;
    };

    let Some(background) = compose_art.backgrounds.get(draft.background_index) else {
        warn!(
            "[Wizard] No compositor background at index {}",
            draft.background_index
        );
        bump_attempts(&mut gate, &mut failed_events);
        return;
    };
    let placements: Vec<(&RgbaImage, Vec2)> = draft
        .entities
        .iter()
        .filter_map(|e| compose_art.entities.get(&e.kind).map(|img| (img, e.position)))
        .collect();

    let composed = compose_scene(background, &placements);
    match store.write_image(&save_name, &composed) {
        Ok(path) => {
            draft.saved = true;
            info!(
                "[Wizard] Saved {} ({} placed entities) to {}",
                save_name,
                draft.entities.len(),
                path.display()
            );
            saved_events.send(RecordSavedEvent { save_name, path });
        }
        Err(err) => {
            warn!("[Wizard] Save attempt failed: {}", err);
            bump_attempts(&mut gate, &mut failed_events);
        }
    }
}

fn bump_attempts(gate: &mut SaveGate, failed_events: &mut EventWriter<SaveFailedEvent>) {
    gate.attempts += 1;
    if gate.attempts > SAVE_POLL_MAX_FRAMES {
        gate.failed = true;
        let reason = FlowError::PollTimeout("save gate");
        error!("[Wizard] {}", reason);
        failed_events.send(SaveFailedEvent { reason });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn tile(w: u32, h: u32, color: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba(color))
    }

    #[test]
    fn test_compose_centers_a_tile() {
        let background = tile(CAPTURE_WIDTH, CAPTURE_HEIGHT, [10, 10, 10, 255]);
        let red = tile(20, 20, [255, 0, 0, 255]);
        let composed = compose_scene(&background, &[(&red, Vec2::ZERO)]);

        let center = composed.get_pixel(CAPTURE_WIDTH / 2, CAPTURE_HEIGHT / 2);
        assert_eq!(center, &Rgba([255, 0, 0, 255]));
        // Well outside the tile the background shows through.
        assert_eq!(composed.get_pixel(10, 10), &Rgba([10, 10, 10, 255]));
    }

    #[test]
    fn test_compose_maps_world_axes() {
        let background = tile(CAPTURE_WIDTH, CAPTURE_HEIGHT, [0, 0, 0, 255]);
        let green = tile(10, 10, [0, 255, 0, 255]);
        // +x is right, +y is up (pixel y runs down).
        let composed = compose_scene(&background, &[(&green, Vec2::new(2.0, 1.0))]);

        let px = (CAPTURE_WIDTH / 2) + 200;
        let py = (CAPTURE_HEIGHT / 2) - 100;
        assert_eq!(composed.get_pixel(px, py), &Rgba([0, 255, 0, 255]));
    }

    #[test]
    fn test_compose_clips_offscreen_placements() {
        let background = tile(CAPTURE_WIDTH, CAPTURE_HEIGHT, [0, 0, 0, 255]);
        let blue = tile(30, 30, [0, 0, 255, 255]);
        // Far outside the frame on every side; must not panic.
        let composed = compose_scene(
            &background,
            &[
                (&blue, Vec2::new(-50.0, 0.0)),
                (&blue, Vec2::new(50.0, 0.0)),
                (&blue, Vec2::new(0.0, 50.0)),
                (&blue, Vec2::new(-5.1, 3.83)),
            ],
        );
        assert_eq!(composed.dimensions(), (CAPTURE_WIDTH, CAPTURE_HEIGHT));
    }

    #[test]
    fn test_compose_respects_placement_order() {
        let background = tile(CAPTURE_WIDTH, CAPTURE_HEIGHT, [0, 0, 0, 255]);
        let first = tile(40, 40, [255, 0, 0, 255]);
        let second = tile(40, 40, [0, 255, 0, 255]);
        let composed = compose_scene(&background, &[(&first, Vec2::ZERO), (&second, Vec2::ZERO)]);
        // Later placements draw over earlier ones.
        assert_eq!(
            composed.get_pixel(CAPTURE_WIDTH / 2, CAPTURE_HEIGHT / 2),
            &Rgba([0, 255, 0, 255])
        );
    }

    #[test]
    fn test_compose_resizes_odd_backgrounds() {
        let background = tile(64, 48, [7, 7, 7, 255]);
        let composed = compose_scene(&background, &[]);
        assert_eq!(composed.dimensions(), (CAPTURE_WIDTH, CAPTURE_HEIGHT));
    }
}
