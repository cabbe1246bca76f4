//! Day-view population: resolves a selected day to its saved records,
//! fills the six slots, and builds the headline.
//!
//! Freshly saved images arrive through a bounded per-frame poll — the
//! image is reloaded until the displayed texture observably changes,
//! which masks asset-load latency without ever stalling forever.

use bevy::prelude::*;
use chrono::{Datelike, NaiveDate};

use crate::shared::*;
use crate::store::EventImageStore;

/// A slot swap waiting for its freshly written image.
#[derive(Resource, Debug, Clone, Default)]
pub struct PendingSlotSwap {
    pub pending: Option<SlotSwap>,
}

#[derive(Debug, Clone)]
pub struct SlotSwap {
    pub save_name: SaveName,
    pub path: std::path::PathBuf,
    pub old_image: Handle<Image>,
    pub attempts: u32,
}

/// Ordinal suffix matching calendar day-of-month semantics, teens
/// included: 1st, 2nd, 3rd, 4th … 11th, 12th, 13th … 21st, 22nd.
pub fn ordinal_suffix(day: u32) -> &'static str {
    match day % 100 {
        11 | 12 | 13 => "th",
        _ => match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    }
}

/// "Wednesday 3rd September" style headline for the day view.
pub fn day_title(date: NaiveDate) -> String {
    format!(
        "{} {}{} {}",
        date.format("%A"),
        date.day(),
        ordinal_suffix(date.day()),
        date.format("%B")
    )
}

/// Clears every slot, then enables and fills the ones with a saved record
/// for the requested day.
#[allow(clippy::too_many_arguments)]
pub fn handle_day_view_request(
    mut requests: EventReader<DayViewRequestEvent>,
    today: Res<TodayDate>,
    store: Res<EventImageStore>,
    mut controls: ResMut<ControlRegistry>,
    mut images: ResMut<Assets<Image>>,
    mut displays: Query<(Entity, &EventSlotDisplay, &mut Sprite, &mut Visibility)>,
    mut titles: Query<&mut Text2d, With<DayViewTitleText>>,
) {
    for request in requests.read() {
        let date = match parse_event_date(&request.date_key, today.0) {
            Ok(date) => date,
            Err(err) => {
                warn!("[Journal] Day view request dropped: {}", err);
                continue;
            }
        };

        // Reset pass: hide all thumbnails and make them unhittable.
        for (entity, _, _, mut visibility) in &mut displays {
            *visibility = Visibility::Hidden;
            controls.set_enabled(entity, false);
        }

        let key = short_date_key(date);
        let records = store.scan_day(&key);
        for record in &records {
            let Some((entity, _, mut sprite, mut visibility)) = displays
                .iter_mut()
                .find(|(_, display, _, _)| display.slot == record.slot)
            else {
                continue;
            };
            match store.load_image(&record.path) {
                Ok(raster) => {
                    sprite.image = images.add(texture_from_rgba(&raster));
                    *visibility = Visibility::Visible;
                    controls.set_enabled(entity, true);
                }
                Err(err) => {
                    warn!("[Journal] Slot {} image skipped: {}", record.slot, err);
                }
            }
        }

        let title = day_title(date);
        for mut text in &mut titles {
            text.0 = title.clone();
        }

        info!(
            "[Journal] Day view ready for {} ({} records)",
            date,
            records.len()
        );
    }
}

/// Notes a freshly saved record; the poll below swaps it in.
pub fn handle_record_saved(
    mut events: EventReader<RecordSavedEvent>,
    mut pending: ResMut<PendingSlotSwap>,
    displays: Query<(&EventSlotDisplay, &Sprite)>,
) {
    for event in events.read() {
        let old_image = displays
            .iter()
            .find(|(display, _)| display.slot == event.save_name.slot)
            .map(|(_, sprite)| sprite.image.clone())
            .unwrap_or_default();
        pending.pending = Some(SlotSwap {
            save_name: event.save_name.clone(),
            path: event.path.clone(),
            old_image,
            attempts: 0,
        });
        info!("[Journal] Pending slot swap for {}", event.save_name);
    }
}

/// Per-frame retry that loads the new image into its slot until the
/// displayed texture differs from the pre-save one, within the frame
/// budget.
pub fn poll_pending_slot_swap(
    mut pending: ResMut<PendingSlotSwap>,
    store: Res<EventImageStore>,
    mut controls: ResMut<ControlRegistry>,
    mut images: ResMut<Assets<Image>>,
    mut displays: Query<(Entity, &EventSlotDisplay, &mut Sprite, &mut Visibility)>,
) {
    let Some(swap) = pending.pending.as_mut() else {
        return;
    };

    swap.attempts += 1;
    if swap.attempts > IMAGE_SWAP_MAX_FRAMES {
        let reason = FlowError::PollTimeout("slot image swap");
        warn!("[Journal] {}", reason);
        pending.pending = None;
        return;
    }

    let Ok(raster) = store.load_image(&swap.path) else {
        // Not readable yet; try again next frame.
        return;
    };

    let slot = swap.save_name.slot;
    let Some((entity, _, mut sprite, mut visibility)) = displays
        .iter_mut()
        .find(|(_, display, _, _)| display.slot == slot)
    else {
        pending.pending = None;
        return;
    };

    let handle = images.add(texture_from_rgba(&raster));
    sprite.image = handle.clone();
    *visibility = Visibility::Visible;
    controls.set_enabled(entity, true);

    if handle != swap.old_image {
        debug!(
            "[Journal] Slot {} now shows {} (after {} attempts)",
            slot, swap.save_name, swap.attempts
        );
        pending.pending = None;
    }
}
