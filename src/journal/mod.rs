//! Journal domain — the content provisioner.
//!
//! Maps calendar dates to saved-event images: lays the month out on the
//! calendar screen, fills the day view's six slots from the store, and
//! swaps freshly saved images in as they land on disk.

pub mod day_view;
pub mod month_grid;

use bevy::prelude::*;

use crate::shared::{AppState, ControlRegistry, ScreenTextRegistry};

pub struct JournalPlugin;

impl Plugin for JournalPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<day_view::PendingSlotSwap>()
            .init_resource::<ControlRegistry>()
            .init_resource::<ScreenTextRegistry>()
            .add_systems(
            Update,
            (
                month_grid::populate_month_view,
                day_view::handle_day_view_request,
                day_view::handle_record_saved,
                day_view::poll_pending_slot_swap,
            )
                .chain()
                .run_if(in_state(AppState::Running)),
        );
    }
}
