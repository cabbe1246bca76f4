//! Slide transitions between screens.
//!
//! A slide brings the incoming screen in from the side over the current
//! one, which is pushed back in depth. Text elements of the outgoing
//! screen are disabled for the duration so they cannot bleed through the
//! incoming backdrop — a rendering workaround carried over deliberately.

use bevy::prelude::*;

use super::{SelectedDayKey, TransitionHook, TransitionRequest};
use crate::shared::*;

/// Applies guarded transition requests: screen placement, text toggles,
/// and the pre-transition hooks for the sub-flow screens.
#[allow(clippy::too_many_arguments)]
pub fn begin_requested_transitions(
    mut requests: EventReader<TransitionRequest>,
    mut nav: ResMut<NavigationState>,
    selected_day: Res<SelectedDayKey>,
    mut screens: Query<(&ScreenRoot, &mut Transform, &mut Visibility)>,
    texts: Res<ScreenTextRegistry>,
    mut element_visibility: Query<&mut Visibility, Without<ScreenRoot>>,
    mut day_view_events: EventWriter<DayViewRequestEvent>,
    mut wizard_assign_events: EventWriter<WizardAssignEvent>,
    mut wizard_reset_events: EventWriter<WizardResetEvent>,
    mut image_view_events: EventWriter<ImageViewRequestEvent>,
) {
    for request in requests.read() {
        let outgoing = nav.current;
        if !nav.begin(request.target, request.reversed) {
            // Same screen or a slide already running. Expected, ignored.
            debug!(
                "[Navigation] Transition to {:?} ignored (current {:?}, in progress: {})",
                request.target,
                outgoing,
                nav.transition_in_progress()
            );
            continue;
        }

        info!(
            "[Navigation] {} -> {} (reversed: {})",
            outgoing.label(),
            request.target.label(),
            request.reversed
        );

        // Leaving the wizard always resets the draft; a saved draft is
        // finished and an unsaved one is abandoned.
        if outgoing == ScreenId::Wizard {
            wizard_reset_events.send(WizardResetEvent);
        }

        // Any slide into the day view reloads it for the selected day,
        // back arrow included.
        if request.target == ScreenId::DayView {
            day_view_events.send(DayViewRequestEvent {
                date_key: selected_day.0.clone(),
            });
        }

        match &request.hook {
            TransitionHook::None => {}
            TransitionHook::OpenWizard { slot } => {
                wizard_assign_events.send(WizardAssignEvent {
                    slot: *slot,
                    date_key: selected_day.0.clone(),
                });
            }
            TransitionHook::OpenImageView { path } => {
                image_view_events.send(ImageViewRequestEvent { path: path.clone() });
            }
        }

        // Push the outgoing screen back and stage the incoming one at its
        // off-side start position.
        let depth = nav.next_depth_offset();
        let start = nav
            .transition
            .as_ref()
            .map(|t| t.start)
            .unwrap_or(Vec3::ZERO);
        for (root, mut transform, mut visibility) in &mut screens {
            if root.id == outgoing {
                // Negative z: behind the incoming screen, never on top.
                transform.translation = Vec3::new(0.0, 0.0, -depth);
            } else if root.id == request.target {
                transform.translation = start;
                *visibility = Visibility::Visible;
            }
        }

        // Flat-registry text toggle: incoming on, outgoing off.
        set_text_visibility(&texts, &mut element_visibility, request.target, true);
        set_text_visibility(&texts, &mut element_visibility, outgoing, false);
    }
}

fn set_text_visibility(
    texts: &ScreenTextRegistry,
    element_visibility: &mut Query<&mut Visibility, Without<ScreenRoot>>,
    screen: ScreenId,
    visible: bool,
) {
    for &entity in texts.for_screen(screen) {
        if let Ok(mut visibility) = element_visibility.get_mut(entity) {
            *visibility = if visible {
                Visibility::Visible
            } else {
                Visibility::Hidden
            };
        }
    }
}

/// Advances the active slide by wall-clock time and completes it when the
/// incoming screen reaches center.
pub fn tick_transitions(
    time: Res<Time>,
    mut nav: ResMut<NavigationState>,
    mut screens: Query<(&ScreenRoot, &mut Transform), With<ScreenRoot>>,
) {
    let Some(transition) = nav.transition.as_mut() else {
        return;
    };

    transition.progress += time.delta_secs() * SLIDE_RATE;
    let t = transition.progress.min(1.0);
    let position = transition.start.lerp(Vec3::ZERO, t);
    let target = transition.target;
    let finished = transition.progress >= 1.0;

    for (root, mut transform) in &mut screens {
        if root.id == target {
            transform.translation = position;
        }
    }

    if finished {
        nav.complete();
        info!(
            "[Navigation] Now on {} (previous {})",
            nav.current.label(),
            nav.previous.label()
        );
    }
}
