//! Slide animations inside the wizard screen: the background strip and
//! the two palette bars. Each advances by wall-clock time at the shared
//! slide rate and snaps to its destination on completion.

use bevy::prelude::*;

use crate::shared::*;

/// The background strip's slide. Only one may run at a time; arrow
/// clicks while it runs are dropped (re-entry guard, not an error).
#[derive(Resource, Debug, Clone, Default)]
pub struct StripSlide {
    pub active: Option<StripSlideState>,
}

#[derive(Debug, Clone)]
pub struct StripSlideState {
    pub from: Vec3,
    pub to: Vec3,
    pub progress: f32,
}

impl StripSlide {
    pub fn in_progress(&self) -> bool {
        self.active.is_some()
    }
}

/// A palette bar gliding between its in/out rest positions. Unlike the
/// strip, bars may animate concurrently (characters out while objects
/// come in).
#[derive(Component, Debug, Clone)]
pub struct BarSlide {
    pub from: Vec3,
    pub to: Vec3,
    pub progress: f32,
}

/// Starts (or redirects) a bar slide toward `to`.
pub fn slide_bar(commands: &mut Commands, entity: Entity, from: Vec3, to: Vec3) {
    commands.entity(entity).insert(BarSlide {
        from,
        to,
        progress: 0.0,
    });
}

pub fn tick_strip_slide(
    time: Res<Time>,
    mut slide: ResMut<StripSlide>,
    mut strips: Query<&mut Transform, With<BackgroundStrip>>,
) {
    let Some(state) = slide.active.as_mut() else {
        return;
    };

    state.progress += time.delta_secs() * SLIDE_RATE;
    let t = state.progress.min(1.0);
    let position = state.from.lerp(state.to, t);
    for mut transform in &mut strips {
        transform.translation = position;
    }

    if state.progress >= 1.0 {
        slide.active = None;
    }
}

pub fn tick_bar_slides(
    time: Res<Time>,
    mut commands: Commands,
    mut bars: Query<(Entity, &mut BarSlide, &mut Transform)>,
) {
    for (entity, mut slide, mut transform) in &mut bars {
        slide.progress += time.delta_secs() * SLIDE_RATE;
        let t = slide.progress.min(1.0);
        transform.translation = slide.from.lerp(slide.to, t);
        if slide.progress >= 1.0 {
            transform.translation = slide.to;
            commands.entity(entity).remove::<BarSlide>();
        }
    }
}
