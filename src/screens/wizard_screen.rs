use bevy::prelude::*;

use super::{palette, spawn_control, spawn_screen_root};
use crate::data::{BackgroundRegistry, EntityArtRegistry, QuestionSet};
use crate::shared::*;

/// The event-creation screen: the six-background strip with its switch
/// arrows, the two sliding palette bars (characters, objects), the
/// question prompt with its confirm tick, and the composed-scene root
/// that placed entities attach to.
///
/// Both palette bars start at their slid-out positions; the wizard slides
/// them in and out as the questions advance.
pub fn spawn_wizard_screen(
    mut commands: Commands,
    mut controls: ResMut<ControlRegistry>,
    mut texts: ResMut<ScreenTextRegistry>,
    backgrounds: Res<BackgroundRegistry>,
    art: Res<EntityArtRegistry>,
    questions: Res<QuestionSet>,
) {
    let root = spawn_screen_root(&mut commands, ScreenId::Wizard, palette::BACKDROP_PAPER, false);

    commands.entity(root).with_children(|parent| {
        // Background strip: all six side by side; sliding the strip left
        // by BACKGROUND_STEP shows the next one.
        parent
            .spawn((
                BackgroundStrip,
                Transform::from_xyz(0.0, 0.0, 0.05),
                Visibility::default(),
            ))
            .with_children(|strip| {
                for (i, def) in backgrounds.backgrounds.iter().enumerate() {
                    strip.spawn((
                        Sprite::from_color(def.color, Vec2::new(STAGE_WIDTH, STAGE_HEIGHT)),
                        Transform::from_xyz(i as f32 * BACKGROUND_STEP, 0.0, 0.0),
                    ));
                }
            });

        // Background switch arrows. The back arrow starts hidden: the
        // strip opens on the first image.
        let arrow_size = Vec2::new(0.6, 0.9);
        for (forward, x, visibility) in [
            (false, -4.6, Visibility::Hidden),
            (true, 4.6, Visibility::Visible),
        ] {
            let pos = Vec2::new(x, 0.0);
            let arrow = parent
                .spawn((
                    BackgroundArrow { forward },
                    Sprite::from_color(palette::ARROW, arrow_size),
                    Transform::from_xyz(pos.x, pos.y, 0.3),
                    visibility,
                ))
                .id();
            controls.register(ControlEntry {
                entity: arrow,
                screen: ScreenId::Wizard,
                rect: Rect::from_center_size(pos, arrow_size),
                z: 0.3,
                category: if forward {
                    ControlCategory::BackgroundForward
                } else {
                    ControlCategory::BackgroundBack
                },
                payload: ControlPayload::None,
                enabled: forward,
                pressed_tint: true,
            });
        }

        // Header bar behind whichever palette is on screen.
        parent.spawn((
            HeaderBar,
            Sprite::from_color(palette::HEADER, Vec2::new(STAGE_WIDTH, 1.3)),
            Transform::from_xyz(0.0, 3.15, 0.1),
            Visibility::Hidden,
        ));

        // Character palette bar, slid out above the frame until stage 2.
        parent
            .spawn((
                CharacterPaletteBar,
                Transform::from_xyz(CHAR_PALETTE_IN.x, CHAR_PALETTE_OUT_Y, CHAR_PALETTE_IN.z),
                Visibility::default(),
            ))
            .with_children(|bar| {
                for (i, kind) in CharacterKind::ALL.iter().enumerate() {
                    let def = art.get(EntityKind::Character(*kind));
                    let local = Vec2::new(i as f32 * 0.85, 0.0);
                    let thumb = bar
                        .spawn((
                            Sprite::from_color(def.color, def.size * 0.45),
                            Transform::from_xyz(local.x, local.y, 0.1),
                        ))
                        .id();
                    controls.register(ControlEntry {
                        entity: thumb,
                        screen: ScreenId::Wizard,
                        rect: Rect::from_center_size(
                            Vec2::new(CHAR_PALETTE_IN.x + local.x, CHAR_PALETTE_IN.y),
                            def.size * 0.45,
                        ),
                        z: 0.5,
                        category: ControlCategory::PaletteCharacter,
                        payload: ControlPayload::Selector(kind.selector().to_string()),
                        enabled: false,
                        pressed_tint: false,
                    });
                }
            });

        // Object palette bar, same treatment for stage 3.
        parent
            .spawn((
                ObjectPaletteBar,
                Transform::from_xyz(OBJ_PALETTE_IN.x, OBJ_PALETTE_OUT_Y, OBJ_PALETTE_IN.z),
                Visibility::default(),
            ))
            .with_children(|bar| {
                for (i, kind) in ObjectKind::ALL.iter().enumerate() {
                    let def = art.get(EntityKind::Object(*kind));
                    let local = Vec2::new(i as f32 * 1.0, 0.0);
                    let thumb = bar
                        .spawn((
                            Sprite::from_color(def.color, def.size * 0.55),
                            Transform::from_xyz(local.x, local.y, 0.1),
                        ))
                        .id();
                    controls.register(ControlEntry {
                        entity: thumb,
                        screen: ScreenId::Wizard,
                        rect: Rect::from_center_size(
                            Vec2::new(OBJ_PALETTE_IN.x + local.x, OBJ_PALETTE_IN.y),
                            def.size * 0.55,
                        ),
                        z: 0.5,
                        category: ControlCategory::PaletteObject,
                        payload: ControlPayload::Selector(kind.selector().to_string()),
                        enabled: false,
                        pressed_tint: false,
                    });
                }
            });

        // Question prompt and its confirm tick.
        let question = parent
            .spawn((
                QuestionText,
                Text2d::new(questions.prompts[0]),
                TextFont {
                    font_size: 36.0,
                    ..default()
                },
                TextColor(Color::srgb(0.15, 0.12, 0.10)),
                Transform::from_xyz(0.0, -3.3, 0.3).with_scale(Vec3::splat(1.0 / WORLD_SCALE)),
            ))
            .id();
        texts.register(ScreenId::Wizard, question);

        let tick_pos = Vec2::new(4.0, -3.3);
        let tick_size = Vec2::new(0.7, 0.7);
        let tick = parent
            .spawn((
                ConfirmTick,
                Sprite::from_color(palette::TICK, tick_size),
                Transform::from_xyz(tick_pos.x, tick_pos.y, 0.3),
            ))
            .id();
        controls.register(ControlEntry {
            entity: tick,
            screen: ScreenId::Wizard,
            rect: Rect::from_center_size(tick_pos, tick_size),
            z: 0.3,
            category: ControlCategory::ConfirmAnswer,
            payload: ControlPayload::None,
            enabled: true,
            pressed_tint: true,
        });

        spawn_control(
            parent,
            &mut controls,
            ScreenId::Wizard,
            ControlCategory::Back,
            ControlPayload::None,
            Vec2::new(-4.6, 3.4),
            Vec2::new(0.7, 0.7),
            0.3,
            palette::ARROW,
            true,
        );

        // Placed characters and objects live under this root so the
        // compositor and reset logic see one flat list.
        parent.spawn((
            ComposedSceneRoot,
            Transform::from_xyz(0.0, 0.0, ENTITY_DEPTH),
            Visibility::default(),
        ));
    });
}
