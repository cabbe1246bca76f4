//! Data layer — populates the static registries at startup.
//!
//! Runs in OnEnter(AppState::Loading), fills the background, palette-art
//! and question registries from the hard-coded design data below, captures
//! the reference date, then transitions the app into AppState::Running.
//!
//! No other domain seeds these resources. All domain plugins can safely
//! read them once AppState has advanced past Loading.

use bevy::prelude::*;
use chrono::Local;
use image::{Rgba, RgbaImage};
use std::collections::HashMap;
use std::path::Path;

use crate::shared::*;

/// One background the wizard strip can show.
#[derive(Debug, Clone)]
pub struct BackgroundDef {
    pub name: &'static str,
    pub color: Color,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct BackgroundRegistry {
    pub backgrounds: Vec<BackgroundDef>,
}

/// On-screen look of a placeable palette entity.
#[derive(Debug, Clone)]
pub struct EntityArtDef {
    pub color: Color,
    /// World-unit footprint, also the drag/hit extent.
    pub size: Vec2,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct EntityArtRegistry {
    pub defs: HashMap<EntityKind, EntityArtDef>,
}

impl EntityArtRegistry {
    pub fn get(&self, kind: EntityKind) -> &EntityArtDef {
        &self.defs[&kind]
    }
}

/// Raster art used by the CPU compositor when a draft is saved.
/// Decoded from `assets/art/` when present, flat tiles otherwise, so the
/// save path works without any asset files on disk.
#[derive(Resource, Default)]
pub struct ComposeArtRegistry {
    pub backgrounds: Vec<RgbaImage>,
    pub entities: HashMap<EntityKind, RgbaImage>,
}

/// The three prompts of the wizard flow plus the completion label.
#[derive(Resource, Debug, Clone)]
pub struct QuestionSet {
    pub prompts: [&'static str; 3],
    pub saved_label: &'static str,
}

impl Default for QuestionSet {
    fn default() -> Self {
        Self {
            prompts: ["Where were you?", "Who was there?", "Any objects?"],
            saved_label: "Event Saved",
        }
    }
}

impl QuestionSet {
    pub fn label_for(&self, stage: DraftStage) -> &'static str {
        match stage {
            DraftStage::ChooseBackground => self.prompts[0],
            DraftStage::PlaceCharacters => self.prompts[1],
            DraftStage::PlaceObjects => self.prompts[2],
            DraftStage::Saved => self.saved_label,
        }
    }
}

pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BackgroundRegistry>()
            .init_resource::<EntityArtRegistry>()
            .init_resource::<ComposeArtRegistry>()
            .init_resource::<QuestionSet>()
            .add_systems(OnEnter(AppState::Loading), load_all_data);
    }
}

/// Single system that populates every registry and then transitions the
/// app to Running.
fn load_all_data(
    mut commands: Commands,
    mut backgrounds: ResMut<BackgroundRegistry>,
    mut entity_art: ResMut<EntityArtRegistry>,
    mut compose_art: ResMut<ComposeArtRegistry>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    info!("DataPlugin: populating registries…");

    populate_backgrounds(&mut backgrounds);
    info!("  Backgrounds loaded: {}", backgrounds.backgrounds.len());

    populate_entity_art(&mut entity_art);
    info!("  Palette entities loaded: {}", entity_art.defs.len());

    build_compose_art(&backgrounds, &entity_art, &mut compose_art);
    info!(
        "  Compositor art ready: {} backgrounds, {} entities",
        compose_art.backgrounds.len(),
        compose_art.entities.len()
    );

    let today = Local::now().date_naive();
    info!("  Reference date: {}", today);
    commands.insert_resource(TodayDate(today));

    next_state.set(AppState::Running);
}

fn populate_backgrounds(registry: &mut BackgroundRegistry) {
    registry.backgrounds = vec![
        BackgroundDef {
            name: "park",
            color: Color::srgb(0.45, 0.72, 0.38),
        },
        BackgroundDef {
            name: "beach",
            color: Color::srgb(0.93, 0.85, 0.56),
        },
        BackgroundDef {
            name: "living_room",
            color: Color::srgb(0.71, 0.56, 0.42),
        },
        BackgroundDef {
            name: "garden",
            color: Color::srgb(0.52, 0.66, 0.31),
        },
        BackgroundDef {
            name: "street",
            color: Color::srgb(0.58, 0.58, 0.62),
        },
        BackgroundDef {
            name: "playground",
            color: Color::srgb(0.83, 0.63, 0.34),
        },
    ];
    debug_assert_eq!(registry.backgrounds.len(), BACKGROUND_COUNT);
}

fn populate_entity_art(registry: &mut EntityArtRegistry) {
    let character_size = Vec2::new(0.9, 1.6);
    let baby_size = Vec2::new(0.7, 1.0);
    let object_size = Vec2::new(0.8, 0.8);

    let characters: [(CharacterKind, Color); 8] = [
        (CharacterKind::AdultMale, Color::srgb(0.25, 0.41, 0.71)),
        (CharacterKind::AdultFemale, Color::srgb(0.76, 0.33, 0.51)),
        (CharacterKind::OlderMale, Color::srgb(0.48, 0.48, 0.55)),
        (CharacterKind::OlderFemale, Color::srgb(0.67, 0.55, 0.70)),
        (CharacterKind::TeenMale, Color::srgb(0.30, 0.62, 0.60)),
        (CharacterKind::TeenFemale, Color::srgb(0.88, 0.55, 0.30)),
        (CharacterKind::BabyMale, Color::srgb(0.56, 0.76, 0.89)),
        (CharacterKind::BabyFemale, Color::srgb(0.95, 0.73, 0.79)),
    ];
    for (kind, color) in characters {
        let size = match kind {
            CharacterKind::BabyMale | CharacterKind::BabyFemale => baby_size,
            _ => character_size,
        };
        registry
            .defs
            .insert(EntityKind::Character(kind), EntityArtDef { color, size });
    }

    let objects: [(ObjectKind, Color); 5] = [
        (ObjectKind::Balloons, Color::srgb(0.89, 0.26, 0.31)),
        (ObjectKind::Cake, Color::srgb(0.93, 0.80, 0.69)),
        (ObjectKind::Football, Color::srgb(0.55, 0.35, 0.20)),
        (ObjectKind::TennisBall, Color::srgb(0.80, 0.92, 0.31)),
        (ObjectKind::Mail, Color::srgb(0.91, 0.91, 0.86)),
    ];
    for (kind, color) in objects {
        registry.defs.insert(
            EntityKind::Object(kind),
            EntityArtDef {
                color,
                size: object_size,
            },
        );
    }
}

/// Pixels per world unit when compositing the 1024×768 capture.
pub const COMPOSE_SCALE: f32 = 100.0;

fn build_compose_art(
    backgrounds: &BackgroundRegistry,
    entity_art: &EntityArtRegistry,
    compose_art: &mut ComposeArtRegistry,
) {
    compose_art.backgrounds = backgrounds
        .backgrounds
        .iter()
        .map(|def| {
            decode_art_file(&format!("assets/art/bg_{}.png", def.name))
                .unwrap_or_else(|| flat_tile(CAPTURE_WIDTH, CAPTURE_HEIGHT, def.color))
        })
        .collect();

    compose_art.entities = entity_art
        .defs
        .iter()
        .map(|(&kind, def)| {
            let image = decode_art_file(&format!("assets/art/{}.png", kind.selector()))
                .unwrap_or_else(|| {
                    flat_tile(
                        (def.size.x * COMPOSE_SCALE) as u32,
                        (def.size.y * COMPOSE_SCALE) as u32,
                        def.color,
                    )
                });
            (kind, image)
        })
        .collect();
}

fn decode_art_file(path: &str) -> Option<RgbaImage> {
    if !Path::new(path).exists() {
        return None;
    }
    match image::open(path) {
        Ok(decoded) => Some(decoded.to_rgba8()),
        Err(err) => {
            warn!("Could not decode {}: {} — using flat tile", path, err);
            None
        }
    }
}

fn flat_tile(width: u32, height: u32, color: Color) -> RgbaImage {
    let srgba = color.to_srgba();
    let pixel = Rgba([
        (srgba.red * 255.0) as u8,
        (srgba.green * 255.0) as u8,
        (srgba.blue * 255.0) as u8,
        255,
    ]);
    RgbaImage::from_pixel(width.max(1), height.max(1), pixel)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_art() {
        let mut registry = EntityArtRegistry::default();
        populate_entity_art(&mut registry);
        for kind in CharacterKind::ALL {
            assert!(registry.defs.contains_key(&EntityKind::Character(kind)));
        }
        for kind in ObjectKind::ALL {
            assert!(registry.defs.contains_key(&EntityKind::Object(kind)));
        }
    }

    #[test]
    fn test_background_count_is_fixed() {
        let mut registry = BackgroundRegistry::default();
        populate_backgrounds(&mut registry);
        assert_eq!(registry.backgrounds.len(), BACKGROUND_COUNT);
    }

    #[test]
    fn test_compose_art_falls_back_to_flat_tiles() {
        let mut backgrounds = BackgroundRegistry::default();
        let mut entity_art = EntityArtRegistry::default();
        let mut compose_art = ComposeArtRegistry::default();
        populate_backgrounds(&mut backgrounds);
        populate_entity_art(&mut entity_art);
        build_compose_art(&backgrounds, &entity_art, &mut compose_art);

        assert_eq!(compose_art.backgrounds.len(), BACKGROUND_COUNT);
        for bg in &compose_art.backgrounds {
            assert_eq!(bg.dimensions(), (CAPTURE_WIDTH, CAPTURE_HEIGHT));
        }
        assert_eq!(compose_art.entities.len(), 13);
    }

    #[test]
    fn test_question_labels_follow_stages() {
        let questions = QuestionSet::default();
        assert_eq!(
            questions.label_for(DraftStage::ChooseBackground),
            "Where were you?"
        );
        assert_eq!(
            questions.label_for(DraftStage::PlaceCharacters),
            "Who was there?"
        );
        assert_eq!(questions.label_for(DraftStage::PlaceObjects), "Any objects?");
        assert_eq!(questions.label_for(DraftStage::Saved), "Event Saved");
    }
}
