//! Image store — persistence for finished compositions.
//!
//! Naming convention: `<root>/ddMMyy_<slot>.png`, slot ∈ 1..=6, plus a
//! JSON sidecar with record metadata. A later save for the same name
//! overwrites the same file, so at most one record exists per
//! (date, slot) pair. Day lookups scan the directory for file names
//! containing the `ddMMyy` key and parse the slot from the suffix after
//! the last underscore, skipping anything that does not parse.

use bevy::prelude::*;
use image::{ImageFormat, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::shared::*;

pub struct StorePlugin;

impl Plugin for StorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EventImageStore>();
    }
}

/// Where saved event images live. Tests point this at a temp directory.
#[derive(Resource, Debug, Clone)]
pub struct EventImageStore {
    pub root: PathBuf,
}

impl Default for EventImageStore {
    fn default() -> Self {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            root: exe_dir.join("diary"),
        }
    }
}

impl EventImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, name: &SaveName) -> PathBuf {
        self.root.join(name.file_name())
    }

    fn ensure_root(&self) -> Result<(), String> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)
                .map_err(|e| format!("Could not create {}: {}", self.root.display(), e))?;
        }
        Ok(())
    }

    /// Writes a composition under its save name, replacing any previous
    /// image with the same name. Write goes to a temp file first, then a
    /// rename, so readers never observe a half-written PNG.
    pub fn write_image(&self, name: &SaveName, image: &RgbaImage) -> Result<PathBuf, String> {
        self.ensure_root()?;

        let path = self.path_for(name);
        let tmp_path = path.with_extension("png.tmp");
        image
            .save_with_format(&tmp_path, ImageFormat::Png)
            .map_err(|e| format!("Encode failed for {}: {}", tmp_path.display(), e))?;
        fs::rename(&tmp_path, &path).map_err(|e| format!("Rename failed: {}", e))?;

        let meta = RecordMeta {
            date_key: name.date_key.clone(),
            slot: name.slot,
            saved_at: current_timestamp(),
        };
        let meta_json = serde_json::to_string_pretty(&meta)
            .map_err(|e| format!("Metadata serialization failed: {}", e))?;
        let meta_path = path.with_extension("json");
        fs::write(&meta_path, meta_json)
            .map_err(|e| format!("Write failed for {}: {}", meta_path.display(), e))?;

        Ok(path)
    }

    /// All records saved for a `ddMMyy` day key, ordered by slot.
    pub fn scan_day(&self, date_key: &str) -> Vec<SavedEventRecord> {
        let Ok(entries) = fs::read_dir(&self.root) else {
            return Vec::new();
        };

        let mut records: Vec<SavedEventRecord> = entries
            .flatten()
            .filter_map(|entry| record_from_path(&entry.path(), date_key))
            .collect();
        records.sort_by_key(|r| r.slot);
        records
    }

    pub fn load_image(&self, path: &Path) -> Result<RgbaImage, String> {
        let decoded = image::open(path)
            .map_err(|e| format!("Could not load {}: {}", path.display(), e))?;
        Ok(decoded.to_rgba8())
    }
}

/// Parses `<anything>ddMMyy<anything>_<slot>.png` into a record. Returns
/// None for names that don't match the day key or don't carry a slot.
fn record_from_path(path: &Path, date_key: &str) -> Option<SavedEventRecord> {
    if path.extension().and_then(|e| e.to_str()) != Some("png") {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    if !stem.contains(date_key) {
        return None;
    }
    let slot: u8 = stem.rsplit('_').next()?.parse().ok()?;
    if !(1..=EVENT_SLOTS).contains(&slot) {
        return None;
    }
    Some(SavedEventRecord {
        date_key: date_key.to_string(),
        slot,
        path: path.to_path_buf(),
    })
}

fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn test_store() -> (tempfile::TempDir, EventImageStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = EventImageStore::new(dir.path());
        (dir, store)
    }

    fn tile(color: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(4, 4, Rgba(color))
    }

    #[test]
    fn test_write_then_scan_round_trip() {
        let (_dir, store) = test_store();
        let name = SaveName {
            date_key: "251224".into(),
            slot: 3,
        };
        let path = store.write_image(&name, &tile([255, 0, 0, 255])).unwrap();
        assert!(path.ends_with("251224_3.png"));

        let records = store.scan_day("251224");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].slot, 3);
        assert_eq!(records[0].path, path);

        // Other days see nothing.
        assert!(store.scan_day("260124").is_empty());
    }

    #[test]
    fn test_same_name_overwrites() {
        let (_dir, store) = test_store();
        let name = SaveName {
            date_key: "251224".into(),
            slot: 1,
        };
        store.write_image(&name, &tile([255, 0, 0, 255])).unwrap();
        let path = store.write_image(&name, &tile([0, 255, 0, 255])).unwrap();

        let records = store.scan_day("251224");
        assert_eq!(records.len(), 1, "second save must not duplicate");

        let loaded = store.load_image(&path).unwrap();
        assert_eq!(loaded.get_pixel(0, 0), &Rgba([0, 255, 0, 255]));
    }

    #[test]
    fn test_scan_orders_by_slot_and_skips_junk() {
        let (_dir, store) = test_store();
        for slot in [5, 2, 4] {
            let name = SaveName {
                date_key: "010125".into(),
                slot,
            };
            store.write_image(&name, &tile([9, 9, 9, 255])).unwrap();
        }
        // Files that match the key but carry no parsable slot are skipped.
        fs::write(store.root.join("010125_x.png"), b"junk").unwrap();
        fs::write(store.root.join("010125_9.png"), b"junk").unwrap();
        fs::write(store.root.join("notes.txt"), b"junk").unwrap();

        let slots: Vec<u8> = store.scan_day("010125").iter().map(|r| r.slot).collect();
        assert_eq!(slots, vec![2, 4, 5]);
    }

    #[test]
    fn test_scan_missing_directory_is_empty() {
        let store = EventImageStore::new("/nonexistent/daybook-test");
        assert!(store.scan_day("251224").is_empty());
    }

    #[test]
    fn test_sidecar_metadata_written() {
        let (_dir, store) = test_store();
        let name = SaveName {
            date_key: "140225".into(),
            slot: 6,
        };
        store.write_image(&name, &tile([1, 2, 3, 255])).unwrap();
        let meta_json = fs::read_to_string(store.root.join("140225_6.json")).unwrap();
        let meta: RecordMeta = serde_json::from_str(&meta_json).unwrap();
        assert_eq!(meta.date_key, "140225");
        assert_eq!(meta.slot, 6);
    }
}
