//! Integration tests for preference persistence

use std::fs;

use folio::preferences::{PreferenceSet, PreferenceStore, ThemeChoice};
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> PreferenceStore {
    PreferenceStore::at_path(dir.path().join("preferences.json"))
}

#[test]
fn test_partial_write_preserves_other_keys() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    store
        .set(PreferenceSet {
            font_size: Some("large".to_string()),
            ..Default::default()
        })
        .unwrap();
    store
        .set(PreferenceSet {
            density: Some("compact".to_string()),
            ..Default::default()
        })
        .unwrap();

    let record = store.get();
    assert_eq!(record.font_size.as_deref(), Some("large"));
    assert_eq!(record.density.as_deref(), Some("compact"));
    assert!(record.animation.is_none());
}

#[test]
fn test_last_write_wins_per_key() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    store
        .set(PreferenceSet {
            font_size: Some("medium".to_string()),
            ..Default::default()
        })
        .unwrap();
    store
        .set(PreferenceSet {
            font_size: Some("large".to_string()),
            ..Default::default()
        })
        .unwrap();

    assert_eq!(store.get().font_size.as_deref(), Some("large"));
}

#[test]
fn test_stored_record_uses_camel_case_and_omits_unset_keys() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    store
        .set(PreferenceSet {
            font_size: Some("small".to_string()),
            reduce_motion: Some(true),
            theme: Some(ThemeChoice::Dark),
            ..Default::default()
        })
        .unwrap();

    let raw = fs::read_to_string(dir.path().join("preferences.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let object = json.as_object().unwrap();

    assert_eq!(object["fontSize"], "small");
    assert_eq!(object["reduceMotion"], true);
    assert_eq!(object["theme"], "dark");
    assert!(!object.contains_key("density"));
    assert!(!object.contains_key("animation"));
}

#[test]
fn test_corrupt_file_reads_as_empty_and_recovers_on_write() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("preferences.json");
    fs::write(&path, "{not json at all").unwrap();

    let store = PreferenceStore::at_path(path.clone());
    assert!(store.get().is_empty());

    store
        .set(PreferenceSet {
            animation: Some("quick".to_string()),
            ..Default::default()
        })
        .unwrap();

    let record = store.get();
    assert_eq!(record.animation.as_deref(), Some("quick"));
    // The rewritten file is valid JSON again.
    let raw = fs::read_to_string(&path).unwrap();
    assert!(serde_json::from_str::<serde_json::Value>(&raw).is_ok());
}

#[test]
fn test_reset_deletes_the_record() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    store
        .set(PreferenceSet {
            palette: Some("night".to_string()),
            ..Default::default()
        })
        .unwrap();
    assert!(store.path().exists());

    store.reset().unwrap();
    assert!(!store.path().exists());
    assert!(store.get().is_empty());

    // Resetting an already-missing record is fine.
    store.reset().unwrap();
}

#[test]
fn test_missing_parent_directories_are_created() {
    let dir = TempDir::new().unwrap();
    let store = PreferenceStore::at_path(dir.path().join("nested").join("deep").join("prefs.json"));

    store
        .set(PreferenceSet {
            density: Some("spacious".to_string()),
            ..Default::default()
        })
        .unwrap();

    assert_eq!(store.get().density.as_deref(), Some("spacious"));
}
