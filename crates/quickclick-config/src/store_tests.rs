use super::*;
use crate::settings::Language;
use tempfile::TempDir;

#[test]
fn test_memory_store_empty_returns_defaults() {
    let store = MemoryStore::new();
    let settings = store.get(&Settings::default()).unwrap();
    assert_eq!(settings, Settings::default());
}

#[test]
fn test_memory_store_overlays_items() {
    let mut store = MemoryStore::new();
    store
        .set(&SettingsPatch {
            include_attrs: Some(true),
            ..Default::default()
        })
        .unwrap();

    let settings = store.get(&Settings::default()).unwrap();
    assert!(settings.include_attrs);
    assert_eq!(settings.open_key, "-");
    assert_eq!(store.items().len(), 1);
}

#[test]
fn test_stored_space_key_reads_back_normalized() {
    let mut store = MemoryStore::new();
    store
        .set(&SettingsPatch {
            open_key: Some(" ".to_string()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(store.items()["openKey"], " ");
    assert_eq!(store.get(&Settings::default()).unwrap().open_key, "Space");
}

#[test]
fn test_memory_store_custom_defaults() {
    let store = MemoryStore::new();
    let defaults = Settings {
        auto_open: false,
        ..Default::default()
    };
    assert!(!store.get(&defaults).unwrap().auto_open);
}

#[test]
fn test_reset_writes_every_key() {
    let mut store = MemoryStore::new();
    store
        .set(&SettingsPatch {
            language: Some(Language::En),
            ..Default::default()
        })
        .unwrap();
    store.reset(&Settings::default()).unwrap();

    assert_eq!(store.items().len(), 4);
    assert_eq!(store.get(&Settings::default()).unwrap().language, Language::Es);
}

#[test]
fn test_file_store_missing_file() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path().join("settings.json"));
    assert_eq!(store.get(&Settings::default()).unwrap(), Settings::default());
}

#[test]
fn test_file_store_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("settings.json");
    let mut store = JsonFileStore::new(&path);

    store
        .set(&SettingsPatch {
            open_key: Some("Space".to_string()),
            ..Default::default()
        })
        .unwrap();
    store
        .set(&SettingsPatch {
            auto_open: Some(false),
            ..Default::default()
        })
        .unwrap();

    let reopened = JsonFileStore::new(&path);
    let settings = reopened.get(&Settings::default()).unwrap();
    assert_eq!(settings.open_key, "Space");
    assert!(!settings.auto_open);
}

#[test]
fn test_file_store_keeps_unknown_keys() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{"theme":"dark"}"#).unwrap();

    let mut store = JsonFileStore::new(&path);
    store
        .set(&SettingsPatch {
            include_attrs: Some(true),
            ..Default::default()
        })
        .unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("theme"));
    assert!(store.get(&Settings::default()).unwrap().include_attrs);
}

#[test]
fn test_file_store_rejects_non_object() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "[1, 2]").unwrap();

    let store = JsonFileStore::new(&path);
    assert!(matches!(
        store.get(&Settings::default()),
        Err(ConfigError::InvalidFormat(_))
    ));
}

#[test]
fn test_file_store_bad_value() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{"autoOpen":"yes"}"#).unwrap();

    let store = JsonFileStore::new(&path);
    assert!(matches!(
        store.get(&Settings::default()),
        Err(ConfigError::InvalidValue { .. })
    ));
}
