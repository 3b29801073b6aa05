use super::*;
use crate::foundation::color::Color;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("store_tests").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn edited() -> PersistedSettings {
    let mut s = PersistedSettings::default();
    s.params.ray_count = 23;
    s.params.ray_color_odd = Color::rgb(1, 2, 3);
    s.params.center_shade_radius = 0.75;
    s.file_name = "burst".to_owned();
    s
}

#[test]
fn empty_store_loads_defaults() {
    let store = MemoryStore::new();
    assert_eq!(load_settings(&store), PersistedSettings::default());
}

#[test]
fn memory_store_round_trip() {
    let mut store = MemoryStore::new();
    save_settings(&mut store, &edited()).unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(load_settings(&store), edited());
}

#[test]
fn corrupt_blob_falls_back_to_defaults() {
    let mut store = MemoryStore::new();
    store.save(SETTINGS_KEY, "{\"rayCount\": \"lots\"").unwrap();
    assert_eq!(load_settings(&store), PersistedSettings::default());
}

#[test]
fn file_store_round_trip_and_overwrite() {
    let dir = scratch_dir("round_trip");
    let mut store = FileStore::new(&dir);
    assert_eq!(store.load(SETTINGS_KEY).unwrap(), None);

    save_settings(&mut store, &PersistedSettings::default()).unwrap();
    save_settings(&mut store, &edited()).unwrap();
    assert!(dir.join("rayburst-settings.json").is_file());
    assert!(!dir.join("rayburst-settings.json.tmp").exists());

    let reopened = FileStore::new(&dir);
    assert_eq!(load_settings(&reopened), edited());
}

#[test]
fn file_store_rejects_path_like_keys() {
    let mut store = FileStore::new(scratch_dir("keys"));
    assert!(store.save("../escape", "x").is_err());
    assert!(store.load("").is_err());
}

#[test]
fn mutable_reference_is_a_store_too() {
    let mut store = MemoryStore::new();
    {
        let mut by_ref = &mut store;
        save_settings(&mut by_ref, &edited()).unwrap();
    }
    assert_eq!(load_settings(&store).params.ray_count, 23);
}
