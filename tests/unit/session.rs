use super::*;
use crate::foundation::color::Color;
use crate::store::MemoryStore;

fn open_small() -> EditorSession<MemoryStore> {
    EditorSession::open(MemoryStore::new(), SurfaceSize::new(64, 48)).unwrap()
}

#[test]
fn open_renders_once_and_does_not_save() {
    let s = open_small();
    assert_eq!(
        s.stats(),
        SessionStats {
            preview_renders: 1,
            production_renders: 0,
            saves: 0,
        }
    );
    assert_eq!(s.settings(), &PersistedSettings::default());
    assert_eq!(s.viewport(), SurfaceSize::new(64, 48));
}

#[test]
fn open_rejects_an_empty_viewport() {
    assert!(EditorSession::open(MemoryStore::new(), SurfaceSize::new(0, 0)).is_err());
}

#[test]
fn each_edit_renders_and_saves_exactly_once() {
    let mut s = open_small();
    s.edit(Field::RayCount, "4").unwrap();
    s.edit(Field::RayColorOdd, "#ff0000").unwrap();
    s.edit(Field::FileName, "poster").unwrap();

    let st = s.stats();
    assert_eq!(st.preview_renders, 4);
    assert_eq!(st.saves, 3);
    assert_eq!(s.params().ray_count, 4);
    assert_eq!(s.params().ray_color_odd, Color::rgb(255, 0, 0));
    assert_eq!(s.settings().file_name, "poster");
}

#[test]
fn rejected_edit_changes_nothing() {
    let mut s = open_small();
    assert!(s.edit(Field::RayCount, "zero").is_err());
    assert_eq!(s.stats().preview_renders, 1);
    assert_eq!(s.stats().saves, 0);
    assert!(s.store().is_empty());
    assert_eq!(s.settings(), &PersistedSettings::default());
}

#[test]
fn preview_reflects_the_latest_edit() {
    let mut s = open_small();
    s.edit(Field::RayCount, "1").unwrap();
    s.edit(Field::RayColorOdd, "#00ff00").unwrap();
    let f = s.preview_frame();
    assert_eq!((f.width, f.height), (64, 48));
    assert_eq!(f.pixel(0, 0), Some([0, 255, 0, 255]));
}

#[test]
fn resize_renders_once_at_the_new_size() {
    let mut s = open_small();
    s.resize_viewport(SurfaceSize::new(80, 20)).unwrap();
    assert_eq!(s.stats().preview_renders, 2);
    assert_eq!(s.stats().saves, 0);
    let f = s.preview_frame();
    assert_eq!((f.width, f.height), (80, 20));
    assert!(s.resize_viewport(SurfaceSize::new(0, 20)).is_err());
}

#[test]
fn export_uses_export_size_and_file_name() {
    let mut s = open_small();
    s.edit(Field::ImageWidth, "40").unwrap();
    s.edit(Field::ImageHeight, "30").unwrap();
    s.edit(Field::FileName, "burst").unwrap();

    let out = s.export().unwrap();
    assert_eq!(out.file_name, "burst.png");
    assert_eq!((out.width, out.height), (40, 30));
    assert_eq!(s.stats().production_renders, 1);

    let img = image::load_from_memory(&out.png).unwrap();
    assert_eq!((img.width(), img.height()), (40, 30));

    // Export does not touch the preview.
    assert_eq!(s.preview_frame().width, 64);
}

#[test]
fn settings_survive_a_new_session_over_the_same_store() {
    let mut s = open_small();
    s.edit(Field::RayCount, "7").unwrap();
    s.edit(Field::CenterColor, "#123456").unwrap();
    let store = s.into_store();

    let s = EditorSession::open(store, SurfaceSize::new(32, 32)).unwrap();
    assert_eq!(s.params().ray_count, 7);
    assert_eq!(s.params().center_color, Color::rgb(0x12, 0x34, 0x56));
}

#[test]
fn escaping_file_name_is_rejected_and_export_stays_in_dir() {
    let mut s = open_small();
    assert!(s.edit(Field::FileName, "../escaped").is_err());
    assert_eq!(s.settings().file_name, "rayburst");

    s.edit(Field::ImageWidth, "8").unwrap();
    s.edit(Field::ImageHeight, "8").unwrap();
    let dir = std::path::PathBuf::from("target")
        .join("session_unit")
        .join("inner");
    let _ = std::fs::remove_dir_all(&dir);
    let path = s.export().unwrap().write_to_dir(&dir).unwrap();
    let canonical_dir = dir.canonicalize().unwrap();
    assert_eq!(path.canonicalize().unwrap().parent(), Some(canonical_dir.as_path()));
}

#[test]
fn stored_escaping_file_name_fails_export() {
    let mut store = MemoryStore::new();
    let mut settings = PersistedSettings::default();
    settings.file_name = "../outside".to_owned();
    store
        .save(crate::settings::SETTINGS_KEY, &settings.to_json().unwrap())
        .unwrap();

    let mut s = EditorSession::open(store, SurfaceSize::new(8, 8)).unwrap();
    assert!(s.export().is_err());
    assert_eq!(s.stats().production_renders, 0);
}

#[test]
fn failed_export_resize_keeps_the_production_surface() {
    use crate::render::DrawContext as _;

    let mut s = open_small();
    s.edit(Field::ImageWidth, "40").unwrap();
    s.edit(Field::ImageHeight, "30").unwrap();
    s.export().unwrap();

    s.edit(Field::ImageWidth, "70000").unwrap();
    assert!(s.export().is_err());
    let kept = s.production.as_ref().map(|p| p.size());
    assert_eq!(kept, Some(SurfaceSize::new(40, 30)));
    assert_eq!(s.stats().production_renders, 1);
}
