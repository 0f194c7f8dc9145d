//! Session round trips through theme files and the file-backed store.

use std::fs;

use colormode::{
    ColorModeState, ElementMarker, FileStore, FixedPreference, ModeSourceKind, SystemPreference,
    Theme,
};
use tempfile::TempDir;

const THEME_JSON: &str = r##"{
  "config": { "classPrefix": "app", "storageKey": "app-mode" },
  "colors": {
    "text": "#111",
    "background": "#fafafa",
    "modes": {
      "dark": { "text": "#eee", "background": "#111" }
    }
  }
}"##;

#[test]
fn choice_survives_reload_from_disk() {
    let dir = TempDir::new().unwrap();
    let theme_path = dir.path().join("site.json");
    fs::write(&theme_path, THEME_JSON).unwrap();
    let store_path = dir.path().join("prefs").join("store.json");

    let theme = Theme::from_file(&theme_path).unwrap();
    assert_eq!(theme.name(), Some("site"));

    let light = FixedPreference(SystemPreference::Light);
    let mut state = ColorModeState::initialize(theme.clone(), FileStore::new(&store_path), &light);
    assert_eq!(state.mode(), "default");

    let mut body = ElementMarker::new("html");
    state.set_mode("dark", &mut body).unwrap();
    assert!(body.has_class("app-dark"));
    assert_eq!(body.property("--app-colors-background"), Some("#111"));

    let reloaded = ColorModeState::initialize(theme, FileStore::new(&store_path), &light);
    assert_eq!(reloaded.mode(), "dark");
    assert_eq!(reloaded.source(), ModeSourceKind::Persisted);
    assert_eq!(reloaded.palette().get("text"), Some("#eee"));

    let raw = fs::read_to_string(&store_path).unwrap();
    assert!(raw.contains(r#""app-mode": "dark""#));
}

#[test]
fn corrupt_store_falls_back_to_preference() {
    let dir = TempDir::new().unwrap();
    let store_path = dir.path().join("store.json");
    fs::write(&store_path, "not json").unwrap();

    let theme = Theme::from_json(THEME_JSON).unwrap();
    let state = ColorModeState::initialize(
        theme,
        FileStore::new(&store_path),
        &FixedPreference(SystemPreference::Dark),
    );
    assert_eq!(state.mode(), "dark");
    assert_eq!(state.source(), ModeSourceKind::SystemPreference);
}
