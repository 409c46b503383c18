//! File-level tests for envgen-config.

use envgen_config::{ConfigError, EditorConfig, Snapshot, find_snapshot_in, list_snapshots_in};
use envgen_core::{LaneField, LaneNumber, ParamKey, ParamState, add_lane};
use tempfile::TempDir;

#[test]
fn missing_settings_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let config = EditorConfig::load_or_default(dir.path().join("editor.toml")).unwrap();
    assert_eq!(config, EditorConfig::default());
}

#[test]
fn load_missing_file_is_read_error() {
    let dir = TempDir::new().unwrap();
    let err = EditorConfig::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFile { .. }));
}

#[test]
fn settings_save_creates_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("envgen").join("editor.toml");

    let mut config = EditorConfig::default();
    config.view.precision = 4;
    config.log_filter = Some("warn".to_string());
    config.save(&path).unwrap();

    let loaded = EditorConfig::load_or_default(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn invalid_settings_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("editor.toml");
    std::fs::write(&path, "[lanes]\ncolours = [\"#zzzzzz\"]\n").unwrap();
    assert!(matches!(
        EditorConfig::load(&path),
        Err(ConfigError::InvalidSetting { .. })
    ));
}

#[test]
fn snapshot_file_round_trip() {
    let dir = TempDir::new().unwrap();

    let mut state = ParamState::with_defaults();
    add_lane(&mut state);
    let attack = ParamKey::lane(LaneNumber::new(2).unwrap(), LaneField::Attack);
    state.set(attack, 0.3);

    let path = dir.path().join("snapshots").join("two-lanes.json");
    Snapshot::from_state(&state).save(&path).unwrap();

    let found = find_snapshot_in("two-lanes", &dir.path().join("snapshots")).unwrap();
    let (loaded, dropped) = Snapshot::load(found).unwrap().to_state();
    assert_eq!(dropped, 0);
    assert_eq!(loaded, state);
    assert_eq!(
        list_snapshots_in(&dir.path().join("snapshots")),
        vec!["two-lanes"]
    );
}

#[test]
fn corrupt_snapshot_is_json_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, "{not json").unwrap();
    assert!(matches!(Snapshot::load(&path), Err(ConfigError::Json(_))));
}

#[test]
fn named_snapshot_is_found_and_loaded() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("wide.json"),
        r#"{"numLanes": 1.0, "lane9_attack": 0.5}"#,
    )
    .unwrap();

    let (path, snapshot) = Snapshot::find_in("wide", dir.path()).unwrap();
    assert_eq!(path, dir.path().join("wide.json"));
    assert_eq!(snapshot.unknown_ids().collect::<Vec<_>>(), vec!["lane9_attack"]);
}

#[test]
fn missing_named_snapshot_is_not_found() {
    let dir = TempDir::new().unwrap();
    let err = Snapshot::find_in("narrow", dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::SnapshotNotFound(ref name) if name == "narrow"));
}
