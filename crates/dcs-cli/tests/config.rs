//! Settings file loading.

use std::io::Write;

use dcs_chart::ViewMode;
use dcs_cli::config::Settings;
use tempfile::NamedTempFile;

fn settings_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(content.as_bytes()).expect("write settings");
    file
}

#[test]
fn explicit_file_overrides_defaults() {
    let file = settings_file(
        r#"
        [server]
        base_url = "https://pms.example.test/v2/"
        timeout_secs = 5

        [chart]
        history_depth = 20
        default_mode = "history"
        audit_preview = 2

        [search]
        debounce_ms = 150
        "#,
    );

    let settings = Settings::load(Some(file.path())).expect("settings load");
    assert_eq!(settings.server.base_url, "https://pms.example.test/v2/");
    assert_eq!(settings.server.timeout().as_secs(), 5);
    assert_eq!(settings.chart.history_depth, 20);
    assert_eq!(settings.chart.default_mode, ViewMode::History);
    assert_eq!(settings.chart.audit_preview, 2);
    assert_eq!(settings.search.debounce_ms, 150);
    assert_eq!(settings.search.max_delay_ms, 2000);
}

#[test]
fn explicit_invalid_file_is_an_error() {
    let file = settings_file("[chart]\ndefault_mode = \"sideways\"\n");
    let error = Settings::load(Some(file.path())).unwrap_err();
    assert!(format!("{error:#}").contains("invalid settings file"));
}

#[test]
fn explicit_missing_file_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.toml");
    let error = Settings::load(Some(path.as_path())).unwrap_err();
    assert!(format!("{error:#}").contains("failed to read settings file"));
}

#[test]
fn saved_settings_load_back() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("nested").join("config.toml");

    let mut settings = Settings::default();
    settings.chart.default_mode = ViewMode::Planned;
    settings.server.base_url = "http://10.0.0.4:8080".to_string();
    settings.save_to(&path).expect("save settings");

    assert_eq!(Settings::load_from(&path).expect("load settings"), settings);
}
