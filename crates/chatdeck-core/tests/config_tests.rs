use chatdeck_core::config::Settings;
use chatdeck_core::DeckError;
use tempfile::TempDir;

#[test]
fn test_settings_default_values() {
    let settings = Settings::default();

    assert_eq!(settings.responder.kind, "placeholder");
    assert_eq!(settings.responder.delay_ms, 1000);

    assert_eq!(settings.classifier.model_path.to_str(), Some("model/model.json"));

    assert_eq!(settings.canvas.width, 600);
    assert_eq!(settings.canvas.height, 300);
    assert_eq!(settings.canvas.stroke_width, 3);
    assert_eq!(settings.canvas.stroke_color, "#222");
    assert_eq!(settings.canvas.background_color, "#fff");

    assert_eq!(settings.ui.theme, "dark");
    assert!(!settings.ui.dark_mode);
}

#[test]
fn test_settings_save_and_reload_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut settings = Settings::default();
    settings.responder.kind = "echo".into();
    settings.responder.delay_ms = 250;
    settings.canvas.stroke_color = "#123456".into();
    settings.ui.dark_mode = true;
    settings.save_to(&path).unwrap();

    let loaded = Settings::load_from(&path).unwrap();
    assert_eq!(loaded.responder.kind, "echo");
    assert_eq!(loaded.responder.delay_ms, 250);
    assert_eq!(loaded.canvas.stroke_color, "#123456");
    assert!(loaded.ui.dark_mode);
}

#[test]
fn test_partial_file_fills_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[responder]\ndelay_ms = 10\n").unwrap();

    let loaded = Settings::load_from(&path).unwrap();
    assert_eq!(loaded.responder.delay_ms, 10);
    assert_eq!(loaded.responder.kind, "placeholder");
    assert_eq!(loaded.canvas.width, 600);
}

#[test]
fn test_bad_file_is_config_error_but_load_or_default_recovers() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "responder = 5").unwrap();

    assert!(matches!(Settings::load_from(&path), Err(DeckError::Config(_))));
    let fallback = Settings::load_or_default(&path);
    assert_eq!(fallback.responder.kind, "placeholder");
}

#[test]
fn test_missing_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let settings = Settings::load_or_default(&dir.path().join("absent.toml"));
    assert_eq!(settings.canvas.stroke_width, 3);
}

#[test]
fn test_canvas_settings_build() {
    let mut settings = Settings::default();
    let canvas = settings.canvas.build().unwrap();
    assert_eq!((canvas.width(), canvas.height()), (600, 300));

    settings.canvas.stroke_color = "blue".into();
    assert!(matches!(settings.canvas.build(), Err(DeckError::InvalidColor(_))));
}
