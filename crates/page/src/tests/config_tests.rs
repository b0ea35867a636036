use super::*;

use std::{collections::HashMap, io::Write};

use shared::protocol::ActionSpec;

fn write_settings(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write settings");
    file
}

#[test]
fn missing_keys_fall_back_to_defaults() {
    let file = write_settings("viewport_width = 900\n");
    let settings = read_settings_file(file.path()).expect("settings");

    assert_eq!(settings.viewport_width, 900);
    assert_eq!(settings.initial_width_index, "0");
    assert_eq!(settings.toggle_shortcut, "ctrl+shift+p");
    assert_eq!(settings.deep_link_fragment, "cmd");
    assert!(settings.hide_delay_ms.is_none());
    assert!(settings.commands.is_empty());
}

#[test]
fn command_tables_are_parsed_in_order() {
    let file = write_settings(
        r#"
location = "http://localhost/docs"

[[commands]]
name = "Open Docs"
group = "Navigation"
icon = "menu_book"
action = { navigate = "/docs" }

[[commands]]
id = "go-wide"
name = "Go Wide"
action = { set_width = 1 }
"#,
    );
    let settings = read_settings_file(file.path()).expect("settings");

    assert_eq!(settings.commands.len(), 2);
    assert_eq!(settings.commands[0].name, "Open Docs");
    assert_eq!(
        settings.commands[0].action,
        Some(ActionSpec::Navigate("/docs".into()))
    );
    assert_eq!(settings.commands[1].id.as_deref(), Some("go-wide"));
    assert_eq!(settings.commands[1].action, Some(ActionSpec::SetWidth(1)));
    assert_eq!(
        settings.location_url().expect("url").path(),
        "/docs"
    );
}

#[test]
fn unreadable_file_reports_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.toml");

    let err = load_settings(Some(&path)).expect_err("missing file");
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn malformed_toml_is_an_error() {
    let file = write_settings("viewport_width = \"wide\"\n");
    let err = read_settings_file(file.path()).expect_err("bad type");
    assert!(err.to_string().contains("failed to parse settings file"));
}

#[test]
fn env_overrides_replace_file_values() {
    let vars: HashMap<&str, &str> = [
        ("PALETTE__VIEWPORT_WIDTH", "720"),
        ("PALETTE__INITIAL_WIDTH_INDEX", "2"),
        ("PALETTE__TOGGLE_SHORTCUT", "ctrl+k"),
        ("PALETTE__HIDE_DELAY_MS", "150"),
        ("PALETTE__LOG_FILTER", "palette=debug"),
    ]
    .into_iter()
    .collect();

    let mut settings = Settings::default();
    apply_env_overrides(&mut settings, |key| vars.get(key).map(|v| v.to_string()));

    assert_eq!(settings.viewport_width, 720);
    assert_eq!(settings.initial_width_index, "2");
    assert_eq!(settings.toggle_shortcut, "ctrl+k");
    assert_eq!(settings.hide_delay_ms, Some(150));
    assert_eq!(settings.log_filter, "palette=debug");

    let options = settings.palette_options().expect("options");
    assert_eq!(options.hide_delay, Some(Duration::from_millis(150)));
    assert!(options.toggle.ctrl);
    assert!(!options.toggle.shift);
}

#[test]
fn non_numeric_env_overrides_are_ignored() {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings, |key| match key {
        "PALETTE__VIEWPORT_WIDTH" => Some("wide".into()),
        "PALETTE__HIDE_DELAY_MS" => Some("soon".into()),
        _ => None,
    });

    assert_eq!(settings.viewport_width, 1440);
    assert!(settings.hide_delay_ms.is_none());
}

#[test]
fn invalid_shortcut_and_location_are_rejected() {
    let settings = Settings {
        toggle_shortcut: "ctrl+".into(),
        location: "not a url".into(),
        ..Settings::default()
    };

    assert!(matches!(
        settings.palette_options(),
        Err(PaletteError::InvalidShortcut(_))
    ));
    assert!(matches!(
        settings.location_url(),
        Err(PaletteError::InvalidLocation(_))
    ));
}
