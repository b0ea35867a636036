use std::{fs, path::Path, time::Duration};

use anyhow::Context;
use palette::{KeyCombo, PaletteOptions};
use serde::Deserialize;
use shared::{error::PaletteError, protocol::CommandSpec};
use tracing::warn;
use url::Url;
use width::WidthOptions;

pub const DEFAULT_CONFIG_FILE: &str = "palette.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub viewport_width: u32,
    /// Raw render-time value, parsed like an integer when the page loads.
    pub initial_width_index: String,
    pub location: String,
    pub toggle_shortcut: String,
    pub deep_link_fragment: String,
    pub hide_delay_ms: Option<u64>,
    pub neutral_width_icon: Option<String>,
    pub log_filter: String,
    pub commands: Vec<CommandSpec>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            viewport_width: 1440,
            initial_width_index: "0".into(),
            location: "http://localhost/".into(),
            toggle_shortcut: "ctrl+shift+p".into(),
            deep_link_fragment: "cmd".into(),
            hide_delay_ms: None,
            neutral_width_icon: None,
            log_filter: "info".into(),
            commands: Vec::new(),
        }
    }
}

impl Settings {
    pub fn palette_options(&self) -> Result<PaletteOptions, PaletteError> {
        Ok(PaletteOptions {
            toggle: self.toggle_shortcut.parse::<KeyCombo>()?,
            deep_link_fragment: self.deep_link_fragment.clone(),
            hide_delay: self.hide_delay_ms.map(Duration::from_millis),
        })
    }

    pub fn width_options(&self) -> WidthOptions {
        WidthOptions {
            neutral_icon: self.neutral_width_icon.clone(),
            ..WidthOptions::default()
        }
    }

    pub fn location_url(&self) -> Result<Url, PaletteError> {
        Url::parse(&self.location).map_err(|_| PaletteError::InvalidLocation(self.location.clone()))
    }
}

/// Reads `path`, or `palette.toml` in the working directory when present,
/// then applies `PALETTE__*` environment overrides.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let default_path = Path::new(DEFAULT_CONFIG_FILE);
    let mut settings = match path {
        Some(path) => read_settings_file(path)?,
        None if default_path.exists() => read_settings_file(default_path)?,
        None => Settings::default(),
    };

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

fn read_settings_file(path: &Path) -> anyhow::Result<Settings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
    toml::from_str(&raw)
        .with_context(|| format!("failed to parse settings file '{}'", path.display()))
}

pub fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("PALETTE__VIEWPORT_WIDTH") {
        match v.parse::<u32>() {
            Ok(width) => settings.viewport_width = width,
            Err(_) => warn!(value = %v, "ignoring non-numeric PALETTE__VIEWPORT_WIDTH"),
        }
    }
    if let Some(v) = lookup("PALETTE__INITIAL_WIDTH_INDEX") {
        settings.initial_width_index = v;
    }
    if let Some(v) = lookup("PALETTE__LOCATION") {
        settings.location = v;
    }
    if let Some(v) = lookup("PALETTE__TOGGLE_SHORTCUT") {
        settings.toggle_shortcut = v;
    }
    if let Some(v) = lookup("PALETTE__HIDE_DELAY_MS") {
        match v.parse::<u64>() {
            Ok(ms) => settings.hide_delay_ms = Some(ms),
            Err(_) => warn!(value = %v, "ignoring non-numeric PALETTE__HIDE_DELAY_MS"),
        }
    }
    if let Some(v) = lookup("PALETTE__LOG_FILTER") {
        settings.log_filter = v;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
