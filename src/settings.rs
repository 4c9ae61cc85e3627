//! User settings and preferences
//!
//! Persisted separately from the record store as a small JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::store::{Records, Store, read_json, write_json};

/// Terminal cursor blink rate limits (seconds)
pub const BLINK_RATE_MIN: f64 = 0.1;
pub const BLINK_RATE_MAX: f64 = 2.0;
pub const BLINK_RATE_STEP: f64 = 0.1;

/// Visual theme variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeVariant {
    #[default]
    Classic,
    Neon,
    Retro,
    Teenage,
}

impl ThemeVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeVariant::Classic => "classic",
            ThemeVariant::Neon => "neon",
            ThemeVariant::Retro => "retro",
            ThemeVariant::Teenage => "teenage",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "classic" => Some(ThemeVariant::Classic),
            "neon" => Some(ThemeVariant::Neon),
            "retro" => Some(ThemeVariant::Retro),
            "teenage" => Some(ThemeVariant::Teenage),
            _ => None,
        }
    }
}

/// User preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Profile ===
    /// Display name, may be empty
    pub username: String,

    // === Display ===
    /// Terminal cursor blink period in seconds
    pub terminal_blink_rate: f64,
    pub theme_variant: ThemeVariant,

    // === Audio ===
    pub sound_enabled: bool,

    // === Data ===
    /// Save records after every change
    pub auto_save: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            username: String::new(),
            terminal_blink_rate: 0.5,
            theme_variant: ThemeVariant::Classic,
            sound_enabled: true,
            auto_save: true,
        }
    }
}

impl Settings {
    /// Set the blink rate, clamped to the slider range and snapped to its step
    pub fn set_blink_rate(&mut self, seconds: f64) {
        self.terminal_blink_rate = snap_blink_rate(seconds);
    }

    /// Name to show for the player (falls back when no username is set)
    pub fn display_name(&self) -> &str {
        let name = self.username.trim();
        if name.is_empty() { "PLAYER" } else { name }
    }

    /// Load settings, falling back to defaults if the file is missing or bad
    pub fn load(path: &Path) -> Self {
        match read_json::<Settings>(path) {
            Ok(Some(mut settings)) => {
                settings.terminal_blink_rate = snap_blink_rate(settings.terminal_blink_rate);
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring unreadable settings: {e}");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        write_json(path, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}

fn snap_blink_rate(seconds: f64) -> f64 {
    let clamped = crate::clamp_unit(seconds, BLINK_RATE_MIN, BLINK_RATE_MAX);
    // Steps are tenths; divide last so 0.3 stays 0.3
    (clamped / BLINK_RATE_STEP).round() / 10.0
}

/// Export bundle: settings plus every record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataBundle {
    /// Bundle format version
    pub version: u32,
    /// Unix ms
    pub exported_at: u64,
    pub settings: Settings,
    pub records: Records,
}

const BUNDLE_VERSION: u32 = 1;

/// Write settings and all records to a single JSON file
pub fn export_data(settings: &Settings, store: &Store, path: &Path) -> Result<()> {
    let bundle = DataBundle {
        version: BUNDLE_VERSION,
        exported_at: crate::store::unix_millis(),
        settings: settings.clone(),
        records: store.records().clone(),
    };
    write_json(path, &bundle)?;
    log::info!("Exported data to {}", path.display());
    Ok(())
}

/// Read an export bundle back
pub fn import_data(path: &Path) -> Result<DataBundle> {
    let bundle = read_json::<DataBundle>(path)?.ok_or_else(|| {
        crate::AtriumError::io(
            path,
            std::io::Error::new(std::io::ErrorKind::NotFound, "no export bundle"),
        )
    })?;
    if bundle.version != BUNDLE_VERSION {
        log::warn!(
            "Importing bundle version {} (expected {})",
            bundle.version,
            BUNDLE_VERSION
        );
    }
    log::info!("Imported data from {}", path.display());
    Ok(bundle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryCategory;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.terminal_blink_rate, 0.5);
        assert_eq!(settings.theme_variant, ThemeVariant::Classic);
        assert!(settings.sound_enabled);
        assert!(settings.auto_save);
        assert_eq!(settings.display_name(), "PLAYER");
    }

    #[test]
    fn test_blink_rate_clamps_and_snaps() {
        let mut settings = Settings::default();
        settings.set_blink_rate(0.0);
        assert_eq!(settings.terminal_blink_rate, 0.1);
        settings.set_blink_rate(9.0);
        assert_eq!(settings.terminal_blink_rate, 2.0);
        settings.set_blink_rate(0.34);
        assert_eq!(settings.terminal_blink_rate, 0.3);
        settings.set_blink_rate(f64::NAN);
        assert_eq!(settings.terminal_blink_rate, 0.1);
    }

    #[test]
    fn test_theme_parse() {
        assert_eq!(ThemeVariant::parse("NEON"), Some(ThemeVariant::Neon));
        assert_eq!(ThemeVariant::parse("vapor"), None);
        for theme in [
            ThemeVariant::Classic,
            ThemeVariant::Neon,
            ThemeVariant::Retro,
            ThemeVariant::Teenage,
        ] {
            assert_eq!(ThemeVariant::parse(theme.as_str()), Some(theme));
        }
    }

    #[test]
    fn test_load_missing_and_partial() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        assert_eq!(Settings::load(&path), Settings::default());

        std::fs::write(&path, r#"{ "username": "flynn", "theme_variant": "neon" }"#).unwrap();
        let settings = Settings::load(&path);
        assert_eq!(settings.username, "flynn");
        assert_eq!(settings.theme_variant, ThemeVariant::Neon);
        assert!(settings.sound_enabled);

        std::fs::write(&path, "garbage").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut settings = Settings {
            username: "kevin".into(),
            sound_enabled: false,
            ..Default::default()
        };
        settings.set_blink_rate(1.2);
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
    }

    #[test]
    fn test_export_import_bundle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("atrium-export.json");

        let mut store = Store::in_memory();
        store.add_memory("Joshua", "A strange game", MemoryCategory::WarGames).unwrap();
        let settings = Settings {
            theme_variant: ThemeVariant::Retro,
            ..Default::default()
        };

        export_data(&settings, &store, &path).unwrap();
        let bundle = import_data(&path).unwrap();
        assert_eq!(bundle.version, BUNDLE_VERSION);
        assert_eq!(bundle.settings, settings);
        assert_eq!(&bundle.records, store.records());

        assert!(import_data(&dir.path().join("missing.json")).is_err());
    }
}
