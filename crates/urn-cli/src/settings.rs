//! Per-run settings loaded from a TOML file.
//!
//! ```toml
//! [patch]
//! worldspace = "Tamriel"
//! output_name = "UniqueRegionNamesPatcher.esp"
//! clip_to_bounds = true
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const DEFAULT_WORLDSPACE: &str = "Tamriel";
pub const DEFAULT_OUTPUT_NAME: &str = "UniqueRegionNamesPatcher.esp";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings file {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid settings: {message}")]
    Invalid { message: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default)]
    pub patch: PatchSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PatchSettings {
    /// Form key or editor id of the worldspace to patch.
    pub worldspace: String,
    /// Name recorded in the written patch.
    pub output_name: String,
    /// Ignore region areas outside the worldspace's declared bounds.
    pub clip_to_bounds: bool,
}

impl Default for PatchSettings {
    fn default() -> Self {
        Self {
            worldspace: DEFAULT_WORLDSPACE.to_string(),
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
            clip_to_bounds: true,
        }
    }
}

impl Settings {
    /// Load settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::parse(&text).map_err(|source| SettingsError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.patch.worldspace.trim().is_empty() {
            return Err(SettingsError::Invalid {
                message: "patch.worldspace must not be empty".to_string(),
            });
        }
        if self.patch.output_name.trim().is_empty() {
            return Err(SettingsError::Invalid {
                message: "patch.output_name must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let settings = Settings::parse("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.patch.worldspace, "Tamriel");
        assert!(settings.patch.clip_to_bounds);
    }

    #[test]
    fn partial_table_keeps_other_defaults() {
        let settings = Settings::parse("[patch]\nworldspace = \"03CE0F:Dragonborn.esm\"\n").unwrap();
        assert_eq!(settings.patch.worldspace, "03CE0F:Dragonborn.esm");
        assert_eq!(settings.patch.output_name, DEFAULT_OUTPUT_NAME);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Settings::parse("[patch]\nworldspce = \"Tamriel\"\n").is_err());
    }

    #[test]
    fn blank_worldspace_is_invalid() {
        let settings = Settings::parse("[patch]\nworldspace = \" \"\n").unwrap();
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::Invalid { .. })
        ));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("settings.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }
}
