//! Settings for [`PromptingFiller`](crate::form::PromptingFiller).
//!
//! Loaded through confique: compiled defaults, then an optional TOML file,
//! then the environment (highest priority).
//!
//! | Env var | Key |
//! |---------|-----|
//! | `FIELDSCHEMA_MAX_TRIES` | `max_tries` |

use std::path::Path;

use confique::Config;

use crate::error::SchemaError;

#[derive(Config, Debug, Clone, PartialEq)]
pub struct FillerSettings {
    /// Attempts per field before the whole form is abandoned.
    #[config(default = 3, env = "FIELDSCHEMA_MAX_TRIES")]
    pub max_tries: usize,
}

impl FillerSettings {
    /// Defaults overridden by the environment.
    pub fn load() -> Result<Self, SchemaError> {
        Ok(Self::builder().env().load()?)
    }

    /// Defaults, then `path` (if it exists), then the environment.
    pub fn load_with_file(path: &Path) -> Result<Self, SchemaError> {
        Ok(Self::builder().env().file(path).load()?)
    }

    /// A commented TOML template listing every setting and its default.
    pub fn template() -> String {
        confique::toml::template::<Self>(confique::toml::FormatOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_to_three_tries() {
        let settings = FillerSettings::builder().load().unwrap();
        assert_eq!(settings.max_tries, 3);
    }

    #[test]
    fn file_overrides_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("filler.toml");
        fs::write(&path, "max_tries = 5\n").unwrap();
        let settings = FillerSettings::builder().file(&path).load().unwrap();
        assert_eq!(settings.max_tries, 5);
    }

    #[test]
    fn missing_file_is_skipped() {
        let dir = TempDir::new().unwrap();
        let settings = FillerSettings::builder()
            .file(dir.path().join("absent.toml"))
            .load()
            .unwrap();
        assert_eq!(settings.max_tries, 3);
    }

    #[test]
    fn invalid_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("filler.toml");
        fs::write(&path, "max_tries = \"many\"\n").unwrap();
        let err = FillerSettings::builder().file(&path).load().unwrap_err();
        let err = SchemaError::from(err);
        assert!(matches!(err, SchemaError::ConfigError(_)));
        assert!(err.to_string().starts_with("Configuration error"));
    }

    #[test]
    fn load_with_file_reports_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("filler.toml");
        fs::write(&path, "max_tries = -1\n").unwrap();
        let err = FillerSettings::load_with_file(&path).unwrap_err();
        assert!(matches!(err, SchemaError::ConfigError(_)));
    }

    #[test]
    fn template_documents_max_tries() {
        let template = FillerSettings::template();
        assert!(template.contains("max_tries"));
        assert!(template.contains("Attempts per field"));
    }
}
