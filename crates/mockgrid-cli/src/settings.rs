use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::CliError;

/// Settings file picked up from the working directory when `--config` is not given.
pub const DEFAULT_SETTINGS_FILE: &str = "mockgrid.toml";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// How a generated table is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Aligned text grid.
    #[default]
    Table,
    /// JSON array, one row per line.
    Json,
    Csv,
}

/// Optional defaults for the command line, read from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliSettings {
    pub default_format: OutputFormat,
    pub log_level: String,
    pub seed: Option<u64>,
    /// Library files merged over the built-in library before any `--library` flag.
    pub library_paths: Vec<PathBuf>,
}

impl Default for CliSettings {
    fn default() -> Self {
        Self {
            default_format: OutputFormat::Table,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            seed: None,
            library_paths: Vec::new(),
        }
    }
}

/// Load `explicit`, or `mockgrid.toml` when it exists, or the defaults.
///
/// An explicit path must exist.
pub fn load_settings(explicit: Option<&Path>) -> Result<CliSettings, CliError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let fallback = PathBuf::from(DEFAULT_SETTINGS_FILE);
            if !fallback.exists() {
                return Ok(CliSettings::default());
            }
            fallback
        }
    };

    let content = std::fs::read_to_string(&path).map_err(|source| CliError::Read {
        path: path.clone(),
        source,
    })?;
    let mut settings: CliSettings = toml::from_str(&content)
        .map_err(|err| CliError::InvalidConfig(format!("{}: {err}", path.display())))?;

    // library paths are relative to the settings file
    if let Some(base) = path.parent() {
        for library in &mut settings.library_paths {
            if library.is_relative() {
                *library = base.join(&*library);
            }
        }
    }
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_settings() {
        let settings: CliSettings = toml::from_str(
            r#"
default_format = "csv"
seed = 9
library_paths = ["libs/pets.json"]
"#,
        )
        .expect("parse settings");

        assert_eq!(settings.default_format, OutputFormat::Csv);
        assert_eq!(settings.seed, Some(9));
        assert_eq!(settings.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(settings.library_paths, vec![PathBuf::from("libs/pets.json")]);
    }

    #[test]
    fn empty_file_gives_defaults() {
        let settings: CliSettings = toml::from_str("").expect("parse settings");
        assert_eq!(settings, CliSettings::default());
    }
}
