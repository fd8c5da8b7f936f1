//! User settings.
//!
//! Stored as TOML under the platform config directory. Missing fields take
//! their defaults, so an empty or partial file is valid.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};

/// Settings of the `keystone` binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Simulation database; the platform data directory when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<PathBuf>,

    /// Output format used when `--format` is not given.
    #[serde(default)]
    pub default_format: OutputFormat,

    /// Colored terminal output.
    #[serde(default = "default_use_colors")]
    pub use_colors: bool,

    /// Batches larger than this are recomputed in parallel.
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

fn default_use_colors() -> bool {
    true
}

fn default_parallel_threshold() -> usize {
    64
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_path: None,
            default_format: OutputFormat::default(),
            use_colors: default_use_colors(),
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

/// A settings key addressable from `keystone config`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsKey {
    /// Simulation database path
    StoragePath,
    /// Default output format
    DefaultFormat,
    /// Whether to use colors
    UseColors,
    /// Parallel recompute threshold
    ParallelThreshold,
}

impl SettingsKey {
    /// Every key, in display order.
    pub const ALL: [SettingsKey; 4] = [
        SettingsKey::StoragePath,
        SettingsKey::DefaultFormat,
        SettingsKey::UseColors,
        SettingsKey::ParallelThreshold,
    ];

    /// Parses a key name or its short alias.
    pub fn parse(s: &str) -> CliResult<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "storage_path" | "storage" => Ok(Self::StoragePath),
            "default_format" | "format" => Ok(Self::DefaultFormat),
            "use_colors" | "colors" => Ok(Self::UseColors),
            "parallel_threshold" | "threshold" => Ok(Self::ParallelThreshold),
            _ => Err(CliError::UnknownKey(s.to_string())),
        }
    }

    /// Canonical key name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StoragePath => "storage_path",
            Self::DefaultFormat => "default_format",
            Self::UseColors => "use_colors",
            Self::ParallelThreshold => "parallel_threshold",
        }
    }

    /// One-line description.
    pub fn description(self) -> &'static str {
        match self {
            Self::StoragePath => "Simulation database file",
            Self::DefaultFormat => "Default output format (table, json, csv, minimal)",
            Self::UseColors => "Enable colored output (true, false)",
            Self::ParallelThreshold => "Batch size above which recompute runs in parallel",
        }
    }
}

impl fmt::Display for SettingsKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    /// Loads settings, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> CliResult<Self> {
        if path.exists() {
            Ok(Self::from_file(path)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Writes settings to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> CliResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| CliError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Current value of a key, rendered for display.
    pub fn get(&self, key: SettingsKey) -> String {
        match key {
            SettingsKey::StoragePath => self
                .storage_path
                .as_ref()
                .map_or_else(|| "(default)".to_string(), |p| p.display().to_string()),
            SettingsKey::DefaultFormat => format_name(self.default_format).to_string(),
            SettingsKey::UseColors => self.use_colors.to_string(),
            SettingsKey::ParallelThreshold => self.parallel_threshold.to_string(),
        }
    }

    /// Sets a key from its string form, validating the value.
    pub fn set(&mut self, key: SettingsKey, value: &str) -> CliResult<()> {
        let invalid = |hint| CliError::InvalidValue {
            key: key.as_str(),
            value: value.to_string(),
            hint,
        };

        match key {
            SettingsKey::StoragePath => {
                if value.trim().is_empty() {
                    return Err(invalid("Use a file path."));
                }
                self.storage_path = Some(PathBuf::from(value));
            }
            SettingsKey::DefaultFormat => {
                self.default_format = match value.to_lowercase().as_str() {
                    "table" => OutputFormat::Table,
                    "json" => OutputFormat::Json,
                    "csv" => OutputFormat::Csv,
                    "minimal" => OutputFormat::Minimal,
                    _ => return Err(invalid("Use table, json, csv, or minimal.")),
                };
            }
            SettingsKey::UseColors => {
                self.use_colors = match value.to_lowercase().as_str() {
                    "true" | "1" | "yes" => true,
                    "false" | "0" | "no" => false,
                    _ => return Err(invalid("Use true or false.")),
                };
            }
            SettingsKey::ParallelThreshold => {
                self.parallel_threshold = value
                    .parse()
                    .map_err(|_| invalid("Must be a non-negative integer."))?;
            }
        }
        Ok(())
    }

    /// Restores a key to its default.
    pub fn reset(&mut self, key: SettingsKey) {
        let defaults = Self::default();
        match key {
            SettingsKey::StoragePath => self.storage_path = defaults.storage_path,
            SettingsKey::DefaultFormat => self.default_format = defaults.default_format,
            SettingsKey::UseColors => self.use_colors = defaults.use_colors,
            SettingsKey::ParallelThreshold => {
                self.parallel_threshold = defaults.parallel_threshold;
            }
        }
    }

    /// The simulation database to open.
    pub fn resolved_storage_path(&self) -> CliResult<PathBuf> {
        match &self.storage_path {
            Some(path) => Ok(path.clone()),
            None => default_storage_path(),
        }
    }
}

fn format_name(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Table => "table",
        OutputFormat::Json => "json",
        OutputFormat::Csv => "csv",
        OutputFormat::Minimal => "minimal",
    }
}

/// Default settings file location.
pub fn default_settings_path() -> CliResult<PathBuf> {
    let home = dirs::config_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| CliError::Config("Could not determine config directory".into()))?;
    Ok(home.join("keystone").join("config.toml"))
}

/// Default simulation database location.
pub fn default_storage_path() -> CliResult<PathBuf> {
    let home = dirs::data_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| CliError::Config("Could not determine data directory".into()))?;
    Ok(home.join("keystone").join("keystone.redb"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_partial_file_uses_defaults() {
        let settings: Settings = toml::from_str("default_format = \"json\"").unwrap();
        assert_eq!(settings.default_format, OutputFormat::Json);
        assert!(settings.use_colors);
        assert_eq!(settings.parallel_threshold, 64);
        assert_eq!(settings.storage_path, None);
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("keystone").join("config.toml");

        let mut settings = Settings::default();
        settings.set(SettingsKey::DefaultFormat, "CSV").unwrap();
        settings.set(SettingsKey::UseColors, "no").unwrap();
        settings.set(SettingsKey::StoragePath, "/tmp/sims.redb").unwrap();
        settings.save(&path).unwrap();

        let reloaded = Settings::load(&path).unwrap();
        assert_eq!(reloaded, settings);
        assert_eq!(reloaded.get(SettingsKey::DefaultFormat), "csv");
    }

    #[test]
    fn test_invalid_values() {
        let mut settings = Settings::default();
        assert!(matches!(
            settings.set(SettingsKey::ParallelThreshold, "-3"),
            Err(CliError::InvalidValue { key: "parallel_threshold", .. })
        ));
        assert!(settings.set(SettingsKey::DefaultFormat, "yaml").is_err());
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_key_aliases_and_reset() {
        assert_eq!(SettingsKey::parse("format").unwrap(), SettingsKey::DefaultFormat);
        assert_eq!(SettingsKey::parse("use-colors").unwrap(), SettingsKey::UseColors);
        assert!(matches!(SettingsKey::parse("currency"), Err(CliError::UnknownKey(_))));

        let mut settings = Settings::default();
        settings.set(SettingsKey::ParallelThreshold, "8").unwrap();
        settings.reset(SettingsKey::ParallelThreshold);
        assert_eq!(settings.parallel_threshold, 64);
    }
}
