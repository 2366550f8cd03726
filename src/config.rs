//! Configuration management for classical-release

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::APP_NAME;
use crate::probe::DEFAULT_FFPROBE;
use crate::titles::{ComposersMode, DEFAULT_SEPARATORS};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Title formatting
    pub titles: TitlesConfig,

    /// Release document contents
    pub release: ReleaseConfig,

    /// Headings used in the release document
    pub labels: LabelsConfig,
}

/// General application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Title formatting settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitlesConfig {
    /// How composer names are attached to track lines
    pub composers_mode: ComposersMode,

    /// Piece/part separators, tried in order
    pub separators: Vec<String>,
}

/// Release document settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseConfig {
    /// Emit the performers heading in each section
    pub performers: bool,

    /// Probe track durations with ffprobe
    pub durations: bool,

    /// ffprobe executable
    pub ffprobe_path: PathBuf,
}

/// Headings for the sections of a release
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelsConfig {
    /// Performers heading
    pub performers: String,

    /// Quality-check log spoiler title
    pub quality_log: String,

    /// Rip log spoiler title
    pub rip_log: String,

    /// Dynamic range report spoiler title
    pub dr_report: String,
}

/// Command line values that take precedence over the configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    /// Force duration probing on
    pub durations: bool,

    /// Replaces the separator list when non-empty
    pub separators: Vec<String>,

    /// Force the performers section off
    pub no_performers: bool,

    /// Replaces the composers mode
    pub composers_mode: Option<ComposersMode>,
}

// Default implementations

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl Default for TitlesConfig {
    fn default() -> Self {
        Self {
            composers_mode: ComposersMode::default(),
            separators: DEFAULT_SEPARATORS.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            performers: true,
            durations: false,
            ffprobe_path: PathBuf::from(DEFAULT_FFPROBE),
        }
    }
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            performers: "Исполнители".to_string(),
            quality_log: "Лог проверки качества".to_string(),
            rip_log: "Лог создания рипа".to_string(),
            dr_report: "Динамический отчет (dr14-tmeter)".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, contents)?;
        Ok(())
    }

    /// Get the default configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::config("Could not determine config directory"))?;
        Ok(config_dir.join(APP_NAME).join("config.toml"))
    }

    /// Merge command line overrides into this configuration.
    ///
    /// Flags can only switch features on (durations) or off (performers);
    /// an unset flag leaves the file's value alone.
    pub fn apply_overrides(&mut self, overrides: Overrides) {
        if overrides.durations {
            self.release.durations = true;
        }
        if !overrides.separators.is_empty() {
            self.titles.separators = overrides.separators;
        }
        if overrides.no_performers {
            self.release.performers = false;
        }
        if let Some(mode) = overrides.composers_mode {
            self.titles.composers_mode = mode;
        }
    }

    /// Validate configuration values.
    ///
    /// Call this after loading to ensure all values are within acceptable ranges.
    pub fn validate(&self) -> Result<()> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.to_lowercase().as_str()) {
            return Err(Error::config(format!(
                "log_level must be one of {:?}, got '{}'",
                valid_levels, self.general.log_level
            )));
        }

        // An empty list is allowed and means the defaults
        if self.titles.separators.iter().any(String::is_empty) {
            return Err(Error::config("separators must not contain empty strings"));
        }

        if self.release.durations && self.release.ffprobe_path.as_os_str().is_empty() {
            return Err(Error::config("ffprobe_path must be set when durations are enabled"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.titles.composers_mode, ComposersMode::Prepend);
        assert_eq!(config.titles.separators, vec![": ", " - "]);
        assert!(config.release.performers);
        assert!(!config.release.durations);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [titles]
            composers_mode = "inside"

            [labels]
            performers = "Performers"
            "#,
        )
        .unwrap();
        assert_eq!(config.titles.composers_mode, ComposersMode::Inside);
        assert_eq!(config.titles.separators, vec![": ", " - "]);
        assert_eq!(config.labels.performers, "Performers");
        assert_eq!(config.labels.rip_log, "Лог создания рипа");
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        let result: std::result::Result<Config, _> =
            toml::from_str("[titles]\ncomposers_mode = \"sideways\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_roundtrip_through_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.general.log_level = "loud".to_string();
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let mut config = Config::default();
        config.titles.separators = vec![String::new()];
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.release.durations = true;
        config.release.ffprobe_path = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_overrides_keep_file_values() {
        let mut config = Config::default();
        config.release.performers = false;
        config.titles.separators = vec![", ".to_string()];
        let before = config.clone();

        config.apply_overrides(Overrides::default());
        assert_eq!(config, before);
    }

    #[test]
    fn test_separator_override_replaces_list() {
        let mut config = Config::default();
        config.apply_overrides(Overrides {
            separators: vec![" / ".to_string()],
            ..Overrides::default()
        });
        assert_eq!(config.titles.separators, vec![" / "]);
    }

    #[test]
    fn test_flag_overrides() {
        let mut config = Config::default();
        config.apply_overrides(Overrides {
            durations: true,
            no_performers: true,
            composers_mode: Some(ComposersMode::Nothing),
            ..Overrides::default()
        });
        assert!(config.release.durations);
        assert!(!config.release.performers);
        assert_eq!(config.titles.composers_mode, ComposersMode::Nothing);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[release]\ndurations = true\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert!(config.release.durations);
        assert_eq!(config.release.ffprobe_path, PathBuf::from("ffprobe"));
    }
}
