// Configuration loading and parsing (config/bargain.toml).

use serde::Deserialize;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use bargain_core::DEFAULT_SEASON_LABEL;

pub const CONFIG_FILE_NAME: &str = "bargain.toml";

const DEFAULT_INPUT: &str = "data/team_info.txt";
const DEFAULT_OUTPUT: &str = "reports/bargain_analysis.txt";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for bargain.toml.
#[derive(Debug, Clone, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    report: ReportConfig,
    #[serde(default)]
    data_paths: DataPaths,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Season label printed in the report header.
    #[serde(default = "default_season")]
    pub season: String,
    /// Team label for the header. When absent, the team of the first ranked
    /// player is used.
    #[serde(default)]
    pub team: Option<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            season: default_season(),
            team: None,
        }
    }
}

fn default_season() -> String {
    DEFAULT_SEASON_LABEL.to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataPaths {
    pub input: String,
    pub output: String,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            input: DEFAULT_INPUT.to_string(),
            output: DEFAULT_OUTPUT.to_string(),
        }
    }
}

/// Assembled configuration. Relative data paths resolve against `base_dir`.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_dir: PathBuf,
    pub report: ReportConfig,
    pub data_paths: DataPaths,
}

/// Command-line values that replace their config counterparts.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub input: Option<String>,
    pub output: Option<String>,
    pub team: Option<String>,
    pub season: Option<String>,
}

impl Config {
    /// Built-in settings, used when `base_dir` has no config file at all.
    pub fn with_defaults(base_dir: &Path) -> Self {
        Self {
            base_dir: base_dir.to_path_buf(),
            report: ReportConfig::default(),
            data_paths: DataPaths::default(),
        }
    }

    pub fn input_path(&self) -> PathBuf {
        self.resolve(&self.data_paths.input)
    }

    pub fn output_path(&self) -> PathBuf {
        self.resolve(&self.data_paths.output)
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Apply command-line overrides and re-validate.
    pub fn with_overrides(mut self, overrides: Overrides) -> Result<Self, ConfigError> {
        if let Some(input) = overrides.input {
            self.data_paths.input = input;
        }
        if let Some(output) = overrides.output {
            self.data_paths.output = output;
        }
        if let Some(team) = overrides.team {
            self.report.team = Some(team);
        }
        if let Some(season) = overrides.season {
            self.report.season = season;
        }
        validate(&self)?;
        Ok(self)
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/bargain.toml` relative to `base_dir`.
///
/// Does not seed missing files; prefer `load_config()`.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE_NAME);
    let text = read_file(&path)?;
    let file: ConfigFile = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    let config = Config {
        base_dir: base_dir.to_path_buf(),
        report: file.report,
        data_paths: file.data_paths,
    };

    validate(&config)?;

    Ok(config)
}

/// Copy `defaults/bargain.toml` into `config/` unless a config file is
/// already there.
///
/// Returns the written path, or `None` when there was nothing to seed. The
/// target is opened with `create_new`, so an existing (or concurrently
/// created) config is never overwritten.
pub fn seed_config(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let source = base_dir.join("defaults").join(CONFIG_FILE_NAME);
    let defaults = match fs::read(&source) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(ConfigError::DefaultsCopyError {
                message: format!("failed to read {}: {e}", source.display()),
            })
        }
    };

    let config_dir = base_dir.join("config");
    fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let target = config_dir.join(CONFIG_FILE_NAME);
    let mut file = match OpenOptions::new().write(true).create_new(true).open(&target) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(None),
        Err(e) => {
            return Err(ConfigError::DefaultsCopyError {
                message: format!("failed to create {}: {e}", target.display()),
            })
        }
    };
    if let Err(e) = file.write_all(&defaults) {
        drop(file);
        let _ = fs::remove_file(&target);
        return Err(ConfigError::DefaultsCopyError {
            message: format!("failed to write {}: {e}", target.display()),
        });
    }

    info!("Seeded {} from {}", target.display(), source.display());
    Ok(Some(target))
}

/// Seed the config file from `defaults/` if possible, then load it.
///
/// A base directory with neither file runs on built-in settings, so the
/// binary works from any directory when paths come from the command line.
pub fn load_config(base_dir: &Path) -> Result<Config, ConfigError> {
    seed_config(base_dir)?;
    match load_config_from(base_dir) {
        Err(ConfigError::FileNotFound { path }) => {
            info!("No config at {}; using built-in settings", path.display());
            Ok(Config::with_defaults(base_dir))
        }
        other => other,
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn require_non_empty(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: field.into(),
            message: "must not be empty".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    require_non_empty("report.season", &config.report.season)?;
    if let Some(team) = &config.report.team {
        require_non_empty("report.team", team)?;
    }
    require_non_empty("data_paths.input", &config.data_paths.input)?;
    require_non_empty("data_paths.output", &config.data_paths.output)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
