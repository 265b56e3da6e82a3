//! Configuration management for t2t.
//!
//! Parses `t2t.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `convert.output_dir`
//! - `wiki.extension`

mod expand;

use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "t2t.toml";

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    #[default]
    Html,
    Man,
    Wiki,
}

impl Target {
    /// All supported targets.
    pub const ALL: [Self; 3] = [Self::Html, Self::Man, Self::Wiki];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Man => "man",
            Self::Wiki => "wiki",
        }
    }

    /// File extension used when nothing in the configuration overrides it.
    #[must_use]
    pub fn default_extension(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Man => "1",
            Self::Wiki => "wiki",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Target {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|target| target.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                ConfigError::Validation(format!(
                    "unknown target '{s}', expected one of: html, man, wiki"
                ))
            })
    }
}

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override output format.
    pub target: Option<Target>,
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Conversion settings.
    pub convert: ConvertConfig,
    /// Manual page settings.
    pub man: ManConfig,
    /// Wiki settings.
    pub wiki: WikiConfig,

    /// Resolved output directory (set after loading).
    #[serde(skip)]
    pub output_dir: Option<PathBuf>,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// `[convert]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Output format.
    pub target: Target,
    /// Output directory, relative to the config file.
    output_dir: Option<String>,
}

/// `[man]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ManConfig {
    /// Manual section, also used as the file extension.
    pub section: u8,
}

impl Default for ManConfig {
    fn default() -> Self {
        Self { section: 1 }
    }
}

/// `[wiki]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct WikiConfig {
    /// File extension for wiki output.
    pub extension: String,
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            extension: Target::Wiki.default_extension().to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`convert.output_dir`").
        field: String,
        /// Error message (e.g., "${`OUT_DIR`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `t2t.toml` in the current directory and its
    /// parents, falling back to defaults when none exists.
    ///
    /// CLI settings are applied after loading and path resolution, so they
    /// take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, or if reading,
    /// parsing, expansion or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Output file extension for `target`.
    #[must_use]
    pub fn extension(&self, target: Target) -> Cow<'_, str> {
        match target {
            Target::Html => Cow::Borrowed(target.default_extension()),
            Target::Man => Cow::Owned(self.man.section.to_string()),
            Target::Wiki => Cow::Borrowed(self.wiki.extension.trim()),
        }
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(target) = settings.target {
            self.convert.target = target;
        }
        if let Some(output_dir) = &settings.output_dir {
            self.output_dir = Some(output_dir.clone());
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=9).contains(&self.man.section) {
            return Err(ConfigError::Validation(format!(
                "man.section must be between 1 and 9, got {}",
                self.man.section
            )));
        }
        if self.wiki.extension.trim().is_empty() {
            return Err(ConfigError::Validation(
                "wiki.extension cannot be empty".to_owned(),
            ));
        }
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref dir) = self.convert.output_dir {
            self.convert.output_dir = Some(expand::expand_env(dir, "convert.output_dir")?);
        }
        self.wiki.extension = expand::expand_env(&self.wiki.extension, "wiki.extension")?;
        Ok(())
    }

    /// Resolve the output directory against the config file's directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.output_dir = self
            .convert
            .output_dir
            .as_deref()
            .map(|dir| config_dir.join(dir));
    }
}
