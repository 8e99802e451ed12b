//! Configuration management for mdp.
//!
//! Parses `mdp.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [render]
//! template = "dark"
//! fallback_title = "Untitled"
//! gfm = true
//!
//! [preview]
//! enabled = true
//! output_dir = "out"
//! ```
//!
//! ## Environment Variable Expansion
//!
//! `${VAR}` and `${VAR:-default}` are expanded in:
//! - `render.template`
//! - `render.fallback_title`
//! - `preview.output_dir`
//!
//! ## Path Resolution
//!
//! Relative paths in the file resolve against the directory holding
//! `mdp.toml`: `preview.output_dir` and a `render.template` that names a file
//! rather than a built-in. Paths given on the command line stay relative to
//! the working directory.

mod expand;

use mdp_render::TemplateSelector;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdp.toml";

/// Title used when a document has neither a heading nor a file name.
const DEFAULT_FALLBACK_TITLE: &str = "Untitled";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override template selector.
    pub template: Option<String>,
    /// Override output directory for generated pages.
    pub output_dir: Option<PathBuf>,
    /// Override preview enabled flag.
    pub preview_enabled: Option<bool>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rendering configuration.
    pub render: RenderConfig,
    /// Preview configuration (paths are relative strings from TOML).
    preview: PreviewConfigRaw,

    /// Resolved preview configuration (set after loading).
    #[serde(skip)]
    pub preview_resolved: PreviewConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Default template selector (built-in name or template file path).
    pub template: Option<String>,
    /// Title for documents without a heading or file name.
    pub fallback_title: String,
    /// Enable GitHub Flavored Markdown extensions.
    pub gfm: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            template: None,
            fallback_title: DEFAULT_FALLBACK_TITLE.to_owned(),
            gfm: true,
        }
    }
}

impl RenderConfig {
    /// Template selector to use, empty meaning the default template.
    #[must_use]
    pub fn template_selector(&self) -> &str {
        self.template.as_deref().unwrap_or_default()
    }
}

/// Raw preview configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct PreviewConfigRaw {
    enabled: Option<bool>,
    output_dir: Option<String>,
}

/// Resolved preview configuration with absolute paths.
#[derive(Debug)]
pub struct PreviewConfig {
    /// Open generated pages in the default viewer.
    pub enabled: bool,
    /// Directory for generated pages (`None` uses the system temp directory).
    pub output_dir: Option<PathBuf>,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            output_dir: None,
        }
    }
}

impl PreviewConfig {
    /// Directory generated pages are written to.
    #[must_use]
    pub fn output_dir_or_temp(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(std::env::temp_dir)
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
        /// Config field path (e.g., "`render.template`").
        field: String,
        /// Error message (e.g., "${`MDP_TEMPLATE`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mdp.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
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

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(template) = &settings.template {
            self.render.template = Some(template.clone());
        }
        if let Some(output_dir) = &settings.output_dir {
            self.preview_resolved.output_dir = Some(output_dir.clone());
        }
        if let Some(preview_enabled) = settings.preview_enabled {
            self.preview_resolved.enabled = preview_enabled;
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

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;
        config.validate()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file, before path resolution.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.render.fallback_title, "render.fallback_title")?;
        if let Some(template) = &self.render.template {
            require_non_empty(template, "render.template")?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref template) = self.render.template {
            self.render.template = Some(expand::expand_env(template, "render.template")?);
        }
        self.render.fallback_title =
            expand::expand_env(&self.render.fallback_title, "render.fallback_title")?;
        if let Some(ref output_dir) = self.preview.output_dir {
            self.preview.output_dir = Some(expand::expand_env(output_dir, "preview.output_dir")?);
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let template_file = self.render.template.as_deref().and_then(|template| {
            match TemplateSelector::parse(template) {
                TemplateSelector::External(path) if path.is_relative() => {
                    Some(config_dir.join(path))
                }
                _ => None,
            }
        });
        if let Some(path) = template_file {
            self.render.template = Some(path.to_string_lossy().into_owned());
        }
        self.preview_resolved = PreviewConfig {
            enabled: self.preview.enabled.unwrap_or(true),
            output_dir: self.preview.output_dir.as_deref().map(|dir| config_dir.join(dir)),
        };
    }
}
