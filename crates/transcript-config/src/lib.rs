//! Configuration management for transcript rendering.
//!
//! Parses `transcript.toml` with serde and discovers it in the working
//! directory or any of its parents.
//!
//! ```toml
//! [render]
//! kind = "markdown" # markdown | user | task
//! wrap = true
//! ```
//!
//! CLI settings are applied during load via [`CliSettings`].

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "transcript.toml";

/// CLI settings that override configuration file values.
///
/// Only `Some` values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the content kind.
    pub kind: Option<ContentKind>,
    /// Override the message container wrapping.
    pub wrap: Option<bool>,
}

/// How message text is interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// Assistant text: Markdown.
    #[default]
    Markdown,
    /// User text: escaped verbatim, tool output tags shown as blocks.
    User,
    /// Background task notification payload.
    Task,
}

impl ContentKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::User => "user",
            Self::Task => "task",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rendering configuration.
    pub render: RenderConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// `[render]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Content kind used when none is given on the command line.
    pub kind: ContentKind,
    /// Wrap output in the transcript page's message container.
    pub wrap: bool,
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
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise, searches
    /// for `transcript.toml` in the current directory and its parents, falling
    /// back to defaults.
    ///
    /// CLI settings are applied after loading and take precedence over file
    /// values. The merged result is validated.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the merged settings are inconsistent.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| discover_config(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }
        config.validate()?;

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(kind) = settings.kind {
            self.render.kind = kind;
        }
        if let Some(wrap) = settings.wrap {
            self.render.wrap = wrap;
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Task notifications render their own card container.
        if self.render.wrap && self.render.kind == ContentKind::Task {
            return Err(ConfigError::Validation(
                "render.wrap cannot be used with kind \"task\"".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Search for the config file in `start` and its parents.
fn discover_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(CONFIG_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.render.kind, ContentKind::Markdown);
        assert!(!config.render.wrap);
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.render.kind, ContentKind::Markdown);
        assert!(!config.render.wrap);
    }

    #[test]
    fn test_parse_render_config() {
        let toml = r#"
[render]
kind = "user"
wrap = true
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.render.kind, ContentKind::User);
        assert!(config.render.wrap);
    }

    #[test]
    fn test_parse_unknown_kind_fails() {
        let result = toml::from_str::<Config>("[render]\nkind = \"html\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_apply_cli_settings_kind() {
        let mut config = Config::default();
        let overrides = CliSettings {
            kind: Some(ContentKind::Task),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.render.kind, ContentKind::Task);
        assert!(!config.render.wrap); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_wrap_overrides_file() {
        let mut config: Config = toml::from_str("[render]\nwrap = true\n").unwrap();
        let overrides = CliSettings {
            wrap: Some(false),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert!(!config.render.wrap);
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config: Config = toml::from_str("[render]\nkind = \"user\"\n").unwrap();

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.render.kind, ContentKind::User);
    }

    #[test]
    fn test_validate_wrap_with_task_fails() {
        let config: Config = toml::from_str("[render]\nkind = \"task\"\nwrap = true\n").unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("render.wrap"));
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[render]\nkind = \"user\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.render.kind, ContentKind::User);
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_explicit_path_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(p) if p == path));
    }

    #[test]
    fn test_load_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[render\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_validates_cli_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[render]\nwrap = true\n").unwrap();
        let overrides = CliSettings {
            kind: Some(ContentKind::Task),
            ..Default::default()
        };

        let err = Config::load(Some(&path), Some(&overrides)).unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_discover_config_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "").unwrap();

        assert_eq!(discover_config(&nested), Some(path));
    }

    #[test]
    fn test_discover_config_prefers_nearest() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("project");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "").unwrap();
        let nearest = nested.join(CONFIG_FILENAME);
        std::fs::write(&nearest, "").unwrap();

        assert_eq!(discover_config(&nested), Some(nearest));
    }

    #[test]
    fn test_discover_config_skips_directory_named_like_config() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("project");
        let decoy = project.join("sub").join(CONFIG_FILENAME);
        std::fs::create_dir_all(decoy.join("inner")).unwrap();
        let real = project.join(CONFIG_FILENAME);
        std::fs::write(&real, "").unwrap();

        // Starting below the decoy, the search passes it on the way up.
        assert_eq!(discover_config(&decoy.join("inner")), Some(real));
    }

    #[test]
    fn test_content_kind_display() {
        assert_eq!(ContentKind::Markdown.to_string(), "markdown");
        assert_eq!(ContentKind::Task.as_str(), "task");
    }
}
