use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub lesson: LessonConfig,
    #[serde(default)]
    pub explorer: ExplorerConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Event-poll interval for the main loop
    #[serde(default = "default_refresh_rate")]
    pub refresh_rate_ms: u64,
    /// How long the tutorial card's bounce-in emphasis lasts
    #[serde(default = "default_bounce_ms")]
    pub card_bounce_ms: u64,
}

fn default_refresh_rate() -> u64 {
    100
}

fn default_bounce_ms() -> u64 {
    1000
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            refresh_rate_ms: default_refresh_rate(),
            card_bounce_ms: default_bounce_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonConfig {
    /// Lesson file to load instead of the built-in Riemann walkthrough
    #[serde(default)]
    pub path: Option<String>,
    /// Start with the tutorial overlay visible (default: true)
    #[serde(default = "default_autostart")]
    pub autostart: bool,
}

fn default_autostart() -> bool {
    true
}

impl Default for LessonConfig {
    fn default() -> Self {
        Self {
            path: None,
            autostart: default_autostart(),
        }
    }
}

/// Starting state for the explorer. These are also the baselines the
/// built-in lesson's predicates compare against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorerConfig {
    #[serde(default = "default_partitions")]
    pub partitions: u32,
    #[serde(default = "default_left_bound")]
    pub left_bound: f64,
    #[serde(default = "default_right_bound")]
    pub right_bound: f64,
}

fn default_partitions() -> u32 {
    8
}

fn default_left_bound() -> f64 {
    -2.0
}

fn default_right_bound() -> f64 {
    4.0
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            partitions: default_partitions(),
            left_bound: default_left_bound(),
            right_bound: default_right_bound(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory for logs and saved configuration
    #[serde(default = "default_state_path")]
    pub state: String,
}

fn default_state_path() -> String {
    ".riemann-tutor".to_string()
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            state: default_state_path(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to log to file in TUI mode (false = stderr for debugging)
    #[serde(default = "default_log_to_file")]
    pub to_file: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_to_file() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            to_file: default_log_to_file(),
        }
    }
}

impl Config {
    /// Path to the project-local config file
    pub fn local_config_path() -> PathBuf {
        PathBuf::from(".riemann-tutor/config.toml")
    }

    pub fn load(config_path: Option<&str>) -> Result<Self> {
        // Start with embedded defaults so the explorer works without any
        // config files
        let defaults = Config::default();
        let defaults_json =
            serde_json::to_string(&defaults).context("Failed to serialize default config")?;

        let mut builder = config::Config::builder().add_source(config::File::from_str(
            &defaults_json,
            config::FileFormat::Json,
        ));

        // Project-local config (primary config location)
        let local_config = Self::local_config_path();
        if local_config.exists() {
            builder = builder.add_source(config::File::from(local_config));
        }

        // User config in ~/.config/riemann-tutor/ (optional global overrides)
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("riemann-tutor").join("config.toml");
            if user_config.exists() {
                builder = builder.add_source(config::File::from(user_config));
            }
        }

        // Explicit config file (CLI override)
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        }

        // Environment variables with TUTOR_ prefix
        builder = builder.add_source(
            config::Environment::with_prefix("TUTOR")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to load configuration")?;
        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Save config to the project-local location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::local_config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let toml_str =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        std::fs::write(&config_path, toml_str).context("Failed to write config file")?;

        Ok(())
    }

    /// Get absolute path to the state directory
    pub fn state_path(&self) -> PathBuf {
        let path = PathBuf::from(&self.paths.state);
        if path.is_absolute() {
            path
        } else {
            std::env::current_dir().unwrap_or_default().join(path)
        }
    }

    /// Get absolute path to the logs directory
    pub fn logs_path(&self) -> PathBuf {
        self.state_path().join("logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_lesson_baselines() {
        let config = Config::default();
        assert_eq!(config.explorer.partitions, 8);
        assert_eq!(config.explorer.left_bound, -2.0);
        assert_eq!(config.explorer.right_bound, 4.0);
        assert!(config.lesson.autostart);
    }

    #[test]
    fn test_logs_path_under_state_dir() {
        let config = Config::default();
        let logs = config.logs_path();
        assert!(logs.ends_with(".riemann-tutor/logs"));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let parsed: Config = toml::from_str(
            r#"
            [logging]
            level = "debug"
        "#,
        )
        .unwrap();
        assert_eq!(parsed.logging.level, "debug");
        assert!(parsed.logging.to_file);
        assert_eq!(parsed.ui.refresh_rate_ms, 100);
    }
}
