use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::report::Thresholds;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct StatuserConfig {
    #[serde(default)]
    pub system: SystemConfig,
    #[serde(default)]
    pub thresholds: ThresholdConfig,
    #[serde(default)]
    pub supervisor: SupervisorConfig,
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SystemConfig {
    /// Label shown on the `Environment` line
    #[serde(default = "default_environment")]
    pub environment: String,
    /// Extra mount point reported next to `/` (unset to skip)
    #[serde(default = "default_secondary_mount")]
    pub secondary_mount: Option<String>,
}

fn default_environment() -> String {
    "develop".to_string()
}

fn default_secondary_mount() -> Option<String> {
    Some("/mnt".to_string())
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            secondary_mount: default_secondary_mount(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ThresholdConfig {
    /// Disk and memory usage, in percent
    #[serde(default = "Thresholds::usage")]
    pub usage: Thresholds,
    /// 1-minute load average
    #[serde(default = "Thresholds::load")]
    pub load: Thresholds,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            usage: Thresholds::usage(),
            load: Thresholds::load(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SupervisorConfig {
    /// Command printing the supervisor summary, split on whitespace
    #[serde(default = "default_supervisor_command")]
    pub command: String,
    /// Token that must appear in a healthy summary
    #[serde(default = "default_supervisor_marker")]
    pub marker: String,
}

fn default_supervisor_command() -> String {
    "monit summary".to_string()
}

fn default_supervisor_marker() -> String {
    "uptime".to_string()
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            command: default_supervisor_command(),
            marker: default_supervisor_marker(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiscoveryConfig {
    /// Agent health-check endpoint
    #[serde(default = "default_discovery_url")]
    pub url: String,
    /// Request timeout in seconds; no timeout when unset
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_discovery_url() -> String {
    "http://localhost:8500/v1/agent/checks".to_string()
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            url: default_discovery_url(),
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Emit ANSI colors
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_color() -> bool {
    true
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl StatuserConfig {
    /// Load configuration from a specific directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();

        let builder = Config::builder()
            .set_default("logging.level", default_log_level())?
            .set_default("display.color", true)?
            .set_default("system.environment", default_environment())?
            // Load default config file
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Load environment-specific config (e.g., config/production.toml)
            .add_source(
                File::from(config_dir.join(
                    std::env::var("STATUSER_ENV").unwrap_or_else(|_| "development".to_string()),
                ))
                .required(false),
            )
            // Override with environment variables (STATUSER_DISCOVERY__URL, etc.)
            .add_source(
                Environment::with_prefix("STATUSER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Supervisor command as program and arguments
    pub fn supervisor_argv(&self) -> Vec<&str> {
        self.supervisor.command.split_whitespace().collect()
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        for (name, thresholds) in [
            ("thresholds.usage", &self.thresholds.usage),
            ("thresholds.load", &self.thresholds.load),
        ] {
            if !(thresholds.good <= thresholds.warning) {
                errors.push(format!(
                    "{name}: good ({}) must not exceed warning ({})",
                    thresholds.good, thresholds.warning
                ));
            }
        }

        if self.supervisor_argv().is_empty() {
            errors.push("supervisor.command must not be empty".to_string());
        }

        if self.supervisor.marker.trim().is_empty() {
            errors.push("supervisor.marker must not be empty".to_string());
        }

        if let Err(e) = reqwest::Url::parse(&self.discovery.url) {
            errors.push(format!("discovery.url {:?} is invalid: {e}", self.discovery.url));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = StatuserConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.system.environment, "develop");
        assert_eq!(config.system.secondary_mount.as_deref(), Some("/mnt"));
        assert_eq!(config.supervisor_argv(), vec!["monit", "summary"]);
        assert_eq!(config.discovery.url, "http://localhost:8500/v1/agent/checks");
        assert!(config.discovery.timeout_secs.is_none());
    }

    #[test]
    fn test_load_from_missing_dir_uses_defaults() {
        let config = StatuserConfig::load_from("does/not/exist").unwrap();
        assert_eq!(config.thresholds.usage.good, 80.0);
        assert_eq!(config.thresholds.usage.warning, 95.0);
        assert_eq!(config.thresholds.load.good, 0.8);
        assert_eq!(config.supervisor.marker, "uptime");
    }

    #[test]
    fn test_env_overrides_nested_key() {
        std::env::set_var("STATUSER_DISCOVERY__URL", "http://consul.internal:8500/v1/agent/checks");
        let config = StatuserConfig::load_from("does/not/exist");
        std::env::remove_var("STATUSER_DISCOVERY__URL");

        assert_eq!(
            config.unwrap().discovery.url,
            "http://consul.internal:8500/v1/agent/checks"
        );
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let mut config = StatuserConfig::default();
        config.thresholds.usage = Thresholds {
            good: 96.0,
            warning: 95.0,
        };
        config.supervisor.command = "   ".to_string();
        config.discovery.url = "not a url".to_string();

        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors[0].starts_with("thresholds.usage"));
    }
}
