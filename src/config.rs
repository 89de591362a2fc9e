//! Configuration management for the addiction score service

use crate::types::category::CategoryThresholds;
use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::Path;

/// Default config file location, overridden by `ADDICTION_CONFIG`
pub const DEFAULT_CONFIG_PATH: &str = "config/config.toml";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub model: ModelConfig,
    pub categories: CategoryThresholds,
    pub metrics: MetricsConfig,
    pub logging: LoggingConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Model artifact configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Path to the pipeline artifact (`.json`, or `.onnx` with the `onnx` feature)
    pub path: String,
    /// Number of threads for ONNX inference (default: 1)
    #[serde(default = "default_onnx_threads")]
    pub onnx_threads: usize,
}

fn default_onnx_threads() -> usize {
    1
}

/// Periodic metrics reporting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Seconds between summaries, 0 disables the reporter
    pub report_interval_secs: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty)
    pub format: String,
}

impl AppConfig {
    /// Load configuration from `ADDICTION_CONFIG` or the default path.
    ///
    /// A missing file is not an error: defaults and environment apply.
    pub fn load() -> Result<Self> {
        let path =
            std::env::var("ADDICTION_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from_path(path)
    }

    /// Load configuration layered as defaults, file, then `ADDICTION__*` variables
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let defaults = Config::try_from(&AppConfig::default())
            .context("Failed to build default configuration")?;

        let config = Config::builder()
            .add_source(defaults)
            .add_source(File::from(path.as_ref()).required(false))
            .add_source(
                Environment::with_prefix("ADDICTION")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        let config: AppConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.model.path.trim().is_empty() {
            bail!("model.path must not be empty");
        }
        // NaN on either side is unordered and rejected too
        if let Some(Ordering::Greater) | None =
            self.categories.low.partial_cmp(&self.categories.moderate)
        {
            bail!(
                "categories.low ({}) must not exceed categories.moderate ({})",
                self.categories.low,
                self.categories.moderate
            );
        }
        Ok(())
    }

    /// Listener address as `host:port`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8000,
            },
            model: ModelConfig {
                path: "models/addiction_score_pipeline.tuned.json".to_string(),
                onnx_threads: default_onnx_threads(),
            },
            categories: CategoryThresholds::default(),
            metrics: MetricsConfig {
                report_interval_secs: 60,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, MutexGuard};

    // Every test that builds from the environment holds this lock
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    const OVERRIDE_FILE: &str = r#"
[server]
port = 9100

[categories]
low = 2.5
moderate = 7.0
"#;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.bind_address(), "127.0.0.1:8000");
        assert_eq!(config.categories.low, 3.0);
        assert_eq!(config.categories.moderate, 6.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let _guard = env_lock();
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from_path(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.model.path, "models/addiction_score_pipeline.tuned.json");
    }

    #[test]
    fn test_file_overrides_defaults() {
        let _guard = env_lock();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[server]
port = 9100

[model]
path = "artifacts/pipeline.json"

[categories]
low = 2.5
moderate = 7.0
"#,
        )
        .unwrap();

        let config = AppConfig::load_from_path(&path).unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.model.path, "artifacts/pipeline.json");
        assert_eq!(config.model.onnx_threads, 1);
        assert_eq!(config.categories.low, 2.5);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let mut config = AppConfig::default();
        config.categories.low = 7.0;
        assert!(config.validate().is_err());

        config.categories.low = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_equal_thresholds_accepted() {
        let mut config = AppConfig::default();
        config.categories.low = 6.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_environment_overrides_file_and_defaults() {
        let _guard = env_lock();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, OVERRIDE_FILE).unwrap();

        std::env::set_var("ADDICTION__SERVER__PORT", "9200");
        std::env::set_var("ADDICTION__CATEGORIES__LOW", "1.5");
        let result = AppConfig::load_from_path(&path);
        std::env::remove_var("ADDICTION__SERVER__PORT");
        std::env::remove_var("ADDICTION__CATEGORIES__LOW");

        let config = result.unwrap();
        assert_eq!(config.server.port, 9200);
        assert_eq!(config.categories.low, 1.5);
        // Untouched keys keep the file value, then the default
        assert_eq!(config.categories.moderate, 7.0);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_config_path_from_environment() {
        let _guard = env_lock();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("service.toml");
        std::fs::write(&path, OVERRIDE_FILE).unwrap();

        std::env::set_var("ADDICTION_CONFIG", &path);
        let result = AppConfig::load();
        std::env::remove_var("ADDICTION_CONFIG");

        let config = result.unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.categories.low, 2.5);
    }
}
