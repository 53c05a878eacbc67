//! Layered configuration: built-in defaults, `ewm-quiz.toml`, an explicit
//! file, then `EWM_QUIZ_*` environment variables.

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Theme;

pub const PROJECT_CONFIG_FILE: &str = "ewm-quiz.toml";
pub const ENV_PREFIX: &str = "EWM_QUIZ_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file {0} does not exist")]
    Missing(PathBuf),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] Box<figment::Error>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
    /// Directory for the log file; the system temp dir when unset
    pub dir: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    /// Question bank to load instead of the embedded one
    pub questions: Option<PathBuf>,
    /// Where exported results are written
    pub export_dir: PathBuf,
    /// Theme at startup
    pub theme: Theme,
    pub log: LogConfig,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            questions: None,
            export_dir: PathBuf::from("."),
            theme: Theme::Light,
            log: LogConfig::default(),
        }
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources.
    ///
    /// Priority (highest to lowest):
    /// 1. `EWM_QUIZ_*` environment variables (`__` separates nested keys)
    /// 2. Explicit config path (if provided)
    /// 3. `./ewm-quiz.toml`
    /// 4. Default values
    pub fn load(config_path: Option<&Path>) -> Result<QuizConfig, ConfigError> {
        Self::figment(config_path)?
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(|err| ConfigError::Invalid(Box::new(err)))
    }

    /// Everything except the environment layer.
    pub fn figment(config_path: Option<&Path>) -> Result<Figment, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(QuizConfig::default()));

        let project = PathBuf::from(PROJECT_CONFIG_FILE);
        if project.exists() {
            figment = figment.merge(Toml::file(project));
        }

        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::Missing(path.to_path_buf()));
            }
            figment = figment.merge(Toml::file(path));
        }

        Ok(figment)
    }
}
