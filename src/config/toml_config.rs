use crate::domain::ports::AssetSettings;
use crate::utils::error::{Result, ServiceError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_MODEL_DIR: &str = "models";
pub const DEFAULT_MODEL_FILE: &str = "model.json";
pub const DEFAULT_SCALER_FILE: &str = "scaler.json";
pub const DEFAULT_FEATURES_FILE: &str = "feature_columns.json";
pub const DEFAULT_MAX_FEATURES: usize = 13;

/// Service configuration as read from a TOML file. Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub server: Option<ServerConfig>,
    pub assets: Option<AssetsConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetsConfig {
    pub dir: Option<String>,
    pub model_file: Option<String>,
    pub scaler_file: Option<String>,
    pub features_file: Option<String>,
    pub max_features: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub format: Option<LogFormat>,
    pub verbose: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ServiceError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration, expanding `${VAR}` references first.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ServiceError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ServiceError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn host(&self) -> &str {
        self.server
            .as_ref()
            .and_then(|s| s.host.as_deref())
            .unwrap_or(DEFAULT_HOST)
    }

    pub fn port(&self) -> u16 {
        self.server.as_ref().and_then(|s| s.port).unwrap_or(DEFAULT_PORT)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host(), self.port())
    }

    pub fn model_dir(&self) -> &str {
        self.assets
            .as_ref()
            .and_then(|a| a.dir.as_deref())
            .unwrap_or(DEFAULT_MODEL_DIR)
    }

    pub fn log_format(&self) -> LogFormat {
        self.logging
            .as_ref()
            .and_then(|l| l.format)
            .unwrap_or_default()
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("server.host", self.host())?;
        validation::validate_positive_number("server.port", usize::from(self.port()), 1)?;
        validation::validate_path("assets.dir", self.model_dir())?;

        for (field, file) in [
            ("assets.model_file", self.model_file()),
            ("assets.scaler_file", self.scaler_file()),
            ("assets.features_file", self.features_file()),
        ] {
            validation::validate_path(field, file)?;
            validation::validate_file_extension(field, file, &["json"])?;
        }

        validation::validate_positive_number("assets.max_features", self.max_features(), 1)?;

        Ok(())
    }
}

impl AssetSettings for TomlConfig {
    fn model_file(&self) -> &str {
        self.assets
            .as_ref()
            .and_then(|a| a.model_file.as_deref())
            .unwrap_or(DEFAULT_MODEL_FILE)
    }

    fn scaler_file(&self) -> &str {
        self.assets
            .as_ref()
            .and_then(|a| a.scaler_file.as_deref())
            .unwrap_or(DEFAULT_SCALER_FILE)
    }

    fn features_file(&self) -> &str {
        self.assets
            .as_ref()
            .and_then(|a| a.features_file.as_deref())
            .unwrap_or(DEFAULT_FEATURES_FILE)
    }

    fn max_features(&self) -> usize {
        self.assets
            .as_ref()
            .and_then(|a| a.max_features)
            .unwrap_or(DEFAULT_MAX_FEATURES)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
