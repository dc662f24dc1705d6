pub mod toml_config;

use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;
use toml_config::{AssetsConfig, LogFormat, LoggingConfig, ServerConfig, TomlConfig};

#[derive(Debug, Clone, Parser)]
#[command(name = "heart-predict")]
#[command(about = "Serves heart disease predictions from a pre-trained model")]
pub struct ServeArgs {
    #[arg(long, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub host: Option<String>,

    #[arg(long)]
    pub port: Option<u16>,

    #[arg(long, help = "Directory holding model.json, scaler.json and feature_columns.json")]
    pub model_dir: Option<String>,

    #[arg(long)]
    pub max_features: Option<usize>,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ServeArgs {
    /// Reads the config file (if any) and applies command-line overrides on top.
    pub fn resolve(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        if self.host.is_some() || self.port.is_some() {
            let server = config.server.get_or_insert_with(ServerConfig::default);
            if let Some(host) = &self.host {
                server.host = Some(host.clone());
            }
            if let Some(port) = self.port {
                server.port = Some(port);
            }
        }

        if self.model_dir.is_some() || self.max_features.is_some() {
            let assets = config.assets.get_or_insert_with(AssetsConfig::default);
            if let Some(dir) = &self.model_dir {
                assets.dir = Some(dir.clone());
            }
            if let Some(max_features) = self.max_features {
                assets.max_features = Some(max_features);
            }
        }

        if self.json_logs || self.verbose {
            let logging = config.logging.get_or_insert_with(LoggingConfig::default);
            if self.json_logs {
                logging.format = Some(LogFormat::Json);
            }
            if self.verbose {
                logging.verbose = Some(true);
            }
        }

        Ok(config)
    }
}
