pub mod adapters;
pub mod client;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

pub use adapters::storage::LocalArtifactStore;
pub use config::{toml_config::TomlConfig, ServeArgs};
pub use self::core::assets::{load_assets, AssetState, ModelAssets};
pub use server::{router, AppState};
pub use utils::error::{Result, ServiceError};
