use clap::Parser;
use heart_predict::adapters::storage::LocalArtifactStore;
use heart_predict::config::toml_config::LogFormat;
use heart_predict::config::ServeArgs;
use heart_predict::core::assets::{load_assets, AssetState};
use heart_predict::server::{run_server, AppState};
use heart_predict::utils::{logger, validation::Validate};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = ServeArgs::parse();
    let config = args.resolve()?;

    match config.log_format() {
        LogFormat::Json => logger::init_json_logger(config.verbose()),
        LogFormat::Text => logger::init_cli_logger(config.verbose()),
    }

    tracing::info!("Starting heart-predict");
    tracing::debug!("Effective config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }

    // A failed load keeps the service up; /health reports it and /predict answers 500.
    let store = LocalArtifactStore::new(config.model_dir());
    let assets = AssetState::from_load(load_assets(&store, &config).await);
    if let Some(error) = assets.load_error() {
        tracing::error!("Model assets unavailable: {}", error);
    }

    run_server(&config.bind_addr(), AppState::new(assets)).await?;
    Ok(())
}
