use clap::Parser;
use decoy_http::config::Config;
use decoy_http::server::{ServerState, StubServer};
use decoy_http::StubEngine;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Decoy - HTTP test-double server
#[derive(Parser, Debug)]
#[command(name = "decoy")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// YAML configuration file
    #[arg(short, long, env = "DECOY_CONFIG")]
    config: Option<PathBuf>,

    /// Listen port (overrides listen.port)
    #[arg(short, long, env = "DECOY_PORT")]
    port: Option<u16>,

    /// Listen host (overrides listen.host)
    #[arg(long, env = "DECOY_HOST")]
    host: Option<String>,

    /// Exchanges retained in the call history (overrides history.capacity)
    #[arg(long)]
    history_capacity: Option<usize>,

    /// JSON priming file loaded into the baseline; may be repeated
    #[arg(long = "priming-file")]
    priming_files: Vec<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info", env = "DECOY_LOG_LEVEL")]
    log_level: String,
}

impl Args {
    fn into_config(self) -> Result<Config, anyhow::Error> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        if let Some(port) = self.port {
            config.listen.port = port;
        }
        if let Some(host) = self.host {
            config.listen.host = host;
        }
        if let Some(capacity) = self.history_capacity {
            config.history.capacity = capacity;
        }
        config.priming_files.extend(self.priming_files);
        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level.as_str()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = args.into_config()?;
    let engine = Arc::new(StubEngine::new(config.engine_config()?));
    info!(
        "Loaded {} baseline priming(s), history capacity {}",
        engine.list_current_priming().len(),
        engine.history_capacity()
    );

    let state = ServerState::new(engine).with_admin_prefix(config.admin_prefix());
    let server = StubServer::bind(&config.listen.bind_address(), state).await?;
    server
        .run_until(async {
            tokio::signal::ctrl_c().await.ok();
        })
        .await
}
