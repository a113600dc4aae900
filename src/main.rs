use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sys_registration::{app, config::AppConfig, AppState};

#[derive(Debug, Parser)]
#[command(name = "sys-registration", version, about = "System admin tenant registration service")]
struct Args {
    /// Port to listen on (overrides PORT / SYSREG_PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Default tracing filter when RUST_LOG is unset (overrides LOG_LEVEL)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up the downstream service URLs
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    let mut config = AppConfig::from_env().context("invalid configuration")?;
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(level) = args.log_level {
        config.log_level = level;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Starting {} in {:?} mode", config.server.service_name, config.environment);
    tracing::info!(
        user_service = %config.upstream.user_service_url,
        tenant_service = %config.upstream.tenant_service_url,
        timeout_secs = config.upstream.timeout_secs,
        "Downstream services configured"
    );

    let state = AppState::from_config(&config).context("failed to build application state")?;

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("System registration service listening on http://{}", bind_addr);

    axum::serve(listener, app(state)).await.context("server error")?;
    Ok(())
}
