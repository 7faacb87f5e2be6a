//! Virtual Mum chat relay server binary.
//!
//! Composition root: reads configuration, builds the completion client once
//! and hands it to the router.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use vmum_api::config::{ApiConfig, DEFAULT_ALLOWED_ORIGINS, parse_origin_list};
use vmum_core::completion::openai::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use vmum_core::completion::{CompletionClient, OpenAiClient};
use vmum_core::relay::ChatRelay;

/// CLI arguments for the relay server.
#[derive(Parser, Debug)]
#[command(name = "vmum_api_server", about = "Virtual Mum chat relay server")]
struct Args {
    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Address to bind.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Completion service credential. Without it every chat request fails fast.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_api_key: Option<String>,

    /// Model identifier sent upstream.
    #[arg(long, env = "OPENAI_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Completion service base URL.
    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    openai_base_url: String,

    /// Upper bound on a single completion call, in seconds.
    #[arg(
        long,
        env = "COMPLETION_TIMEOUT_SECS",
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout_secs: u64,

    /// Comma-separated origin allow-list; `https://*.host` patterns allowed.
    #[arg(long, env = "CORS_ALLOWED_ORIGINS")]
    allowed_origins: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,vmum_api=debug,vmum_core=debug".into()),
        )
        .init();

    let args = Args::parse();

    let timeout = Duration::from_secs(args.timeout_secs);
    let client: Option<Arc<dyn CompletionClient>> = match args
        .openai_api_key
        .filter(|key| !key.trim().is_empty())
    {
        Some(key) => {
            let http = reqwest::Client::builder().build()?;
            let openai = OpenAiClient::new(http, key.trim(), args.model.as_str(), &args.openai_base_url);
            info!(endpoint = openai.endpoint(), "completion client configured");
            Some(Arc::new(openai) as Arc<dyn CompletionClient>)
        }
        None => {
            warn!("OPENAI_API_KEY is not set; /chat will answer with a configuration error");
            None
        }
    };

    let allowed_origins = match args.allowed_origins.as_deref() {
        Some(raw) => parse_origin_list(raw),
        None => DEFAULT_ALLOWED_ORIGINS.iter().map(|s| s.to_string()).collect(),
    };

    let config = ApiConfig::new(&args.host, args.port, allowed_origins);
    info!(
        bind_addr = %config.bind_addr,
        model = %args.model,
        has_key = client.is_some(),
        timeout_secs = args.timeout_secs,
        origins = ?config.allowed_origins,
        "starting vmum_api_server"
    );

    let relay = ChatRelay::new(client, timeout);
    let app = vmum_api::router(vmum_api::AppState::new(config.clone(), relay));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "chat relay listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C, shutting down"),
        _ = terminate => info!("received terminate signal, shutting down"),
    }
}
