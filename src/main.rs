//! Lodestar HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use lodestar::config::Config;
use lodestar::embedding::EncoderConfig;
use lodestar::engine::{EngineConfig, EngineContext, RetrievalEngine};
use lodestar::filter::ContentFilter;
use lodestar::gateway::{HandlerState, create_router_with_state};
use lodestar::provider::HttpSearchProvider;
use lodestar::suggest::ProviderSuggestions;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!(
        r#"
██╗      ██████╗ ██████╗ ███████╗███████╗████████╗ █████╗ ██████╗
██║     ██╔═══██╗██╔══██╗██╔════╝██╔════╝╚══██╔══╝██╔══██╗██╔══██╗
██║     ██║   ██║██║  ██║█████╗  ███████╗   ██║   ███████║██████╔╝
██║     ██║   ██║██║  ██║██╔══╝  ╚════██║   ██║   ██╔══██║██╔══██╗
███████╗╚██████╔╝██████╔╝███████╗███████║   ██║   ██║  ██║██║  ██║
╚══════╝ ╚═════╝ ╚═════╝ ╚══════╝╚══════╝   ╚═╝   ╚═╝  ╚═╝╚═╝  ╚═╝

        FETCH. RANK. SUGGEST.
"#
    );

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        provider_url = %config.provider_url,
        "Lodestar starting"
    );

    let encoder_config = if let Some(dir) = &config.model_dir {
        EncoderConfig::new(dir.clone())
    } else {
        tracing::warn!("No LODESTAR_MODEL_DIR configured, running encoder in stub mode");
        EncoderConfig::stub()
    };

    let blocklist = config.load_blocklist()?;
    let filter = ContentFilter::new(&blocklist)?;
    if filter.term_count() > 0 {
        tracing::info!(terms = filter.term_count(), "Content filter active");
    }

    // Encoder initialization failure is a legitimate startup abort; the
    // engine cannot operate without it.
    let context = EngineContext::new(encoder_config, filter, config.cache_capacity)?;

    let provider = HttpSearchProvider::new(config.provider_url.clone(), config.provider_timeout)?;
    let source = ProviderSuggestions::new(provider.clone());

    let engine = RetrievalEngine::new(context, provider, source, EngineConfig::from(&config));
    let state = HandlerState::new(Arc::new(engine));

    let app = create_router_with_state(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Lodestar shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
