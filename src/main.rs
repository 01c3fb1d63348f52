use anyhow::{Context, Result};
use eth_wallet_bot::{AppState, api, config::Config, transport};
use std::{env, io, net::SocketAddr, sync::Once};
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

static TRACING_INIT: Once = Once::new();

fn init_tracing(is_stdio_mode: bool) {
    TRACING_INIT.call_once(|| {
        let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "eth_wallet_bot=debug,tower_http=debug".into());

        // stdout carries replies in stdio mode, so logs always go to stderr.
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_ansi(!is_stdio_mode);

        if tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .is_err()
        {
            eprintln!("Failed to initialize tracing subscriber");
        }
    });
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let is_stdio_mode = args.iter().any(|arg| arg == "--stdio");

    init_tracing(is_stdio_mode);

    let config = Config::from_env().context("Failed to load configuration")?;
    let state = AppState::from_config(config)?;

    if is_stdio_mode {
        tracing::info!("Starting stdio chat transport...");
        let reader = BufReader::new(tokio::io::stdin());
        transport::run_loop(&state.machine, reader, tokio::io::stdout())
            .await
            .context("stdio transport failed")?;
    } else {
        let addr = SocketAddr::new(state.config.bind_addr, state.config.port);
        let app = api::build_router(state);

        tracing::info!("🚀 HTTP Server listening on {}", addr);
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        axum::serve(listener, app)
            .await
            .context("HTTP server failed")?;
    }

    Ok(())
}
