mod api;
mod middleware;

use std::sync::Arc;

use bengawan_scraper::AvailabilityChecker;
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, build_cors, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = bengawan_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let checker = AvailabilityChecker::from_app_config(&config)?;
    let state = AppState {
        checker: Arc::new(checker),
        allowed_host: Arc::from(config.allowed_host.as_str()),
    };
    let app = build_app(state, build_cors(&config.frontend_origin)?);

    tracing::info!(
        bind_addr = %config.bind_addr,
        env = %config.env,
        frontend_origin = %config.frontend_origin,
        train = %config.target_train,
        "starting availability server"
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
