use axum::http::{header::CONTENT_TYPE, Method};
use tokio::{net::TcpListener, signal};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_sessions::{
    cookie::{time::Duration, SameSite},
    Expiry, MemoryStore, SessionManagerLayer,
};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

mod config;
mod dao;
mod error;
mod routes;
mod schema;
mod state;

use config::Config;
use state::ServerState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::load();
    let state = ServerState::new(config).await?;

    // The frontend sends credentialed requests from wherever it is hosted,
    // so the allowed origin mirrors the request instead of naming one.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE]);

    let sessions = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(state.config.production)
        .with_same_site(if state.config.production {
            SameSite::None
        } else {
            SameSite::Lax
        })
        .with_expiry(Expiry::OnInactivity(Duration::hours(2)));

    let app = routes::router()
        .layer(cors)
        .layer(sessions)
        .with_state(state.clone());

    let address = format!("0.0.0.0:{}", state.config.port);
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutting down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("Failed to install Ctrl+C handler");
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
