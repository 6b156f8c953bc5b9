//! Webhook HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::routing::post;
use axum::Router;

use crate::bot::Dispatcher;
use crate::config::Settings;
use crate::telegram::{TelegramClient, TelegramError};

/// Body of every webhook response.
pub const ACK: &str = "ok";

/// Shared, read-only state handed to every request.
#[derive(Debug)]
pub struct AppState {
    pub dispatcher: Dispatcher,
}

/// Errors that stop the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to create Telegram client: {0}")]
    Client(#[from] TelegramError),

    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Build the dispatcher described by `settings`.
pub fn build_dispatcher(settings: &Settings) -> Result<Dispatcher, TelegramError> {
    let client =
        TelegramClient::with_base_url(settings.token.clone(), settings.api_base_url.clone())?;
    Ok(Dispatcher::new(
        client,
        settings.mode,
        settings.mosaic,
        settings.thumbnail,
    ))
}

/// Router serving the webhook on `POST /{webhook_path}`.
pub fn router(state: Arc<AppState>, webhook_path: &str) -> Router {
    let path = format!("/{}", webhook_path.trim_start_matches('/'));
    Router::new()
        .route(&path, post(webhook))
        .with_state(state)
}

/// Webhook handler. Always acknowledges, whatever happened inside.
async fn webhook(State(state): State<Arc<AppState>>, body: Bytes) -> &'static str {
    let outcome = state.dispatcher.handle_payload(&body).await;
    log::debug!("Webhook handled: {:?}", outcome);
    ACK
}

/// Serve the webhook until Ctrl-C.
pub async fn serve(settings: Settings) -> Result<(), ServerError> {
    let dispatcher = build_dispatcher(&settings)?;
    let state = Arc::new(AppState { dispatcher });
    let app = router(state, &settings.webhook_path);

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!(
        "Listening on {} ({} mode, {} palette)",
        addr,
        settings.mode,
        settings.mosaic.palette
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown requested");
}
