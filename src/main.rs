mod app;
mod auth;
mod config;
mod db;
mod error;
mod pages;
mod state;
mod uploads;

use crate::config::AppConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "pinboard=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = AppConfig::from_env();

    // Optional collection provisioning; none of the request flows read from
    // the document store, so a failure here must not stop the server.
    if let Some(uri) = config.mongodb_uri.clone() {
        if let Err(e) = db::bootstrap(&uri, &config.mongodb_database).await {
            tracing::warn!(error = %e, "document store bootstrap failed; continuing without it");
        }
    }

    let state = AppState::init(config.clone());
    let app = app::build_app(state);
    app::serve(app, &config).await
}
