use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod config;
mod constants;
mod contracts;
mod error;
mod genlayer;
mod integrations;
mod models;
mod services;
mod session;
mod utils;

use config::Config;
use constants::{API_VERSION, MAX_IMAGE_BYTES};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wild_guess_gateway=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    config.validate()?;

    tracing::info!("Starting Wild Guess gateway");
    tracing::info!("Environment: {}", config.environment);
    tracing::info!("API Version: {}", API_VERSION);
    tracing::info!(
        rpc_url = %config.genlayer_rpc_url,
        chain_id = %config.genlayer_chain_id,
        contract = %config.contract_address,
        "GenLayer target"
    );

    let app_state = api::AppState::new(config.clone())?;

    // Warn early if the node is on another chain; sessions reject it anyway
    match app_state.contract.transport().chain_id().await {
        Ok(chain_id) if session::same_chain(&chain_id, &config.genlayer_chain_id) => {
            tracing::info!("GenLayer node reachable on chain {}", chain_id);
        }
        Ok(chain_id) => tracing::warn!(
            "GenLayer node reports chain {}, expected {}",
            chain_id,
            config.genlayer_chain_id
        ),
        Err(err) => tracing::warn!("GenLayer node not reachable at startup: {}", err),
    }

    let app = build_router(app_state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_router(state: api::AppState) -> Router {
    // CORS configuration
    let cors = cors_from_config(&state.config);

    Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        // Session
        .route("/api/v1/session/connect", post(api::session::connect))
        .route("/api/v1/session/disconnect", post(api::session::disconnect))
        // Image upload; oversized bodies reach the handler so it can answer 400
        .route(
            "/api/v1/upload",
            post(api::upload::upload_image).layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES * 2)),
        )
        // Challenges
        .route(
            "/api/v1/challenge/submit",
            post(api::challenge::submit_challenge),
        )
        .route(
            "/api/v1/challenge/{id}",
            get(api::challenge::get_challenge),
        )
        .route(
            "/api/v1/challenges/recent",
            get(api::challenge::get_recent_challenges),
        )
        // Players
        .route(
            "/api/v1/player/{address}/stats",
            get(api::player::get_player_stats),
        )
        .route(
            "/api/v1/player/{address}/history",
            get(api::player::get_player_history),
        )
        // Leaderboard
        .route("/api/v1/leaderboard", get(api::leaderboard::get_leaderboard))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn cors_from_config(config: &Config) -> CorsLayer {
    let Some(allowed) = allowed_origins(&config.cors_allowed_origins) else {
        return CorsLayer::very_permissive();
    };

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}

// None means permissive: empty, `*`, or nothing parseable.
fn allowed_origins(raw: &str) -> Option<Vec<HeaderValue>> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "*" {
        return None;
    }

    let allowed: Vec<HeaderValue> = raw
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse::<HeaderValue>().ok())
        .collect();

    if allowed.is_empty() {
        tracing::warn!("No valid CORS origins parsed; falling back to permissive");
        return None;
    }
    Some(allowed)
}
