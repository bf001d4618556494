use axum::{extract::State, Json};
use serde::Serialize;
use super::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub genlayer: String,
    pub chain_id: Option<String>,
    pub contract_address: String,
    pub uploads: String,
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    // Node reachability only; a wrong chain still counts as connected here
    let (genlayer, chain_id) = match state.contract.transport().chain_id().await {
        Ok(chain_id) => ("connected".to_string(), Some(chain_id)),
        Err(err) => {
            tracing::warn!("health check could not reach GenLayer node: {}", err);
            ("disconnected".to_string(), None)
        }
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        genlayer,
        chain_id,
        contract_address: state.contract.address().to_string(),
        uploads: if state.uploader.is_configured() {
            "enabled".to_string()
        } else {
            "disabled".to_string()
        },
    })
}
