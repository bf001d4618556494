use axum::{extract::State, Json};

use crate::{
    error::Result,
    models::{ApiResponse, ConnectRequest},
    session::{Session, SessionInfo},
};

use super::AppState;

/// POST /api/v1/session/connect
pub async fn connect(
    State(state): State<AppState>,
    Json(req): Json<ConnectRequest>,
) -> Result<Json<ApiResponse<SessionInfo>>> {
    let expected = state.config.genlayer_chain_id.as_str();
    let session = Session::connect(state.contract.clone(), &req.account, expected).await?;
    Ok(Json(ApiResponse::success(session.info(Some(expected.to_string())))))
}

/// POST /api/v1/session/disconnect
pub async fn disconnect(
    State(state): State<AppState>,
    Json(req): Json<ConnectRequest>,
) -> Result<Json<ApiResponse<SessionInfo>>> {
    let session = state.session(&req.account)?;
    Ok(Json(ApiResponse::success(session.disconnect())))
}
