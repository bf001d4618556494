use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde::Serialize;

use crate::{
    constants::{CONTRACT_MAX_CHALLENGE_LIMIT, RECENT_PAGE_LIMIT},
    error::Result,
    models::{ApiResponse, ChallengeRecord, LimitQuery, SubmitChallengeRequest},
    services::{
        normalize_outcome,
        scoreboard::{history_view, HistoryRow},
        ChallengeOutcome, OutcomeDefaults, SubmissionReport,
    },
    utils::clamp_limit,
};

use super::AppState;

#[derive(Debug, Serialize)]
pub struct ChallengeView {
    pub challenge: ChallengeRecord,
    pub outcome: ChallengeOutcome,
}

/// POST /api/v1/challenge/submit
///
/// Blocks until the verdict is visible or the poll budget runs out.
pub async fn submit_challenge(
    State(state): State<AppState>,
    Json(req): Json<SubmitChallengeRequest>,
) -> Result<Json<ApiResponse<SubmissionReport>>> {
    let session = state.session(&req.player)?;
    let report = state
        .challenges
        .submit(&session, &req.image_url, &req.animal_name)
        .await?;
    Ok(Json(ApiResponse::success(report)))
}

/// GET /api/v1/challenge/{id}
pub async fn get_challenge(
    State(state): State<AppState>,
    Path(challenge_id): Path<u64>,
) -> Result<Json<ApiResponse<ChallengeView>>> {
    let challenge = state.contract.get_challenge(challenge_id).await?;
    let outcome = normalize_outcome(&challenge, OutcomeDefaults::default());
    Ok(Json(ApiResponse::success(ChallengeView { challenge, outcome })))
}

/// GET /api/v1/challenges/recent
pub async fn get_recent_challenges(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<ApiResponse<Vec<HistoryRow>>>> {
    let limit = clamp_limit(query.limit, RECENT_PAGE_LIMIT, CONTRACT_MAX_CHALLENGE_LIMIT);
    let entries = state.contract.get_recent_challenges(limit).await?;
    Ok(Json(ApiResponse::success(history_view(&entries, Utc::now()))))
}
