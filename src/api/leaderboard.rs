use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    constants::{CONTRACT_MAX_LEADERBOARD_LIMIT, LEADERBOARD_PAGE_LIMIT},
    error::Result,
    models::{ApiResponse, LimitQuery},
    services::scoreboard::{leaderboard_view, LeaderboardRow},
    utils::clamp_limit,
};

use super::AppState;

/// GET /api/v1/leaderboard
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<ApiResponse<Vec<LeaderboardRow>>>> {
    let limit = clamp_limit(query.limit, LEADERBOARD_PAGE_LIMIT, CONTRACT_MAX_LEADERBOARD_LIMIT);
    let entries = state.contract.get_leaderboard(limit).await?;
    Ok(Json(ApiResponse::success(leaderboard_view(&entries))))
}
