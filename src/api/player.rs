use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;

use crate::{
    constants::{CONTRACT_MAX_CHALLENGE_LIMIT, HISTORY_PAGE_LIMIT},
    error::Result,
    models::{ApiResponse, LimitQuery},
    services::scoreboard::{history_view, stats_view, HistoryRow, StatsView},
    utils::clamp_limit,
};

use super::AppState;

/// GET /api/v1/player/{address}/stats
pub async fn get_player_stats(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<ApiResponse<StatsView>>> {
    let session = state.session(&address)?;
    let stats = session.player_stats().await?;
    Ok(Json(ApiResponse::success(stats_view(&stats))))
}

/// GET /api/v1/player/{address}/history
pub async fn get_player_history(
    State(state): State<AppState>,
    Path(address): Path<String>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<ApiResponse<Vec<HistoryRow>>>> {
    let session = state.session(&address)?;
    let limit = clamp_limit(query.limit, HISTORY_PAGE_LIMIT, CONTRACT_MAX_CHALLENGE_LIMIT);
    let entries = session.player_challenges(limit).await?;
    Ok(Json(ApiResponse::success(history_view(&entries, Utc::now()))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::{state, PLAYER};
    use crate::error::AppError;
    use crate::genlayer::fake::{FakeTransport, ReadStep};
    use serde_json::json;

    #[tokio::test]
    async fn stats_compute_rounded_win_rate() {
        let (state, _) = state(FakeTransport::new().script(
            "get_player_stats",
            vec![ReadStep::Ok(json!({
                "player": PLAYER,
                "total_challenges": 3,
                "wins": 1,
                "losses": 2,
                "current_streak": 0
            }))],
        ));
        let Json(response) = get_player_stats(State(state), Path(PLAYER.to_string()))
            .await
            .unwrap();
        assert_eq!(response.data.win_rate, 33);
    }

    #[tokio::test]
    async fn history_defaults_to_ten_entries() {
        let (state, fake) = state(FakeTransport::new());
        let Json(response) = get_player_history(
            State(state),
            Path(PLAYER.to_string()),
            Query(LimitQuery::default()),
        )
        .await
        .unwrap();
        assert!(response.data.is_empty());
        assert_eq!(fake.calls()[0].1, vec![json!(PLAYER), json!(10)]);
    }

    #[tokio::test]
    async fn malformed_address_is_rejected_before_rpc() {
        let (state, fake) = state(FakeTransport::new());
        let err = get_player_stats(State(state), Path("0x123".to_string()))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, AppError::InvalidAddress(_)));
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn read_failures_surface_as_rpc_errors() {
        let (state, _) = state(FakeTransport::new().script(
            "get_player_challenges",
            vec![ReadStep::Fail("connection refused".to_string())],
        ));
        let err = get_player_history(
            State(state),
            Path(PLAYER.to_string()),
            Query(LimitQuery::default()),
        )
        .await
        .err()
        .unwrap();
        assert!(matches!(err, AppError::BlockchainRPC(_)));
    }
}
