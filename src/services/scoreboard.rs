// Display views for stats, leaderboard and history

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    constants::{AI_GUESS_PENDING, UNKNOWN_PLACEHOLDER},
    models::{ChallengeRecord, LeaderboardRecord, PlayerStats},
    services::outcome::{normalize_outcome, OutcomeDefaults, OutcomeStatus},
    utils::{format_address, format_relative_time, win_rate_percent},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsView {
    pub player: String,
    pub wins: u64,
    pub losses: u64,
    pub total_challenges: u64,
    pub win_rate: u64,
    pub current_streak: u64,
    pub best_streak: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardRow {
    pub rank: u64,
    pub medal: Option<&'static str>,
    pub player: Option<String>,
    pub display_address: String,
    pub wins: u64,
    pub games: u64,
    pub win_rate: u64,
    pub streak: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryRow {
    pub challenge_id: Option<u64>,
    pub player: String,
    pub display_address: String,
    pub image_url: String,
    pub correct_animal: String,
    pub ai_guess: String,
    pub status: OutcomeStatus,
    pub badge: &'static str,
    pub when: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

pub fn stats_view(stats: &PlayerStats) -> StatsView {
    StatsView {
        player: stats.player.clone(),
        wins: stats.wins,
        losses: stats.losses,
        total_challenges: stats.total_challenges,
        win_rate: win_rate_percent(stats.wins, stats.total_challenges),
        current_streak: stats.current_streak,
        best_streak: stats.best_streak,
    }
}

pub fn medal(rank: u64) -> Option<&'static str> {
    match rank {
        1 => Some("🥇"),
        2 => Some("🥈"),
        3 => Some("🥉"),
        _ => None,
    }
}

/// Rank comes from position, not from the contract's `rank` field. A zero
/// current streak shows the best streak instead.
pub fn leaderboard_view(entries: &[LeaderboardRecord]) -> Vec<LeaderboardRow> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let rank = index as u64 + 1;
            LeaderboardRow {
                rank,
                medal: medal(rank),
                player: entry.player.clone(),
                display_address: entry
                    .player
                    .as_deref()
                    .map(format_address)
                    .unwrap_or_else(|| UNKNOWN_PLACEHOLDER.to_string()),
                wins: entry.wins,
                games: entry.total_challenges,
                win_rate: win_rate_percent(entry.wins, entry.total_challenges),
                streak: entry
                    .current_streak
                    .filter(|streak| *streak > 0)
                    .or(entry.best_streak)
                    .unwrap_or(0),
            }
        })
        .collect()
}

pub fn history_view(entries: &[ChallengeRecord], now: DateTime<Utc>) -> Vec<HistoryRow> {
    entries.iter().map(|entry| history_row(entry, now)).collect()
}

pub fn history_row(entry: &ChallengeRecord, now: DateTime<Utc>) -> HistoryRow {
    let outcome = normalize_outcome(
        entry,
        OutcomeDefaults {
            ai_guess: AI_GUESS_PENDING,
            correct_animal: UNKNOWN_PLACEHOLDER,
        },
    );
    HistoryRow {
        challenge_id: entry.challenge_id,
        player: entry.player.clone(),
        display_address: format_address(&entry.player),
        image_url: entry.image_url.clone(),
        correct_animal: outcome.correct_animal,
        ai_guess: outcome.ai_guess,
        status: outcome.status,
        badge: outcome.status.badge(),
        when: format_relative_time(&entry.timestamp, now),
        hint: outcome.hint,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn board_entry(player: Option<&str>, wins: u64, total: u64, current: Option<u64>, best: Option<u64>) -> LeaderboardRecord {
        LeaderboardRecord {
            player: player.map(str::to_string),
            rank: None,
            wins,
            losses: total - wins,
            total_challenges: total,
            current_streak: current,
            best_streak: best,
        }
    }

    #[test]
    fn stats_view_recomputes_win_rate() {
        let stats = PlayerStats {
            player: "0xabc".to_string(),
            total_challenges: 3,
            wins: 2,
            losses: 1,
            win_rate: "66.66%".to_string(),
            current_streak: 1,
            best_streak: 2,
        };
        let view = stats_view(&stats);
        assert_eq!(view.win_rate, 67);
        assert_eq!(view.current_streak, 1);
    }

    #[test]
    fn leaderboard_ranks_medals_and_streak_fallback() {
        let rows = leaderboard_view(&[
            board_entry(Some("0x21Ab0638F4f0FbcD5C1c87d1423b3874cDb69307"), 5, 6, Some(3), Some(4)),
            board_entry(None, 3, 6, None, Some(2)),
            board_entry(Some("0xabc"), 1, 4, None, None),
            board_entry(Some("0xdef"), 0, 0, Some(0), None),
            board_entry(Some("0x123"), 3, 7, Some(0), Some(3)),
        ]);

        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[0].medal, Some("🥇"));
        assert_eq!(rows[0].display_address, "0x21Ab...9307");
        assert_eq!(rows[0].win_rate, 83);
        assert_eq!(rows[0].streak, 3);

        assert_eq!(rows[1].display_address, "Unknown");
        assert_eq!(rows[1].streak, 2);

        assert_eq!(rows[2].medal, Some("🥉"));
        assert_eq!(rows[2].streak, 0);

        assert_eq!(rows[3].medal, None);
        assert_eq!(rows[3].win_rate, 0);
        assert_eq!(rows[3].streak, 0);

        assert_eq!(rows[4].rank, 5);
        assert_eq!(rows[4].streak, 3);
    }

    #[test]
    fn history_rows_carry_badge_time_and_hint() {
        let now = Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 0).unwrap();
        let entries = vec![
            ChallengeRecord {
                challenge_id: Some(2),
                player: "0xabc".to_string(),
                image_url: "https://x/cat.jpg".to_string(),
                correct_animal: "cat".to_string(),
                ai_guess: "dog".to_string(),
                result: "win".to_string(),
                timestamp: "2025-01-10T11:50:00".to_string(),
                you_won: None,
            },
            ChallengeRecord {
                challenge_id: Some(1),
                player: "0xabc".to_string(),
                image_url: "https://x/upload".to_string(),
                correct_animal: String::new(),
                ai_guess: "timeout while fetching".to_string(),
                result: "lose".to_string(),
                timestamp: "garbage".to_string(),
                you_won: Some(false),
            },
        ];

        let rows = history_view(&entries, now);
        assert_eq!(rows[0].badge, "You Won");
        assert_eq!(rows[0].when, "10m ago");
        assert!(rows[0].hint.is_none());

        assert_eq!(rows[1].status, OutcomeStatus::Error);
        assert_eq!(rows[1].badge, "Error");
        assert_eq!(rows[1].when, "Unknown");
        assert_eq!(rows[1].correct_animal, "Unknown");
        assert!(rows[1].hint.is_some());
    }
}
