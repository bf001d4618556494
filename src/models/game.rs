use serde::{Deserialize, Serialize};

use super::record::Record;

// ==================== CHALLENGE ====================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengeRecord {
    pub challenge_id: Option<u64>,
    pub player: String,
    pub image_url: String,
    pub correct_animal: String,
    pub ai_guess: String,
    pub result: String, // "win" / "lose"
    pub timestamp: String,
    pub you_won: Option<bool>,
}

impl From<&Record> for ChallengeRecord {
    fn from(record: &Record) -> Self {
        Self {
            challenge_id: record.u64_any(&["challenge_id", "id"]),
            player: record.str_or(&["player", "address"], ""),
            image_url: record.str_or(&["image_url", "image"], ""),
            correct_animal: record.str_or(&["correct_animal", "animal"], ""),
            ai_guess: record.str_or(&["ai_guess"], ""),
            result: record.str_or(&["result"], ""),
            timestamp: record.str_or(&["timestamp"], ""),
            you_won: record.bool_any(&["you_won", "player_won"]),
        }
    }
}

// ==================== PLAYER ====================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub player: String,
    pub total_challenges: u64,
    pub wins: u64,
    pub losses: u64,
    pub win_rate: String,
    pub current_streak: u64,
    pub best_streak: u64,
}

impl From<&Record> for PlayerStats {
    fn from(record: &Record) -> Self {
        Self {
            player: record.str_or(&["player", "address"], ""),
            total_challenges: record.u64_or_zero(&["total_challenges"]),
            wins: record.u64_or_zero(&["wins"]),
            losses: record.u64_or_zero(&["losses"]),
            win_rate: record.str_or(&["win_rate"], "0%"),
            current_streak: record.u64_or_zero(&["current_streak"]),
            best_streak: record.u64_or_zero(&["best_streak"]),
        }
    }
}

// ==================== LEADERBOARD ====================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardRecord {
    pub player: Option<String>,
    pub rank: Option<u64>,
    pub wins: u64,
    pub losses: u64,
    pub total_challenges: u64,
    pub current_streak: Option<u64>,
    pub best_streak: Option<u64>,
}

impl From<&Record> for LeaderboardRecord {
    fn from(record: &Record) -> Self {
        Self {
            player: record.str_any(&["player", "address"]),
            rank: record.u64_any(&["rank"]),
            wins: record.u64_or_zero(&["wins"]),
            losses: record.u64_or_zero(&["losses"]),
            total_challenges: record.u64_or_zero(&["total_challenges"]),
            current_streak: record.u64_any(&["current_streak"]),
            best_streak: record.u64_any(&["best_streak"]),
        }
    }
}

// ==================== WRITES ====================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitAck {
    pub tx_hash: String,
}

// ==================== REQUESTS ====================
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitChallengeRequest {
    pub player: String,
    pub image_url: String,
    pub animal_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConnectRequest {
    pub account: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<u32>,
}

// ==================== RESPONSES ====================
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
