// src/models/mod.rs
pub mod game;
pub mod record;

pub use game::{
    ApiResponse,
    ChallengeRecord,
    ConnectRequest,
    LeaderboardRecord,
    LimitQuery,
    PlayerStats,
    SubmitAck,
    SubmitChallengeRequest,
};
pub use record::Record;
