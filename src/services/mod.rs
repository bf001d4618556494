// All service modules
pub mod challenge_service;
pub mod outcome;
pub mod reconciler;
pub mod scoreboard;

// Re-export for convenience
pub use challenge_service::{ChallengeService, SubmissionReport};
pub use outcome::{normalize_outcome, ChallengeOutcome, OutcomeDefaults};
