use serde::Serialize;

use crate::{
    constants::{AI_ERROR_HINT, AI_ERROR_MARKERS, AI_GUESS_FAILED_DISPLAY, AI_GUESS_PENDING, UNKNOWN_PLACEHOLDER},
    models::ChallengeRecord,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Win,
    Loss,
    Error,
}

impl OutcomeStatus {
    pub fn title(&self) -> &'static str {
        match self {
            OutcomeStatus::Win => "You Won!",
            OutcomeStatus::Loss => "AI Got It Right!",
            OutcomeStatus::Error => "Image Load Error",
        }
    }

    pub fn badge(&self) -> &'static str {
        match self {
            OutcomeStatus::Win => "You Won",
            OutcomeStatus::Loss => "AI Won",
            OutcomeStatus::Error => "Error",
        }
    }
}

/// Display-ready verdict for one challenge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChallengeOutcome {
    pub status: OutcomeStatus,
    pub player_won: bool,
    pub has_error: bool,
    pub title: String,
    pub ai_guess: String,
    pub correct_animal: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// Placeholders used when the contract row leaves a field empty.
#[derive(Debug, Clone, Copy)]
pub struct OutcomeDefaults<'a> {
    pub ai_guess: &'a str,
    pub correct_animal: &'a str,
}

impl Default for OutcomeDefaults<'_> {
    fn default() -> Self {
        Self {
            ai_guess: AI_GUESS_PENDING,
            correct_animal: UNKNOWN_PLACEHOLDER,
        }
    }
}

/// The judge writes failures into the guess itself, e.g. `error: 403`.
pub fn has_ai_error(ai_guess: &str) -> bool {
    AI_ERROR_MARKERS.iter().any(|marker| ai_guess.contains(marker))
}

/// `you_won` (or `player_won`) when set, otherwise `result == "win"`.
pub fn player_won(record: &ChallengeRecord) -> bool {
    record.you_won.unwrap_or(false) || record.result.eq_ignore_ascii_case("win")
}

pub fn normalize_outcome(record: &ChallengeRecord, defaults: OutcomeDefaults<'_>) -> ChallengeOutcome {
    let raw_guess = if record.ai_guess.is_empty() {
        defaults.ai_guess
    } else {
        record.ai_guess.as_str()
    };
    let correct_animal = if record.correct_animal.is_empty() {
        defaults.correct_animal.to_string()
    } else {
        record.correct_animal.clone()
    };

    let has_error = has_ai_error(raw_guess);
    let won = player_won(record);

    let status = if has_error {
        OutcomeStatus::Error
    } else if won {
        OutcomeStatus::Win
    } else {
        OutcomeStatus::Loss
    };

    let ai_guess = if has_error {
        AI_GUESS_FAILED_DISPLAY.to_string()
    } else {
        raw_guess.to_string()
    };

    let message = match status {
        OutcomeStatus::Error => AI_ERROR_HINT.to_string(),
        OutcomeStatus::Win => format!(
            "You won! AI guessed '{ai_guess}' but it was '{correct_animal}'!"
        ),
        OutcomeStatus::Loss => format!("AI got it! Correctly identified as '{ai_guess}'"),
    };

    ChallengeOutcome {
        status,
        player_won: won && !has_error,
        has_error,
        title: status.title().to_string(),
        ai_guess,
        correct_animal,
        message,
        hint: has_error.then(|| AI_ERROR_HINT.to_string()),
    }
}
