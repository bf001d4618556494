use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::{
    config::Config,
    constants::{AI_GUESS_PENDING, MIN_ANIMAL_NAME_LEN, MIN_IMAGE_URL_LEN, STILL_PROCESSING_MESSAGE},
    error::{AppError, Result},
    models::ChallengeRecord,
    services::{
        outcome::{normalize_outcome, ChallengeOutcome, OutcomeDefaults},
        reconciler::{submit_and_reconcile, MatchResult, PollPolicy},
    },
    session::Session,
    utils::{format_address, is_valid_image_url},
};

/// What we submitted, kept around so later history rows can be matched to it.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSubmission {
    pub player: String,
    pub animal: String,
    animal_key: String,
    pub image_url: String,
    pub baseline_id: Option<u64>,
}

impl PendingSubmission {
    pub fn new(player: &str, image_url: &str, animal: &str) -> Self {
        let animal = animal.trim().to_string();
        Self {
            player: player.to_string(),
            animal_key: animal.to_lowercase(),
            animal,
            image_url: image_url.trim().to_string(),
            baseline_id: None,
        }
    }

    pub fn with_baseline(mut self, baseline_id: Option<u64>) -> Self {
        self.baseline_id = baseline_id;
        self
    }

    /// Case-insensitive animal, exact image URL, and newer than the baseline
    /// when both sides carry an id.
    pub fn matches(&self, entry: &ChallengeRecord) -> bool {
        if entry.correct_animal.to_lowercase() != self.animal_key || entry.image_url != self.image_url {
            return false;
        }
        match (self.baseline_id, entry.challenge_id) {
            (Some(baseline), Some(id)) => id > baseline,
            _ => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Resolved,
    Pending,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReport {
    pub tx_hash: String,
    pub status: SubmissionStatus,
    pub attempts: u32,
    pub challenge_id: Option<u64>,
    pub outcome: Option<ChallengeOutcome>,
    pub message: String,
}

/// Checks a submission the same way the contract would before spending a
/// transaction on it.
pub fn validate_submission(image_url: &str, animal_name: &str) -> Result<()> {
    let image_url = image_url.trim();
    if image_url.len() < MIN_IMAGE_URL_LEN || url::Url::parse(image_url).is_err() {
        return Err(AppError::BadRequest("Invalid image URL".to_string()));
    }
    if animal_name.trim().chars().count() < MIN_ANIMAL_NAME_LEN {
        return Err(AppError::BadRequest(
            "Animal name must be at least 2 characters".to_string(),
        ));
    }
    if !is_valid_image_url(image_url) {
        tracing::warn!(image_url, "image URL does not look like a direct image link");
    }
    Ok(())
}

type InFlight = Arc<Mutex<HashSet<String>>>;

struct InFlightGuard {
    key: String,
    set: InFlight,
}

impl InFlightGuard {
    fn acquire(set: &InFlight, player: &str) -> Result<Self> {
        let key = player.to_lowercase();
        let mut active = set
            .lock()
            .map_err(|_| AppError::Internal("in-flight registry poisoned".to_string()))?;
        if !active.insert(key.clone()) {
            return Err(AppError::SubmissionInFlight(format_address(player)));
        }
        Ok(Self {
            key,
            set: set.clone(),
        })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        if let Ok(mut active) = self.set.lock() {
            active.remove(&self.key);
        }
    }
}

#[derive(Clone)]
pub struct ChallengeService {
    policy: PollPolicy,
    history_window: u32,
    in_flight: InFlight,
}

impl ChallengeService {
    pub fn new(policy: PollPolicy, history_window: u32) -> Self {
        Self {
            policy,
            history_window,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(PollPolicy::from_config(config), config.poll_history_window)
    }

    /// Submits a challenge and waits for its verdict to show up in the
    /// player's history.
    ///
    /// The work runs on its own task, so the poll finishes and the player's
    /// in-flight slot is released even if the caller stops waiting.
    pub async fn submit(
        &self,
        session: &Session,
        image_url: &str,
        animal_name: &str,
    ) -> Result<SubmissionReport> {
        validate_submission(image_url, animal_name)?;
        let guard = InFlightGuard::acquire(&self.in_flight, session.account())?;

        let pending = PendingSubmission::new(session.account(), image_url, animal_name);
        let service = self.clone();
        let session = session.clone();
        tokio::spawn(async move {
            let _guard = guard;
            service.run(&session, pending).await
        })
        .await
        .map_err(|e| AppError::Internal(format!("submission task failed: {}", e)))?
    }

    async fn run(&self, session: &Session, pending: PendingSubmission) -> Result<SubmissionReport> {
        let baseline = baseline_id(session).await;
        let pending = pending.with_baseline(baseline);
        let contract = session.contract();
        let player = pending.player.as_str();
        let window = self.history_window;

        tracing::info!(
            player = %format_address(player),
            animal = %pending.animal,
            baseline_id = ?pending.baseline_id,
            budget_secs = self.policy.budget().as_secs(),
            "submitting challenge"
        );

        let (ack, result) = submit_and_reconcile(
            &self.policy,
            || async {
                contract
                    .submit_challenge(player, &pending.image_url, &pending.animal)
                    .await
                    .map_err(|e| AppError::SubmissionFailed(e.to_string()))
            },
            || contract.get_player_challenges(player, window),
            |entry: &ChallengeRecord| pending.matches(entry),
            |attempt, max_attempts| {
                tracing::debug!(player = %format_address(player), attempt, max_attempts, "checking for result");
            },
        )
        .await?;

        let report = match result {
            MatchResult::Found { entry, attempt } => {
                let outcome = normalize_outcome(
                    &entry,
                    OutcomeDefaults {
                        ai_guess: AI_GUESS_PENDING,
                        correct_animal: &pending.animal,
                    },
                );
                tracing::info!(
                    tx_hash = %ack.tx_hash,
                    challenge_id = ?entry.challenge_id,
                    attempt,
                    status = ?outcome.status,
                    "challenge resolved"
                );
                SubmissionReport {
                    tx_hash: ack.tx_hash,
                    status: SubmissionStatus::Resolved,
                    attempts: attempt,
                    challenge_id: entry.challenge_id,
                    message: outcome.message.clone(),
                    outcome: Some(outcome),
                }
            }
            MatchResult::Pending { attempts } => {
                tracing::info!(tx_hash = %ack.tx_hash, attempts, "challenge still processing");
                SubmissionReport {
                    tx_hash: ack.tx_hash,
                    status: SubmissionStatus::Pending,
                    attempts,
                    challenge_id: None,
                    outcome: None,
                    message: STILL_PROCESSING_MESSAGE.to_string(),
                }
            }
        };
        Ok(report)
    }
}

/// Newest challenge id the player already has, if it can be read.
async fn baseline_id(session: &Session) -> Option<u64> {
    match session.player_challenges(1).await {
        Ok(rows) => rows.first().and_then(|row| row.challenge_id),
        Err(err) => {
            tracing::warn!(player = %format_address(session.account()), "baseline read failed: {}", err);
            None
        }
    }
}
