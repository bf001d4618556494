//! Submit-and-reconcile loop.
//!
//! A write against the contract only yields a transaction hash; the judged
//! result shows up later in the player's history. The loop issues the write
//! once, then reads a bounded history window on a fixed cadence until an entry
//! satisfies the caller's predicate or the attempt budget runs out.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;

use crate::{
    config::Config,
    constants::{DEFAULT_POLL_INTERVAL_SECS, DEFAULT_POLL_MAX_ATTEMPTS},
    error::Result,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            max_attempts: DEFAULT_POLL_MAX_ATTEMPTS,
        }
    }
}

impl PollPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            interval: config.poll_interval(),
            max_attempts: config.poll_max_attempts,
        }
    }

    /// Upper bound on wall time spent polling.
    pub fn budget(&self) -> Duration {
        self.interval * self.max_attempts
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MatchResult<T> {
    Found { entry: T, attempt: u32 },
    Pending { attempts: u32 },
}

/// Polls `fetch` until an entry satisfies `matches`.
///
/// Every attempt waits one interval first. Entries are tested in the order
/// `fetch` returns them. A failed fetch consumes the attempt and the loop
/// keeps going; running out of attempts yields `Pending`, never an error.
pub async fn poll_for_match<T, F, Fut, P, O>(
    policy: &PollPolicy,
    mut fetch: F,
    mut matches: P,
    mut on_attempt: O,
) -> MatchResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
    P: FnMut(&T) -> bool,
    O: FnMut(u32, u32),
{
    for attempt in 1..=policy.max_attempts {
        sleep(policy.interval).await;
        on_attempt(attempt, policy.max_attempts);

        match fetch().await {
            Ok(entries) => {
                if let Some(entry) = entries.into_iter().find(|entry| matches(entry)) {
                    return MatchResult::Found { entry, attempt };
                }
            }
            Err(err) => {
                tracing::warn!(
                    attempt,
                    max_attempts = policy.max_attempts,
                    "history read failed, treating as no match: {}",
                    err
                );
            }
        }
    }

    MatchResult::Pending {
        attempts: policy.max_attempts,
    }
}

/// Runs `submit` once and, if it succeeds, reconciles its effect with
/// [`poll_for_match`]. A failed submit returns its error without polling.
pub async fn submit_and_reconcile<A, T, S, SFut, F, Fut, P, O>(
    policy: &PollPolicy,
    submit: S,
    fetch: F,
    matches: P,
    on_attempt: O,
) -> Result<(A, MatchResult<T>)>
where
    S: FnOnce() -> SFut,
    SFut: Future<Output = Result<A>>,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
    P: FnMut(&T) -> bool,
    O: FnMut(u32, u32),
{
    let ack = submit().await?;
    let outcome = poll_for_match(policy, fetch, matches, on_attempt).await;
    Ok((ack, outcome))
}
