use serde::Serialize;

use crate::{
    contracts::WildGuess,
    error::{AppError, Result},
    models::{ChallengeRecord, PlayerStats},
    utils::{ensure_address, format_address},
};

/// A connected player: the account plus the contract facade it talks to.
///
/// Sessions are plain values. Connecting builds a new one, disconnecting
/// consumes it; nothing is stored globally.
#[derive(Clone)]
pub struct Session {
    account: String,
    contract: WildGuess,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionInfo {
    pub account: String,
    pub display_address: String,
    pub contract_address: String,
    pub chain_id: Option<String>,
}

impl Session {
    /// Validates the account and checks the node is on `expected_chain_id`.
    pub async fn connect(contract: WildGuess, account: &str, expected_chain_id: &str) -> Result<Self> {
        let account = ensure_address(account)?;
        let actual = contract.transport().chain_id().await?;
        if !same_chain(&actual, expected_chain_id) {
            return Err(AppError::WrongNetwork {
                expected: expected_chain_id.to_string(),
                actual,
            });
        }
        tracing::info!(account = %format_address(&account), chain_id = %actual, "session connected");
        Ok(Self { account, contract })
    }

    /// Rebuilds a session for an account without touching the network.
    pub fn resume(contract: WildGuess, account: &str) -> Result<Self> {
        let account = ensure_address(account)?;
        Ok(Self { account, contract })
    }

    pub fn disconnect(self) -> SessionInfo {
        tracing::info!(account = %format_address(&self.account), "session disconnected");
        self.info(None)
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn contract(&self) -> &WildGuess {
        &self.contract
    }

    pub async fn player_stats(&self) -> Result<PlayerStats> {
        self.contract.get_player_stats(&self.account).await
    }

    pub async fn player_challenges(&self, limit: u32) -> Result<Vec<ChallengeRecord>> {
        self.contract.get_player_challenges(&self.account, limit).await
    }

    pub fn info(&self, chain_id: Option<String>) -> SessionInfo {
        SessionInfo {
            account: self.account.clone(),
            display_address: format_address(&self.account),
            contract_address: self.contract.address().to_string(),
            chain_id,
        }
    }
}

// Chain ids may come back as hex with different padding or as decimal.
pub fn same_chain(actual: &str, expected: &str) -> bool {
    match (parse_chain_id(actual), parse_chain_id(expected)) {
        (Some(a), Some(b)) => a == b,
        _ => actual.trim().eq_ignore_ascii_case(expected.trim()),
    }
}

fn parse_chain_id(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    match trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        Some(hex_digits) => u64::from_str_radix(hex_digits, 16).ok(),
        None => trimmed.parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genlayer::fake::{FakeTransport, ReadStep};
    use std::sync::Arc;

    const CONTRACT: &str = "0x21Ab0638F4f0FbcD5C1c87d1423b3874cDb69307";
    const PLAYER: &str = "0x1111111111111111111111111111111111111111";

    fn contract(fake: FakeTransport) -> WildGuess {
        WildGuess::new(CONTRACT, Arc::new(fake))
    }

    #[tokio::test]
    async fn connect_checks_chain_id() {
        let session = Session::connect(contract(FakeTransport::new()), PLAYER, "0xf22f")
            .await
            .expect("connect should succeed");
        assert_eq!(session.account(), PLAYER);
        assert_eq!(session.info(None).display_address, "0x1111...1111");
    }

    #[tokio::test]
    async fn connect_accepts_decimal_chain_id() {
        let fake = FakeTransport::new().with_chain_id("61999");
        assert!(Session::connect(contract(fake), PLAYER, "0xf22f").await.is_ok());
    }

    #[tokio::test]
    async fn connect_rejects_wrong_network() {
        let fake = FakeTransport::new().with_chain_id("0x1");
        let err = Session::connect(contract(fake), PLAYER, "0xf22f")
            .await
            .err()
            .expect("wrong network should fail");
        assert!(matches!(err, AppError::WrongNetwork { actual, .. } if actual == "0x1"));
    }

    #[test]
    fn resume_rejects_malformed_accounts() {
        let err = Session::resume(contract(FakeTransport::new()), "alice")
            .err()
            .expect("invalid address should fail");
        assert!(matches!(err, AppError::InvalidAddress(_)));
    }

    #[tokio::test]
    async fn reads_are_scoped_to_the_session_account() {
        let fake = Arc::new(FakeTransport::new().script(
            "get_player_stats",
            vec![ReadStep::Ok(serde_json::json!({ "wins": 1 }))],
        ));
        let session = Session::resume(WildGuess::new(CONTRACT, fake.clone()), PLAYER).unwrap();

        session.player_stats().await.unwrap();
        session.player_challenges(10).await.unwrap();

        let calls = fake.calls();
        assert_eq!(calls[0], ("get_player_stats".to_string(), vec![serde_json::json!(PLAYER)]));
        assert_eq!(calls[1].1, vec![serde_json::json!(PLAYER), serde_json::json!(10)]);
    }

    #[test]
    fn disconnect_consumes_the_session() {
        let session = Session::resume(contract(FakeTransport::new()), PLAYER).unwrap();
        let info = session.disconnect();
        assert_eq!(info.account, PLAYER);
        assert_eq!(info.contract_address, CONTRACT);
    }
}
