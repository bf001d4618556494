use std::sync::Arc;

use serde_json::{json, Value};

use crate::{
    error::{AppError, Result},
    genlayer::ContractTransport,
    models::{ChallengeRecord, LeaderboardRecord, PlayerStats, Record, SubmitAck},
};

/// Typed facade over the deployed `WildGuess` contract.
///
/// Each method is a single RPC call; nothing is retried or cached and
/// transport errors come back unchanged. Decoded values are normalized into
/// [`Record`]s here and converted into typed rows before returning.
#[derive(Clone)]
pub struct WildGuess {
    contract_address: String,
    transport: Arc<dyn ContractTransport>,
}

impl WildGuess {
    pub fn new(contract_address: impl Into<String>, transport: Arc<dyn ContractTransport>) -> Self {
        Self {
            contract_address: contract_address.into(),
            transport,
        }
    }

    pub fn address(&self) -> &str {
        &self.contract_address
    }

    pub fn transport(&self) -> &Arc<dyn ContractTransport> {
        &self.transport
    }

    // Write method
    pub async fn submit_challenge(
        &self,
        player: &str,
        image_url: &str,
        correct_animal: &str,
    ) -> Result<SubmitAck> {
        let tx_hash = self
            .transport
            .call_contract_method(
                &self.contract_address,
                player,
                "submit_challenge",
                vec![json!(player), json!(image_url), json!(correct_animal)],
            )
            .await?;
        Ok(SubmitAck { tx_hash })
    }

    // Read methods
    pub async fn get_challenge(&self, challenge_id: u64) -> Result<ChallengeRecord> {
        let record = Record::from_value(self.read("get_challenge", vec![json!(challenge_id)]).await?)?;
        if record.contains("error") {
            return Err(AppError::NotFound(record.str_or(
                &["error"],
                &format!("Challenge {challenge_id} not found"),
            )));
        }
        Ok(ChallengeRecord::from(&record))
    }

    pub async fn get_player_stats(&self, player: &str) -> Result<PlayerStats> {
        let record = Record::from_value(self.read("get_player_stats", vec![json!(player)]).await?)?;
        Ok(PlayerStats::from(&record))
    }

    pub async fn get_recent_challenges(&self, limit: u32) -> Result<Vec<ChallengeRecord>> {
        let value = self.read("get_recent_challenges", vec![json!(limit)]).await?;
        Ok(Record::list_from_value(value)?
            .iter()
            .map(ChallengeRecord::from)
            .collect())
    }

    pub async fn get_player_challenges(
        &self,
        player: &str,
        limit: u32,
    ) -> Result<Vec<ChallengeRecord>> {
        let value = self
            .read("get_player_challenges", vec![json!(player), json!(limit)])
            .await?;
        Ok(Record::list_from_value(value)?
            .iter()
            .map(ChallengeRecord::from)
            .collect())
    }

    pub async fn get_leaderboard(&self, limit: u32) -> Result<Vec<LeaderboardRecord>> {
        let value = self.read("get_leaderboard", vec![json!(limit)]).await?;
        Ok(Record::list_from_value(value)?
            .iter()
            .map(LeaderboardRecord::from)
            .collect())
    }

    async fn read(&self, method: &str, args: Vec<Value>) -> Result<Value> {
        self.transport
            .read_contract_method(&self.contract_address, None, method, args)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genlayer::fake::{FakeTransport, ReadStep};

    const CONTRACT: &str = "0x21Ab0638F4f0FbcD5C1c87d1423b3874cDb69307";
    const PLAYER: &str = "0x1111111111111111111111111111111111111111";

    fn facade(fake: FakeTransport) -> (WildGuess, Arc<FakeTransport>) {
        let fake = Arc::new(fake);
        (WildGuess::new(CONTRACT, fake.clone()), fake)
    }

    #[tokio::test]
    async fn submit_passes_arguments_in_contract_order() {
        let (contract, fake) = facade(FakeTransport::new());
        let ack = contract
            .submit_challenge(PLAYER, "https://x/cat.jpg", "Cat")
            .await
            .expect("submit should succeed");
        assert_eq!(ack.tx_hash, "0xfeedbeef");
        assert_eq!(
            fake.calls(),
            vec![(
                "submit_challenge".to_string(),
                vec![json!(PLAYER), json!("https://x/cat.jpg"), json!("Cat")]
            )]
        );
    }

    #[tokio::test]
    async fn submit_errors_propagate_unchanged() {
        let (contract, _) = facade(FakeTransport::new().failing_writes("user rejected"));
        let err = contract
            .submit_challenge(PLAYER, "https://x/cat.jpg", "Cat")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BlockchainRPC(msg) if msg == "user rejected"));
    }

    #[tokio::test]
    async fn player_challenges_accept_map_shaped_entries() {
        let (contract, fake) = facade(FakeTransport::new().script(
            "get_player_challenges",
            vec![ReadStep::Ok(json!([
                [["correct_animal", "cat"], ["image_url", "https://x/cat.jpg"], ["challenge_id", "4n"]],
                { "correct_animal": "dog", "image_url": "https://x/dog.jpg", "challenge_id": 3 }
            ]))],
        ));
        let rows = contract.get_player_challenges(PLAYER, 3).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].challenge_id, Some(4));
        assert_eq!(rows[1].correct_animal, "dog");
        assert_eq!(fake.calls()[0].1, vec![json!(PLAYER), json!(3)]);
    }

    #[tokio::test]
    async fn missing_challenge_is_not_found() {
        let (contract, _) = facade(FakeTransport::new().script(
            "get_challenge",
            vec![ReadStep::Ok(json!({ "error": "Challenge not found" }))],
        ));
        let err = contract.get_challenge(99).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(msg) if msg == "Challenge not found"));
    }

    #[tokio::test]
    async fn stats_default_missing_counters_to_zero() {
        let (contract, _) = facade(FakeTransport::new().script(
            "get_player_stats",
            vec![ReadStep::Ok(json!({ "player": PLAYER, "wins": "2" }))],
        ));
        let stats = contract.get_player_stats(PLAYER).await.unwrap();
        assert_eq!(stats.wins, 2);
        assert_eq!(stats.total_challenges, 0);
        assert_eq!(stats.win_rate, "0%");
    }
}
