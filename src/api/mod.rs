// src/api/mod.rs

pub mod challenge;
pub mod health;
pub mod leaderboard;
pub mod player;
pub mod session;
pub mod upload;

use std::sync::Arc;

use crate::{
    config::Config,
    contracts::WildGuess,
    error::Result,
    genlayer::{ContractTransport, GenlayerClient},
    integrations::ImgbbClient,
    services::ChallengeService,
    session::Session,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub contract: WildGuess,
    pub challenges: ChallengeService,
    pub uploader: ImgbbClient,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let transport: Arc<dyn ContractTransport> = Arc::new(GenlayerClient::new(
            config.genlayer_rpc_url.clone(),
            config.rpc_timeout(),
        )?);
        Self::with_transport(config, transport)
    }

    pub fn with_transport(config: Config, transport: Arc<dyn ContractTransport>) -> Result<Self> {
        let contract = WildGuess::new(config.contract_address.clone(), transport);
        let challenges = ChallengeService::from_config(&config);
        let uploader = ImgbbClient::new(
            config.imgbb_api_url.clone(),
            config.imgbb_api_key.clone(),
            config.rpc_timeout(),
        )?;
        Ok(Self {
            config,
            contract,
            challenges,
            uploader,
        })
    }

    /// Session for an account named in the request, without a network check.
    pub fn session(&self, account: &str) -> Result<Session> {
        Session::resume(self.contract.clone(), account)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::{config::test_config, genlayer::fake::FakeTransport};

    pub const PLAYER: &str = "0x1111111111111111111111111111111111111111";

    pub fn state(fake: FakeTransport) -> (AppState, Arc<FakeTransport>) {
        let fake = Arc::new(fake);
        let state = AppState::with_transport(test_config(), fake.clone()).unwrap();
        (state, fake)
    }
}
