//! Scripted in-process transport used by unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use serde_json::Value;

use super::ContractTransport;
use crate::error::{AppError, Result};

#[derive(Clone)]
pub enum ReadStep {
    Ok(Value),
    Fail(String),
}

pub struct FakeTransport {
    chain_id: String,
    write_error: Option<String>,
    reads: Mutex<HashMap<String, VecDeque<ReadStep>>>,
    calls: Mutex<Vec<(String, Vec<Value>)>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self {
            chain_id: crate::constants::DEFAULT_GENLAYER_CHAIN_ID.to_string(),
            write_error: None,
            reads: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_chain_id(mut self, chain_id: &str) -> Self {
        self.chain_id = chain_id.to_string();
        self
    }

    pub fn failing_writes(mut self, message: &str) -> Self {
        self.write_error = Some(message.to_string());
        self
    }

    /// Queues responses for `method`; the last step repeats once the queue drains.
    pub fn script(self, method: &str, steps: Vec<ReadStep>) -> Self {
        self.reads
            .lock()
            .unwrap()
            .insert(method.to_string(), steps.into_iter().collect());
        self
    }

    pub fn calls(&self) -> Vec<(String, Vec<Value>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, method: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(name, _)| name == method)
            .count()
    }

    fn next_read(&self, method: &str) -> ReadStep {
        let mut reads = self.reads.lock().unwrap();
        match reads.get_mut(method) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or(ReadStep::Ok(Value::Null)),
            Some(queue) => queue.front().cloned().unwrap_or(ReadStep::Ok(Value::Null)),
            None => ReadStep::Ok(Value::Null),
        }
    }
}

#[async_trait::async_trait]
impl ContractTransport for FakeTransport {
    async fn call_contract_method(
        &self,
        _contract_address: &str,
        _from: &str,
        method: &str,
        args: Vec<Value>,
    ) -> Result<String> {
        self.calls.lock().unwrap().push((method.to_string(), args));
        match &self.write_error {
            Some(message) => Err(AppError::BlockchainRPC(message.clone())),
            None => Ok("0xfeedbeef".to_string()),
        }
    }

    async fn read_contract_method(
        &self,
        _contract_address: &str,
        _from: Option<&str>,
        method: &str,
        args: Vec<Value>,
    ) -> Result<Value> {
        self.calls.lock().unwrap().push((method.to_string(), args));
        match self.next_read(method) {
            ReadStep::Ok(value) => Ok(value),
            ReadStep::Fail(message) => Err(AppError::BlockchainRPC(message)),
        }
    }

    async fn chain_id(&self) -> Result<String> {
        Ok(self.chain_id.clone())
    }
}
