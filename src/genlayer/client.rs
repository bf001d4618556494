use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use crate::{
    constants::{RPC_METHOD_CHAIN_ID, RPC_METHOD_READ, RPC_METHOD_WRITE, ZERO_ADDRESS},
    error::{AppError, Result},
};

fn rpc_request(method: &str, params: Value) -> Value {
    serde_json::json!({
        "jsonrpc": "2.0",
        "method": method,
        "params": params,
        "id": 1
    })
}

fn contract_calldata(method: &str, args: &[Value]) -> Value {
    serde_json::json!({
        "method": method,
        "args": args
    })
}

fn read_params(contract_address: &str, from: Option<&str>, method: &str, args: &[Value]) -> Value {
    serde_json::json!([{
        "type": "read",
        "to": contract_address,
        "from": from.unwrap_or(ZERO_ADDRESS),
        "data": contract_calldata(method, args)
    }])
}

fn write_params(contract_address: &str, from: &str, method: &str, args: &[Value]) -> Value {
    serde_json::json!([{
        "from": from,
        "to": contract_address,
        "data": contract_calldata(method, args)
    }])
}

/// Generic contract primitives the game facade is written against.
#[async_trait::async_trait]
pub trait ContractTransport: Send + Sync {
    /// Sends a state-changing call and returns the transaction hash.
    async fn call_contract_method(
        &self,
        contract_address: &str,
        from: &str,
        method: &str,
        args: Vec<Value>,
    ) -> Result<String>;

    /// Runs a read-only call and returns the decoded result.
    async fn read_contract_method(
        &self,
        contract_address: &str,
        from: Option<&str>,
        method: &str,
        args: Vec<Value>,
    ) -> Result<Value>;

    async fn chain_id(&self) -> Result<String>;
}

/// GenLayer JSON-RPC client
#[derive(Clone)]
pub struct GenlayerClient {
    rpc_url: String,
    client: reqwest::Client,
}

impl GenlayerClient {
    pub fn new(rpc_url: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("failed to build RPC client: {e}")))?;
        Ok(Self { rpc_url, client })
    }

    async fn send(&self, method: &str, params: Value) -> Result<Value> {
        let request = rpc_request(method, params);

        let response = self
            .client
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::BlockchainRPC(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unavailable body>".to_string());
            return Err(AppError::BlockchainRPC(format!(
                "{method} returned HTTP {status}: {body}"
            )));
        }

        let envelope: RpcResponse = response
            .json()
            .await
            .map_err(|e| AppError::BlockchainRPC(e.to_string()))?;

        envelope.into_result(method)
    }
}

#[async_trait::async_trait]
impl ContractTransport for GenlayerClient {
    async fn call_contract_method(
        &self,
        contract_address: &str,
        from: &str,
        method: &str,
        args: Vec<Value>,
    ) -> Result<String> {
        tracing::debug!(method, contract = contract_address, "contract write");
        let result = self
            .send(RPC_METHOD_WRITE, write_params(contract_address, from, method, &args))
            .await?;
        match result {
            Value::String(hash) if !hash.trim().is_empty() => Ok(hash),
            other => Err(AppError::Decode(format!(
                "{method}: expected a transaction hash, got {other}"
            ))),
        }
    }

    async fn read_contract_method(
        &self,
        contract_address: &str,
        from: Option<&str>,
        method: &str,
        args: Vec<Value>,
    ) -> Result<Value> {
        tracing::debug!(method, contract = contract_address, "contract read");
        self.send(RPC_METHOD_READ, read_params(contract_address, from, method, &args))
            .await
    }

    async fn chain_id(&self) -> Result<String> {
        match self.send(RPC_METHOD_CHAIN_ID, serde_json::json!([])).await? {
            Value::String(id) => Ok(id),
            Value::Number(n) => n
                .as_u64()
                .map(|id| format!("{id:#x}"))
                .ok_or_else(|| AppError::Decode(format!("invalid chain id {n}"))),
            other => Err(AppError::Decode(format!("invalid chain id {other}"))),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

impl RpcResponse {
    fn into_result(self, method: &str) -> Result<Value> {
        if let Some(err) = self.error {
            return Err(AppError::BlockchainRPC(format!(
                "{method} failed ({}): {}",
                err.code, err.message
            )));
        }
        Ok(self.result.unwrap_or(Value::Null))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rpc_request_sets_method_and_id() {
        let req = rpc_request("eth_chainId", json!([]));
        assert_eq!(req.get("method").and_then(|v| v.as_str()), Some("eth_chainId"));
        assert_eq!(req.get("jsonrpc").and_then(|v| v.as_str()), Some("2.0"));
        assert_eq!(req.get("id").and_then(|v| v.as_i64()), Some(1));
    }

    #[test]
    fn read_params_default_sender_is_zero_address() {
        let params = read_params("0xabc", None, "get_leaderboard", &[json!(10)]);
        let call = &params[0];
        assert_eq!(call["type"], "read");
        assert_eq!(call["to"], "0xabc");
        assert_eq!(call["from"], ZERO_ADDRESS);
        assert_eq!(call["data"]["method"], "get_leaderboard");
        assert_eq!(call["data"]["args"], json!([10]));
    }

    #[test]
    fn write_params_keep_argument_order() {
        let params = write_params(
            "0xabc",
            "0xplayer",
            "submit_challenge",
            &[json!("0xplayer"), json!("https://x/cat.jpg"), json!("Cat")],
        );
        assert_eq!(params[0]["from"], "0xplayer");
        assert_eq!(
            params[0]["data"]["args"],
            json!(["0xplayer", "https://x/cat.jpg", "Cat"])
        );
    }

    #[test]
    fn rpc_error_object_becomes_rpc_error() {
        let envelope: RpcResponse = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": { "code": -32000, "message": "execution reverted" }
        }))
        .unwrap();
        let err = envelope.into_result("gen_call").unwrap_err();
        assert!(matches!(err, AppError::BlockchainRPC(msg) if msg.contains("execution reverted")));
    }

    #[test]
    fn missing_result_decodes_as_null() {
        let envelope: RpcResponse = serde_json::from_value(json!({ "id": 1 })).unwrap();
        assert_eq!(envelope.into_result("gen_call").unwrap(), Value::Null);
    }
}
