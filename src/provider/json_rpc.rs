//! Ethereum JSON-RPC provider over HTTP.

use super::{
    CallRequest, Provider, ProviderError, ProviderGateway, ProviderHandle, TransactionReceipt,
    TransactionRequest,
};
use crate::descriptor::NetworkId;
use crate::{Result, SessionError};
use alloy_dyn_abi::{DynSolValue, FunctionExt, JsonAbiExt};
use alloy_primitives::{Address, Bytes, B256, U64};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Endpoint used when no endpoint is configured
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8545";

/// Default interval between `eth_getTransactionReceipt` polls
pub const DEFAULT_RECEIPT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// EIP-1193 "user rejected request"
const USER_REJECTED_CODE: i64 = 4001;
/// Geth/anvil code for reverted execution carrying revert data
const EXECUTION_REVERTED_CODE: i64 = 3;

#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<JsonRpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcErrorObject {
    code: i64,
    message: String,
    #[serde(default)]
    data: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RpcReceipt {
    transaction_hash: B256,
    #[serde(default)]
    block_number: Option<U64>,
    gas_used: U64,
    #[serde(default)]
    status: Option<U64>,
}

/// Map a JSON-RPC error object onto a [`ProviderError`].
fn classify_rpc_error(code: i64, message: &str, data: Option<&Value>) -> ProviderError {
    let lower = message.to_lowercase();
    if code == USER_REJECTED_CODE {
        return ProviderError::Rejected(message.to_string());
    }
    if lower.contains("out of gas")
        || lower.contains("gas required exceeds")
        || lower.contains("intrinsic gas too low")
    {
        return ProviderError::OutOfGas(message.to_string());
    }
    if code == EXECUTION_REVERTED_CODE || lower.contains("revert") {
        let reason = match data.and_then(Value::as_str) {
            Some(data) => format!("{} ({})", message, data),
            None => message.to_string(),
        };
        return ProviderError::Reverted(reason);
    }
    if lower.contains("user denied") || lower.contains("rejected") {
        return ProviderError::Rejected(message.to_string());
    }
    ProviderError::Rpc {
        code,
        message: message.to_string(),
    }
}

impl From<RpcReceipt> for TransactionReceipt {
    fn from(raw: RpcReceipt) -> Self {
        TransactionReceipt {
            transaction_hash: raw.transaction_hash,
            block_number: raw.block_number.map(|number| number.to::<u64>()),
            gas_used: raw.gas_used.to::<u64>(),
            // Pre-Byzantium receipts carry no status; treat them as successful.
            status: raw.status.map_or(true, |status| status == U64::from(1)),
        }
    }
}

/// A provider speaking Ethereum JSON-RPC to a single HTTP endpoint
pub struct JsonRpcProvider {
    url: String,
    client: reqwest::Client,
    next_id: AtomicU64,
    receipt_poll_interval: Duration,
}

impl JsonRpcProvider {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
            next_id: AtomicU64::new(1),
            receipt_poll_interval: DEFAULT_RECEIPT_POLL_INTERVAL,
        }
    }

    pub fn with_receipt_poll_interval(mut self, interval: Duration) -> Self {
        self.receipt_poll_interval = interval;
        self
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> std::result::Result<T, ProviderError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let payload = JsonRpcRequest {
            jsonrpc: "2.0",
            id,
            method,
            params,
        };
        debug!(id, method, url = %self.url, "JSON-RPC request");

        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;
        let response: JsonRpcResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))?;

        if let Some(error) = response.error {
            return Err(classify_rpc_error(
                error.code,
                &error.message,
                error.data.as_ref(),
            ));
        }
        serde_json::from_value(response.result.unwrap_or(Value::Null))
            .map_err(|e| ProviderError::Decode(format!("{}: {}", method, e)))
    }

    /// `web3_clientVersion`, used to detect that the endpoint is alive
    pub async fn client_version(&self) -> std::result::Result<String, ProviderError> {
        self.request("web3_clientVersion", json!([])).await
    }

    fn encode_input(
        function: &alloy_json_abi::Function,
        args: &[DynSolValue],
    ) -> std::result::Result<String, ProviderError> {
        let data = function
            .abi_encode_input(args)
            .map_err(|e| ProviderError::Decode(format!("cannot encode {}: {}", function.name, e)))?;
        Ok(format!("0x{}", hex::encode(data)))
    }

    async fn wait_for_receipt(
        &self,
        hash: B256,
    ) -> std::result::Result<TransactionReceipt, ProviderError> {
        loop {
            let receipt: Option<RpcReceipt> = self
                .request("eth_getTransactionReceipt", json!([hash]))
                .await?;
            if let Some(receipt) = receipt {
                return Ok(receipt.into());
            }
            debug!(%hash, "Receipt not available yet");
            tokio::time::sleep(self.receipt_poll_interval).await;
        }
    }
}

#[async_trait]
impl Provider for JsonRpcProvider {
    async fn get_accounts(&self) -> std::result::Result<Vec<Address>, ProviderError> {
        self.request("eth_accounts", json!([])).await
    }

    async fn get_network_id(&self) -> std::result::Result<NetworkId, ProviderError> {
        let version: String = self.request("net_version", json!([])).await?;
        version
            .parse::<NetworkId>()
            .map_err(|e| ProviderError::Decode(format!("invalid net_version {:?}: {}", version, e)))
    }

    async fn call(
        &self,
        request: &CallRequest,
    ) -> std::result::Result<Vec<DynSolValue>, ProviderError> {
        let data = Self::encode_input(&request.function, &request.args)?;
        let output: Bytes = self
            .request(
                "eth_call",
                json!([{ "from": request.from, "to": request.to, "data": data }, "latest"]),
            )
            .await?;
        request.function.abi_decode_output(&output).map_err(|e| {
            ProviderError::Decode(format!(
                "cannot decode {} output: {}",
                request.function.name, e
            ))
        })
    }

    async fn send(
        &self,
        request: &TransactionRequest,
    ) -> std::result::Result<TransactionReceipt, ProviderError> {
        let data = Self::encode_input(&request.function, &request.args)?;
        let hash: B256 = self
            .request(
                "eth_sendTransaction",
                json!([{
                    "from": request.sender,
                    "to": request.to,
                    "data": data,
                    "gas": format!("{:#x}", request.gas_limit),
                }]),
            )
            .await?;
        info!(%hash, method = %request.function.name, "Transaction accepted, awaiting receipt");
        self.wait_for_receipt(hash)
            .await
            .map_err(|e| ProviderError::Unconfirmed {
                transaction_hash: hash,
                reason: e.to_string(),
            })
    }
}

/// Detects a JSON-RPC endpoint from an ordered list of candidates
pub struct JsonRpcGateway {
    endpoints: Vec<String>,
    receipt_poll_interval: Duration,
}

impl JsonRpcGateway {
    pub fn new(endpoints: Vec<String>) -> Self {
        Self {
            endpoints,
            receipt_poll_interval: DEFAULT_RECEIPT_POLL_INTERVAL,
        }
    }

    pub fn with_receipt_poll_interval(mut self, interval: Duration) -> Self {
        self.receipt_poll_interval = interval;
        self
    }

    /// Endpoints tried by `acquire`, in order
    pub fn candidates(&self) -> Vec<&str> {
        if self.endpoints.is_empty() {
            vec![DEFAULT_ENDPOINT]
        } else {
            self.endpoints.iter().map(String::as_str).collect()
        }
    }
}

#[async_trait]
impl ProviderGateway for JsonRpcGateway {
    async fn acquire(&self) -> Result<ProviderHandle> {
        let candidates = self.candidates();
        for endpoint in candidates.iter().copied() {
            let provider = JsonRpcProvider::new(endpoint)
                .with_receipt_poll_interval(self.receipt_poll_interval);
            match provider.client_version().await {
                Ok(version) => {
                    info!(endpoint, version = %version, "Provider detected");
                    return Ok(Arc::new(provider));
                }
                Err(e) => warn!(endpoint, error = %e, "Endpoint did not answer"),
            }
        }
        Err(SessionError::ProviderUnavailable(format!(
            "no provider answered at {}",
            candidates.join(", ")
        )))
    }
}
