//! Connectivity to the chain.
//!
//! [`Provider`] is the seam to the external wallet or node; [`ProviderGateway`]
//! detects one and hands out a shared handle to it.

pub mod json_rpc;

use crate::descriptor::NetworkId;
use crate::Result;
use alloy_dyn_abi::DynSolValue;
use alloy_json_abi::Function;
use alloy_primitives::{Address, B256};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub use json_rpc::{JsonRpcGateway, JsonRpcProvider};

/// Shared handle to a detected provider
pub type ProviderHandle = Arc<dyn Provider>;

/// Failures reported by a provider, before they are mapped onto the
/// session's error taxonomy.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProviderError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("request rejected: {0}")]
    Rejected(String),

    #[error("execution reverted: {0}")]
    Reverted(String),

    #[error("out of gas: {0}")]
    OutOfGas(String),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("malformed response: {0}")]
    Decode(String),

    /// The provider accepted the transaction and returned its hash, but no
    /// receipt could be obtained afterwards.
    #[error("transaction {transaction_hash} sent but not confirmed: {reason}")]
    Unconfirmed {
        transaction_hash: B256,
        reason: String,
    },
}

/// A read-only contract call
#[derive(Debug, Clone, PartialEq)]
pub struct CallRequest {
    pub to: Address,
    pub function: Function,
    pub args: Vec<DynSolValue>,
    pub from: Address,
}

/// A state-changing contract call. Built per submission and never reused.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRequest {
    pub to: Address,
    pub function: Function,
    pub args: Vec<DynSolValue>,
    pub sender: Address,
    pub gas_limit: u64,
}

/// Outcome of a mined transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: B256,
    pub block_number: Option<u64>,
    pub gas_used: u64,
    /// `true` when execution succeeded
    pub status: bool,
}

#[async_trait]
pub trait Provider: Send + Sync {
    /// Addresses controlled by this session, default signer first.
    async fn get_accounts(&self) -> std::result::Result<Vec<Address>, ProviderError>;

    async fn get_network_id(&self) -> std::result::Result<NetworkId, ProviderError>;

    /// Execute a read-only call and decode its return values.
    async fn call(&self, request: &CallRequest)
        -> std::result::Result<Vec<DynSolValue>, ProviderError>;

    /// Submit a transaction and wait for its receipt.
    async fn send(
        &self,
        request: &TransactionRequest,
    ) -> std::result::Result<TransactionReceipt, ProviderError>;
}

#[async_trait]
pub trait ProviderGateway: Send + Sync {
    /// Detect a provider. Fails with `ProviderUnavailable` when none answers.
    async fn acquire(&self) -> Result<ProviderHandle>;
}
