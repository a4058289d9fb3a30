use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address, B256};
use async_trait::async_trait;
use contract_session::provider::{
    CallRequest, Provider, ProviderError, TransactionReceipt, TransactionRequest,
};
use contract_session::NetworkId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Gas reported by receipts that were not scripted explicitly
pub const DEFAULT_GAS_USED: u64 = 21_000;

/// A provider call observed by a [`MockProvider`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    GetAccounts,
    GetNetworkId,
    Call {
        method: String,
        to: Address,
        from: Address,
    },
    Send {
        method: String,
        to: Address,
        sender: Address,
        gas_limit: u64,
    },
}

/// In-memory provider returning scripted responses.
///
/// Build one with [`MockProviderBuilder`](crate::MockProviderBuilder).
pub struct MockProvider {
    pub(crate) accounts: Result<Vec<Address>, ProviderError>,
    pub(crate) network: Result<NetworkId, ProviderError>,
    pub(crate) call_results: HashMap<String, Result<Vec<DynSolValue>, ProviderError>>,
    pub(crate) send_results: HashMap<String, Result<TransactionReceipt, ProviderError>>,
    pub(crate) network_gate: Option<Arc<Notify>>,
    pub(crate) calls: Mutex<Vec<RecordedCall>>,
}

impl MockProvider {
    fn record(&self, call: RecordedCall) {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(call);
    }

    /// Every provider call so far, in order
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).clone()
    }

    /// Contract calls and transactions only
    pub fn contract_calls(&self) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|call| matches!(call, RecordedCall::Call { .. } | RecordedCall::Send { .. }))
            .collect()
    }

    fn send_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, RecordedCall::Send { .. }))
            .count()
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn get_accounts(&self) -> Result<Vec<Address>, ProviderError> {
        self.record(RecordedCall::GetAccounts);
        self.accounts.clone()
    }

    async fn get_network_id(&self) -> Result<NetworkId, ProviderError> {
        self.record(RecordedCall::GetNetworkId);
        if let Some(gate) = &self.network_gate {
            gate.notified().await;
        }
        self.network.clone()
    }

    async fn call(&self, request: &CallRequest) -> Result<Vec<DynSolValue>, ProviderError> {
        let method = request.function.name.clone();
        self.record(RecordedCall::Call {
            method: method.clone(),
            to: request.to,
            from: request.from,
        });
        self.call_results.get(&method).cloned().unwrap_or_else(|| {
            Err(ProviderError::Reverted(format!(
                "no mock result for {}",
                method
            )))
        })
    }

    async fn send(
        &self,
        request: &TransactionRequest,
    ) -> Result<TransactionReceipt, ProviderError> {
        let method = request.function.name.clone();
        self.record(RecordedCall::Send {
            method: method.clone(),
            to: request.to,
            sender: request.sender,
            gas_limit: request.gas_limit,
        });
        match self.send_results.get(&method) {
            Some(result) => result.clone(),
            None => Ok(TransactionReceipt {
                transaction_hash: B256::with_last_byte(self.send_count() as u8),
                block_number: Some(self.send_count() as u64),
                gas_used: DEFAULT_GAS_USED,
                status: true,
            }),
        }
    }
}
