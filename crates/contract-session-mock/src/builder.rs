use crate::mock::MockProvider;
use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address, B256, U256};
use contract_session::provider::{ProviderError, TransactionReceipt};
use contract_session::NetworkId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub struct MockProviderBuilder {
    accounts: Result<Vec<Address>, ProviderError>,
    network: Result<NetworkId, ProviderError>,
    call_results: HashMap<String, Result<Vec<DynSolValue>, ProviderError>>,
    send_results: HashMap<String, Result<TransactionReceipt, ProviderError>>,
    network_gate: Option<Arc<Notify>>,
}

impl Default for MockProviderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProviderBuilder {
    /// One account (`0x…01`) on network 1, no scripted calls.
    pub fn new() -> Self {
        Self {
            accounts: Ok(vec![Address::with_last_byte(1)]),
            network: Ok(NetworkId(1)),
            call_results: HashMap::new(),
            send_results: HashMap::new(),
            network_gate: None,
        }
    }

    pub fn with_accounts(mut self, accounts: Vec<Address>) -> Self {
        self.accounts = Ok(accounts);
        self
    }

    /// `get_accounts` fails with `error`
    pub fn with_accounts_error(mut self, error: ProviderError) -> Self {
        self.accounts = Err(error);
        self
    }

    pub fn with_network(mut self, network: u64) -> Self {
        self.network = Ok(NetworkId(network));
        self
    }

    /// `get_network_id` fails with `error`
    pub fn with_network_error(mut self, error: ProviderError) -> Self {
        self.network = Err(error);
        self
    }

    /// Hold `get_network_id` until `gate` is notified.
    pub fn with_network_gate(mut self, gate: Arc<Notify>) -> Self {
        self.network_gate = Some(gate);
        self
    }

    pub fn with_call_result(mut self, method: &str, values: Vec<DynSolValue>) -> Self {
        self.call_results.insert(method.to_string(), Ok(values));
        self
    }

    /// Shorthand for a method returning one `uint256`
    pub fn with_uint_result(self, method: &str, value: u64) -> Self {
        self.with_call_result(method, vec![DynSolValue::Uint(U256::from(value), 256)])
    }

    pub fn with_call_error(mut self, method: &str, error: ProviderError) -> Self {
        self.call_results.insert(method.to_string(), Err(error));
        self
    }

    pub fn with_send_receipt(mut self, method: &str, receipt: TransactionReceipt) -> Self {
        self.send_results.insert(method.to_string(), Ok(receipt));
        self
    }

    /// Mined receipt with a failed status
    pub fn with_failed_receipt(self, method: &str, gas_used: u64) -> Self {
        self.with_send_receipt(
            method,
            TransactionReceipt {
                transaction_hash: B256::repeat_byte(0xee),
                block_number: Some(1),
                gas_used,
                status: false,
            },
        )
    }

    pub fn with_send_error(mut self, method: &str, error: ProviderError) -> Self {
        self.send_results.insert(method.to_string(), Err(error));
        self
    }

    pub fn build(self) -> Arc<MockProvider> {
        Arc::new(MockProvider {
            accounts: self.accounts,
            network: self.network,
            call_results: self.call_results,
            send_results: self.send_results,
            network_gate: self.network_gate,
            calls: Mutex::new(Vec::new()),
        })
    }
}
