//! Structured logging utilities for contract sessions.
//!
//! This module provides helper functions for consistent, structured logging
//! across the crate using the `tracing` crate.

use crate::descriptor::NetworkId;
use crate::provider::{ProviderError, TransactionReceipt};
use crate::SessionError;
use alloy_primitives::Address;

/// Message shown to the user when initialization fails, whatever the step.
pub const INITIALIZATION_FAILED_NOTICE: &str =
    "Failed to load provider, accounts, or contract. Check the logs for details.";

/// Initialization steps, for diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitStep {
    Provider,
    Accounts,
    Network,
}

impl InitStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            InitStep::Provider => "provider",
            InitStep::Accounts => "accounts",
            InitStep::Network => "network",
        }
    }
}

/// Log the start of an initialization.
pub fn log_session_initializing(generation: u64) {
    tracing::info!(generation, "Initializing session");
}

/// Log a failed initialization step with the originating error.
pub fn log_step_failed(step: InitStep, error: &SessionError) {
    tracing::warn!(step = step.as_str(), error = %error, "Session initialization step failed");
}

/// Log the end of a failed initialization. The failing step has already
/// been logged by [`log_step_failed`]; presentation layers show
/// [`INITIALIZATION_FAILED_NOTICE`] instead of the step.
pub fn log_session_failed(generation: u64) {
    tracing::error!(generation, "Session initialization failed");
}

/// Log a published session.
pub fn log_session_ready(
    generation: u64,
    network: NetworkId,
    accounts: usize,
    contract: Option<&Address>,
) {
    match contract {
        Some(address) => tracing::info!(
            generation,
            %network,
            accounts,
            contract = %address,
            "Session ready"
        ),
        None => tracing::warn!(
            generation,
            %network,
            accounts,
            "Session ready, but the contract is not deployed on this network"
        ),
    }
}

/// Log an initialization whose outcome was discarded.
pub fn log_session_superseded(generation: u64) {
    tracing::debug!(generation, "Initialization superseded by a newer one");
}

/// Log account enumeration.
pub fn log_accounts_listed(count: usize, default_account: &Address) {
    tracing::debug!(count, default = %default_account, "Accounts listed");
}

/// Log contract binding.
pub fn log_contract_resolved(network: NetworkId, address: Option<&Address>) {
    match address {
        Some(address) => tracing::debug!(%network, %address, "Contract resolved"),
        None => tracing::debug!(%network, "No deployment on network"),
    }
}

/// Log query start.
pub fn log_query_start(method: &str, contract: &Address, caller: &Address) {
    tracing::info!(method, contract = %contract, caller = %caller, "Querying contract");
}

/// Log query completion with result.
pub fn log_query_complete(method: &str, result: &str) {
    tracing::info!(method, result, "Query completed");
}

pub fn log_query_failed(method: &str, error: &ProviderError) {
    tracing::warn!(method, error = %error, "Query failed");
}

/// Log transaction submission.
pub fn log_submit_start(method: &str, contract: &Address, sender: &Address, gas_limit: u64) {
    tracing::info!(
        method,
        contract = %contract,
        sender = %sender,
        gas_limit,
        "Submitting transaction"
    );
}

pub fn log_submit_confirmed(method: &str, receipt: &TransactionReceipt) {
    tracing::info!(
        method,
        hash = %receipt.transaction_hash,
        block = ?receipt.block_number,
        gas_used = receipt.gas_used,
        "Transaction confirmed"
    );
}

pub fn log_submit_failed(method: &str, error: &SessionError) {
    tracing::warn!(method, error = %error, "Transaction failed");
}
