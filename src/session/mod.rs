//! Session bootstrap
//!
//! A [`Session`] binds one provider, the accounts it grants, the network it
//! is connected to and the contract deployed there. Sessions are built only
//! by the [`SessionInitializer`](initializer::SessionInitializer) and are
//! never patched: re-initialization publishes a new value.

pub mod accounts;
pub mod initializer;
pub mod resolver;
pub mod state;

use crate::descriptor::NetworkId;
use crate::provider::ProviderHandle;
use alloy_json_abi::JsonAbi;
use alloy_primitives::Address;
use std::fmt;
use std::sync::Arc;

pub use accounts::AccountDirectory;
pub use initializer::SessionInitializer;
pub use resolver::ContractResolver;
pub use state::{QueryState, SessionState, SessionStateMachine, StateSnapshot, SubmitState};

/// A contract interface bound to the address it has on the current network.
///
/// `address` is `None` when the network has no deployment. That is a valid,
/// degraded handle: calls against it fail with `ContractUnavailable`.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractHandle {
    interface: Arc<JsonAbi>,
    address: Option<Address>,
}

impl ContractHandle {
    pub fn new(interface: Arc<JsonAbi>, address: Option<Address>) -> Self {
        Self { interface, address }
    }

    pub fn interface(&self) -> &JsonAbi {
        &self.interface
    }

    pub fn address(&self) -> Option<Address> {
        self.address
    }

    pub fn is_deployed(&self) -> bool {
        self.address.is_some()
    }
}

/// A fully initialized session
pub struct Session {
    provider: ProviderHandle,
    accounts: Vec<Address>,
    network_id: NetworkId,
    contract: ContractHandle,
}

impl Session {
    /// Only the initializer assembles sessions, and only from complete parts.
    pub(crate) fn new(
        provider: ProviderHandle,
        accounts: Vec<Address>,
        network_id: NetworkId,
        contract: ContractHandle,
    ) -> Self {
        debug_assert!(!accounts.is_empty());
        Self {
            provider,
            accounts,
            network_id,
            contract,
        }
    }

    pub fn provider(&self) -> &ProviderHandle {
        &self.provider
    }

    pub fn accounts(&self) -> &[Address] {
        &self.accounts
    }

    /// The first account, used as the signer when none is specified
    pub fn default_account(&self) -> Address {
        self.accounts[0]
    }

    pub fn has_account(&self, address: &Address) -> bool {
        self.accounts.contains(address)
    }

    pub fn network_id(&self) -> NetworkId {
        self.network_id
    }

    pub fn contract(&self) -> &ContractHandle {
        &self.contract
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("accounts", &self.accounts)
            .field("network_id", &self.network_id)
            .field("contract_address", &self.contract.address)
            .finish_non_exhaustive()
    }
}
