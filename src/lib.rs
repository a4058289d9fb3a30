pub mod binding;
pub mod cli;
pub mod config;
pub mod controller;
pub mod descriptor;
pub mod logging;
pub mod provider;
pub mod session;
pub mod ui;
pub mod utils;
use alloy_primitives::{Address, B256};
use miette::Diagnostic;

pub use binding::ContractBinding;
pub use controller::{InteractionController, QueryResult};
pub use descriptor::{ContractDescriptor, NetworkId};
pub use provider::{Provider, ProviderGateway, ProviderHandle, TransactionReceipt};
pub use session::{
    initializer::SessionInitializer,
    state::{QueryState, SessionState, SessionStateMachine, StateSnapshot, SubmitState},
    ContractHandle, Session,
};

/// Result type alias for session operations
pub type Result<T> = std::result::Result<T, SessionError>;

/// Error types for session bootstrap and contract interaction
#[derive(Debug, Clone, PartialEq, thiserror::Error, Diagnostic)]
pub enum SessionError {
    #[error("No blockchain provider available: {0}")]
    #[diagnostic(
        code(session::provider_unavailable),
        help("Start a local node (e.g. `ganache` or `anvil` on port 8545) or set `[provider] endpoints` in .contract-session.toml.")
    )]
    ProviderUnavailable(String),

    #[error("No accounts available: {0}")]
    #[diagnostic(
        code(session::no_accounts),
        help("Unlock an account in your wallet or node and grant this application access to it.")
    )]
    NoAccountsAvailable(String),

    #[error("Failed to query the network id: {0}")]
    #[diagnostic(
        code(session::network_query_failed),
        help("The provider did not answer `net_version`. Check that the endpoint is reachable.")
    )]
    NetworkQueryError(String),

    #[error("Contract is not deployed on network {network}")]
    #[diagnostic(
        code(session::contract_unavailable),
        help("Switch to a network listed in the artifact's `networks` table or deploy the contract there.")
    )]
    ContractUnavailable { network: NetworkId },

    #[error("Call to `{method}` failed: {reason}")]
    #[diagnostic(code(session::contract_call_failed))]
    ContractCallError { method: String, reason: String },

    #[error("Transaction rejected: {0}")]
    #[diagnostic(
        code(session::transaction_rejected),
        help("The provider or the user declined the transaction. Nothing was sent; submit it again to retry.")
    )]
    TransactionRejected(String),

    #[error("Transaction `{method}` could not be sent: {reason}")]
    #[diagnostic(
        code(session::transaction_not_sent),
        help("The provider did not return a transaction hash. Check the account's pending transactions before retrying.")
    )]
    TransactionNotSent { method: String, reason: String },

    #[error("Transaction `{method}` was sent as {transaction_hash} but is not confirmed: {reason}")]
    #[diagnostic(
        code(session::transaction_unconfirmed),
        help("The transaction was broadcast and may still be mined. Look up its hash before submitting again.")
    )]
    TransactionUnconfirmed {
        method: String,
        transaction_hash: B256,
        reason: String,
    },

    #[error("Transaction `{method}` reverted: {reason}")]
    #[diagnostic(code(session::transaction_reverted))]
    TransactionReverted { method: String, reason: String },

    #[error("Transaction ran out of gas (limit {gas_limit})")]
    #[diagnostic(
        code(session::gas_limit_exceeded),
        help("Resubmit with a larger `--gas-limit`.")
    )]
    GasLimitExceeded { gas_limit: u64 },

    #[error("Session is not ready")]
    #[diagnostic(
        code(session::not_ready),
        help("Contract calls are only allowed once the session has initialized successfully.")
    )]
    SessionNotReady,

    #[error("Sender {0} is not one of the session's accounts")]
    #[diagnostic(code(session::unauthorized_sender))]
    UnauthorizedSender(Address),

    #[error("Invalid arguments: {0}")]
    #[diagnostic(
        code(session::invalid_arguments),
        help("Arguments are a JSON array matching the method's parameters. Example: --args '[\"0x…\", 1000]'.")
    )]
    InvalidArguments(String),

    #[error("Failed to load contract artifact: {0}")]
    #[diagnostic(
        code(session::artifact_error),
        help("Point `[contract] artifact` at the JSON file produced by the compile/migrate step.")
    )]
    ArtifactError(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(session::config_error))]
    ConfigError(String),

    #[error("Initialization {generation} was superseded by a newer one")]
    #[diagnostic(code(session::superseded))]
    Superseded { generation: u64 },
}

impl SessionError {
    /// Whether the error belongs to the initialization phase.
    pub fn is_initialization_failure(&self) -> bool {
        matches!(
            self,
            SessionError::ProviderUnavailable(_)
                | SessionError::NoAccountsAvailable(_)
                | SessionError::NetworkQueryError(_)
        )
    }
}
