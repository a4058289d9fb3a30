//! Presentation interface.
//!
//! [`ContractBinding`] ties the application's fixed read method and fixed
//! write method to a session. A presentation layer observes
//! [`ContractBinding::subscribe`] and calls [`ContractBinding::trigger_submit`];
//! it never reaches the provider or the controller directly.

use crate::controller::{InteractionController, QueryResult};
use crate::descriptor::ContractDescriptor;
use crate::provider::{ProviderGateway, TransactionReceipt};
use crate::session::{Session, SessionInitializer, SessionStateMachine, StateSnapshot};
use crate::{Result, SessionError};
use alloy_primitives::Address;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// Gas limit used by the bound write method unless configured otherwise
pub const DEFAULT_GAS_LIMIT: u64 = 5_000_000;

/// The methods and parameters the application binds to
#[derive(Debug, Clone, PartialEq)]
pub struct BindingConfig {
    pub query_method: String,
    pub query_args: Vec<Value>,
    pub submit_method: String,
    pub submit_args: Vec<Value>,
    pub gas_limit: u64,
    /// Explicit signer. Must be one of the session's accounts; when unset
    /// the session's default account is used.
    pub sender: Option<Address>,
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            query_method: "calculateNeededAAVE".to_string(),
            query_args: Vec::new(),
            submit_method: "migrateALend".to_string(),
            submit_args: Vec::new(),
            gas_limit: DEFAULT_GAS_LIMIT,
            sender: None,
        }
    }
}

pub struct ContractBinding {
    initializer: SessionInitializer,
    controller: InteractionController,
    config: BindingConfig,
}

impl ContractBinding {
    pub fn new(
        gateway: Arc<dyn ProviderGateway>,
        descriptor: Arc<ContractDescriptor>,
        config: BindingConfig,
    ) -> Self {
        let state = Arc::new(SessionStateMachine::new());
        Self {
            initializer: SessionInitializer::new(gateway, descriptor, state),
            controller: InteractionController::new(),
            config,
        }
    }

    pub fn config(&self) -> &BindingConfig {
        &self.config
    }

    pub fn state(&self) -> &Arc<SessionStateMachine> {
        self.initializer.state()
    }

    pub fn snapshot(&self) -> StateSnapshot {
        self.state().snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<StateSnapshot> {
        self.state().subscribe()
    }

    /// Initialize a session and, once it is ready, run the bound query.
    ///
    /// The query outcome lands in the query sub-state; only initialization
    /// failures are returned.
    pub async fn start(&self) -> Result<Arc<Session>> {
        let session = self.initialize().await?;
        if let Err(e) = self.refresh().await {
            debug!(error = %e, "Bound query failed after initialization");
        }
        Ok(session)
    }

    /// (Re-)initialize the session without running the bound query.
    pub async fn initialize(&self) -> Result<Arc<Session>> {
        self.initializer.initialize().await
    }

    /// The account that signs writes for `session`.
    pub fn signer(&self, session: &Session) -> Result<Address> {
        match self.config.sender {
            Some(sender) if session.has_account(&sender) => Ok(sender),
            Some(sender) => Err(SessionError::UnauthorizedSender(sender)),
            None => Ok(session.default_account()),
        }
    }

    /// Re-run the bound read method.
    pub async fn refresh(&self) -> Result<QueryResult> {
        let method = self.config.query_method.clone();
        let args = self.config.query_args.clone();
        self.query(&method, &args, None).await
    }

    /// Run the bound write method.
    pub async fn trigger_submit(&self) -> Result<TransactionReceipt> {
        let method = self.config.submit_method.clone();
        let args = self.config.submit_args.clone();
        self.submit(&method, &args, None, self.config.gas_limit).await
    }

    /// Query any method of the contract, tracking it in the query sub-state.
    ///
    /// Refuses to run, without contacting the provider, unless a session is
    /// ready.
    pub async fn query(
        &self,
        method: &str,
        args: &[Value],
        caller: Option<Address>,
    ) -> Result<QueryResult> {
        let (generation, session) = self
            .state()
            .ready_session()
            .ok_or(SessionError::SessionNotReady)?;
        let caller = match caller {
            Some(caller) => caller,
            None => self.signer(&session)?,
        };

        self.state().begin_query(generation);
        let outcome = self
            .controller
            .query(&session, method, args, caller)
            .await;
        self.state().complete_query(generation, outcome.clone());
        outcome
    }

    /// Submit to any method of the contract, tracking it in the submission
    /// sub-state. The receipt is returned to the caller.
    pub async fn submit(
        &self,
        method: &str,
        args: &[Value],
        sender: Option<Address>,
        gas_limit: u64,
    ) -> Result<TransactionReceipt> {
        let (generation, session) = self
            .state()
            .ready_session()
            .ok_or(SessionError::SessionNotReady)?;

        self.state().begin_submission(generation);
        let outcome = match sender.map_or_else(|| self.signer(&session), Ok) {
            Ok(sender) => {
                self.controller
                    .submit(&session, method, args, sender, gas_limit)
                    .await
            }
            Err(e) => Err(e),
        };
        self.state().complete_submission(generation, outcome.clone());
        outcome
    }
}
