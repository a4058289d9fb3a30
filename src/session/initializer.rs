use super::state::SessionStateMachine;
use super::{AccountDirectory, ContractResolver, Session};
use crate::descriptor::ContractDescriptor;
use crate::logging::{self, InitStep};
use crate::provider::ProviderGateway;
use crate::{Result, SessionError};
use std::sync::Arc;

/// Runs the provider → (accounts ‖ network + contract) sequence and
/// publishes the resulting [`Session`].
///
/// Overlapping calls follow a latest-started-wins policy: every call takes a
/// new generation when it starts, and only the most recent generation may
/// commit. An older call that finishes afterwards returns
/// [`SessionError::Superseded`] and leaves the state untouched.
pub struct SessionInitializer {
    gateway: Arc<dyn ProviderGateway>,
    descriptor: Arc<ContractDescriptor>,
    state: Arc<SessionStateMachine>,
}

impl SessionInitializer {
    pub fn new(
        gateway: Arc<dyn ProviderGateway>,
        descriptor: Arc<ContractDescriptor>,
        state: Arc<SessionStateMachine>,
    ) -> Self {
        Self {
            gateway,
            descriptor,
            state,
        }
    }

    pub fn state(&self) -> &Arc<SessionStateMachine> {
        &self.state
    }

    pub fn descriptor(&self) -> &Arc<ContractDescriptor> {
        &self.descriptor
    }

    /// Build a new session from scratch, replacing any previous one.
    pub async fn initialize(&self) -> Result<Arc<Session>> {
        let generation = self.state.begin_initialization();
        logging::log_session_initializing(generation);

        let outcome = self.build().await.map(Arc::new);

        let committed = self.state.commit_initialization(generation, outcome.clone());
        if !committed {
            logging::log_session_superseded(generation);
            return Err(SessionError::Superseded { generation });
        }

        match &outcome {
            Ok(session) => logging::log_session_ready(
                generation,
                session.network_id(),
                session.accounts().len(),
                session.contract().address().as_ref(),
            ),
            Err(_) => logging::log_session_failed(generation),
        }
        outcome
    }

    async fn build(&self) -> Result<Session> {
        let provider = self
            .gateway
            .acquire()
            .await
            .inspect_err(|e| logging::log_step_failed(InitStep::Provider, e))?;

        let (accounts, (network_id, contract)) = tokio::try_join!(
            async {
                AccountDirectory::list(provider.as_ref())
                    .await
                    .inspect_err(|e| logging::log_step_failed(InitStep::Accounts, e))
            },
            async {
                ContractResolver::resolve(provider.as_ref(), &self.descriptor)
                    .await
                    .inspect_err(|e| logging::log_step_failed(InitStep::Network, e))
            },
        )?;

        Ok(Session::new(provider, accounts, network_id, contract))
    }
}
