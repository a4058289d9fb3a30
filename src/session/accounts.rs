use crate::logging;
use crate::provider::Provider;
use crate::{Result, SessionError};
use alloy_primitives::Address;

/// Enumerates the addresses a provider grants to this session
pub struct AccountDirectory;

impl AccountDirectory {
    /// List the session's accounts, default signer first.
    ///
    /// Fails with `NoAccountsAvailable` when the provider declines access or
    /// grants nothing.
    pub async fn list(provider: &dyn Provider) -> Result<Vec<Address>> {
        let accounts = provider
            .get_accounts()
            .await
            .map_err(|e| SessionError::NoAccountsAvailable(e.to_string()))?;

        if accounts.is_empty() {
            return Err(SessionError::NoAccountsAvailable(
                "provider granted no accounts".to_string(),
            ));
        }

        logging::log_accounts_listed(accounts.len(), &accounts[0]);
        Ok(accounts)
    }
}
