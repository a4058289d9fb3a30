use super::ContractHandle;
use crate::descriptor::{ContractDescriptor, NetworkId};
use crate::logging;
use crate::provider::Provider;
use crate::{Result, SessionError};

/// Binds the contract descriptor to the network the provider is connected to
pub struct ContractResolver;

impl ContractResolver {
    /// Query the active network and bind the contract deployed there.
    ///
    /// A network without a deployment yields an address-less handle rather
    /// than an error. Only a provider that cannot report its network fails,
    /// with `NetworkQueryError`.
    pub async fn resolve(
        provider: &dyn Provider,
        descriptor: &ContractDescriptor,
    ) -> Result<(NetworkId, ContractHandle)> {
        let network = provider
            .get_network_id()
            .await
            .map_err(|e| SessionError::NetworkQueryError(e.to_string()))?;

        let address = descriptor.address_for(network);
        logging::log_contract_resolved(network, address.as_ref());

        let handle = ContractHandle::new(descriptor.interface().clone(), address);
        Ok((network, handle))
    }
}
