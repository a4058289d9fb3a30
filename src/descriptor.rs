//! Contract descriptor loading
//!
//! A descriptor pairs the contract's interface schema with the table of
//! addresses it was deployed at, keyed by network id. Both come from the
//! JSON artifact written by the compile/migrate pipeline:
//!
//! ```json
//! {
//!   "contractName": "ALendMigrator",
//!   "abi": [ ... ],
//!   "networks": {
//!     "4": { "address": "0x…", "transactionHash": "0x…" }
//!   }
//! }
//! ```

use crate::{Result, SessionError};
use alloy_json_abi::JsonAbi;
use alloy_primitives::{Address, B256};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info};

/// Identifier of the chain deployment a provider is connected to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetworkId(pub u64);

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NetworkId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        match s.strip_prefix("0x") {
            Some(hex) => u64::from_str_radix(hex, 16).map(NetworkId),
            None => s.parse::<u64>().map(NetworkId),
        }
    }
}

impl From<u64> for NetworkId {
    fn from(id: u64) -> Self {
        NetworkId(id)
    }
}

/// One entry of the artifact's `networks` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkDeployment {
    pub address: Address,
    #[serde(default)]
    pub transaction_hash: Option<B256>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArtifact {
    #[serde(default)]
    contract_name: Option<String>,
    abi: JsonAbi,
    #[serde(default)]
    networks: BTreeMap<String, NetworkDeployment>,
}

/// Static description of the contract: its interface and where it lives.
#[derive(Debug, Clone)]
pub struct ContractDescriptor {
    contract_name: Option<String>,
    interface: Arc<JsonAbi>,
    deployments: BTreeMap<NetworkId, NetworkDeployment>,
}

impl ContractDescriptor {
    /// Load a descriptor from an artifact file on disk
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading contract artifact from: {:?}", path);

        let contents = fs::read_to_string(path).map_err(|e| {
            SessionError::ArtifactError(format!("Failed to read artifact {:?}: {}", path, e))
        })?;

        let descriptor = Self::from_json_str(&contents)?;

        info!(
            contract = descriptor.contract_name().unwrap_or("<unnamed>"),
            networks = descriptor.deployments.len(),
            "Contract artifact loaded"
        );
        Ok(descriptor)
    }

    /// Parse a descriptor from the artifact's JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawArtifact = serde_json::from_str(json).map_err(|e| {
            SessionError::ArtifactError(format!("Failed to parse artifact JSON: {}", e))
        })?;

        let mut deployments = BTreeMap::new();
        for (key, deployment) in raw.networks {
            let network = key.parse::<NetworkId>().map_err(|e| {
                SessionError::ArtifactError(format!("Invalid network id {:?}: {}", key, e))
            })?;
            debug!(%network, address = %deployment.address, "Deployment entry");
            deployments.insert(network, deployment);
        }

        Ok(Self {
            contract_name: raw.contract_name,
            interface: Arc::new(raw.abi),
            deployments,
        })
    }

    pub fn contract_name(&self) -> Option<&str> {
        self.contract_name.as_deref()
    }

    pub fn interface(&self) -> &Arc<JsonAbi> {
        &self.interface
    }

    /// Address deployed on `network`, if any
    pub fn address_for(&self, network: NetworkId) -> Option<Address> {
        self.deployments.get(&network).map(|d| d.address)
    }

    pub fn deployment(&self, network: NetworkId) -> Option<&NetworkDeployment> {
        self.deployments.get(&network)
    }

    pub fn networks(&self) -> impl Iterator<Item = NetworkId> + '_ {
        self.deployments.keys().copied()
    }
}
