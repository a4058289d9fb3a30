use crate::binding::BindingConfig;
use crate::provider::json_rpc::DEFAULT_RECEIPT_POLL_INTERVAL;
use crate::{Result, SessionError};
use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default location of the contract artifact
pub const DEFAULT_ARTIFACT: &str = "client/src/contracts/ALendMigrator.json";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub contract: ContractConfig,
    #[serde(default)]
    pub interaction: InteractionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ProviderConfig {
    /// JSON-RPC endpoints to try, in order
    #[serde(default)]
    pub endpoints: Vec<String>,
    /// Interval between receipt polls, in milliseconds
    #[serde(default)]
    pub receipt_poll_interval_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ContractConfig {
    /// Path to the compiled contract artifact
    #[serde(default)]
    pub artifact: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct InteractionConfig {
    #[serde(default)]
    pub query_method: Option<String>,
    #[serde(default)]
    pub query_args: Option<Vec<Value>>,
    #[serde(default)]
    pub submit_method: Option<String>,
    #[serde(default)]
    pub submit_args: Option<Vec<Value>>,
    #[serde(default)]
    pub gas_limit: Option<u64>,
    /// Signer for writes; must be one of the session's accounts
    #[serde(default)]
    pub sender: Option<Address>,
}

impl Config {
    /// Load configuration from `path`, falling back to defaults when it is missing
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config_path = path.as_ref();

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| {
            SessionError::ConfigError(format!(
                "Failed to read config file {:?}: {}",
                config_path, e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            SessionError::ConfigError(format!(
                "Failed to parse TOML config from {:?}: {}",
                config_path, e
            ))
        })?;

        Ok(config)
    }

    pub fn artifact_path(&self) -> PathBuf {
        self.contract
            .artifact
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ARTIFACT))
    }

    pub fn receipt_poll_interval(&self) -> Duration {
        self.provider
            .receipt_poll_interval_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_RECEIPT_POLL_INTERVAL)
    }

    /// Bound methods with configured values applied over the defaults
    pub fn binding_config(&self) -> BindingConfig {
        let defaults = BindingConfig::default();
        let interaction = &self.interaction;
        BindingConfig {
            query_method: interaction
                .query_method
                .clone()
                .unwrap_or(defaults.query_method),
            query_args: interaction
                .query_args
                .clone()
                .unwrap_or(defaults.query_args),
            submit_method: interaction
                .submit_method
                .clone()
                .unwrap_or(defaults.submit_method),
            submit_args: interaction
                .submit_args
                .clone()
                .unwrap_or(defaults.submit_args),
            gas_limit: interaction.gas_limit.unwrap_or(defaults.gas_limit),
            sender: interaction.sender.or(defaults.sender),
        }
    }
}
