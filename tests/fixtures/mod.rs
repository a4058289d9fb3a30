//! Shared fixtures: the migrator artifact and bindings wired to mock providers.
#![allow(dead_code)]

use alloy_primitives::Address;
use contract_session::binding::BindingConfig;
use contract_session::{ContractBinding, ContractDescriptor};
use contract_session_mock::MockGateway;
use std::path::PathBuf;
use std::sync::Arc;

pub const ALEND_MIGRATOR: &str = include_str!("ALendMigrator.json");

/// Deployment of the fixture contract on network 1
pub fn mainnet_address() -> Address {
    "0x0000000000000000000000000000000000000aaa".parse().unwrap()
}

/// Deployment of the fixture contract on network 4
pub fn rinkeby_address() -> Address {
    "0x0000000000000000000000000000000000000bbb".parse().unwrap()
}

pub fn artifact_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("ALendMigrator.json")
}

pub fn descriptor() -> Arc<ContractDescriptor> {
    Arc::new(ContractDescriptor::from_json_str(ALEND_MIGRATOR).unwrap())
}

pub fn binding(gateway: Arc<MockGateway>) -> ContractBinding {
    binding_with(gateway, BindingConfig::default())
}

pub fn binding_with(gateway: Arc<MockGateway>, config: BindingConfig) -> ContractBinding {
    ContractBinding::new(gateway, descriptor(), config)
}
