use crate::fixtures::{self, mainnet_address, rinkeby_address};
use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address, U256};
use contract_session::provider::ProviderError;
use contract_session::{NetworkId, QueryState, SessionError};
use contract_session_mock::{CallAssertions, MockGateway, MockProviderBuilder, RecordedCall};
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn test_query_before_initialization_is_refused() {
    let provider = MockProviderBuilder::new()
        .with_uint_result("calculateNeededAAVE", 7)
        .build();
    let gateway = Arc::new(MockGateway::new(provider.clone()));
    let binding = fixtures::binding(gateway.clone());

    let err = binding.refresh().await.unwrap_err();

    assert_eq!(err, SessionError::SessionNotReady);
    assert_eq!(binding.state().query_state(), QueryState::Idle);
    assert_eq!(gateway.acquisitions(), 0);
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn test_query_is_idempotent() {
    let provider = MockProviderBuilder::new()
        .with_uint_result("calculateNeededAAVE", 42)
        .build();
    let binding = fixtures::binding(Arc::new(MockGateway::new(provider.clone())));
    binding.initialize().await.unwrap();

    let first = binding.refresh().await.unwrap();
    let second = binding.refresh().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.value(), Some(&DynSolValue::Uint(U256::from(42), 256)));
    CallAssertions::new(&provider).assert_call_count("calculateNeededAAVE", 2);
    CallAssertions::new(&provider).assert_send_count("migrateALend", 0);
}

#[tokio::test]
async fn test_query_targets_address_of_connected_network() {
    for (network, expected) in [(1, mainnet_address()), (4, rinkeby_address())] {
        let provider = MockProviderBuilder::new()
            .with_network(network)
            .with_uint_result("calculateNeededAAVE", network)
            .build();
        let binding = fixtures::binding(Arc::new(MockGateway::new(provider.clone())));
        binding.initialize().await.unwrap();

        binding.refresh().await.unwrap();

        let calls = provider.contract_calls();
        assert_eq!(calls.len(), 1);
        match &calls[0] {
            RecordedCall::Call { to, .. } => assert_eq!(*to, expected),
            other => panic!("unexpected call {:?}", other),
        }
    }
}

#[tokio::test]
async fn test_query_on_undeployed_network() {
    let provider = MockProviderBuilder::new().with_network(99).build();
    let binding = fixtures::binding(Arc::new(MockGateway::new(provider.clone())));
    binding.initialize().await.unwrap();

    let err = binding.refresh().await.unwrap_err();

    assert_eq!(
        err,
        SessionError::ContractUnavailable {
            network: NetworkId(99)
        }
    );
    assert_eq!(binding.state().query_state(), QueryState::Failed(err));
    CallAssertions::new(&provider).assert_no_contract_calls();
}

#[tokio::test]
async fn test_query_uses_default_account_as_caller() {
    let accounts = vec![Address::repeat_byte(0x31), Address::repeat_byte(0x32)];
    let provider = MockProviderBuilder::new()
        .with_accounts(accounts.clone())
        .with_uint_result("calculateNeededAAVE", 1)
        .build();
    let binding = fixtures::binding(Arc::new(MockGateway::new(provider.clone())));
    binding.initialize().await.unwrap();

    binding.refresh().await.unwrap();

    match &provider.contract_calls()[0] {
        RecordedCall::Call { from, .. } => assert_eq!(*from, accounts[0]),
        other => panic!("unexpected call {:?}", other),
    }
}

#[tokio::test]
async fn test_query_with_arguments() {
    let owner = Address::repeat_byte(0x44);
    let provider = MockProviderBuilder::new()
        .with_uint_result("balanceOf", 900)
        .build();
    let binding = fixtures::binding(Arc::new(MockGateway::new(provider)));
    binding.initialize().await.unwrap();

    let result = binding
        .query("balanceOf", &[json!(owner.to_string())], None)
        .await
        .unwrap();

    assert_eq!(result.method, "balanceOf");
    assert_eq!(result.to_string(), "900");
}

#[tokio::test]
async fn test_query_rejects_bad_arguments_locally() {
    let provider = MockProviderBuilder::new().build();
    let binding = fixtures::binding(Arc::new(MockGateway::new(provider.clone())));
    binding.initialize().await.unwrap();

    let wrong_arity = binding.query("balanceOf", &[], None).await.unwrap_err();
    let wrong_type = binding
        .query("balanceOf", &[json!("not an address")], None)
        .await
        .unwrap_err();
    let unknown = binding.query("totalSupply", &[], None).await.unwrap_err();

    assert!(matches!(wrong_arity, SessionError::InvalidArguments(_)));
    assert!(matches!(wrong_type, SessionError::InvalidArguments(_)));
    assert!(matches!(unknown, SessionError::InvalidArguments(_)));
    CallAssertions::new(&provider).assert_no_contract_calls();
}

#[tokio::test]
async fn test_query_revert_maps_to_call_error() {
    let provider = MockProviderBuilder::new()
        .with_call_error("calculateNeededAAVE", ProviderError::Reverted("bad state".into()))
        .build();
    let binding = fixtures::binding(Arc::new(MockGateway::new(provider)));
    binding.initialize().await.unwrap();

    let err = binding.refresh().await.unwrap_err();

    match err {
        SessionError::ContractCallError { method, reason } => {
            assert_eq!(method, "calculateNeededAAVE");
            assert!(reason.contains("bad state"));
        }
        other => panic!("unexpected error {:?}", other),
    }
    assert!(binding.state().session_state().is_ready());
}
