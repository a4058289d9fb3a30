use crate::fixtures::{self, mainnet_address, rinkeby_address};
use alloy_primitives::Address;
use contract_session::provider::ProviderError;
use contract_session::{NetworkId, QueryState, SessionError, SessionState};
use contract_session_mock::{CallAssertions, MockGateway, MockProviderBuilder};
use std::sync::Arc;

#[tokio::test]
async fn test_initialize_publishes_ready_session() {
    let accounts = vec![Address::repeat_byte(0x11), Address::repeat_byte(0x22)];
    let provider = MockProviderBuilder::new()
        .with_accounts(accounts.clone())
        .with_network(4)
        .build();
    let binding = fixtures::binding(Arc::new(MockGateway::new(provider)));

    let session = binding.initialize().await.unwrap();

    assert_eq!(session.accounts(), accounts.as_slice());
    assert_eq!(session.default_account(), accounts[0]);
    assert_eq!(session.network_id(), NetworkId(4));
    assert_eq!(session.contract().address(), Some(rinkeby_address()));

    let snapshot = binding.snapshot();
    assert_eq!(snapshot.generation, 1);
    assert!(snapshot.session.is_ready());
    assert_eq!(snapshot.query, QueryState::Idle);
}

#[tokio::test]
async fn test_provider_unavailable_fails_session() {
    let gateway = Arc::new(MockGateway::unavailable());
    let binding = fixtures::binding(gateway.clone());

    let err = binding.initialize().await.unwrap_err();

    assert!(matches!(err, SessionError::ProviderUnavailable(_)));
    assert!(err.is_initialization_failure());
    assert!(matches!(
        binding.state().session_state(),
        SessionState::Failed(SessionError::ProviderUnavailable(_))
    ));
    assert_eq!(gateway.acquisitions(), 1);
}

#[tokio::test]
async fn test_denied_accounts_fail_session() {
    let provider = MockProviderBuilder::new()
        .with_accounts_error(ProviderError::Rejected("User denied account access".into()))
        .build();
    let binding = fixtures::binding(Arc::new(MockGateway::new(provider)));

    let err = binding.initialize().await.unwrap_err();

    assert!(matches!(err, SessionError::NoAccountsAvailable(_)));
    assert!(binding.state().ready_session().is_none());
}

#[tokio::test]
async fn test_empty_account_list_fails_session() {
    let provider = MockProviderBuilder::new().with_accounts(Vec::new()).build();
    let binding = fixtures::binding(Arc::new(MockGateway::new(provider)));

    let err = binding.initialize().await.unwrap_err();

    assert!(matches!(err, SessionError::NoAccountsAvailable(_)));
}

#[tokio::test]
async fn test_network_error_fails_session() {
    let provider = MockProviderBuilder::new()
        .with_network_error(ProviderError::Transport("connection reset".into()))
        .build();
    let binding = fixtures::binding(Arc::new(MockGateway::new(provider)));

    let err = binding.initialize().await.unwrap_err();

    assert!(matches!(err, SessionError::NetworkQueryError(_)));
}

#[tokio::test]
async fn test_undeployed_network_still_initializes() {
    let provider = MockProviderBuilder::new().with_network(99).build();
    let binding = fixtures::binding(Arc::new(MockGateway::new(provider.clone())));

    let session = binding.initialize().await.unwrap();

    assert_eq!(session.network_id(), NetworkId(99));
    assert!(!session.contract().is_deployed());
    CallAssertions::new(&provider).assert_no_contract_calls();
}

#[tokio::test]
async fn test_start_runs_bound_query() {
    let provider = MockProviderBuilder::new()
        .with_uint_result("calculateNeededAAVE", 1_500)
        .build();
    let binding = fixtures::binding(Arc::new(MockGateway::new(provider.clone())));

    binding.start().await.unwrap();

    match binding.state().query_state() {
        QueryState::Ready(result) => assert_eq!(result.to_string(), "1500"),
        other => panic!("unexpected query state {:?}", other),
    }
    CallAssertions::new(&provider).assert_call_count("calculateNeededAAVE", 1);
}

#[tokio::test]
async fn test_start_reports_query_failure_in_sub_state() {
    let provider = MockProviderBuilder::new()
        .with_call_error("calculateNeededAAVE", ProviderError::Reverted("paused".into()))
        .build();
    let binding = fixtures::binding(Arc::new(MockGateway::new(provider)));

    // The session itself is fine; only the query failed.
    let session = binding.start().await.unwrap();

    assert_eq!(session.contract().address(), Some(mainnet_address()));
    assert!(binding.state().session_state().is_ready());
    assert!(matches!(
        binding.state().query_state(),
        QueryState::Failed(SessionError::ContractCallError { .. })
    ));
}

#[tokio::test]
async fn test_reinitialize_switches_network() {
    let first = MockProviderBuilder::new().with_network(1).build();
    let second = MockProviderBuilder::new().with_network(4).build();
    let gateway = Arc::new(MockGateway::sequence(vec![first, second]));
    let binding = fixtures::binding(gateway.clone());

    let before = binding.initialize().await.unwrap();
    let after = binding.initialize().await.unwrap();

    assert_eq!(before.contract().address(), Some(mainnet_address()));
    assert_eq!(after.contract().address(), Some(rinkeby_address()));
    assert!(!Arc::ptr_eq(&before, &after));

    let (generation, current) = binding.state().ready_session().unwrap();
    assert_eq!(generation, 2);
    assert!(Arc::ptr_eq(&current, &after));
    assert_eq!(gateway.acquisitions(), 2);
}

#[tokio::test]
async fn test_failed_reinitialize_withdraws_previous_session() {
    let healthy = MockProviderBuilder::new().build();
    let broken = MockProviderBuilder::new()
        .with_accounts_error(ProviderError::Rejected("locked".into()))
        .build();
    let binding = fixtures::binding(Arc::new(MockGateway::sequence(vec![healthy, broken])));

    binding.initialize().await.unwrap();
    binding.initialize().await.unwrap_err();

    assert!(binding.state().ready_session().is_none());
    let err = binding.refresh().await.unwrap_err();
    assert_eq!(err, SessionError::SessionNotReady);
}
