use crate::fixtures;
use alloy_primitives::Address;
use contract_session::provider::ProviderError;
use contract_session::{NetworkId, SessionError, SessionState};
use contract_session_mock::{MockGateway, MockProviderBuilder};
use proptest::prelude::*;
use std::sync::Arc;

#[derive(Debug, Clone)]
enum AccountsOutcome {
    Denied,
    Empty,
    Granted(usize),
}

fn accounts_outcome() -> impl Strategy<Value = AccountsOutcome> {
    prop_oneof![
        Just(AccountsOutcome::Denied),
        Just(AccountsOutcome::Empty),
        (1usize..5).prop_map(AccountsOutcome::Granted),
    ]
}

fn network_outcome() -> impl Strategy<Value = Option<u64>> {
    prop_oneof![Just(None), Just(Some(1)), Just(Some(4)), Just(Some(99))]
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn test_session_ready_iff_every_step_succeeds(
        provider_available in any::<bool>(),
        accounts in accounts_outcome(),
        network in network_outcome(),
    ) {
        let mut builder = MockProviderBuilder::new();
        builder = match &accounts {
            AccountsOutcome::Denied => {
                builder.with_accounts_error(ProviderError::Rejected("denied".into()))
            }
            AccountsOutcome::Empty => builder.with_accounts(Vec::new()),
            AccountsOutcome::Granted(count) => builder.with_accounts(
                (1..=*count as u8).map(Address::with_last_byte).collect(),
            ),
        };
        builder = match network {
            Some(id) => builder.with_network(id),
            None => builder.with_network_error(ProviderError::Transport("down".into())),
        };
        let gateway = if provider_available {
            MockGateway::new(builder.build())
        } else {
            MockGateway::unavailable()
        };
        let binding = fixtures::binding(Arc::new(gateway));

        let outcome = runtime().block_on(binding.initialize());

        let accounts_ok = matches!(accounts, AccountsOutcome::Granted(_));
        let all_ok = provider_available && accounts_ok && network.is_some();
        prop_assert_eq!(outcome.is_ok(), all_ok);
        prop_assert_eq!(binding.state().session_state().is_ready(), all_ok);

        match outcome {
            Ok(session) => {
                prop_assert!(!session.accounts().is_empty());
                prop_assert_eq!(Some(session.network_id()), network.map(NetworkId));
                prop_assert_eq!(session.contract().is_deployed(), network != Some(99));
            }
            Err(err) => {
                prop_assert!(err.is_initialization_failure());
                let expected_step = match err {
                    SessionError::ProviderUnavailable(_) => !provider_available,
                    SessionError::NoAccountsAvailable(_) => provider_available && !accounts_ok,
                    SessionError::NetworkQueryError(_) => provider_available && network.is_none(),
                    _ => false,
                };
                prop_assert!(expected_step);
                let failed = matches!(
                    binding.state().session_state(),
                    SessionState::Failed(_)
                );
                prop_assert!(failed);
            }
        }
    }
}
