use crate::mock::{MockProvider, RecordedCall};

pub struct CallAssertions<'a> {
    provider: &'a MockProvider,
}

impl<'a> CallAssertions<'a> {
    pub fn new(provider: &'a MockProvider) -> Self {
        Self { provider }
    }

    /// No contract call or transaction reached the provider.
    pub fn assert_no_contract_calls(&self) {
        let calls = self.provider.contract_calls();
        assert!(calls.is_empty(), "expected no contract calls, got {:?}", calls);
    }

    pub fn assert_call_count(&self, method: &str, expected: usize) {
        let actual = self
            .provider
            .contract_calls()
            .iter()
            .filter(|call| matches!(call, RecordedCall::Call { method: m, .. } if m == method))
            .count();
        assert_eq!(actual, expected, "calls to {}", method);
    }

    pub fn assert_send_count(&self, method: &str, expected: usize) {
        let actual = self
            .provider
            .contract_calls()
            .iter()
            .filter(|call| matches!(call, RecordedCall::Send { method: m, .. } if m == method))
            .count();
        assert_eq!(actual, expected, "transactions to {}", method);
    }
}
