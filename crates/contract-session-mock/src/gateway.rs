use crate::mock::MockProvider;
use async_trait::async_trait;
use contract_session::provider::{ProviderGateway, ProviderHandle};
use contract_session::{Result, SessionError};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Gateway handing out scripted providers.
///
/// Each `acquire` takes the next provider in line; the last one keeps being
/// returned once the queue is down to it. A gateway built with
/// [`MockGateway::unavailable`] never finds a provider.
pub struct MockGateway {
    providers: Mutex<VecDeque<Arc<MockProvider>>>,
    acquisitions: AtomicUsize,
}

impl MockGateway {
    pub fn new(provider: Arc<MockProvider>) -> Self {
        Self::sequence(vec![provider])
    }

    /// Providers returned by successive `acquire` calls
    pub fn sequence(providers: Vec<Arc<MockProvider>>) -> Self {
        Self {
            providers: Mutex::new(providers.into()),
            acquisitions: AtomicUsize::new(0),
        }
    }

    pub fn unavailable() -> Self {
        Self::sequence(Vec::new())
    }

    /// Number of `acquire` calls so far
    pub fn acquisitions(&self) -> usize {
        self.acquisitions.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProviderGateway for MockGateway {
    async fn acquire(&self) -> Result<ProviderHandle> {
        self.acquisitions.fetch_add(1, Ordering::SeqCst);
        let mut providers = self.providers.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let provider = if providers.len() > 1 {
            providers.pop_front()
        } else {
            providers.front().cloned()
        };
        match provider {
            Some(provider) => Ok(provider as ProviderHandle),
            None => Err(SessionError::ProviderUnavailable(
                "no mock provider installed".to_string(),
            )),
        }
    }
}
