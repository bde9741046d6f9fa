pub mod executor;
pub mod fuzzy;
pub mod http;
pub mod local;

pub use executor::LookupExecutor;
pub use http::HttpTransport;
pub use local::LocalTransport;

use crate::core::suggestion::SuggestionSet;
use crate::error::LookupError;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub endpoint: Option<String>,
    pub query: String,
}

impl LookupRequest {
    pub fn new(endpoint: Option<String>, query: impl Into<String>) -> Self {
        Self {
            endpoint,
            query: query.into(),
        }
    }
}

/// Shared flag marking a lookup as abandoned.
///
/// Transports check it where they can; the controller ignores the completion
/// of a cancelled run either way.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub fn check(&self) -> Result<(), LookupError> {
        if self.is_cancelled() {
            Err(LookupError::Cancelled)
        } else {
            Ok(())
        }
    }
}

#[derive(Debug, Clone)]
pub struct LookupInvocation {
    pub run_id: u64,
    pub request: LookupRequest,
    pub cancel_token: CancelToken,
}

#[derive(Debug)]
pub struct LookupCompletion {
    pub run_id: u64,
    pub query: String,
    pub outcome: Result<SuggestionSet, LookupError>,
}

/// Blocking remote (or local) lookup for one query.
pub trait LookupTransport: Send + Sync + 'static {
    fn lookup(
        &self,
        request: &LookupRequest,
        cancel: &CancelToken,
    ) -> Result<SuggestionSet, LookupError>;
}

impl<T: LookupTransport + ?Sized> LookupTransport for Arc<T> {
    fn lookup(
        &self,
        request: &LookupRequest,
        cancel: &CancelToken,
    ) -> Result<SuggestionSet, LookupError> {
        (**self).lookup(request, cancel)
    }
}

/// Starts lookups and hands back their completions.
pub trait LookupDispatch {
    fn dispatch(&mut self, invocation: LookupInvocation);
    fn drain_ready(&mut self) -> Vec<LookupCompletion>;
}
