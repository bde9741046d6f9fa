use crate::lookup::{LookupCompletion, LookupDispatch, LookupInvocation, LookupTransport};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::Duration;

/// Runs every lookup on its own thread and collects completions through a
/// channel the controller drains on its own schedule.
///
/// Threads are detached. A superseded run whose transport is blocked on a
/// hung server keeps its thread until that server answers or drops the
/// connection; the cancel token is only observed between transport steps.
pub struct LookupExecutor<T: LookupTransport> {
    transport: Arc<T>,
    completion_tx: Sender<LookupCompletion>,
    completion_rx: Receiver<LookupCompletion>,
}

impl<T: LookupTransport> LookupExecutor<T> {
    pub fn new(transport: T) -> Self {
        Self::shared(Arc::new(transport))
    }

    pub fn shared(transport: Arc<T>) -> Self {
        let (completion_tx, completion_rx) = mpsc::channel::<LookupCompletion>();
        Self {
            transport,
            completion_tx,
            completion_rx,
        }
    }

    pub fn transport(&self) -> &T {
        self.transport.as_ref()
    }

    pub fn spawn(&self, invocation: LookupInvocation) {
        let transport = Arc::clone(&self.transport);
        let completion_tx = self.completion_tx.clone();
        std::thread::spawn(move || {
            let completion = execute_invocation(transport.as_ref(), invocation);
            let _ = completion_tx.send(completion);
        });
    }

    /// Blocks up to `timeout` for the first completion, then drains the rest.
    pub fn wait_ready(&self, timeout: Duration) -> Vec<LookupCompletion> {
        let mut out = match self.completion_rx.recv_timeout(timeout) {
            Ok(completion) => vec![completion],
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                return Vec::new();
            }
        };
        out.extend(self.try_drain());
        out
    }

    fn try_drain(&self) -> Vec<LookupCompletion> {
        let mut out = Vec::<LookupCompletion>::new();
        loop {
            match self.completion_rx.try_recv() {
                Ok(completion) => out.push(completion),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        out
    }
}

impl<T: LookupTransport> LookupDispatch for LookupExecutor<T> {
    fn dispatch(&mut self, invocation: LookupInvocation) {
        self.spawn(invocation);
    }

    fn drain_ready(&mut self) -> Vec<LookupCompletion> {
        self.try_drain()
    }
}

pub fn execute_invocation<T: LookupTransport + ?Sized>(
    transport: &T,
    invocation: LookupInvocation,
) -> LookupCompletion {
    let LookupInvocation {
        run_id,
        request,
        cancel_token,
    } = invocation;

    let outcome = cancel_token
        .check()
        .and_then(|()| transport.lookup(&request, &cancel_token));

    LookupCompletion {
        run_id,
        query: request.query,
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::{LookupExecutor, execute_invocation};
    use crate::core::suggestion::{Suggestion, SuggestionSet};
    use crate::error::LookupError;
    use crate::lookup::{
        CancelToken, LookupDispatch, LookupInvocation, LookupRequest, LookupTransport,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Default)]
    struct EchoTransport {
        calls: AtomicUsize,
    }

    impl LookupTransport for EchoTransport {
        fn lookup(
            &self,
            request: &LookupRequest,
            _cancel: &CancelToken,
        ) -> Result<SuggestionSet, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(SuggestionSet::new(vec![Suggestion::plain(
                request.query.to_uppercase(),
            )]))
        }
    }

    fn invocation(run_id: u64, query: &str) -> LookupInvocation {
        LookupInvocation {
            run_id,
            request: LookupRequest::new(None, query),
            cancel_token: CancelToken::new(),
        }
    }

    #[test]
    fn spawned_lookup_reports_completion() {
        let mut executor = LookupExecutor::new(EchoTransport::default());
        executor.dispatch(invocation(7, "rust"));

        let completions = executor.wait_ready(Duration::from_secs(5));
        assert_eq!(completions.len(), 1);
        let completion = &completions[0];
        assert_eq!(completion.run_id, 7);
        assert_eq!(completion.query, "rust");
        let set = completion.outcome.as_ref().expect("echo succeeds");
        assert_eq!(set.get(0).map(|s| s.raw_value.as_str()), Some("RUST"));
        assert!(executor.drain_ready().is_empty());
    }

    #[test]
    fn cancelled_invocation_skips_transport() {
        let transport = EchoTransport::default();
        let invocation = invocation(1, "gone");
        invocation.cancel_token.cancel();

        let completion = execute_invocation(&transport, invocation);
        assert!(matches!(completion.outcome, Err(LookupError::Cancelled)));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }
}
