use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DebounceEdge {
    /// Fire once with the latest value after a quiet window.
    #[default]
    Trailing,
    /// Fire on the first call, then swallow calls until a quiet window passes.
    Leading,
}

/// Collapses bursts of calls into one evaluation.
///
/// Time is supplied by the caller on every method, so the debouncer holds no
/// timer of its own: the host loop asks [`Debouncer::poll_timeout`] how long
/// it may sleep and calls [`Debouncer::poll`] when it wakes.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    wait: Duration,
    edge: DebounceEdge,
    pending: Option<T>,
    last_call: Option<Instant>,
}

impl<T> Debouncer<T> {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            edge: DebounceEdge::Trailing,
            pending: None,
            last_call: None,
        }
    }

    pub fn with_edge(mut self, edge: DebounceEdge) -> Self {
        self.edge = edge;
        self
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }

    pub fn edge(&self) -> DebounceEdge {
        self.edge
    }

    /// Registers a call. For a leading-edge debouncer the value is handed back
    /// immediately when no window is open.
    pub fn call(&mut self, value: T, now: Instant) -> Option<T> {
        let window_open = self.last_call.is_some();
        self.last_call = Some(now);

        match self.edge {
            DebounceEdge::Trailing => {
                self.pending = Some(value);
                None
            }
            DebounceEdge::Leading if window_open => None,
            DebounceEdge::Leading => Some(value),
        }
    }

    /// Returns the collapsed value once `wait` has elapsed since the last call.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due_at = self.next_deadline()?;
        if now < due_at {
            return None;
        }
        self.last_call = None;
        self.pending.take()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.last_call.map(|last| last + self.wait)
    }

    pub fn poll_timeout(&self, now: Instant, default_timeout: Duration) -> Duration {
        match self.next_deadline() {
            Some(due_at) => due_at.saturating_duration_since(now).min(default_timeout),
            None => default_timeout,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.last_call.is_some()
    }

    /// Drops the open window and hands back whatever was waiting.
    pub fn cancel(&mut self) -> Option<T> {
        self.last_call = None;
        self.pending.take()
    }
}
