use crate::config::WidgetConfig;
use crate::core::cursor::{Direction, NavigationCursor};
use crate::core::markup::MarkupItem;
use crate::core::suggestion::SuggestionSet;
use crate::lookup::{
    CancelToken, LookupCompletion, LookupDispatch, LookupInvocation, LookupRequest,
};
use crate::runtime::debounce::Debouncer;
use crate::terminal::{KeyCode, KeyEvent};
use crate::widget::container::ResultsContainer;
use crate::widget::element::SearchField;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Upper bound on how long a host loop should sleep while a lookup is out.
const IN_FLIGHT_POLL: Duration = Duration::from_millis(25);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyDownOutcome {
    /// The key was consumed; the host must not apply its default effect.
    pub default_prevented: bool,
}

#[derive(Debug, Clone)]
pub struct InFlightLookup {
    pub run_id: u64,
    pub query: String,
    cancel_token: CancelToken,
}

/// Search-as-you-type controller bound to one input element.
pub struct SuggestionSearch<E, D> {
    element: E,
    config: WidgetConfig,
    endpoint: Option<String>,
    dispatch: D,
    container: ResultsContainer,
    suggestions: SuggestionSet,
    cursor: NavigationCursor,
    key_up: Debouncer<KeyEvent>,
    in_flight: Option<InFlightLookup>,
    last_run_id: u64,
}

impl<E: SearchField, D: LookupDispatch> SuggestionSearch<E, D> {
    /// Binds to `element`. An `endpoint` data attribute on the element
    /// overrides the configured endpoint for this instance only.
    pub fn new(element: E, config: WidgetConfig, dispatch: D) -> Self {
        let endpoint = element
            .data("endpoint")
            .map(ToOwned::to_owned)
            .or_else(|| config.endpoint.clone());
        let key_up = Debouncer::new(config.debounce_rate);

        Self {
            element,
            config,
            endpoint,
            dispatch,
            container: ResultsContainer::new(),
            suggestions: SuggestionSet::default(),
            cursor: NavigationCursor::new(),
            key_up,
            in_flight: None,
            last_run_id: 0,
        }
    }

    pub fn on_key_down(&mut self, key: KeyEvent) -> KeyDownOutcome {
        let Some(direction) = navigation_direction(key) else {
            return KeyDownOutcome::default();
        };
        self.navigate(direction);
        KeyDownOutcome {
            default_prevented: true,
        }
    }

    /// Debounced: evaluation happens in [`SuggestionSearch::tick`] once the
    /// configured quiet window has passed since the last key-up.
    pub fn on_key_up(&mut self, key: KeyEvent, now: Instant) {
        self.key_up.call(key, now);
    }

    /// Runs a settled key-up evaluation and applies finished lookups.
    /// Returns `true` when anything visible changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        if let Some(key) = self.key_up.poll(now) {
            changed |= self.evaluate_key_up(key);
        }
        for completion in self.dispatch.drain_ready() {
            changed |= self.complete_lookup(completion);
        }
        changed
    }

    pub fn poll_timeout(&self, now: Instant, default_timeout: Duration) -> Duration {
        let timeout = self.key_up.poll_timeout(now, default_timeout);
        if self.in_flight.is_some() {
            timeout.min(IN_FLIGHT_POLL)
        } else {
            timeout
        }
    }

    fn evaluate_key_up(&mut self, key: KeyEvent) -> bool {
        if navigation_direction(key).is_some() {
            return false;
        }

        let query = self.element.value().to_string();
        if query.chars().count() > self.config.min_string_length {
            self.trigger_lookup(query.as_str());
            false
        } else {
            self.empty();
            true
        }
    }

    /// Starts a lookup for `query`, abandoning any lookup still in flight.
    pub fn trigger_lookup(&mut self, query: &str) {
        self.cancel_in_flight();

        self.last_run_id = self.last_run_id.saturating_add(1);
        let run_id = self.last_run_id;
        let cancel_token = CancelToken::new();
        debug!(
            field = self.element.id(),
            run_id, query, "dispatching suggestion lookup"
        );

        self.in_flight = Some(InFlightLookup {
            run_id,
            query: query.to_string(),
            cancel_token: cancel_token.clone(),
        });
        self.dispatch.dispatch(LookupInvocation {
            run_id,
            request: LookupRequest::new(self.endpoint.clone(), query),
            cancel_token,
        });
    }

    fn cancel_in_flight(&mut self) {
        if let Some(previous) = self.in_flight.take() {
            previous.cancel_token.cancel();
            debug!(run_id = previous.run_id, "abandoned superseded lookup");
        }
    }

    /// Applies a finished lookup. Completions of superseded runs are ignored.
    pub fn complete_lookup(&mut self, completion: LookupCompletion) -> bool {
        let is_current = self
            .in_flight
            .as_ref()
            .is_some_and(|in_flight| in_flight.run_id == completion.run_id);
        if !is_current {
            debug!(run_id = completion.run_id, "ignoring stale lookup completion");
            return false;
        }
        self.in_flight = None;

        match completion.outcome {
            Ok(suggestions) => {
                self.insert_suggestions(suggestions);
                true
            }
            Err(err) => {
                warn!(query = %completion.query, "suggestion lookup failed: {err}");
                self.empty();
                true
            }
        }
    }

    fn insert_suggestions(&mut self, suggestions: SuggestionSet) {
        self.empty();
        self.cursor.reset_to(suggestions.len());
        self.container
            .replace(self.config.formatter.format(&suggestions));
        self.suggestions = suggestions;
    }

    /// Moves the cursor, marks the matching rendered item active and copies
    /// that item's raw value into the input without submitting. When nothing
    /// is rendered at the index the suggestion's own raw value is used.
    pub fn navigate(&mut self, direction: Direction) -> Option<usize> {
        let index = self.cursor.step(direction);
        self.container.set_active(index);
        let raw_value = index.and_then(|i| {
            self.container
                .item(i)
                .map(|item| item.raw_value.clone())
                .or_else(|| self.suggestions.get(i).map(|s| s.raw_value.clone()))
        });
        if let Some(raw_value) = raw_value {
            self.element.set_value(raw_value.as_str());
        }
        index
    }

    /// Pointer activation of the rendered item at `index`.
    pub fn select_suggestion(&mut self, index: usize) -> bool {
        let Some(item) = self.container.item(index).cloned() else {
            return false;
        };
        self.select_item(&item);
        true
    }

    /// Writes the item's raw value and submits the enclosing form. Returns
    /// whether a form was submitted.
    pub fn select_item(&mut self, item: &MarkupItem) -> bool {
        self.element.set_value(item.raw_value.as_str());
        let submitted = self.element.submit_form();
        if !submitted {
            debug!(field = self.element.id(), "selected suggestion has no form to submit");
        }
        submitted
    }

    pub fn empty(&mut self) {
        self.reset();
        self.suggestions.clear();
        self.container.clear();
    }

    pub fn reset(&mut self) {
        self.cursor.reset();
    }

    pub fn element(&self) -> &E {
        &self.element
    }

    pub fn element_mut(&mut self) -> &mut E {
        &mut self.element
    }

    pub fn into_element(self) -> E {
        self.element
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    pub fn container(&self) -> &ResultsContainer {
        &self.container
    }

    pub fn suggestions(&self) -> &SuggestionSet {
        &self.suggestions
    }

    pub fn cursor(&self) -> NavigationCursor {
        self.cursor
    }

    pub fn in_flight(&self) -> Option<&InFlightLookup> {
        self.in_flight.as_ref()
    }

    pub fn has_pending_key_up(&self) -> bool {
        self.key_up.is_pending()
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatch
    }

    pub fn dispatcher_mut(&mut self) -> &mut D {
        &mut self.dispatch
    }
}

pub fn navigation_direction(key: KeyEvent) -> Option<Direction> {
    match key.code {
        KeyCode::Up => Some(Direction::Up),
        KeyCode::Down => Some(Direction::Down),
        _ => None,
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::core::suggestion::{Suggestion, SuggestionSet};
    use crate::error::LookupError;
    use crate::lookup::{LookupCompletion, LookupDispatch, LookupInvocation};

    /// Records dispatched lookups; tests decide when and how they finish.
    #[derive(Default)]
    pub struct ScriptedDispatch {
        pub dispatched: Vec<LookupInvocation>,
        ready: Vec<LookupCompletion>,
    }

    impl ScriptedDispatch {
        pub fn respond(&mut self, run_id: u64, raw_values: &[&str]) {
            let query = self.query_of(run_id);
            self.ready.push(LookupCompletion {
                run_id,
                query,
                outcome: Ok(raw_values
                    .iter()
                    .map(|raw| Suggestion::new(*raw, raw.to_uppercase()))
                    .collect::<SuggestionSet>()),
            });
        }

        pub fn fail(&mut self, run_id: u64) {
            let query = self.query_of(run_id);
            self.ready.push(LookupCompletion {
                run_id,
                query,
                outcome: Err(LookupError::Transport("connection reset".into())),
            });
        }

        pub fn queries(&self) -> Vec<&str> {
            self.dispatched
                .iter()
                .map(|inv| inv.request.query.as_str())
                .collect()
        }

        fn query_of(&self, run_id: u64) -> String {
            self.dispatched
                .iter()
                .find(|inv| inv.run_id == run_id)
                .map(|inv| inv.request.query.clone())
                .unwrap_or_default()
        }
    }

    impl LookupDispatch for ScriptedDispatch {
        fn dispatch(&mut self, invocation: LookupInvocation) {
            self.dispatched.push(invocation);
        }

        fn drain_ready(&mut self) -> Vec<LookupCompletion> {
            std::mem::take(&mut self.ready)
        }
    }
}
