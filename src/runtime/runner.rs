use crate::lookup::LookupDispatch;
use crate::runtime::key_bindings::{Command, KeyBindings};
use crate::terminal::{KeyEvent, MouseClick, Terminal, TerminalEvent};
use crate::ui::render::{RenderFrame, render};
use crate::widget::controller::SuggestionSearch;
use crate::widget::element::{InputElement, SearchField};
use crate::widget::text_edit;
use std::io;
use std::time::{Duration, Instant};
use tracing::debug;

const IDLE_POLL: Duration = Duration::from_millis(120);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Submitted(String),
    Cancelled,
}

/// Terminal-independent part of the front end: turns key presses and clicks
/// into widget calls and notices when the form has been submitted.
pub struct Session<D> {
    search: SuggestionSearch<InputElement, D>,
    key_bindings: KeyBindings,
    prompt: String,
    frame: RenderFrame,
    submissions_seen: usize,
}

impl<D: LookupDispatch> Session<D> {
    pub fn new(search: SuggestionSearch<InputElement, D>) -> Self {
        let submissions_seen = submission_count(search.element());
        let mut session = Self {
            search,
            key_bindings: KeyBindings::new(),
            prompt: "Search: ".to_string(),
            frame: RenderFrame::default(),
            submissions_seen,
        };
        session.refresh_frame();
        session
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self.refresh_frame();
        self
    }

    pub fn search(&self) -> &SuggestionSearch<InputElement, D> {
        &self.search
    }

    pub fn search_mut(&mut self) -> &mut SuggestionSearch<InputElement, D> {
        &mut self.search
    }

    pub fn frame(&self) -> &RenderFrame {
        &self.frame
    }

    /// A terminal key press is a key-down immediately followed by a key-up.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Option<RunOutcome> {
        if let Some(command) = self.key_bindings.resolve(key) {
            return Some(self.run_command(command));
        }

        let outcome = self.search.on_key_down(key);
        if !outcome.default_prevented {
            self.search
                .element_mut()
                .edit(|value, caret| text_edit::apply_key(value, caret, key));
        }
        self.search.on_key_up(key, now);
        self.refresh_frame();
        None
    }

    pub fn handle_click(&mut self, click: MouseClick) -> Option<RunOutcome> {
        let index = self.frame.item_at_row(click.row)?;
        self.search.select_suggestion(index);
        self.refresh_frame();
        self.take_submission()
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        let changed = self.search.tick(now);
        if changed {
            self.refresh_frame();
        }
        changed
    }

    pub fn poll_timeout(&self, now: Instant) -> Duration {
        self.search.poll_timeout(now, IDLE_POLL)
    }

    fn run_command(&mut self, command: Command) -> RunOutcome {
        match command {
            Command::Exit => RunOutcome::Cancelled,
            Command::Submit => {
                self.search.element_mut().submit_form();
                self.take_submission()
                    .unwrap_or_else(|| RunOutcome::Submitted(self.search.element().value().into()))
            }
        }
    }

    fn take_submission(&mut self) -> Option<RunOutcome> {
        let form = self.search.element().form()?;
        if form.submissions().len() <= self.submissions_seen {
            return None;
        }
        self.submissions_seen = form.submissions().len();
        let value = form.last_submission()?.value.clone();
        debug!(value = %value, "form submitted");
        Some(RunOutcome::Submitted(value))
    }

    fn refresh_frame(&mut self) {
        self.frame = render(
            self.prompt.as_str(),
            self.search.element(),
            self.search.container(),
            self.search.in_flight().is_some(),
        );
    }
}

fn submission_count(element: &InputElement) -> usize {
    element.form().map_or(0, |form| form.submissions().len())
}

/// Drives a [`Session`] against the real terminal until submit or cancel.
pub struct Runtime<D> {
    session: Session<D>,
    terminal: Terminal,
}

impl<D: LookupDispatch> Runtime<D> {
    pub fn new(session: Session<D>, terminal: Terminal) -> Self {
        Self { session, terminal }
    }

    pub fn run(&mut self) -> io::Result<RunOutcome> {
        self.terminal.enter()?;
        let run_result = self.event_loop();
        let exit_result = self.terminal.exit();
        let outcome = run_result?;
        exit_result?;
        Ok(outcome)
    }

    fn event_loop(&mut self) -> io::Result<RunOutcome> {
        self.render()?;

        loop {
            if self.session.tick(Instant::now()) {
                self.render()?;
            }

            let timeout = self.session.poll_timeout(Instant::now());
            let outcome = match self.terminal.poll_event(timeout)? {
                TerminalEvent::Key(key) => self.session.handle_key(key, Instant::now()),
                TerminalEvent::Click(click) => self.session.handle_click(click),
                TerminalEvent::Resize(size) => {
                    self.terminal.set_size(size);
                    None
                }
                TerminalEvent::Tick => continue,
            };

            if let Some(outcome) = outcome {
                return Ok(outcome);
            }
            self.render()?;
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let frame = self.session.frame();
        self.terminal.render(&frame.lines, frame.cursor)
    }
}
