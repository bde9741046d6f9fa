use crate::core::suggestion::SuggestionSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// One activatable entry in rendered markup. `raw_value` is the data the
/// entry carries back to the input when chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupItem {
    pub raw_value: String,
    pub label: String,
    pub active: bool,
}

impl MarkupItem {
    pub fn new(raw_value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            raw_value: raw_value.into(),
            label: label.into(),
            active: false,
        }
    }
}

/// Renderable output of a [`Formatter`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup {
    pub heading: Option<String>,
    pub items: Vec<MarkupItem>,
}

impl Markup {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<MarkupItem>) -> Self {
        Self {
            heading: None,
            items,
        }
    }

    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = Some(heading.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.heading.is_none() && self.items.is_empty()
    }
}

/// Turns a suggestion set into markup. The widget never looks inside the
/// suggestions beyond handing them to the formatter.
pub trait Formatter: Send + Sync {
    fn format(&self, suggestions: &SuggestionSet) -> Markup;
}

impl<F> Formatter for F
where
    F: Fn(&SuggestionSet) -> Markup + Send + Sync,
{
    fn format(&self, suggestions: &SuggestionSet) -> Markup {
        self(suggestions)
    }
}

/// Default formatter: suggestions are fetched but nothing is shown.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFormatter;

impl Formatter for NoopFormatter {
    fn format(&self, _suggestions: &SuggestionSet) -> Markup {
        Markup::empty()
    }
}

/// One item per suggestion, labelled with its display value.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListFormatter;

impl Formatter for ListFormatter {
    fn format(&self, suggestions: &SuggestionSet) -> Markup {
        Markup::with_items(
            suggestions
                .iter()
                .map(|s| MarkupItem::new(s.raw_value.as_str(), s.display_value.as_str()))
                .collect(),
        )
    }
}

/// Named built-in formatters, selectable from config files and the CLI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatKind {
    #[default]
    None,
    List,
}

impl FormatKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "none" | "noop" => Some(Self::None),
            "list" => Some(Self::List),
            _ => None,
        }
    }

    pub fn formatter(self) -> SharedFormatter {
        match self {
            Self::None => SharedFormatter::new(NoopFormatter),
            Self::List => SharedFormatter::new(ListFormatter),
        }
    }
}

/// Cloneable handle to a formatter, shared by every controller built from
/// one config.
#[derive(Clone)]
pub struct SharedFormatter(Arc<dyn Formatter>);

impl SharedFormatter {
    pub fn new(formatter: impl Formatter + 'static) -> Self {
        Self(Arc::new(formatter))
    }

    pub fn format(&self, suggestions: &SuggestionSet) -> Markup {
        self.0.format(suggestions)
    }
}

impl Default for SharedFormatter {
    fn default() -> Self {
        Self::new(NoopFormatter)
    }
}

impl fmt::Debug for SharedFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedFormatter(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::{FormatKind, Formatter, ListFormatter, Markup, MarkupItem, NoopFormatter};
    use crate::core::suggestion::{Suggestion, SuggestionSet};

    fn sample() -> SuggestionSet {
        SuggestionSet::new(vec![
            Suggestion::new("alpha", "Alpha"),
            Suggestion::new("beta", "Beta"),
        ])
    }

    #[test]
    fn noop_renders_nothing() {
        assert!(NoopFormatter.format(&sample()).is_empty());
    }

    #[test]
    fn list_keeps_order_and_raw_values() {
        let markup = ListFormatter.format(&sample());
        let raw = markup
            .items
            .iter()
            .map(|item| item.raw_value.as_str())
            .collect::<Vec<_>>();
        assert_eq!(raw, vec!["alpha", "beta"]);
        assert_eq!(markup.items[1].label, "Beta");
        assert!(markup.items.iter().all(|item| !item.active));
    }

    #[test]
    fn closures_are_formatters() {
        let only_first = |set: &SuggestionSet| {
            let items = set
                .get(0)
                .map(|s| vec![MarkupItem::new(s.raw_value.as_str(), "first")])
                .unwrap_or_default();
            Markup::with_items(items).with_heading("Top hit")
        };
        let markup = only_first.format(&sample());
        assert_eq!(markup.heading.as_deref(), Some("Top hit"));
        assert_eq!(markup.items.len(), 1);
    }

    #[test]
    fn format_kind_parses_names() {
        assert_eq!(FormatKind::parse("List"), Some(FormatKind::List));
        assert_eq!(FormatKind::parse("noop"), Some(FormatKind::None));
        assert_eq!(FormatKind::parse("table"), None);
        assert!(FormatKind::None.formatter().format(&sample()).is_empty());
    }
}
