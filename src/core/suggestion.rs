use crate::error::LookupError;
use serde::{Deserialize, Serialize};

/// One candidate completion: the machine value written into the input and the
/// human-facing label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(rename = "raw")]
    pub raw_value: String,
    #[serde(rename = "formatted", alias = "display")]
    pub display_value: String,
}

impl Suggestion {
    pub fn new(raw_value: impl Into<String>, display_value: impl Into<String>) -> Self {
        Self {
            raw_value: raw_value.into(),
            display_value: display_value.into(),
        }
    }

    /// A suggestion whose label is its raw value.
    pub fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            display_value: value.clone(),
            raw_value: value,
        }
    }
}

/// Ordered lookup result for one query. Order is navigation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionSet {
    #[serde(default)]
    suggestions: Vec<Suggestion>,
}

impl SuggestionSet {
    pub fn new(suggestions: Vec<Suggestion>) -> Self {
        Self { suggestions }
    }

    /// Decodes the lookup wire format: `{"suggestions":[{"raw":..,"formatted":..}]}`.
    pub fn from_json(body: &str) -> Result<Self, LookupError> {
        Ok(serde_json::from_str(body)?)
    }

    pub fn from_reader(reader: impl std::io::Read) -> Result<Self, LookupError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn len(&self) -> usize {
        self.suggestions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Suggestion> {
        self.suggestions.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Suggestion> {
        self.suggestions.iter()
    }

    pub fn as_slice(&self) -> &[Suggestion] {
        self.suggestions.as_slice()
    }

    pub fn clear(&mut self) {
        self.suggestions.clear();
    }
}

impl FromIterator<Suggestion> for SuggestionSet {
    fn from_iter<I: IntoIterator<Item = Suggestion>>(iter: I) -> Self {
        Self {
            suggestions: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a SuggestionSet {
    type Item = &'a Suggestion;
    type IntoIter = std::slice::Iter<'a, Suggestion>;

    fn into_iter(self) -> Self::IntoIter {
        self.suggestions.iter()
    }
}
