use crate::core::suggestion::{Suggestion, SuggestionSet};
use crate::error::LookupError;
use crate::lookup::fuzzy::top_matches;
use crate::lookup::{CancelToken, LookupRequest, LookupTransport};
use std::fs;
use std::path::Path;

const DEFAULT_LIMIT: usize = 10;

/// Fuzzy lookup over an in-memory word list. The request endpoint is ignored.
#[derive(Debug, Clone)]
pub struct LocalTransport {
    candidates: Vec<String>,
    limit: usize,
}

impl LocalTransport {
    pub fn new(candidates: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            candidates: candidates.into_iter().map(Into::into).collect(),
            limit: DEFAULT_LIMIT,
        }
    }

    /// One candidate per non-empty line.
    pub fn from_file(path: &Path) -> Result<Self, LookupError> {
        let text = fs::read_to_string(path)?;
        Ok(Self::new(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(ToOwned::to_owned),
        ))
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

impl LookupTransport for LocalTransport {
    fn lookup(
        &self,
        request: &LookupRequest,
        cancel: &CancelToken,
    ) -> Result<SuggestionSet, LookupError> {
        let matches = top_matches(request.query.as_str(), &self.candidates, self.limit);
        cancel.check()?;

        Ok(matches
            .into_iter()
            .filter_map(|m| self.candidates.get(m.index))
            .map(|candidate| Suggestion::plain(candidate.as_str()))
            .collect())
    }
}
