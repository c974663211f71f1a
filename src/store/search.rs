//! Linear search over a store in index order.

use std::ops::ControlFlow;

use regex_lite::Regex;

use super::RecordStore;
use crate::backend::Backend;
use crate::error::RecordStoreError;
use crate::record::{field_text, Record};

/// What `find` matches a field's text against.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Matches when the text contains this substring.
    Text(String),
    /// Matches when the regex finds a match anywhere in the text.
    Regex(Regex),
}

impl Pattern {
    /// Compile `pattern` as a regular expression.
    pub fn regex(pattern: &str) -> Result<Self, RecordStoreError> {
        Regex::new(pattern)
            .map(Pattern::Regex)
            .map_err(|e| RecordStoreError::InvalidPattern(e.to_string()))
    }

    pub fn is_match(&self, text: &str) -> bool {
        match self {
            Pattern::Text(needle) => text.contains(needle.as_str()),
            Pattern::Regex(regex) => regex.is_match(text),
        }
    }
}

impl From<&str> for Pattern {
    fn from(text: &str) -> Self {
        Pattern::Text(text.to_string())
    }
}

impl From<String> for Pattern {
    fn from(text: String) -> Self {
        Pattern::Text(text)
    }
}

impl From<Regex> for Pattern {
    fn from(regex: Regex) -> Self {
        Pattern::Regex(regex)
    }
}

impl<B: Backend> RecordStore<B> {
    /// Position of the first record from `start` on whose `field` matches
    /// `pattern`. Records without `field` never match.
    pub fn find(
        &self,
        field: &str,
        pattern: impl Into<Pattern>,
        start: usize,
    ) -> Result<Option<usize>, RecordStoreError> {
        let pattern = pattern.into();
        self.find_by(
            |record, _| {
                record
                    .get(field)
                    .is_some_and(|value| pattern.is_match(&field_text(value)))
            },
            start,
        )
    }

    /// Position of the first record from `start` on that satisfies `predicate`.
    pub fn find_by<F>(&self, mut predicate: F, start: usize) -> Result<Option<usize>, RecordStoreError>
    where
        F: FnMut(&Record, usize) -> bool,
    {
        let mut found = None;
        self.for_each_record(start, |record, position| {
            if predicate(record, position) {
                found = Some(position);
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })?;
        Ok(found)
    }
}
