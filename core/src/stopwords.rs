//! Validated, immutable stop-word set.

use crate::error::{Result, SearchError};
use crate::tokenizer::{is_valid_word, split_words};
use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// Build from a single space-delimited string, e.g. `"in the"`.
    pub fn parse(text: &str) -> Result<Self> {
        Self::from_words([text])
    }

    /// Build from a collection of entries. Each entry is split on spaces, so blank entries
    /// disappear and padded ones are trimmed.
    pub fn from_words<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words = HashSet::new();
        for entry in entries {
            for word in split_words(entry.as_ref()) {
                if !is_valid_word(word) {
                    return Err(SearchError::invalid(format!(
                        "stop word {word:?} contains a control character"
                    )));
                }
                words.insert(word.to_string());
            }
        }
        Ok(Self { words })
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
