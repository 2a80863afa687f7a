use crate::error::{Result, SearchError};
use crate::stopwords::StopWords;
use crate::tokenizer::{is_valid_word, split_words};
use std::collections::BTreeSet;

/// Parsed query: required (plus) and excluded (minus) terms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub plus_words: BTreeSet<String>,
    pub minus_words: BTreeSet<String>,
}

impl Query {
    /// Parse a raw query. Stop words are dropped from both sets; a bare `-`, a `--` prefix
    /// or a control character fails with `InvalidArgument`.
    pub fn parse(raw: &str, stop_words: &StopWords) -> Result<Self> {
        let mut query = Query::default();
        for token in split_words(raw) {
            if token == "-" || token.starts_with("--") {
                return Err(SearchError::invalid(format!("malformed minus-term {token:?}")));
            }
            let (word, is_minus) = match token.strip_prefix('-') {
                Some(rest) => (rest, true),
                None => (token, false),
            };
            if word.is_empty() || stop_words.contains(word) {
                continue;
            }
            if !is_valid_word(word) {
                return Err(SearchError::invalid(format!(
                    "query word {word:?} contains a control character"
                )));
            }
            if is_minus {
                query.minus_words.insert(word.to_string());
            } else {
                query.plus_words.insert(word.to_string());
            }
        }
        Ok(query)
    }

    pub fn is_empty(&self) -> bool {
        self.plus_words.is_empty() && self.minus_words.is_empty()
    }
}
