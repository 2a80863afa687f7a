use crate::document::{compute_average_rating, DocMeta, Document, DocumentId, DocumentStatus};
use crate::error::{Result, SearchError};
use crate::index::InvertedIndex;
use crate::query::Query;
use crate::ranking::{find_all_documents, top_documents};
use crate::stopwords::StopWords;
use crate::tokenizer::{is_valid_word, split_words};
use std::collections::{BTreeMap, HashMap};

/// In-memory search server: catalog, inverted index and stop words.
///
/// No internal synchronization; share it behind a lock (see
/// [`RequestQueue`](crate::request_queue::RequestQueue)) when more than one party needs it.
#[derive(Debug, Default)]
pub struct SearchServer {
    stop_words: StopWords,
    index: InvertedIndex,
    docs: HashMap<DocumentId, DocMeta>,
    document_ids: Vec<DocumentId>,
}

impl SearchServer {
    /// Create a server from a space-delimited stop-word string.
    pub fn new(stop_words: &str) -> Result<Self> {
        Ok(Self::with_stop_words_set(StopWords::parse(stop_words)?))
    }

    /// Create a server from a collection of stop words.
    pub fn with_stop_words<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::with_stop_words_set(StopWords::from_words(stop_words)?))
    }

    pub fn with_stop_words_set(stop_words: StopWords) -> Self {
        Self { stop_words, ..Self::default() }
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    pub fn add_document(
        &mut self,
        document_id: DocumentId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        if document_id < 0 {
            return Err(SearchError::invalid(format!("negative document id {document_id}")));
        }
        if self.docs.contains_key(&document_id) {
            return Err(SearchError::invalid(format!("document id {document_id} already exists")));
        }
        let words = self.split_into_words_no_stop(text);
        if let Some(bad) = words.iter().find(|w| !is_valid_word(w)) {
            return Err(SearchError::invalid(format!(
                "document {document_id}: word {bad:?} contains a control character"
            )));
        }

        self.index.insert(document_id, &words);
        let rating = compute_average_rating(ratings);
        self.docs.insert(document_id, DocMeta { rating, status });
        self.document_ids.push(document_id);
        tracing::debug!(document_id, words = words.len(), rating, ?status, "document added");
        Ok(())
    }

    /// Remove a document and all of its postings. Unknown ids are ignored.
    pub fn remove_document(&mut self, document_id: DocumentId) {
        if self.docs.remove(&document_id).is_none() {
            tracing::debug!(document_id, "remove of unknown document ignored");
            return;
        }
        self.index.remove(document_id);
        self.document_ids.retain(|&id| id != document_id);
        tracing::debug!(document_id, "document removed");
    }

    /// Top documents with status `Actual`.
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_by_status(raw_query, DocumentStatus::Actual)
    }

    pub fn find_top_documents_by_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.find_top_documents_with(raw_query, |_, document_status, _| document_status == status)
    }

    /// Top documents accepted by `predicate(id, status, rating)`.
    pub fn find_top_documents_with<P>(&self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool,
    {
        let query = Query::parse(raw_query, &self.stop_words)?;
        let hits = find_all_documents(&self.index, &self.docs, &query, predicate);
        Ok(top_documents(hits))
    }

    /// Plus-terms of `raw_query` that occur in the document (sorted), or none at all when a
    /// minus-term occurs in it, together with the document's status.
    pub fn match_document(
        &self,
        raw_query: &str,
        document_id: DocumentId,
    ) -> Result<(Vec<String>, DocumentStatus)> {
        let query = Query::parse(raw_query, &self.stop_words)?;
        let meta = self
            .docs
            .get(&document_id)
            .ok_or_else(|| SearchError::not_found(format!("document id {document_id}")))?;

        if query.minus_words.iter().any(|w| self.index.contains_term(document_id, w)) {
            return Ok((Vec::new(), meta.status));
        }
        let matched = query
            .plus_words
            .iter()
            .filter(|w| self.index.contains_term(document_id, w))
            .cloned()
            .collect();
        Ok((matched, meta.status))
    }

    /// Term frequencies of a document; empty for unknown ids.
    pub fn get_word_frequencies(&self, document_id: DocumentId) -> &BTreeMap<String, f64> {
        self.index.word_frequencies(document_id)
    }

    pub fn get_document_count(&self) -> usize {
        self.docs.len()
    }

    /// Live document ids in insertion order.
    pub fn document_ids(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.document_ids.iter().copied()
    }

    /// Id of the document added at `position` (counting live documents only).
    pub fn document_id_at(&self, position: usize) -> Result<DocumentId> {
        self.document_ids.get(position).copied().ok_or_else(|| {
            SearchError::not_found(format!(
                "document position {position} out of range (count {})",
                self.document_ids.len()
            ))
        })
    }

    fn split_into_words_no_stop<'a>(&self, text: &'a str) -> Vec<&'a str> {
        split_words(text).into_iter().filter(|w| !self.stop_words.contains(w)).collect()
    }
}

impl<'a> IntoIterator for &'a SearchServer {
    type Item = DocumentId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, DocumentId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.document_ids.iter().copied()
    }
}
