use crate::document::DocumentId;
use std::collections::{BTreeMap, HashMap};

/// Posting list for one term: document id -> term frequency, ordered by document id.
pub type Postings = BTreeMap<DocumentId, f64>;

static EMPTY_FREQS: BTreeMap<String, f64> = BTreeMap::new();

/// In-memory inverted index with a forward (document -> terms) view kept in lockstep.
///
/// A term has an entry in `postings` iff at least one indexed document contains it.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    postings: HashMap<String, Postings>,
    doc_terms: HashMap<DocumentId, BTreeMap<String, f64>>,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Index already validated, stop-word free words for `doc_id`.
    /// tf = occurrences / words.len().
    pub fn insert(&mut self, doc_id: DocumentId, words: &[&str]) {
        let mut counts: BTreeMap<&str, u32> = BTreeMap::new();
        for &w in words {
            *counts.entry(w).or_insert(0) += 1;
        }
        let total = words.len() as f64;
        let mut freqs = BTreeMap::new();
        for (word, count) in counts {
            let tf = count as f64 / total;
            self.postings.entry(word.to_string()).or_default().insert(doc_id, tf);
            freqs.insert(word.to_string(), tf);
        }
        self.doc_terms.insert(doc_id, freqs);
    }

    /// Drop every posting of `doc_id`, pruning terms whose posting list becomes empty.
    /// Returns false when the document was never indexed.
    pub fn remove(&mut self, doc_id: DocumentId) -> bool {
        let Some(freqs) = self.doc_terms.remove(&doc_id) else { return false };
        for word in freqs.keys() {
            if let Some(plist) = self.postings.get_mut(word) {
                plist.remove(&doc_id);
                if plist.is_empty() {
                    self.postings.remove(word);
                }
            }
        }
        true
    }

    /// Posting list of a term; `None` for terms no indexed document contains.
    pub fn postings(&self, term: &str) -> Option<&Postings> {
        self.postings.get(term).filter(|p| !p.is_empty())
    }

    /// Term frequencies of one document; empty for unknown ids.
    pub fn word_frequencies(&self, doc_id: DocumentId) -> &BTreeMap<String, f64> {
        self.doc_terms.get(&doc_id).unwrap_or(&EMPTY_FREQS)
    }

    pub fn contains_term(&self, doc_id: DocumentId, term: &str) -> bool {
        self.postings(term).is_some_and(|p| p.contains_key(&doc_id))
    }

    pub fn num_terms(&self) -> usize { self.postings.len() }
}
