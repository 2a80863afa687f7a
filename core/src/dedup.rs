//! Duplicate detection over the word sets of indexed documents.
//!
//! Two documents are duplicates when their non-stop words form the same set, regardless of
//! order or repetition. Within each group of duplicates the lowest id survives.

use crate::document::DocumentId;
use crate::server::SearchServer;
use std::collections::{BTreeSet, HashMap};

/// Ids of every document whose word set equals that of a lower-id document, ascending.
pub fn find_duplicates(server: &SearchServer) -> Vec<DocumentId> {
    let mut ids: Vec<DocumentId> = server.document_ids().collect();
    ids.sort_unstable();

    let mut seen: HashMap<BTreeSet<&str>, DocumentId> = HashMap::new();
    let mut duplicates = Vec::new();
    for id in ids {
        let words: BTreeSet<&str> = server.get_word_frequencies(id).keys().map(String::as_str).collect();
        if seen.contains_key(&words) {
            duplicates.push(id);
        } else {
            seen.insert(words, id);
        }
    }
    duplicates
}

/// Remove all duplicates from the server and return their ids, ascending.
pub fn remove_duplicates(server: &mut SearchServer) -> Vec<DocumentId> {
    let duplicates = find_duplicates(server);
    for &document_id in &duplicates {
        server.remove_document(document_id);
        tracing::info!(document_id, "found duplicate document");
    }
    duplicates
}
