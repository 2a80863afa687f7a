//! TF-IDF relevance accumulation and result ordering.

use crate::document::{DocMeta, Document, DocumentId, DocumentStatus};
use crate::index::InvertedIndex;
use crate::query::Query;
use std::collections::HashMap;

/// Upper bound on the number of hits a search returns.
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;

/// Relevance values closer than this are considered equal and ordered by rating.
pub const RELEVANCE_EPSILON: f64 = 1e-6;

/// ln(N / df). Callers only pass terms with at least one posting, so `doc_freq > 0`.
#[inline]
pub fn inverse_document_freq(document_count: usize, doc_freq: usize) -> f64 {
    (document_count as f64 / doc_freq as f64).ln()
}

/// Score every document matching `query` and accepted by `predicate`. Unsorted, untruncated.
pub(crate) fn find_all_documents<P>(
    index: &InvertedIndex,
    catalog: &HashMap<DocumentId, DocMeta>,
    query: &Query,
    predicate: P,
) -> Vec<Document>
where
    P: Fn(DocumentId, DocumentStatus, i32) -> bool,
{
    let document_count = catalog.len();
    let mut relevance: HashMap<DocumentId, f64> = HashMap::new();

    for word in &query.plus_words {
        let Some(postings) = index.postings(word) else { continue };
        let idf = inverse_document_freq(document_count, postings.len());
        for (&doc_id, &tf) in postings {
            let Some(meta) = catalog.get(&doc_id) else { continue };
            if predicate(doc_id, meta.status, meta.rating) {
                *relevance.entry(doc_id).or_insert(0.0) += tf * idf;
            }
        }
    }

    for word in &query.minus_words {
        if let Some(postings) = index.postings(word) {
            for doc_id in postings.keys() {
                relevance.remove(doc_id);
            }
        }
    }

    relevance
        .into_iter()
        .filter_map(|(id, relevance)| {
            catalog.get(&id).map(|meta| Document { id, relevance, rating: meta.rating })
        })
        .collect()
}

/// Order hits by relevance descending; hits within `RELEVANCE_EPSILON` of each other go by
/// rating descending.
///
/// Hits are first sorted by exact relevance, then split into runs whose members all lie
/// within epsilon of the run's head, and each run is reordered by rating. Any two hits at
/// least epsilon apart stay in relevance order.
pub fn sort_by_relevance(hits: &mut [Document]) {
    hits.sort_by(|a, b| b.relevance.total_cmp(&a.relevance).then(a.id.cmp(&b.id)));
    let mut start = 0;
    while start < hits.len() {
        let head = hits[start].relevance;
        let mut end = start + 1;
        while end < hits.len() && head - hits[end].relevance < RELEVANCE_EPSILON {
            end += 1;
        }
        hits[start..end].sort_by(|a, b| {
            b.rating
                .cmp(&a.rating)
                .then(b.relevance.total_cmp(&a.relevance))
                .then(a.id.cmp(&b.id))
        });
        start = end;
    }
}

/// Sort and cut to `MAX_RESULT_DOCUMENT_COUNT`.
pub fn top_documents(mut hits: Vec<Document>) -> Vec<Document> {
    sort_by_relevance(&mut hits);
    hits.truncate(MAX_RESULT_DOCUMENT_COUNT);
    hits
}
