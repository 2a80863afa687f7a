//! In-memory TF-IDF document search: inverted index, query parsing with stop and minus
//! words, ranked retrieval, plus the small helpers built on top of it (duplicate removal,
//! request log, pagination).

pub mod dedup;
pub mod document;
pub mod error;
pub mod index;
pub mod paginate;
pub mod query;
pub mod ranking;
pub mod request_queue;
pub mod server;
pub mod stopwords;
pub mod tokenizer;

pub use document::{compute_average_rating, DocMeta, Document, DocumentId, DocumentStatus};
pub use error::{Result, SearchError};
pub use index::{InvertedIndex, Postings};
pub use paginate::{paginate, Page, Paginator};
pub use query::Query;
pub use ranking::{MAX_RESULT_DOCUMENT_COUNT, RELEVANCE_EPSILON};
pub use request_queue::{RequestQueue, REQUEST_WINDOW_SIZE};
pub use server::SearchServer;
pub use stopwords::StopWords;
