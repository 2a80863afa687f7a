use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Bad caller input: negative or duplicate id, control characters,
    /// malformed minus-terms, invalid stop words.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Reference to a document the catalog does not hold.
    #[error("not found: {0}")]
    NotFound(String),
}

impl SearchError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        SearchError::InvalidArgument(msg.into())
    }

    pub(crate) fn not_found(msg: impl Into<String>) -> Self {
        SearchError::NotFound(msg.into())
    }
}
