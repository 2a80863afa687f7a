//! Sliding-window log of search requests that counts the ones returning nothing.

use crate::document::{Document, DocumentId, DocumentStatus};
use crate::error::Result;
use crate::server::SearchServer;
use parking_lot::RwLock;
use std::collections::VecDeque;

/// Number of requests the window remembers (one per minute of a day).
pub const REQUEST_WINDOW_SIZE: usize = 1440;

/// Wraps searches against a shared server and tracks how many of the last
/// [`REQUEST_WINDOW_SIZE`] requests returned no documents.
///
/// The queue only borrows the server. Each search takes a read guard for its own duration,
/// so the owner can keep adding or removing documents through the write guard between
/// requests.
pub struct RequestQueue<'a> {
    server: &'a RwLock<SearchServer>,
    // true = request returned no documents; front is the oldest
    requests: VecDeque<bool>,
    no_result_requests: usize,
}

impl<'a> RequestQueue<'a> {
    pub fn new(server: &'a RwLock<SearchServer>) -> Self {
        Self { server, requests: VecDeque::with_capacity(REQUEST_WINDOW_SIZE), no_result_requests: 0 }
    }

    pub fn add_find_request_with<P>(&mut self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool,
    {
        let found = self.server.read().find_top_documents_with(raw_query, predicate)?;
        self.record(found.is_empty());
        Ok(found)
    }

    pub fn add_find_request_by_status(
        &mut self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.add_find_request_with(raw_query, |_, document_status, _| document_status == status)
    }

    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<Document>> {
        self.add_find_request_by_status(raw_query, DocumentStatus::Actual)
    }

    pub fn no_result_requests(&self) -> usize {
        self.no_result_requests
    }

    /// Requests currently inside the window.
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    fn record(&mut self, no_result: bool) {
        if self.requests.len() >= REQUEST_WINDOW_SIZE {
            if let Some(true) = self.requests.pop_front() {
                self.no_result_requests -= 1;
            }
        }
        if no_result {
            self.no_result_requests += 1;
        }
        self.requests.push_back(no_result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_evicts_oldest_request() {
        let server = RwLock::new(SearchServer::new("").unwrap());
        server.write().add_document(1, "cat", DocumentStatus::Actual, &[]).unwrap();
        let mut queue = RequestQueue::new(&server);

        queue.add_find_request("cat").unwrap();
        for _ in 0..REQUEST_WINDOW_SIZE - 1 {
            queue.add_find_request("dog").unwrap();
        }
        assert_eq!(queue.len(), REQUEST_WINDOW_SIZE);
        assert_eq!(queue.no_result_requests(), REQUEST_WINDOW_SIZE - 1);

        // evicts the successful "cat" request
        queue.add_find_request("dog").unwrap();
        assert_eq!(queue.no_result_requests(), REQUEST_WINDOW_SIZE);
        // evicts a "dog" request
        queue.add_find_request("cat").unwrap();
        assert_eq!(queue.no_result_requests(), REQUEST_WINDOW_SIZE - 1);
        assert_eq!(queue.len(), REQUEST_WINDOW_SIZE);
    }

    #[test]
    fn failed_request_is_not_recorded() {
        let server = RwLock::new(SearchServer::new("").unwrap());
        let mut queue = RequestQueue::new(&server);
        assert!(queue.add_find_request("--cat").is_err());
        assert!(queue.is_empty());
        assert_eq!(queue.no_result_requests(), 0);
    }
}
