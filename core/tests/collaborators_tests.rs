use docsearch_core::dedup::{find_duplicates, remove_duplicates};
use docsearch_core::{paginate, DocumentStatus, RequestQueue, SearchServer, REQUEST_WINDOW_SIZE};
use parking_lot::RwLock;

fn add(server: &mut SearchServer, id: i32, text: &str) {
    server.add_document(id, text, DocumentStatus::Actual, &[1, 2, 3]).unwrap();
}

#[test]
fn request_queue_counts_empty_requests_in_window() {
    let server = RwLock::new(SearchServer::new("in the").unwrap());
    let mut queue = RequestQueue::new(&server);

    let empty_requests = REQUEST_WINDOW_SIZE - 1;
    for _ in 0..empty_requests {
        queue.add_find_request("empty request").unwrap();
    }
    assert_eq!(queue.no_result_requests(), empty_requests);

    {
        let mut s = server.write();
        add(&mut s, 10, "cat in the city");
        add(&mut s, 11, "fluffy grey dog");
        add(&mut s, 12, "funny white cat");
        add(&mut s, 13, "funny fluffy fox");
    }

    queue.add_find_request("funny cat").unwrap();
    assert_eq!(queue.no_result_requests(), empty_requests);
    queue.add_find_request("grey fox").unwrap();
    assert_eq!(queue.no_result_requests(), empty_requests - 1);
    queue.add_find_request("green parrot").unwrap();
    assert_eq!(queue.no_result_requests(), empty_requests - 1);
    queue.add_find_request("white cat").unwrap();
    assert_eq!(queue.no_result_requests(), empty_requests - 2);
}

#[test]
fn request_queue_honours_status_and_predicate() {
    let server = RwLock::new(SearchServer::new("").unwrap());
    server.write().add_document(1, "owl", DocumentStatus::Banned, &[4]).unwrap();
    let mut queue = RequestQueue::new(&server);
    assert!(queue.add_find_request("owl").unwrap().is_empty());
    assert_eq!(queue.add_find_request_by_status("owl", DocumentStatus::Banned).unwrap().len(), 1);
    assert_eq!(queue.add_find_request_with("owl", |_, _, rating| rating == 4).unwrap().len(), 1);
    assert_eq!(queue.no_result_requests(), 1);
    assert_eq!(queue.len(), 3);
}

#[test]
fn duplicates_share_word_sets() {
    let mut server = SearchServer::new("and with").unwrap();
    let docs = [
        (1, "funny pet and nasty rat"),
        (2, "funny pet with curly hair"),
        (3, "funny pet with curly hair"),
        (4, "funny pet and curly hair"),
        (5, "funny funny pet and nasty nasty rat"),
        (6, "funny pet and not very nasty rat"),
        (7, "very nasty rat and not very funny pet"),
        (8, "pet with rat and rat and rat"),
        (9, "nasty rat with curly hair"),
    ];
    for (id, text) in docs {
        add(&mut server, id, text);
    }
    assert_eq!(server.get_document_count(), 9);
    assert_eq!(find_duplicates(&server), vec![3, 4, 5, 7]);
    assert_eq!(remove_duplicates(&mut server), vec![3, 4, 5, 7]);
    assert_eq!(server.get_document_count(), 5);
    assert_eq!(server.document_ids().collect::<Vec<_>>(), vec![1, 2, 6, 8, 9]);
    assert!(find_duplicates(&server).is_empty());
}

#[test]
fn remove_duplicates_keeps_one_per_group() {
    let mut server = SearchServer::new("and with").unwrap();
    for (id, text) in [
        (1, "cat in the city"),
        (2, "fluffy grey dog"),
        (3, "fluffy grey dog"),
        (4, "funny white cat"),
        (5, "cat in the city"),
        (6, "fluffy grey dog"),
        (7, "funny fluffy fox"),
        (8, "cat in the city"),
    ] {
        add(&mut server, id, text);
    }
    remove_duplicates(&mut server);
    assert_eq!(server.get_document_count(), 4);
    assert!(server.find_top_documents("dog").unwrap().iter().all(|d| d.id == 2));
}

#[test]
fn search_results_paginate() {
    let mut server = SearchServer::new("in the").unwrap();
    add(&mut server, 10, "cat in the city");
    add(&mut server, 11, "fluffy grey dog");
    add(&mut server, 12, "funny white cat");
    add(&mut server, 13, "funny fluffy fox");

    let results = server.find_top_documents("funny cat").unwrap();
    assert_eq!(results.len(), 3);
    let pages = paginate(&results, 2);
    assert_eq!(pages.len(), 2);

    let flattened: Vec<i32> = pages.iter().flat_map(|p| p.items().iter().map(|d| d.id)).collect();
    let expected: Vec<i32> = results.iter().map(|d| d.id).collect();
    assert_eq!(flattened, expected);
    let first = pages.iter().next().unwrap().to_string();
    assert!(first.starts_with(&format!("{{ document_id = {}", results[0].id)));
}
