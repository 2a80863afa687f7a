use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use docsearch_core::dedup::remove_duplicates;
use docsearch_core::{paginate, DocumentId, DocumentStatus, RequestQueue, SearchServer};
use parking_lot::RwLock;
use serde::Deserialize;
use tracing_subscriber::{EnvFilter, fmt};
use walkdir::WalkDir;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct InputDoc {
    id: DocumentId,
    text: String,
    #[serde(default)]
    status: DocumentStatus,
    #[serde(default)]
    ratings: Vec<i32>,
}

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Load documents into an in-memory TF-IDF index and query it", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Source {
    /// Input path (JSON/JSONL file or directory)
    #[arg(long)]
    input: String,
    /// Space-separated stop words; falls back to the STOP_WORDS env var
    #[arg(long)]
    stop_words: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run queries and print paginated top documents
    Search {
        #[command(flatten)]
        source: Source,
        /// Query to run (repeatable)
        #[arg(long = "query", required = true)]
        queries: Vec<String>,
        /// Only return documents with this status
        #[arg(long, default_value = "actual")]
        status: DocumentStatus,
        /// Results per printed page
        #[arg(long, default_value_t = 2)]
        page_size: usize,
        /// Remove duplicate documents before searching
        #[arg(long, default_value_t = false)]
        dedup: bool,
        /// Print results as JSON instead of pages
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Show which query words a document matches
    Match {
        #[command(flatten)]
        source: Source,
        #[arg(long)]
        query: String,
        #[arg(long)]
        id: DocumentId,
    },
    /// Report and remove documents with identical word sets
    Dedup {
        #[command(flatten)]
        source: Source,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Search { source, queries, status, page_size, dedup, json } => {
            let mut server = load_server(&source)?;
            if dedup {
                remove_duplicates(&mut server);
            }
            run_search(server, &queries, status, page_size, json)
        }
        Commands::Match { source, query, id } => {
            let server = load_server(&source)?;
            let (words, status) = server
                .match_document(&query, id)
                .with_context(|| format!("matching document {id}"))?;
            println!("{{ document_id = {id}, status = {status:?}, words = [{}] }}", words.join(", "));
            Ok(())
        }
        Commands::Dedup { source } => {
            let mut server = load_server(&source)?;
            println!("Before duplicates removed: {}", server.get_document_count());
            for id in remove_duplicates(&mut server) {
                println!("Found duplicate document id {id}");
            }
            println!("After duplicates removed: {}", server.get_document_count());
            Ok(())
        }
    }
}

fn run_search(server: SearchServer, queries: &[String], status: DocumentStatus, page_size: usize, json: bool) -> Result<()> {
    let server = RwLock::new(server);
    let mut queue = RequestQueue::new(&server);
    for query in queries {
        let found = queue
            .add_find_request_by_status(query, status)
            .with_context(|| format!("query {query:?}"))?;
        tracing::info!(query = %query, hits = found.len(), "query done");
        if json {
            println!("{}", serde_json::json!({ "query": query, "results": found }));
            continue;
        }
        println!("Query: {query}");
        for page in paginate(&found, page_size) {
            println!("{page}");
            println!("Page break");
        }
    }
    println!("Total empty requests: {}", queue.no_result_requests());
    Ok(())
}

fn load_server(source: &Source) -> Result<SearchServer> {
    let stop_words = match &source.stop_words {
        Some(s) => s.clone(),
        None => std::env::var("STOP_WORDS").unwrap_or_default(),
    };
    let mut server = SearchServer::new(&stop_words).context("invalid stop words")?;

    let input_path = Path::new(&source.input);
    let mut files: Vec<PathBuf> = Vec::new();
    if input_path.is_dir() {
        for entry in WalkDir::new(input_path).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() {
                if let Some(ext) = p.extension().and_then(|s| s.to_str()) {
                    if matches!(ext, "json" | "jsonl") {
                        files.push(p.to_path_buf());
                    }
                }
            }
        }
    } else if input_path.is_file() {
        files.push(input_path.to_path_buf());
    } else {
        anyhow::bail!("input path {} does not exist", input_path.display());
    }

    for file in files {
        let docs = if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            read_jsonl(&file)?
        } else {
            read_json(&file)?
        };
        for doc in docs {
            ingest_doc(&mut server, doc);
        }
    }
    tracing::info!(num_docs = server.get_document_count(), "ingested documents");
    Ok(server)
}

fn read_jsonl(file: &Path) -> Result<Vec<InputDoc>> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let reader = BufReader::new(f);
    let mut docs = Vec::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let doc: InputDoc = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}", file.display(), lineno + 1))?;
        docs.push(doc);
    }
    Ok(docs)
}

fn read_json(file: &Path) -> Result<Vec<InputDoc>> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let reader = BufReader::new(f);
    let json: serde_json::Value = serde_json::from_reader(reader)
        .with_context(|| format!("parsing {}", file.display()))?;
    let docs = match json {
        serde_json::Value::Array(arr) => arr
            .into_iter()
            .map(serde_json::from_value)
            .collect::<std::result::Result<Vec<InputDoc>, _>>()?,
        serde_json::Value::Object(_) => vec![serde_json::from_value(json)?],
        _ => Vec::new(),
    };
    Ok(docs)
}

/// Bad documents are logged and skipped; the rest of the input still loads.
fn ingest_doc(server: &mut SearchServer, doc: InputDoc) {
    if let Err(err) = server.add_document(doc.id, &doc.text, doc.status, &doc.ratings) {
        tracing::warn!(doc_id = doc.id, %err, "skipping document");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn source(input: &Path, stop_words: &str) -> Source {
        Source { input: input.to_string_lossy().to_string(), stop_words: Some(stop_words.into()) }
    }

    #[test]
    fn loads_json_and_jsonl_skipping_bad_documents() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("a.jsonl"),
            concat!(
                r#"{"id": 1, "text": "funny pet and nasty rat", "ratings": [7, 2, 7]}"#, "\n",
                "\n",
                r#"{"id": -4, "text": "negative id"}"#, "\n",
                r#"{"id": 2, "text": "funny pet with curly hair", "status": "banned"}"#, "\n",
            ),
        )
        .unwrap();
        fs::write(
            dir.path().join("b.json"),
            r#"[{"id": 1, "text": "duplicate id"}, {"id": 3, "text": "nasty rat with curly hair", "ratings": [1]}]"#,
        )
        .unwrap();
        fs::write(dir.path().join("ignored.txt"), "not json").unwrap();

        let server = load_server(&source(dir.path(), "and with")).unwrap();
        assert_eq!(server.document_ids().collect::<Vec<_>>(), vec![1, 2, 3]);
        let found = server.find_top_documents("rat").unwrap();
        assert_eq!(found.iter().map(|d| d.id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(server.find_top_documents_by_status("pet", DocumentStatus::Banned).unwrap()[0].id, 2);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("bad.jsonl");
        fs::write(&file, "{\"id\": 1,\n").unwrap();
        assert!(load_server(&source(&file, "")).is_err());
        assert!(load_server(&source(&dir.path().join("missing"), "")).is_err());
    }

    #[test]
    fn single_object_json_file_loads() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("one.json");
        fs::write(&file, r#"{"id": 42, "text": "cat in the city", "ratings": [1, 2, 3]}"#).unwrap();
        let server = load_server(&source(&file, "in the")).unwrap();
        let found = server.find_top_documents("cat").unwrap();
        assert_eq!((found[0].id, found[0].rating), (42, 2));
    }
}
