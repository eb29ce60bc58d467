//! CSV tables for QA pairs and chunks.

use crate::error::IngestResult;
use parley_core::{ChunkedCorpus, Corpus, QaPair};
use serde::Serialize;
use std::path::Path;
use tracing::info;

const CHUNK_HEADER: [&str; 2] = ["File", "Content"];
const PAIR_HEADER: [&str; 3] = ["File", "Question", "Answer"];

/// Write the chunk table with columns `File,Content`.
pub fn save_chunks(chunked: &ChunkedCorpus, path: &Path) -> IngestResult<()> {
    write_table(path, &CHUNK_HEADER, chunked.chunks())?;
    info!("Wrote {} chunks to {}", chunked.len(), path.display());
    Ok(())
}

/// Write the QA table with columns `File,Question,Answer`.
pub fn save_pairs(corpus: &Corpus, path: &Path) -> IngestResult<()> {
    write_table(path, &PAIR_HEADER, corpus.pairs())?;
    info!("Wrote {} pairs to {}", corpus.len(), path.display());
    Ok(())
}

/// Read a QA table written by [`save_pairs`].
pub fn load_pairs(path: &Path) -> IngestResult<Corpus> {
    let mut reader = csv::Reader::from_path(path)?;
    let pairs = reader
        .deserialize::<QaPair>()
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Corpus::from_pairs(pairs))
}

// The header is written by hand so an empty table still has one.
fn write_table<T: Serialize>(path: &Path, header: &[&str], rows: &[T]) -> IngestResult<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    writer.write_record(header)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_core::Chunk;
    use tempfile::tempdir;

    #[test]
    fn test_save_chunks() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("chunks.csv");

        let mut chunked = ChunkedCorpus::new();
        chunked.extend(vec![
            Chunk::new("a.docx", "Q: a?\nanswer, with comma"),
            Chunk::new("b.docx", "Q: \"quoted\"?"),
        ]);
        save_chunks(&chunked, &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(headers, vec!["File", "Content"]);

        let rows: Vec<Chunk> = reader.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(rows, chunked.chunks());
    }

    #[test]
    fn test_empty_table_has_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.csv");

        save_chunks(&ChunkedCorpus::new(), &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap().trim(), "File,Content");
    }

    #[test]
    fn test_pairs_table() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("qa.csv");

        let corpus = Corpus::from_pairs(vec![
            QaPair::new("a.docx", "Q: a?", "one\ntwo"),
            QaPair::new("a.docx", "Q: b?", ""),
        ]);
        save_pairs(&corpus, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("File,Question,Answer\n"));

        let loaded = load_pairs(&path).unwrap();
        assert_eq!(loaded.pairs(), corpus.pairs());
    }

    #[test]
    fn test_unwritable_path() {
        let result = save_chunks(&ChunkedCorpus::new(), Path::new("/no/such/dir/out.csv"));
        assert!(result.is_err());
    }
}
