use crate::document::Document;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize)]
pub struct MetaFile {
    pub num_docs: u64,
    pub created_at: String,
    pub version: u32,
}

pub struct CorpusPaths {
    pub root: PathBuf,
}

impl CorpusPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
    fn documents(&self) -> PathBuf {
        self.root.join("documents.bin")
    }
    fn meta(&self) -> PathBuf {
        self.root.join("meta.json")
    }
}

pub fn save_documents(paths: &CorpusPaths, documents: &[Document]) -> Result<()> {
    create_dir_all(&paths.root)?;
    let mut f = File::create(paths.documents())?;
    let bytes = bincode::serialize(documents)?;
    f.write_all(&bytes)?;
    Ok(())
}

pub fn load_documents(paths: &CorpusPaths) -> Result<Vec<Document>> {
    let mut f = File::open(paths.documents())?;
    let mut buf = Vec::new();
    f.read_to_end(&mut buf)?;
    let documents = bincode::deserialize(&buf)?;
    Ok(documents)
}

pub fn save_meta(paths: &CorpusPaths, meta: &MetaFile) -> Result<()> {
    create_dir_all(&paths.root)?;
    let mut f = File::create(paths.meta())?;
    let json = serde_json::to_string_pretty(meta)?;
    f.write_all(json.as_bytes())?;
    Ok(())
}

pub fn load_meta(paths: &CorpusPaths) -> Result<MetaFile> {
    let mut f = File::open(paths.meta())?;
    let mut buf = String::new();
    f.read_to_string(&mut buf)?;
    let meta: MetaFile = serde_json::from_str(&buf)?;
    Ok(meta)
}

/// Load everything needed to build a search engine: the materialized
/// document list plus the corpus meta.
pub fn load_corpus(paths: &CorpusPaths) -> Result<(Vec<Document>, MetaFile)> {
    let documents = load_documents(paths)?;
    let meta = load_meta(paths)?;
    Ok((documents, meta))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;
    use time::macros::datetime;

    #[test]
    fn corpus_round_trip() {
        let dir = tempdir().unwrap();
        let paths = CorpusPaths::new(dir.path());

        let documents = vec![Document {
            id: "p1".to_string(),
            term_frequencies: HashMap::from([("pizza".to_string(), 2)]),
            normalized_text: "pizza pizza".to_string(),
            taken_at: datetime!(2023-05-01 12:00 UTC),
            comment_count: 3,
            like_count: 10,
        }];
        save_documents(&paths, &documents).unwrap();
        save_meta(
            &paths,
            &MetaFile {
                num_docs: 1,
                created_at: "2023-05-01T12:00:00Z".to_string(),
                version: 1,
            },
        )
        .unwrap();

        let (loaded, meta) = load_corpus(&paths).unwrap();
        assert_eq!(meta.num_docs, 1);
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, "p1");
        assert_eq!(loaded[0].term_frequencies["pizza"], 2);
        assert_eq!(loaded[0].taken_at, documents[0].taken_at);
    }
}
