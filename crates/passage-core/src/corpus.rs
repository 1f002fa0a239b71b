use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

use crate::traits::DocumentSource;
use crate::types::Document;

/// Loads every `.txt` file under a root directory as one document.
///
/// Files are sorted by path so corpus order (and therefore coarse-pass
/// tie-breaking) is stable across runs.
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn list_txt_files(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();
        for entry in walkdir::WalkDir::new(&self.root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) == Some("txt") {
                files.push(path.to_path_buf());
            }
        }
        files.sort();
        files
    }

    fn read_file_content(path: &Path) -> Result<String> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(content),
            Err(_) => Ok(String::from_utf8_lossy(&fs::read(path)?).to_string()),
        }
    }

    fn doc_id(path: &Path) -> String {
        path.file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string())
    }
}

impl DocumentSource for DirectorySource {
    fn load(&self) -> Result<Vec<Document>> {
        let files = self.list_txt_files();
        if files.is_empty() {
            tracing::warn!(root = %self.root.display(), "no .txt files found");
            return Ok(vec![]);
        }
        let mut docs = Vec::with_capacity(files.len());
        for path in &files {
            let text = Self::read_file_content(path)?;
            docs.push(Document {
                id: Self::doc_id(path),
                path: path.to_string_lossy().to_string(),
                text,
            });
        }
        tracing::debug!(count = docs.len(), "loaded corpus");
        Ok(docs)
    }
}
