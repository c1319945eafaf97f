//! Topic catalog seed loading.
//!
//! The catalog itself is owned by the wider application; this loader exists
//! so the indexes can be seeded from JSON exports during development and in
//! tests. Publication filtering is left to the indexes.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::types::Topic;

/// Read one JSON file containing an array of topics.
pub fn load_topics(path: &Path) -> Result<Vec<Topic>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading topic catalog {}", path.display()))?;
    let topics: Vec<Topic> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing topic catalog {}", path.display()))?;
    Ok(topics)
}

/// Read every `.json` file under `root`, in path order, and concatenate the
/// topics they contain.
pub fn load_topic_dir(root: &Path) -> Result<Vec<Topic>> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("json"))
        .map(|e| e.path().to_path_buf())
        .collect();
    files.sort();

    let mut all = Vec::new();
    for file in &files {
        all.extend(load_topics(file)?);
    }
    Ok(all)
}
