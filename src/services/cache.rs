use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use anyhow::{Context, Result};

use crate::model::resource::Dataset;

/// A cached dataset older than this is refetched.
pub const UPDATE_TIME: Duration = Duration::from_secs(60 * 15);

pub fn cache_path(dir: &Path, project: &str, language: &str) -> PathBuf {
    dir.join(format!("{project}_resources_{language}.json"))
}

// Age rule kept separate from the filesystem lookup so the 900-second
// boundary can be tested against constructed times.
fn fresh_at(modified: SystemTime, now: SystemTime) -> bool {
    match now.duration_since(modified) {
        Ok(age) => age <= UPDATE_TIME,
        // mtime in the future counts as fresh
        Err(_) => true,
    }
}

pub fn is_fresh(dir: &Path, project: &str, language: &str) -> bool {
    let path = cache_path(dir, project, language);
    match fs::metadata(&path).and_then(|meta| meta.modified()) {
        Ok(modified) => fresh_at(modified, SystemTime::now()),
        Err(_) => false,
    }
}

pub fn load(dir: &Path, project: &str, language: &str) -> Result<Dataset> {
    let path = cache_path(dir, project, language);
    let data = fs::read_to_string(&path)
        .with_context(|| format!("failed to read cache file {}", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("invalid cache file {}", path.display()))
}

pub fn save(dir: &Path, project: &str, language: &str, dataset: &Dataset) -> Result<()> {
    let path = cache_path(dir, project, language);
    let json = serde_json::to_string(dataset).context("failed to serialize dataset")?;
    fs::write(&path, json)
        .with_context(|| format!("failed to write cache file {}", path.display()))
}
