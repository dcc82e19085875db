//! Result file discovery.
//!
//! Result files follow the `benchmark_results_<ordering-key>.json` naming
//! convention. The ordering key sorts lexicographically in run order
//! (typically `%Y%m%d_%H%M%S`), so the greatest name is the latest run.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{BenchError, BenchResult};
use crate::record::load_records;

pub const RESULT_FILE_PREFIX: &str = "benchmark_results_";
pub const RESULT_FILE_EXT: &str = ".json";

/// Whether `name` matches the result file naming convention.
pub fn is_result_file_name(name: &str) -> bool {
    name.len() > RESULT_FILE_PREFIX.len() + RESULT_FILE_EXT.len()
        && name.starts_with(RESULT_FILE_PREFIX)
        && name.ends_with(RESULT_FILE_EXT)
}

/// A directory holding result files.
#[derive(Debug, Clone)]
pub struct ResultsDir {
    dir: PathBuf,
}

/// Status of one result file, as reported by [`ResultsDir::scan`].
#[derive(Debug)]
pub struct ResultFileStatus {
    pub path: PathBuf,
    pub records: BenchResult<usize>,
}

impl ResultFileStatus {
    pub fn file_name(&self) -> String {
        file_name_of(&self.path)
    }
}

impl ResultsDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// All result files, sorted by name. A missing directory has no results.
    pub fn list(&self) -> BenchResult<Vec<PathBuf>> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(BenchError::io(&self.dir, e)),
        };

        let mut files: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file())
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .map(is_result_file_name)
                    .unwrap_or(false)
            })
            .collect();

        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(files)
    }

    /// The latest result file by naming convention.
    pub fn latest(&self) -> BenchResult<PathBuf> {
        let latest = self
            .list()?
            .pop()
            .ok_or_else(|| BenchError::missing_input("No benchmark results found"))?;
        debug!(path = %latest.display(), "selected latest result file");
        Ok(latest)
    }

    /// List every result file with its decode status. One malformed file
    /// never prevents the others from being reported.
    pub fn scan(&self) -> BenchResult<Vec<ResultFileStatus>> {
        Ok(self
            .list()?
            .into_iter()
            .map(|path| {
                let records = load_records(&path).map(|r| r.len());
                ResultFileStatus { path, records }
            })
            .collect())
    }
}

pub(crate) fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
