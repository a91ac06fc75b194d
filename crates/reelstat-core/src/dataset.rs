use std::fs;
use std::path::{Path, PathBuf};

use blake3::Hasher;
use reelstat_parser::{parse_movie_csv, RawMovieFrame};
use serde::Serialize;
use tracing::info;

use crate::error::{AnalysisError, Result};

/// Where a dataset came from, as recorded alongside outputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceInfo {
    pub path: PathBuf,
    pub hash: String,
}

#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub source: SourceInfo,
    pub raw: RawMovieFrame,
}

/// Reads and schema-checks a movie export. A missing file is fatal.
pub fn load_dataset(path: &Path) -> Result<LoadedDataset> {
    let contents = fs::read(path).map_err(|err| AnalysisError::io(path, err))?;
    let hash = compute_hash(&contents);
    let raw = parse_movie_csv(&contents)?;

    info!(
        path = %path.display(),
        hash = %hash,
        rows = raw.df.height(),
        dropped_columns = raw.dropped_columns.len(),
        unparseable_values = raw.unparseable_values,
        "Loaded movie dataset"
    );

    Ok(LoadedDataset {
        source: SourceInfo {
            path: path.to_path_buf(),
            hash,
        },
        raw,
    })
}

pub fn compute_hash(contents: &[u8]) -> String {
    let mut hasher = Hasher::new();
    hasher.update(contents);
    let hash = hasher.finalize();
    hash.to_hex().to_string()
}
