use std::fs::{self, File};
use std::path::{Path, PathBuf};

use chrono::Utc;
use polars::io::parquet::write::{ParquetCompression, ParquetWriter, StatisticsOptions};
use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use serde::Serialize;
use tracing::info;

use crate::cleaning::CleaningReport;
use crate::config::OutputFormat;
use crate::dataset::SourceInfo;
use crate::error::{AnalysisError, Result};
use crate::pipelines::{AnalysisOutput, Distributions, ScalarSummary};

pub const SUMMARY_FILE: &str = "summary.json";

#[derive(Debug, Serialize)]
struct SummaryDocument<'a> {
    generated_at: String,
    source: Option<&'a SourceInfo>,
    cleaning: &'a CleaningReport,
    summary: &'a ScalarSummary,
    distributions: &'a Distributions,
}

/// Writes every aggregate table plus `summary.json` into `dir`, creating it
/// if needed. Returns the written paths in write order.
pub fn write_outputs(
    output: &AnalysisOutput,
    source: Option<&SourceInfo>,
    dir: &Path,
    format: OutputFormat,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).map_err(|err| AnalysisError::io(dir, err))?;

    let mut written = Vec::new();
    for (stem, df) in output.tables() {
        let path = dir.join(format!("{stem}.{}", format.extension()));
        write_table(df, &path, format)?;
        info!(path = %path.display(), rows = df.height(), "Wrote output table");
        written.push(path);
    }

    let summary_path = dir.join(SUMMARY_FILE);
    let document = SummaryDocument {
        generated_at: Utc::now().to_rfc3339(),
        source,
        cleaning: &output.cleaning,
        summary: &output.summary,
        distributions: &output.distributions,
    };
    let bytes = serde_json::to_vec_pretty(&document)?;
    fs::write(&summary_path, bytes).map_err(|err| AnalysisError::io(&summary_path, err))?;
    info!(path = %summary_path.display(), "Wrote analysis summary");
    written.push(summary_path);

    Ok(written)
}

pub fn write_table(df: &DataFrame, path: &Path, format: OutputFormat) -> Result<()> {
    let mut file = File::create(path).map_err(|err| AnalysisError::io(path, err))?;
    let mut clone = df.clone();
    match format {
        OutputFormat::Parquet => {
            ParquetWriter::new(&mut file)
                .with_compression(ParquetCompression::Zstd(None))
                .with_statistics(StatisticsOptions::default())
                .finish(&mut clone)?;
        }
        OutputFormat::Csv => {
            CsvWriter::new(&mut file)
                .include_header(true)
                .finish(&mut clone)?;
        }
    }
    Ok(())
}
