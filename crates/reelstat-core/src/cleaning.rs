use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::types::MovieView;

/// Which row-removal rules the cleaning stage applies.
///
/// `drop_zero_budget_and_revenue` treats a row whose adjusted budget and
/// adjusted revenue are both exactly zero as missing data rather than a real
/// zero-cost, zero-revenue movie. This is an unverified assumption about the
/// export, so it can be switched off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CleaningPolicy {
    pub drop_duplicates: bool,
    pub drop_zero_budget_and_revenue: bool,
}

impl Default for CleaningPolicy {
    fn default() -> Self {
        Self {
            drop_duplicates: true,
            drop_zero_budget_and_revenue: true,
        }
    }
}

/// Row counts removed by each cleaning step. Steps run in field order and
/// each count only covers rows that survived the previous steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleaningReport {
    pub input_rows: usize,
    pub duplicate_rows: usize,
    pub null_genre_rows: usize,
    pub incomplete_rows: usize,
    pub zero_budget_and_revenue_rows: usize,
    pub output_rows: usize,
}

impl CleaningReport {
    pub fn dropped_rows(&self) -> usize {
        self.duplicate_rows
            + self.null_genre_rows
            + self.incomplete_rows
            + self.zero_budget_and_revenue_rows
    }
}

#[derive(Debug, Clone)]
pub struct CleanedMovies {
    pub df: DataFrame,
    pub report: CleaningReport,
}

/// Removes duplicate, incomplete and zero-sentinel rows from a frame of
/// retained movie columns, keeping the first occurrence of each duplicate.
pub fn clean_movies(df: &DataFrame, policy: &CleaningPolicy) -> PolarsResult<CleanedMovies> {
    // Schema check up front so a bad frame never reaches the dedupe.
    MovieView::new(df)?;

    let deduped = if policy.drop_duplicates {
        drop_duplicate_rows(df)?
    } else {
        df.clone()
    };

    let view = MovieView::new(&deduped)?;
    let mut report = CleaningReport {
        input_rows: df.height(),
        duplicate_rows: df.height() - deduped.height(),
        ..CleaningReport::default()
    };

    let mut keep = vec![true; view.len()];
    for (idx, kept) in keep.iter_mut().enumerate() {
        if view.genres_at(idx).is_none() {
            *kept = false;
            report.null_genre_rows += 1;
        } else if !view.is_complete(idx) {
            *kept = false;
            report.incomplete_rows += 1;
        }
    }

    if policy.drop_zero_budget_and_revenue {
        for (idx, kept) in keep.iter_mut().enumerate() {
            if *kept && view.has_zero_budget_and_revenue(idx) {
                *kept = false;
                report.zero_budget_and_revenue_rows += 1;
            }
        }
    } else {
        debug!("Zero budget and revenue rows retained by policy");
    }

    let mask: BooleanChunked = keep.iter().copied().collect();
    let cleaned = deduped.filter(&mask)?;
    report.output_rows = cleaned.height();

    info!(
        input_rows = report.input_rows,
        duplicate_rows = report.duplicate_rows,
        null_genre_rows = report.null_genre_rows,
        incomplete_rows = report.incomplete_rows,
        zero_budget_and_revenue_rows = report.zero_budget_and_revenue_rows,
        output_rows = report.output_rows,
        "Cleaned movie table"
    );

    Ok(CleanedMovies {
        df: cleaned,
        report,
    })
}

/// Drops rows that repeat an earlier row in every column, keeping the first
/// occurrence in table order.
pub(crate) fn drop_duplicate_rows(df: &DataFrame) -> PolarsResult<DataFrame> {
    df.clone()
        .lazy()
        .unique_stable(None, UniqueKeepStrategy::First)
        .collect()
}
