use std::collections::BTreeMap;

use polars::prelude::*;
use reelstat_parser::{MovieColumn, RawMovieFrame};
use serde::Serialize;

use crate::cleaning::drop_duplicate_rows;
use crate::types::MovieView;

/// Pre-cleaning diagnostics of a raw movie frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetProfile {
    pub rows: usize,
    pub source_columns: usize,
    pub dropped_columns: Vec<String>,
    pub null_counts: BTreeMap<MovieColumn, usize>,
    pub release_year_distribution: BTreeMap<i32, usize>,
    /// Rows with no genres, by release year. Compared against
    /// `release_year_distribution` to check that dropping them does not skew
    /// the timeline.
    pub null_genre_by_year: BTreeMap<i32, usize>,
    pub duplicate_rows: usize,
    pub zero_budget_and_revenue_rows: usize,
    pub unparseable_values: usize,
}

pub fn profile_dataset(raw: &RawMovieFrame) -> PolarsResult<DatasetProfile> {
    let df = &raw.df;
    let view = MovieView::new(df)?;

    let mut null_counts = BTreeMap::new();
    for column in MovieColumn::ALL {
        let nulls = match column {
            MovieColumn::Genres => (0..view.len())
                .filter(|idx| view.genres_at(*idx).is_none())
                .count(),
            _ => df.column(column.canonical_name())?.null_count(),
        };
        null_counts.insert(column, nulls);
    }

    let mut release_year_distribution = BTreeMap::new();
    let mut null_genre_by_year = BTreeMap::new();
    let mut zero_budget_and_revenue_rows = 0usize;
    for idx in 0..view.len() {
        if let Some(year) = view.release_year.get(idx) {
            *release_year_distribution.entry(year).or_insert(0) += 1;
            if view.genres_at(idx).is_none() {
                *null_genre_by_year.entry(year).or_insert(0) += 1;
            }
        }
        if view.has_zero_budget_and_revenue(idx) {
            zero_budget_and_revenue_rows += 1;
        }
    }

    let duplicate_rows = df.height() - drop_duplicate_rows(df)?.height();

    Ok(DatasetProfile {
        rows: df.height(),
        source_columns: raw.source_columns,
        dropped_columns: raw.dropped_columns.clone(),
        null_counts,
        release_year_distribution,
        null_genre_by_year,
        duplicate_rows,
        zero_budget_and_revenue_rows,
        unparseable_values: raw.unparseable_values,
    })
}
