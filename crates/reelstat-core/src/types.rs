use polars::prelude::*;
use reelstat_parser::MovieColumn;
use serde::{Deserialize, Serialize};

/// One cleaned movie row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub popularity: f64,
    pub genres: String,
    pub vote_average: f64,
    pub release_year: i32,
    pub budget_adj: f64,
    pub revenue_adj: f64,
}

/// Typed, borrowed access to the retained movie columns of a frame.
///
/// Construction fails with a polars schema error when a column is missing or
/// has the wrong dtype, so stages surface schema drift before touching rows.
pub(crate) struct MovieView<'a> {
    pub popularity: &'a Float64Chunked,
    pub genres: &'a StringChunked,
    pub vote_average: &'a Float64Chunked,
    pub release_year: &'a Int32Chunked,
    pub budget_adj: &'a Float64Chunked,
    pub revenue_adj: &'a Float64Chunked,
    len: usize,
}

impl<'a> MovieView<'a> {
    pub fn new(df: &'a DataFrame) -> PolarsResult<Self> {
        Ok(Self {
            popularity: df.column(MovieColumn::Popularity.canonical_name())?.f64()?,
            genres: df.column(MovieColumn::Genres.canonical_name())?.str()?,
            vote_average: df.column(MovieColumn::VoteAverage.canonical_name())?.f64()?,
            release_year: df.column(MovieColumn::ReleaseYear.canonical_name())?.i32()?,
            budget_adj: df.column(MovieColumn::BudgetAdj.canonical_name())?.f64()?,
            revenue_adj: df.column(MovieColumn::RevenueAdj.canonical_name())?.f64()?,
            len: df.height(),
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Genre field of a row, with blank strings read as missing.
    pub fn genres_at(&self, idx: usize) -> Option<&'a str> {
        self.genres
            .get(idx)
            .filter(|value| !value.trim().is_empty())
    }

    pub fn is_complete(&self, idx: usize) -> bool {
        self.genres_at(idx).is_some()
            && self.popularity.get(idx).is_some()
            && self.vote_average.get(idx).is_some()
            && self.release_year.get(idx).is_some()
            && self.budget_adj.get(idx).is_some()
            && self.revenue_adj.get(idx).is_some()
    }

    pub fn has_zero_budget_and_revenue(&self, idx: usize) -> bool {
        self.budget_adj.get(idx) == Some(0.0) && self.revenue_adj.get(idx) == Some(0.0)
    }

    pub fn record(&self, idx: usize) -> Option<MovieRecord> {
        Some(MovieRecord {
            popularity: self.popularity.get(idx)?,
            genres: self.genres_at(idx)?.to_string(),
            vote_average: self.vote_average.get(idx)?,
            release_year: self.release_year.get(idx)?,
            budget_adj: self.budget_adj.get(idx)?,
            revenue_adj: self.revenue_adj.get(idx)?,
        })
    }
}
