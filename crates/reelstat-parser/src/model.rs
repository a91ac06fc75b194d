use polars::prelude::*;

use crate::errors::ParserError;
use crate::schema::MovieColumn;

/// The retained columns of a movie export, before any cleaning.
///
/// Every column is nullable: missing and unparseable cells are carried as
/// nulls so that the cleaning stage decides what to drop.
#[derive(Debug, Clone)]
pub struct RawMovieFrame {
    pub df: DataFrame,
    /// Header names that were not retained, in source order.
    pub dropped_columns: Vec<String>,
    /// Number of columns in the source header.
    pub source_columns: usize,
    /// Non-empty cells that failed to parse as their column's type.
    pub unparseable_values: usize,
}

#[derive(Debug, Clone, Default)]
pub struct MovieColumns {
    pub popularity: Vec<Option<f64>>,
    pub genres: Vec<Option<String>>,
    pub vote_average: Vec<Option<f64>>,
    pub release_year: Vec<Option<i32>>,
    pub budget_adj: Vec<Option<f64>>,
    pub revenue_adj: Vec<Option<f64>>,
}

impl MovieColumns {
    fn len(&self) -> usize {
        self.popularity.len()
    }

    pub fn into_dataframe(self) -> Result<DataFrame, ParserError> {
        let rows = self.len();
        let lengths = [
            self.genres.len(),
            self.vote_average.len(),
            self.release_year.len(),
            self.budget_adj.len(),
            self.revenue_adj.len(),
        ];
        if lengths.iter().any(|len| *len != rows) {
            return Err(ParserError::Frame {
                message: format!("column lengths {lengths:?} do not match popularity length {rows}"),
            });
        }

        let genres: Vec<Option<&str>> = self.genres.iter().map(|v| v.as_deref()).collect();

        let cols: Vec<Column> = vec![
            Series::new(MovieColumn::Popularity.canonical_name().into(), self.popularity).into(),
            Series::new(MovieColumn::Genres.canonical_name().into(), genres).into(),
            Series::new(MovieColumn::VoteAverage.canonical_name().into(), self.vote_average).into(),
            Series::new(MovieColumn::ReleaseYear.canonical_name().into(), self.release_year).into(),
            Series::new(MovieColumn::BudgetAdj.canonical_name().into(), self.budget_adj).into(),
            Series::new(MovieColumn::RevenueAdj.canonical_name().into(), self.revenue_adj).into(),
        ];

        DataFrame::new(cols).map_err(|err| ParserError::Frame {
            message: format!("failed to build movie dataframe: {err}"),
        })
    }
}
