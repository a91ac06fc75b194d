use std::fmt;

use polars::prelude::DataType;
use serde::{Deserialize, Serialize};

/// Columns retained from the raw export, in frame order.
pub const MOVIE_COLUMNS: [&str; 6] = [
    "popularity",
    "genres",
    "vote_average",
    "release_year",
    "budget_adj",
    "revenue_adj",
];

pub const COLUMN_COUNT: usize = MOVIE_COLUMNS.len();

pub const GENRE_SEPARATOR: char = '|';

/// Cell values read as null, compared case-insensitively after trimming.
const NULL_MARKERS: [&str; 5] = ["", "nan", "na", "n/a", "null"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovieColumn {
    Popularity,
    Genres,
    VoteAverage,
    ReleaseYear,
    BudgetAdj,
    RevenueAdj,
}

impl MovieColumn {
    pub const ALL: [MovieColumn; COLUMN_COUNT] = [
        MovieColumn::Popularity,
        MovieColumn::Genres,
        MovieColumn::VoteAverage,
        MovieColumn::ReleaseYear,
        MovieColumn::BudgetAdj,
        MovieColumn::RevenueAdj,
    ];

    pub fn canonical_name(&self) -> &'static str {
        match self {
            MovieColumn::Popularity => "popularity",
            MovieColumn::Genres => "genres",
            MovieColumn::VoteAverage => "vote_average",
            MovieColumn::ReleaseYear => "release_year",
            MovieColumn::BudgetAdj => "budget_adj",
            MovieColumn::RevenueAdj => "revenue_adj",
        }
    }

    pub fn dtype(&self) -> DataType {
        match self {
            MovieColumn::Genres => DataType::String,
            MovieColumn::ReleaseYear => DataType::Int32,
            _ => DataType::Float64,
        }
    }

    pub fn from_header(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|column| column.canonical_name() == name)
    }
}

impl fmt::Display for MovieColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

pub(crate) fn is_null_marker(value: &str) -> bool {
    NULL_MARKERS
        .iter()
        .any(|marker| value.eq_ignore_ascii_case(marker))
}
