use polars::prelude::*;
use reelstat_parser::{MovieColumn, GENRE_SEPARATOR};

pub const GENRE_COLUMN: &str = "genre";
pub const COUNT_COLUMN: &str = "count";

/// Splits a packed genre field into its tokens. Tokens are not trimmed or
/// checked against any vocabulary.
pub fn split_genres(value: &str) -> impl Iterator<Item = &str> {
    value.split(GENRE_SEPARATOR)
}

/// Fans each movie out into one row per genre, carrying `release_year` and
/// `popularity` from the source row. Rows with a null genre field produce
/// nothing.
pub fn expand_genres(cleaned: &DataFrame) -> PolarsResult<DataFrame> {
    let genres = MovieColumn::Genres.canonical_name();

    cleaned
        .clone()
        .lazy()
        .filter(col(genres).is_not_null())
        .select([
            col(MovieColumn::ReleaseYear.canonical_name()),
            col(MovieColumn::Popularity.canonical_name()),
            col(genres)
                .str()
                .split(lit(GENRE_SEPARATOR.to_string()))
                .alias(GENRE_COLUMN),
        ])
        .explode([GENRE_COLUMN])
        .collect()
}

/// Occurrences of each genre in an expanded table, most frequent first and
/// alphabetical among equals.
pub fn genre_counts(expanded: &DataFrame) -> PolarsResult<DataFrame> {
    expanded
        .clone()
        .lazy()
        .group_by([col(GENRE_COLUMN)])
        .agg([len().alias(COUNT_COLUMN)])
        .sort(
            [COUNT_COLUMN, GENRE_COLUMN],
            SortMultipleOptions::default().with_order_descending_multi([true, false]),
        )
        .collect()
}

pub fn unique_genre_count(expanded: &DataFrame) -> PolarsResult<usize> {
    expanded
        .column(GENRE_COLUMN)?
        .as_materialized_series()
        .n_unique()
}
