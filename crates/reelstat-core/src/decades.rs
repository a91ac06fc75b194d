use polars::prelude::*;
use reelstat_parser::MovieColumn;
use serde::Serialize;

use crate::genres::GENRE_COLUMN;

pub const DECADE_COLUMN: &str = "decade";

/// Floors a release year to the first year of its decade.
///
/// For four-digit years this is the same as keeping the first three digits
/// and appending a zero (`1994` becomes `1990`).
pub fn decade_of(year: i32) -> i32 {
    year - year.rem_euclid(10)
}

pub fn decade_label(year: i32) -> String {
    decade_of(year).to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenrePopularity {
    pub genre: String,
    pub popularity: f64,
}

/// Adds a `decade` column derived from `release_year` with [`decade_of`].
fn with_decade(expanded: &DataFrame) -> PolarsResult<DataFrame> {
    let decades: Int32Chunked = expanded
        .column(MovieColumn::ReleaseYear.canonical_name())?
        .i32()?
        .into_iter()
        .map(|year| year.map(decade_of))
        .collect();

    let mut frame = expanded.clone();
    frame.with_column(decades.with_name(DECADE_COLUMN.into()).into_series())?;
    Ok(frame)
}

/// Sums popularity per (decade, genre) over an expanded table.
///
/// Rows come out by decade, then by descending popularity, then by genre.
pub fn popularity_by_decade_genre(expanded: &DataFrame) -> PolarsResult<DataFrame> {
    let popularity = MovieColumn::Popularity.canonical_name();

    with_decade(expanded)?
        .lazy()
        .filter(col(DECADE_COLUMN).is_not_null())
        .group_by([col(DECADE_COLUMN), col(GENRE_COLUMN)])
        .agg([col(popularity).sum()])
        .sort(
            [DECADE_COLUMN, popularity, GENRE_COLUMN],
            SortMultipleOptions::default().with_order_descending_multi([false, true, false]),
        )
        .collect()
}

/// Total popularity per decade, summed across the genres of a
/// [`popularity_by_decade_genre`] table.
pub fn popularity_by_decade(decade_genre: &DataFrame) -> PolarsResult<DataFrame> {
    let popularity = MovieColumn::Popularity.canonical_name();

    decade_genre
        .clone()
        .lazy()
        .group_by([col(DECADE_COLUMN)])
        .agg([col(popularity).sum()])
        .sort([DECADE_COLUMN], SortMultipleOptions::default())
        .collect()
}

/// Genres of one decade ordered from most to least popular.
pub fn ranked_genres_in_decade(
    decade_genre: &DataFrame,
    decade: i32,
) -> PolarsResult<Vec<GenrePopularity>> {
    let popularity = MovieColumn::Popularity.canonical_name();

    let ranked = decade_genre
        .clone()
        .lazy()
        .filter(col(DECADE_COLUMN).eq(lit(decade)))
        .sort(
            [popularity, GENRE_COLUMN],
            SortMultipleOptions::default().with_order_descending_multi([true, false]),
        )
        .collect()?;

    let genres = ranked.column(GENRE_COLUMN)?.str()?;
    let scores = ranked.column(popularity)?.f64()?;

    Ok(genres
        .into_iter()
        .zip(scores)
        .filter_map(|(genre, score)| {
            Some(GenrePopularity {
                genre: genre?.to_string(),
                popularity: score?,
            })
        })
        .collect())
}

/// Distinct decades present in a decade table, ascending.
pub fn decades_present(decade_genre: &DataFrame) -> PolarsResult<Vec<i32>> {
    let decades = decade_genre
        .column(DECADE_COLUMN)?
        .as_materialized_series()
        .unique()?
        .sort(SortOptions::default())?;

    Ok(decades.i32()?.into_iter().flatten().collect())
}
