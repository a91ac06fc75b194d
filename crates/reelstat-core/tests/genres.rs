use polars::prelude::*;

use reelstat_core::genres::{expand_genres, genre_counts, split_genres, unique_genre_count};

fn cleaned(genres: &[&str], years: &[i32], popularity: &[f64]) -> PolarsResult<DataFrame> {
    DataFrame::new(vec![
        Series::new("popularity".into(), popularity.to_vec()).into(),
        Series::new("genres".into(), genres.to_vec()).into(),
        Series::new("release_year".into(), years.to_vec()).into(),
    ])
}

#[test]
fn expansion_emits_one_row_per_genre() -> PolarsResult<()> {
    let df = cleaned(&["Action|Comedy"], &[1994], &[5.0])?;
    let expanded = expand_genres(&df)?;

    assert_eq!(expanded.height(), 2);
    let genres = expanded.column("genre")?.str()?;
    let popularity = expanded.column("popularity")?.f64()?;
    let years = expanded.column("release_year")?.i32()?;

    assert_eq!(genres.get(0), Some("Action"));
    assert_eq!(genres.get(1), Some("Comedy"));
    assert_eq!(popularity.get(0), Some(5.0));
    assert_eq!(popularity.get(1), Some(5.0));
    assert_eq!(years.get(0), Some(1994));
    assert_eq!(years.get(1), Some(1994));
    Ok(())
}

#[test]
fn expansion_row_count_matches_token_count() -> PolarsResult<()> {
    let genres = [
        "Action|Adventure|Science Fiction|Thriller",
        "Drama",
        "Comedy|Drama",
        "Horror|Mystery|Thriller",
    ];
    let df = cleaned(&genres, &[2015, 1972, 1994, 1988], &[1.0, 2.0, 3.0, 4.0])?;
    let expanded = expand_genres(&df)?;

    let expected: usize = genres.iter().map(|g| split_genres(g).count()).sum();
    assert_eq!(expected, 10);
    assert_eq!(expanded.height(), expected);
    Ok(())
}

#[test]
fn tokens_are_taken_verbatim() -> PolarsResult<()> {
    let df = cleaned(&["Sci-Fi| Drama|"], &[2000], &[1.0])?;
    let expanded = expand_genres(&df)?;
    let genres = expanded.column("genre")?.str()?;

    assert_eq!(expanded.height(), 3);
    assert_eq!(genres.get(0), Some("Sci-Fi"));
    assert_eq!(genres.get(1), Some(" Drama"));
    assert_eq!(genres.get(2), Some(""));
    Ok(())
}

#[test]
fn null_genre_rows_produce_nothing() -> PolarsResult<()> {
    let df = DataFrame::new(vec![
        Series::new("popularity".into(), vec![1.0f64, 2.0]).into(),
        Series::new("genres".into(), vec![None, Some("Drama")]).into(),
        Series::new("release_year".into(), vec![2000i32, 2001]).into(),
    ])?;
    let expanded = expand_genres(&df)?;

    assert_eq!(expanded.height(), 1);
    assert_eq!(expanded.column("release_year")?.i32()?.get(0), Some(2001));
    Ok(())
}

#[test]
fn genre_counts_rank_by_frequency_then_name() -> PolarsResult<()> {
    let df = cleaned(
        &["Drama|Comedy", "Drama", "Action|Comedy", "Western"],
        &[2000, 2001, 2002, 2003],
        &[1.0, 1.0, 1.0, 1.0],
    )?;
    let expanded = expand_genres(&df)?;
    let counts = genre_counts(&expanded)?;

    let names = counts.column("genre")?.str()?;
    let totals = counts.column("count")?.u32()?;

    let rows: Vec<(&str, u32)> = names
        .into_iter()
        .zip(totals)
        .map(|(name, total)| (name.unwrap(), total.unwrap()))
        .collect();
    assert_eq!(
        rows,
        vec![("Comedy", 2), ("Drama", 2), ("Action", 1), ("Western", 1)]
    );
    assert_eq!(unique_genre_count(&expanded)?, 4);
    Ok(())
}
