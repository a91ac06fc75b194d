use std::collections::BTreeMap;

use polars::prelude::*;

use reelstat_core::decades::{
    decade_label, decade_of, decades_present, popularity_by_decade, popularity_by_decade_genre,
    ranked_genres_in_decade,
};

fn expanded() -> PolarsResult<DataFrame> {
    DataFrame::new(vec![
        Series::new(
            "release_year".into(),
            vec![1994i32, 1994, 1999, 2015, 2015, 2012, 1972, 1975],
        )
        .into(),
        Series::new(
            "popularity".into(),
            vec![5.0f64, 5.0, 1.5, 3.25, 3.25, 0.75, 2.0, 0.5],
        )
        .into(),
        Series::new(
            "genre".into(),
            vec!["Action", "Comedy", "Comedy", "Drama", "Thriller", "Drama", "Drama", "Horror"],
        )
        .into(),
    ])
}

#[test]
fn decades_floor_release_years() {
    assert_eq!(decade_label(1994), "1990");
    assert_eq!(decade_label(2015), "2010");
    assert_eq!(decade_of(2010), 2010);
    assert_eq!(decade_of(1969), 1960);
}

#[test]
fn decade_mapping_is_idempotent_and_monotonic() {
    let mut previous = decade_of(1000);
    for year in 1000..=2999 {
        let decade = decade_of(year);
        assert_eq!(decade_of(decade), decade);
        assert!(decade <= year && year - decade < 10);
        assert!(decade >= previous);
        assert_eq!(decade_label(year), format!("{}0", &year.to_string()[..3]));
        previous = decade;
    }
}

#[test]
fn decade_genre_sums_are_sorted_for_display() -> PolarsResult<()> {
    let table = popularity_by_decade_genre(&expanded()?)?;

    let decades = table.column("decade")?.i32()?;
    let genres = table.column("genre")?.str()?;
    let popularity = table.column("popularity")?.f64()?;

    let rows: Vec<(i32, &str, f64)> = (0..table.height())
        .map(|idx| {
            (
                decades.get(idx).unwrap(),
                genres.get(idx).unwrap(),
                popularity.get(idx).unwrap(),
            )
        })
        .collect();

    assert_eq!(
        rows,
        vec![
            (1970, "Drama", 2.0),
            (1970, "Horror", 0.5),
            (1990, "Comedy", 6.5),
            (1990, "Action", 5.0),
            (2010, "Drama", 4.0),
            (2010, "Thriller", 3.25),
        ]
    );
    Ok(())
}

#[test]
fn decade_totals_match_direct_sums() -> PolarsResult<()> {
    let expanded = expanded()?;
    let by_genre = popularity_by_decade_genre(&expanded)?;
    let totals = popularity_by_decade(&by_genre)?;

    let mut direct: BTreeMap<i32, f64> = BTreeMap::new();
    let years = expanded.column("release_year")?.i32()?;
    let popularity = expanded.column("popularity")?.f64()?;
    for (year, score) in years.into_iter().zip(popularity) {
        *direct.entry(decade_of(year.unwrap())).or_insert(0.0) += score.unwrap();
    }

    let decades = totals.column("decade")?.i32()?;
    let sums = totals.column("popularity")?.f64()?;
    assert_eq!(totals.height(), direct.len());
    for (idx, (decade, expected)) in direct.iter().enumerate() {
        assert_eq!(decades.get(idx), Some(*decade));
        assert!((sums.get(idx).unwrap() - expected).abs() < 1e-9);
    }
    Ok(())
}

#[test]
fn ranked_genres_list_one_decade_in_descending_order() -> PolarsResult<()> {
    let table = popularity_by_decade_genre(&expanded()?)?;

    let ranked = ranked_genres_in_decade(&table, 1990)?;
    let names: Vec<&str> = ranked.iter().map(|entry| entry.genre.as_str()).collect();
    assert_eq!(names, vec!["Comedy", "Action"]);
    assert_eq!(ranked[0].popularity, 6.5);

    assert!(ranked_genres_in_decade(&table, 1980)?.is_empty());
    assert_eq!(decades_present(&table)?, vec![1970, 1990, 2010]);
    Ok(())
}
