use std::fs;
use std::path::PathBuf;

use polars::prelude::DataType;

use crate::errors::ParserError;
use crate::parse_movie_csv;
use crate::schema::{MovieColumn, MOVIE_COLUMNS};

fn fixture(path: &str) -> Vec<u8> {
    let base = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let full_path = base.join("tests/data").join(path);
    fs::read(&full_path)
        .unwrap_or_else(|err| panic!("failed to read fixture {}: {}", full_path.display(), err))
}

fn column_names(df: &polars::prelude::DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect()
}

#[test]
fn parses_tmdb_export_into_retained_columns() {
    let parsed = parse_movie_csv(&fixture("tmdb_sample.csv")).expect("sample parse failed");

    assert_eq!(parsed.df.height(), 10);
    assert_eq!(column_names(&parsed.df), MOVIE_COLUMNS);
    assert_eq!(parsed.source_columns, 21);
    assert_eq!(parsed.dropped_columns.len(), 15);
    assert!(parsed.dropped_columns.iter().any(|name| name == "cast"));
    assert!(parsed.dropped_columns.iter().any(|name| name == "overview"));
    assert!(!parsed.dropped_columns.iter().any(|name| name == "genres"));

    for column in MovieColumn::ALL {
        let series = parsed.df.column(column.canonical_name()).unwrap();
        assert_eq!(series.dtype(), &column.dtype(), "dtype of {column}");
    }
}

#[test]
fn quoted_fields_do_not_shift_columns() {
    let parsed = parse_movie_csv(&fixture("tmdb_sample.csv")).unwrap();

    let popularity = parsed.df.column("popularity").unwrap().f64().unwrap();
    let genres = parsed.df.column("genres").unwrap().str().unwrap();
    let years = parsed.df.column("release_year").unwrap().i32().unwrap();
    let revenue = parsed.df.column("revenue_adj").unwrap().f64().unwrap();

    assert_eq!(popularity.get(0), Some(32.985763));
    assert_eq!(genres.get(0), Some("Action|Adventure|Science Fiction|Thriller"));
    assert_eq!(years.get(0), Some(2015));
    assert_eq!(revenue.get(0), Some(1392445893.0));

    assert_eq!(genres.get(6), Some("Drama"));
    assert_eq!(years.get(6), Some(1972));
}

#[test]
fn empty_and_unparseable_cells_become_nulls() {
    let parsed = parse_movie_csv(&fixture("tmdb_sample.csv")).unwrap();

    let genres = parsed.df.column("genres").unwrap().str().unwrap();
    let votes = parsed.df.column("vote_average").unwrap().f64().unwrap();

    assert_eq!(genres.get(3), None);
    assert_eq!(votes.get(9), None);
    assert_eq!(parsed.unparseable_values, 1);
}

#[test]
fn missing_columns_are_reported_by_name() {
    let content = b"popularity,genres,vote_average,title\n1.0,Drama,5.0,Example\n";
    let err = parse_movie_csv(content).unwrap_err();

    match err {
        ParserError::MissingColumns { missing } => {
            assert_eq!(missing, vec!["release_year", "budget_adj", "revenue_adj"]);
        }
        other => panic!("expected MissingColumns, got {other:?}"),
    }
}

#[test]
fn duplicate_required_column_is_rejected() {
    let content = b"popularity,genres,vote_average,release_year,budget_adj,revenue_adj,genres\n";
    let err = parse_movie_csv(content).unwrap_err();

    assert!(matches!(
        err,
        ParserError::DuplicateColumn { ref column } if column == "genres"
    ));
}

#[test]
fn empty_input_is_rejected() {
    let err = parse_movie_csv(b"").unwrap_err();
    assert!(matches!(err, ParserError::EmptyInput));
}

#[test]
fn header_only_input_yields_empty_frame() {
    let content = b"popularity,genres,vote_average,release_year,budget_adj,revenue_adj\n";
    let parsed = parse_movie_csv(content).unwrap();

    assert_eq!(parsed.df.height(), 0);
    assert_eq!(column_names(&parsed.df), MOVIE_COLUMNS);
}

#[test]
fn column_order_in_source_does_not_matter() {
    let content = b"\xef\xbb\xbfrevenue_adj,release_year,genres,id,budget_adj,vote_average,popularity\n\
        200,1994,Crime|Drama,1,100,8.1,4.5\n";
    let parsed = parse_movie_csv(content).unwrap();

    assert_eq!(column_names(&parsed.df), MOVIE_COLUMNS);
    assert_eq!(parsed.dropped_columns, vec!["id"]);

    assert_eq!(
        parsed.df.column("genres").unwrap().str().unwrap().get(0),
        Some("Crime|Drama")
    );
    assert_eq!(
        parsed.df.column("popularity").unwrap().f64().unwrap().get(0),
        Some(4.5)
    );
    assert_eq!(
        parsed.df.column("revenue_adj").unwrap().f64().unwrap().get(0),
        Some(200.0)
    );
}

#[test]
fn null_markers_and_short_rows_read_as_null() {
    let content = b"popularity,genres,vote_average,release_year,budget_adj,revenue_adj\n\
        NaN,N/A,null,1999,1,2\n\
        1.0,Drama\n";
    let parsed = parse_movie_csv(content).unwrap();

    assert_eq!(parsed.df.height(), 2);
    assert_eq!(parsed.unparseable_values, 0);

    let popularity = parsed.df.column("popularity").unwrap().f64().unwrap();
    let genres = parsed.df.column("genres").unwrap().str().unwrap();
    let votes = parsed.df.column("vote_average").unwrap().f64().unwrap();
    let years = parsed.df.column("release_year").unwrap().i32().unwrap();

    assert_eq!(popularity.get(0), None);
    assert_eq!(genres.get(0), None);
    assert_eq!(votes.get(0), None);
    assert_eq!(years.get(0), Some(1999));

    assert_eq!(genres.get(1), Some("Drama"));
    assert_eq!(years.get(1), None);
    assert_eq!(parsed.df.column("release_year").unwrap().dtype(), &DataType::Int32);
}

#[test]
fn genre_field_keeps_surrounding_whitespace() {
    let content = b"popularity,genres,vote_average,release_year,budget_adj,revenue_adj\n\
        1.0,\" Action|Comedy \", 6.5 ,2001,10,20\n\
        2.0,\"   \",7.0,2002,10,20\n";
    let parsed = parse_movie_csv(content).unwrap();

    let genres = parsed.df.column("genres").unwrap().str().unwrap();
    let votes = parsed.df.column("vote_average").unwrap().f64().unwrap();

    assert_eq!(genres.get(0), Some(" Action|Comedy "));
    assert_eq!(votes.get(0), Some(6.5));
    assert_eq!(genres.get(1), None);
    assert_eq!(parsed.unparseable_values, 0);
}
