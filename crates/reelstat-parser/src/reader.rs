use csv::StringRecord;

use crate::errors::ParserError;
use crate::model::{MovieColumns, RawMovieFrame};
use crate::schema::{is_null_marker, MovieColumn, COLUMN_COUNT};

/// Position of each retained column within the source header.
#[derive(Debug, Clone)]
pub struct ColumnLayout {
    indices: [usize; COLUMN_COUNT],
    dropped: Vec<String>,
    width: usize,
}

impl ColumnLayout {
    pub fn from_header(header: &StringRecord) -> Result<Self, ParserError> {
        let mut found: [Option<usize>; COLUMN_COUNT] = [None; COLUMN_COUNT];
        let mut dropped = Vec::new();

        for (idx, raw_name) in header.iter().enumerate() {
            let name = raw_name.trim_start_matches('\u{feff}').trim();
            match MovieColumn::from_header(name) {
                Some(column) => {
                    let slot = &mut found[column as usize];
                    if slot.is_some() {
                        return Err(ParserError::DuplicateColumn {
                            column: name.to_string(),
                        });
                    }
                    *slot = Some(idx);
                }
                None => dropped.push(name.to_string()),
            }
        }

        let missing: Vec<String> = MovieColumn::ALL
            .iter()
            .zip(found.iter())
            .filter(|(_, idx)| idx.is_none())
            .map(|(column, _)| column.canonical_name().to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ParserError::MissingColumns { missing });
        }

        let mut indices = [0usize; COLUMN_COUNT];
        for (slot, idx) in indices.iter_mut().zip(found) {
            *slot = idx.unwrap_or_default();
        }

        Ok(Self {
            indices,
            dropped,
            width: header.len(),
        })
    }

    pub fn index_of(&self, column: MovieColumn) -> usize {
        self.indices[column as usize]
    }

    pub fn dropped_columns(&self) -> &[String] {
        &self.dropped
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Numeric fields are trimmed. `genres` is kept as written, surrounding
    /// whitespace included, unless it is blank or a null marker.
    fn field<'r>(&self, record: &'r StringRecord, column: MovieColumn) -> Option<&'r str> {
        let value = record.get(self.index_of(column))?;
        let trimmed = value.trim();
        if is_null_marker(trimmed) {
            return None;
        }
        match column {
            MovieColumn::Genres => Some(value),
            _ => Some(trimmed),
        }
    }
}

/// Parses a movie export with a header row into its retained columns.
///
/// Schema problems fail fast. Row-level problems never do: empty or
/// unparseable cells become nulls for the cleaning stage to drop.
pub fn parse_movie_csv(content: &[u8]) -> Result<RawMovieFrame, ParserError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content);

    let mut records = reader.records();

    let header = records.next().ok_or(ParserError::EmptyInput)??;
    let layout = ColumnLayout::from_header(&header)?;

    let mut columns = MovieColumns::default();
    let mut unparseable = 0usize;

    for record in records {
        let record = record?;
        push_record(&layout, &record, &mut columns, &mut unparseable);
    }

    let df = columns.into_dataframe()?;

    Ok(RawMovieFrame {
        df,
        dropped_columns: layout.dropped_columns().to_vec(),
        source_columns: layout.width(),
        unparseable_values: unparseable,
    })
}

fn push_record(
    layout: &ColumnLayout,
    record: &StringRecord,
    columns: &mut MovieColumns,
    unparseable: &mut usize,
) {
    columns.popularity.push(parse_optional_f64(
        layout.field(record, MovieColumn::Popularity),
        unparseable,
    ));
    columns.genres.push(
        layout
            .field(record, MovieColumn::Genres)
            .map(|value| value.to_string()),
    );
    columns.vote_average.push(parse_optional_f64(
        layout.field(record, MovieColumn::VoteAverage),
        unparseable,
    ));
    columns.release_year.push(parse_optional_i32(
        layout.field(record, MovieColumn::ReleaseYear),
        unparseable,
    ));
    columns.budget_adj.push(parse_optional_f64(
        layout.field(record, MovieColumn::BudgetAdj),
        unparseable,
    ));
    columns.revenue_adj.push(parse_optional_f64(
        layout.field(record, MovieColumn::RevenueAdj),
        unparseable,
    ));
}

fn parse_optional_f64(value: Option<&str>, unparseable: &mut usize) -> Option<f64> {
    let value = value?;
    match value.parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => Some(parsed),
        _ => {
            *unparseable += 1;
            None
        }
    }
}

fn parse_optional_i32(value: Option<&str>, unparseable: &mut usize) -> Option<i32> {
    let value = value?;
    match value.parse::<i32>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            *unparseable += 1;
            None
        }
    }
}
