use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};
use polars::prelude::*;
use reelstat_core::{
    decades::{decade_label, decades_present, ranked_genres_in_decade, DECADE_COLUMN},
    genres::{COUNT_COLUMN, GENRE_COLUMN},
    pipelines::ScalarSummary,
    profile::DatasetProfile,
    statistics::{ColumnSummary, MEAN_BUDGET_COLUMN, MEAN_REVENUE_COLUMN, MOVIES_COLUMN, RATING_COLUMN},
    AnalysisOutput, CleaningReport,
};
use reelstat_parser::MovieColumn;

const MILLION: f64 = 1_000_000.0;

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn number(value: impl ToString) -> Cell {
    Cell::new(value.to_string()).set_alignment(CellAlignment::Right)
}

fn millions(value: f64) -> String {
    format!("{:.2}M", value / MILLION)
}

fn optional(value: Option<f64>, format: impl Fn(f64) -> String) -> String {
    value.map(format).unwrap_or_else(|| "-".to_string())
}

pub fn print_analysis(output: &AnalysisOutput, top: usize) -> PolarsResult<()> {
    print_cleaning(&output.cleaning);
    print_summary(&output.summary);
    print_genre_counts(&output.genre_counts)?;
    print_decade_rankings(&output.decade_genre_popularity, top)?;
    print_decade_totals(&output.decade_popularity)?;
    print_revenue_by_rating(&output.revenue_by_rating)?;
    print_budget_by_year(&output.budget_by_year)?;
    Ok(())
}

fn print_cleaning(report: &CleaningReport) {
    let mut table = new_table(vec!["Cleaning step", "Rows"]);
    let steps = [
        ("Input rows", report.input_rows),
        ("Duplicate rows dropped", report.duplicate_rows),
        ("Rows without genres dropped", report.null_genre_rows),
        ("Rows with other missing values dropped", report.incomplete_rows),
        (
            "Zero budget and revenue rows dropped",
            report.zero_budget_and_revenue_rows,
        ),
        ("Rows kept", report.output_rows),
    ];
    for (label, rows) in steps {
        table.add_row(vec![Cell::new(label), number(rows)]);
    }
    println!("{table}");
}

fn summary_row(table: &mut Table, label: &str, summary: Option<&ColumnSummary>, money: bool) {
    let format = |value: f64| {
        if money {
            millions(value)
        } else {
            format!("{value:.2}")
        }
    };
    match summary {
        Some(summary) => table.add_row(vec![
            Cell::new(label),
            number(summary.count),
            number(format(summary.min)),
            number(format(summary.mean)),
            number(format(summary.max)),
        ]),
        None => table.add_row(vec![Cell::new(label), number(0), number("-"), number("-"), number("-")]),
    };
}

fn print_summary(summary: &ScalarSummary) {
    let mut table = new_table(vec!["Column", "Movies", "Min", "Mean", "Max"]);
    summary_row(&mut table, "vote_average", summary.vote_average.as_ref(), false);
    summary_row(&mut table, "revenue_adj", summary.revenue_adj.as_ref(), true);
    summary_row(&mut table, "budget_adj", summary.budget_adj.as_ref(), true);
    println!("{table}");

    let mut table = new_table(vec!["Finding", "Value"]);
    table.add_row(vec![
        "Movies earning above mean revenue".to_string(),
        optional(summary.revenue_above_mean_fraction, |f| {
            format!("{:.0}%", f * 100.0)
        }),
    ]);
    table.add_row(vec![
        "Rating and revenue correlation".to_string(),
        optional(summary.rating_revenue_correlation, |r| format!("{r:.3}")),
    ]);
    table.add_row(vec![
        "Distinct genres".to_string(),
        summary.unique_genres.to_string(),
    ]);
    if let Some(movie) = &summary.max_budget_movie {
        table.add_row(vec![
            "Largest adjusted budget".to_string(),
            format!(
                "{} ({}, {}, rated {:.1})",
                millions(movie.budget_adj),
                movie.release_year,
                movie.genres,
                movie.vote_average
            ),
        ]);
    }
    if let Some(peak) = &summary.peak_mean_budget_year {
        table.add_row(vec![
            "Year with highest mean budget".to_string(),
            format!("{} ({})", peak.release_year, millions(peak.mean_budget_adj)),
        ]);
    }
    println!("{table}");
}

fn print_genre_counts(counts: &DataFrame) -> PolarsResult<()> {
    let genres = counts.column(GENRE_COLUMN)?.str()?;
    let totals = counts.column(COUNT_COLUMN)?.u32()?;

    let mut table = new_table(vec!["Genre", "Movies"]);
    for (genre, total) in genres.into_iter().zip(totals) {
        if let (Some(genre), Some(total)) = (genre, total) {
            table.add_row(vec![Cell::new(genre), number(total)]);
        }
    }
    println!("{table}");
    Ok(())
}

fn print_decade_rankings(decade_genre: &DataFrame, top: usize) -> PolarsResult<()> {
    let mut table = new_table(vec!["Decade", "Rank", "Genre", "Popularity"]);
    for decade in decades_present(decade_genre)? {
        let ranked = ranked_genres_in_decade(decade_genre, decade)?;
        for (rank, entry) in ranked.iter().take(top).enumerate() {
            table.add_row(vec![
                Cell::new(decade_label(decade)),
                number(rank + 1),
                Cell::new(&entry.genre),
                number(format!("{:.2}", entry.popularity)),
            ]);
        }
    }
    println!("{table}");
    Ok(())
}

fn print_decade_totals(totals: &DataFrame) -> PolarsResult<()> {
    let decades = totals.column(DECADE_COLUMN)?.i32()?;
    let popularity = totals
        .column(MovieColumn::Popularity.canonical_name())?
        .f64()?;

    let mut table = new_table(vec!["Decade", "Total popularity"]);
    for (decade, score) in decades.into_iter().zip(popularity) {
        if let (Some(decade), Some(score)) = (decade, score) {
            table.add_row(vec![
                Cell::new(decade_label(decade)),
                number(format!("{score:.2}")),
            ]);
        }
    }
    println!("{table}");
    Ok(())
}

fn print_revenue_by_rating(by_rating: &DataFrame) -> PolarsResult<()> {
    let ratings = by_rating.column(RATING_COLUMN)?.i32()?;
    let means = by_rating.column(MEAN_REVENUE_COLUMN)?.f64()?;
    let movies = by_rating.column(MOVIES_COLUMN)?.u32()?;

    let mut table = new_table(vec!["Rating", "Movies", "Mean revenue"]);
    for idx in 0..by_rating.height() {
        if let (Some(rating), Some(mean), Some(count)) =
            (ratings.get(idx), means.get(idx), movies.get(idx))
        {
            table.add_row(vec![number(rating), number(count), number(millions(mean))]);
        }
    }
    println!("{table}");
    Ok(())
}

fn print_budget_by_year(by_year: &DataFrame) -> PolarsResult<()> {
    let years = by_year
        .column(MovieColumn::ReleaseYear.canonical_name())?
        .i32()?;
    let means = by_year.column(MEAN_BUDGET_COLUMN)?.f64()?;
    let movies = by_year.column(MOVIES_COLUMN)?.u32()?;

    let mut table = new_table(vec!["Year", "Movies", "Mean budget"]);
    for idx in 0..by_year.height() {
        if let (Some(year), Some(mean), Some(count)) =
            (years.get(idx), means.get(idx), movies.get(idx))
        {
            table.add_row(vec![number(year), number(count), number(millions(mean))]);
        }
    }
    println!("{table}");
    Ok(())
}

pub fn print_profile(profile: &DatasetProfile) {
    let mut table = new_table(vec!["Check", "Value"]);
    table.add_row(vec![Cell::new("Rows"), number(profile.rows)]);
    table.add_row(vec![Cell::new("Source columns"), number(profile.source_columns)]);
    table.add_row(vec![
        Cell::new("Columns ignored"),
        number(profile.dropped_columns.len()),
    ]);
    table.add_row(vec![Cell::new("Duplicate rows"), number(profile.duplicate_rows)]);
    table.add_row(vec![
        Cell::new("Zero budget and revenue rows"),
        number(profile.zero_budget_and_revenue_rows),
    ]);
    table.add_row(vec![
        Cell::new("Unparseable values"),
        number(profile.unparseable_values),
    ]);
    println!("{table}");

    let mut table = new_table(vec!["Column", "Nulls"]);
    for (column, nulls) in &profile.null_counts {
        table.add_row(vec![Cell::new(column), number(nulls)]);
    }
    println!("{table}");

    let mut table = new_table(vec!["Year", "Movies", "Without genres"]);
    for (year, movies) in &profile.release_year_distribution {
        let missing = profile.null_genre_by_year.get(year).copied().unwrap_or(0);
        table.add_row(vec![number(year), number(movies), number(missing)]);
    }
    println!("{table}");
}
