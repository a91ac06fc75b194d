use polars::prelude::DataFrame;
use reelstat_parser::MovieColumn;
use serde::Serialize;
use tracing::info;

use crate::{
    cleaning::{clean_movies, CleaningReport},
    config::AnalysisConfig,
    decades::{popularity_by_decade, popularity_by_decade_genre},
    error::Result,
    genres::{expand_genres, genre_counts, unique_genre_count},
    statistics::{
        column_summary, fraction_above_mean, histogram, max_budget_record,
        mean_budget_by_year, mean_revenue_by_rating, pearson_correlation, peak_mean_budget_year,
        ColumnSummary, HistogramBin,
    },
    types::MovieRecord,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearMean {
    pub release_year: i32,
    pub mean_budget_adj: f64,
}

/// Scalar answers computed over the cleaned table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScalarSummary {
    pub vote_average: Option<ColumnSummary>,
    pub revenue_adj: Option<ColumnSummary>,
    pub budget_adj: Option<ColumnSummary>,
    pub revenue_above_mean_fraction: Option<f64>,
    pub rating_revenue_correlation: Option<f64>,
    pub max_budget_movie: Option<MovieRecord>,
    pub peak_mean_budget_year: Option<YearMean>,
    pub unique_genres: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Distributions {
    pub vote_average: Vec<HistogramBin>,
    pub revenue_adj: Vec<HistogramBin>,
    pub budget_adj: Vec<HistogramBin>,
}

/// Every table and summary produced by one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisOutput {
    pub cleaning: CleaningReport,
    pub cleaned: DataFrame,
    pub expanded: DataFrame,
    pub genre_counts: DataFrame,
    pub decade_genre_popularity: DataFrame,
    pub decade_popularity: DataFrame,
    pub revenue_by_rating: DataFrame,
    pub budget_by_year: DataFrame,
    pub distributions: Distributions,
    pub summary: ScalarSummary,
}

impl AnalysisOutput {
    /// Tables written by [`crate::outputs::write_outputs`], keyed by file stem.
    pub fn tables(&self) -> [(&'static str, &DataFrame); 6] {
        [
            ("cleaned_movies", &self.cleaned),
            ("genre_counts", &self.genre_counts),
            ("decade_genre_popularity", &self.decade_genre_popularity),
            ("decade_popularity", &self.decade_popularity),
            ("revenue_by_rating", &self.revenue_by_rating),
            ("budget_by_year", &self.budget_by_year),
        ]
    }
}

/// Cleans a frame of retained movie columns and computes every aggregate.
pub fn run_analysis(raw: &DataFrame, config: &AnalysisConfig) -> Result<AnalysisOutput> {
    config.validate()?;

    let cleaned = clean_movies(raw, &config.cleaning)?;
    let df = cleaned.df;

    let expanded = expand_genres(&df)?;
    let genre_counts = genre_counts(&expanded)?;
    let decade_genre_popularity = popularity_by_decade_genre(&expanded)?;
    let decade_popularity = popularity_by_decade(&decade_genre_popularity)?;
    info!(
        expanded_rows = expanded.height(),
        decades = decade_popularity.height(),
        "Aggregated genre popularity by decade"
    );

    let revenue_by_rating = mean_revenue_by_rating(&df)?;
    let budget_by_year = mean_budget_by_year(&df)?;

    let vote = MovieColumn::VoteAverage.canonical_name();
    let revenue = MovieColumn::RevenueAdj.canonical_name();
    let budget = MovieColumn::BudgetAdj.canonical_name();

    let summary = ScalarSummary {
        vote_average: column_summary(&df, vote)?,
        revenue_adj: column_summary(&df, revenue)?,
        budget_adj: column_summary(&df, budget)?,
        revenue_above_mean_fraction: fraction_above_mean(&df, revenue)?,
        rating_revenue_correlation: pearson_correlation(&df, vote, revenue)?,
        max_budget_movie: max_budget_record(&df)?,
        peak_mean_budget_year: peak_mean_budget_year(&budget_by_year)?.map(
            |(release_year, mean_budget_adj)| YearMean {
                release_year,
                mean_budget_adj,
            },
        ),
        unique_genres: unique_genre_count(&expanded)?,
    };

    let bins = config.histogram_bins;
    let distributions = Distributions {
        vote_average: histogram(&df, vote, bins)?,
        revenue_adj: histogram(&df, revenue, bins)?,
        budget_adj: histogram(&df, budget, bins)?,
    };

    info!(
        rows = df.height(),
        unique_genres = summary.unique_genres,
        "Computed movie summaries"
    );

    Ok(AnalysisOutput {
        cleaning: cleaned.report,
        cleaned: df,
        expanded,
        genre_counts,
        decade_genre_popularity,
        decade_popularity,
        revenue_by_rating,
        budget_by_year,
        distributions,
        summary,
    })
}
