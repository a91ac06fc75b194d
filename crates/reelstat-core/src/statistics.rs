use polars::prelude::*;
use reelstat_parser::MovieColumn;
use serde::Serialize;

use crate::types::{MovieRecord, MovieView};

pub const RATING_COLUMN: &str = "rating";
pub const MEAN_REVENUE_COLUMN: &str = "mean_revenue_adj";
pub const MEAN_BUDGET_COLUMN: &str = "mean_budget_adj";
pub const MOVIES_COLUMN: &str = "movies";

/// Largest bin count [`histogram`] accepts.
pub const MAX_HISTOGRAM_BINS: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub count: usize,
    pub min: f64,
    pub mean: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Min, mean and max of the non-null values of a Float64 column.
pub fn column_summary(df: &DataFrame, column: &str) -> PolarsResult<Option<ColumnSummary>> {
    let values = df.column(column)?.f64()?;

    let mut count = 0usize;
    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for value in values.into_iter().flatten() {
        count += 1;
        sum += value;
        min = min.min(value);
        max = max.max(value);
    }

    if count == 0 {
        return Ok(None);
    }

    Ok(Some(ColumnSummary {
        count,
        min,
        mean: sum / count as f64,
        max,
    }))
}

/// Share of non-null values strictly greater than the column mean.
pub fn fraction_above_mean(df: &DataFrame, column: &str) -> PolarsResult<Option<f64>> {
    let Some(summary) = column_summary(df, column)? else {
        return Ok(None);
    };
    let values = df.column(column)?.f64()?;
    let above = values
        .into_iter()
        .flatten()
        .filter(|value| *value > summary.mean)
        .count();
    Ok(Some(above as f64 / summary.count as f64))
}

/// Rounds a rating to the nearest whole number, ties to even.
pub fn rating_bucket(vote_average: f64) -> i32 {
    vote_average.round_ties_even() as i32
}

/// Mean adjusted revenue for each whole-number rating.
pub fn mean_revenue_by_rating(df: &DataFrame) -> PolarsResult<DataFrame> {
    let ratings: Int32Chunked = df
        .column(MovieColumn::VoteAverage.canonical_name())?
        .f64()?
        .into_iter()
        .map(|rating| rating.map(rating_bucket))
        .collect();

    let mut frame = df.clone();
    frame.with_column(ratings.with_name(RATING_COLUMN.into()).into_series())?;

    grouped_means(
        frame,
        RATING_COLUMN,
        MovieColumn::RevenueAdj.canonical_name(),
        MEAN_REVENUE_COLUMN,
    )
}

/// Mean adjusted budget for each release year, ascending by year.
pub fn mean_budget_by_year(df: &DataFrame) -> PolarsResult<DataFrame> {
    grouped_means(
        df.clone(),
        MovieColumn::ReleaseYear.canonical_name(),
        MovieColumn::BudgetAdj.canonical_name(),
        MEAN_BUDGET_COLUMN,
    )
}

/// Groups by `key`, averaging `value` into `mean_column` with a row count,
/// ascending by key.
fn grouped_means(
    df: DataFrame,
    key: &str,
    value: &str,
    mean_column: &str,
) -> PolarsResult<DataFrame> {
    df.lazy()
        .filter(col(key).is_not_null().and(col(value).is_not_null()))
        .group_by([col(key)])
        .agg([
            col(value).mean().alias(mean_column),
            len().alias(MOVIES_COLUMN),
        ])
        .sort([key], SortMultipleOptions::default())
        .collect()
}

/// The movie with the largest adjusted budget. On ties the earliest row in
/// table order wins.
pub fn max_budget_record(df: &DataFrame) -> PolarsResult<Option<MovieRecord>> {
    let view = MovieView::new(df)?;

    let mut best: Option<(usize, f64)> = None;
    for (idx, budget) in view.budget_adj.into_iter().enumerate() {
        let Some(budget) = budget else {
            continue;
        };
        if best.map_or(true, |(_, current)| budget > current) {
            best = Some((idx, budget));
        }
    }

    Ok(best.and_then(|(idx, _)| view.record(idx)))
}

/// The year with the highest mean budget in a [`mean_budget_by_year`] table,
/// earliest year on ties.
pub fn peak_mean_budget_year(by_year: &DataFrame) -> PolarsResult<Option<(i32, f64)>> {
    let years = by_year.column(MovieColumn::ReleaseYear.canonical_name())?.i32()?;
    let means = by_year.column(MEAN_BUDGET_COLUMN)?.f64()?;

    let mut best: Option<(i32, f64)> = None;
    for (year, mean) in years.into_iter().zip(means) {
        if let (Some(year), Some(mean)) = (year, mean) {
            if best.map_or(true, |(_, current)| mean > current) {
                best = Some((year, mean));
            }
        }
    }
    Ok(best)
}

/// Equal-width histogram over `[min, max]` of a Float64 column. The last bin
/// is closed on the right; a column with one distinct value gets one bin.
pub fn histogram(df: &DataFrame, column: &str, bins: usize) -> PolarsResult<Vec<HistogramBin>> {
    if bins == 0 || bins > MAX_HISTOGRAM_BINS {
        return Err(PolarsError::ComputeError(
            format!("histogram bins must be between 1 and {MAX_HISTOGRAM_BINS}, got {bins}").into(),
        ));
    }
    let Some(summary) = column_summary(df, column)? else {
        return Ok(Vec::new());
    };

    let span = summary.max - summary.min;
    if span == 0.0 {
        return Ok(vec![HistogramBin {
            lower: summary.min,
            upper: summary.max,
            count: summary.count,
        }]);
    }

    let width = span / bins as f64;
    let mut counts = vec![0usize; bins];
    let values = df.column(column)?.f64()?;
    for value in values.into_iter().flatten() {
        let slot = ((value - summary.min) / width).floor() as usize;
        counts[slot.min(bins - 1)] += 1;
    }

    Ok(counts
        .into_iter()
        .enumerate()
        .map(|(idx, count)| HistogramBin {
            lower: summary.min + idx as f64 * width,
            upper: if idx + 1 == bins {
                summary.max
            } else {
                summary.min + (idx + 1) as f64 * width
            },
            count,
        })
        .collect())
}

/// Pearson correlation of two Float64 columns over rows where both are set.
/// `None` with fewer than two such rows or when either side is constant.
pub fn pearson_correlation(df: &DataFrame, x: &str, y: &str) -> PolarsResult<Option<f64>> {
    let xs = df.column(x)?.f64()?;
    let ys = df.column(y)?.f64()?;

    let pairs: Vec<(f64, f64)> = xs
        .into_iter()
        .zip(ys)
        .filter_map(|(a, b)| Some((a?, b?)))
        .collect();
    if pairs.len() < 2 {
        return Ok(None);
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        covariance += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return Ok(None);
    }
    Ok(Some(covariance / (var_x.sqrt() * var_y.sqrt())))
}
