use ahash::RandomState;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::handicap::index::{index_for_window, trailing_window};
use crate::model::round::Round;
use crate::model::utils::{mean, round1};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SeriesPoint {
    pub date: String,
    pub differential: f64,
    /// Index as it stood right after this round was posted.
    pub index_after: Option<f64>,
    pub course: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct YearAverage {
    pub year: i32,
    pub avg: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ReportedPoint {
    pub date: String,
    pub reported_index: f64,
}

/// Differentials of posted rounds, in the order given.
#[must_use]
pub fn differentials(posted: &[&Round]) -> Vec<f64> {
    posted.iter().filter_map(|r| r.differential).collect()
}

/// Index evolution: for each posted round, the index over the trailing window ending at
/// that round. Every point is recomputed from its own window.
#[must_use]
pub fn rolling_series(posted: &[&Round]) -> Vec<SeriesPoint> {
    let points: Vec<(&Round, f64)> = posted
        .iter()
        .filter_map(|r| r.differential.map(|d| (*r, d)))
        .collect();
    let diffs: Vec<f64> = points.iter().map(|(_, d)| *d).collect();
    points
        .iter()
        .enumerate()
        .map(|(i, (r, d))| SeriesPoint {
            date: r.date.clone(),
            differential: *d,
            index_after: index_for_window(trailing_window(&diffs, i)),
            course: r.course_name.clone(),
        })
        .collect()
}

#[must_use]
pub fn yearly_averages(posted: &[&Round]) -> Vec<YearAverage> {
    let mut by_year: HashMap<i32, Vec<f64>, RandomState> = HashMap::default();
    for r in posted {
        if let (Some(year), Some(d)) = (r.year(), r.differential) {
            by_year.entry(year).or_default().push(d);
        }
    }

    let mut years: Vec<YearAverage> = by_year
        .into_iter()
        .filter_map(|(year, diffs)| mean(&diffs).map(|m| YearAverage { year, avg: round1(m) }))
        .collect();
    years.sort_by_key(|y| y.year);
    years
}

#[must_use]
pub fn reported_series(posted: &[&Round]) -> Vec<ReportedPoint> {
    posted
        .iter()
        .filter_map(|r| {
            r.reported_index.map(|reported_index| ReportedPoint {
                date: r.date.clone(),
                reported_index,
            })
        })
        .collect()
}
