use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::handicap::budget::scoring_budget;
use crate::handicap::index::{WINDOW, window_stats};
use crate::handicap::series::{
    ReportedPoint, SeriesPoint, YearAverage, differentials, reported_series, rolling_series,
    yearly_averages,
};
use crate::model::round::Round;
use crate::model::utils::{date_sort_key, mean, round1};

/// Everything the handicap screen shows, derived from the round history alone.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct HandicapSnapshot {
    pub index: Option<f64>,
    pub anti_index: Option<f64>,
    pub target_diff: Option<f64>,
    pub budget: Option<i32>,
    pub target_course: Option<String>,
    pub last_20_avg: Option<f64>,
    pub year_avg: Option<f64>,
    pub series: Vec<SeriesPoint>,
    pub yearly_avgs: Vec<YearAverage>,
    #[serde(rename = "ghin_series")]
    pub reported_series: Vec<ReportedPoint>,
    pub n_posted: usize,
    pub n_last_20: usize,
}

impl HandicapSnapshot {
    /// True when there is at least one posted round but not enough for the full formula.
    #[must_use]
    pub fn is_provisional(&self) -> bool {
        self.n_last_20 > 0 && self.target_diff.is_none()
    }
}

/// Posted rounds in chronological order. Rounds sharing a date keep their history order.
#[must_use]
pub fn posted_rounds(rounds: &[Round]) -> Vec<&Round> {
    let mut posted: Vec<&Round> = rounds.iter().filter(|r| r.is_posted()).collect();
    posted.sort_by_key(|r| date_sort_key(&r.date));
    posted
}

/// Compute the snapshot as of `today` (used only for the current-year average).
#[must_use]
pub fn compute_snapshot(rounds: &[Round], today: NaiveDate) -> HandicapSnapshot {
    let posted = posted_rounds(rounds);
    let window_start = posted.len().saturating_sub(WINDOW);
    let window = &posted[window_start..];
    let diffs = differentials(window);
    let stats = window_stats(&diffs);

    let (budget, target_course) = match scoring_budget(&posted, stats.target_differential) {
        Some((budget, course)) => (Some(budget), Some(course)),
        None => (None, None),
    };

    let this_year: Vec<f64> = posted
        .iter()
        .filter(|r| r.played_on().is_some_and(|d| d.year() == today.year()))
        .filter_map(|r| r.differential)
        .collect();

    HandicapSnapshot {
        index: stats.index,
        anti_index: stats.anti_index,
        target_diff: stats.target_differential,
        budget,
        target_course,
        last_20_avg: mean(&diffs).map(round1),
        year_avg: mean(&this_year).map(round1),
        series: rolling_series(&posted),
        yearly_avgs: yearly_averages(&posted),
        reported_series: reported_series(&posted),
        n_posted: posted.len(),
        n_last_20: diffs.len(),
    }
}

/// [`compute_snapshot`] as of the local calendar date.
#[must_use]
pub fn handicap_snapshot(rounds: &[Round]) -> HandicapSnapshot {
    compute_snapshot(rounds, chrono::Local::now().date_naive())
}
