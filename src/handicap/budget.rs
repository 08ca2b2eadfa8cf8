use crate::handicap::index::{COUNTING, WINDOW};
use crate::handicap::series::SeriesPoint;
use crate::model::course::NOMINAL_SLOPE;
use crate::model::round::Round;
use crate::model::utils::{mean, round1};

/// Strokes over par that would still produce a differential at `target`.
#[must_use]
pub fn course_budget(rating: f64, slope: u32, par: i32, target: f64) -> i32 {
    #[allow(clippy::cast_possible_truncation)]
    let allowed = (rating + target * f64::from(slope) / NOMINAL_SLOPE).floor() as i32;
    allowed - par
}

/// Budget on the most recently posted 18-hole round with a rating and slope.
/// Nine-hole rounds are never used.
#[must_use]
pub fn scoring_budget(posted: &[&Round], target: Option<f64>) -> Option<(i32, String)> {
    let target = target?;
    posted.iter().rev().find_map(|r| match (r.nine_hole, r.rating, r.slope) {
        (false, Some(rating), Some(slope)) if slope > 0 => Some((
            course_budget(rating, slope, r.par_or_default(), target),
            r.course_name.clone(),
        )),
        _ => None,
    })
}

/// Course handicap: `round(index * slope / 113 + (rating - par))`.
#[must_use]
pub fn course_handicap(index: f64, rating: f64, slope: u32, par: i32) -> i32 {
    #[allow(clippy::cast_possible_truncation)]
    let ch = (index * f64::from(slope) / NOMINAL_SLOPE + (rating - f64::from(par))).round() as i32;
    ch
}

/// Index if `differential` were posted next: the last 19 series differentials plus the
/// new one, lowest eight averaged. Undefined below eight rounds.
#[must_use]
pub fn projected_index(series: &[SeriesPoint], differential: f64) -> Option<f64> {
    let keep = WINDOW - 1;
    let mut window: Vec<f64> = series
        .iter()
        .skip(series.len().saturating_sub(keep))
        .map(|p| p.differential)
        .collect();
    window.push(differential);
    if window.len() < COUNTING {
        return None;
    }
    window.sort_by(f64::total_cmp);
    mean(&window[..COUNTING]).map(round1)
}
