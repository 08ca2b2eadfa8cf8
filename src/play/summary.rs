use serde::{Deserialize, Serialize};

use crate::handicap::budget::projected_index;
use crate::handicap::snapshot::HandicapSnapshot;
use crate::model::match_record::Winner;
use crate::model::round::{HoleResult, Side, differential};
use crate::play::state::RoundState;

/// Gross against par over one nine, or over several once they are complete.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NineSummary {
    pub name: String,
    pub holes_played: usize,
    pub par: i32,
    /// Player A in a match; the only player in a solo round.
    pub gross_a: i32,
    pub gross_b: Option<i32>,
}

impl NineSummary {
    #[must_use]
    pub fn vs_par_a(&self) -> i32 {
        self.gross_a - self.par
    }

    #[must_use]
    pub fn vs_par_b(&self) -> Option<i32> {
        self.gross_b.map(|g| g - self.par)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SummaryRow {
    pub hole_number: u32,
    pub par: i32,
    pub gross_a: i32,
    pub gross_b: i32,
    pub stroke_a: bool,
    pub stroke_b: bool,
    pub points_a: i32,
    pub points_b: i32,
    /// A minus B after this hole, carry-in included.
    pub running_lead: i32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct MatchSummary {
    pub points_a: i32,
    pub points_b: i32,
    pub gross_a: i32,
    pub gross_b: i32,
    /// Absolute point difference.
    pub margin: i32,
    pub winner: Winner,
    pub honor_next: Side,
    pub rows: Vec<SummaryRow>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RoundSummary {
    pub date: String,
    pub course_name: String,
    pub holes_played: usize,
    pub gross: i32,
    pub adjusted: i32,
    pub differential: Option<f64>,
    pub projected_index: Option<f64>,
    pub budget: Option<i32>,
    pub budget_remaining: Option<i32>,
    pub nines: Vec<NineSummary>,
    pub total: Option<NineSummary>,
    #[serde(rename = "vd")]
    pub matchplay: Option<MatchSummary>,
}

/// Totals for the nine containing hole `idx`, over the holes recorded so far.
#[must_use]
pub fn nine_summary(state: &RoundState, idx: usize) -> Option<NineSummary> {
    let segment = state.segment_at(idx)?;
    let played = state
        .results
        .iter()
        .enumerate()
        .filter(|(i, _)| segment.contains(*i))
        .map(|(_, r)| r);
    Some(totals(segment.name.clone(), state.is_match(), played))
}

/// Running totals over every completed nine, once at least two are complete.
#[must_use]
pub fn cumulative_summary(state: &RoundState) -> Option<NineSummary> {
    let complete: Vec<_> = state
        .segments
        .iter()
        .filter(|s| s.end() <= state.results.len())
        .collect();
    if complete.len() < 2 {
        return None;
    }
    let end = complete.iter().map(|s| s.end()).max().unwrap_or(0);
    Some(totals(
        "Total".to_string(),
        state.is_match(),
        state.results[..end].iter(),
    ))
}

fn totals<'a>(
    name: String,
    is_match: bool,
    results: impl Iterator<Item = &'a HoleResult>,
) -> NineSummary {
    let mut summary = NineSummary {
        name,
        holes_played: 0,
        par: 0,
        gross_a: 0,
        gross_b: is_match.then_some(0),
    };
    for r in results {
        summary.holes_played += 1;
        summary.par += r.par;
        match r.matchplay {
            Some(m) => {
                summary.gross_a += m.gross(Side::A);
                summary.gross_b = summary.gross_b.map(|g| g + m.gross(Side::B));
            }
            None => summary.gross_a += r.gross,
        }
    }
    summary
}

fn match_summary(state: &RoundState) -> Option<MatchSummary> {
    let setup = state.match_setup()?;
    let mut lead = setup.start_offset;
    let rows = state
        .results
        .iter()
        .filter_map(|r| r.matchplay.map(|m| (r, m)))
        .map(|(r, m)| {
            lead += m.points_a - m.points_b;
            SummaryRow {
                hole_number: r.hole_number,
                par: r.par,
                gross_a: m.gross(Side::A),
                gross_b: m.gross(Side::B),
                stroke_a: m.stroke_a,
                stroke_b: m.stroke_b,
                points_a: m.points_a,
                points_b: m.points_b,
                running_lead: lead,
            }
        })
        .collect::<Vec<_>>();

    Some(MatchSummary {
        points_a: state.points(Side::A),
        points_b: state.points(Side::B),
        gross_a: rows.iter().map(|r| r.gross_a).sum(),
        gross_b: rows.iter().map(|r| r.gross_b).sum(),
        margin: state.margin().abs(),
        winner: Winner::from(state.leader()),
        honor_next: state.honor_next().unwrap_or(setup.initial_honor),
        rows,
    })
}

/// Project the state onto the summary screen. The snapshot, when given, supplies the
/// series the projected index is computed against.
#[must_use]
pub fn summarize(state: &RoundState, snapshot: Option<&HandicapSnapshot>) -> RoundSummary {
    let adjusted = state.adjusted_total();
    let differential = match (state.course.rating, state.course.slope, state.results.is_empty()) {
        (Some(rating), Some(slope), false) => differential(adjusted, rating, slope),
        _ => None,
    };
    let projected = match (snapshot, differential) {
        (Some(snap), Some(diff)) => projected_index(&snap.series, diff),
        _ => None,
    };
    let nines = state
        .segments
        .iter()
        .filter(|s| s.start < state.results.len())
        .filter_map(|s| nine_summary(state, s.start))
        .collect();

    RoundSummary {
        date: state.date.clone(),
        course_name: state.course.name.clone(),
        holes_played: state.results.len(),
        gross: state.gross_total(),
        adjusted,
        differential,
        projected_index: projected,
        budget: state.budget,
        budget_remaining: state.budget_remaining(),
        nines,
        total: cumulative_summary(state),
        matchplay: match_summary(state),
    }
}
