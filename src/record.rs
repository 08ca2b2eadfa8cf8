//! Conversion between live round state and what goes into the history files.

use crate::error::CoreError;
use crate::model::course::{Course, find_course};
use crate::model::match_record::{MatchRecord, Winner};
use crate::model::round::{Round, Side};
use crate::play::state::{Entry, MatchSetup, Phase, PlayMode, RoundSetup, RoundState};

/// The history entry for a round. The differential is left for [`assign_and_backfill`].
/// Only a round played to the end counts toward the handicap by default.
#[must_use]
pub fn to_round(state: &RoundState) -> Round {
    let finished = state.results.len() == state.holes().len();
    Round {
        id: 0,
        date: state.date.clone(),
        course_id: Some(state.course.id.clone()),
        course_name: state.course.name.clone(),
        rating: state.course.rating,
        slope: state.course.slope,
        par: Some(state.course.par),
        gross: Some(state.gross_total()),
        adjusted: Some(state.adjusted_total()),
        course_handicap: state.course_handicap,
        differential: None,
        include_in_handicap: finished,
        nine_hole: state.course.is_nine_hole(),
        hole_results: state.results.clone(),
        reported_index: None,
    }
}

/// The match-history entry, or `None` for a solo round.
#[must_use]
pub fn to_match_record(state: &RoundState) -> Option<MatchRecord> {
    let setup = state.match_setup()?;
    Some(MatchRecord {
        date: state.date.clone(),
        participant_nines: state.course.nines.clone(),
        holes_played: state.results.len(),
        points_a: state.points(Side::A),
        points_b: state.points(Side::B),
        margin: state.margin().abs(),
        winner: Winner::from(state.leader()),
        honor_next: state.honor_next(),
        initial_honor: Some(setup.initial_honor),
        start_offset: setup.start_offset,
        recorder: setup.recorder,
        carry_in_strokes: setup.carry_in_strokes,
        hole_results: state.results.clone(),
        historical: false,
    })
}

/// Give `round` the next id after `existing` and recompute its differential from its own
/// rating, slope and adjusted score.
#[must_use]
pub fn assign_and_backfill(existing: &[Round], mut round: Round) -> Round {
    round.id = existing.iter().map(|r| r.id).max().unwrap_or(0) + 1;
    round.backfill_differential();
    round
}

/// Take rating, slope and par from the course when the round didn't carry them.
pub fn fill_from_course(round: &mut Round, course: &Course) {
    round.course_id.get_or_insert_with(|| course.id.clone());
    if round.course_name.is_empty() {
        round.course_name.clone_from(&course.name);
    }
    if round.rating.is_none() {
        round.rating = course.rating;
    }
    if round.slope.is_none() {
        round.slope = course.slope;
    }
    round.par.get_or_insert(course.par);
}

/// The course a round was played on: by id first, then by name or alias.
#[must_use]
pub fn course_for_round<'a>(courses: &'a [Course], round: &Round) -> Option<&'a Course> {
    round
        .course_id
        .as_deref()
        .and_then(|id| find_course(courses, id))
        .or_else(|| courses.iter().find(|c| c.matches_name(&round.course_name)))
}

/// Play `entries` from a fresh start. Stops quietly at the end of the course.
///
/// # Errors
///
/// Returns the first error from starting the round or recording a hole.
pub fn replay(setup: RoundSetup, entries: &[Entry]) -> Result<RoundState, CoreError> {
    let mut state = RoundState::start(setup)?;
    for entry in entries {
        if state.record_hole(*entry)?.is_none() {
            break;
        }
        if matches!(state.phase, Phase::HoleRecorded(_)) {
            state.advance()?;
        }
    }
    Ok(state)
}

/// Rebuild the live state of a saved match on its course, e.g. to correct a hole.
///
/// # Errors
///
/// `InvalidArgument` when a hole carries no match detail, otherwise as [`replay`].
pub fn state_from_match(record: &MatchRecord, course: Course) -> Result<RoundState, CoreError> {
    let entries = record
        .hole_results
        .iter()
        .map(|r| {
            r.matchplay
                .map(|m| Entry::Match {
                    a: m.gross_a,
                    b: m.gross_b,
                })
                .ok_or_else(|| {
                    CoreError::InvalidArgument(format!("hole {} has no match scores", r.hole_number))
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    let setup = RoundSetup {
        date: record.date.clone(),
        course,
        mode: PlayMode::Match(MatchSetup {
            initial_honor: record
                .initial_honor
                .or_else(|| record.hole_results.first().and_then(|r| r.matchplay).map(|m| m.honor))
                .unwrap_or(Side::A),
            start_offset: record.start_offset,
            recorder: record.recorder,
            carry_in_strokes: record.carry_in_strokes,
        }),
        handicap: None,
    };
    replay(setup, &entries)
}

/// Rebuild the live state of a saved solo round with its recorded course handicap.
///
/// # Errors
///
/// As [`replay`].
pub fn state_from_round(round: &Round, course: Course) -> Result<RoundState, CoreError> {
    let mut state = RoundState::start(RoundSetup {
        date: round.date.clone(),
        course,
        mode: PlayMode::Solo,
        handicap: None,
    })?;
    state.course_handicap = round.course_handicap;
    for r in &round.hole_results {
        if state.record_hole(Entry::Solo(r.gross))?.is_none() {
            break;
        }
    }
    Ok(state)
}
