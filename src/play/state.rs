use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::CoreError;
use crate::handicap::budget::{course_budget, course_handicap};
use crate::model::course::{Course, Hole, Segment};
use crate::model::round::{HoleResult, MatchHole, Side};
use crate::play::scoring::{adjusted_hole_score, hole_points, net_score};
use crate::play::strokes::{StrokeFlags, stroke_holes, strokes_for_margin, trailing_side};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchSetup {
    pub initial_honor: Side,
    /// Carry-in advantage in points; positive favours A.
    #[serde(default)]
    pub start_offset: i32,
    /// Whose round is being logged for the handicap.
    #[serde(default = "default_recorder")]
    pub recorder: Side,
    /// Also allocate strokes on the opening nine from the carry-in alone.
    #[serde(default)]
    pub carry_in_strokes: bool,
}

pub(crate) const fn default_recorder() -> Side {
    Side::B
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayMode {
    Solo,
    Match(MatchSetup),
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Setup,
    HoleInProgress(usize),
    /// The hole was recorded and its result is on display.
    HoleRecorded(usize),
    Summary,
}

/// Handicap figures carried into a round at setup.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct HandicapInputs {
    pub index: f64,
    pub target_diff: Option<f64>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RoundSetup {
    pub date: String,
    pub course: Course,
    pub mode: PlayMode,
    #[serde(default)]
    pub handicap: Option<HandicapInputs>,
}

/// Scores entered for a hole.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entry {
    Solo(i32),
    Match { a: i32, b: i32 },
}

/// Gross scores being entered for the current hole, before it is recorded.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pending {
    pub a: i32,
    pub b: i32,
}

/// One live round or match. Every transition validates before it mutates, so a rejected
/// call leaves the state as it was.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RoundState {
    pub date: String,
    /// Course as it was when the round started.
    pub course: Course,
    pub segments: Vec<Segment>,
    pub mode: PlayMode,
    pub index: Option<f64>,
    pub course_handicap: Option<i32>,
    pub budget: Option<i32>,
    pub results: Vec<HoleResult>,
    pub stroke_map: BTreeMap<usize, StrokeFlags>,
    /// Nine-start indices whose stroke allocation has been computed.
    pub processed_boundaries: BTreeSet<usize>,
    pub pending: Pending,
    pub in_progress: bool,
    pub phase: Phase,
}

impl RoundState {
    /// Set up a round on a course with hole data and move to the first hole.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` when the course has no holes to play.
    pub fn start(setup: RoundSetup) -> Result<Self, CoreError> {
        if !setup.course.has_hole_data() {
            return Err(CoreError::InvalidArgument(format!(
                "course '{}' has no hole data",
                setup.course.name
            )));
        }

        let (course_handicap, budget, index) = match (
            setup.handicap,
            setup.course.rating,
            setup.course.slope,
        ) {
            (Some(h), Some(rating), Some(slope)) if slope > 0 => (
                Some(course_handicap(h.index, rating, slope, setup.course.par)),
                h.target_diff
                    .map(|t| course_budget(rating, slope, setup.course.par, t)),
                Some(h.index),
            ),
            _ => (None, None, None),
        };

        let mut state = Self {
            date: setup.date,
            segments: setup.course.segments(),
            course: setup.course,
            mode: setup.mode,
            index,
            course_handicap,
            budget,
            results: Vec::new(),
            stroke_map: BTreeMap::new(),
            processed_boundaries: BTreeSet::new(),
            pending: Pending::default(),
            in_progress: true,
            phase: Phase::Setup,
        };
        state.enter_hole(0);
        Ok(state)
    }

    #[must_use]
    pub fn holes(&self) -> &[Hole] {
        &self.course.holes
    }

    #[must_use]
    pub fn match_setup(&self) -> Option<MatchSetup> {
        match self.mode {
            PlayMode::Match(setup) => Some(setup),
            PlayMode::Solo => None,
        }
    }

    #[must_use]
    pub fn is_match(&self) -> bool {
        self.match_setup().is_some()
    }

    /// Index of the hole to be recorded next, if any remain.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        let n = self.results.len();
        (n < self.holes().len()).then_some(n)
    }

    #[must_use]
    pub fn current_hole(&self) -> Option<&Hole> {
        self.current_index().map(|i| &self.holes()[i])
    }

    #[must_use]
    pub fn segment_at(&self, idx: usize) -> Option<&Segment> {
        self.segments.iter().find(|s| s.contains(idx))
    }

    #[must_use]
    pub fn strokes_on(&self, idx: usize) -> StrokeFlags {
        self.stroke_map.get(&idx).copied().unwrap_or_default()
    }

    /// Whether `idx` starts a nine whose strokes are allocated from the running margin.
    #[must_use]
    pub fn is_nine_boundary(&self, idx: usize) -> bool {
        let Some(setup) = self.match_setup() else {
            return false;
        };
        if idx == 0 {
            return setup.carry_in_strokes;
        }
        self.segments.iter().any(|s| s.start == idx)
    }

    /// Points for a side, including the carry-in when it favours that side.
    #[must_use]
    pub fn points(&self, side: Side) -> i32 {
        let offset = self.match_setup().map_or(0, |m| m.start_offset);
        let carried = match side {
            Side::A => offset.max(0),
            Side::B => (-offset).max(0),
        };
        carried
            + self
                .results
                .iter()
                .filter_map(|r| r.matchplay)
                .map(|m| m.points(side))
                .sum::<i32>()
    }

    /// Signed margin, A minus B. Positive means A leads.
    #[must_use]
    pub fn margin(&self) -> i32 {
        self.points(Side::A) - self.points(Side::B)
    }

    #[must_use]
    pub fn leader(&self) -> Option<Side> {
        trailing_side(self.margin()).map(Side::other)
    }

    /// Honor for the next hole: the low gross on the most recent decided hole, else the
    /// initial holder.
    #[must_use]
    pub fn honor(&self) -> Option<Side> {
        let setup = self.match_setup()?;
        Some(
            self.results
                .iter()
                .rev()
                .find_map(|r| r.matchplay.and_then(|m| m.low_gross()))
                .unwrap_or(setup.initial_honor),
        )
    }

    /// Who tees off first in the next match: whoever lost the last decided hole. With no
    /// decided hole it passes to the player who did not start with it.
    #[must_use]
    pub fn honor_next(&self) -> Option<Side> {
        let setup = self.match_setup()?;
        Some(
            self.results
                .iter()
                .rev()
                .find_map(|r| r.matchplay.and_then(|m| m.low_gross()))
                .map_or(setup.initial_honor.other(), Side::other),
        )
    }

    #[must_use]
    pub fn gross_total(&self) -> i32 {
        self.results.iter().map(|r| r.gross).sum()
    }

    #[must_use]
    pub fn adjusted_total(&self) -> i32 {
        self.results.iter().map(|r| r.adjusted).sum()
    }

    /// Strokes over par left in the budget after the holes played so far.
    #[must_use]
    pub fn budget_remaining(&self) -> Option<i32> {
        let used: i32 = self.results.iter().map(|r| r.adjusted - r.par).sum();
        self.budget.map(|b| b - used)
    }

    fn enter_hole(&mut self, idx: usize) {
        match self.holes().get(idx).copied() {
            Some(hole) => {
                self.ensure_strokes(idx);
                self.pending = Pending {
                    a: hole.par + 1,
                    b: hole.par + 1,
                };
                self.phase = Phase::HoleInProgress(idx);
            }
            None => self.finish(),
        }
    }

    fn finish(&mut self) {
        self.in_progress = false;
        self.phase = Phase::Summary;
    }

    /// Allocate strokes for the nine starting at `idx`. Runs at most once per boundary
    /// until a rewind clears it.
    pub fn ensure_strokes(&mut self, idx: usize) {
        if !self.is_nine_boundary(idx) || self.processed_boundaries.contains(&idx) {
            return;
        }
        self.processed_boundaries.insert(idx);

        let margin = self.margin();
        let strokes = strokes_for_margin(margin);
        let (Some(trailing), Some(segment)) = (trailing_side(margin), self.segment_at(idx))
        else {
            return;
        };
        if strokes == 0 {
            return;
        }
        for hole_idx in stroke_holes(self.holes(), segment, strokes) {
            self.stroke_map.entry(hole_idx).or_default().give(trailing);
        }
    }

    fn require_in_progress(&self) -> Result<usize, CoreError> {
        match self.phase {
            Phase::HoleInProgress(n) => Ok(n),
            other => Err(CoreError::InvalidTransition(format!(
                "no hole is open for scoring ({other:?})"
            ))),
        }
    }

    /// Nudge the pending gross for a side; never below 1.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` unless a hole is open for scoring.
    pub fn adjust_pending(&mut self, side: Side, delta: i32) -> Result<(), CoreError> {
        self.require_in_progress()?;
        let slot = match side {
            Side::A => &mut self.pending.a,
            Side::B => &mut self.pending.b,
        };
        *slot = slot.saturating_add(delta).max(1);
        Ok(())
    }

    /// The pending scores as an entry for this round's mode. Solo rounds use slot A.
    #[must_use]
    pub fn pending_entry(&self) -> Entry {
        if self.is_match() {
            Entry::Match {
                a: self.pending.a,
                b: self.pending.b,
            }
        } else {
            Entry::Solo(self.pending.a)
        }
    }

    /// Record the current hole. With no hole left the round moves to the summary and
    /// `Ok(None)` is returned.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` when a recorded hole is still on display or play hasn't
    /// started, `InvalidArgument` for a score below 1 or an entry of the wrong mode.
    pub fn record_hole(&mut self, entry: Entry) -> Result<Option<HoleResult>, CoreError> {
        if !matches!(self.phase, Phase::Setup) && self.current_index().is_none() {
            self.finish();
            return Ok(None);
        }
        let n = self.require_in_progress()?;
        let hole = self.holes().get(n).copied().ok_or_else(|| {
            CoreError::InvalidTransition(format!("hole index {n} is not on this course"))
        })?;

        let result = match (entry, self.mode) {
            (Entry::Solo(gross), PlayMode::Solo) => {
                check_gross(gross)?;
                HoleResult {
                    hole_number: hole.number,
                    par: hole.par,
                    difficulty_rank: hole.difficulty_rank,
                    gross,
                    adjusted: adjusted_hole_score(
                        gross,
                        hole.par,
                        hole.difficulty_rank,
                        self.course_handicap,
                    ),
                    strokes_received: 0,
                    matchplay: None,
                }
            }
            (Entry::Match { a, b }, PlayMode::Match(setup)) => {
                check_gross(a)?;
                check_gross(b)?;
                self.ensure_strokes(n);
                let strokes = self.strokes_on(n);
                let honor = self.honor().unwrap_or(setup.initial_honor);
                let net_a = net_score(a, strokes.a);
                let net_b = net_score(b, strokes.b);
                let (points_a, points_b) = hole_points(hole.par, net_a, net_b);
                let mine = match setup.recorder {
                    Side::A => a,
                    Side::B => b,
                };
                HoleResult {
                    hole_number: hole.number,
                    par: hole.par,
                    difficulty_rank: hole.difficulty_rank,
                    gross: mine,
                    adjusted: adjusted_hole_score(
                        mine,
                        hole.par,
                        hole.difficulty_rank,
                        self.course_handicap,
                    ),
                    strokes_received: i32::from(strokes.get(setup.recorder)),
                    matchplay: Some(MatchHole {
                        gross_a: a,
                        gross_b: b,
                        stroke_a: strokes.a,
                        stroke_b: strokes.b,
                        net_a,
                        net_b,
                        points_a,
                        points_b,
                        honor,
                    }),
                }
            }
            (entry, mode) => {
                return Err(CoreError::InvalidArgument(format!(
                    "{entry:?} does not fit a {mode:?} round"
                )));
            }
        };

        self.results.push(result);
        if self.is_match() {
            self.phase = Phase::HoleRecorded(n);
        } else {
            self.enter_hole(n + 1);
        }
        Ok(Some(result))
    }

    /// Record whatever is pending for the current hole.
    ///
    /// # Errors
    ///
    /// See [`RoundState::record_hole`].
    pub fn record_pending(&mut self) -> Result<Option<HoleResult>, CoreError> {
        self.record_hole(self.pending_entry())
    }

    /// Leave the result display for the next hole, or the summary after the last one.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` unless a recorded hole is on display.
    pub fn advance(&mut self) -> Result<(), CoreError> {
        match self.phase {
            Phase::HoleRecorded(n) => {
                self.enter_hole(n + 1);
                Ok(())
            }
            other => Err(CoreError::InvalidTransition(format!(
                "nothing to advance from ({other:?})"
            ))),
        }
    }

    /// Go back to hole `target`, dropping its result and everything after it. Stroke
    /// allocations of nines starting at or after `target` are discarded so they are
    /// recomputed from the earlier margin when play reaches them again.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when `target` is beyond the holes recorded so far,
    /// `InvalidTransition` before play has started.
    pub fn rewind(&mut self, target: usize) -> Result<(), CoreError> {
        if matches!(self.phase, Phase::Setup) {
            return Err(CoreError::InvalidTransition(
                "round has not started".to_string(),
            ));
        }
        if target > self.results.len() {
            return Err(CoreError::InvalidArgument(format!(
                "cannot go back to hole index {target}; only {} recorded",
                self.results.len()
            )));
        }

        let stale: Vec<usize> = self.processed_boundaries.range(target..).copied().collect();
        for boundary in stale {
            self.processed_boundaries.remove(&boundary);
            let end = self
                .segment_at(boundary)
                .map_or(boundary + 1, Segment::end);
            self.stroke_map.retain(|k, _| !(boundary..end).contains(k));
        }
        self.results.truncate(target);
        self.in_progress = true;
        self.enter_hole(target);
        Ok(())
    }

    /// Stop before the last hole.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` when no hole has been recorded.
    pub fn end_early(&mut self) -> Result<(), CoreError> {
        if self.results.is_empty() {
            return Err(CoreError::InvalidArgument("no holes recorded".to_string()));
        }
        self.finish();
        Ok(())
    }
}

fn check_gross(gross: i32) -> Result<(), CoreError> {
    if gross < 1 {
        return Err(CoreError::InvalidArgument(format!(
            "gross score must be at least 1, got {gross}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::{CourseCatalog, NineId};

    fn match_state(nines: &[usize], offset: i32) -> RoundState {
        let ids: Vec<NineId> = nines.iter().copied().map(NineId).collect();
        let course = CourseCatalog::governors_run().compose(&ids).unwrap();
        RoundState::start(RoundSetup {
            date: "2025-06-01".into(),
            course,
            mode: PlayMode::Match(MatchSetup {
                initial_honor: Side::A,
                start_offset: offset,
                recorder: Side::B,
                carry_in_strokes: false,
            }),
            handicap: None,
        })
        .unwrap()
    }

    fn play(state: &mut RoundState, a: i32, b: i32) -> HoleResult {
        let r = state.record_hole(Entry::Match { a, b }).unwrap().unwrap();
        state.advance().unwrap();
        r
    }

    #[test]
    fn starts_on_first_hole_with_pending_bogeys() {
        let state = match_state(&[0, 1], 0);
        assert_eq!(state.phase, Phase::HoleInProgress(0));
        assert_eq!(state.pending, Pending { a: 5, b: 5 });
        assert_eq!(state.honor(), Some(Side::A));
        assert!(state.stroke_map.is_empty());
    }

    #[test]
    fn carry_in_counts_toward_points() {
        let state = match_state(&[0], -3);
        assert_eq!(state.points(Side::A), 0);
        assert_eq!(state.points(Side::B), 3);
        assert_eq!(state.margin(), -3);
        assert_eq!(state.leader(), Some(Side::B));
    }

    #[test]
    fn honor_follows_last_decided_hole() {
        let mut state = match_state(&[0], 0);
        play(&mut state, 5, 4);
        assert_eq!(state.honor(), Some(Side::B));
        play(&mut state, 4, 4);
        assert_eq!(state.honor(), Some(Side::B));
        let r = state.record_hole(Entry::Match { a: 3, b: 6 }).unwrap().unwrap();
        assert_eq!(r.matchplay.unwrap().honor, Side::B);
        assert_eq!(state.honor(), Some(Side::A));
        assert_eq!(state.honor_next(), Some(Side::B));
    }

    #[test]
    fn strokes_allocated_at_nine_boundary_to_trailing_side() {
        let mut state = match_state(&[0, 1], 0);
        // A wins big on the front: 2 points a hole on the first three holes
        for _ in 0..3 {
            play(&mut state, 3, 5);
        }
        for _ in 3..9 {
            play(&mut state, 5, 5);
        }
        assert_eq!(state.margin(), 6);
        assert_eq!(state.phase, Phase::HoleInProgress(9));
        assert!(state.processed_boundaries.contains(&9));
        // one stroke for B on Foothills' hardest hole (index 10)
        assert_eq!(state.strokes_on(10), StrokeFlags { a: false, b: true });
        assert_eq!(state.stroke_map.len(), 1);

        // calling again changes nothing
        let before = state.clone();
        state.ensure_strokes(9);
        assert_eq!(state, before);
    }

    #[test]
    fn wrong_phase_and_bad_scores_are_rejected_without_change() {
        let mut state = match_state(&[0], 0);
        let before = state.clone();
        assert!(matches!(
            state.record_hole(Entry::Solo(4)),
            Err(CoreError::InvalidArgument(_))
        ));
        assert!(matches!(
            state.record_hole(Entry::Match { a: 0, b: 4 }),
            Err(CoreError::InvalidArgument(_))
        ));
        assert!(matches!(state.advance(), Err(CoreError::InvalidTransition(_))));
        assert!(matches!(state.rewind(1), Err(CoreError::InvalidArgument(_))));
        assert!(matches!(state.end_early(), Err(CoreError::InvalidArgument(_))));
        assert_eq!(state, before);

        state.record_hole(Entry::Match { a: 4, b: 4 }).unwrap();
        assert!(matches!(
            state.record_hole(Entry::Match { a: 4, b: 4 }),
            Err(CoreError::InvalidTransition(_))
        ));
    }

    #[test]
    fn pending_scores_floor_at_one() {
        let mut state = match_state(&[0], 0);
        state.adjust_pending(Side::B, -10).unwrap();
        assert_eq!(state.pending.b, 1);
        state.adjust_pending(Side::A, 2).unwrap();
        assert_eq!(state.pending_entry(), Entry::Match { a: 7, b: 1 });
    }

    #[test]
    fn pending_scores_saturate_on_extreme_nudges() {
        let mut state = match_state(&[0], 0);
        state.adjust_pending(Side::A, i32::MAX).unwrap();
        assert_eq!(state.pending.a, i32::MAX);
        state.adjust_pending(Side::A, i32::MAX).unwrap();
        assert_eq!(state.pending.a, i32::MAX);
        state.adjust_pending(Side::B, i32::MIN).unwrap();
        assert_eq!(state.pending.b, 1);
        state.adjust_pending(Side::A, i32::MIN).unwrap();
        assert_eq!(state.pending_entry(), Entry::Match { a: 1, b: 1 });
    }

    #[test]
    fn finishing_the_sequence_reaches_summary() {
        let mut state = match_state(&[2], 0);
        for _ in 0..9 {
            play(&mut state, 4, 4);
        }
        assert_eq!(state.phase, Phase::Summary);
        assert!(!state.in_progress);
        assert_eq!(state.record_hole(Entry::Match { a: 4, b: 4 }), Ok(None));
        assert_eq!(state.results.len(), 9);
    }

    #[test]
    fn solo_round_tracks_adjusted_and_budget() {
        let course = CourseCatalog::governors_run()
            .compose(&[NineId(0), NineId(1)])
            .unwrap();
        let mut state = RoundState::start(RoundSetup {
            date: "2025-06-01".into(),
            course,
            mode: PlayMode::Solo,
            handicap: Some(HandicapInputs {
                index: 18.6,
                target_diff: Some(15.0),
            }),
        })
        .unwrap();
        // 18.6 * 131 / 113 - 2.1 = 19.46
        assert_eq!(state.course_handicap, Some(19));
        assert_eq!(state.budget, Some(15));
        assert_eq!(state.honor(), None);

        // hole 1: par 4 rank 3; ch 19 gives base 1 and an extra stroke only on rank 1
        let r = state.record_hole(Entry::Solo(9)).unwrap().unwrap();
        assert_eq!(r.adjusted, 7);
        assert_eq!(state.phase, Phase::HoleInProgress(1));
        assert_eq!(state.budget_remaining(), Some(12));
        assert!(state.stroke_map.is_empty());
    }

    #[test]
    fn course_without_holes_cannot_be_played() {
        let course = Course {
            id: "x".into(),
            name: "Somewhere".into(),
            aliases: vec![],
            rating: Some(70.0),
            slope: Some(120),
            par: 72,
            nines: vec![],
            holes: vec![],
        };
        let err = RoundState::start(RoundSetup {
            date: "2025-06-01".into(),
            course,
            mode: PlayMode::Solo,
            handicap: None,
        });
        assert!(matches!(err, Err(CoreError::InvalidArgument(_))));
    }
}
