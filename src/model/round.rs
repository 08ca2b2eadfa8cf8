use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::course::NOMINAL_SLOPE;
use crate::model::utils::{parse_round_date, round1};

/// Par assumed for an 18-hole round that didn't record one.
pub const DEFAULT_PAR: i32 = 72;

/// One of the two players in a match. `A` is the side a positive carry-in favours.
/// Older history files name the players `V` and `D`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    #[serde(alias = "V")]
    A,
    #[serde(alias = "D")]
    B,
}

impl Side {
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => write!(f, "A"),
            Side::B => write!(f, "B"),
        }
    }
}

/// Match detail of a hole played as part of a two-player match.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchHole {
    #[serde(alias = "vGross")]
    pub gross_a: i32,
    #[serde(alias = "dGross")]
    pub gross_b: i32,
    #[serde(alias = "vStroke", default)]
    pub stroke_a: bool,
    #[serde(alias = "dStroke", default)]
    pub stroke_b: bool,
    #[serde(alias = "vNet")]
    pub net_a: i32,
    #[serde(alias = "dNet")]
    pub net_b: i32,
    #[serde(alias = "vPts", default)]
    pub points_a: i32,
    #[serde(alias = "dPts", default)]
    pub points_b: i32,
    /// Who held the honor when the hole was played.
    pub honor: Side,
}

impl MatchHole {
    #[must_use]
    pub fn gross(&self, side: Side) -> i32 {
        match side {
            Side::A => self.gross_a,
            Side::B => self.gross_b,
        }
    }

    #[must_use]
    pub fn points(&self, side: Side) -> i32 {
        match side {
            Side::A => self.points_a,
            Side::B => self.points_b,
        }
    }

    /// Side with the strictly lower gross score, if any.
    #[must_use]
    pub fn low_gross(&self) -> Option<Side> {
        match self.gross_a.cmp(&self.gross_b) {
            std::cmp::Ordering::Less => Some(Side::A),
            std::cmp::Ordering::Greater => Some(Side::B),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// A recorded hole. `gross`/`adjusted` belong to the player whose round is being logged;
/// `matchplay` carries both players' figures when the hole was part of a match.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct HoleResult {
    #[serde(alias = "holeNumber")]
    pub hole_number: u32,
    pub par: i32,
    #[serde(rename = "handicap", alias = "difficulty_rank")]
    pub difficulty_rank: u8,
    pub gross: i32,
    #[serde(rename = "adj")]
    pub adjusted: i32,
    #[serde(default)]
    pub strokes_received: i32,
    #[serde(rename = "vd", default)]
    pub matchplay: Option<MatchHole>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Round {
    #[serde(default)]
    pub id: u64,
    pub date: String,
    #[serde(default)]
    pub course_id: Option<String>,
    #[serde(default)]
    pub course_name: String,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub slope: Option<u32>,
    #[serde(default)]
    pub par: Option<i32>,
    #[serde(rename = "score", default)]
    pub gross: Option<i32>,
    #[serde(rename = "adj_score", default)]
    pub adjusted: Option<i32>,
    #[serde(rename = "course_hdcp", default)]
    pub course_handicap: Option<i32>,
    #[serde(default)]
    pub differential: Option<f64>,
    #[serde(rename = "include_ghin", alias = "include_in_handicap", default)]
    pub include_in_handicap: bool,
    #[serde(default)]
    pub nine_hole: bool,
    #[serde(default)]
    pub hole_results: Vec<HoleResult>,
    /// Index as reported by the official handicap service, for cross-checking.
    #[serde(rename = "ghin_manual", default)]
    pub reported_index: Option<f64>,
}

/// `(adjusted - rating) * 113 / slope`, rounded to one decimal. `None` for a zero slope.
#[must_use]
pub fn differential(adjusted: i32, rating: f64, slope: u32) -> Option<f64> {
    if slope == 0 {
        return None;
    }
    Some(round1(
        (f64::from(adjusted) - rating) * NOMINAL_SLOPE / f64::from(slope),
    ))
}

impl Round {
    #[must_use]
    pub fn played_on(&self) -> Option<NaiveDate> {
        parse_round_date(&self.date)
    }

    /// Calendar year of the round, falling back to the leading digits of the raw date.
    #[must_use]
    pub fn year(&self) -> Option<i32> {
        self.played_on()
            .map(|d| d.year())
            .or_else(|| self.date.get(..4).and_then(|y| y.parse().ok()))
    }

    #[must_use]
    pub fn par_or_default(&self) -> i32 {
        self.par.unwrap_or(DEFAULT_PAR)
    }

    /// Counts toward the index: flagged for inclusion and carrying a differential.
    #[must_use]
    pub fn is_posted(&self) -> bool {
        self.include_in_handicap && self.differential.is_some()
    }

    /// Recompute the differential from the snapshot. Defined iff rating, slope and
    /// adjusted score are all present.
    pub fn backfill_differential(&mut self) {
        self.differential = match (self.adjusted, self.rating, self.slope) {
            (Some(adj), Some(rating), Some(slope)) => differential(adj, rating, slope),
            _ => None,
        };
    }
}
