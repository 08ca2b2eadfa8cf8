use serde::{Deserialize, Serialize};

use crate::model::round::{HoleResult, Side};
use crate::play::state::default_recorder;

/// Matches averaged for the trend column of the history.
pub const STANDING_AVG_WINDOW: usize = 5;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Winner {
    #[serde(alias = "V")]
    A,
    #[serde(alias = "D")]
    B,
    #[serde(alias = "T")]
    Tie,
}

impl From<Option<Side>> for Winner {
    fn from(value: Option<Side>) -> Self {
        match value {
            Some(Side::A) => Winner::A,
            Some(Side::B) => Winner::B,
            None => Winner::Tie,
        }
    }
}

/// A finished match as appended to the match history.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MatchRecord {
    #[serde(default)]
    pub date: String,
    #[serde(rename = "nines", default)]
    pub participant_nines: Vec<String>,
    #[serde(default)]
    pub holes_played: usize,
    #[serde(rename = "v_points", alias = "points_a", default)]
    pub points_a: i32,
    #[serde(rename = "d_points", alias = "points_b", default)]
    pub points_b: i32,
    pub margin: i32,
    pub winner: Winner,
    #[serde(default)]
    pub honor_next: Option<Side>,
    /// Who had the honor on the first hole.
    #[serde(default)]
    pub initial_honor: Option<Side>,
    /// Carry-in the match started with; positive favours A.
    #[serde(default)]
    pub start_offset: i32,
    /// Whose round was logged for the handicap.
    #[serde(default = "default_recorder")]
    pub recorder: Side,
    #[serde(default)]
    pub carry_in_strokes: bool,
    #[serde(default)]
    pub hole_results: Vec<HoleResult>,
    /// Imported result that resets the running standing instead of adding to it.
    #[serde(default)]
    pub historical: bool,
}

/// Running head-to-head standing across a match history, positive when B is ahead.
///
/// A historical entry replaces the standing with its own margin.
#[must_use]
pub fn running_standings(matches: &[MatchRecord]) -> Vec<i32> {
    let mut total = 0;
    matches
        .iter()
        .map(|m| {
            let signed = match m.winner {
                Winner::B => m.margin,
                Winner::A => -m.margin,
                Winner::Tie => 0,
            };
            if m.historical {
                total = signed;
            } else {
                total += signed;
            }
            total
        })
        .collect()
}

/// Matches won by each side, counted from the change in the running standing so that a
/// historical reset counts toward whoever it moved the standing for.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub wins_a: usize,
    pub wins_b: usize,
    pub ties: usize,
}

#[must_use]
pub fn tally(standings: &[i32]) -> Tally {
    let mut prev = 0;
    standings.iter().fold(Tally::default(), |mut t, &s| {
        match (s - prev).signum() {
            1 => t.wins_b += 1,
            -1 => t.wins_a += 1,
            _ => t.ties += 1,
        }
        prev = s;
        t
    })
}

/// Trailing mean of the last `window` standings at each position; `None` until enough
/// matches have been played.
#[must_use]
pub fn moving_average(standings: &[i32], window: usize) -> Vec<Option<f64>> {
    (0..standings.len())
        .map(|i| {
            if window == 0 || i + 1 < window {
                return None;
            }
            let sum: i32 = standings[i + 1 - window..=i].iter().sum();
            Some(f64::from(sum) / window as f64)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(winner: Winner, margin: i32, historical: bool) -> MatchRecord {
        MatchRecord {
            date: "2025-05-01".into(),
            participant_nines: vec![],
            holes_played: 18,
            points_a: 0,
            points_b: 0,
            margin,
            winner,
            honor_next: None,
            initial_honor: None,
            start_offset: 0,
            recorder: Side::B,
            carry_in_strokes: false,
            hole_results: vec![],
            historical,
        }
    }

    #[test]
    fn historical_entry_resets_standing() {
        let history = vec![
            rec(Winner::B, 4, false),
            rec(Winner::A, 10, true),
            rec(Winner::B, 3, false),
            rec(Winner::Tie, 0, false),
        ];
        assert_eq!(running_standings(&history), vec![4, -10, -7, -7]);
    }

    #[test]
    fn tally_follows_standing_changes() {
        let history = vec![
            rec(Winner::B, 4, false),
            rec(Winner::A, 1, false),
            rec(Winner::Tie, 0, false),
            rec(Winner::A, 10, true),
            rec(Winner::B, 2, false),
        ];
        let standings = running_standings(&history);
        assert_eq!(standings, vec![4, 3, 3, -10, -8]);
        assert_eq!(
            tally(&standings),
            Tally {
                wins_a: 2,
                wins_b: 2,
                ties: 1
            }
        );
        assert_eq!(tally(&[]), Tally::default());
    }

    #[test]
    fn moving_average_waits_for_a_full_window() {
        let avg = moving_average(&[4, 3, 3, -10, -8, 2], STANDING_AVG_WINDOW);
        assert_eq!(avg[..4], [None, None, None, None]);
        // (4 + 3 + 3 - 10 - 8) / 5
        assert_eq!(avg[4], Some(-1.6));
        // (3 + 3 - 10 - 8 + 2) / 5
        assert_eq!(avg[5], Some(-2.0));
        assert!(moving_average(&[1, 2], 0).iter().all(Option::is_none));
    }

    #[test]
    fn reads_history_written_with_player_letters() {
        let json = r#"[
            {"date":"pre-2025 #1","winner":"D","margin":12,"historical":true},
            {"date":"2025-05-03","winner":"V","margin":3,"v_points":9,"d_points":6,
             "honor_next":"V","nines":["Lakes","Foothills"],"historical":false},
            {"date":"2025-05-10","winner":"T","margin":0,"honor_next":null}]"#;
        let history: Vec<MatchRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(history[0].winner, Winner::B);
        assert_eq!(history[1].winner, Winner::A);
        assert_eq!(history[1].honor_next, Some(Side::A));
        assert_eq!(history[1].recorder, Side::B);
        assert_eq!(history[2].winner, Winner::Tie);
        assert_eq!(running_standings(&history), vec![12, 9, 9]);
    }
}
