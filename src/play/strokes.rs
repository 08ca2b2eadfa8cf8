use serde::{Deserialize, Serialize};

use crate::model::course::{Hole, Segment};
use crate::model::round::Side;

/// Every full block of this many points behind earns one stroke on the next nine.
pub const POINTS_PER_STROKE: i32 = 5;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StrokeFlags {
    pub a: bool,
    pub b: bool,
}

impl StrokeFlags {
    #[must_use]
    pub fn get(self, side: Side) -> bool {
        match side {
            Side::A => self.a,
            Side::B => self.b,
        }
    }

    pub fn give(&mut self, side: Side) {
        match side {
            Side::A => self.a = true,
            Side::B => self.b = true,
        }
    }
}

/// Strokes owed for a signed margin (A minus B).
#[must_use]
pub fn strokes_for_margin(margin: i32) -> usize {
    usize::try_from(margin.unsigned_abs() / POINTS_PER_STROKE.unsigned_abs()).unwrap_or(usize::MAX)
}

/// The side behind for a signed margin (A minus B), `None` when level.
#[must_use]
pub fn trailing_side(margin: i32) -> Option<Side> {
    match margin.signum() {
        1 => Some(Side::B),
        -1 => Some(Side::A),
        _ => None,
    }
}

/// Sequence indices of the `strokes` hardest holes of a segment, hardest first.
/// Equal ranks keep playing order.
#[must_use]
pub fn stroke_holes(holes: &[Hole], segment: &Segment, strokes: usize) -> Vec<usize> {
    let end = segment.end().min(holes.len());
    let mut idxs: Vec<usize> = (segment.start..end).collect();
    idxs.sort_by_key(|&i| holes[i].difficulty_rank);
    idxs.truncate(strokes);
    idxs
}
