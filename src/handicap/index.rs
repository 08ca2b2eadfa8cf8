use crate::model::utils::{mean, round1};

/// Most recent posted rounds considered for the index.
pub const WINDOW: usize = 20;
/// Differentials that count toward the index once the window is full enough.
pub const COUNTING: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WindowStats {
    pub index: Option<f64>,
    pub anti_index: Option<f64>,
    pub target_differential: Option<f64>,
}

fn sorted(window: &[f64]) -> Vec<f64> {
    let mut sd = window.to_vec();
    sd.sort_by(f64::total_cmp);
    sd
}

/// Index over a window: mean of the lowest eight, or the plain mean of fewer than eight.
#[must_use]
pub fn index_for_window(window: &[f64]) -> Option<f64> {
    if window.len() >= COUNTING {
        mean(&sorted(window)[..COUNTING]).map(round1)
    } else {
        mean(window).map(round1)
    }
}

/// Index, anti-index and target differential for a window given oldest first.
#[must_use]
pub fn window_stats(window: &[f64]) -> WindowStats {
    let n = window.len();
    if n < COUNTING {
        return WindowStats {
            index: index_for_window(window),
            ..WindowStats::default()
        };
    }

    let sd = sorted(window);
    let best = &sd[..COUNTING];
    let oldest = window[0];
    // The oldest round leaves the window next; if it counts, it's the one to replace.
    let target = if best.contains(&oldest) {
        oldest
    } else {
        best[COUNTING - 1]
    };

    WindowStats {
        index: mean(best).map(round1),
        anti_index: mean(&sd[n - COUNTING..]).map(round1),
        target_differential: Some(target),
    }
}

/// The trailing window (at most [`WINDOW`] entries) ending at `end` inclusive.
#[must_use]
pub fn trailing_window(diffs: &[f64], end: usize) -> &[f64] {
    let start = (end + 1).saturating_sub(WINDOW);
    &diffs[start..=end]
}
