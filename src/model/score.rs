use serde::{Deserialize, Serialize};
use std::fmt;

/// A hole score named relative to par.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub enum ScoreDisplay {
    Eagle,
    Birdie,
    Par,
    Bogey,
    DoubleBogey,
    Over(i32),
}

impl ScoreDisplay {
    #[must_use]
    pub fn from_vs_par(diff: i32) -> Self {
        match diff {
            i32::MIN..=-2 => ScoreDisplay::Eagle,
            -1 => ScoreDisplay::Birdie,
            0 => ScoreDisplay::Par,
            1 => ScoreDisplay::Bogey,
            2 => ScoreDisplay::DoubleBogey,
            n => ScoreDisplay::Over(n),
        }
    }

    #[must_use]
    pub fn for_score(score: i32, par: i32) -> Self {
        Self::from_vs_par(score - par)
    }
}

impl fmt::Display for ScoreDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreDisplay::Eagle => write!(f, "Eagle"),
            ScoreDisplay::Birdie => write!(f, "Birdie"),
            ScoreDisplay::Par => write!(f, "Par"),
            ScoreDisplay::Bogey => write!(f, "Bogey"),
            ScoreDisplay::DoubleBogey => write!(f, "Double"),
            ScoreDisplay::Over(n) => write!(f, "+{n}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_relative_to_par() {
        assert_eq!(ScoreDisplay::for_score(2, 5), ScoreDisplay::Eagle);
        assert_eq!(ScoreDisplay::for_score(3, 4), ScoreDisplay::Birdie);
        assert_eq!(ScoreDisplay::for_score(6, 4).to_string(), "Double");
        assert_eq!(ScoreDisplay::for_score(8, 4).to_string(), "+4");
    }
}
