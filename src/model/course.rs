use serde::{Deserialize, Serialize};

/// Slope of a course of standard relative difficulty.
pub const NOMINAL_SLOPE: f64 = 113.0;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hole {
    pub number: u32,
    pub par: i32,
    /// Difficulty ordinal within the hole's nine, 1 = hardest.
    #[serde(rename = "handicap", alias = "difficulty_rank")]
    pub difficulty_rank: u8,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Nine {
    pub name: String,
    pub holes: Vec<Hole>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Course {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub rating: Option<f64>,
    pub slope: Option<u32>,
    #[serde(default = "default_par")]
    pub par: i32,
    #[serde(default)]
    pub nines: Vec<String>,
    #[serde(default)]
    pub holes: Vec<Hole>,
}

const fn default_par() -> i32 {
    72
}

/// A contiguous run of the flattened hole sequence that was played as one nine.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub name: String,
    pub start: usize,
    pub len: usize,
}

impl Segment {
    #[must_use]
    pub fn contains(&self, idx: usize) -> bool {
        idx >= self.start && idx < self.start + self.len
    }

    #[must_use]
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

impl Course {
    #[must_use]
    pub fn is_nine_hole(&self) -> bool {
        self.par <= 36
    }

    #[must_use]
    pub fn has_hole_data(&self) -> bool {
        !self.holes.is_empty()
    }

    /// Split the flattened hole list into one segment per component nine.
    ///
    /// A course whose holes don't divide evenly over its nines, or that lists no nines,
    /// is a single segment with no nine boundaries.
    #[must_use]
    pub fn segments(&self) -> Vec<Segment> {
        if self.holes.is_empty() {
            return vec![];
        }
        let n = self.nines.len();
        if n > 1 && self.holes.len() % n == 0 {
            let len = self.holes.len() / n;
            return self
                .nines
                .iter()
                .enumerate()
                .map(|(i, name)| Segment {
                    name: name.clone(),
                    start: i * len,
                    len,
                })
                .collect();
        }
        vec![Segment {
            name: self.nines.first().cloned().unwrap_or_else(|| self.name.clone()),
            start: 0,
            len: self.holes.len(),
        }]
    }

    #[must_use]
    pub fn matches_name(&self, name: &str) -> bool {
        let name = name.trim();
        self.name.eq_ignore_ascii_case(name) || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }
}

#[must_use]
pub fn find_course<'a>(courses: &'a [Course], id: &str) -> Option<&'a Course> {
    courses.iter().find(|c| c.id == id)
}
