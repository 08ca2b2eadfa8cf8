use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::model::course::{Course, Hole, Nine};

/// Position of a nine inside a [`CourseCatalog`].
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NineId(pub usize);

/// Rated course made of a fixed ordered list of nines.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NineCombo {
    pub nines: Vec<NineId>,
    pub id: String,
    pub name: String,
    pub rating: Option<f64>,
    pub slope: Option<u32>,
}

/// The nines of a multi-nine facility and the rated combinations they can be played in.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct CourseCatalog {
    pub nines: Vec<Nine>,
    pub combos: Vec<NineCombo>,
}

impl CourseCatalog {
    /// # Errors
    ///
    /// Returns `NotFound` when the id is not in the catalog.
    pub fn nine(&self, id: NineId) -> Result<&Nine, CoreError> {
        self.nines
            .get(id.0)
            .ok_or_else(|| CoreError::NotFound(format!("nine {}", id.0)))
    }

    #[must_use]
    pub fn find_nine(&self, name: &str) -> Option<NineId> {
        self.nines
            .iter()
            .position(|n| n.name.eq_ignore_ascii_case(name.trim()))
            .map(NineId)
    }

    /// Rated combo for a selection: an exact ordered match wins, otherwise any combo with
    /// the same nines in a different order.
    #[must_use]
    pub fn combo_for(&self, selection: &[NineId]) -> Option<&NineCombo> {
        self.combos
            .iter()
            .find(|c| c.nines == selection)
            .or_else(|| {
                let mut wanted = selection.to_vec();
                wanted.sort_unstable();
                self.combos.iter().find(|c| {
                    let mut have = c.nines.clone();
                    have.sort_unstable();
                    have == wanted
                })
            })
    }

    /// Build the playable course for an ordered selection of nines. The same nine may be
    /// selected more than once.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for an empty selection and `NotFound` for an unknown nine.
    pub fn compose(&self, selection: &[NineId]) -> Result<Course, CoreError> {
        if selection.is_empty() {
            return Err(CoreError::InvalidArgument(
                "select at least one nine".to_string(),
            ));
        }
        let mut holes: Vec<Hole> = Vec::new();
        let mut names = Vec::with_capacity(selection.len());
        for id in selection {
            let nine = self.nine(*id)?;
            holes.extend(nine.holes.iter().copied());
            names.push(nine.name.clone());
        }
        let par = holes.iter().map(|h| h.par).sum();

        let (id, name, rating, slope) = match self.combo_for(selection) {
            Some(combo) => (combo.id.clone(), combo.name.clone(), combo.rating, combo.slope),
            None => (
                names
                    .iter()
                    .map(|n| n.to_lowercase())
                    .collect::<Vec<_>>()
                    .join("-"),
                names.join(" / "),
                None,
                None,
            ),
        };

        Ok(Course {
            id,
            name,
            aliases: vec![],
            rating,
            slope,
            par,
            nines: names,
            holes,
        })
    }

    /// The three nines at Governor's Run and the combinations rated there.
    #[must_use]
    pub fn governors_run() -> Self {
        fn holes(first: u32, layout: [(i32, u8); 9]) -> Vec<Hole> {
            layout
                .iter()
                .zip(first..)
                .map(|(&(par, difficulty_rank), number)| Hole {
                    number,
                    par,
                    difficulty_rank,
                })
                .collect()
        }
        let lakes = Nine {
            name: "Lakes".to_string(),
            holes: holes(
                1,
                [(4, 3), (4, 4), (5, 9), (3, 7), (4, 2), (4, 6), (5, 8), (4, 1), (3, 5)],
            ),
        };
        let foothills = Nine {
            name: "Foothills".to_string(),
            holes: holes(
                10,
                [(4, 2), (4, 1), (3, 6), (5, 8), (3, 7), (4, 9), (4, 3), (5, 5), (4, 4)],
            ),
        };
        let mountain = Nine {
            name: "Mountain".to_string(),
            holes: holes(
                19,
                [(4, 9), (4, 2), (3, 8), (5, 6), (4, 4), (5, 7), (3, 5), (4, 1), (4, 3)],
            ),
        };

        let combo = |nines: &[usize], id: &str, name: &str, rating: Option<f64>, slope: Option<u32>| {
            NineCombo {
                nines: nines.iter().copied().map(NineId).collect(),
                id: id.to_string(),
                name: name.to_string(),
                rating,
                slope,
            }
        };

        Self {
            nines: vec![lakes, foothills, mountain],
            combos: vec![
                combo(&[0], "gov-lakes", "Lakes (9)", Some(69.6), Some(129)),
                combo(&[1], "gov-foothills", "Foothills (9)", Some(70.2), Some(132)),
                combo(&[2], "gov-mountain", "Mountain (9)", None, None),
                combo(&[0, 1], "gov-lakes-foothills", "GC Lakes to Foothills", Some(69.9), Some(131)),
                combo(&[1, 2], "gov-foothills-mountain", "GC Foothills to Mountain", Some(69.3), Some(131)),
                combo(&[2, 0], "gov-mountain-lakes", "GC Mountain to Lakes", Some(69.0), Some(130)),
                combo(&[0, 0], "gov-lakes-lakes", "GC Lakes, Lakes", Some(69.6), Some(129)),
                combo(&[1, 1], "gov-foothills-foothills", "GC Foothills, Foothills", Some(70.2), Some(132)),
                combo(&[2, 2], "gov-mountain-mountain", "GC Mountain, Mountain", Some(68.4), Some(130)),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composes_in_selection_order() {
        let catalog = CourseCatalog::governors_run();
        let course = catalog.compose(&[NineId(2), NineId(0)]).unwrap();
        assert_eq!(course.id, "gov-mountain-lakes");
        assert_eq!(course.par, 72);
        assert_eq!(course.holes[0].number, 19);
        assert_eq!(course.holes[9].number, 1);
        assert_eq!(course.segments().len(), 2);
    }

    #[test]
    fn reversed_order_still_finds_rating() {
        let catalog = CourseCatalog::governors_run();
        let course = catalog.compose(&[NineId(0), NineId(2)]).unwrap();
        assert_eq!(course.rating, Some(69.0));
        assert_eq!(course.holes[0].number, 1);
        assert_eq!(course.nines, vec!["Lakes".to_string(), "Mountain".to_string()]);
    }

    #[test]
    fn repeated_nine_is_allowed() {
        let catalog = CourseCatalog::governors_run();
        let course = catalog.compose(&[NineId(1), NineId(1)]).unwrap();
        assert_eq!(course.holes.len(), 18);
        assert_eq!(course.slope, Some(132));
        assert!(!course.is_nine_hole());
    }

    #[test]
    fn unrated_selection_gets_synthesized_identity() {
        let catalog = CourseCatalog::governors_run();
        let course = catalog
            .compose(&[NineId(0), NineId(1), NineId(2)])
            .unwrap();
        assert_eq!(course.id, "lakes-foothills-mountain");
        assert_eq!(course.rating, None);
        assert_eq!(course.par, 108);
    }

    #[test]
    fn rejects_empty_and_unknown() {
        let catalog = CourseCatalog::governors_run();
        assert!(matches!(
            catalog.compose(&[]),
            Err(CoreError::InvalidArgument(_))
        ));
        assert!(matches!(
            catalog.compose(&[NineId(7)]),
            Err(CoreError::NotFound(_))
        ));
        assert_eq!(catalog.find_nine("mountain"), Some(NineId(2)));
    }
}
