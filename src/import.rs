//! Import of the handicap spreadsheet export.
//!
//! Columns: round number, date, course, rating, slope, PCC, score, adjusted score, course
//! handicap, net, differential, index, reported index. Anything past that is ignored.

use regex::Regex;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{info, warn};

use crate::error::CoreError;
use crate::model::round::Round;

/// Adjusted scores below this are nine-hole rounds.
const NINE_HOLE_BELOW: i32 = 60;

/// Spreadsheet spellings of course names and the ids they are stored under.
const COURSE_ALIASES: &[(&str, &str)] = &[
    ("gov lakes to foothills", "gov-lakes-foothills"),
    ("lakes to foothills", "gov-lakes-foothills"),
    ("gov mountain to lakes", "gov-mountain-lakes"),
    ("mountain to lakes", "gov-mountain-lakes"),
    ("gov foothills to mountain", "gov-foothills-mountain"),
    ("foothills to mountain", "gov-foothills-mountain"),
    ("gov mountain mountain", "gov-mountain-mountain"),
    ("gov foothills to foothills", "gov-foothills-foothills"),
    ("lakes, lakes", "gov-lakes-lakes"),
    ("lakes to foothills blue", "gov-lakes-foothills-blue"),
    ("foothills to mountain blu", "gov-foothills-mountain-blue"),
    ("lakes", "gov-lakes"),
    ("foothills", "gov-foothills"),
    ("mountain", "gov-mountain"),
    ("mountain 9", "gov-mountain"),
];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportStats {
    pub imported: usize,
    /// Header, blank and summary rows.
    pub not_rounds: usize,
    pub duplicates: usize,
    pub incomplete: usize,
}

/// Canonical course id for a spreadsheet course name.
///
/// # Panics
///
/// Will panic if the slug regex is invalid
#[must_use]
pub fn course_id(name: &str) -> String {
    static NON_ALNUM: OnceLock<Regex> = OnceLock::new();
    let key = name.trim().to_lowercase();
    if let Some((_, id)) = COURSE_ALIASES.iter().find(|(alias, _)| *alias == key) {
        return (*id).to_string();
    }
    let re = NON_ALNUM.get_or_init(|| {
        Regex::new(r"[^a-z0-9]+").expect("Invalid regex pattern - this is a programming error")
    });
    re.replace_all(&key, "-").trim_matches('-').to_string()
}

fn field<T: std::str::FromStr>(record: &csv::StringRecord, idx: usize) -> Option<T> {
    record.get(idx).and_then(|s| s.trim().parse().ok())
}

fn text(record: &csv::StringRecord, idx: usize) -> String {
    record.get(idx).map(str::trim).unwrap_or_default().to_string()
}

/// Parse rounds from CSV text. Rows whose first column isn't a positive round number are
/// skipped, as are rows numbered in `skip` and rows with no adjusted score. Ids are
/// assigned from 1 in file order.
///
/// # Errors
///
/// Returns `Parse` when the CSV itself is malformed.
pub fn parse_rounds<R: Read>(
    input: R,
    skip: &HashSet<u64>,
) -> Result<(Vec<Round>, ImportStats), CoreError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);

    let mut rounds = Vec::new();
    let mut stats = ImportStats::default();
    for (line, record) in reader.records().enumerate() {
        let record = record?;
        let number = match record.get(0).map(str::trim) {
            Some(s) if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) => {
                s.parse::<u64>().ok()
            }
            _ => None,
        };
        let Some(number) = number.filter(|n| *n > 0) else {
            stats.not_rounds += 1;
            continue;
        };
        if skip.contains(&number) {
            warn!(line = line + 1, round = number, "skipping listed duplicate");
            stats.duplicates += 1;
            continue;
        }
        let Some(adjusted) = field::<i32>(&record, 7) else {
            warn!(line = line + 1, round = number, "skipping round with no adjusted score");
            stats.incomplete += 1;
            continue;
        };

        let nine_hole = adjusted < NINE_HOLE_BELOW;
        let course_name = text(&record, 2);
        rounds.push(Round {
            id: u64::try_from(rounds.len()).unwrap_or(u64::MAX).saturating_add(1),
            date: text(&record, 1),
            course_id: Some(course_id(&course_name)),
            course_name,
            rating: field(&record, 3),
            slope: field(&record, 4),
            par: Some(if nine_hole { 36 } else { 72 }),
            gross: field(&record, 6),
            adjusted: Some(adjusted),
            course_handicap: field(&record, 8),
            differential: field(&record, 10),
            include_in_handicap: true,
            nine_hole,
            hole_results: vec![],
            reported_index: field(&record, 12),
        });
    }
    stats.imported = rounds.len();
    Ok((rounds, stats))
}

/// [`parse_rounds`] over a file.
///
/// # Errors
///
/// Returns `Parse` when the file can't be opened or read as CSV.
pub fn import_csv(path: &Path, skip: &HashSet<u64>) -> Result<(Vec<Round>, ImportStats), CoreError> {
    let file = std::fs::File::open(path)
        .map_err(|e| CoreError::Parse(format!("opening {}: {e}", path.display())))?;
    let (rounds, stats) = parse_rounds(file, skip)?;
    info!(
        path = %path.display(),
        imported = stats.imported,
        duplicates = stats.duplicates,
        incomplete = stats.incomplete,
        "imported rounds"
    );
    Ok((rounds, stats))
}
