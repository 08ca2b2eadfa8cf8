#![allow(dead_code)]

use golf_log::model::round::Round;
use golf_log::storage::JsonFileStorage;
use tempfile::TempDir;

/// Storage over a fresh temporary data directory. Keep the `TempDir` alive for the test.
pub fn temp_storage() -> (TempDir, JsonFileStorage) {
    let dir = tempfile::tempdir().expect("tempdir");
    let storage = JsonFileStorage::new(dir.path());
    (dir, storage)
}

/// An 18-hole round at Lakes to Foothills with the given differential.
pub fn rated_round(date: &str, differential: f64) -> Round {
    serde_json::from_value(serde_json::json!({
        "date": date,
        "course_id": "gov-lakes-foothills",
        "course_name": "GC Lakes to Foothills",
        "rating": 69.9,
        "slope": 131,
        "par": 72,
        "score": 95,
        "adj_score": 92,
        "differential": differential,
        "include_ghin": true,
    }))
    .expect("round json")
}
