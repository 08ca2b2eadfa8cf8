use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::{Storage, StorageError};
use crate::model::course::Course;
use crate::model::match_record::MatchRecord;
use crate::model::round::Round;
use crate::play::state::RoundState;
use crate::record::assign_and_backfill;

const ROUNDS_FILE: &str = "rounds.json";
const COURSES_FILE: &str = "courses.json";
const MATCHES_FILE: &str = "matches.json";
const SESSION_FILE: &str = "session.json";

/// Flat JSON files under one data directory. A missing file reads as empty.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    async fn read_json<T: DeserializeOwned>(&self, file: &str) -> Result<Option<T>, StorageError> {
        let path = self.path(file);
        let text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no file yet");
                return Ok(None);
            }
            Err(e) => {
                return Err(StorageError::new(format!(
                    "reading {}: {e}",
                    path.display()
                )));
            }
        };
        if text.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| StorageError::new(format!("parsing {}: {e}", path.display())))
    }

    async fn write_json<T: Serialize + ?Sized>(&self, file: &str, value: &T) -> Result<(), StorageError> {
        let path = self.path(file);
        let text = serde_json::to_string_pretty(value)
            .map_err(|e| StorageError::new(format!("encoding {file}: {e}")))?;
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| StorageError::new(format!("creating {}: {e}", self.dir.display())))?;
        tokio::fs::write(&path, text)
            .await
            .map_err(|e| StorageError::new(format!("writing {}: {e}", path.display())))?;
        debug!(path = %path.display(), "wrote");
        Ok(())
    }

    async fn read_list<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>, StorageError> {
        Ok(self.read_json(file).await?.unwrap_or_default())
    }
}

#[async_trait]
impl Storage for JsonFileStorage {
    async fn load_rounds(&self) -> Result<Vec<Round>, StorageError> {
        self.read_list(ROUNDS_FILE).await
    }

    async fn load_courses(&self) -> Result<Vec<Course>, StorageError> {
        self.read_list(COURSES_FILE).await
    }

    async fn load_matches(&self) -> Result<Vec<MatchRecord>, StorageError> {
        self.read_list(MATCHES_FILE).await
    }

    async fn save_round(&self, round: Round) -> Result<Round, StorageError> {
        let mut rounds = self.load_rounds().await?;
        let saved = assign_and_backfill(&rounds, round);
        rounds.push(saved.clone());
        self.write_json(ROUNDS_FILE, &rounds).await?;
        info!(id = saved.id, date = %saved.date, differential = ?saved.differential, "saved round");
        Ok(saved)
    }

    async fn replace_rounds(&self, rounds: &[Round]) -> Result<(), StorageError> {
        self.write_json(ROUNDS_FILE, rounds).await?;
        info!(count = rounds.len(), "replaced round history");
        Ok(())
    }

    async fn save_course(&self, course: Course) -> Result<(), StorageError> {
        let mut courses = self.load_courses().await?;
        let id = course.id.clone();
        match courses.iter_mut().find(|c| c.id == course.id) {
            Some(existing) => *existing = course,
            None => courses.push(course),
        }
        self.write_json(COURSES_FILE, &courses).await?;
        info!(%id, "saved course");
        Ok(())
    }

    async fn append_match(&self, record: MatchRecord) -> Result<(), StorageError> {
        let mut matches = self.load_matches().await?;
        info!(date = %record.date, winner = ?record.winner, margin = record.margin, "saved match");
        matches.push(record);
        self.write_json(MATCHES_FILE, &matches).await
    }

    async fn load_session(&self) -> Result<Option<RoundState>, StorageError> {
        self.read_json(SESSION_FILE).await
    }

    async fn save_session(&self, state: &RoundState) -> Result<(), StorageError> {
        self.write_json(SESSION_FILE, state).await
    }

    async fn clear_session(&self) -> Result<(), StorageError> {
        match tokio::fs::remove_file(self.path(SESSION_FILE)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::new(format!("removing session: {e}"))),
        }
    }
}
