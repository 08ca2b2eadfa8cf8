pub mod json_file;

pub use json_file::JsonFileStorage;

use async_trait::async_trait;
use std::error::Error;
use std::fmt;

use crate::model::course::Course;
use crate::model::match_record::MatchRecord;
use crate::model::round::Round;
use crate::play::state::RoundState;

#[derive(Debug, Clone)]
pub struct StorageError {
    message: String,
}

impl StorageError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for StorageError {}

impl From<String> for StorageError {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for StorageError {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Round, course and match history plus the one in-progress session.
///
/// Every write replaces a whole collection; there is no locking between writers.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn load_rounds(&self) -> Result<Vec<Round>, StorageError>;
    async fn load_courses(&self) -> Result<Vec<Course>, StorageError>;
    async fn load_matches(&self) -> Result<Vec<MatchRecord>, StorageError>;
    /// Append a round, assigning its id and back-filling its differential. Returns the
    /// round as stored.
    async fn save_round(&self, round: Round) -> Result<Round, StorageError>;
    /// Replace the whole round history, e.g. after an import.
    async fn replace_rounds(&self, rounds: &[Round]) -> Result<(), StorageError>;
    /// Insert a course, replacing any with the same id.
    async fn save_course(&self, course: Course) -> Result<(), StorageError>;
    async fn append_match(&self, record: MatchRecord) -> Result<(), StorageError>;
    async fn load_session(&self) -> Result<Option<RoundState>, StorageError>;
    async fn save_session(&self, state: &RoundState) -> Result<(), StorageError>;
    async fn clear_session(&self) -> Result<(), StorageError>;
}
