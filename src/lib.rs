pub mod args;
pub mod controller;
pub mod error;
pub mod handicap;
pub mod import;
pub mod model;
pub mod mvu;
pub mod play;
pub mod record;
pub mod storage;
pub mod view;

pub use error::CoreError;
pub use storage::{JsonFileStorage, Storage, StorageError};
