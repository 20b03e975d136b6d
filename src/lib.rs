pub mod config;
pub mod database;
pub mod error;
pub mod export;
pub mod models;

pub use config::Config;
pub use database::{FlashcardStore, KeyValueStore, MemoryStore, SqliteStore};
pub use error::{FlashcardsError, Result, ValidationError};
pub use models::{
    AdaptiveScheduler, Collection, FlashcardSet, RevealState, SetDraft, SetRef, StudySession,
    Term, TestResult, TestSession,
};
