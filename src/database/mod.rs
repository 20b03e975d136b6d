pub mod db;
pub mod kv;
pub mod store;

pub use db::SqliteStore;
pub use kv::{KeyValueStore, MemoryStore};
pub use store::FlashcardStore;
