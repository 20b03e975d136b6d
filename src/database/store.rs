//! Typed access to the flashcard namespace:
//!
//! | key             | value                                   |
//! |-----------------|-----------------------------------------|
//! | `flashcardSets` | JSON array of sets                      |
//! | `currentSet`    | index of the set opened for study/test  |
//! | `editSetIndex`  | index of the set being edited, if any   |
//! | `testResults`   | JSON score of the last finished test    |
//!
//! The collection is always read and written as one blob. Reads fail soft:
//! a missing or malformed value is treated as absent.

use super::KeyValueStore;
use crate::error::{FlashcardsError, Result};
use crate::models::{Collection, FlashcardSet, SetDraft, TestResult};

pub const SETS_KEY: &str = "flashcardSets";
pub const CURRENT_SET_KEY: &str = "currentSet";
pub const EDIT_SET_KEY: &str = "editSetIndex";
pub const TEST_RESULTS_KEY: &str = "testResults";

pub struct FlashcardStore<K> {
    kv: K,
}

impl<K: KeyValueStore> FlashcardStore<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    /// Underlying key-value store, for keys the front end owns.
    pub fn kv(&self) -> &K {
        &self.kv
    }

    /// Loads every set. Never fails: unreadable or malformed data is logged
    /// and an empty collection is returned.
    pub fn load_collection(&self) -> Collection {
        let raw = match self.kv.get(SETS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Collection::new(),
            Err(e) => {
                log::warn!("Could not read {}: {}", SETS_KEY, e);
                return Collection::new();
            }
        };

        match serde_json::from_str::<Vec<FlashcardSet>>(&raw) {
            Ok(sets) => Collection::from(sets),
            Err(e) => {
                log::warn!("Ignoring malformed {}: {}", SETS_KEY, e);
                Collection::new()
            }
        }
    }

    /// Replaces the whole stored collection.
    pub fn save_collection(&self, collection: &Collection) -> Result<()> {
        let json = serde_json::to_string(collection.sets())?;
        self.kv.set(SETS_KEY, &json)
    }

    fn read_index(&self, key: &str) -> Option<usize> {
        let raw = match self.kv.get(key) {
            Ok(raw) => raw?,
            Err(e) => {
                log::warn!("Could not read {}: {}", key, e);
                return None;
            }
        };
        match raw.trim().parse::<usize>() {
            Ok(index) => Some(index),
            Err(_) => {
                log::warn!("Ignoring unparsable {} value {:?}", key, raw);
                None
            }
        }
    }

    // ==================== Session selection ====================

    pub fn select_set(&self, index: usize) -> Result<()> {
        self.kv.set(CURRENT_SET_KEY, &index.to_string())
    }

    pub fn current_set_index(&self) -> Option<usize> {
        self.read_index(CURRENT_SET_KEY)
    }

    /// The set selected for the active session, re-resolved against storage.
    pub fn resolve_current_set(&self) -> Result<(usize, FlashcardSet)> {
        let index = self
            .current_set_index()
            .ok_or(FlashcardsError::NoSetSelected)?;
        let set = self
            .load_collection()
            .get(index)
            .cloned()
            .ok_or(FlashcardsError::SetNotFound(index))?;
        Ok((index, set))
    }

    /// Resolves the current set, stamps its `lastOpened` and saves. This is the
    /// only write a session makes.
    pub fn open_current_set(&self, now_ms: i64) -> Result<FlashcardSet> {
        let index = self
            .current_set_index()
            .ok_or(FlashcardsError::NoSetSelected)?;
        let mut collection = self.load_collection();
        if !collection.mark_opened(index, now_ms) {
            return Err(FlashcardsError::SetNotFound(index));
        }
        self.save_collection(&collection)?;

        let set = collection
            .get(index)
            .cloned()
            .ok_or(FlashcardsError::SetNotFound(index))?;
        log::info!("Opened set '{}' (index {})", set.name, index);
        Ok(set)
    }

    // ==================== Editing ====================

    pub fn begin_edit(&self, index: usize) -> Result<()> {
        self.kv.set(EDIT_SET_KEY, &index.to_string())
    }

    pub fn edit_set_index(&self) -> Option<usize> {
        self.read_index(EDIT_SET_KEY)
    }

    pub fn cancel_edit(&self) -> Result<()> {
        self.kv.remove(EDIT_SET_KEY)
    }

    /// The set under edit, if `editSetIndex` still points at one.
    pub fn set_under_edit(&self) -> Option<(usize, FlashcardSet)> {
        let index = self.edit_set_index()?;
        let set = self.load_collection().get(index).cloned()?;
        Some((index, set))
    }

    /// Validates and stores a set: replaces the set under edit in place, or
    /// appends a new one. Storage is untouched when validation fails.
    pub fn save_set(&self, draft: SetDraft) -> Result<usize> {
        let edit_key_present = self.kv.get(EDIT_SET_KEY)?.is_some();
        let edit_index = self.edit_set_index();
        let mut collection = self.load_collection();
        let index = collection.save_set(draft, edit_index)?;
        self.save_collection(&collection)?;

        if edit_key_present {
            self.cancel_edit()?;
        }
        match edit_index {
            Some(_) => log::info!("Replaced set at index {}", index),
            None => log::info!("Created set at index {}", index),
        }
        Ok(index)
    }

    /// Appends an imported set after the same validation as `save_set`.
    pub fn import_set(&self, set: FlashcardSet) -> Result<usize> {
        let last_opened = set.last_opened;
        let mut validated = SetDraft::from(set).validate()?;
        validated.last_opened = last_opened;

        let mut collection = self.load_collection();
        let name = validated.name.clone();
        let index = collection.push(validated);
        self.save_collection(&collection)?;
        log::info!("Imported set '{}' at index {}", name, index);
        Ok(index)
    }

    /// Removes a set. Stored selections are cleared because every later index
    /// now names a different set.
    pub fn delete_set(&self, index: usize) -> Result<Option<FlashcardSet>> {
        let mut collection = self.load_collection();
        let removed = collection.delete(index);
        if let Some(set) = &removed {
            self.save_collection(&collection)?;
            self.kv.remove(CURRENT_SET_KEY)?;
            self.kv.remove(EDIT_SET_KEY)?;
            log::info!("Deleted set '{}' (index {})", set.name, index);
        }
        Ok(removed)
    }

    // ==================== Test results ====================

    pub fn record_test_result(&self, result: &TestResult) -> Result<()> {
        let json = serde_json::to_string(result)?;
        self.kv.set(TEST_RESULTS_KEY, &json)
    }

    /// Reads the last test result and removes it, so it is shown only once.
    pub fn take_test_result(&self) -> Result<Option<TestResult>> {
        let Some(raw) = self.kv.get(TEST_RESULTS_KEY)? else {
            return Ok(None);
        };
        self.kv.remove(TEST_RESULTS_KEY)?;

        match serde_json::from_str(&raw) {
            Ok(result) => Ok(Some(result)),
            Err(e) => {
                log::warn!("Ignoring malformed {}: {}", TEST_RESULTS_KEY, e);
                Ok(None)
            }
        }
    }
}
