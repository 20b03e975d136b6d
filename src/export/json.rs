//! JSON import/export module for flashcard sets.
//! A file holds one set in the same shape it has inside `flashcardSets`.

use crate::error::Result;
use crate::models::FlashcardSet;
use std::fs;
use std::path::Path;

/// Exports a set to a pretty-printed JSON file at the specified path.
pub fn export_set_to_path(set: &FlashcardSet, path: impl AsRef<Path>) -> Result<()> {
    let json_string = serde_json::to_string_pretty(set)?;
    fs::write(path.as_ref(), json_string)?;
    log::info!(
        "Set '{}' exported to '{}'",
        set.name,
        path.as_ref().display()
    );
    Ok(())
}

/// Reads a set from a JSON file. The set is not validated here.
pub fn import_set_json(path: impl AsRef<Path>) -> Result<FlashcardSet> {
    let contents = fs::read_to_string(path.as_ref())?;
    let set: FlashcardSet = serde_json::from_str(&contents)?;
    log::info!(
        "Set '{}' read from '{}'",
        set.name,
        path.as_ref().display()
    );
    Ok(set)
}
