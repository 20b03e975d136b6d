//! Container for all sets. A set is identified by its position, so any index
//! held across an insert or delete must be resolved again.
use super::{FlashcardSet, SetDraft};
use crate::error::{FlashcardsError, Result};

/// An index pinned to the collection revision it was resolved against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SetRef {
    index: usize,
    revision: u64,
}

impl SetRef {
    pub fn index(&self) -> usize {
        self.index
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Collection {
    sets: Vec<FlashcardSet>,
    revision: u64,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sets(&self) -> &[FlashcardSet] {
        &self.sets
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&FlashcardSet> {
        self.sets.get(index)
    }

    pub fn resolve(&self, index: usize) -> Option<SetRef> {
        (index < self.sets.len()).then_some(SetRef {
            index,
            revision: self.revision,
        })
    }

    /// `None` once an insert or delete has happened since `set_ref` was taken.
    pub fn get_ref(&self, set_ref: SetRef) -> Option<&FlashcardSet> {
        if set_ref.revision != self.revision {
            return None;
        }
        self.sets.get(set_ref.index)
    }

    pub fn push(&mut self, set: FlashcardSet) -> usize {
        self.sets.push(set);
        self.revision += 1;
        self.sets.len() - 1
    }

    /// Replaces the set at `index` in place. Other indices are untouched.
    pub fn replace(&mut self, index: usize, set: FlashcardSet) -> Result<()> {
        let slot = self
            .sets
            .get_mut(index)
            .ok_or(FlashcardsError::SetNotFound(index))?;
        *slot = set;
        Ok(())
    }

    /// Removes a set; every later set shifts down by one.
    pub fn delete(&mut self, index: usize) -> Option<FlashcardSet> {
        if index >= self.sets.len() {
            return None;
        }
        self.revision += 1;
        Some(self.sets.remove(index))
    }

    /// Validates `draft` and writes it: in place when `edit_index` is given,
    /// appended otherwise. Nothing changes on error.
    pub fn save_set(&mut self, draft: SetDraft, edit_index: Option<usize>) -> Result<usize> {
        let mut set = draft.validate()?;

        match edit_index {
            Some(index) => {
                let existing = self
                    .sets
                    .get(index)
                    .ok_or(FlashcardsError::SetNotFound(index))?;
                set.last_opened = existing.last_opened;
                self.replace(index, set)?;
                Ok(index)
            }
            None => Ok(self.push(set)),
        }
    }

    pub fn mark_opened(&mut self, index: usize, now_ms: i64) -> bool {
        match self.sets.get_mut(index) {
            Some(set) => {
                set.mark_opened(now_ms);
                true
            }
            None => false,
        }
    }

    /// Display order: most recently opened first, never-opened sets last.
    /// Ties keep insertion order. The stored order is not affected.
    pub fn by_last_opened(&self) -> Vec<(usize, &FlashcardSet)> {
        let mut ordered: Vec<(usize, &FlashcardSet)> = self.sets.iter().enumerate().collect();
        ordered.sort_by(|(_, a), (_, b)| b.last_opened().cmp(&a.last_opened()));
        ordered
    }
}

impl From<Vec<FlashcardSet>> for Collection {
    fn from(sets: Vec<FlashcardSet>) -> Self {
        Self { sets, revision: 0 }
    }
}
