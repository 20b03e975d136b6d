//! Study mode: an open-ended drill where the next card comes from the
//! adaptive scheduler and every answer feeds back into its weights.

use super::{AdaptiveScheduler, FlashcardSet, Term};
use crate::error::{FlashcardsError, Result};
use rand::Rng;

/// Which side of the current card is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RevealState {
    #[default]
    QuestionShown,
    AnswerShown,
}

impl RevealState {
    pub fn flipped(self) -> Self {
        match self {
            RevealState::QuestionShown => RevealState::AnswerShown,
            RevealState::AnswerShown => RevealState::QuestionShown,
        }
    }
}

/// One study visit. Dropping it discards the weights.
pub struct StudySession<R> {
    set_name: String,
    terms: Vec<Term>,
    scheduler: AdaptiveScheduler<R>,
    current_index: usize,
    reveal: RevealState,
    cards_shown: usize,
}

impl<R: Rng> StudySession<R> {
    /// Starts a session on `set` and draws the first card.
    pub fn new(set: &FlashcardSet, rng: R) -> Result<Self> {
        let mut scheduler = AdaptiveScheduler::new(set.terms.len(), rng);
        let current_index = scheduler
            .pick()
            .ok_or_else(|| FlashcardsError::EmptySet(set.name.clone()))?;

        log::info!(
            "Study session started on '{}' ({} terms)",
            set.name,
            set.terms.len()
        );

        Ok(Self {
            set_name: set.name.clone(),
            terms: set.terms.clone(),
            scheduler,
            current_index,
            reveal: RevealState::QuestionShown,
            cards_shown: 1,
        })
    }

    pub fn set_name(&self) -> &str {
        &self.set_name
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_term(&self) -> &Term {
        &self.terms[self.current_index]
    }

    pub fn reveal_state(&self) -> RevealState {
        self.reveal
    }

    pub fn cards_shown(&self) -> usize {
        self.cards_shown
    }

    pub fn weights(&self) -> &[f64] {
        self.scheduler.weights()
    }

    /// Question or answer text of the current card, depending on the flip.
    pub fn current_content(&self) -> &str {
        let term = self.current_term();
        match self.reveal {
            RevealState::QuestionShown => &term.question,
            RevealState::AnswerShown => &term.answer,
        }
    }

    pub fn on_flip(&mut self) {
        self.reveal = self.reveal.flipped();
    }

    pub fn on_correct(&mut self) {
        self.scheduler.record_correct(self.current_index);
        self.next_card();
    }

    pub fn on_wrong(&mut self) {
        self.scheduler.record_wrong(self.current_index);
        self.next_card();
    }

    pub fn on_skip(&mut self) {
        self.scheduler.skip(self.current_index);
        self.next_card();
    }

    fn next_card(&mut self) {
        // Terms are never empty here, so a pick always succeeds.
        if let Some(index) = self.scheduler.pick() {
            self.current_index = index;
        }
        self.reveal = RevealState::QuestionShown;
        self.cards_shown += 1;
    }
}
