//! Test mode: every term exactly once in a random order fixed at the start,
//! scored at the end. No weighting.

use super::{FlashcardSet, RevealState, Term, TestResult};
use rand::Rng;
use rand::seq::SliceRandom;

pub struct TestSession {
    set_name: String,
    terms: Vec<Term>,
    order: Vec<usize>,
    position: usize,
    correct: usize,
    wrong: usize,
    elapsed_seconds: u64,
    reveal: RevealState,
}

impl TestSession {
    pub fn new<R: Rng + ?Sized>(set: &FlashcardSet, rng: &mut R) -> Self {
        let mut order: Vec<usize> = (0..set.terms.len()).collect();
        order.shuffle(rng);

        log::info!(
            "Test session started on '{}' ({} terms)",
            set.name,
            set.terms.len()
        );

        Self {
            set_name: set.name.clone(),
            terms: set.terms.clone(),
            order,
            position: 0,
            correct: 0,
            wrong: 0,
            elapsed_seconds: 0,
            reveal: RevealState::QuestionShown,
        }
    }

    pub fn set_name(&self) -> &str {
        &self.set_name
    }

    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn total(&self) -> usize {
        self.order.len()
    }

    pub fn answered(&self) -> usize {
        self.position
    }

    pub fn correct(&self) -> usize {
        self.correct
    }

    pub fn wrong(&self) -> usize {
        self.wrong
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    pub fn reveal_state(&self) -> RevealState {
        self.reveal
    }

    pub fn is_finished(&self) -> bool {
        self.position >= self.order.len()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.order.get(self.position).copied()
    }

    pub fn current_term(&self) -> Option<&Term> {
        self.current_index().and_then(|i| self.terms.get(i))
    }

    pub fn current_content(&self) -> Option<&str> {
        self.current_term().map(|term| match self.reveal {
            RevealState::QuestionShown => term.question.as_str(),
            RevealState::AnswerShown => term.answer.as_str(),
        })
    }

    /// One timer tick: one second. Stops counting once finished.
    pub fn tick(&mut self) {
        if !self.is_finished() {
            self.elapsed_seconds += 1;
        }
    }

    pub fn on_flip(&mut self) {
        if !self.is_finished() {
            self.reveal = self.reveal.flipped();
        }
    }

    /// Scores the current card; returns the result when it was the last one.
    pub fn on_correct(&mut self) -> Option<TestResult> {
        if self.is_finished() {
            return None;
        }
        self.correct += 1;
        self.advance()
    }

    pub fn on_wrong(&mut self) -> Option<TestResult> {
        if self.is_finished() {
            return None;
        }
        self.wrong += 1;
        self.advance()
    }

    /// Final score, available once every term has been answered.
    pub fn result(&self) -> Option<TestResult> {
        self.is_finished().then(|| {
            TestResult::new(self.correct, self.wrong, self.total(), self.elapsed_seconds)
        })
    }

    fn advance(&mut self) -> Option<TestResult> {
        self.position += 1;
        self.reveal = RevealState::QuestionShown;
        let result = self.result();
        if let Some(result) = &result {
            log::info!(
                "Test on '{}' finished: {}/{} ({}%) in {}",
                self.set_name,
                result.correct,
                result.total,
                result.percent,
                result.formatted_time()
            );
        }
        result
    }
}
