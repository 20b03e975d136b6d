pub mod collection;
pub mod flashcard_set;
pub mod scheduler;
pub mod study_session;
pub mod term;
pub mod test_result;
pub mod test_session;

pub use collection::{Collection, SetRef};
pub use flashcard_set::{FlashcardSet, SetDraft};
pub use scheduler::AdaptiveScheduler;
pub use study_session::{RevealState, StudySession};
pub use term::Term;
pub use test_result::TestResult;
pub use test_session::TestSession;
