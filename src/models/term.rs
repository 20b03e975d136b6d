//! Term is a pair <question, answer>. The answer may embed a markdown image tag;
//! it is kept as an opaque string.
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub question: String,
    pub answer: String,
}

impl Term {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// Trims both sides of user input; `None` unless both are non-empty.
    pub fn from_input(question: &str, answer: &str) -> Option<Self> {
        let question = question.trim();
        let answer = answer.trim();
        if question.is_empty() || answer.is_empty() {
            None
        } else {
            Some(Self::new(question, answer))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_creation() {
        let term = Term::new("hello", "cześć");

        assert_eq!(term.question, "hello");
        assert_eq!(term.answer, "cześć");
    }

    #[test]
    fn test_from_input_trims() {
        let term = Term::from_input("  Q1 ", "\tA1\n").unwrap();
        assert_eq!(term, Term::new("Q1", "A1"));
    }

    #[test]
    fn test_from_input_requires_both_sides() {
        assert!(Term::from_input("Q1", "   ").is_none());
        assert!(Term::from_input("", "A1").is_none());
    }

    #[test]
    fn test_image_answer_is_opaque() {
        let answer = "![cell](data:image/png;base64,iVBORw0KGgo=)";
        let term = Term::from_input("What is this?", answer).unwrap();
        assert_eq!(term.answer, answer);
    }

    #[test]
    fn test_wire_field_names() {
        let json = serde_json::to_string(&Term::new("Q", "A")).unwrap();
        assert_eq!(json, r#"{"question":"Q","answer":"A"}"#);
    }
}
