//! A named, ordered set of terms, plus the unvalidated draft it is built from.
use super::Term;
use crate::error::ValidationError;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashcardSet {
    pub name: String,
    pub terms: Vec<Term>,
    /// Milliseconds since the epoch; absent or zero means never opened.
    #[serde(
        rename = "lastOpened",
        default,
        deserialize_with = "deserialize_millis",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_opened: Option<i64>,
}

/// Accepts any JSON number; fractional milliseconds are truncated.
fn deserialize_millis<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let number = Option::<serde_json::Number>::deserialize(deserializer)?;
    Ok(number.and_then(|n| n.as_i64().or_else(|| n.as_f64().map(|ms| ms as i64))))
}

impl FlashcardSet {
    pub fn new(name: impl Into<String>, terms: Vec<Term>) -> Self {
        Self {
            name: name.into(),
            terms,
            last_opened: None,
        }
    }

    pub fn last_opened(&self) -> Option<i64> {
        self.last_opened.filter(|&ms| ms != 0)
    }

    pub fn mark_opened(&mut self, now_ms: i64) {
        self.last_opened = Some(now_ms);
    }
}

/// Raw editor input for a set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SetDraft {
    pub name: String,
    pub terms: Vec<Term>,
}

impl SetDraft {
    pub fn new(name: impl Into<String>, terms: Vec<Term>) -> Self {
        Self {
            name: name.into(),
            terms,
        }
    }

    /// Trims the name and every term, drops terms missing either side,
    /// and rejects an empty name or an empty term list.
    pub fn validate(self) -> Result<FlashcardSet, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }

        let terms: Vec<Term> = self
            .terms
            .iter()
            .filter_map(|t| Term::from_input(&t.question, &t.answer))
            .collect();
        if terms.is_empty() {
            return Err(ValidationError::NoTerms);
        }

        Ok(FlashcardSet::new(name, terms))
    }
}

impl From<FlashcardSet> for SetDraft {
    fn from(set: FlashcardSet) -> Self {
        Self {
            name: set.name,
            terms: set.terms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_keeps_complete_terms() {
        let draft = SetDraft::new(
            " Bio ",
            vec![
                Term::new("Q1", "A1"),
                Term::new("Q2", ""),
                Term::new("  ", "A3"),
                Term::new(" Q4", "A4 "),
            ],
        );

        let set = draft.validate().unwrap();
        assert_eq!(set.name, "Bio");
        assert_eq!(set.terms, vec![Term::new("Q1", "A1"), Term::new("Q4", "A4")]);
        assert_eq!(set.last_opened, None);
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        let draft = SetDraft::new("   ", vec![Term::new("Q1", "A1")]);
        assert_eq!(draft.validate(), Err(ValidationError::EmptyName));
    }

    #[test]
    fn test_validate_rejects_no_complete_terms() {
        let draft = SetDraft::new("Bio", vec![Term::new("Q1", ""), Term::new("", "A2")]);
        assert_eq!(draft.validate(), Err(ValidationError::NoTerms));
    }

    #[test]
    fn test_zero_last_opened_means_never() {
        let mut set = FlashcardSet::new("Bio", vec![Term::new("Q1", "A1")]);
        set.last_opened = Some(0);
        assert_eq!(set.last_opened(), None);

        set.mark_opened(1_700_000_000_000);
        assert_eq!(set.last_opened(), Some(1_700_000_000_000));
    }

    #[test]
    fn test_serialized_shape() {
        let mut set = FlashcardSet::new("Bio", vec![Term::new("Q1", "A1")]);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(
            json,
            r#"{"name":"Bio","terms":[{"question":"Q1","answer":"A1"}]}"#
        );

        set.mark_opened(5);
        let json = serde_json::to_string(&set).unwrap();
        assert!(json.ends_with(r#""lastOpened":5}"#));
    }

    #[test]
    fn test_missing_last_opened_deserializes() {
        let set: FlashcardSet = serde_json::from_str(r#"{"name":"Bio","terms":[]}"#).unwrap();
        assert_eq!(set.last_opened, None);
        assert!(set.terms.is_empty());
    }

    #[test]
    fn test_fractional_last_opened_is_accepted() {
        let set: FlashcardSet = serde_json::from_str(
            r#"{"name":"Bio","terms":[],"lastOpened":1700000000000.7}"#,
        )
        .unwrap();
        assert_eq!(set.last_opened(), Some(1_700_000_000_000));

        let set: FlashcardSet =
            serde_json::from_str(r#"{"name":"Bio","terms":[],"lastOpened":1.7e12}"#).unwrap();
        assert_eq!(set.last_opened(), Some(1_700_000_000_000));

        let set: FlashcardSet =
            serde_json::from_str(r#"{"name":"Bio","terms":[],"lastOpened":null}"#).unwrap();
        assert_eq!(set.last_opened, None);
    }
}
