//! Score record written once when a test finishes.
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResult {
    pub correct: usize,
    pub wrong: usize,
    pub total: usize,
    pub percent: u32,
    #[serde(rename = "time")]
    pub elapsed_seconds: u64,
}

impl TestResult {
    pub fn new(correct: usize, wrong: usize, total: usize, elapsed_seconds: u64) -> Self {
        Self {
            correct,
            wrong,
            total,
            percent: percent(correct, total),
            elapsed_seconds,
        }
    }

    /// Elapsed time as `m:ss`.
    pub fn formatted_time(&self) -> String {
        format_elapsed(self.elapsed_seconds)
    }
}

/// `round(correct / total * 100)`, or 0 for an empty test.
pub fn percent(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (correct as f64 / total as f64 * 100.0).round() as u32
}

pub fn format_elapsed(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_rounds() {
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(1, 8), 13);
        assert_eq!(percent(5, 5), 100);
        assert_eq!(percent(0, 4), 0);
    }

    #[test]
    fn test_percent_of_empty_test_is_zero() {
        assert_eq!(percent(0, 0), 0);
        assert_eq!(TestResult::new(0, 0, 0, 3).percent, 0);
    }

    #[test]
    fn test_formatted_time() {
        assert_eq!(format_elapsed(0), "0:00");
        assert_eq!(format_elapsed(59), "0:59");
        assert_eq!(format_elapsed(61), "1:01");
        assert_eq!(format_elapsed(600), "10:00");
    }

    #[test]
    fn test_stored_shape() {
        let result = TestResult::new(3, 1, 4, 42);
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(
            json,
            r#"{"correct":3,"wrong":1,"total":4,"percent":75,"time":42}"#
        );
    }
}
