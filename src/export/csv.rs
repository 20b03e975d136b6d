//! Term import from CSV: question in the first column, answer in the second,
//! no header row. Extra columns are ignored and incomplete rows are skipped.

use crate::error::Result;
use crate::models::Term;
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub fn parse_terms_csv<R: Read>(reader: R) -> Result<Vec<Term>> {
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(::csv::Trim::All)
        .from_reader(reader);

    let mut terms = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let question = record.get(0).unwrap_or_default();
        let answer = record.get(1).unwrap_or_default();
        match Term::from_input(question, answer) {
            Some(term) => terms.push(term),
            None => log::debug!("Skipping incomplete CSV row {}", row + 1),
        }
    }
    Ok(terms)
}

pub fn import_terms_csv(path: impl AsRef<Path>) -> Result<Vec<Term>> {
    let file = File::open(path.as_ref())?;
    let terms = parse_terms_csv(file)?;
    log::info!(
        "Read {} terms from '{}'",
        terms.len(),
        path.as_ref().display()
    );
    Ok(terms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FlashcardsError;
    use tempfile::TempDir;

    #[test]
    fn test_parse_two_columns() {
        let input = "cell,basic unit of life\nATP, energy currency \n";
        let terms = parse_terms_csv(input.as_bytes()).unwrap();
        assert_eq!(
            terms,
            vec![
                Term::new("cell", "basic unit of life"),
                Term::new("ATP", "energy currency"),
            ]
        );
    }

    #[test]
    fn test_quoted_fields_and_extra_columns() {
        let input = "\"What, exactly?\",\"An answer\nover two lines\",ignored\n";
        let terms = parse_terms_csv(input.as_bytes()).unwrap();
        assert_eq!(
            terms,
            vec![Term::new("What, exactly?", "An answer\nover two lines")]
        );
    }

    #[test]
    fn test_incomplete_rows_are_skipped() {
        let input = "only question\n,only answer\n\nQ,A\n";
        let terms = parse_terms_csv(input.as_bytes()).unwrap();
        assert_eq!(terms, vec![Term::new("Q", "A")]);
    }

    #[test]
    fn test_import_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("terms.csv");
        std::fs::write(&path, "dom,house\nkot,cat\n").unwrap();

        let terms = import_terms_csv(&path).unwrap();
        assert_eq!(terms.len(), 2);
        assert_eq!(terms[1], Term::new("kot", "cat"));
    }

    #[test]
    fn test_import_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = import_terms_csv(temp_dir.path().join("missing.csv"));
        assert!(matches!(result, Err(FlashcardsError::Io(_))));
    }
}
