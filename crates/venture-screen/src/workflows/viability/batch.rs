//! CSV batch screening: one idea per row, columns `id,idea_text`.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::domain::{RawSignals, ValidationStatus};
use super::pipeline::ValidationPipeline;

#[derive(Debug)]
pub enum BatchImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for BatchImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchImportError::Io(err) => write!(f, "failed to read batch file: {}", err),
            BatchImportError::Csv(err) => write!(f, "invalid batch CSV data: {}", err),
        }
    }
}

impl std::error::Error for BatchImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BatchImportError::Io(err) => Some(err),
            BatchImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for BatchImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for BatchImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BatchIdea {
    pub id: String,
    pub idea_text: String,
}

/// One line of batch output. `error` is set instead of the score fields when the
/// idea could not be classified.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchOutcome {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ValidationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub struct BatchImporter;

impl BatchImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<BatchIdea>, BatchImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<BatchIdea>, BatchImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut ideas = Vec::new();
        for row in csv_reader.deserialize::<BatchIdea>() {
            ideas.push(row?);
        }
        Ok(ideas)
    }
}

/// Screen every idea with the same signals. Row failures are reported per row.
pub fn screen_batch(
    pipeline: &ValidationPipeline,
    ideas: &[BatchIdea],
    signals: &RawSignals,
) -> Vec<BatchOutcome> {
    ideas
        .iter()
        .map(|idea| match pipeline.validate(&idea.idea_text, signals) {
            Ok(result) => BatchOutcome {
                id: idea.id.clone(),
                status: Some(result.status),
                overall: Some(result.scores.overall),
                reasoning: Some(result.reasoning),
                error: None,
            },
            Err(err) => BatchOutcome {
                id: idea.id.clone(),
                status: None,
                overall: None,
                reasoning: None,
                error: Some(err.to_string()),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_trimmed_rows_with_quoted_text() {
        let data = "id,idea_text\n a-1 , \"Kanban boards, for teams\"\na-2,\n";
        let ideas = BatchImporter::from_reader(Cursor::new(data)).expect("parse batch");
        assert_eq!(ideas.len(), 2);
        assert_eq!(ideas[0].id, "a-1");
        assert_eq!(ideas[0].idea_text, "Kanban boards, for teams");
        assert_eq!(ideas[1].idea_text, "");
    }

    #[test]
    fn missing_column_is_a_csv_error() {
        let data = "id\nonly-id\n";
        let err = BatchImporter::from_reader(Cursor::new(data)).expect_err("missing column");
        assert!(matches!(err, BatchImportError::Csv(_)));
    }

    #[test]
    fn unclassifiable_rows_report_errors() {
        let ideas = vec![BatchIdea {
            id: "empty".to_string(),
            idea_text: String::new(),
        }];
        let outcomes = screen_batch(&ValidationPipeline::default(), &ideas, &RawSignals::default());
        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].status.is_none());
        assert!(outcomes[0].error.is_some());
    }
}
