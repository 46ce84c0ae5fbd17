use async_trait::async_trait;
use quiz_core::model::{Category, OptionKey, Question, QuestionError, QuestionId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by question sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Wire shape of one question in a bank file.
///
/// This mirrors the JSON objects on disk so sources can deserialize them
/// without leaking file-format concerns into the domain `Question`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub question: String,
    pub options: BTreeMap<String, String>,
    pub correct: String,
    pub explanation: String,
}

impl QuestionRecord {
    #[must_use]
    pub fn from_question(question: &Question) -> Self {
        Self {
            question: question.prompt().to_owned(),
            options: question
                .options()
                .map(|(key, text)| (key.as_str().to_owned(), text.to_owned()))
                .collect(),
            correct: question.correct().as_str().to_owned(),
            explanation: question.explanation().to_owned(),
        }
    }

    /// Convert the record into a validated domain `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the record breaks a question invariant,
    /// most notably a `correct` key that is not among `options`.
    pub fn into_question(self, id: QuestionId) -> Result<Question, QuestionError> {
        let options = self
            .options
            .into_iter()
            .map(|(key, text)| (OptionKey::new(key), text))
            .collect();
        Question::new(
            id,
            self.question,
            options,
            OptionKey::new(self.correct),
            self.explanation,
        )
    }
}

/// Parse the contents of a bank file: a JSON array of question objects.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if the content is not an array of
/// question objects.
pub fn parse_bank(raw: &str) -> Result<Vec<QuestionRecord>, StorageError> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| StorageError::Serialization(e.to_string()))?;
    if !value.is_array() {
        return Err(StorageError::Serialization(
            "invalid questions format: expected an array".into(),
        ));
    }
    serde_json::from_value(value).map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Source contract for question banks.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetch the raw records for one category.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the bank is unreachable or malformed.
    async fn fetch_bank(&self, category: Category) -> Result<Vec<QuestionRecord>, StorageError>;

    /// Human-readable location of a category's bank, used in error messages.
    fn describe(&self, category: Category) -> String {
        category.file_name()
    }
}

/// In-memory question source for tests and prototyping.
///
/// Categories never inserted are reported as `StorageError::NotFound`.
#[derive(Clone, Default)]
pub struct InMemorySource {
    banks: Arc<Mutex<HashMap<Category, Vec<QuestionRecord>>>>,
}

impl InMemorySource {
    #[must_use]
    pub fn new() -> Self {
        Self {
            banks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Source with an empty bank registered for every category.
    #[must_use]
    pub fn with_empty_banks() -> Self {
        let source = Self::new();
        for category in Category::ALL {
            source.insert_bank(category, Vec::new());
        }
        source
    }

    /// Replace the bank for `category`.
    pub fn insert_bank(&self, category: Category, records: Vec<QuestionRecord>) {
        if let Ok(mut guard) = self.banks.lock() {
            guard.insert(category, records);
        }
    }

    pub fn remove_bank(&self, category: Category) {
        if let Ok(mut guard) = self.banks.lock() {
            guard.remove(&category);
        }
    }
}

#[async_trait]
impl QuestionSource for InMemorySource {
    async fn fetch_bank(&self, category: Category) -> Result<Vec<QuestionRecord>, StorageError> {
        let guard = self
            .banks
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard
            .get(&category)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(category.file_name()))
    }

    fn describe(&self, category: Category) -> String {
        format!("memory:{}", category.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(correct: &str) -> QuestionRecord {
        QuestionRecord {
            question: "Who checks badges?".into(),
            options: [("A", "Guard"), ("B", "Visitor")]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            correct: correct.into(),
            explanation: "The guard controls access.".into(),
        }
    }

    #[test]
    fn parse_bank_requires_array() {
        let err = parse_bank(r#"{"question": "Q"}"#).unwrap_err();
        assert!(matches!(
            err,
            StorageError::Serialization(msg) if msg.contains("expected an array")
        ));
    }

    #[test]
    fn parse_bank_reads_question_objects() {
        let raw = r#"[{
            "question": "Q1",
            "options": {"A": "a", "B": "b"},
            "correct": "B",
            "explanation": "because"
        }]"#;
        let records = parse_bank(raw).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].correct, "B");
        assert_eq!(records[0].options.len(), 2);
    }

    #[test]
    fn parse_bank_rejects_elements_missing_fields() {
        let raw = r#"[{"question": "Q1", "correct": "A"}]"#;
        assert!(matches!(parse_bank(raw), Err(StorageError::Serialization(_))));

        let raw = r#"[{"question": "Q", "options": {"A": "a", "B": "b"}, "correct": "A"}]"#;
        let err = parse_bank(raw).unwrap_err();
        assert!(matches!(err, StorageError::Serialization(msg) if msg.contains("explanation")));
    }

    #[test]
    fn record_converts_into_validated_question() {
        let id = QuestionId::new(Category::AccessControl, 4);
        let question = record("A").into_question(id).unwrap();
        assert_eq!(question.id(), id);
        assert_eq!(QuestionRecord::from_question(&question), record("A"));

        let err = record("Z").into_question(id).unwrap_err();
        assert!(matches!(err, QuestionError::CorrectNotAnOption { .. }));
    }

    #[tokio::test]
    async fn in_memory_source_reports_missing_bank() {
        let source = InMemorySource::new();
        source.insert_bank(Category::EthicsConduct, vec![record("A")]);

        let bank = source.fetch_bank(Category::EthicsConduct).await.unwrap();
        assert_eq!(bank.len(), 1);

        let err = source.fetch_bank(Category::AccessControl).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }
}
