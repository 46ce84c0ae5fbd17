use std::sync::Arc;

use quiz_core::model::{Category, QuestionBank, QuestionBanks, QuestionId};
use storage::repository::QuestionSource;
use tracing::{debug, info, warn};

use crate::error::LoadError;

/// Loads every category bank from a question source in one pass.
#[derive(Clone)]
pub struct QuestionBankService {
    source: Arc<dyn QuestionSource>,
}

impl QuestionBankService {
    #[must_use]
    pub fn new(source: Arc<dyn QuestionSource>) -> Self {
        Self { source }
    }

    /// Fetch and validate all banks, in fixed category order.
    ///
    /// The first failure aborts the load and nothing loaded so far is kept.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Source` if a bank is unreachable or not an array of
    /// questions, and `LoadError::InvalidQuestion` if a question breaks a
    /// question invariant.
    pub async fn load_all(&self) -> Result<QuestionBanks, LoadError> {
        let mut banks = Vec::with_capacity(Category::ALL.len());
        for category in Category::ALL {
            match self.load_bank(category).await {
                Ok(bank) => {
                    debug!(category = category.id(), questions = bank.len(), "loaded bank");
                    banks.push(bank);
                }
                Err(err) => {
                    warn!(category = category.id(), error = %err, "question load failed");
                    return Err(err);
                }
            }
        }

        let banks = QuestionBanks::new(banks);
        info!(total = banks.total_questions(), "question banks loaded");
        Ok(banks)
    }

    async fn load_bank(&self, category: Category) -> Result<QuestionBank, LoadError> {
        let location = self.source.describe(category);
        let records =
            self.source
                .fetch_bank(category)
                .await
                .map_err(|source| LoadError::Source {
                    category,
                    location: location.clone(),
                    source,
                })?;

        let questions = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                record
                    .into_question(QuestionId::new(category, index))
                    .map_err(|source| LoadError::InvalidQuestion {
                        category,
                        location: location.clone(),
                        index,
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(QuestionBank::new(category, questions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use storage::repository::{InMemorySource, QuestionRecord, StorageError};

    fn record(correct: &str) -> QuestionRecord {
        QuestionRecord {
            question: "Q".into(),
            options: BTreeMap::from([
                ("A".to_string(), "a".to_string()),
                ("B".to_string(), "b".to_string()),
            ]),
            correct: correct.into(),
            explanation: "E".into(),
        }
    }

    #[tokio::test]
    async fn loads_every_category() {
        let source = InMemorySource::with_empty_banks();
        source.insert_bank(Category::EthicsConduct, vec![record("A"), record("B")]);
        let service = QuestionBankService::new(Arc::new(source));

        let banks = service.load_all().await.unwrap();
        assert_eq!(banks.bank(Category::EthicsConduct).len(), 2);
        assert!(banks.bank(Category::AccessControl).is_empty());
        assert_eq!(
            banks.bank(Category::EthicsConduct).questions()[1].id(),
            QuestionId::new(Category::EthicsConduct, 1)
        );
    }

    #[tokio::test]
    async fn missing_bank_fails_whole_load() {
        let source = InMemorySource::with_empty_banks();
        source.remove_bank(Category::EmergencySituations);
        let service = QuestionBankService::new(Arc::new(source));

        let err = service.load_all().await.unwrap_err();
        assert_eq!(err.category(), Category::EmergencySituations);
        assert!(matches!(
            err,
            LoadError::Source {
                source: StorageError::NotFound(_),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn invalid_question_fails_whole_load() {
        let source = InMemorySource::with_empty_banks();
        source.insert_bank(Category::AccessControl, vec![record("A"), record("Z")]);
        let service = QuestionBankService::new(Arc::new(source));

        match service.load_all().await.unwrap_err() {
            LoadError::InvalidQuestion {
                category, index, ..
            } => {
                assert_eq!(category, Category::AccessControl);
                assert_eq!(index, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
