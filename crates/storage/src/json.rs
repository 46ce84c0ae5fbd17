use async_trait::async_trait;
use quiz_core::model::Category;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::repository::{QuestionRecord, QuestionSource, StorageError, parse_bank};

/// Reads banks from `<root>/<category id>.json`.
#[derive(Debug, Clone)]
pub struct JsonDirSource {
    root: PathBuf,
}

impl JsonDirSource {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn bank_path(&self, category: Category) -> PathBuf {
        self.root.join(category.file_name())
    }
}

#[async_trait]
impl QuestionSource for JsonDirSource {
    async fn fetch_bank(&self, category: Category) -> Result<Vec<QuestionRecord>, StorageError> {
        let path = self.bank_path(category);
        let raw = tokio::fs::read_to_string(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => StorageError::NotFound(path.display().to_string()),
            _ => StorageError::Io(format!("{}: {e}", path.display())),
        })?;
        parse_bank(&raw)
    }

    fn describe(&self, category: Category) -> String {
        self.bank_path(category).display().to_string()
    }
}

/// Write `records` as a pretty-printed bank file for `category` under `root`.
///
/// # Errors
///
/// Returns `StorageError` if the directory or file cannot be written.
pub async fn write_bank(
    root: &Path,
    category: Category,
    records: &[QuestionRecord],
) -> Result<PathBuf, StorageError> {
    tokio::fs::create_dir_all(root)
        .await
        .map_err(|e| StorageError::Io(format!("{}: {e}", root.display())))?;
    let path = root.join(category.file_name());
    let body = serde_json::to_string_pretty(records)
        .map_err(|e| StorageError::Serialization(e.to_string()))?;
    tokio::fs::write(&path, body)
        .await
        .map_err(|e| StorageError::Io(format!("{}: {e}", path.display())))?;
    Ok(path)
}
