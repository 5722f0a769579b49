//! Knowledge source implementations.
//!
//! - [`StaticKnowledgeSource`]: a fixed list held in memory
//! - [`JsonFileKnowledgeSource`]: a JSON seed file, either a bare array of
//!   documents or an object with a `knowledge` array

use async_trait::async_trait;
use campusdesk_core::error::KnowledgeError;
use campusdesk_core::knowledge::{KnowledgeDocument, KnowledgeSource};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::debug;

/// An in-memory list of documents.
pub struct StaticKnowledgeSource {
    documents: Vec<KnowledgeDocument>,
}

impl StaticKnowledgeSource {
    pub fn new(documents: Vec<KnowledgeDocument>) -> Self {
        Self { documents }
    }
}

#[async_trait]
impl KnowledgeSource for StaticKnowledgeSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn list_all(&self) -> Result<Vec<KnowledgeDocument>, KnowledgeError> {
        Ok(self.documents.clone())
    }
}

/// Reads documents from a JSON file on every `list_all`.
pub struct JsonFileKnowledgeSource {
    path: PathBuf,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SeedFile {
    Documents(Vec<KnowledgeDocument>),
    Sections {
        #[serde(default)]
        knowledge: Vec<KnowledgeDocument>,
    },
}

impl JsonFileKnowledgeSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn parse(content: &str) -> Result<Vec<KnowledgeDocument>, serde_json::Error> {
        Ok(match serde_json::from_str::<SeedFile>(content)? {
            SeedFile::Documents(docs) => docs,
            SeedFile::Sections { knowledge } => knowledge,
        })
    }
}

#[async_trait]
impl KnowledgeSource for JsonFileKnowledgeSource {
    fn name(&self) -> &str {
        "json_file"
    }

    async fn list_all(&self) -> Result<Vec<KnowledgeDocument>, KnowledgeError> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            KnowledgeError::SourceUnavailable(format!("{}: {e}", self.path.display()))
        })?;

        let documents = Self::parse(&content).map_err(|e| {
            KnowledgeError::SourceUnavailable(format!("{}: {e}", self.path.display()))
        })?;

        debug!(path = %self.path.display(), count = documents.len(), "Loaded knowledge documents");
        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn static_source_preserves_order() {
        let source = StaticKnowledgeSource::new(vec![
            KnowledgeDocument::new("first"),
            KnowledgeDocument::new("second"),
        ]);
        let docs = source.list_all().await.unwrap();
        assert_eq!(docs[0].content, "first");
        assert_eq!(docs[1].content, "second");
    }

    #[tokio::test]
    async fn json_array_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"content": "Room 203 is IT", "category": "rooms"}}, {{"content": "Library opens at 8", "metadata": {{"floor": 2}}}}]"#
        )
        .unwrap();

        let docs = JsonFileKnowledgeSource::new(file.path()).list_all().await.unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].category.as_deref(), Some("rooms"));
        assert_eq!(docs[1].metadata["floor"], 2);
    }

    #[tokio::test]
    async fn json_sections_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"knowledge": [{{"content": "Gym is in building C"}}], "menus": {{}}}}"#
        )
        .unwrap();

        let docs = JsonFileKnowledgeSource::new(file.path()).list_all().await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].content, "Gym is in building C");
    }

    #[tokio::test]
    async fn missing_file_is_source_unavailable() {
        let err = JsonFileKnowledgeSource::new("/nonexistent/campus.json")
            .list_all()
            .await
            .unwrap_err();
        assert!(matches!(err, KnowledgeError::SourceUnavailable(_)));
    }

    #[tokio::test]
    async fn malformed_file_is_source_unavailable() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = JsonFileKnowledgeSource::new(file.path()).list_all().await.unwrap_err();
        assert!(matches!(err, KnowledgeError::SourceUnavailable(_)));
    }
}
