//! External persistence contract.
//!
//! The interaction core never talks to a backend; embedding shells do.
//! This module pins down the record shape and the operations a shell must
//! provide, so persistence failures surface as typed errors instead of
//! disappearing. `MemoryStore` is the in-process reference implementation
//! used by tests and demos.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("graph record not found: {0}")]
    NotFound(String),
    #[error("persistence backend failure: {0}")]
    Backend(String),
}

/// A stored graph document plus its listing metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphRecord {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// The snapshot JSON, when the backend inlines it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph_data: Option<Value>,
}

/// What a persistence backend must offer the dashboard around the editor.
pub trait GraphStore {
    fn list_graphs(&self, owner_id: &str) -> Result<Vec<GraphRecord>, StoreError>;

    fn create_graph(
        &mut self,
        owner_id: &str,
        title: &str,
        description: &str,
        tags: &[String],
    ) -> Result<GraphRecord, StoreError>;

    fn delete_graph(&mut self, id: &str) -> Result<(), StoreError>;
}

/// In-memory reference store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Vec<(String, GraphRecord)>,
    next_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GraphStore for MemoryStore {
    fn list_graphs(&self, owner_id: &str) -> Result<Vec<GraphRecord>, StoreError> {
        Ok(self
            .records
            .iter()
            .filter(|(owner, _)| owner == owner_id)
            .map(|(_, r)| r.clone())
            .collect())
    }

    fn create_graph(
        &mut self,
        owner_id: &str,
        title: &str,
        description: &str,
        tags: &[String],
    ) -> Result<GraphRecord, StoreError> {
        self.next_id += 1;
        let record = GraphRecord {
            id: format!("g{}", self.next_id),
            title: title.to_string(),
            created_at: Utc::now(),
            description: (!description.is_empty()).then(|| description.to_string()),
            tags: tags.to_vec(),
            graph_data: None,
        };
        self.records.push((owner_id.to_string(), record.clone()));
        Ok(record)
    }

    fn delete_graph(&mut self, id: &str) -> Result<(), StoreError> {
        let before = self.records.len();
        self.records.retain(|(_, r)| r.id != id);
        if self.records.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
