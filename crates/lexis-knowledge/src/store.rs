use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PracticeDirection {
    Forward,
    Backward,
    Both,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeNode {
    pub id: NodeId,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub parent: Option<NodeId>,
    #[serde(default)]
    pub is_review_card: bool,
    #[serde(default)]
    pub practice_direction: Option<PracticeDirection>,
}

impl KnowledgeNode {
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            text: String::new(),
            parent: None,
            is_review_card: false,
            practice_direction: None,
        }
    }
}

/// Hierarchical note store operations
#[async_trait]
pub trait KnowledgeStore: Send + Sync {
    async fn find_node_by_name(&self, name: &str) -> Result<Option<NodeId>, StoreError>;

    /// New, parentless node with empty text
    async fn create_node(&self) -> Result<NodeId, StoreError>;

    async fn set_text(&self, id: &NodeId, text: &str) -> Result<(), StoreError>;

    async fn set_parent(&self, id: &NodeId, parent: &NodeId) -> Result<(), StoreError>;

    async fn set_is_review_card(&self, id: &NodeId, is_review_card: bool)
    -> Result<(), StoreError>;

    async fn set_practice_direction(
        &self,
        id: &NodeId,
        direction: PracticeDirection,
    ) -> Result<(), StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Invalid parent {parent} for node {id}")]
    InvalidParent { id: NodeId, parent: NodeId },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Store error: {0}")]
    Remote(String),

    #[error("Store returned null result for {0}")]
    EmptyResult(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
