use std::path::Path;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::store::{KnowledgeNode, KnowledgeStore, NodeId, PracticeDirection, StoreError};

/// Process-local store, optionally snapshotted to a JSON file
#[derive(Default)]
pub struct InMemoryStore {
    nodes: RwLock<Vec<KnowledgeNode>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_nodes(nodes: Vec<KnowledgeNode>) -> Self {
        Self {
            nodes: RwLock::new(nodes),
        }
    }

    /// Load a snapshot, or start empty if the file does not exist yet
    pub async fn load(path: &Path) -> Result<Self, StoreError> {
        if !tokio::fs::try_exists(path).await? {
            tracing::info!("No knowledge snapshot at {}, starting empty", path.display());
            return Ok(Self::new());
        }

        let data = tokio::fs::read_to_string(path).await?;
        let nodes: Vec<KnowledgeNode> = serde_json::from_str(&data)?;
        tracing::info!("Loaded {} knowledge nodes from {}", nodes.len(), path.display());
        Ok(Self::from_nodes(nodes))
    }

    pub async fn save(&self, path: &Path) -> Result<(), StoreError> {
        let nodes = self.nodes.read().await;
        let data = serde_json::to_string_pretty(&*nodes)?;
        tokio::fs::write(path, data).await?;
        tracing::info!("Saved {} knowledge nodes to {}", nodes.len(), path.display());
        Ok(())
    }

    /// Returns the top-level node with this name, creating it if missing
    pub async fn ensure_root(&self, name: &str) -> NodeId {
        let mut nodes = self.nodes.write().await;
        if let Some(node) = nodes.iter().find(|n| n.parent.is_none() && n.text == name) {
            return node.id.clone();
        }

        let mut node = KnowledgeNode::new(new_id());
        node.text = name.to_string();
        let id = node.id.clone();
        nodes.push(node);
        id
    }

    pub async fn node(&self, id: &NodeId) -> Option<KnowledgeNode> {
        self.nodes.read().await.iter().find(|n| &n.id == id).cloned()
    }

    pub async fn children(&self, id: &NodeId) -> Vec<KnowledgeNode> {
        self.nodes
            .read()
            .await
            .iter()
            .filter(|n| n.parent.as_ref() == Some(id))
            .cloned()
            .collect()
    }

    pub async fn nodes(&self) -> Vec<KnowledgeNode> {
        self.nodes.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.nodes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.nodes.read().await.is_empty()
    }

    async fn update<F>(&self, id: &NodeId, apply: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut KnowledgeNode),
    {
        let mut nodes = self.nodes.write().await;
        let node = nodes
            .iter_mut()
            .find(|n| &n.id == id)
            .ok_or_else(|| StoreError::NodeNotFound(id.clone()))?;
        apply(node);
        Ok(())
    }
}

fn new_id() -> NodeId {
    NodeId(uuid::Uuid::new_v4().to_string())
}

#[async_trait]
impl KnowledgeStore for InMemoryStore {
    /// Exact text match, top-level nodes first
    async fn find_node_by_name(&self, name: &str) -> Result<Option<NodeId>, StoreError> {
        let nodes = self.nodes.read().await;
        let found = nodes
            .iter()
            .find(|n| n.parent.is_none() && n.text == name)
            .or_else(|| nodes.iter().find(|n| n.text == name))
            .map(|n| n.id.clone());
        Ok(found)
    }

    async fn create_node(&self) -> Result<NodeId, StoreError> {
        let id = new_id();
        self.nodes.write().await.push(KnowledgeNode::new(id.clone()));
        Ok(id)
    }

    async fn set_text(&self, id: &NodeId, text: &str) -> Result<(), StoreError> {
        self.update(id, |node| node.text = text.to_string()).await
    }

    async fn set_parent(&self, id: &NodeId, parent: &NodeId) -> Result<(), StoreError> {
        let mut nodes = self.nodes.write().await;

        if !nodes.iter().any(|n| &n.id == id) {
            return Err(StoreError::NodeNotFound(id.clone()));
        }

        // Walk up from the new parent; meeting `id` on the way would form a cycle
        let mut cursor = Some(parent.clone());
        while let Some(current) = cursor {
            if &current == id {
                return Err(StoreError::InvalidParent {
                    id: id.clone(),
                    parent: parent.clone(),
                });
            }
            let node = nodes
                .iter()
                .find(|n| n.id == current)
                .ok_or_else(|| StoreError::NodeNotFound(current.clone()))?;
            cursor = node.parent.clone();
        }

        if let Some(node) = nodes.iter_mut().find(|n| &n.id == id) {
            node.parent = Some(parent.clone());
        }
        Ok(())
    }

    async fn set_is_review_card(
        &self,
        id: &NodeId,
        is_review_card: bool,
    ) -> Result<(), StoreError> {
        self.update(id, |node| node.is_review_card = is_review_card)
            .await
    }

    async fn set_practice_direction(
        &self,
        id: &NodeId,
        direction: PracticeDirection,
    ) -> Result<(), StoreError> {
        self.update(id, |node| node.practice_direction = Some(direction))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn find_prefers_top_level_nodes() {
        let store = InMemoryStore::new();
        let root = store.ensure_root("Vocab").await;

        let nested = store.create_node().await.unwrap();
        store.set_text(&nested, "Vocab").await.unwrap();
        store.set_parent(&nested, &root).await.unwrap();

        assert_eq!(store.find_node_by_name("Vocab").await.unwrap(), Some(root.clone()));
        assert_eq!(store.find_node_by_name("vocab").await.unwrap(), None);
        assert_eq!(store.ensure_root("Vocab").await, root);
    }

    #[tokio::test]
    async fn set_parent_rejects_cycles_and_unknown_nodes() {
        let store = InMemoryStore::new();
        let a = store.create_node().await.unwrap();
        let b = store.create_node().await.unwrap();
        store.set_parent(&b, &a).await.unwrap();

        assert!(matches!(
            store.set_parent(&a, &b).await,
            Err(StoreError::InvalidParent { .. })
        ));
        assert!(matches!(
            store.set_parent(&a, &a).await,
            Err(StoreError::InvalidParent { .. })
        ));
        assert!(matches!(
            store.set_parent(&a, &NodeId("missing".into())).await,
            Err(StoreError::NodeNotFound(_))
        ));
        assert_eq!(store.node(&a).await.unwrap().parent, None);
    }

    #[tokio::test]
    async fn snapshot_round_trips_through_file() {
        let path = std::env::temp_dir().join(format!("lexis-store-{}.json", uuid::Uuid::new_v4()));

        let store = InMemoryStore::new();
        let root = store.ensure_root("Vocab").await;
        let word = store.create_node().await.unwrap();
        store.set_text(&word, "cat").await.unwrap();
        store.set_parent(&word, &root).await.unwrap();
        store
            .set_practice_direction(&word, PracticeDirection::Both)
            .await
            .unwrap();
        store.save(&path).await.unwrap();

        let loaded = InMemoryStore::load(&path).await.unwrap();
        assert_eq!(loaded.nodes().await, store.nodes().await);
        tokio::fs::remove_file(&path).await.ok();
    }

    #[tokio::test]
    async fn missing_snapshot_starts_empty() {
        let path = std::env::temp_dir().join(format!("lexis-missing-{}.json", uuid::Uuid::new_v4()));
        assert!(InMemoryStore::load(&path).await.unwrap().is_empty().await);
    }
}
