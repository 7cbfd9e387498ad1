use std::fmt;

use lexis_types::GroupedCategory;

use crate::store::{KnowledgeStore, NodeId, PracticeDirection, StoreError};
use crate::template::NodeTemplate;

/// Progress of a single persist call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistStage {
    Idle,
    ResolvingRoot,
    CreatingWordNode,
    CreatingChildNodes,
    AttachingToRoot,
    Done,
}

impl fmt::Display for PersistStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self {
            PersistStage::Idle => "idle",
            PersistStage::ResolvingRoot => "resolving root",
            PersistStage::CreatingWordNode => "creating word node",
            PersistStage::CreatingChildNodes => "creating definition nodes",
            PersistStage::AttachingToRoot => "attaching to root",
            PersistStage::Done => "done",
        };
        f.write_str(stage)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("Dictionary root is not configured")]
    MissingConfiguration,

    #[error("Root node '{0}' not found")]
    RootNotFound(String),

    #[error("Knowledge store unavailable: {0}")]
    Store(#[source] StoreError),

    #[error("Failed while {stage}: {source}")]
    CreateFailed {
        stage: PersistStage,
        #[source]
        source: StoreError,
    },
}

impl PersistError {
    pub fn stage(&self) -> Option<PersistStage> {
        match self {
            PersistError::CreateFailed { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

/// Nodes created by a successful persist call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistReceipt {
    pub root: NodeId,
    pub word_node: NodeId,
    pub definition_nodes: Vec<NodeId>,
}

/// Persists a grouped category as one word node with a child per definition.
///
/// The word node is attached under the root as the very last step, so a
/// failure part way through never leaves a partial subtree reachable from the
/// root. Nodes created before such a failure stay detached and are logged.
/// Calling this twice with the same input creates two independent subtrees.
pub async fn persist(
    store: &dyn KnowledgeStore,
    template: &NodeTemplate,
    root_name: &str,
    selection: &GroupedCategory,
) -> Result<PersistReceipt, PersistError> {
    let root_name = root_name.trim();
    if root_name.is_empty() {
        return Err(PersistError::MissingConfiguration);
    }

    let mut stage = PersistStage::ResolvingRoot;
    tracing::debug!("[PERSIST] {} '{}'", stage, root_name);
    let root = store
        .find_node_by_name(root_name)
        .await
        .map_err(PersistError::Store)?
        .ok_or_else(|| PersistError::RootNotFound(root_name.to_string()))?;

    let definitions = selection.flattened_definitions();

    stage = PersistStage::CreatingWordNode;
    tracing::debug!("[PERSIST] {} for '{}'", stage, selection.word);
    let word_node = store.create_node().await.map_err(failed(stage))?;
    let mut created = vec![word_node.clone()];

    if let Err(source) = store
        .set_text(&word_node, &template.format_word(selection))
        .await
    {
        report_detached(&created);
        return Err(PersistError::CreateFailed { stage, source });
    }

    stage = PersistStage::CreatingChildNodes;
    tracing::debug!("[PERSIST] {} ({})", stage, definitions.len());
    let mut definition_nodes = Vec::with_capacity(definitions.len());
    for definition in definitions {
        let result = async {
            let child = store.create_node().await?;
            created.push(child.clone());
            store
                .set_text(&child, &template.format_definition(selection, definition))
                .await?;
            store.set_parent(&child, &word_node).await?;
            store.set_is_review_card(&child, true).await?;
            Ok::<_, StoreError>(child)
        }
        .await;

        match result {
            Ok(child) => definition_nodes.push(child),
            Err(source) => {
                report_detached(&created);
                return Err(PersistError::CreateFailed { stage, source });
            }
        }
    }

    // Direction first so attaching is the single step that publishes the subtree
    stage = PersistStage::AttachingToRoot;
    tracing::debug!("[PERSIST] {} '{}'", stage, root);
    let attached = async {
        store
            .set_practice_direction(&word_node, PracticeDirection::Both)
            .await?;
        store.set_parent(&word_node, &root).await
    }
    .await;

    if let Err(source) = attached {
        report_detached(&created);
        return Err(PersistError::CreateFailed { stage, source });
    }

    stage = PersistStage::Done;
    tracing::info!(
        "[PERSIST] {}: '{}' ({}) with {} definitions under '{}'",
        stage,
        selection.word,
        selection.part_of_speech,
        definition_nodes.len(),
        root_name
    );

    Ok(PersistReceipt {
        root,
        word_node,
        definition_nodes,
    })
}

fn failed(stage: PersistStage) -> impl FnOnce(StoreError) -> PersistError {
    move |source| PersistError::CreateFailed { stage, source }
}

fn report_detached(nodes: &[NodeId]) {
    let ids: Vec<&str> = nodes.iter().map(|id| id.0.as_str()).collect();
    tracing::warn!(
        "[PERSIST] Left {} detached node(s) after failure: {}",
        ids.len(),
        ids.join(", ")
    );
}
