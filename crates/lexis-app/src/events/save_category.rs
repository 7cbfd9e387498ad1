use std::sync::Arc;

use kanal::AsyncSender;
use lexis_core::LookupSlot;
use lexis_knowledge::{NodeTemplate, PersistError, persist};
use lexis_types::{AppEvent, CategoryRef, GroupedCategory, Notification};

use crate::state::AppState;

/// Persists one category of the currently shown word under the configured root.
/// The root name is read from config at this moment, not at startup.
pub async fn handle_save_category(
    state: Arc<AppState>,
    slot: &LookupSlot,
    category: CategoryRef,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let Some(selected) = select_category(slot.categories(), &category) else {
        let message = match slot.active_key() {
            Some(key) => format!("No {} category for '{}'", describe(&category), key),
            None => "Nothing selected to save".to_string(),
        };
        tracing::warn!("[SAVE] {}", message);
        app_to_ui_tx
            .send(AppEvent::Notify(Notification::error(message)))
            .await?;
        return Ok(());
    };

    let (root_name, template) = {
        let config = state.config.read().await;
        (
            config.knowledge.root_node_name.clone(),
            NodeTemplate::new(
                config.knowledge.word_template.clone(),
                config.knowledge.definition_template.clone(),
            ),
        )
    };

    let store = state.store.clone();
    let app_to_ui_tx = app_to_ui_tx.clone();
    tokio::spawn(async move {
        let notification = match persist(store.as_ref(), &template, &root_name, &selected).await
        {
            Ok(receipt) => Notification::info(format!(
                "Added '{}' ({}) with {} definitions to {}",
                selected.word,
                selected.part_of_speech,
                receipt.definition_nodes.len(),
                root_name.trim()
            )),
            Err(e) => {
                tracing::error!("Failed to save '{}': {}", selected.word, e);
                Notification::error(failure_message(&selected, &e))
            }
        };

        if let Err(e) = app_to_ui_tx.send(AppEvent::Notify(notification)).await {
            tracing::error!("Failed to send save result to UI: {}", e);
        }
    });

    Ok(())
}

fn select_category(
    categories: Vec<GroupedCategory>,
    category: &CategoryRef,
) -> Option<GroupedCategory> {
    match category {
        CategoryRef::Index(index) => categories.into_iter().nth(*index),
        CategoryRef::PartOfSpeech(pos) => categories
            .into_iter()
            .find(|c| c.part_of_speech.eq_ignore_ascii_case(pos)),
    }
}

fn describe(category: &CategoryRef) -> String {
    match category {
        CategoryRef::Index(index) => format!("#{}", index + 1),
        CategoryRef::PartOfSpeech(pos) => format!("'{pos}'"),
    }
}

fn failure_message(selected: &GroupedCategory, error: &PersistError) -> String {
    match error {
        PersistError::MissingConfiguration => {
            "Please set your Dictionary Root in settings".to_string()
        }
        PersistError::RootNotFound(name) => {
            format!("Dictionary Root '{name}' not found, check your settings")
        }
        PersistError::Store(source) => format!("Could not reach the knowledge store: {source}"),
        PersistError::CreateFailed { .. } => format!("Failed to save '{}': {}", selected.word, error),
    }
}
