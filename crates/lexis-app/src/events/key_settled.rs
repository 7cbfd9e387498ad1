use std::sync::Arc;

use kanal::AsyncSender;
use lexis_core::LookupSlot;
use lexis_types::{AppEvent, LookupKey};

use crate::state::AppState;

/// Starts a lookup for a settled key. The fetch runs detached and posts
/// `LookupResolved` back; a newer key voids it through the slot generation.
pub async fn handle_key_settled(
    state: Arc<AppState>,
    slot: &mut LookupSlot,
    key: Option<LookupKey>,
    events_tx: &AsyncSender<AppEvent>,
) {
    let Some(ticket) = slot.begin(key) else {
        tracing::debug!(
            "[LOOKUP] Selection has no word, voided generation {}",
            slot.generation()
        );
        return;
    };

    if !state.config.read().await.dictionary.enabled {
        tracing::debug!("[LOOKUP] Dictionary disabled, skipping '{}'", ticket.key);
        return;
    }

    tracing::info!("[LOOKUP] '{}' (generation {})", ticket.key, ticket.generation);

    let lexicon = state.lexicon.clone();
    let events_tx = events_tx.clone();
    tokio::spawn(async move {
        let record = match lexicon.lookup(&ticket.key).await {
            Ok(record) => record,
            Err(e) => {
                tracing::error!("Error getting dictionary info for '{}': {}", ticket.key, e);
                None
            }
        };

        if let Err(e) = events_tx
            .send(AppEvent::LookupResolved { ticket, record })
            .await
        {
            tracing::error!("Failed to send lookup result to app: {}", e);
        }
    });
}
