use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use lexis_core::LookupSlot;
use lexis_types::{AppEvent, Notification};

use crate::state::AppState;

pub mod key_settled;
pub mod lookup_resolved;
pub mod save_category;

use key_settled::handle_key_settled;
use lookup_resolved::handle_lookup_resolved;
use save_category::handle_save_category;

/// App's main loop. Sole owner of the lookup slot; async work reports back as events.
pub async fn event_loop(
    state: Arc<AppState>,
    events_rx: AsyncReceiver<AppEvent>,
    events_tx: AsyncSender<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let mut slot = LookupSlot::new();

    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        let event = events_rx.recv().await?;

        if let AppEvent::Shutdown = event {
            tracing::info!("[EVENT_LOOP] Shutdown requested");
            app_to_ui_tx.send(AppEvent::Shutdown).await?;
            return Ok(());
        }

        tracing::debug!(
            "[EVENT_LOOP] Event received: {:?}",
            std::mem::discriminant(&event)
        );
        handle_events(state.clone(), &mut slot, &events_tx, &app_to_ui_tx, event).await?;
    }
}

async fn handle_events(
    state: Arc<AppState>,
    slot: &mut LookupSlot,
    events_tx: &AsyncSender<AppEvent>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    event: AppEvent,
) -> anyhow::Result<()> {
    match event {
        AppEvent::ConfigUpdate { field, value } => {
            let result = state.config.write().await.apply_update(&field, &value);
            let notification = match result {
                Ok(()) => {
                    tracing::info!("Setting {} = '{}'", field, value);
                    Notification::info(format!("Updated {field}"))
                }
                Err(e) => {
                    tracing::warn!("Rejected setting change: {}", e);
                    Notification::error(e.to_string())
                }
            };
            app_to_ui_tx.send(AppEvent::Notify(notification)).await?;
        }
        AppEvent::KeySettled(key) => {
            handle_key_settled(state, slot, key, events_tx).await;
        }
        AppEvent::LookupResolved { ticket, record } => {
            handle_lookup_resolved(slot, ticket, record, app_to_ui_tx).await?;
        }
        AppEvent::SaveCategory(category) => {
            handle_save_category(state, slot, category, app_to_ui_tx).await?;
        }
        AppEvent::ShowDefinitions(_) | AppEvent::ClearDefinitions | AppEvent::Notify(_) => {
            // UI-only events, ignore in backend
        }
        AppEvent::Shutdown => {}
    }

    Ok(())
}
