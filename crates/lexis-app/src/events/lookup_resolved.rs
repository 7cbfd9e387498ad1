use kanal::AsyncSender;
use lexis_core::{LookupSlot, Resolution};
use lexis_types::{AppEvent, LookupTicket, WordRecord};

pub async fn handle_lookup_resolved(
    slot: &mut LookupSlot,
    ticket: LookupTicket,
    record: Option<WordRecord>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    match slot.resolve(&ticket, record) {
        Resolution::Stale => {
            tracing::debug!(
                "[LOOKUP] Dropping stale result for '{}' (generation {}, current {})",
                ticket.key,
                ticket.generation,
                slot.generation()
            );
        }
        Resolution::Applied => match slot.view() {
            Some(view) => {
                tracing::debug!(
                    "[LOOKUP] '{}': {} categories",
                    view.word,
                    view.categories.len()
                );
                app_to_ui_tx.send(AppEvent::ShowDefinitions(view)).await?;
            }
            None => {
                tracing::debug!("[LOOKUP] No definitions for '{}'", ticket.key);
                app_to_ui_tx.send(AppEvent::ClearDefinitions).await?;
            }
        },
    }

    Ok(())
}
