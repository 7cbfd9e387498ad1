use std::time::Duration;

use arboard::Clipboard;
use tokio::time::{self, MissedTickBehavior};

/// Polls the clipboard and reports each new selection-worthy text, trimmed.
/// Fails up front when no clipboard is available (e.g. a headless session).
pub async fn watch_clipboard<F>(interval: Duration, mut on_text: F) -> Result<(), anyhow::Error>
where
    F: FnMut(String) + Send + 'static,
{
    let mut clipboard = Clipboard::new()?;
    let mut last = ClipboardText::default();

    let mut ticks = time::interval(interval);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticks.tick().await;
        match clipboard.get_text() {
            Ok(raw) => {
                if let Some(text) = last.accept(&raw) {
                    on_text(text);
                }
            }
            // Non-text content (images, files) is not a selection
            Err(e) => tracing::trace!("Clipboard has no text: {}", e),
        }
    }
}

/// Last reported clipboard text
#[derive(Debug, Default)]
struct ClipboardText(String);

impl ClipboardText {
    /// Whitespace-only copies and re-copies of the same text are ignored
    fn accept(&mut self, raw: &str) -> Option<String> {
        let text = raw.trim();
        if text.is_empty() || text == self.0 {
            return None;
        }

        self.0 = text.to_string();
        Some(self.0.clone())
    }
}
