use std::sync::Arc;

use lexis_types::{Selection, TextSource};
use tokio::sync::watch;

/// Latest host selection, observable and readable on demand
#[derive(Clone)]
pub struct SelectionFeed {
    tx: Arc<watch::Sender<Selection>>,
}

impl SelectionFeed {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(Selection::Other);
        Self { tx: Arc::new(tx) }
    }

    pub fn publish(&self, selection: Selection, source: TextSource) {
        tracing::debug!(
            "[FEED] Selection from {}: {}",
            source,
            match &selection {
                Selection::Text { rich_text } => format!("{} element(s)", rich_text.elements().len()),
                Selection::Other => "non-text".to_string(),
            }
        );
        self.tx.send_replace(selection);
    }

    pub fn snapshot(&self) -> Selection {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Selection> {
        self.tx.subscribe()
    }
}

impl Default for SelectionFeed {
    fn default() -> Self {
        Self::new()
    }
}
