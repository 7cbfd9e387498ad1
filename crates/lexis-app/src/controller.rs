use std::sync::Arc;
use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use lexis_io::SelectionFeed;
use lexis_types::AppEvent;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::io::{SourceKind, input_io, selection_io, watcher_io};
use crate::state::AppState;
use crate::ui::ui_loop;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub events: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            app_to_ui: kanal::bounded_async(64),
            events: kanal::bounded_async(256), // selection bursts plus task completions
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    feed: SelectionFeed,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>, feed: SelectionFeed) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            feed,
            cancel_token: CancellationToken::new(),
        }
    }

    #[cfg(test)]
    pub fn events(&self) -> AsyncSender<AppEvent> {
        self.channels.events.0.clone()
    }

    #[cfg(test)]
    pub fn ui_events(&self) -> AsyncReceiver<AppEvent> {
        self.channels.app_to_ui.1.clone()
    }

    /// Event loop and the selection → lookup pipeline, without any presenter or source
    pub async fn spawn_pipeline(&self, tasks: &mut JoinSet<anyhow::Result<()>>) {
        let quiet = {
            let config = self.state.config.read().await;
            Duration::from_millis(config.dictionary.debounce_ms)
        };

        // Event loop
        tasks.spawn(event_loop(
            self.state.clone(),
            self.channels.events.1.clone(),
            self.channels.events.0.clone(),
            self.channels.app_to_ui.0.clone(),
        ));

        // Selection feed → debounced lookup keys
        tasks.spawn(selection_io(
            self.feed.clone(),
            quiet,
            self.cancel_token.child_token(),
            self.channels.events.0.clone(),
        ));
    }

    pub async fn spawn_tasks(&self, source: SourceKind) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();
        self.spawn_pipeline(&mut tasks).await;

        // UI loop
        tasks.spawn(ui_loop(
            self.channels.app_to_ui.1.clone(),
            self.state.config.clone(),
        ));

        // Watcher IO
        tasks.spawn(watcher_io(
            self.state.clone(),
            source,
            self.feed.clone(),
            self.cancel_token.child_token(),
        ));

        // Commands and manual selections
        tasks.spawn(input_io(
            self.feed.clone(),
            self.cancel_token.child_token(),
            self.channels.events.0.clone(),
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
