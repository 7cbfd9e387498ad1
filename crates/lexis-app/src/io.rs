use std::io::BufRead;
use std::sync::Arc;
use std::time::Duration;

use kanal::AsyncSender;
use lexis_core::{DefaultConverter, debounce, selection_key};
use lexis_io::SelectionFeed;
use lexis_types::{AppEvent, CategoryRef, Selection, TextSource};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

/// Where host selections come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SourceKind {
    Clipboard,
    Ws,
    /// Only manual selections typed on stdin
    Stdin,
}

/// Feed → lookup key → debounce → `KeySettled`
pub async fn selection_io(
    feed: SelectionFeed,
    quiet: Duration,
    cancel: CancellationToken,
    events_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let converter = DefaultConverter;
    let mut selections = feed.subscribe();

    let initial = selection_key(&selections.borrow_and_update(), &converter);
    let (key_tx, key_rx) = watch::channel(initial);
    let mut settled = debounce(key_rx, quiet, cancel.child_token());

    tracing::info!("[SELECTION] Watching selections ({}ms quiet period)", quiet.as_millis());
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("[SELECTION] Stopping");
                break;
            }
            changed = selections.changed() => {
                if changed.is_err() {
                    break;
                }
                let key = selection_key(&selections.borrow_and_update(), &converter);
                // Same word again keeps the running timer
                key_tx.send_if_modified(|current| {
                    if *current == key {
                        return false;
                    }
                    tracing::trace!("[SELECTION] Candidate {:?}", key);
                    *current = key;
                    true
                });
            }
            changed = settled.changed() => {
                if changed.is_err() {
                    break;
                }
                let key = settled.borrow_and_update().clone();
                events_tx.send(AppEvent::KeySettled(key)).await?;
            }
        }
    }

    Ok(())
}

/// Source adapters publishing into the selection feed
pub async fn watcher_io(
    state: Arc<AppState>,
    source: SourceKind,
    feed: SelectionFeed,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let (delta_time, ws_url) = {
        let config = state.config.read().await;
        (Duration::from_millis(config.delta_time), config.ws_url.clone())
    };

    let failure = match source {
        SourceKind::Ws => {
            tracing::info!("Starting WebSocket listener on {}", ws_url);

            tokio::select! {
                result = lexis_io::ws::start_ws_listener(&ws_url, move |selection| {
                    feed.publish(selection, TextSource::Websocket);
                }) => result.err(),
                _ = cancel.cancelled() => return Ok(()),
            }
        }
        SourceKind::Clipboard => {
            tracing::info!("Starting clipboard watcher");

            tokio::select! {
                result = lexis_io::clipboard::watch_clipboard(delta_time, move |text| {
                    feed.publish(Selection::text(text), TextSource::Clipboard);
                }) => result.err(),
                _ = cancel.cancelled() => {
                    tracing::info!("Clipboard watcher stopping");
                    return Ok(());
                }
            }
        }
        SourceKind::Stdin => None,
    };

    // A missing source must not stop the app; typed selections keep working
    if let Some(e) = failure {
        tracing::error!("{:?} source unavailable: {}", source, e);
        tracing::warn!("Falling back to stdin selections only");
    }

    cancel.cancelled().await;
    tracing::info!("{:?} source stopping", source);
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Select(String),
    Save(CategoryRef),
    Set { field: String, value: String },
    Quit,
    Invalid(String),
}

pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let Some(command) = line.strip_prefix(':') else {
        return Some(Command::Select(line.to_string()));
    };

    let (name, rest) = command
        .split_once(char::is_whitespace)
        .map(|(name, rest)| (name, rest.trim()))
        .unwrap_or((command, ""));

    let command = match name {
        "save" | "s" => match CategoryRef::parse(rest) {
            Some(category) => Command::Save(category),
            None => Command::Invalid("usage: :save <number|part of speech>".to_string()),
        },
        "root" if !rest.is_empty() => Command::Set {
            field: "knowledge.root_node_name".to_string(),
            value: rest.to_string(),
        },
        "set" => match rest.split_once(char::is_whitespace) {
            Some((field, value)) => Command::Set {
                field: field.to_string(),
                value: value.trim().to_string(),
            },
            None => Command::Invalid("usage: :set <field> <value>".to_string()),
        },
        "quit" | "q" => Command::Quit,
        "root" => Command::Invalid("usage: :root <name>".to_string()),
        other => Command::Invalid(format!("unknown command :{other}")),
    };

    Some(command)
}

/// Reads commands and manual selections from stdin
pub async fn input_io(
    feed: SelectionFeed,
    cancel: CancellationToken,
    events_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    // Blocking stdin lives on its own thread so shutdown never waits for a newline
    let (line_tx, line_rx) = kanal::bounded::<String>(16);
    let line_rx = line_rx.to_async();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if line_tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to read stdin: {}", e);
                    break;
                }
            }
        }
    });

    loop {
        let line = tokio::select! {
            _ = cancel.cancelled() => break,
            line = line_rx.recv() => match line {
                Ok(line) => line,
                Err(_) => {
                    tracing::debug!("stdin closed");
                    break;
                }
            },
        };

        match parse_command(&line) {
            None => {}
            Some(Command::Select(text)) => feed.publish(Selection::text(text), TextSource::Manual),
            Some(Command::Save(category)) => {
                events_tx.send(AppEvent::SaveCategory(category)).await?;
            }
            Some(Command::Set { field, value }) => {
                events_tx.send(AppEvent::ConfigUpdate { field, value }).await?;
            }
            Some(Command::Quit) => {
                events_tx.send(AppEvent::Shutdown).await?;
                break;
            }
            Some(Command::Invalid(message)) => tracing::warn!("{}", message),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_lines_are_manual_selections() {
        assert_eq!(
            parse_command("  serendipity is nice "),
            Some(Command::Select("serendipity is nice".to_string()))
        );
        assert_eq!(parse_command("   "), None);
    }

    #[test]
    fn save_takes_index_or_part_of_speech() {
        assert_eq!(
            parse_command(":save 2"),
            Some(Command::Save(CategoryRef::Index(1)))
        );
        assert_eq!(
            parse_command(":s verb"),
            Some(Command::Save(CategoryRef::PartOfSpeech("verb".to_string())))
        );
        assert!(matches!(parse_command(":save"), Some(Command::Invalid(_))));
    }

    #[test]
    fn root_and_set_become_config_updates() {
        assert_eq!(
            parse_command(":root My Vocabulary"),
            Some(Command::Set {
                field: "knowledge.root_node_name".to_string(),
                value: "My Vocabulary".to_string(),
            })
        );
        assert_eq!(
            parse_command(":set ui.show_examples false"),
            Some(Command::Set {
                field: "ui.show_examples".to_string(),
                value: "false".to_string(),
            })
        );
        assert!(matches!(parse_command(":root"), Some(Command::Invalid(_))));
        assert!(matches!(parse_command(":set ui.show_examples"), Some(Command::Invalid(_))));
    }

    #[test]
    fn quit_and_unknown_commands() {
        assert_eq!(parse_command(":q"), Some(Command::Quit));
        assert_eq!(
            parse_command(":frobnicate"),
            Some(Command::Invalid("unknown command :frobnicate".to_string()))
        );
    }
}
