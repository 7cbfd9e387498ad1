use std::fmt;

use crate::word::{DefinitionView, LookupKey, LookupTicket, WordRecord};

#[derive(Debug, Clone)]
pub enum AppEvent {
    ConfigUpdate {
        field: String,
        value: String,
    },
    /// Debounced key from the selection pipeline
    KeySettled(Option<LookupKey>),
    LookupResolved {
        ticket: LookupTicket,
        record: Option<WordRecord>,
    },
    ShowDefinitions(DefinitionView),
    ClearDefinitions,
    SaveCategory(CategoryRef),
    Notify(Notification),
    Shutdown,
}

/// Which grouped category the user asked to save
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryRef {
    Index(usize),
    PartOfSpeech(String),
}

impl CategoryRef {
    /// Parses user input: a 1-based index or a part of speech
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        match input.parse::<usize>() {
            Ok(0) => None,
            Ok(n) => Some(Self::Index(n - 1)),
            Err(_) => Some(Self::PartOfSpeech(input.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

/// Fire-and-forget toast message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSource {
    Clipboard,
    Websocket,
    Manual,
}

impl fmt::Display for TextSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TextSource::Clipboard => "Clipboard",
            TextSource::Websocket => "WebSocket",
            TextSource::Manual => "Manual",
        };
        f.write_str(name)
    }
}
