pub mod selection;
pub mod types;
pub mod word;

pub use selection::{InlineElement, RichText, RichTextElement, Selection};
pub use types::{AppEvent, CategoryRef, Notification, NotificationLevel, TextSource};
pub use word::{
    Definition, DefinitionView, GroupedCategory, LookupKey, LookupTicket, Meaning, Phonetic,
    WordRecord,
};
