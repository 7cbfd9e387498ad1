pub mod debounce;
pub mod grouping;
pub mod preprocess;
pub mod state;
pub mod token;

pub use debounce::{Debouncer, debounce};
pub use grouping::{definition_view, group, group_categories};
pub use preprocess::{DefaultConverter, RichTextConverter, selection_key};
pub use state::{LookupSlot, Resolution};
pub use token::extract;
