pub mod clipboard;
pub mod feed;
pub mod ws;

pub use feed::SelectionFeed;
