mod client;
mod memory;
mod persist;
mod store;
mod template;

pub use client::StoreConnectClient;
pub use memory::InMemoryStore;
pub use persist::{PersistError, PersistReceipt, PersistStage, persist};
pub use store::{KnowledgeNode, KnowledgeStore, NodeId, PracticeDirection, StoreError};
pub use template::NodeTemplate;
