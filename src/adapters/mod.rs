// Adapters layer: concrete implementations of the domain ports (backend REST, webhook, in-memory).

pub mod memory;
pub mod rest;
pub mod webhook;

pub use memory::{MemoryNotifier, MemoryRecordStore};
pub use rest::RestRecordStore;
pub use webhook::WebhookNotifier;
