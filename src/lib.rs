pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::Cli;

pub use adapters::{MemoryNotifier, MemoryRecordStore, RestRecordStore, WebhookNotifier};
pub use self::config::AppConfig;
pub use self::core::{
    BookingPrefill, BookingService, Catalog, CatalogKind, CatalogView, ContactService, Dimension,
    FilterSchema, FilterState, FlightSearch, Responder, SortKey,
};
pub use utils::error::{Result, TravelError};
