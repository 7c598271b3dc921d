pub mod booking;
pub mod catalog;
pub mod contact;
pub mod engine;
pub mod filter;
pub mod flights;
pub mod responder;

pub use crate::domain::ports::{BookingNotifier, RecordStore};
pub use crate::utils::error::Result;
pub use booking::{BookingPrefill, BookingService};
pub use catalog::{Catalog, CatalogKind};
pub use contact::ContactService;
pub use engine::{CatalogView, FilterState, SortKey};
pub use filter::{Dimension, FilterSchema};
pub use flights::{book_flight, FlightSearch};
pub use responder::Responder;
