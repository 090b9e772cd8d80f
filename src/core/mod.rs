//! Core record types and the record store

pub mod record;
pub mod store;

pub use record::{Category, JobRecord};
pub use store::{Catalog, RecordStore};
