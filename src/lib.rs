//! jobsift - structured job records from scraped listing dumps
//!
//! The core is a two-part pipeline: a heuristic line parser that recovers
//! [`JobRecord`]s from a flattened page, and a retrieval pipeline that ranks
//! records by fuzzy similarity to a free-text query before narrowing them with
//! explicit salary / experience / location constraints.

pub mod app;
pub mod cli;
pub mod compose;
pub mod config;
pub mod core;
pub mod error;
pub mod fetch;
pub mod import;
pub mod search;
pub mod test_utils;

pub use crate::core::record::{Category, JobRecord};
pub use crate::core::store::{Catalog, RecordStore};
pub use error::{Result, SiftError};
