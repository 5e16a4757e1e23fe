//! Catalog data model
//!
//! A listing (`Car`) is the only record type of the dealership. Listings are
//! created from a `CarDraft`, whose missing fields receive the catalog
//! defaults, and are later patched by drafts holding only the changed fields.

pub mod error;
pub mod seed;
pub mod types;

pub use error::CatalogError;
pub use seed::sample_stock;
pub use types::{Car, CarDraft, CarId, CarStatus, DEFAULT_YEAR, UNKNOWN};
