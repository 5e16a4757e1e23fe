//! Catalog service abstraction
//!
//! [`CatalogService`] is the persistence contract used by the view and the
//! API server. Three implementations ship with the crate:
//!
//! - [`LocalCatalog`]: the embedded sled database
//! - [`HttpCatalog`]: a remote catalog reached over the JSON API
//! - [`MockCatalog`]: an in-memory catalog with switchable failures

pub mod error;
pub mod http;
pub mod local;
pub mod mock;

pub use error::{Result, ServiceError};
pub use http::HttpCatalog;
pub use local::LocalCatalog;
pub use mock::{FailureMode, MockCatalog};

use crate::catalog::{Car, CarDraft, CarId};
use std::sync::Arc;

/// CRUD interface to the listing collection
pub trait CatalogService {
    /// Fetch every listing in service order
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the service fails or cannot be reached.
    fn list(&self) -> Result<Vec<Car>>;

    /// Create a listing; absent draft fields receive the catalog defaults
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Invalid` for a rejected draft, or another
    /// variant if the call fails.
    fn create(&self, draft: &CarDraft) -> Result<Car>;

    /// Overwrite the fields present in `draft`
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if no listing has this identifier.
    fn update(&self, id: CarId, draft: &CarDraft) -> Result<Car>;

    /// Remove a listing
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if no listing has this identifier.
    fn delete(&self, id: CarId) -> Result<()>;
}

macro_rules! forward_service {
    ($($ty:ty),*) => {$(
        impl<T: CatalogService + ?Sized> CatalogService for $ty {
            fn list(&self) -> Result<Vec<Car>> {
                (**self).list()
            }

            fn create(&self, draft: &CarDraft) -> Result<Car> {
                (**self).create(draft)
            }

            fn update(&self, id: CarId, draft: &CarDraft) -> Result<Car> {
                (**self).update(id, draft)
            }

            fn delete(&self, id: CarId) -> Result<()> {
                (**self).delete(id)
            }
        }
    )*};
}

forward_service!(&T, Box<T>, Arc<T>);
