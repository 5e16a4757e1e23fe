//! Catalog service backed by the embedded database

use super::{CatalogService, Result};
use crate::catalog::{Car, CarDraft, CarId};
use crate::db::Database;
use std::path::Path;

/// Catalog stored in a local sled database
pub struct LocalCatalog {
    db: Database,
}

impl LocalCatalog {
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// Open the catalog database at `path`
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the database cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(Database::open(path)?))
    }

    /// Underlying database, for maintenance commands such as `seed`
    #[must_use]
    pub const fn database(&self) -> &Database {
        &self.db
    }
}

impl CatalogService for LocalCatalog {
    fn list(&self) -> Result<Vec<Car>> {
        Ok(self.db.list_all()?)
    }

    fn create(&self, draft: &CarDraft) -> Result<Car> {
        let car = self.db.insert_draft(draft.clone())?;
        self.db.flush()?;
        Ok(car)
    }

    fn update(&self, id: CarId, draft: &CarDraft) -> Result<Car> {
        let car = self.db.update(id, draft)?;
        self.db.flush()?;
        Ok(car)
    }

    fn delete(&self, id: CarId) -> Result<()> {
        self.db.remove(id)?;
        self.db.flush()?;
        Ok(())
    }
}
