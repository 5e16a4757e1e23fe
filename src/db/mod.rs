//! Database wrapper module for the catalog
//!
//! Provides a clean API for storing and retrieving listings using sled as the
//! embedded database backend.
//!
//! Listings live in the `cars` tree, keyed by the big-endian identifier so
//! that iteration order equals creation order. Identifiers come from sled's
//! monotonic id generator and are never reused.

use crate::catalog::{Car, CarDraft, CarId};
use sled::{Db, Tree};
use std::path::Path;
use tracing::debug;

pub mod error;

pub use error::DbError;

/// Database wrapper that encapsulates all catalog storage operations
pub struct Database {
    db: Db,
    cars: Tree, // id -> Car
}

impl Database {
    /// Opens or creates a database at the specified path
    ///
    /// # Examples
    /// ```no_run
    /// use autodealer::db::Database;
    /// let db = Database::open("my_catalog").unwrap();
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the database or its tree cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DbError> {
        let db = sled::open(path)?;
        let cars = db.open_tree("cars")?;
        Ok(Self { db, cars })
    }

    /// List every listing in creation order
    ///
    /// # Errors
    ///
    /// Returns `DbError` if iteration or decoding fails.
    pub fn list_all(&self) -> Result<Vec<Car>, DbError> {
        let mut cars = Vec::with_capacity(self.cars.len());
        for result in &self.cars {
            let (_, value) = result?;
            cars.push(decode_car(&value)?);
        }
        Ok(cars)
    }

    /// Get a single listing
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the read or decoding fails.
    pub fn get(&self, id: CarId) -> Result<Option<Car>, DbError> {
        match self.cars.get(id_key(id))? {
            Some(value) => Ok(Some(decode_car(&value)?)),
            None => Ok(None),
        }
    }

    /// Create a listing from a draft, assigning a fresh identifier
    ///
    /// Missing draft fields receive the catalog defaults.
    ///
    /// # Errors
    ///
    /// Returns `DbError::InvalidInput` if the draft is invalid, or a storage
    /// error if the write fails.
    pub fn insert_draft(&self, draft: CarDraft) -> Result<Car, DbError> {
        draft.validate()?;
        let id = CarId(self.db.generate_id()? + 1);
        let car = draft.into_car(id)?;
        self.put(&car)?;
        debug!(id = %car.id, brand = %car.brand, "inserted car");
        Ok(car)
    }

    /// Apply a partial update to an existing listing
    ///
    /// # Errors
    ///
    /// Returns `DbError::NotFound` if no listing has this identifier,
    /// `DbError::InvalidInput` if the draft is invalid.
    pub fn update(&self, id: CarId, draft: &CarDraft) -> Result<Car, DbError> {
        let mut car = self.get(id)?.ok_or(DbError::NotFound(id))?;
        car.apply(draft)?;
        self.put(&car)?;
        debug!(id = %id, "updated car");
        Ok(car)
    }

    /// Remove a listing
    ///
    /// # Errors
    ///
    /// Returns `DbError::NotFound` if no listing has this identifier.
    pub fn remove(&self, id: CarId) -> Result<Car, DbError> {
        let value = self.cars.remove(id_key(id))?.ok_or(DbError::NotFound(id))?;
        debug!(id = %id, "removed car");
        decode_car(&value)
    }

    /// Check if a listing exists
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the lookup fails.
    pub fn contains(&self, id: CarId) -> Result<bool, DbError> {
        Ok(self.cars.contains_key(id_key(id))?)
    }

    /// Get the number of listings in the database
    #[must_use]
    pub fn count(&self) -> usize {
        self.cars.len()
    }

    /// Flush all pending writes to disk
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the flush operation fails.
    pub fn flush(&self) -> Result<(), DbError> {
        self.db.flush()?;
        Ok(())
    }

    /// Clear all listings from the database
    ///
    /// # Warning
    /// This operation is irreversible!
    ///
    /// # Errors
    ///
    /// Returns `DbError` if clearing the tree fails.
    pub fn clear(&self) -> Result<(), DbError> {
        self.cars.clear()?;
        Ok(())
    }

    fn put(&self, car: &Car) -> Result<(), DbError> {
        let value = bincode::encode_to_vec(car, bincode::config::standard())?;
        self.cars.insert(id_key(car.id), value)?;
        Ok(())
    }
}

impl Drop for Database {
    fn drop(&mut self) {
        // Errors cannot be propagated from Drop; callers needing durability
        // call flush() explicitly.
        let _ = self.db.flush();
    }
}

fn id_key(id: CarId) -> [u8; 8] {
    id.get().to_be_bytes()
}

fn decode_car(bytes: &[u8]) -> Result<Car, DbError> {
    let (car, _): (Car, usize) = bincode::decode_from_slice(bytes, bincode::config::standard())?;
    Ok(car)
}
