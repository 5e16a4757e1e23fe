//! Testing utilities for autodealer
//!
//! This module provides helper types and functions for writing tests,
//! including a `TestDb` wrapper for temporary database management and
//! listing fixtures.
//!
//! Only available when compiled with `cfg(test)`.

use crate::catalog::{Car, CarDraft, CarId, CarStatus};
use crate::db::Database;
use std::path::Path;
use tempfile::TempDir;

/// Wrapper for a temporary test database that cleans up on drop
///
/// The database lives in its own temporary directory, so tests can run in
/// parallel without sharing state.
pub struct TestDb {
    // Field order matters: the database must drop before its directory.
    db: Database,
    dir: TempDir,
}

impl TestDb {
    /// Create a new, empty test database
    ///
    /// # Panics
    /// Panics if the temporary directory or the database cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db = Database::open(dir.path().join("catalog")).expect("Failed to open test database");
        Self { db, dir }
    }

    /// Get a reference to the underlying database
    #[must_use]
    pub const fn db(&self) -> &Database {
        &self.db
    }

    /// Get the directory holding the test database
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// Build a listing directly, bypassing any storage
#[must_use]
pub fn car(id: u64, brand: &str, price: f64, year: i32, mileage: u64, status: CarStatus) -> Car {
    CarDraft {
        brand: Some(brand.to_string()),
        model: Some(format!("{brand} model")),
        year: Some(year),
        price: Some(price),
        mileage: Some(mileage),
        status: Some(status),
        ..CarDraft::default()
    }
    .into_car(CarId(id))
    .expect("fixture draft is valid")
}

/// Toyota at 2 500 000 and BMW at 5 000 000, both available
#[must_use]
pub fn toyota_and_bmw() -> Vec<Car> {
    vec![
        car(1, "Toyota", 2_500_000.0, 2023, 15_000, CarStatus::Available),
        car(2, "BMW", 5_000_000.0, 2022, 25_000, CarStatus::Available),
    ]
}

/// The full sample stock with sequential identifiers
#[must_use]
pub fn sample_cars() -> Vec<Car> {
    crate::catalog::sample_stock()
        .into_iter()
        .zip(1..)
        .map(|(draft, id)| draft.into_car(CarId(id)).expect("sample stock is valid"))
        .collect()
}

/// Collect the brands of a listing slice, for compact assertions
#[must_use]
pub fn brands(cars: &[Car]) -> Vec<&str> {
    cars.iter().map(|c| c.brand.as_str()).collect()
}
