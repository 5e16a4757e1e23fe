//! Listing ordering
//!
//! Every key except `None` is a stable total order on one field: listings
//! with equal values keep their relative input order. Sorting never mutates
//! its input.

use crate::catalog::{Car, CatalogError};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Order applied to the displayed listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Keep input order
    #[default]
    None,
    /// Cheapest first
    PriceAscending,
    /// Most expensive first
    PriceDescending,
    /// Newest model year first
    YearDescending,
    /// Lowest mileage first
    MileageAscending,
}

impl SortKey {
    /// All keys in the order the UI cycles through them
    pub const ALL: [Self; 5] = [
        Self::None,
        Self::PriceAscending,
        Self::PriceDescending,
        Self::YearDescending,
        Self::MileageAscending,
    ];

    /// Canonical name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::PriceAscending => "price-ascending",
            Self::PriceDescending => "price-descending",
            Self::YearDescending => "year-descending",
            Self::MileageAscending => "mileage-ascending",
        }
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "No sorting",
            Self::PriceAscending => "Price: low to high",
            Self::PriceDescending => "Price: high to low",
            Self::YearDescending => "Year: newest",
            Self::MileageAscending => "Mileage: lowest",
        }
    }

    /// The key after this one, wrapping around
    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    fn compare(self, a: &Car, b: &Car) -> Ordering {
        match self {
            Self::None => Ordering::Equal,
            Self::PriceAscending => a.price.total_cmp(&b.price),
            Self::PriceDescending => b.price.total_cmp(&a.price),
            Self::YearDescending => b.year.cmp(&a.year),
            Self::MileageAscending => a.mileage.cmp(&b.mileage),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" => Ok(Self::None),
            "price-ascending" | "price-asc" => Ok(Self::PriceAscending),
            "price-descending" | "price-desc" => Ok(Self::PriceDescending),
            "year-descending" | "year-desc" => Ok(Self::YearDescending),
            "mileage-ascending" | "mileage-asc" => Ok(Self::MileageAscending),
            other => Err(CatalogError::InvalidField {
                field: "sort key",
                reason: format!(
                    "unknown key '{other}' (expected none, price-asc, price-desc, year-desc or mileage-asc)"
                ),
            }),
        }
    }
}

/// Return a new vector holding `cars` ordered by `key`
///
/// # Examples
///
/// ```
/// use autodealer::search::{sort_cars, SortKey};
///
/// assert!(sort_cars(&[], SortKey::YearDescending).is_empty());
/// ```
#[must_use]
pub fn sort_cars(cars: &[Car], key: SortKey) -> Vec<Car> {
    let mut sorted = cars.to_vec();
    if key != SortKey::None {
        // slice::sort_by is stable
        sorted.sort_by(|a, b| key.compare(a, b));
    }
    sorted
}

/// Extension trait for ordering iterators of listings
pub trait CarSortExt: IntoIterator<Item = Car> + Sized {
    /// Collect and order by `key`
    fn sorted_by(self, key: SortKey) -> Vec<Car> {
        let mut cars: Vec<Car> = self.into_iter().collect();
        if key != SortKey::None {
            cars.sort_by(|a, b| key.compare(a, b));
        }
        cars
    }
}

impl<I> CarSortExt for I where I: IntoIterator<Item = Car> {}
