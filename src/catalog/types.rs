//! Catalog record types
//!
//! - `Car`: a complete listing as stored by the catalog service
//! - `CarDraft`: a partial listing used for create and update requests
//! - `CarStatus`: the sale state of a listing
//!
//! The JSON shape mirrors the dealership API: camelCase field names and
//! lowercase status strings.

use super::error::{CatalogError, Result};
use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Brand and model used when a draft leaves them out
pub const UNKNOWN: &str = "Unknown";

/// Model year used when a draft leaves it out
pub const DEFAULT_YEAR: i32 = 2024;

/// Identifier assigned by the catalog service
#[derive(
    Encode, Decode, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(transparent)]
pub struct CarId(pub u64);

impl CarId {
    /// Raw numeric value
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CarId {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|e| CatalogError::InvalidField {
                field: "id",
                reason: format!("'{s}' is not a valid identifier ({e})"),
            })
    }
}

/// Sale state of a listing
#[derive(Encode, Decode, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum CarStatus {
    /// On the lot and for sale
    #[default]
    Available,
    /// Sold to a customer
    Sold,
    /// Held for a customer
    Reserved,
}

impl CarStatus {
    /// All statuses in display order
    pub const ALL: [Self; 3] = [Self::Available, Self::Sold, Self::Reserved];

    /// Wire name of the status
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Sold => "sold",
            Self::Reserved => "reserved",
        }
    }
}

impl fmt::Display for CarStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CarStatus {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "available" => Ok(Self::Available),
            "sold" => Ok(Self::Sold),
            "reserved" => Ok(Self::Reserved),
            _ => Err(CatalogError::InvalidStatus(s.to_string())),
        }
    }
}

/// A vehicle listing
#[derive(Encode, Decode, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub id: CarId,
    pub brand: String,
    pub model: String,
    pub year: i32,
    /// Asking price, currency-agnostic, never negative
    pub price: f64,
    pub mileage: u64,
    #[serde(default)]
    pub color: Option<String>,
    pub status: CarStatus,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Car {
    /// "Brand Model" label used in lists and prompts
    #[must_use]
    pub fn title(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }

    /// Overwrite the fields present in `draft`, keeping the identifier
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the draft violates a record invariant.
    pub fn apply(&mut self, draft: &CarDraft) -> Result<()> {
        draft.validate()?;

        if let Some(brand) = &draft.brand {
            self.brand.clone_from(brand);
        }
        if let Some(model) = &draft.model {
            self.model.clone_from(model);
        }
        if let Some(year) = draft.year {
            self.year = year;
        }
        if let Some(price) = draft.price {
            self.price = price;
        }
        if let Some(mileage) = draft.mileage {
            self.mileage = mileage;
        }
        if let Some(color) = &draft.color {
            self.color = Some(color.clone());
        }
        if let Some(status) = draft.status {
            self.status = status;
        }
        if let Some(description) = &draft.description {
            self.description = Some(description.clone());
        }
        if let Some(image_url) = &draft.image_url {
            self.image_url = Some(image_url.clone());
        }
        Ok(())
    }
}

/// A partial listing: every field is optional
///
/// Used as the body of create and update requests. On create the missing
/// fields receive the catalog defaults; on update only present fields change.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CarDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mileage: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CarStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl CarDraft {
    /// Create an empty draft
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True if no field is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Check the record invariants that types alone do not enforce
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidField` for a negative or non-finite price.
    pub fn validate(&self) -> Result<()> {
        if let Some(price) = self.price
            && (!price.is_finite() || price < 0.0)
        {
            return Err(CatalogError::InvalidField {
                field: "price",
                reason: format!("{price} must be a non-negative number"),
            });
        }
        Ok(())
    }

    /// Build a new listing from this draft, filling in defaults
    ///
    /// Empty text and zero numbers count as missing, so `brand: ""` becomes
    /// `"Unknown"` and `year: 0` becomes 2024.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the draft violates a record invariant.
    pub fn into_car(self, id: CarId) -> Result<Car> {
        self.validate()?;

        Ok(Car {
            id,
            brand: non_empty(self.brand).unwrap_or_else(|| UNKNOWN.to_string()),
            model: non_empty(self.model).unwrap_or_else(|| UNKNOWN.to_string()),
            year: self.year.filter(|y| *y != 0).unwrap_or(DEFAULT_YEAR),
            price: self.price.unwrap_or(0.0),
            mileage: self.mileage.unwrap_or(0),
            color: Some(non_empty(self.color).unwrap_or_else(|| UNKNOWN.to_string())),
            status: self.status.unwrap_or_default(),
            description: Some(self.description.unwrap_or_default()),
            image_url: non_empty(self.image_url),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
