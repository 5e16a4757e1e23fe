//! Listing filtering used by the catalog view
//!
//! Filtering is a pure function of the full listing set and a
//! [`FilterCriteria`]. A listing passes when it satisfies every active
//! criterion; an empty criterion always passes. Output keeps input order.
//!
//! # Iterator Adapter
//!
//! [`CarFilterExt`] adds the same operation to any iterator of listings so it
//! can be chained with sorting:
//!
//! ```
//! use autodealer::catalog::Car;
//! use autodealer::search::{CarFilterExt, CarSortExt, FilterCriteria, SortKey};
//!
//! let criteria = FilterCriteria::new().with_brand("toy");
//! let shown = Vec::<Car>::new()
//!     .filter_criteria(&criteria)
//!     .sorted_by(SortKey::PriceAscending);
//! assert!(shown.is_empty());
//! ```

use crate::catalog::{Car, CarStatus, CatalogError};
use serde::{Deserialize, Serialize};

/// Criteria for narrowing the displayed listings
///
/// Serializable so that a catalog service could evaluate the same criteria
/// server-side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    /// Case-insensitive substring of the brand; empty = no constraint
    pub brand: String,
    /// Inclusive upper bound on price
    pub max_price: Option<f64>,
    /// Exact status
    pub status: Option<CarStatus>,
}

impl FilterCriteria {
    /// Criteria that match everything
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the brand substring
    #[must_use]
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    /// Set the maximum price
    #[must_use]
    pub const fn with_max_price(mut self, max_price: f64) -> Self {
        self.max_price = Some(max_price);
        self
    }

    /// Set the required status
    #[must_use]
    pub const fn with_status(mut self, status: CarStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// True if no criterion is active
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.brand.is_empty() && self.max_price.is_none() && self.status.is_none()
    }

    /// Check a single listing against every active criterion
    #[must_use]
    pub fn matches(&self, car: &Car) -> bool {
        self.matches_brand(car) && self.matches_price(car) && self.matches_status(car)
    }

    fn matches_brand(&self, car: &Car) -> bool {
        self.brand.is_empty() || car.brand.to_lowercase().contains(&self.brand.to_lowercase())
    }

    fn matches_price(&self, car: &Car) -> bool {
        self.max_price.is_none_or(|max| car.price <= max)
    }

    fn matches_status(&self, car: &Car) -> bool {
        self.status.is_none_or(|status| car.status == status)
    }

    /// Parse the text of a maximum-price input field
    ///
    /// Blank input means "no constraint".
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidField` if the text is not a
    /// non-negative number.
    pub fn parse_max_price(input: &str) -> Result<Option<f64>, CatalogError> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }

        match input.parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => Ok(Some(value)),
            _ => Err(CatalogError::InvalidField {
                field: "max price",
                reason: format!("'{input}' is not a non-negative number"),
            }),
        }
    }

    /// Parse the text of a status selector; blank means "any status"
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidStatus` for an unknown status.
    pub fn parse_status(input: &str) -> Result<Option<CarStatus>, CatalogError> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }
        input.parse().map(Some)
    }
}

/// Filter listings by criteria, preserving order
///
/// # Examples
///
/// ```
/// use autodealer::search::{filter_cars, FilterCriteria};
///
/// assert!(filter_cars(&[], &FilterCriteria::new()).is_empty());
/// ```
#[must_use]
pub fn filter_cars(cars: &[Car], criteria: &FilterCriteria) -> Vec<Car> {
    cars.iter().filter(|car| criteria.matches(car)).cloned().collect()
}

/// Extension trait for filtering iterators of listings
pub trait CarFilterExt: IntoIterator<Item = Car> + Sized {
    /// Keep the listings matching `criteria`, in order
    fn filter_criteria(self, criteria: &FilterCriteria) -> Vec<Car> {
        self.into_iter().filter(|car| criteria.matches(car)).collect()
    }
}

impl<I> CarFilterExt for I where I: IntoIterator<Item = Car> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{brands, car, sample_cars, toyota_and_bmw};

    #[test]
    fn test_brand_substring_is_case_insensitive() {
        let cars = toyota_and_bmw();
        let result = filter_cars(&cars, &FilterCriteria::new().with_brand("toy"));
        assert_eq!(brands(&result), vec!["Toyota"]);

        let result = filter_cars(&cars, &FilterCriteria::new().with_brand("bM"));
        assert_eq!(brands(&result), vec!["BMW"]);
    }

    #[test]
    fn test_max_price_is_inclusive() {
        let cars = toyota_and_bmw();
        let result = filter_cars(&cars, &FilterCriteria::new().with_max_price(2_500_000.0));
        assert_eq!(brands(&result), vec!["Toyota"]);

        let result = filter_cars(&cars, &FilterCriteria::new().with_max_price(2_499_999.0));
        assert!(result.is_empty());
    }

    #[test]
    fn test_status_exact_match() {
        let cars = sample_cars();
        let result = filter_cars(&cars, &FilterCriteria::new().with_status(CarStatus::Sold));
        assert_eq!(brands(&result), vec!["Audi"]);

        let result = filter_cars(&cars, &FilterCriteria::new().with_status(CarStatus::Reserved));
        assert_eq!(brands(&result), vec!["Mazda"]);
    }

    #[test]
    fn test_criteria_combine_with_and() {
        let cars = vec![
            car(1, "Toyota", 100.0, 2020, 0, CarStatus::Available),
            car(2, "Toyota", 300.0, 2020, 0, CarStatus::Available),
            car(3, "Toyota", 100.0, 2020, 0, CarStatus::Sold),
            car(4, "Honda", 100.0, 2020, 0, CarStatus::Available),
        ];
        let criteria = FilterCriteria::new()
            .with_brand("toyota")
            .with_max_price(200.0)
            .with_status(CarStatus::Available);

        let result = filter_cars(&cars, &criteria);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id.get(), 1);
    }

    #[test]
    fn test_empty_criteria_pass_everything_in_order() {
        let cars = sample_cars();
        let result = filter_cars(&cars, &FilterCriteria::new());
        assert_eq!(result, cars);
    }

    #[test]
    fn test_result_is_exact_partition() {
        let cars = sample_cars();
        let criteria = FilterCriteria::new().with_brand("a").with_max_price(3_000_000.0);
        let result = filter_cars(&cars, &criteria);

        for car in &cars {
            assert_eq!(result.contains(car), criteria.matches(car), "{}", car.brand);
        }
        assert!(result.iter().all(|c| criteria.matches(c)));
    }

    #[test]
    fn test_filter_is_deterministic() {
        let cars = sample_cars();
        let criteria = FilterCriteria::new().with_status(CarStatus::Available);
        assert_eq!(filter_cars(&cars, &criteria), filter_cars(&cars, &criteria));
    }

    #[test]
    fn test_filter_ext_matches_function() {
        let cars = sample_cars();
        let criteria = FilterCriteria::new().with_brand("o");
        assert_eq!(cars.clone().filter_criteria(&criteria), filter_cars(&cars, &criteria));
    }

    #[test]
    fn test_parse_max_price() {
        assert_eq!(FilterCriteria::parse_max_price("").unwrap(), None);
        assert_eq!(FilterCriteria::parse_max_price("  ").unwrap(), None);
        assert_eq!(FilterCriteria::parse_max_price("3000000").unwrap(), Some(3_000_000.0));
        assert!(FilterCriteria::parse_max_price("cheap").is_err());
        assert!(FilterCriteria::parse_max_price("-1").is_err());
    }

    #[test]
    fn test_parse_status() {
        assert_eq!(FilterCriteria::parse_status("").unwrap(), None);
        assert_eq!(FilterCriteria::parse_status("sold").unwrap(), Some(CarStatus::Sold));
        assert!(FilterCriteria::parse_status("gone").is_err());
    }
}
