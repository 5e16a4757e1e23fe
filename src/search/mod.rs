//! Catalog search: filtering and sorting of listings
//!
//! Both halves are pure functions over slices of [`Car`](crate::catalog::Car):
//! the view applies the filter first, then the sort.

pub mod filter;
pub mod sort;

pub use filter::{CarFilterExt, FilterCriteria, filter_cars};
pub use sort::{CarSortExt, SortKey, sort_cars};
