//! Catalog service reached over the JSON API
//!
//! Talks to an `autodealer serve` instance (or any server with the same
//! routes) using a blocking reqwest client.

use super::{CatalogService, Result, ServiceError};
use crate::catalog::{Car, CarDraft, CarId};
use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP client for a remote catalog
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: Client,
    base_url: String,
}

impl HttpCatalog {
    /// Create a client for the API rooted at `base_url`
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Network` if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/api/cars", self.base_url)
    }

    fn item_url(&self, id: CarId) -> String {
        format!("{}/api/cars/{id}", self.base_url)
    }
}

/// Turn a non-success response into a `ServiceError`
fn check(response: Response, id: Option<CarId>) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|b| b.error)
        .unwrap_or_else(|_| {
            if body.is_empty() {
                status.canonical_reason().unwrap_or("unknown error").to_string()
            } else {
                body
            }
        });

    match (status, id) {
        (StatusCode::NOT_FOUND, Some(id)) => Err(ServiceError::NotFound(id)),
        (StatusCode::BAD_REQUEST, _) => Err(ServiceError::Invalid(message)),
        _ => Err(ServiceError::Server {
            status: status.as_u16(),
            message,
        }),
    }
}

impl CatalogService for HttpCatalog {
    fn list(&self) -> Result<Vec<Car>> {
        let url = self.collection_url();
        debug!(%url, "GET");
        let response = check(self.client.get(&url).send()?, None)?;
        Ok(response.json()?)
    }

    fn create(&self, draft: &CarDraft) -> Result<Car> {
        let url = self.collection_url();
        debug!(%url, "POST");
        let response = check(self.client.post(&url).json(draft).send()?, None)?;
        Ok(response.json()?)
    }

    fn update(&self, id: CarId, draft: &CarDraft) -> Result<Car> {
        let url = self.item_url(id);
        debug!(%url, "PUT");
        let response = check(self.client.put(&url).json(draft).send()?, Some(id))?;
        Ok(response.json()?)
    }

    fn delete(&self, id: CarId) -> Result<()> {
        let url = self.item_url(id);
        debug!(%url, "DELETE");
        check(self.client.delete(&url).send()?, Some(id))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let catalog = HttpCatalog::new("http://localhost:3000/").unwrap();
        assert_eq!(catalog.base_url(), "http://localhost:3000");
        assert_eq!(catalog.collection_url(), "http://localhost:3000/api/cars");
        assert_eq!(catalog.item_url(CarId(9)), "http://localhost:3000/api/cars/9");
    }

    #[test]
    fn test_unreachable_server_is_network_error() {
        // Port 9 (discard) is essentially never served on loopback
        let catalog = HttpCatalog::new("http://127.0.0.1:9").unwrap();
        assert!(matches!(catalog.list(), Err(ServiceError::Network(_))));
    }
}
