//! Request routing for the catalog API
//!
//! | method | path             | success                    |
//! |--------|------------------|----------------------------|
//! | GET    | `/api/cars`      | 200, array of listings     |
//! | POST   | `/api/cars`      | 201, created listing       |
//! | GET    | `/api/cars/{id}` | 200, one listing           |
//! | PUT    | `/api/cars/{id}` | 200, updated listing       |
//! | DELETE | `/api/cars/{id}` | 200, `{"message":"Deleted"}` |
//!
//! Failures answer `{"error": "..."}` with 400, 404, 405 or 500.

use crate::catalog::{CarDraft, CarId};
use crate::service::{CatalogService, ServiceError};
use serde::Serialize;
use serde_json::{Value, json};

const COLLECTION: &str = "/api/cars";

/// Status and JSON body of an API answer
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    fn ok<T: Serialize>(status: u16, value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(body) => Self { status, body },
            Err(e) => Self::error(500, &e.to_string()),
        }
    }

    fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: json!({ "error": message }),
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

impl From<ServiceError> for ApiResponse {
    fn from(err: ServiceError) -> Self {
        let status = match err.status_code() {
            code @ (400 | 404) => code,
            _ => 500,
        };
        Self::error(status, &err.to_string())
    }
}

enum Route {
    Collection,
    Item(CarId),
}

fn route(path: &str) -> Option<Result<Route, ApiResponse>> {
    let path = path.split('?').next().unwrap_or(path).trim_end_matches('/');
    if path == COLLECTION {
        return Some(Ok(Route::Collection));
    }

    let raw = path.strip_prefix(COLLECTION)?.strip_prefix('/')?;
    if raw.contains('/') {
        return None;
    }
    Some(
        raw.parse::<CarId>()
            .map(Route::Item)
            .map_err(|e| ApiResponse::error(400, &e.to_string())),
    )
}

fn parse_draft(body: &str) -> Result<CarDraft, ApiResponse> {
    let draft: CarDraft = serde_json::from_str(if body.trim().is_empty() { "{}" } else { body })
        .map_err(|e| ApiResponse::error(400, &format!("Malformed body: {e}")))?;
    draft
        .validate()
        .map_err(|e| ApiResponse::error(400, &e.to_string()))?;
    Ok(draft)
}

/// Answer one request against `service`
pub fn handle<S: CatalogService + ?Sized>(
    service: &S,
    method: &str,
    path: &str,
    body: &str,
) -> ApiResponse {
    let route = match route(path) {
        Some(Ok(route)) => route,
        Some(Err(response)) => return response,
        None => return ApiResponse::error(404, &format!("No route for {path}")),
    };

    let result = match (route, method) {
        (Route::Collection, "GET") => service.list().map(|cars| ApiResponse::ok(200, &cars)),
        (Route::Collection, "POST") => match parse_draft(body) {
            Ok(draft) => service.create(&draft).map(|car| ApiResponse::ok(201, &car)),
            Err(response) => return response,
        },
        (Route::Item(id), "GET") => service.list().map(|cars| {
            cars.into_iter().find(|c| c.id == id).map_or_else(
                || ApiResponse::from(ServiceError::NotFound(id)),
                |car| ApiResponse::ok(200, &car),
            )
        }),
        (Route::Item(id), "PUT") => match parse_draft(body) {
            Ok(draft) => service
                .update(id, &draft)
                .map(|car| ApiResponse::ok(200, &car)),
            Err(response) => return response,
        },
        (Route::Item(id), "DELETE") => service
            .delete(id)
            .map(|()| ApiResponse::ok(200, &json!({ "message": "Deleted" }))),
        (_, method) => return ApiResponse::error(405, &format!("Method {method} not allowed")),
    };

    result.unwrap_or_else(ApiResponse::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::{FailureMode, MockCatalog};
    use crate::testing::toyota_and_bmw;

    #[test]
    fn test_list() {
        let mock = MockCatalog::with_cars(toyota_and_bmw());
        let response = handle(&mock, "GET", "/api/cars", "");
        assert_eq!(response.status, 200);
        assert_eq!(response.body.as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_create_fills_defaults() {
        let mock = MockCatalog::new();
        let response = handle(&mock, "POST", "/api/cars", "{}");
        assert_eq!(response.status, 201);
        assert_eq!(response.body["brand"], "Unknown");
        assert_eq!(response.body["year"], 2024);
        assert_eq!(response.body["color"], "Unknown");
        assert_eq!(response.body["status"], "available");
    }

    #[test]
    fn test_malformed_body_and_id() {
        let mock = MockCatalog::with_cars(toyota_and_bmw());
        assert_eq!(handle(&mock, "POST", "/api/cars", "{nope").status, 400);
        assert_eq!(handle(&mock, "PUT", "/api/cars/abc", "{}").status, 400);
        assert_eq!(
            handle(&mock, "PUT", "/api/cars/1", r#"{"price": -3}"#).status,
            400
        );
        assert_eq!(mock.calls(), 0);
    }

    #[test]
    fn test_update_and_delete() {
        let mock = MockCatalog::with_cars(toyota_and_bmw());

        let response = handle(&mock, "PUT", "/api/cars/2", r#"{"status":"sold"}"#);
        assert_eq!(response.status, 200);
        assert_eq!(response.body["status"], "sold");
        assert_eq!(response.body["brand"], "BMW");

        let response = handle(&mock, "DELETE", "/api/cars/2", "");
        assert_eq!(response.status, 200);
        assert_eq!(response.body["message"], "Deleted");
        assert_eq!(mock.cars().len(), 1);
    }

    #[test]
    fn test_not_found_cases() {
        let mock = MockCatalog::with_cars(toyota_and_bmw());
        assert_eq!(handle(&mock, "DELETE", "/api/cars/99", "").status, 404);
        assert_eq!(handle(&mock, "GET", "/api/cars/99", "").status, 404);
        assert_eq!(handle(&mock, "GET", "/api/trucks", "").status, 404);
        assert_eq!(handle(&mock, "GET", "/api/cars/1/extra", "").status, 404);
    }

    #[test]
    fn test_method_not_allowed() {
        let mock = MockCatalog::new();
        assert_eq!(handle(&mock, "PATCH", "/api/cars", "").status, 405);
        assert_eq!(handle(&mock, "POST", "/api/cars/1", "{}").status, 405);
    }

    #[test]
    fn test_storage_failure_is_500() {
        let mock = MockCatalog::failing(FailureMode::Offline);
        let response = handle(&mock, "GET", "/api/cars", "");
        assert_eq!(response.status, 500);
        assert!(response.body["error"].is_string());
    }

    #[test]
    fn test_query_string_and_trailing_slash_ignored() {
        let mock = MockCatalog::with_cars(toyota_and_bmw());
        assert_eq!(handle(&mock, "GET", "/api/cars/?page=1", "").status, 200);
    }
}
