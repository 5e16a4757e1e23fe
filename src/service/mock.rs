//! In-memory catalog service for testing

use super::{CatalogService, Result, ServiceError};
use crate::catalog::{Car, CarDraft, CarId};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// How the mock should fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureMode {
    /// Behave like a healthy service
    #[default]
    None,
    /// Every call fails as if the network were down
    Offline,
    /// Every call fails with a 500
    ServerError,
}

#[derive(Debug, Default)]
struct MockState {
    cars: Vec<Car>,
    next_id: u64,
    mode: FailureMode,
    calls: usize,
}

/// Mock catalog holding its listings in memory
///
/// Useful for testing without a database or a network. Identifiers are
/// assigned sequentially after the highest seeded one.
#[derive(Debug, Default)]
pub struct MockCatalog {
    state: Mutex<MockState>,
}

impl MockCatalog {
    /// Create an empty, healthy mock
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock pre-populated with `cars`
    #[must_use]
    pub fn with_cars(cars: Vec<Car>) -> Self {
        let next_id = cars.iter().map(|c| c.id.get()).max().unwrap_or(0);
        Self {
            state: Mutex::new(MockState {
                cars,
                next_id,
                ..MockState::default()
            }),
        }
    }

    /// Create a mock that fails every call the given way
    #[must_use]
    pub fn failing(mode: FailureMode) -> Self {
        let mock = Self::new();
        mock.set_mode(mode);
        mock
    }

    /// Switch the failure mode
    pub fn set_mode(&self, mode: FailureMode) {
        self.lock().mode = mode;
    }

    /// Snapshot of the stored listings
    #[must_use]
    pub fn cars(&self) -> Vec<Car> {
        self.lock().cars.clone()
    }

    /// Number of service calls received so far
    #[must_use]
    pub fn calls(&self) -> usize {
        self.lock().calls
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record a call and fail it if a failure mode is set
    fn begin(&self) -> Result<MutexGuard<'_, MockState>> {
        let mut state = self.lock();
        state.calls += 1;
        match state.mode {
            FailureMode::None => Ok(state),
            FailureMode::Offline => Err(ServiceError::Network("connection refused".into())),
            FailureMode::ServerError => Err(ServiceError::Server {
                status: 500,
                message: "internal error".into(),
            }),
        }
    }
}

impl CatalogService for MockCatalog {
    fn list(&self) -> Result<Vec<Car>> {
        Ok(self.begin()?.cars.clone())
    }

    fn create(&self, draft: &CarDraft) -> Result<Car> {
        let mut state = self.begin()?;
        state.next_id += 1;
        let car = draft.clone().into_car(CarId(state.next_id))?;
        state.cars.push(car.clone());
        Ok(car)
    }

    fn update(&self, id: CarId, draft: &CarDraft) -> Result<Car> {
        let mut state = self.begin()?;
        let car = state
            .cars
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(ServiceError::NotFound(id))?;
        car.apply(draft)?;
        Ok(car.clone())
    }

    fn delete(&self, id: CarId) -> Result<()> {
        let mut state = self.begin()?;
        let index = state
            .cars
            .iter()
            .position(|c| c.id == id)
            .ok_or(ServiceError::NotFound(id))?;
        state.cars.remove(index);
        Ok(())
    }
}
