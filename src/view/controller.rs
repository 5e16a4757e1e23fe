//! Catalog view controller
//!
//! Owns the client-side copy of the catalog (the store), the subset shown
//! to the user and the notification queue. Every call runs to completion
//! before returning, so at most one service request is ever in flight.
//!
//! States:
//!
//! ```text
//! NotLoaded --mount--> Loading --ok--> Loaded --refilter/reset/mutate--> Loaded
//!                              \--err--> Error --refresh--> Loading
//! any --logout--> NotLoaded
//! ```

use super::error::{Result, ViewError};
use super::{Confirm, DeleteOutcome, LoadState, MountOutcome, ViewContext};
use crate::catalog::{Car, CarDraft, CarId};
use crate::notify::{NotificationId, NotificationQueue, Severity};
use crate::search::{CarFilterExt, CarSortExt, FilterCriteria, SortKey};
use crate::service::{CatalogService, ServiceError};
use crate::session::{Role, Session, Theme};
use tracing::{debug, warn};

/// State machine behind the listing screen
pub struct ViewController<S> {
    service: S,
    context: ViewContext,
    state: LoadState,
    store: Vec<Car>,
    displayed: Vec<Car>,
    criteria: FilterCriteria,
    sort_key: SortKey,
    notifications: NotificationQueue,
}

impl<S: CatalogService> ViewController<S> {
    /// Create an unloaded controller
    #[must_use]
    pub fn new(service: S, context: ViewContext) -> Self {
        Self {
            service,
            context,
            state: LoadState::NotLoaded,
            store: Vec::new(),
            displayed: Vec::new(),
            criteria: FilterCriteria::default(),
            sort_key: SortKey::None,
            notifications: NotificationQueue::new(),
        }
    }

    /// Replace the notification queue, e.g. to use a configured TTL
    #[must_use]
    pub fn with_notifications(mut self, notifications: NotificationQueue) -> Self {
        self.notifications = notifications;
        self
    }

    #[must_use]
    pub const fn state(&self) -> LoadState {
        self.state
    }

    /// Every listing fetched from the service, in service order
    #[must_use]
    pub fn store(&self) -> &[Car] {
        &self.store
    }

    /// Listings shown under the current criteria and sort key
    #[must_use]
    pub fn displayed(&self) -> &[Car] {
        &self.displayed
    }

    #[must_use]
    pub const fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    #[must_use]
    pub const fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        self.context.session.as_ref()
    }

    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.context.theme
    }

    #[must_use]
    pub const fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationQueue {
        &mut self.notifications
    }

    #[must_use]
    pub const fn service(&self) -> &S {
        &self.service
    }

    /// Look up a listing in the store
    #[must_use]
    pub fn find(&self, id: CarId) -> Option<&Car> {
        self.store.iter().find(|c| c.id == id)
    }

    /// Load the catalog if a session is present
    ///
    /// Without a session nothing changes and the caller should send the
    /// user to the login flow.
    pub fn mount(&mut self) -> MountOutcome {
        if self.context.session.is_none() {
            debug!("mount without session");
            return MountOutcome::NeedsLogin;
        }
        self.fetch()
    }

    /// Fetch the catalog again, e.g. to retry after a failed load
    ///
    /// A successful load clears the criteria and sort key and displays
    /// the full set.
    pub fn refresh(&mut self) -> MountOutcome {
        self.mount()
    }

    fn fetch(&mut self) -> MountOutcome {
        self.state = LoadState::Loading;
        match self.service.list() {
            Ok(cars) => {
                debug!(count = cars.len(), "catalog loaded");
                self.store = cars;
                self.state = LoadState::Loaded;
                self.criteria = FilterCriteria::default();
                self.sort_key = SortKey::None;
                self.displayed = self.store.clone();
                MountOutcome::Loaded(self.store.len())
            }
            Err(e) => {
                warn!(error = %e, "failed to load catalog");
                self.state = LoadState::Error;
                self.displayed.clear();
                self.notifications
                    .enqueue("Failed to load cars", Severity::Error);
                MountOutcome::Failed(e)
            }
        }
    }

    /// Filter and sort the store, returning the number of matches
    ///
    /// # Errors
    ///
    /// Returns `ViewError::NotLoaded` before a successful load.
    pub fn apply(&mut self, criteria: FilterCriteria, sort_key: SortKey) -> Result<usize> {
        self.require_loaded()?;
        self.criteria = criteria;
        self.sort_key = sort_key;
        self.recompute();

        let count = self.displayed.len();
        self.notifications
            .enqueue(format!("Found {count} cars"), Severity::Info);
        Ok(count)
    }

    /// Clear criteria and sorting so the full store is displayed
    ///
    /// # Errors
    ///
    /// Returns `ViewError::NotLoaded` before a successful load.
    pub fn reset(&mut self) -> Result<()> {
        self.require_loaded()?;
        self.criteria = FilterCriteria::default();
        self.sort_key = SortKey::None;
        self.displayed = self.store.clone();
        self.notifications.enqueue("Filters reset", Severity::Info);
        Ok(())
    }

    /// Create a listing (admin only)
    ///
    /// # Errors
    ///
    /// Returns `ViewError::RoleRequired` for non-admins, `ViewError::Invalid`
    /// for a rejected draft, `ViewError::Service` if the call fails.
    pub fn create(&mut self, draft: &CarDraft) -> Result<Car> {
        self.require_role(Role::Admin)?;
        self.require_loaded()?;
        self.validate(draft)?;

        match self.service.create(draft) {
            Ok(car) => {
                debug!(id = %car.id, "car created");
                self.store.push(car.clone());
                self.recompute();
                self.notifications
                    .enqueue("Car added successfully", Severity::Success);
                Ok(car)
            }
            Err(e) => Err(self.report_failure("Failed to add car", e)),
        }
    }

    /// Update a listing in place (admin only)
    ///
    /// # Errors
    ///
    /// Same as [`create`](Self::create).
    pub fn edit(&mut self, id: CarId, draft: &CarDraft) -> Result<Car> {
        self.require_role(Role::Admin)?;
        self.require_loaded()?;
        self.validate(draft)?;

        match self.service.update(id, draft) {
            Ok(car) => {
                debug!(%id, "car updated");
                match self.store.iter().position(|c| c.id == id) {
                    Some(index) => self.store[index] = car.clone(),
                    None => self.store.push(car.clone()),
                }
                self.recompute();
                self.notifications
                    .enqueue("Car updated successfully", Severity::Success);
                Ok(car)
            }
            Err(e) => Err(self.report_failure("Failed to update car", e)),
        }
    }

    /// Delete a listing after confirmation (admin only)
    ///
    /// # Errors
    ///
    /// Returns `ViewError::RoleRequired` for non-admins, `ViewError::Service`
    /// if the call fails (the store is left untouched).
    pub fn delete(&mut self, id: CarId, confirm: &impl Confirm) -> Result<DeleteOutcome> {
        self.require_role(Role::Admin)?;
        self.require_loaded()?;

        if !confirm.confirm(&self.delete_prompt(id)) {
            return Ok(DeleteOutcome::Cancelled);
        }

        match self.service.delete(id) {
            Ok(()) => {
                debug!(%id, "car deleted");
                self.store.retain(|c| c.id != id);
                self.displayed.retain(|c| c.id != id);
                self.notifications
                    .enqueue("Car deleted successfully", Severity::Success);
                Ok(DeleteOutcome::Deleted(id))
            }
            Err(e) => Err(self.report_failure("Failed to delete car", e)),
        }
    }

    /// Question asked before deleting `id`
    #[must_use]
    pub fn delete_prompt(&self, id: CarId) -> String {
        match self.find(id) {
            Some(car) => format!("Are you sure you want to delete {}?", car.title()),
            None => "Are you sure you want to delete this car?".to_string(),
        }
    }

    /// Purchase placeholder (customer only); nothing is bought
    ///
    /// # Errors
    ///
    /// Returns `ViewError::RoleRequired` for non-customers.
    pub fn purchase(&mut self, id: CarId) -> Result<()> {
        self.require_role(Role::Customer)?;
        debug!(%id, "purchase requested");
        self.notifications
            .enqueue("Purchasing is not available yet", Severity::Info);
        Ok(())
    }

    /// End the session, dropping the store and all notifications
    pub fn logout(&mut self) -> Option<Session> {
        let session = self.context.session.take();
        self.state = LoadState::NotLoaded;
        self.store.clear();
        self.displayed.clear();
        self.criteria = FilterCriteria::default();
        self.sort_key = SortKey::None;
        self.notifications.clear();
        session
    }

    /// Switch between light and dark; the caller persists the result
    pub fn toggle_theme(&mut self) -> Theme {
        let theme = self.context.theme.toggle();
        self.context.theme = theme;
        let message = match theme {
            Theme::Dark => "Dark theme",
            Theme::Light => "Light theme",
        };
        self.notifications.enqueue(message, Severity::Info);
        theme
    }

    /// Remove a notification before it expires
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        self.notifications.dismiss(id)
    }

    fn recompute(&mut self) {
        self.displayed = self
            .store
            .iter()
            .cloned()
            .filter_criteria(&self.criteria)
            .sorted_by(self.sort_key);
    }

    fn require_role(&self, role: Role) -> Result<()> {
        match &self.context.session {
            Some(session) if session.role == role => Ok(()),
            Some(_) => Err(ViewError::RoleRequired(role)),
            None => Err(ViewError::NotAuthenticated),
        }
    }

    const fn require_loaded(&self) -> Result<()> {
        match self.state {
            LoadState::Loaded => Ok(()),
            _ => Err(ViewError::NotLoaded),
        }
    }

    fn validate(&mut self, draft: &CarDraft) -> Result<()> {
        draft.validate().map_err(|e| {
            self.notifications.enqueue(e.to_string(), Severity::Error);
            ViewError::Invalid(e.to_string())
        })
    }

    fn report_failure(&mut self, message: &str, err: ServiceError) -> ViewError {
        warn!(error = %err, "{message}");
        self.notifications.enqueue(message, Severity::Error);
        ViewError::Service(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CarStatus;
    use crate::service::{FailureMode, MockCatalog};
    use crate::testing::{brands, sample_cars, toyota_and_bmw};

    fn admin() -> ViewContext {
        ViewContext::new(Session::new("admin", Role::Admin))
    }

    fn customer() -> ViewContext {
        ViewContext::new(Session::new("buyer", Role::Customer))
    }

    fn loaded(mock: &MockCatalog, context: ViewContext) -> ViewController<&MockCatalog> {
        let mut view = ViewController::new(mock, context);
        assert!(matches!(view.mount(), MountOutcome::Loaded(_)));
        view
    }

    fn last_message(view: &ViewController<&MockCatalog>) -> (Severity, String) {
        let latest = view.notifications().latest().unwrap();
        (latest.severity, latest.message.clone())
    }

    #[test]
    fn test_mount_without_session_needs_login() {
        let mock = MockCatalog::with_cars(toyota_and_bmw());
        let mut view = ViewController::new(&mock, ViewContext::anonymous());

        assert!(matches!(view.mount(), MountOutcome::NeedsLogin));
        assert_eq!(view.state(), LoadState::NotLoaded);
        assert_eq!(mock.calls(), 0);
    }

    #[test]
    fn test_mount_loads_full_set() {
        let mock = MockCatalog::with_cars(sample_cars());
        let view = loaded(&mock, customer());

        assert_eq!(view.state(), LoadState::Loaded);
        assert_eq!(view.store().len(), 10);
        assert_eq!(view.displayed(), view.store());
    }

    #[test]
    fn test_failed_fetch_shows_error() {
        let mock = MockCatalog::failing(FailureMode::Offline);
        let mut view = ViewController::new(&mock, customer());

        assert!(matches!(
            view.mount(),
            MountOutcome::Failed(ServiceError::Network(_))
        ));
        assert_eq!(view.state(), LoadState::Error);
        assert!(view.displayed().is_empty());
        assert_eq!(last_message(&view).0, Severity::Error);

        // Manual retry once the service is back
        mock.set_mode(FailureMode::None);
        assert!(matches!(view.refresh(), MountOutcome::Loaded(0)));
        assert_eq!(view.state(), LoadState::Loaded);
    }

    #[test]
    fn test_refresh_displays_full_set() {
        let mock = MockCatalog::with_cars(toyota_and_bmw());
        let mut view = loaded(&mock, customer());
        view.apply(
            FilterCriteria::new().with_brand("toy"),
            SortKey::PriceDescending,
        )
        .unwrap();
        assert_eq!(view.displayed().len(), 1);

        assert!(matches!(view.refresh(), MountOutcome::Loaded(2)));

        assert_eq!(view.state(), LoadState::Loaded);
        assert_eq!(view.displayed(), view.store());
        assert!(view.criteria().is_empty());
        assert_eq!(view.sort_key(), SortKey::None);
    }

    #[test]
    fn test_apply_filters_then_sorts() {
        let mock = MockCatalog::with_cars(sample_cars());
        let mut view = loaded(&mock, customer());

        let criteria = FilterCriteria::new()
            .with_max_price(3_000_000.0)
            .with_status(CarStatus::Available);
        let count = view.apply(criteria, SortKey::PriceAscending).unwrap();

        assert_eq!(count, view.displayed().len());
        assert_eq!(
            brands(view.displayed()),
            vec!["Kia", "Hyundai", "Volkswagen", "Nissan", "Toyota", "Honda"]
        );
        assert_eq!(
            last_message(&view),
            (Severity::Info, format!("Found {count} cars"))
        );
    }

    #[test]
    fn test_reset_restores_full_store() {
        let mock = MockCatalog::with_cars(sample_cars());
        let mut view = loaded(&mock, customer());

        view.apply(FilterCriteria::new().with_brand("bmw"), SortKey::YearDescending)
            .unwrap();
        view.reset().unwrap();

        assert_eq!(view.displayed(), view.store());
        assert!(view.criteria().is_empty());
        assert_eq!(view.sort_key(), SortKey::None);
        assert_eq!(last_message(&view).1, "Filters reset");
    }

    #[test]
    fn test_apply_before_load_is_rejected() {
        let mock = MockCatalog::new();
        let mut view = ViewController::new(&mock, customer());
        assert_eq!(
            view.apply(FilterCriteria::new(), SortKey::None),
            Err(ViewError::NotLoaded)
        );
    }

    #[test]
    fn test_create_respects_current_filter() {
        let mock = MockCatalog::with_cars(toyota_and_bmw());
        let mut view = loaded(&mock, admin());
        view.apply(FilterCriteria::new().with_brand("toy"), SortKey::None)
            .unwrap();

        let car = view.create(&CarDraft::new()).unwrap();

        assert_eq!(car.brand, "Unknown");
        assert!((car.price).abs() < f64::EPSILON);
        assert_eq!(car.status, CarStatus::Available);
        assert_eq!(view.store().len(), 3);
        assert_eq!(brands(view.displayed()), vec!["Toyota"]);
        assert_eq!(last_message(&view).0, Severity::Success);
    }

    #[test]
    fn test_customer_cannot_mutate() {
        let mock = MockCatalog::with_cars(toyota_and_bmw());
        let mut view = loaded(&mock, customer());
        let calls = mock.calls();

        assert_eq!(
            view.create(&CarDraft::new()),
            Err(ViewError::RoleRequired(Role::Admin))
        );
        assert_eq!(
            view.edit(CarId(1), &CarDraft::new()),
            Err(ViewError::RoleRequired(Role::Admin))
        );
        assert_eq!(
            view.delete(CarId(1), &|_: &str| true),
            Err(ViewError::RoleRequired(Role::Admin))
        );
        assert_eq!(mock.calls(), calls);
        assert_eq!(view.store().len(), 2);
    }

    #[test]
    fn test_invalid_draft_never_reaches_service() {
        let mock = MockCatalog::with_cars(toyota_and_bmw());
        let mut view = loaded(&mock, admin());
        let calls = mock.calls();

        let draft = CarDraft {
            price: Some(-100.0),
            ..CarDraft::default()
        };
        assert!(matches!(view.create(&draft), Err(ViewError::Invalid(_))));
        assert_eq!(mock.calls(), calls);
        assert_eq!(last_message(&view).0, Severity::Error);
    }

    #[test]
    fn test_edit_replaces_in_place() {
        let mock = MockCatalog::with_cars(toyota_and_bmw());
        let mut view = loaded(&mock, admin());

        let draft = CarDraft {
            price: Some(1.0),
            ..CarDraft::default()
        };
        view.edit(CarId(1), &draft).unwrap();

        assert_eq!(brands(view.store()), vec!["Toyota", "BMW"]);
        assert!((view.store()[0].price - 1.0).abs() < f64::EPSILON);
        assert_eq!(view.store()[0].id, CarId(1));
    }

    #[test]
    fn test_failed_edit_keeps_state() {
        let mock = MockCatalog::with_cars(toyota_and_bmw());
        let mut view = loaded(&mock, admin());
        let before = view.store().to_vec();

        mock.set_mode(FailureMode::ServerError);
        let draft = CarDraft {
            brand: Some("Lada".into()),
            ..CarDraft::default()
        };
        assert!(matches!(
            view.edit(CarId(2), &draft),
            Err(ViewError::Service(_))
        ));
        assert_eq!(view.store(), before.as_slice());
        assert_eq!(
            last_message(&view),
            (Severity::Error, "Failed to update car".to_string())
        );
    }

    #[test]
    fn test_delete_confirmed() {
        let mock = MockCatalog::with_cars(toyota_and_bmw());
        let mut view = loaded(&mock, admin());

        let outcome = view.delete(CarId(2), &|prompt: &str| {
            assert!(prompt.contains("BMW"));
            true
        });

        assert_eq!(outcome, Ok(DeleteOutcome::Deleted(CarId(2))));
        assert_eq!(brands(view.store()), vec!["Toyota"]);
        assert_eq!(brands(view.displayed()), vec!["Toyota"]);
        assert_eq!(mock.cars().len(), 1);
    }

    #[test]
    fn test_delete_cancelled() {
        let mock = MockCatalog::with_cars(toyota_and_bmw());
        let mut view = loaded(&mock, admin());
        let calls = mock.calls();

        let outcome = view.delete(CarId(2), &|_: &str| false);

        assert_eq!(outcome, Ok(DeleteOutcome::Cancelled));
        assert_eq!(view.store().len(), 2);
        assert_eq!(mock.calls(), calls);
    }

    #[test]
    fn test_delete_unknown_id() {
        let mock = MockCatalog::with_cars(toyota_and_bmw());
        let mut view = loaded(&mock, admin());

        let outcome = view.delete(CarId(99), &|_: &str| true);

        assert_eq!(
            outcome,
            Err(ViewError::Service(ServiceError::NotFound(CarId(99))))
        );
        assert_eq!(view.store().len(), 2);
        assert_eq!(last_message(&view).0, Severity::Error);
    }

    #[test]
    fn test_purchase_is_customer_placeholder() {
        let mock = MockCatalog::with_cars(toyota_and_bmw());
        let mut view = loaded(&mock, customer());
        let calls = mock.calls();

        view.purchase(CarId(1)).unwrap();
        assert_eq!(mock.calls(), calls);
        assert_eq!(last_message(&view).0, Severity::Info);

        let mut admin_view = loaded(&mock, admin());
        assert_eq!(
            admin_view.purchase(CarId(1)),
            Err(ViewError::RoleRequired(Role::Customer))
        );
    }

    #[test]
    fn test_logout_drops_everything() {
        let mock = MockCatalog::with_cars(toyota_and_bmw());
        let mut view = loaded(&mock, admin());
        view.apply(FilterCriteria::new().with_brand("b"), SortKey::None)
            .unwrap();

        let session = view.logout().unwrap();

        assert_eq!(session.username, "admin");
        assert_eq!(view.state(), LoadState::NotLoaded);
        assert!(view.store().is_empty());
        assert!(view.displayed().is_empty());
        assert!(view.notifications().is_empty());
        assert!(matches!(view.mount(), MountOutcome::NeedsLogin));
    }

    #[test]
    fn test_toggle_theme_and_dismiss() {
        let mock = MockCatalog::new();
        let mut view = ViewController::new(&mock, customer());

        assert_eq!(view.toggle_theme(), Theme::Dark);
        assert_eq!(view.theme(), Theme::Dark);

        let id = view.notifications().latest().unwrap().id;
        assert!(view.dismiss(id));
        assert!(!view.dismiss(id));
        assert_eq!(view.toggle_theme(), Theme::Light);
    }
}
