//! Notification queue
//!
//! Short-lived user-facing messages. Every notification gets a fresh
//! identifier from a monotonic counter and disappears on its own once its
//! time-to-live has elapsed, or earlier when dismissed.
//!
//! Expiry is computed from a monotonic [`Instant`]; the `*_at` variants take
//! the current instant explicitly so behaviour can be tested without sleeping.

use chrono::{DateTime, Utc};
use std::fmt;
use std::time::{Duration, Instant};

/// Default time a notification stays visible
pub const NOTIFICATION_TTL: Duration = Duration::from_millis(3000);

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Success,
    Error,
    Info,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unique notification identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NotificationId(u64);

impl NotificationId {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single queued message
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
    /// Wall-clock creation time, for display
    pub created_at: DateTime<Utc>,
    born: Instant,
}

impl Notification {
    /// Check if the notification has outlived `ttl` at `now`
    #[must_use]
    pub fn is_expired_at(&self, ttl: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.born) >= ttl
    }

    /// Time left before expiry
    #[must_use]
    pub fn remaining_at(&self, ttl: Duration, now: Instant) -> Duration {
        ttl.saturating_sub(now.saturating_duration_since(self.born))
    }
}

/// Ordered queue of live notifications
#[derive(Debug)]
pub struct NotificationQueue {
    items: Vec<Notification>,
    next_id: u64,
    ttl: Duration,
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationQueue {
    /// Create an empty queue with the default TTL
    #[must_use]
    pub const fn new() -> Self {
        Self::with_ttl(NOTIFICATION_TTL)
    }

    /// Create an empty queue with a custom TTL
    #[must_use]
    pub const fn with_ttl(ttl: Duration) -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
            ttl,
        }
    }

    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Queue a message and return its identifier
    pub fn enqueue(&mut self, message: impl Into<String>, severity: Severity) -> NotificationId {
        self.enqueue_at(message, severity, Instant::now())
    }

    /// Queue a message created at `now`
    pub fn enqueue_at(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        now: Instant,
    ) -> NotificationId {
        let id = NotificationId(self.next_id);
        self.next_id += 1;
        self.items.push(Notification {
            id,
            message: message.into(),
            severity,
            created_at: Utc::now(),
            born: now,
        });
        id
    }

    /// Remove a notification immediately
    ///
    /// Returns `false` if it was already gone; dismissing twice is harmless.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }

    /// Notifications currently visible, oldest first
    #[must_use]
    pub fn visible(&self) -> Vec<&Notification> {
        self.visible_at(Instant::now())
    }

    #[must_use]
    pub fn visible_at(&self, now: Instant) -> Vec<&Notification> {
        self.items
            .iter()
            .filter(|n| !n.is_expired_at(self.ttl, now))
            .collect()
    }

    /// Most recent visible notification
    #[must_use]
    pub fn latest(&self) -> Option<&Notification> {
        self.visible().pop()
    }

    /// Drop expired notifications, returning how many were removed
    pub fn prune(&mut self) -> usize {
        self.prune_at(Instant::now())
    }

    pub fn prune_at(&mut self, now: Instant) -> usize {
        let before = self.items.len();
        let ttl = self.ttl;
        self.items.retain(|n| !n.is_expired_at(ttl, now));
        before - self.items.len()
    }

    /// Drop everything
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Number of notifications held, expired or not
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages<'a>(visible: &[&'a Notification]) -> Vec<&'a str> {
        visible.iter().map(|n| n.message.as_str()).collect()
    }

    #[test]
    fn test_starts_empty() {
        let queue = NotificationQueue::new();
        assert!(queue.is_empty());
        assert!(queue.visible().is_empty());
        assert_eq!(queue.ttl(), Duration::from_millis(3000));
    }

    #[test]
    fn test_ids_unique_in_same_instant() {
        let mut queue = NotificationQueue::new();
        let now = Instant::now();

        let a = queue.enqueue_at("a", Severity::Info, now);
        let b = queue.enqueue_at("b", Severity::Info, now);
        let c = queue.enqueue_at("c", Severity::Error, now);

        assert_ne!(a, b);
        assert_ne!(b, c);
        assert!(a < b && b < c);
    }

    #[test]
    fn test_visible_in_insertion_order() {
        let mut queue = NotificationQueue::new();
        let now = Instant::now();
        queue.enqueue_at("first", Severity::Success, now);
        queue.enqueue_at("second", Severity::Error, now);

        assert_eq!(messages(&queue.visible_at(now)), vec!["first", "second"]);
    }

    #[test]
    fn test_expires_after_ttl() {
        let mut queue = NotificationQueue::new();
        let start = Instant::now();
        queue.enqueue_at("old", Severity::Info, start);
        queue.enqueue_at("new", Severity::Info, start + Duration::from_millis(2000));

        let just_before = start + Duration::from_millis(2999);
        assert_eq!(queue.visible_at(just_before).len(), 2);

        let at_ttl = start + Duration::from_millis(3000);
        assert_eq!(messages(&queue.visible_at(at_ttl)), vec!["new"]);

        assert_eq!(queue.prune_at(at_ttl), 1);
        assert_eq!(queue.len(), 1);

        let later = start + Duration::from_millis(5000);
        assert!(queue.visible_at(later).is_empty());
    }

    #[test]
    fn test_dismiss_is_idempotent() {
        let mut queue = NotificationQueue::new();
        let id = queue.enqueue("bye", Severity::Success);
        queue.enqueue("stay", Severity::Info);

        assert!(queue.dismiss(id));
        assert!(!queue.dismiss(id));
        assert_eq!(messages(&queue.visible()), vec!["stay"]);
    }

    #[test]
    fn test_custom_ttl_and_remaining() {
        let mut queue = NotificationQueue::with_ttl(Duration::from_millis(100));
        let now = Instant::now();
        queue.enqueue_at("short", Severity::Info, now);

        let item = queue.visible_at(now)[0];
        assert_eq!(
            item.remaining_at(queue.ttl(), now + Duration::from_millis(40)),
            Duration::from_millis(60)
        );
        assert!(queue.visible_at(now + Duration::from_millis(100)).is_empty());
    }

    #[test]
    fn test_clear() {
        let mut queue = NotificationQueue::new();
        queue.enqueue("x", Severity::Error);
        queue.clear();
        assert!(queue.is_empty());
        // Identifiers keep increasing after a clear
        let id = queue.enqueue("y", Severity::Info);
        assert_eq!(id.get(), 2);
    }
}
