//! Command implementations.
//!
//! Each command works on a shared [`AppState`](shopfront_storefront::state::AppState)
//! and prints its own output. Notifications are printed by `main` once the
//! command finishes.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod session;

use std::sync::Arc;

use shopfront_storefront::services::{Notification, NotificationLog, Notifier, TracingNotifier};

/// Records notifications for printing and also logs them.
#[derive(Debug)]
pub struct CliNotifier {
    log: Arc<NotificationLog>,
    tracing: TracingNotifier,
}

impl CliNotifier {
    pub const fn new(log: Arc<NotificationLog>) -> Self {
        Self {
            log,
            tracing: TracingNotifier,
        }
    }
}

impl Notifier for CliNotifier {
    fn notify(&self, notification: Notification) {
        self.tracing.notify(notification.clone());
        self.log.notify(notification);
    }
}
