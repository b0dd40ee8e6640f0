//! Stateful services for the storefront.
//!
//! # Services
//!
//! - `cart` - Cart store (line items, totals, snapshot persistence)
//! - `auth` - Session store (mock sign-in, sign-up, sign-out)
//! - `notifications` - User-facing notification sink

pub mod auth;
pub mod cart;
pub mod notifications;

pub use auth::{AuthError, AuthSettings, SessionStore};
pub use cart::CartStore;
pub use notifications::{Notification, NotificationLog, Notifier, Severity, TracingNotifier};
