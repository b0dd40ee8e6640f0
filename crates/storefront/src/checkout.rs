//! Checkout gate.
//!
//! Checkout requires a signed-in user. Anonymous users are sent to the
//! login page with a return intent so sign-in can bring them back. No order
//! is placed: a successful checkout only reports the summary.

use rust_decimal::Decimal;
use tracing::instrument;

use crate::error::add_breadcrumb;
use crate::models::OrderSummary;
use crate::navigation::{Navigator, ReturnTo, Route};
use crate::services::notifications::{Notification, Notifier};
use crate::services::{CartStore, SessionStore};

/// Result of [`begin_checkout`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Nobody is signed in; the user was sent to the login page.
    LoginRequired,
    /// The cart has no lines.
    EmptyCart,
    /// Checkout started for this order.
    Initiated(OrderSummary),
}

/// Start checkout for the current cart.
///
/// The cart is never modified.
#[instrument(skip_all, fields(authenticated = session.is_authenticated()))]
pub fn begin_checkout(
    cart: &CartStore,
    session: &SessionStore,
    notifier: &dyn Notifier,
    navigator: &dyn Navigator,
    tax_rate: Decimal,
) -> CheckoutOutcome {
    if !session.is_authenticated() {
        notifier.notify(Notification::destructive(
            "Login required",
            "Please login to continue with checkout",
        ));
        navigator.navigate(&Route::Login {
            redirect: Some(ReturnTo::Checkout),
        });
        tracing::info!("checkout requires login");
        return CheckoutOutcome::LoginRequired;
    }

    if cart.is_empty() {
        tracing::debug!("checkout with empty cart");
        return CheckoutOutcome::EmptyCart;
    }

    let summary = cart.summary(tax_rate);
    notifier.notify(Notification::info(
        "Checkout initiated",
        "This is a demo. No actual purchase will be made.",
    ));
    add_breadcrumb("checkout", "Checkout initiated", None);
    tracing::info!(
        items = summary.item_count,
        total = %summary.total,
        "checkout initiated"
    );
    CheckoutOutcome::Initiated(summary)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::models::product::tests::product;
    use crate::navigation::RecordingNavigator;
    use crate::services::auth::AuthSettings;
    use crate::services::notifications::{NotificationLog, Severity};
    use crate::storage::{MemoryStorage, Storage};

    struct Fixture {
        log: Arc<NotificationLog>,
        nav: RecordingNavigator,
        cart: CartStore,
        session: SessionStore,
    }

    fn fixture() -> Fixture {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let log = Arc::new(NotificationLog::new());
        let settings = AuthSettings {
            latency: Duration::ZERO,
            ..AuthSettings::default()
        };
        Fixture {
            cart: CartStore::new(Arc::clone(&storage), log.clone()),
            session: SessionStore::new(storage, log.clone(), settings),
            nav: RecordingNavigator::new(),
            log,
        }
    }

    fn tax() -> Decimal {
        Decimal::new(10, 2)
    }

    #[test]
    fn test_anonymous_is_sent_to_login() {
        let f = fixture();
        f.cart.add_item(&product("1", 1000), 2);
        let before = f.cart.items();

        let outcome = begin_checkout(&f.cart, &f.session, &*f.log, &f.nav, tax());

        assert_eq!(outcome, CheckoutOutcome::LoginRequired);
        assert_eq!(f.cart.items(), before);
        assert_eq!(f.nav.last().unwrap().path(), "/login?redirect=checkout");
        let last = f.log.last().unwrap();
        assert_eq!(last.title, "Login required");
        assert_eq!(last.severity, Severity::Destructive);
    }

    #[test]
    fn test_anonymous_with_empty_cart_still_needs_login() {
        let f = fixture();
        let outcome = begin_checkout(&f.cart, &f.session, &*f.log, &f.nav, tax());
        assert_eq!(outcome, CheckoutOutcome::LoginRequired);
    }

    #[tokio::test]
    async fn test_signed_in_with_items() {
        let f = fixture();
        f.session.login("user@example.com", "password").await.unwrap();
        f.cart.add_item(&product("1", 1000), 2);
        let before = f.cart.items();

        let outcome = begin_checkout(&f.cart, &f.session, &*f.log, &f.nav, tax());

        let CheckoutOutcome::Initiated(summary) = outcome else {
            panic!("expected checkout to start, got {outcome:?}");
        };
        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.subtotal, Decimal::new(2000, 2));
        assert_eq!(summary.tax, Decimal::new(200, 2));
        assert_eq!(summary.total, Decimal::new(2200, 2));
        assert_eq!(f.cart.items(), before);
        assert!(f.nav.routes().is_empty());
        assert_eq!(f.log.last().unwrap().title, "Checkout initiated");
    }

    #[tokio::test]
    async fn test_signed_in_with_empty_cart() {
        let f = fixture();
        f.session.login("user@example.com", "password").await.unwrap();
        let notified = f.log.entries().len();

        let outcome = begin_checkout(&f.cart, &f.session, &*f.log, &f.nav, tax());

        assert_eq!(outcome, CheckoutOutcome::EmptyCart);
        assert_eq!(f.log.entries().len(), notified);
    }
}
