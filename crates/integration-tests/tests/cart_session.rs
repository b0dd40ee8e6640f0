//! Integration tests for the cart and session stores side by side.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;

use shopfront_core::ProductId;
use shopfront_integration_tests::TestContext;
use shopfront_storefront::error::AppError;
use shopfront_storefront::services::AuthError;

fn id(s: &str) -> ProductId {
    ProductId::new(s)
}

// =============================================================================
// Cart Tests
// =============================================================================

#[test]
fn test_repeated_adds_merge_into_one_line() {
    let ctx = TestContext::new().unwrap();
    ctx.state.add_to_cart(&id("1"), 2).unwrap();
    ctx.state.add_to_cart(&id("1"), 3).unwrap();

    let items = ctx.state.cart().items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].quantity, 5);
    assert_eq!(ctx.state.cart().total_items(), 5);
}

#[test]
fn test_totals_follow_every_mutation() {
    let ctx = TestContext::new().unwrap();
    let cart = ctx.state.cart();

    ctx.state.add_to_cart(&id("1"), 1).unwrap(); // 79.99
    ctx.state.add_to_cart(&id("5"), 2).unwrap(); // 2 x 24.99
    ctx.state.add_to_cart(&id("7"), 1).unwrap(); // 19.99
    assert_eq!(cart.total_items(), 4);
    assert_eq!(cart.total_price(), Decimal::new(14996, 2));

    assert!(cart.update_quantity(&id("5"), 1));
    assert_eq!(cart.total_price(), Decimal::new(12497, 2));

    assert!(cart.remove_item(&id("1")).is_some());
    assert_eq!(cart.total_items(), 2);
    assert_eq!(cart.total_price(), Decimal::new(4498, 2));

    cart.clear_cart();
    assert_eq!(cart.total_items(), 0);
    assert_eq!(cart.total_price(), Decimal::ZERO);
}

#[test]
fn test_invalid_updates_leave_cart_unchanged() {
    let ctx = TestContext::new().unwrap();
    ctx.state.add_to_cart(&id("2"), 2).unwrap();
    let before = ctx.state.cart().items();

    assert!(!ctx.state.cart().update_quantity(&id("2"), 0));
    assert!(!ctx.state.cart().update_quantity(&id("2"), -1));
    assert!(!ctx.state.cart().update_quantity(&id("999"), 3));
    assert!(ctx.state.cart().remove_item(&id("999")).is_none());

    assert_eq!(ctx.state.cart().items(), before);
}

#[test]
fn test_out_of_stock_product_is_refused() {
    let ctx = TestContext::new().unwrap();
    let err = ctx.state.add_to_cart(&id("8"), 1).unwrap_err();
    assert!(matches!(err, AppError::OutOfStock(_)));
    assert!(ctx.state.cart().is_empty());
}

#[test]
fn test_cart_notifications_in_order() {
    let ctx = TestContext::new().unwrap();
    ctx.state.add_to_cart(&id("3"), 1).unwrap();
    // Quantity changes are silent.
    ctx.state.cart().update_quantity(&id("3"), 4);
    ctx.state.cart().remove_item(&id("3"));
    ctx.state.cart().clear_cart();

    assert_eq!(
        ctx.notifications.titles(),
        vec!["Added to cart", "Removed from cart", "Cart cleared"]
    );
}

// =============================================================================
// Session Tests
// =============================================================================

#[tokio::test]
async fn test_login_logout_cycle() {
    let ctx = TestContext::new().unwrap();
    let session = ctx.state.session();
    assert!(!session.is_authenticated());

    let identity = session.login("user@example.com", "password").await.unwrap();
    assert_eq!(identity.id.as_str(), "1");
    assert_eq!(identity.name, "John Doe");
    assert!(session.is_authenticated());

    session.logout();
    assert!(!session.is_authenticated());
    session.logout();
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_failed_login_leaves_session_anonymous() {
    let ctx = TestContext::new().unwrap();
    let err = ctx
        .state
        .session()
        .login("user@example.com", "wrong")
        .await
        .unwrap_err();
    assert_eq!(err, AuthError::InvalidCredentials);
    assert!(ctx.state.session().current().is_none());
    assert_eq!(ctx.notifications.last().unwrap().title, "Login failed");
}

#[tokio::test]
async fn test_signup_ids_are_distinct() {
    let ctx = TestContext::new().unwrap();
    let session = ctx.state.session();

    assert_eq!(
        session.signup("", "a@b.com", "x").await.unwrap_err(),
        AuthError::MissingFields
    );

    let first = session.signup("Jane", "jane@x.com", "pw").await.unwrap();
    let second = session.signup("Jane", "jane@x.com", "pw").await.unwrap();
    assert_ne!(first.id, second.id);
    assert_ne!(first.id.as_str(), "1");
    assert_eq!(session.current().unwrap(), second);
}

#[tokio::test]
async fn test_cart_survives_login_and_logout() {
    let ctx = TestContext::new().unwrap();
    ctx.state.add_to_cart(&id("4"), 1).unwrap();

    ctx.state
        .session()
        .login("user@example.com", "password")
        .await
        .unwrap();
    ctx.state.session().logout();

    assert_eq!(ctx.state.cart().total_items(), 1);
}
