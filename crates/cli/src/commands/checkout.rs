//! Checkout command.

use shopfront_storefront::checkout::CheckoutOutcome;
use shopfront_storefront::state::AppState;

use crate::output;

/// Check out the current cart.
///
/// Anonymous users are told to sign in; the redirect is printed by `main`.
pub fn run(state: &AppState) {
    match state.checkout() {
        CheckoutOutcome::LoginRequired => {
            output::print("Sign in with `shop login --redirect checkout` to continue");
        }
        CheckoutOutcome::EmptyCart => output::print("Your cart is empty"),
        CheckoutOutcome::Initiated(summary) => {
            output::print(&output::summary_block(&summary));
        }
    }
}
