//! Cart commands.

use shopfront_core::ProductId;
use shopfront_storefront::error::AppError;
use shopfront_storefront::state::AppState;

use crate::output;

/// Show cart lines and totals.
pub fn show(state: &AppState) {
    let cart = state.cart();
    let summary = cart.summary(state.config().tax_rate);
    output::print(&output::cart(&cart.items(), &summary));
}

/// Add a catalog product.
///
/// # Errors
///
/// Returns an error for an unknown or out-of-stock product, or a zero
/// quantity.
pub fn add(state: &AppState, id: &str, quantity: u32) -> Result<(), AppError> {
    let line = state.add_to_cart(&ProductId::new(id), quantity)?;
    output::print(&format!(
        "{} x {} in cart",
        line.quantity, line.product.name
    ));
    Ok(())
}

/// Remove a product's line. Removing a product not in the cart does nothing.
pub fn remove(state: &AppState, id: &str) {
    if state.cart().remove_item(&ProductId::new(id)).is_none() {
        output::print(&format!("Product {id} is not in the cart"));
    }
}

/// Set a line's quantity. Values below 1 are ignored.
pub fn update(state: &AppState, id: &str, quantity: i64) {
    if state.cart().update_quantity(&ProductId::new(id), quantity) {
        output::print(&format!("Quantity set to {quantity}"));
    } else {
        output::print("Cart unchanged");
    }
}

/// Remove every line.
pub fn clear(state: &AppState) {
    state.cart().clear_cart();
}
