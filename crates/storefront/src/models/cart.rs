//! Cart domain types.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shopfront_core::{ProductId, round_cents};

use super::product::{Product, ProductError};

/// A product snapshot paired with a quantity.
///
/// Persists flattened: the product's fields plus `quantity` in one object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u64,
}

impl CartLine {
    /// The product ID this line belongs to.
    #[must_use]
    pub const fn product_id(&self) -> &ProductId {
        &self.product.id
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * self.quantity
    }
}

/// Reasons a set of cart lines cannot be accepted as a cart.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CartLinesError {
    /// A line carries a zero quantity.
    #[error("line for product {0} has zero quantity")]
    ZeroQuantity(ProductId),

    /// Two lines share a product ID.
    #[error("product {0} appears in more than one line")]
    DuplicateProduct(ProductId),

    /// A line's product snapshot is invalid.
    #[error(transparent)]
    InvalidProduct(#[from] ProductError),
}

/// Check cart invariants over a sequence of lines.
///
/// # Errors
///
/// Returns the first line that breaks quantity, uniqueness or product rules.
pub fn validate_lines(lines: &[CartLine]) -> Result<(), CartLinesError> {
    let mut seen = HashSet::with_capacity(lines.len());
    for line in lines {
        if line.quantity == 0 {
            return Err(CartLinesError::ZeroQuantity(line.product.id.clone()));
        }
        if !seen.insert(&line.product.id) {
            return Err(CartLinesError::DuplicateProduct(line.product.id.clone()));
        }
        line.product.validate()?;
    }
    Ok(())
}

/// Totals shown on the cart page and at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderSummary {
    /// Number of units across all lines.
    pub item_count: u64,
    pub subtotal: Decimal,
    /// Shipping is free in the demo store.
    pub shipping: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl OrderSummary {
    /// Compute a summary from a subtotal and a flat tax rate.
    #[must_use]
    pub fn new(item_count: u64, subtotal: Decimal, tax_rate: Decimal) -> Self {
        let shipping = Decimal::ZERO;
        let tax = round_cents(subtotal * tax_rate);
        Self {
            item_count,
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
        }
    }
}
