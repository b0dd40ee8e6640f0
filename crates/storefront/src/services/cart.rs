//! Cart store.
//!
//! Holds the ordered cart lines and persists a snapshot after every
//! mutation. The in-memory lines are the source of truth; storage is only
//! read once, when the store is created.
//!
//! # Policies
//!
//! - Adding a product that already has a line increments that line.
//! - Quantities below 1 are ignored, both on add and on update.
//! - An add that would overflow a line's quantity is ignored.
//! - Removing or updating a product that has no line does nothing.
//! - A failed snapshot write is logged and otherwise ignored.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rust_decimal::Decimal;
use tracing::instrument;

use shopfront_core::ProductId;

use crate::error::add_breadcrumb;
use crate::models::cart::validate_lines;
use crate::models::session::keys;
use crate::models::{CartLine, OrderSummary, Product};
use crate::services::notifications::{Notification, Notifier};
use crate::storage::{self, Storage};

/// The shopping cart.
pub struct CartStore {
    lines: Mutex<Vec<CartLine>>,
    storage: Arc<dyn Storage>,
    notifier: Arc<dyn Notifier>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("lines", &*self.lock())
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Create the store, rehydrating any persisted cart.
    ///
    /// A missing record yields an empty cart. A corrupt record is removed
    /// and also yields an empty cart.
    pub fn new(storage: Arc<dyn Storage>, notifier: Arc<dyn Notifier>) -> Self {
        let lines = storage::load_or_discard(&*storage, keys::CART, |lines: &Vec<CartLine>| {
            validate_lines(lines)
        })
        .unwrap_or_default();

        tracing::debug!(lines = lines.len(), "cart rehydrated");

        Self {
            lines: Mutex::new(lines),
            storage,
            notifier,
        }
    }

    /// Add `quantity` units of `product`.
    ///
    /// Returns the line as it stands after the change, or `None` if nothing
    /// changed: `quantity` is zero or the line's quantity would overflow.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_item(&self, product: &Product, quantity: u32) -> Option<CartLine> {
        if quantity == 0 {
            tracing::debug!("ignoring add with zero quantity");
            return None;
        }
        let quantity = u64::from(quantity);

        let (line, existed) = {
            let mut lines = self.lock();
            let result = if let Some(line) = lines.iter_mut().find(|l| l.product.id == product.id)
            {
                let Some(total) = line.quantity.checked_add(quantity) else {
                    tracing::warn!(
                        current = line.quantity,
                        "ignoring add that would overflow line quantity"
                    );
                    return None;
                };
                line.quantity = total;
                (line.clone(), true)
            } else {
                let line = CartLine {
                    product: product.clone(),
                    quantity,
                };
                lines.push(line.clone());
                (line, false)
            };
            self.persist(&lines);
            result
        };

        if existed {
            self.notifier.notify(Notification::info(
                "Cart updated",
                format!("{} quantity updated in your cart", product.name),
            ));
        } else {
            self.notifier.notify(Notification::info(
                "Added to cart",
                format!("{} added to your cart", product.name),
            ));
        }
        add_breadcrumb(
            "cart",
            "Added item to cart",
            Some(&[("product_id", product.id.as_str())]),
        );
        tracing::info!(quantity = line.quantity, "cart line saved");

        Some(line)
    }

    /// Remove the line for `product_id`, returning it if it existed.
    #[instrument(skip(self))]
    pub fn remove_item(&self, product_id: &ProductId) -> Option<CartLine> {
        let removed = {
            let mut lines = self.lock();
            let index = lines.iter().position(|l| &l.product.id == product_id)?;
            let removed = lines.remove(index);
            self.persist(&lines);
            removed
        };

        self.notifier.notify(Notification::info(
            "Removed from cart",
            format!("{} removed from your cart", removed.product.name),
        ));
        add_breadcrumb(
            "cart",
            "Removed item from cart",
            Some(&[("product_id", product_id.as_str())]),
        );
        tracing::info!("cart line removed");

        Some(removed)
    }

    /// Set the quantity of an existing line.
    ///
    /// Quantities below 1 are ignored; use [`remove_item`](Self::remove_item)
    /// to drop a line. Returns whether the cart changed.
    #[instrument(skip(self))]
    pub fn update_quantity(&self, product_id: &ProductId, quantity: i64) -> bool {
        if quantity < 1 {
            tracing::debug!("ignoring quantity below 1");
            return false;
        }
        let Ok(quantity) = u64::try_from(quantity) else {
            return false;
        };

        let mut lines = self.lock();
        let Some(line) = lines.iter_mut().find(|l| &l.product.id == product_id) else {
            return false;
        };
        if line.quantity == quantity {
            return false;
        }
        line.quantity = quantity;
        self.persist(&lines);
        drop(lines);

        tracing::info!(quantity, "cart line quantity set");
        true
    }

    /// Remove every line.
    #[instrument(skip(self))]
    pub fn clear_cart(&self) {
        {
            let mut lines = self.lock();
            lines.clear();
            self.persist(&lines);
        }

        self.notifier.notify(Notification::info(
            "Cart cleared",
            "All items have been removed from your cart",
        ));
        add_breadcrumb("cart", "Cleared cart", None);
        tracing::info!("cart cleared");
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.lock().iter().map(|l| l.quantity).sum()
    }

    /// Sum of unit price times quantity over all lines.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.lock().iter().map(CartLine::line_total).sum()
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn items(&self) -> Vec<CartLine> {
        self.lock().clone()
    }

    /// The line for `product_id`, if any.
    #[must_use]
    pub fn line(&self, product_id: &ProductId) -> Option<CartLine> {
        self.lock()
            .iter()
            .find(|l| &l.product.id == product_id)
            .cloned()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Subtotal, free shipping, flat-rate tax and total.
    #[must_use]
    pub fn summary(&self, tax_rate: Decimal) -> OrderSummary {
        let lines = self.lock();
        let item_count = lines.iter().map(|l| l.quantity).sum();
        let subtotal = lines.iter().map(CartLine::line_total).sum();
        OrderSummary::new(item_count, subtotal, tax_rate)
    }

    /// Write the current snapshot again.
    ///
    /// Used on teardown so the last state is on disk even if an earlier
    /// write failed.
    pub fn flush(&self) {
        let lines = self.lock();
        self.persist(&lines);
    }

    fn persist(&self, lines: &[CartLine]) {
        if let Err(e) = storage::save_json(&*self.storage, keys::CART, lines) {
            tracing::warn!(error = %e, "failed to persist cart; keeping in-memory state");
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<CartLine>> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
