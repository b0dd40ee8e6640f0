//! Catalog domain types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use shopfront_core::{CategoryId, Price, ProductId};

/// Highest rating a product can carry.
pub const MAX_RATING: f32 = 5.0;

/// Errors found while validating a [`Product`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProductError {
    /// The product ID is empty.
    #[error("product id cannot be empty")]
    EmptyId,

    /// The previous price is lower than the current price.
    #[error("product {id}: old price {old_price} is below price {price}")]
    OldPriceBelowPrice {
        id: ProductId,
        price: Price,
        old_price: Price,
    },

    /// The rating is outside `0.0..=5.0`.
    #[error("product {id}: rating {rating} is outside 0-5")]
    RatingOutOfRange { id: ProductId, rating: f32 },
}

/// An immutable catalog record.
///
/// Field names serialize in camelCase to match the persisted cart layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    /// Previous price, shown struck through when the product is on sale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_price: Option<Price>,
    pub rating: f32,
    pub review_count: u32,
    pub category: CategoryId,
    pub image: String,
    pub in_stock: bool,
}

impl Product {
    /// Check the record's invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ProductError> {
        if self.id.is_empty() {
            return Err(ProductError::EmptyId);
        }

        if let Some(old_price) = self.old_price
            && old_price < self.price
        {
            return Err(ProductError::OldPriceBelowPrice {
                id: self.id.clone(),
                price: self.price,
                old_price,
            });
        }

        if !(0.0..=MAX_RATING).contains(&self.rating) {
            return Err(ProductError::RatingOutOfRange {
                id: self.id.clone(),
                rating: self.rating,
            });
        }

        Ok(())
    }

    /// Whether the product is discounted from a previous price.
    #[must_use]
    pub fn is_on_sale(&self) -> bool {
        self.old_price.is_some_and(|old| old > self.price)
    }
}

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub image: String,
}
