//! Read-only product catalog.
//!
//! The catalog is static data built once at startup. Lookups never fail:
//! absence is an empty `Vec` or `None`.

mod data;

use std::collections::HashSet;

use thiserror::Error;

use shopfront_core::{CategoryId, ProductId};

use crate::models::{Category, Product, ProductError};

/// Number of products returned by [`Catalog::featured`].
pub const FEATURED_COUNT: usize = 4;

/// Errors found while building a [`Catalog`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    /// A product record is invalid.
    #[error("invalid product: {0}")]
    InvalidProduct(#[from] ProductError),

    /// Two products share an ID.
    #[error("duplicate product id: {0}")]
    DuplicateProduct(ProductId),

    /// Two categories share an ID.
    #[error("duplicate category id: {0}")]
    DuplicateCategory(CategoryId),
}

/// Products and categories in definition order.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    categories: Vec<Category>,
}

impl Catalog {
    /// Build a catalog, validating every record.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if a product is invalid or an ID repeats.
    pub fn new(products: Vec<Product>, categories: Vec<Category>) -> Result<Self, CatalogError> {
        let mut product_ids = HashSet::with_capacity(products.len());
        for product in &products {
            product.validate()?;
            if !product_ids.insert(&product.id) {
                return Err(CatalogError::DuplicateProduct(product.id.clone()));
            }
        }

        let mut category_ids = HashSet::with_capacity(categories.len());
        for category in &categories {
            if !category_ids.insert(&category.id) {
                return Err(CatalogError::DuplicateCategory(category.id.clone()));
            }
        }

        Ok(Self {
            products,
            categories,
        })
    }

    /// The built-in demo catalog: 8 products in 5 categories.
    #[must_use]
    pub fn demo() -> Self {
        Self {
            products: data::products(),
            categories: data::categories(),
        }
    }

    /// All products in definition order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// All categories in definition order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// The product with this ID.
    #[must_use]
    pub fn get_by_id(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Products in a category, in catalog order.
    #[must_use]
    pub fn get_by_category(&self, category_id: &CategoryId) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| &p.category == category_id)
            .collect()
    }

    /// The category with this ID.
    #[must_use]
    pub fn category_by_id(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| &c.id == id)
    }

    /// Case-insensitive substring search over name, description and
    /// category. An empty query matches every product.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let needle = query.to_lowercase();
        self.products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
                    || p.category.as_str().to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// The first [`FEATURED_COUNT`] products.
    ///
    /// This is a fixed prefix of the catalog, not a ranking.
    #[must_use]
    pub fn featured(&self) -> Vec<&Product> {
        self.products.iter().take(FEATURED_COUNT).collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::demo()
    }
}
