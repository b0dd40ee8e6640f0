//! Domain models for the storefront.
//!
//! - [`product`] - Catalog records (products, categories)
//! - [`cart`] - Cart lines and order totals
//! - [`session`] - Signed-in identity and storage keys

pub mod cart;
pub mod product;
pub mod session;

pub use cart::{CartLine, CartLinesError, OrderSummary};
pub use product::{Category, Product, ProductError};
pub use session::Identity;
