//! Shopfront storefront library.
//!
//! Catalog, cart and session state for a demo storefront, independent of
//! any rendering layer. The `shop` CLI and the integration tests drive it
//! through [`state::AppState`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod models;
pub mod navigation;
pub mod services;
pub mod state;
pub mod storage;
