//! Session-related types.
//!
//! Types persisted for authentication state, plus the storage keys used by
//! both stores.

use serde::{Deserialize, Serialize};

use shopfront_core::UserId;

/// The signed-in user's profile.
///
/// Minimal data persisted to identify the current user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: UserId,
    /// Display name.
    pub name: String,
    pub email: String,
}

/// Storage keys for persisted state.
pub mod keys {
    /// Key for the serialized cart lines.
    pub const CART: &str = "shopfront.cart";

    /// Key for the current signed-in user.
    pub const CURRENT_USER: &str = "shopfront.user";
}
