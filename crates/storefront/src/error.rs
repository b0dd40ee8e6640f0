//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type for the application surface (the CLI
//! and any embedding UI). Store operations themselves never fail on
//! persistence problems; the errors here come from user input, invalid
//! configuration, or storage that cannot be opened.

use thiserror::Error;

use shopfront_core::ProductId;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::services::auth::AuthError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Storage backend could not be opened or used.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Catalog data is invalid.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Configuration is invalid.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Sign-in or sign-up failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The product cannot be added because it is out of stock.
    #[error("Out of stock: {0}")]
    OutOfStock(ProductId),

    /// Bad request from the caller.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Whether this error indicates a fault in the system rather than in
    /// the caller's input.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::Catalog(_) | Self::Config(_))
    }

    /// Message safe to show to the end user.
    ///
    /// Internal error details are not exposed.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Storage(_) | Self::Catalog(_) | Self::Config(_) => {
                "Something went wrong. Please try again.".to_string()
            }
            Self::Auth(err) => err.to_string(),
            Self::NotFound(what) => format!("{what} not found"),
            Self::OutOfStock(_) => "This product is currently out of stock".to_string(),
            Self::BadRequest(msg) => msg.clone(),
        }
    }

    /// Report internal errors to Sentry and the log.
    pub fn report(&self) {
        if self.is_internal() {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Storefront error"
            );
        } else {
            tracing::debug!(error = %self, "Storefront request rejected");
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from a user ID.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added item to cart", Some(&[("product_id", "3")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("Product 123".to_string());
        assert_eq!(err.to_string(), "Not found: Product 123");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_user_message_hides_internal_details() {
        let err = AppError::Storage(StorageError::InvalidKey("../x".to_string()));
        assert!(err.is_internal());
        assert!(!err.user_message().contains("../x"));
    }

    #[test]
    fn test_user_message_for_auth() {
        let err = AppError::from(AuthError::InvalidCredentials);
        assert!(!err.is_internal());
        assert_eq!(err.user_message(), "Invalid credentials");

        let err = AppError::from(AuthError::MissingFields);
        assert_eq!(err.user_message(), "Please fill all required fields");
    }

    #[test]
    fn test_out_of_stock_message() {
        let err = AppError::OutOfStock(ProductId::new("8"));
        assert_eq!(err.to_string(), "Out of stock: 8");
        assert_eq!(err.user_message(), "This product is currently out of stock");
    }

    #[test]
    fn test_helpers_without_sentry_client_are_noops() {
        set_sentry_user(&"1", Some("user@example.com"));
        add_breadcrumb("cart", "Added item to cart", Some(&[("product_id", "1")]));
        clear_sentry_user();
        AppError::BadRequest("x".to_string()).report();
    }
}
