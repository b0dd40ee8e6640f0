//! Application state shared across the storefront surface.

use std::sync::Arc;

use tracing::instrument;

use shopfront_core::ProductId;

use crate::catalog::Catalog;
use crate::checkout::{CheckoutOutcome, begin_checkout};
use crate::config::ShopConfig;
use crate::error::AppError;
use crate::models::CartLine;
use crate::navigation::Navigator;
use crate::services::notifications::Notifier;
use crate::services::{CartStore, SessionStore};
use crate::storage::Storage;

/// Application state owning the catalog and both stores.
///
/// This struct is cheaply cloneable via `Arc`. The application root builds
/// one at startup and consumes it with [`AppState::shutdown`].
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ShopConfig,
    catalog: Catalog,
    cart: CartStore,
    session: SessionStore,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.inner.config)
            .field("cart", &self.inner.cart)
            .field("session", &self.inner.session)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Create a new application state with the demo catalog.
    ///
    /// Both stores rehydrate from `storage`.
    pub fn new(
        config: ShopConfig,
        storage: Arc<dyn Storage>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self::with_catalog(config, Catalog::demo(), storage, notifier, navigator)
    }

    /// Create a new application state with a custom catalog.
    pub fn with_catalog(
        config: ShopConfig,
        catalog: Catalog,
        storage: Arc<dyn Storage>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let cart = CartStore::new(Arc::clone(&storage), Arc::clone(&notifier));
        let session = SessionStore::new(storage, Arc::clone(&notifier), config.auth_settings());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                cart,
                session,
                notifier,
                navigator,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &ShopConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    /// Get a reference to the session store.
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    /// Get a reference to the notification sink.
    #[must_use]
    pub fn notifier(&self) -> &dyn Notifier {
        &*self.inner.notifier
    }

    /// Add a catalog product to the cart by ID.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` for a zero quantity or when the line
    /// is already at its quantity limit, `AppError::NotFound` for an unknown
    /// product and `AppError::OutOfStock` if the product cannot be bought.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub fn add_to_cart(&self, product_id: &ProductId, quantity: u32) -> Result<CartLine, AppError> {
        if quantity == 0 {
            return Err(AppError::BadRequest(
                "Quantity must be at least 1".to_string(),
            ));
        }

        let product = self
            .catalog()
            .get_by_id(product_id)
            .ok_or_else(|| AppError::NotFound(format!("Product {product_id}")))?;

        if !product.in_stock {
            return Err(AppError::OutOfStock(product_id.clone()));
        }

        self.cart()
            .add_item(product, quantity)
            .ok_or_else(|| AppError::BadRequest("Quantity limit reached".to_string()))
    }

    /// Start checkout for the current cart.
    pub fn checkout(&self) -> CheckoutOutcome {
        begin_checkout(
            self.cart(),
            self.session(),
            &*self.inner.notifier,
            &*self.inner.navigator,
            self.config().tax_rate,
        )
    }

    /// Tear down the application state.
    ///
    /// Writes a final cart snapshot. Other clones of the state stay usable.
    pub fn shutdown(self) {
        self.inner.cart.flush();
        tracing::info!(
            cart_items = self.inner.cart.total_items(),
            signed_in = self.inner.session.is_authenticated(),
            "storefront state shut down"
        );
    }
}
