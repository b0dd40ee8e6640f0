//! Navigation requests issued by storefront flows.
//!
//! Rendering and routing live outside this crate. Flows that need to move
//! the user somewhere (the checkout gate sending an anonymous user to the
//! login page) go through a [`Navigator`].

use std::fmt;
use std::sync::{Mutex, PoisonError};

use shopfront_core::{CategoryId, ProductId};

/// Where to send the user after a successful sign-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReturnTo {
    Checkout,
}

impl ReturnTo {
    /// Value carried in the `redirect` query parameter.
    #[must_use]
    pub const fn as_query(self) -> &'static str {
        match self {
            Self::Checkout => "checkout",
        }
    }

    /// Parse a `redirect` query value. Unknown values are ignored.
    #[must_use]
    pub fn from_query(value: &str) -> Option<Self> {
        match value {
            "checkout" => Some(Self::Checkout),
            _ => None,
        }
    }
}

/// A storefront page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Cart,
    Checkout,
    Account,
    Login { redirect: Option<ReturnTo> },
    Product(ProductId),
    Category(CategoryId),
}

impl Route {
    /// Page to open after sign-in completes.
    #[must_use]
    pub const fn after_login(redirect: Option<ReturnTo>) -> Self {
        match redirect {
            Some(ReturnTo::Checkout) => Self::Checkout,
            None => Self::Home,
        }
    }

    /// URL path of the page.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Cart => "/cart".to_string(),
            Self::Checkout => "/checkout".to_string(),
            Self::Account => "/account".to_string(),
            Self::Login { redirect: None } => "/login".to_string(),
            Self::Login {
                redirect: Some(to),
            } => format!("/login?redirect={}", to.as_query()),
            Self::Product(id) => format!("/product/{id}"),
            Self::Category(id) => format!("/categories/{id}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Something that can move the user to another page.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &Route);
}

/// Navigator that records requested routes.
///
/// Used by the CLI to report where a UI would go, and by tests.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every route requested so far, oldest first.
    #[must_use]
    pub fn routes(&self) -> Vec<Route> {
        self.routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent route.
    #[must_use]
    pub fn last(&self) -> Option<Route> {
        self.routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: &Route) {
        tracing::debug!(path = %route, "Navigate");
        self.routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(route.clone());
    }
}
