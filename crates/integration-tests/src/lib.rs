//! Integration tests for Shopfront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopfront-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_session` - Cart and session stores working side by side
//! - `persistence` - Snapshots written to disk and read back by a new process
//! - `checkout` - Checkout gate and the login redirect
//!
//! Every test builds its own [`TestContext`] over a fresh temporary
//! directory, so tests never share state.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;

use shopfront_storefront::config::ShopConfig;
use shopfront_storefront::navigation::RecordingNavigator;
use shopfront_storefront::services::NotificationLog;
use shopfront_storefront::state::AppState;
use shopfront_storefront::storage::{FileStorage, StorageError};

/// A storefront backed by files in a temporary directory.
pub struct TestContext {
    pub dir: TempDir,
    pub state: AppState,
    pub notifications: Arc<NotificationLog>,
    pub navigator: Arc<RecordingNavigator>,
}

impl TestContext {
    /// Start a storefront over a new temporary directory.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directory cannot be created.
    pub fn new() -> Result<Self, StorageError> {
        let dir = tempfile::tempdir().map_err(|source| StorageError::Io {
            key: "tempdir".to_string(),
            source,
        })?;
        Self::in_dir(dir)
    }

    /// Start a storefront over an existing directory, rehydrating whatever
    /// an earlier context left there.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directory cannot be opened.
    pub fn in_dir(dir: TempDir) -> Result<Self, StorageError> {
        let config = ShopConfig {
            data_dir: dir.path().to_path_buf(),
            auth_latency: Duration::ZERO,
            ..ShopConfig::default()
        };
        let storage = Arc::new(FileStorage::open(&config.data_dir)?);
        let notifications = Arc::new(NotificationLog::new());
        let navigator = Arc::new(RecordingNavigator::new());
        let state = AppState::new(config, storage, notifications.clone(), navigator.clone());

        Ok(Self {
            dir,
            state,
            notifications,
            navigator,
        })
    }

    /// Shut the storefront down and start a new one over the same directory.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directory cannot be reopened.
    pub fn restart(self) -> Result<Self, StorageError> {
        self.state.shutdown();
        Self::in_dir(self.dir)
    }
}
