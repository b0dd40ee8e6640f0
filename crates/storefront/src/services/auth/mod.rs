//! Session store (mock authentication).
//!
//! Accepts a single configured credential pair and fabricates identities on
//! sign-up. `login` and `signup` wait a fixed latency before resolving to
//! mimic a network round trip.
//!
//! # Concurrency
//!
//! Calls to `login`/`signup` are serialized by one in-flight guard per
//! store: a second call waits for the first to finish and then runs, so the
//! later call's outcome is what remains. [`SessionStore::is_loading`] stays
//! true until every queued call has resolved.
//!
//! [`SessionStore::logout`] is synchronous and does not take the guard. It
//! clears the session immediately but does not cancel pending calls: a
//! `login` or `signup` already in flight still signs its identity in when
//! its latency elapses, replacing the logged-out state.

mod error;

pub use error::AuthError;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;
use uuid::Uuid;

use shopfront_core::UserId;

use crate::error::{clear_sentry_user, set_sentry_user};
use crate::models::Identity;
use crate::models::session::keys;
use crate::services::notifications::{Notification, Notifier};
use crate::storage::{self, Storage};

/// ID of the identity returned by a successful `login`.
pub const DEMO_USER_ID: &str = "1";

/// Display name of the identity returned by a successful `login`.
pub const DEMO_USER_NAME: &str = "John Doe";

/// Default accepted email.
pub const DEFAULT_DEMO_EMAIL: &str = "user@example.com";

/// Default accepted password.
pub const DEFAULT_DEMO_PASSWORD: &str = "password";

/// Default simulated latency for `login` and `signup`.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(1000);

/// Settings for the mock authentication.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct AuthSettings {
    /// Email accepted by `login`.
    pub demo_email: String,
    /// Password accepted by `login`.
    pub demo_password: SecretString,
    /// Delay applied to `login` and `signup` before they resolve.
    pub latency: Duration,
}

impl std::fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSettings")
            .field("demo_email", &self.demo_email)
            .field("demo_password", &"[REDACTED]")
            .field("latency", &self.latency)
            .finish()
    }
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            demo_email: DEFAULT_DEMO_EMAIL.to_string(),
            demo_password: SecretString::from(DEFAULT_DEMO_PASSWORD),
            latency: DEFAULT_LATENCY,
        }
    }
}

/// Counts a call as in flight until dropped.
struct PendingGuard<'a>(&'a AtomicUsize);

impl<'a> PendingGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// The current signed-in identity, if any.
pub struct SessionStore {
    current: RwLock<Option<Identity>>,
    in_flight: tokio::sync::Mutex<()>,
    pending: AtomicUsize,
    settings: AuthSettings,
    storage: Arc<dyn Storage>,
    notifier: Arc<dyn Notifier>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("current", &*self.read())
            .field("pending", &self.pending.load(Ordering::SeqCst))
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Create the store, rehydrating any persisted identity.
    ///
    /// A corrupt identity record is removed and the session starts
    /// anonymous.
    pub fn new(
        storage: Arc<dyn Storage>,
        notifier: Arc<dyn Notifier>,
        settings: AuthSettings,
    ) -> Self {
        let current =
            storage::load_or_discard(&*storage, keys::CURRENT_USER, |identity: &Identity| {
                if identity.id.is_empty() {
                    Err("identity id is empty")
                } else {
                    Ok(())
                }
            });

        if let Some(identity) = &current {
            set_sentry_user(&identity.id, Some(&identity.email));
            tracing::debug!(user_id = %identity.id, "session rehydrated");
        }

        Self {
            current: RwLock::new(current),
            in_flight: tokio::sync::Mutex::new(()),
            pending: AtomicUsize::new(0),
            settings,
            storage,
            notifier,
        }
    }

    /// Sign in with the demo credentials.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the pair does not match;
    /// the session is left unchanged.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let _pending = PendingGuard::enter(&self.pending);
        let _turn = self.in_flight.lock().await;
        self.simulate_latency().await;

        let matches = email == self.settings.demo_email
            && password == self.settings.demo_password.expose_secret();

        if !matches {
            tracing::info!("login rejected");
            self.notify_failure("Login failed", AuthError::InvalidCredentials);
            return Err(AuthError::InvalidCredentials);
        }

        let identity = Identity {
            id: UserId::new(DEMO_USER_ID),
            name: DEMO_USER_NAME.to_string(),
            email: self.settings.demo_email.clone(),
        };
        self.sign_in(identity.clone());

        self.notifier
            .notify(Notification::info("Login successful", "Welcome back!"));
        tracing::info!(user_id = %identity.id, "login succeeded");

        Ok(identity)
    }

    /// Create a new identity and sign it in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingFields` if any argument is empty; the
    /// session is left unchanged.
    #[instrument(skip(self, password))]
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Identity, AuthError> {
        let _pending = PendingGuard::enter(&self.pending);
        let _turn = self.in_flight.lock().await;
        self.simulate_latency().await;

        if name.is_empty() || email.is_empty() || password.is_empty() {
            tracing::info!("signup rejected");
            self.notify_failure("Signup failed", AuthError::MissingFields);
            return Err(AuthError::MissingFields);
        }

        let identity = Identity {
            id: UserId::new(Uuid::new_v4().to_string()),
            name: name.to_string(),
            email: email.to_string(),
        };
        self.sign_in(identity.clone());

        self.notifier.notify(Notification::info(
            "Account created",
            "Your account has been created successfully!",
        ));
        tracing::info!(user_id = %identity.id, "signup succeeded");

        Ok(identity)
    }

    /// Sign out. Safe to call when nobody is signed in.
    ///
    /// A `login` or `signup` still in flight is not cancelled and signs in
    /// once it resolves.
    #[instrument(skip(self))]
    pub fn logout(&self) {
        let previous = self.write().take();

        if let Err(e) = self.storage.remove(keys::CURRENT_USER) {
            tracing::warn!(error = %e, "failed to remove persisted identity");
        }

        if let Some(identity) = previous {
            clear_sentry_user();
            self.notifier.notify(Notification::info(
                "Logged out",
                "You have been logged out successfully",
            ));
            tracing::info!(user_id = %identity.id, "logged out");
        }
    }

    /// The signed-in identity, if any.
    #[must_use]
    pub fn current(&self) -> Option<Identity> {
        self.read().clone()
    }

    /// Whether someone is signed in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    /// Whether a `login` or `signup` call is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.pending.load(Ordering::SeqCst) > 0
    }

    /// The settings this store was built with.
    #[must_use]
    pub const fn settings(&self) -> &AuthSettings {
        &self.settings
    }

    async fn simulate_latency(&self) {
        if !self.settings.latency.is_zero() {
            tokio::time::sleep(self.settings.latency).await;
        }
    }

    fn sign_in(&self, identity: Identity) {
        if let Err(e) = storage::save_json(&*self.storage, keys::CURRENT_USER, &identity) {
            tracing::warn!(error = %e, "failed to persist identity; keeping in-memory state");
        }
        set_sentry_user(&identity.id, Some(&identity.email));
        *self.write() = Some(identity);
    }

    fn notify_failure(&self, title: &str, err: AuthError) {
        self.notifier
            .notify(Notification::destructive(title, err.to_string()));
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<Identity>> {
        self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<Identity>> {
        self.current.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::services::notifications::{NotificationLog, Severity};
    use crate::storage::MemoryStorage;

    fn instant() -> AuthSettings {
        AuthSettings {
            latency: Duration::ZERO,
            ..AuthSettings::default()
        }
    }

    fn store_with(storage: Arc<MemoryStorage>, log: Arc<NotificationLog>) -> SessionStore {
        SessionStore::new(storage, log, instant())
    }

    #[tokio::test]
    async fn test_login_with_demo_credentials() {
        let storage = Arc::new(MemoryStorage::new());
        let log = Arc::new(NotificationLog::new());
        let session = store_with(storage.clone(), log.clone());

        let identity = session.login("user@example.com", "password").await.unwrap();

        assert_eq!(identity.id.as_str(), DEMO_USER_ID);
        assert_eq!(identity.name, DEMO_USER_NAME);
        assert!(session.is_authenticated());
        assert!(!session.is_loading());
        assert_eq!(log.titles(), vec!["Login successful"]);

        let stored: Identity = storage::load_json(&*storage, keys::CURRENT_USER)
            .unwrap()
            .unwrap();
        assert_eq!(stored, identity);
    }

    #[tokio::test]
    async fn test_login_rejects_other_pairs() {
        let storage = Arc::new(MemoryStorage::new());
        let log = Arc::new(NotificationLog::new());
        let session = store_with(storage.clone(), log.clone());

        for (email, password) in [
            ("user@example.com", "wrong"),
            ("other@example.com", "password"),
            ("USER@example.com", "password"),
            ("", ""),
        ] {
            let result = session.login(email, password).await;
            assert_eq!(result, Err(AuthError::InvalidCredentials));
        }

        assert!(session.current().is_none());
        assert!(storage.is_empty());
        let last = log.last().unwrap();
        assert_eq!(last.title, "Login failed");
        assert_eq!(last.description, "Invalid credentials");
        assert_eq!(last.severity, Severity::Destructive);
    }

    #[tokio::test]
    async fn test_failed_login_keeps_existing_identity() {
        let session = store_with(
            Arc::new(MemoryStorage::new()),
            Arc::new(NotificationLog::new()),
        );
        session.login("user@example.com", "password").await.unwrap();

        assert!(session.login("user@example.com", "nope").await.is_err());
        assert_eq!(session.current().unwrap().id.as_str(), DEMO_USER_ID);
    }

    #[tokio::test]
    async fn test_signup_missing_fields() {
        let session = store_with(
            Arc::new(MemoryStorage::new()),
            Arc::new(NotificationLog::new()),
        );

        assert_eq!(
            session.signup("", "a@b.com", "x").await,
            Err(AuthError::MissingFields)
        );
        assert_eq!(
            session.signup("Jane", "", "x").await,
            Err(AuthError::MissingFields)
        );
        assert_eq!(
            session.signup("Jane", "a@b.com", "").await,
            Err(AuthError::MissingFields)
        );
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_signup_creates_distinct_identities() {
        let storage = Arc::new(MemoryStorage::new());
        let log = Arc::new(NotificationLog::new());
        let session = store_with(storage.clone(), log.clone());

        let first = session.signup("Jane", "jane@x.com", "pw").await.unwrap();
        let second = session.signup("Jane", "jane@x.com", "pw").await.unwrap();

        assert_ne!(first.id, second.id);
        assert_ne!(first.id.as_str(), DEMO_USER_ID);
        assert_eq!(second.name, "Jane");
        assert_eq!(session.current(), Some(second));
        assert_eq!(log.titles(), vec!["Account created", "Account created"]);
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let storage = Arc::new(MemoryStorage::new());
        let log = Arc::new(NotificationLog::new());
        let session = store_with(storage.clone(), log.clone());
        session.login("user@example.com", "password").await.unwrap();

        session.logout();
        session.logout();

        assert!(!session.is_authenticated());
        assert!(storage.get(keys::CURRENT_USER).unwrap().is_none());
        assert_eq!(log.titles(), vec!["Login successful", "Logged out"]);
    }

    #[tokio::test]
    async fn test_rehydrates_identity() {
        let storage = Arc::new(MemoryStorage::new());
        let log = Arc::new(NotificationLog::new());
        let first = store_with(storage.clone(), log.clone());
        let identity = first.signup("Jane", "jane@x.com", "pw").await.unwrap();

        let second = store_with(storage, log);
        assert_eq!(second.current(), Some(identity));
    }

    #[test]
    fn test_corrupt_identity_discarded() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(keys::CURRENT_USER, "{\"id\":").unwrap();

        let session = store_with(storage.clone(), Arc::new(NotificationLog::new()));
        assert!(!session.is_authenticated());
        assert!(storage.get(keys::CURRENT_USER).unwrap().is_none());
    }

    #[test]
    fn test_identity_with_empty_id_discarded() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .set(
                keys::CURRENT_USER,
                r#"{"id":"","name":"Jane","email":"jane@x.com"}"#,
            )
            .unwrap();

        let session = store_with(storage.clone(), Arc::new(NotificationLog::new()));
        assert!(session.current().is_none());
        assert!(storage.get(keys::CURRENT_USER).unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_flag_spans_latency() {
        let session = Arc::new(SessionStore::new(
            Arc::new(MemoryStorage::new()),
            Arc::new(NotificationLog::new()),
            AuthSettings::default(),
        ));
        assert!(!session.is_loading());

        let task = {
            let session = Arc::clone(&session);
            tokio::spawn(async move { session.login("user@example.com", "bad").await })
        };
        tokio::task::yield_now().await;
        assert!(session.is_loading());

        assert_eq!(task.await.unwrap(), Err(AuthError::InvalidCredentials));
        assert!(!session.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_calls_are_serialized() {
        let session = Arc::new(SessionStore::new(
            Arc::new(MemoryStorage::new()),
            Arc::new(NotificationLog::new()),
            AuthSettings::default(),
        ));

        let started = tokio::time::Instant::now();
        let login = {
            let session = Arc::clone(&session);
            tokio::spawn(async move { session.login("user@example.com", "password").await })
        };
        // Let the login take the in-flight guard first.
        tokio::task::yield_now().await;
        let signup = {
            let session = Arc::clone(&session);
            tokio::spawn(async move { session.signup("Jane", "jane@x.com", "pw").await })
        };

        login.await.unwrap().unwrap();
        let jane = signup.await.unwrap().unwrap();

        // Two full latencies: the signup waited for the login to finish.
        assert!(started.elapsed() >= DEFAULT_LATENCY * 2);
        assert_eq!(session.current(), Some(jane));
        assert!(!session.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn test_logout_does_not_cancel_pending_login() {
        let log = Arc::new(NotificationLog::new());
        let session = Arc::new(SessionStore::new(
            Arc::new(MemoryStorage::new()),
            log.clone(),
            AuthSettings::default(),
        ));
        session.signup("Jane", "jane@x.com", "pw").await.unwrap();

        let login = {
            let session = Arc::clone(&session);
            tokio::spawn(async move { session.login("user@example.com", "password").await })
        };
        tokio::task::yield_now().await;
        assert!(session.is_loading());

        session.logout();
        assert!(!session.is_authenticated());

        let identity = login.await.unwrap().unwrap();
        assert_eq!(session.current(), Some(identity));
        assert_eq!(
            log.titles(),
            vec!["Account created", "Logged out", "Login successful"]
        );
    }

    #[test]
    fn test_settings_debug_redacts_password() {
        let settings = AuthSettings {
            demo_password: SecretString::from("hunter2-super-secret"),
            ..AuthSettings::default()
        };
        let debug_output = format!("{settings:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("hunter2-super-secret"));
    }
}
