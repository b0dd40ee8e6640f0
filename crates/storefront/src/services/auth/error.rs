//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during sign-in and sign-up.
///
/// Both are recovered by the caller; neither changes session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Email/password pair does not match the accepted credentials.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// A required sign-up field is empty.
    #[error("Please fill all required fields")]
    MissingFields,
}
