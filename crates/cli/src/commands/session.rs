//! Sign-in, sign-up and sign-out commands.

use shopfront_storefront::error::AppError;
use shopfront_storefront::navigation::{ReturnTo, Route};
use shopfront_storefront::state::AppState;

use crate::output;

/// Sign in, then continue to the page named by `redirect`.
///
/// # Errors
///
/// Returns `AppError::Auth` if the credentials are rejected.
pub async fn login(
    state: &AppState,
    email: &str,
    password: &str,
    redirect: Option<ReturnTo>,
) -> Result<(), AppError> {
    let identity = state.session().login(email, password).await?;
    output::print(&format!("Signed in as {}", output::identity(&identity)));

    if Route::after_login(redirect) == Route::Checkout {
        super::checkout::run(state);
    }
    Ok(())
}

/// Create an account and sign in.
///
/// # Errors
///
/// Returns `AppError::Auth` if any field is empty.
pub async fn signup(
    state: &AppState,
    name: &str,
    email: &str,
    password: &str,
) -> Result<(), AppError> {
    let identity = state.session().signup(name, email, password).await?;
    output::print(&format!("Signed in as {}", output::identity(&identity)));
    Ok(())
}

/// Sign out.
pub fn logout(state: &AppState) {
    if !state.session().is_authenticated() {
        output::print("Not signed in");
    }
    state.session().logout();
}

/// Show the signed-in user.
pub fn whoami(state: &AppState) {
    match state.session().current() {
        Some(identity) => output::print(&output::identity(&identity)),
        None => output::print("Not signed in"),
    }
}
