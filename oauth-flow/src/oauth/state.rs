//! CSRF state for the authorization code flow.

use log::*;
use rand::Rng;

use super::CallbackRequest;
use crate::error::{oauth_error, Error, OAuthErrorKind};

/// Check the callback's first `state` value against the expected one.
///
/// The comparison is exact and case-sensitive.
pub fn check_state(request: &CallbackRequest, expected: &str) -> Result<(), Error> {
    let Some(state) = request.first("state") else {
        warn!("Callback is missing the state parameter");
        return Err(oauth_error(
            OAuthErrorKind::MissingState,
            "callback has no state parameter",
        ));
    };

    if state != expected {
        warn!("Callback state does not match the configured state");
        return Err(oauth_error(OAuthErrorKind::InvalidState, "invalid state"));
    }

    Ok(())
}

/// Generate a cryptographically random state token.
pub fn generate_state() -> String {
    let random_bytes: [u8; 32] = rand::thread_rng().gen();
    hex::encode(random_bytes)
}
