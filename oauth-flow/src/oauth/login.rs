//! Authorization URL generation.

use log::*;
use oauth2::{CsrfToken, Scope};

use crate::config::ProviderConfig;

/// Extra parameters for the authorization URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthCodeOption {
    /// `access_type=online`
    AccessTypeOnline,
    /// `access_type=offline`, asks for a refresh token.
    AccessTypeOffline,
    /// `prompt=consent`, forces the consent screen.
    ApprovalForce,
    /// Any provider-specific parameter.
    Param(String, String),
}

impl AuthCodeOption {
    fn as_param(&self) -> (&str, &str) {
        match self {
            AuthCodeOption::AccessTypeOnline => ("access_type", "online"),
            AuthCodeOption::AccessTypeOffline => ("access_type", "offline"),
            AuthCodeOption::ApprovalForce => ("prompt", "consent"),
            AuthCodeOption::Param(key, value) => (key, value),
        }
    }
}

/// Build the URL the user is redirected to for consent.
///
/// Embeds the client id, redirect URL, scopes, `response_type=code` and the
/// configured state.
pub fn login(config: &ProviderConfig, options: &[AuthCodeOption]) -> String {
    let client = config.oauth_client();
    let state = config.state().to_string();

    let mut request = client.authorize_url(move || CsrfToken::new(state));
    for scope in config.scopes() {
        request = request.add_scope(Scope::new(scope.clone()));
    }
    for option in options {
        let (key, value) = option.as_param();
        request = request.add_extra_param(key.to_string(), value.to_string());
    }

    let (url, _) = request.url();
    debug!("Built authorization URL for client {}", config.client_id());
    url.to_string()
}
