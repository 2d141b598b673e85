//! Tokens returned by a successful code exchange.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use oauth2::basic::{BasicTokenResponse, BasicTokenType};
use oauth2::TokenResponse;
use secrecy::SecretString;

/// The token endpoint's response, with secrets wrapped and `expires_in`
/// resolved to an absolute time.
#[derive(Debug, Clone)]
pub struct Tokens {
    pub access_token: SecretString,
    /// Present only when the provider issued one, e.g. Google with `access_type=offline`.
    pub refresh_token: Option<SecretString>,
    pub expires_at: Option<DateTime<Utc>>,
    pub token_type: String,
    /// Scopes echoed back by the provider; empty when it did not echo any.
    pub scopes: Vec<String>,
}

impl Tokens {
    /// Tokens without an expiry never expire.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= Utc::now())
    }

    /// Remaining lifetime; negative once expired.
    pub fn remaining_lifetime(&self) -> Option<ChronoDuration> {
        Some(self.expires_at? - Utc::now())
    }
}

impl From<&BasicTokenResponse> for Tokens {
    fn from(response: &BasicTokenResponse) -> Self {
        let token_type = match response.token_type() {
            BasicTokenType::Bearer => "Bearer".to_string(),
            BasicTokenType::Mac => "MAC".to_string(),
            BasicTokenType::Extension(other) => other.clone(),
        };

        let expires_at = response
            .expires_in()
            .and_then(|lifetime| ChronoDuration::from_std(lifetime).ok())
            .map(|lifetime| Utc::now() + lifetime);

        Tokens {
            access_token: SecretString::new(response.access_token().secret().clone()),
            refresh_token: response
                .refresh_token()
                .map(|refresh| SecretString::new(refresh.secret().clone())),
            expires_at,
            token_type,
            scopes: response
                .scopes()
                .map(|granted| granted.iter().map(|scope| scope.as_str().to_string()).collect())
                .unwrap_or_default(),
        }
    }
}
