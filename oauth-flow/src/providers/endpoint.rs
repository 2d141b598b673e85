//! Pre-configured provider endpoints.

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const AZURE_AD_BASE_URL: &str = "https://login.microsoftonline.com";

/// Authorization and token endpoint URLs of an OAuth 2.0 provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Authorization endpoint the user is redirected to.
    pub auth_url: String,
    /// Token endpoint used for the code exchange.
    pub token_url: String,
}

impl Endpoint {
    pub fn new(auth_url: impl Into<String>, token_url: impl Into<String>) -> Self {
        Self {
            auth_url: auth_url.into(),
            token_url: token_url.into(),
        }
    }

    /// Google's OAuth 2.0 endpoints.
    pub fn google() -> Self {
        Self::new(GOOGLE_AUTH_URL, GOOGLE_TOKEN_URL)
    }

    /// Azure AD v2.0 endpoints for the given tenant.
    ///
    /// An empty tenant selects the multi-tenant `common` endpoint.
    pub fn azure_ad(tenant: &str) -> Self {
        let tenant = if tenant.is_empty() { "common" } else { tenant };
        Self::new(
            format!("{}/{}/oauth2/v2.0/authorize", AZURE_AD_BASE_URL, tenant),
            format!("{}/{}/oauth2/v2.0/token", AZURE_AD_BASE_URL, tenant),
        )
    }
}
