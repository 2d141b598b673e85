//! Provider configuration for the authorization code flow.

use std::fmt;
use std::str::FromStr;

use oauth2::basic::BasicClient;
use oauth2::{AuthType, AuthUrl, ClientId, ClientSecret, RedirectUrl, TokenUrl};
use reqwest::Method;

use crate::error::{config_error, with_source, ConfigErrorKind, Error, ErrorKind};
use crate::providers::Endpoint;

/// How the access token is presented to the user-info endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportMode {
    /// Token is appended verbatim to the user-info URL.
    QueryString,
    /// Token is sent as `Authorization: Bearer <token>`.
    AuthorizationBearer,
}

impl TransportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::QueryString => "query-string",
            TransportMode::AuthorizationBearer => "bearer",
        }
    }
}

impl FromStr for TransportMode {
    type Err = Error;

    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode.trim().to_lowercase().as_str() {
            "query-string" | "query_string" => Ok(TransportMode::QueryString),
            "bearer" => Ok(TransportMode::AuthorizationBearer),
            other => Err(config_error(
                ConfigErrorKind::InvalidTransportMode,
                &format!("unknown transport mode '{}'", other),
            )),
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How client credentials are sent to the token endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthStyle {
    /// HTTP Basic `Authorization` header.
    #[default]
    InHeader,
    /// `client_id` and `client_secret` form fields.
    InParams,
}

/// Settings for one OAuth 2.0 provider.
///
/// Built once at startup through [`ProviderConfig::builder`] and shared
/// read-only between callbacks.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    client_id: ClientId,
    client_secret: Option<ClientSecret>,
    redirect_url: RedirectUrl,
    scopes: Vec<String>,
    auth_url: AuthUrl,
    token_url: TokenUrl,
    auth_style: AuthStyle,
    state: String,
    user_info_url: String,
    request_method: Method,
    request_body: Option<Vec<u8>>,
    transport_mode: TransportMode,
}

impl ProviderConfig {
    pub fn builder() -> ProviderConfigBuilder {
        ProviderConfigBuilder::new()
    }

    pub fn client_id(&self) -> &str {
        self.client_id.as_str()
    }

    pub fn redirect_url(&self) -> &str {
        self.redirect_url.as_str()
    }

    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    pub fn auth_url(&self) -> &str {
        self.auth_url.as_str()
    }

    pub fn token_url(&self) -> &str {
        self.token_url.as_str()
    }

    pub fn auth_style(&self) -> AuthStyle {
        self.auth_style
    }

    /// Expected value of the callback `state` parameter.
    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn user_info_url(&self) -> &str {
        &self.user_info_url
    }

    pub fn request_method(&self) -> &Method {
        &self.request_method
    }

    pub fn request_body(&self) -> Option<&[u8]> {
        self.request_body.as_deref()
    }

    pub fn transport_mode(&self) -> TransportMode {
        self.transport_mode
    }

    /// Build the `oauth2` client for this provider.
    pub fn oauth_client(&self) -> BasicClient {
        let auth_type = match self.auth_style {
            AuthStyle::InHeader => AuthType::BasicAuth,
            AuthStyle::InParams => AuthType::RequestBody,
        };

        BasicClient::new(
            self.client_id.clone(),
            self.client_secret.clone(),
            self.auth_url.clone(),
            Some(self.token_url.clone()),
        )
        .set_auth_type(auth_type)
        .set_redirect_uri(self.redirect_url.clone())
    }
}

/// Builder for [`ProviderConfig`].
///
/// URLs and the request method are validated in [`ProviderConfigBuilder::build`].
#[derive(Debug, Default)]
pub struct ProviderConfigBuilder {
    client_id: Option<String>,
    client_secret: Option<String>,
    redirect_url: Option<String>,
    scopes: Vec<String>,
    endpoint: Option<Endpoint>,
    auth_style: AuthStyle,
    state: Option<String>,
    user_info_url: Option<String>,
    request_method: Option<String>,
    request_body: Option<Vec<u8>>,
    transport_mode: Option<TransportMode>,
}

impl ProviderConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    pub fn client_secret(mut self, client_secret: impl Into<String>) -> Self {
        self.client_secret = Some(client_secret.into());
        self
    }

    pub fn redirect_url(mut self, redirect_url: impl Into<String>) -> Self {
        self.redirect_url = Some(redirect_url.into());
        self
    }

    /// Set the requested scopes, in order. Blank entries are dropped.
    pub fn scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = scopes
            .into_iter()
            .map(Into::into)
            .map(|scope: String| scope.trim().to_string())
            .filter(|scope| !scope.is_empty())
            .collect();
        self
    }

    pub fn endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    pub fn auth_style(mut self, auth_style: AuthStyle) -> Self {
        self.auth_style = auth_style;
        self
    }

    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn user_info_url(mut self, user_info_url: impl Into<String>) -> Self {
        self.user_info_url = Some(user_info_url.into());
        self
    }

    /// HTTP method for the user-info request. Defaults to `GET`.
    pub fn request_method(mut self, request_method: impl Into<String>) -> Self {
        self.request_method = Some(request_method.into());
        self
    }

    /// Body sent with every user-info request.
    pub fn request_body(mut self, request_body: impl Into<Vec<u8>>) -> Self {
        self.request_body = Some(request_body.into());
        self
    }

    /// Defaults to [`TransportMode::AuthorizationBearer`].
    pub fn transport_mode(mut self, transport_mode: TransportMode) -> Self {
        self.transport_mode = Some(transport_mode);
        self
    }

    pub fn build(self) -> Result<ProviderConfig, Error> {
        let client_id = required(self.client_id, "client_id")?;
        let redirect_url = required(self.redirect_url, "redirect_url")?;
        let endpoint = required(self.endpoint, "endpoint")?;
        let state = required(self.state, "state")?;
        let user_info_url = required(self.user_info_url, "user_info_url")?;

        let redirect_url =
            RedirectUrl::new(redirect_url).map_err(|e| invalid_url("redirect_url", e))?;
        let auth_url =
            AuthUrl::new(endpoint.auth_url).map_err(|e| invalid_url("auth_url", e))?;
        let token_url =
            TokenUrl::new(endpoint.token_url).map_err(|e| invalid_url("token_url", e))?;

        let request_method = match self.request_method {
            Some(method) => Method::from_bytes(method.to_uppercase().as_bytes())
                .map_err(|e| with_source(ErrorKind::Config(ConfigErrorKind::InvalidMethod), e))?,
            None => Method::GET,
        };

        Ok(ProviderConfig {
            client_id: ClientId::new(client_id),
            client_secret: self.client_secret.filter(|s| !s.is_empty()).map(ClientSecret::new),
            redirect_url,
            scopes: self.scopes,
            auth_url,
            token_url,
            auth_style: self.auth_style,
            state,
            user_info_url,
            request_method,
            request_body: self.request_body,
            transport_mode: self.transport_mode.unwrap_or(TransportMode::AuthorizationBearer),
        })
    }
}

fn required<T>(value: Option<T>, name: &str) -> Result<T, Error> {
    value.ok_or_else(|| {
        config_error(
            ConfigErrorKind::MissingValue,
            &format!("{} is required", name),
        )
    })
}

fn invalid_url(name: &str, err: url::ParseError) -> Error {
    config_error(ConfigErrorKind::InvalidUrl, &format!("invalid {}: {}", name, err))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_builder() -> ProviderConfigBuilder {
        ProviderConfig::builder()
            .client_id("client-123")
            .client_secret("secret-456")
            .redirect_url("http://localhost:9999/google/callback")
            .scopes(["openid", "email"])
            .endpoint(Endpoint::google())
            .state("randomstate")
            .user_info_url("https://www.googleapis.com/oauth2/v2/userinfo?access_token=")
    }

    #[test]
    fn test_build_with_defaults() {
        let config = base_builder().build().unwrap();
        assert_eq!(config.client_id(), "client-123");
        assert_eq!(config.scopes(), &["openid".to_string(), "email".to_string()]);
        assert_eq!(config.request_method(), &Method::GET);
        assert_eq!(config.request_body(), None);
        assert_eq!(config.transport_mode(), TransportMode::AuthorizationBearer);
        assert_eq!(config.auth_style(), AuthStyle::InHeader);
    }

    #[test]
    fn test_scopes_drop_blank_entries() {
        let config = base_builder().scopes(["openid", " ", "", " profile"]).build().unwrap();
        assert_eq!(config.scopes(), &["openid".to_string(), "profile".to_string()]);
    }

    #[test]
    fn test_missing_state_is_rejected() {
        let err = ProviderConfig::builder()
            .client_id("client-123")
            .redirect_url("http://localhost/callback")
            .endpoint(Endpoint::google())
            .user_info_url("https://example.com/me")
            .build()
            .unwrap_err();
        assert_eq!(err.error_kind, ErrorKind::Config(ConfigErrorKind::MissingValue));
    }

    #[test]
    fn test_invalid_redirect_url_is_rejected() {
        let err = base_builder().redirect_url("not a url").build().unwrap_err();
        assert_eq!(err.error_kind, ErrorKind::Config(ConfigErrorKind::InvalidUrl));
    }

    #[test]
    fn test_request_method_is_parsed() {
        let config = base_builder().request_method("post").build().unwrap();
        assert_eq!(config.request_method(), &Method::POST);

        let err = base_builder().request_method("GE T").build().unwrap_err();
        assert_eq!(err.error_kind, ErrorKind::Config(ConfigErrorKind::InvalidMethod));
    }

    #[test]
    fn test_transport_mode_from_str() {
        assert_eq!("query-string".parse::<TransportMode>().unwrap(), TransportMode::QueryString);
        assert_eq!("Bearer".parse::<TransportMode>().unwrap(), TransportMode::AuthorizationBearer);

        let err = "bearr".parse::<TransportMode>().unwrap_err();
        assert_eq!(
            err.error_kind,
            ErrorKind::Config(ConfigErrorKind::InvalidTransportMode)
        );
    }
}
