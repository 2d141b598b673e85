//! Authorization code exchange against the provider's token endpoint.

use log::*;
use oauth2::reqwest::async_http_client;
use oauth2::AuthorizationCode;

use super::Tokens;
use crate::config::ProviderConfig;
use crate::error::{with_source, Error, ErrorKind, OAuthErrorKind, Stage};
use crate::oauth::CallbackRequest;

/// Exchange an authorization code for tokens.
///
/// Makes a single attempt, bound to the request's cancellation. Transport
/// failures, error responses and malformed token responses all surface as
/// `TokenExchangeFailed`.
pub async fn get_token(
    request: &CallbackRequest,
    config: &ProviderConfig,
    code: &str,
) -> Result<Tokens, Error> {
    let client = config.oauth_client();

    debug!("Exchanging authorization code at {}", config.token_url());

    let exchange = async {
        client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .request_async(async_http_client)
            .await
            .map_err(|e| {
                warn!("Failed to exchange authorization code: {}", e);
                with_source(ErrorKind::OAuth(OAuthErrorKind::TokenExchangeFailed), e)
            })
    };

    let response = request
        .run_until_cancelled(Stage::ExchangeToken, exchange)
        .await?;

    let tokens = Tokens::from(&response);
    match tokens.remaining_lifetime() {
        Some(lifetime) => info!(
            "Successfully exchanged authorization code for tokens, valid for {}s",
            lifetime.num_seconds()
        ),
        None => info!("Successfully exchanged authorization code for tokens without an expiry"),
    }
    if tokens.is_expired() {
        warn!("Token endpoint returned an access token that has already expired");
    }

    Ok(tokens)
}
