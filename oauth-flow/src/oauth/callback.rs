//! Callback orchestration: state check through user-info body.

use bytes::Bytes;
use log::*;
use secrecy::ExposeSecret;

use super::{check_state, get_code, get_token, CallbackRequest};
use crate::config::{ProviderConfig, TransportMode};
use crate::error::{with_source, Error, ErrorKind, HttpErrorKind, Stage};
use crate::http::{send_request_by_bearer, send_request_by_query_string};

/// Complete the authorization code flow for one redirect.
///
/// Runs state check, code extraction, token exchange and the user-info
/// request in that order, stopping at the first failure. Returns the raw
/// user-info body.
pub async fn callback(
    client: &reqwest::Client,
    request: &CallbackRequest,
    config: &ProviderConfig,
    mode: TransportMode,
) -> Result<Bytes, Error> {
    check_state(request, config.state())?;
    let code = get_code(request)?;
    let tokens = get_token(request, config, &code).await?;

    let access_token = tokens.access_token.expose_secret();
    let url = config.user_info_url();
    let method = config.request_method().clone();
    let body = config.request_body();

    debug!("Fetching user info via {}", mode);
    let response = match mode {
        TransportMode::QueryString => {
            send_request_by_query_string(client, request, access_token, url, method, body).await?
        }
        TransportMode::AuthorizationBearer => {
            send_request_by_bearer(client, request, access_token, url, method, body).await?
        }
    };

    let read = async {
        response.bytes().await.map_err(|e| {
            warn!("Failed to read user info body: {}", e);
            with_source(ErrorKind::Http(HttpErrorKind::ReadFailed), e.without_url())
        })
    };
    let user_info = request.run_until_cancelled(Stage::ReadBody, read).await?;

    info!("Fetched {} bytes of user info", user_info.len());
    Ok(user_info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OAuthErrorKind;
    use crate::test_support::{
        mock_provider, mock_provider_with_user_info, silent_server, token_body,
        truncated_body_server,
    };
    use mockito::{Matcher, Server};
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;

    const USER_INFO: &str = r#"{"id":"42","email":"jo@example.com"}"#;

    #[tokio::test]
    async fn test_callback_query_string_mode() {
        let mut server = Server::new_async().await;
        let config = mock_provider(&server.url(), "/me?access_token=", TransportMode::QueryString);

        let token_mock = server
            .mock("POST", "/token")
            .match_body(Matcher::UrlEncoded("code".into(), "abc123".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(token_body("tok123"))
            .create_async()
            .await;
        let user_mock = server
            .mock("GET", "/me")
            .match_query(Matcher::UrlEncoded("access_token".into(), "tok123".into()))
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_body(USER_INFO)
            .create_async()
            .await;

        let client = reqwest::Client::new();
        let request = CallbackRequest::from_query("state=randomstate&code=abc123");
        let body = callback(&client, &request, &config, TransportMode::QueryString)
            .await
            .unwrap();

        assert_eq!(body, Bytes::from_static(USER_INFO.as_bytes()));
        token_mock.assert_async().await;
        user_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_callback_bearer_mode() {
        let mut server = Server::new_async().await;
        let config = mock_provider(&server.url(), "/me", TransportMode::AuthorizationBearer);

        let _token_mock = server
            .mock("POST", "/token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(token_body("tok123"))
            .create_async()
            .await;
        let user_mock = server
            .mock("GET", "/me")
            .match_query(Matcher::Missing)
            .match_header("authorization", "Bearer tok123")
            .with_status(200)
            .with_body(USER_INFO)
            .create_async()
            .await;

        let client = reqwest::Client::new();
        let request = CallbackRequest::from_query("state=randomstate&code=abc123");
        let body = callback(&client, &request, &config, TransportMode::AuthorizationBearer)
            .await
            .unwrap();

        assert_eq!(&body[..], USER_INFO.as_bytes());
        user_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_callback_invalid_state_makes_no_calls() {
        let mut server = Server::new_async().await;
        let config = mock_provider(&server.url(), "/me", TransportMode::AuthorizationBearer);

        let token_mock = server.mock("POST", "/token").expect(0).create_async().await;
        let user_mock = server.mock("GET", "/me").expect(0).create_async().await;

        let client = reqwest::Client::new();
        let request = CallbackRequest::from_query("state=forged&code=abc123");
        let err = callback(&client, &request, &config, TransportMode::AuthorizationBearer)
            .await
            .unwrap_err();

        assert_eq!(err.error_kind, ErrorKind::OAuth(OAuthErrorKind::InvalidState));
        assert_eq!(err.stage(), Some(Stage::CheckState));
        token_mock.assert_async().await;
        user_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_callback_missing_code_makes_no_calls() {
        let mut server = Server::new_async().await;
        let config = mock_provider(&server.url(), "/me", TransportMode::AuthorizationBearer);

        let token_mock = server.mock("POST", "/token").expect(0).create_async().await;

        let client = reqwest::Client::new();
        let request = CallbackRequest::from_query("state=randomstate");
        let err = callback(&client, &request, &config, TransportMode::AuthorizationBearer)
            .await
            .unwrap_err();

        assert_eq!(err.error_kind, ErrorKind::OAuth(OAuthErrorKind::MissingCode));
        token_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_callback_token_failure_skips_user_info() {
        let mut server = Server::new_async().await;
        let config = mock_provider(&server.url(), "/me", TransportMode::AuthorizationBearer);

        let _token_mock = server
            .mock("POST", "/token")
            .with_status(500)
            .with_body("upstream down")
            .create_async()
            .await;
        let user_mock = server.mock("GET", "/me").expect(0).create_async().await;

        let client = reqwest::Client::new();
        let request = CallbackRequest::from_query("state=randomstate&code=abc123");
        let err = callback(&client, &request, &config, TransportMode::AuthorizationBearer)
            .await
            .unwrap_err();

        assert_eq!(
            err.error_kind,
            ErrorKind::OAuth(OAuthErrorKind::TokenExchangeFailed)
        );
        user_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_callback_cancelled_performs_no_calls() {
        let mut server = Server::new_async().await;
        let config = mock_provider(&server.url(), "/me", TransportMode::AuthorizationBearer);

        let token_mock = server.mock("POST", "/token").expect(0).create_async().await;
        let user_mock = server.mock("GET", "/me").expect(0).create_async().await;

        let cancellation = CancellationToken::new();
        cancellation.cancel();
        let client = reqwest::Client::new();
        let request = CallbackRequest::from_query("state=randomstate&code=abc123")
            .with_cancellation(cancellation);

        let err = callback(&client, &request, &config, TransportMode::AuthorizationBearer)
            .await
            .unwrap_err();

        assert!(err.is_cancelled());
        assert_eq!(err.stage(), Some(Stage::ExchangeToken));
        token_mock.assert_async().await;
        user_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_callback_cancelled_while_fetching_user_info() {
        let mut server = Server::new_async().await;
        let user_info_url = format!("{}/me", silent_server().await);
        let config = mock_provider_with_user_info(
            &server.url(),
            &user_info_url,
            TransportMode::AuthorizationBearer,
        );

        let token_mock = server
            .mock("POST", "/token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(token_body("tok123"))
            .create_async()
            .await;

        let cancellation = CancellationToken::new();
        let deadline = cancellation.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(500)).await;
            deadline.cancel();
        });

        let client = reqwest::Client::new();
        let request = CallbackRequest::from_query("state=randomstate&code=abc123")
            .with_cancellation(cancellation);

        let err = tokio::time::timeout(
            Duration::from_secs(10),
            callback(&client, &request, &config, TransportMode::AuthorizationBearer),
        )
        .await
        .expect("callback should stop once cancelled")
        .unwrap_err();

        assert_eq!(err.error_kind, ErrorKind::Cancelled(Stage::FetchUserInfo));
        assert_eq!(err.stage(), Some(Stage::FetchUserInfo));
        token_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_callback_truncated_user_info_body_is_read_failed() {
        let mut server = Server::new_async().await;
        let user_info_url = format!("{}/me", truncated_body_server().await);
        let config = mock_provider_with_user_info(
            &server.url(),
            &user_info_url,
            TransportMode::AuthorizationBearer,
        );

        let _token_mock = server
            .mock("POST", "/token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(token_body("tok123"))
            .create_async()
            .await;

        let client = reqwest::Client::new();
        let request = CallbackRequest::from_query("state=randomstate&code=abc123");
        let err = callback(&client, &request, &config, TransportMode::AuthorizationBearer)
            .await
            .unwrap_err();

        assert_eq!(err.error_kind, ErrorKind::Http(HttpErrorKind::ReadFailed));
        assert_eq!(err.stage(), Some(Stage::ReadBody));
        assert!(err.source.is_some());
    }
}
