//! Shared fixtures for unit tests.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use crate::config::{AuthStyle, ProviderConfig, TransportMode};
use crate::providers::Endpoint;

pub(crate) const STATE: &str = "randomstate";

/// A provider whose endpoints all live on the given mock server.
pub(crate) fn mock_provider(
    server_url: &str,
    user_info_path: &str,
    transport_mode: TransportMode,
) -> ProviderConfig {
    mock_provider_with_user_info(
        server_url,
        &format!("{}{}", server_url, user_info_path),
        transport_mode,
    )
}

/// A provider exchanging codes on the mock server but fetching user info from `user_info_url`.
pub(crate) fn mock_provider_with_user_info(
    server_url: &str,
    user_info_url: &str,
    transport_mode: TransportMode,
) -> ProviderConfig {
    ProviderConfig::builder()
        .client_id("client-123")
        .client_secret("secret-456")
        .redirect_url("http://localhost:9999/callback")
        .scopes(["openid", "email"])
        .endpoint(Endpoint::new(
            format!("{}/authorize", server_url),
            format!("{}/token", server_url),
        ))
        .auth_style(AuthStyle::InParams)
        .state(STATE)
        .user_info_url(user_info_url)
        .transport_mode(transport_mode)
        .build()
        .unwrap()
}

pub(crate) fn token_body(access_token: &str) -> String {
    serde_json::json!({
        "access_token": access_token,
        "token_type": "Bearer",
        "expires_in": 3600,
    })
    .to_string()
}

/// Accepts connections and never answers. Returns the base URL.
pub(crate) async fn silent_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut open = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            open.push(socket);
        }
    });

    format!("http://{}", addr)
}

/// Answers every request with a `Content-Length` larger than the body it
/// sends, then closes the connection. Returns the base URL.
pub(crate) async fn truncated_body_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut received = Vec::new();
                let mut buf = [0u8; 1024];
                while !received.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => received.extend_from_slice(&buf[..n]),
                    }
                }

                let _ = socket
                    .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\n{\"id\":")
                    .await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{}", addr)
}
