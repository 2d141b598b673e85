//! The outbound client used for user-info requests.

use std::time::Duration;

use crate::error::Error;

/// Settings applied to the user-info `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Overall per-request timeout. `None` leaves deadlines to the caller's cancellation.
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        HttpClientConfig {
            timeout: None,
            user_agent: concat!("oauth-flow/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Fluent builder for the `reqwest::Client` shared by every callback.
#[derive(Debug, Default)]
pub struct HttpClientBuilder {
    settings: HttpClientConfig,
}

impl HttpClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.settings.timeout = Some(timeout);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.settings.user_agent = user_agent.into();
        self
    }

    /// Build a rustls-backed client. Fails only if the TLS backend cannot initialise.
    pub fn build(self) -> Result<reqwest::Client, Error> {
        let HttpClientConfig {
            timeout,
            user_agent,
        } = self.settings;

        let builder = reqwest::Client::builder()
            .use_rustls_tls()
            .user_agent(user_agent);
        let builder = match timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        };

        Ok(builder.build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_leave_timeout_to_cancellation() {
        let builder = HttpClientBuilder::new();
        assert!(builder.settings.timeout.is_none());
        assert_eq!(
            builder.settings.user_agent,
            format!("oauth-flow/{}", env!("CARGO_PKG_VERSION"))
        );
    }

    #[test]
    fn test_setters_override_defaults() {
        let builder = HttpClientBuilder::new()
            .with_timeout(Duration::from_secs(10))
            .with_user_agent("demo-server/0.1");
        assert_eq!(builder.settings.timeout, Some(Duration::from_secs(10)));
        assert_eq!(builder.settings.user_agent, "demo-server/0.1");
    }

    #[tokio::test]
    async fn test_build_client_sends_user_agent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/me")
            .match_header("user-agent", "demo-server/0.1")
            .with_status(200)
            .create_async()
            .await;

        let client = HttpClientBuilder::new()
            .with_user_agent("demo-server/0.1")
            .with_timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        client.get(format!("{}/me", server.url())).send().await.unwrap();

        mock.assert_async().await;
    }
}
