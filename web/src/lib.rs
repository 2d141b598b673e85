use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use log::*;
use oauth_flow::config::ProviderConfig;
use oauth_flow::http::HttpClientBuilder;
use oauth_flow::oauth::generate_state;
use oauth_flow::providers::ProviderKind;
use service::config::Config;

mod controller;
mod error;
pub mod providers;
pub mod router;

pub use error::{Error, Result, WebErrorKind};

// Needs to implement Clone to be able to be passed into Router as State
#[derive(Clone)]
pub struct AppState {
    providers: Arc<HashMap<ProviderKind, ProviderConfig>>,
    http_client: reqwest::Client,
    callback_timeout: Duration,
}

impl AppState {
    pub fn new(
        providers: HashMap<ProviderKind, ProviderConfig>,
        http_client: reqwest::Client,
        callback_timeout: Duration,
    ) -> Self {
        Self {
            providers: Arc::new(providers),
            http_client,
            callback_timeout,
        }
    }

    /// Build providers and the outbound HTTP client from the service config.
    pub fn from_config(config: &Config) -> core::result::Result<Self, oauth_flow::Error> {
        let state = config.oauth_state().unwrap_or_else(|| {
            info!("No OAUTH_STATE configured; generated a random state for this process");
            generate_state()
        });
        let providers = providers::build_providers(config, &state)?;

        let mut client_builder = HttpClientBuilder::new();
        if let Some(secs) = config.http_timeout_secs() {
            client_builder = client_builder.with_timeout(Duration::from_secs(secs));
        }

        Ok(Self::new(
            providers,
            client_builder.build()?,
            Duration::from_secs(config.callback_timeout_secs),
        ))
    }

    pub fn provider(&self, kind: ProviderKind) -> Option<&ProviderConfig> {
        self.providers.get(&kind)
    }

    pub fn http_client(&self) -> &reqwest::Client {
        &self.http_client
    }

    pub fn callback_timeout(&self) -> Duration {
        self.callback_timeout
    }
}

pub async fn init_server(app_state: AppState, interface: &str, port: u16) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind((interface, port)).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, router::define_routes(app_state)).await
}
