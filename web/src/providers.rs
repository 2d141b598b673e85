//! Provider configurations assembled from the service config.

use std::collections::HashMap;

use log::*;
use oauth_flow::config::{AuthStyle, ProviderConfig, TransportMode};
use oauth_flow::oauth::AuthCodeOption;
use oauth_flow::providers::{Endpoint, ProviderKind};
use oauth_flow::Error;
use service::config::{Config, ProviderSettings};

/// Build a `ProviderConfig` for every provider that has credentials configured.
pub fn build_providers(
    config: &Config,
    state: &str,
) -> Result<HashMap<ProviderKind, ProviderConfig>, Error> {
    let mut providers = HashMap::new();

    for (kind, settings) in [
        (ProviderKind::Google, config.google()),
        (ProviderKind::Microsoft, config.microsoft()),
    ] {
        match settings {
            Some(settings) => {
                providers.insert(kind, provider_config(kind, &settings, state)?);
                info!("Configured OAuth provider {kind}");
            }
            None => debug!("OAuth provider {kind} is not configured"),
        }
    }

    if providers.is_empty() {
        warn!("No OAuth providers configured; login and callback routes will return 404");
    }

    Ok(providers)
}

/// Build one provider's configuration from its settings.
pub fn provider_config(
    kind: ProviderKind,
    settings: &ProviderSettings,
    state: &str,
) -> Result<ProviderConfig, Error> {
    let transport_mode: TransportMode = settings.transport_mode.parse()?;

    let (endpoint, auth_style) = match kind {
        ProviderKind::Google => (Endpoint::google(), AuthStyle::InHeader),
        ProviderKind::Microsoft => (
            Endpoint::azure_ad(settings.tenant_id.as_deref().unwrap_or_default()),
            AuthStyle::InParams,
        ),
    };

    ProviderConfig::builder()
        .client_id(settings.client_id.as_str())
        .client_secret(settings.client_secret.as_str())
        .redirect_url(settings.redirect_url.as_str())
        .scopes(settings.scopes.iter().map(String::as_str))
        .endpoint(endpoint)
        .auth_style(auth_style)
        .state(state)
        .user_info_url(user_info_url_for(transport_mode, &settings.user_info_url))
        .request_method(settings.user_info_method.as_str())
        .transport_mode(transport_mode)
        .build()
}

/// In query-string mode the token is appended verbatim, so the URL must end
/// in `access_token=`.
pub fn user_info_url_for(mode: TransportMode, url: &str) -> String {
    match mode {
        TransportMode::QueryString if !url.ends_with('=') => {
            let separator = if url.contains('?') { '&' } else { '?' };
            format!("{url}{separator}access_token=")
        }
        _ => url.to_string(),
    }
}

/// Extra authorization URL parameters sent to each provider.
pub fn login_options(kind: ProviderKind) -> Vec<AuthCodeOption> {
    match kind {
        ProviderKind::Google => vec![AuthCodeOption::AccessTypeOffline],
        ProviderKind::Microsoft => vec![],
    }
}
