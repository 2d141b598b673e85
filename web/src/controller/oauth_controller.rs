//! Controller for the OAuth login and callback redirects.
//!
//! Both endpoints are reached through browser redirects, so everything they
//! need arrives in the path and query string.

use crate::error::WebErrorKind;
use crate::providers::login_options;
use crate::{AppState, Error, Result};

use axum::extract::{Path, RawQuery, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Redirect};

use log::*;
use oauth_flow::config::ProviderConfig;
use oauth_flow::oauth::{self, CallbackRequest};
use oauth_flow::providers::ProviderKind;
use tokio_util::sync::CancellationToken;

/// GET /{provider}/login
///
/// Redirects the browser to the provider's consent page.
pub async fn login(
    State(app_state): State<AppState>,
    Path(provider): Path<String>,
) -> Result<impl IntoResponse> {
    let (kind, config) = resolve(&app_state, &provider)?;

    let url = oauth::login(config, &login_options(kind));
    debug!("Redirecting to {kind} authorization endpoint");
    Ok(Redirect::to(&url))
}

/// GET /{provider}/callback
///
/// Completes the flow and responds with the provider's raw user-info body.
pub async fn callback(
    State(app_state): State<AppState>,
    Path(provider): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<impl IntoResponse> {
    let (kind, config) = resolve(&app_state, &provider)?;

    // Cancelled when the deadline passes or when this handler is dropped.
    let cancellation = CancellationToken::new();
    let _cancel_on_drop = cancellation.clone().drop_guard();
    spawn_deadline(cancellation.clone(), app_state.callback_timeout());

    let request = CallbackRequest::from_query(query.as_deref().unwrap_or_default())
        .with_cancellation(cancellation);

    let user_info = oauth::callback(
        app_state.http_client(),
        &request,
        config,
        config.transport_mode(),
    )
    .await?;

    info!("Completed {kind} callback");

    let content_type = if serde_json::from_slice::<serde_json::Value>(&user_info).is_ok() {
        "application/json"
    } else {
        "application/octet-stream"
    };
    Ok((StatusCode::OK, [(header::CONTENT_TYPE, content_type)], user_info))
}

fn resolve<'a>(
    app_state: &'a AppState,
    provider: &str,
) -> Result<(ProviderKind, &'a ProviderConfig)> {
    let kind =
        ProviderKind::from_name(provider).ok_or(Error::Web(WebErrorKind::ProviderNotFound))?;
    let config = app_state
        .provider(kind)
        .ok_or(Error::Web(WebErrorKind::ProviderNotFound))?;
    Ok((kind, config))
}

fn spawn_deadline(cancellation: CancellationToken, timeout: std::time::Duration) {
    tokio::spawn(async move {
        tokio::select! {
            _ = tokio::time::sleep(timeout) => {
                warn!("Callback exceeded {}s deadline", timeout.as_secs());
                cancellation.cancel();
            }
            _ = cancellation.cancelled() => {}
        }
    });
}
