//! Inbound callback request: query parameters plus cancellation.

use std::future::Future;

use log::*;
use tokio_util::sync::CancellationToken;

use crate::error::{cancelled, oauth_error, Error, OAuthErrorKind, Stage};

/// The provider's redirect back to us.
///
/// Query parameters keep their original order and repeated keys. The
/// cancellation token is bound to the lifetime of the inbound request; every
/// outbound call made on its behalf aborts when it fires.
#[derive(Debug, Clone, Default)]
pub struct CallbackRequest {
    params: Vec<(String, String)>,
    cancellation: CancellationToken,
}

impl CallbackRequest {
    pub fn new(params: Vec<(String, String)>) -> Self {
        Self {
            params,
            cancellation: CancellationToken::new(),
        }
    }

    /// Decode a raw `application/x-www-form-urlencoded` query string.
    pub fn from_query(query: &str) -> Self {
        let params = url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
            .into_owned()
            .collect();
        Self::new(params)
    }

    pub fn with_cancellation(mut self, cancellation: CancellationToken) -> Self {
        self.cancellation = cancellation;
        self
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// First value of the named query parameter.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Run `fut` unless the request is cancelled first.
    ///
    /// An already-cancelled request never polls `fut`, so no outbound call is started.
    pub(crate) async fn run_until_cancelled<F, T>(&self, stage: Stage, fut: F) -> Result<T, Error>
    where
        F: Future<Output = Result<T, Error>>,
    {
        tokio::select! {
            biased;
            _ = self.cancellation.cancelled() => {
                warn!("Request cancelled during {}", stage.as_str());
                Err(cancelled(stage))
            }
            result = fut => result,
        }
    }
}

/// Extract the authorization code from the callback.
pub fn get_code(request: &CallbackRequest) -> Result<String, Error> {
    match request.first("code") {
        Some(code) if !code.is_empty() => Ok(code.to_string()),
        _ => {
            warn!("Callback is missing the code parameter");
            Err(oauth_error(
                OAuthErrorKind::MissingCode,
                "callback has no code parameter",
            ))
        }
    }
}
