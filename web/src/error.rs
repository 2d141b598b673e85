use std::error::Error as StdError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::*;

use oauth_flow::error::{
    ConfigErrorKind, Error as FlowError, ErrorKind as FlowErrorKind, HttpErrorKind, OAuthErrorKind,
};

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    Flow(FlowError),
    Web(WebErrorKind),
}

/// Errors raised by the web layer itself.
#[derive(Debug, PartialEq)]
pub enum WebErrorKind {
    /// No provider of that name is configured.
    ProviderNotFound,
}

impl StdError for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> core::result::Result<(), std::fmt::Error> {
        match self {
            Error::Flow(err) => write!(fmt, "{err}"),
            Error::Web(kind) => write!(fmt, "Web error: {kind:?}"),
        }
    }
}

// A failed callback only fails its own request; the server keeps running.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let flow_error = match self {
            Error::Web(WebErrorKind::ProviderNotFound) => {
                return (StatusCode::NOT_FOUND, "NOT FOUND").into_response();
            }
            Error::Flow(flow_error) => flow_error,
        };

        warn!("OAuth flow failed: {flow_error}");

        match flow_error.error_kind {
            FlowErrorKind::OAuth(oauth_error_kind) => match oauth_error_kind {
                OAuthErrorKind::InvalidState
                | OAuthErrorKind::MissingState
                | OAuthErrorKind::MissingCode => {
                    (StatusCode::BAD_REQUEST, "BAD REQUEST").into_response()
                }
                OAuthErrorKind::TokenExchangeFailed => {
                    (StatusCode::BAD_GATEWAY, "BAD GATEWAY").into_response()
                }
            },
            FlowErrorKind::Http(http_error_kind) => match http_error_kind {
                HttpErrorKind::RequestFailed | HttpErrorKind::ReadFailed => {
                    (StatusCode::BAD_GATEWAY, "BAD GATEWAY").into_response()
                }
                HttpErrorKind::BuilderFailed => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL SERVER ERROR").into_response()
                }
            },
            FlowErrorKind::Cancelled(_) => {
                (StatusCode::GATEWAY_TIMEOUT, "GATEWAY TIMEOUT").into_response()
            }
            FlowErrorKind::Config(
                ConfigErrorKind::InvalidUrl
                | ConfigErrorKind::InvalidMethod
                | ConfigErrorKind::InvalidTransportMode
                | ConfigErrorKind::MissingValue,
            ) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL SERVER ERROR").into_response(),
        }
    }
}

impl From<FlowError> for Error {
    fn from(err: FlowError) -> Self {
        Error::Flow(err)
    }
}
