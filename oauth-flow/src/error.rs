//! Error types for the `oauth-flow` crate.
//!
//! A root Error struct holds an error kind tree and an optional source for chaining.

use std::error::Error as StdError;
use std::fmt;

/// Top-level error type for oauth-flow crate.
/// Holds error kind and optional source for error chaining.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: ErrorKind,
}

/// Major categories of errors in oauth-flow.
#[derive(Debug, PartialEq)]
pub enum ErrorKind {
    OAuth(OAuthErrorKind),
    Http(HttpErrorKind),
    Config(ConfigErrorKind),
    /// The inbound request was cancelled while the given stage was running.
    Cancelled(Stage),
}

/// Errors from the authorization code flow itself.
#[derive(Debug, PartialEq)]
pub enum OAuthErrorKind {
    InvalidState,
    MissingState,
    MissingCode,
    TokenExchangeFailed,
}

/// Errors from the user-info HTTP request.
#[derive(Debug, PartialEq)]
pub enum HttpErrorKind {
    BuilderFailed,
    RequestFailed,
    ReadFailed,
}

/// Errors from building a provider configuration.
#[derive(Debug, PartialEq)]
pub enum ConfigErrorKind {
    InvalidUrl,
    InvalidMethod,
    InvalidTransportMode,
    MissingValue,
}

/// Stages of a callback, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    CheckState,
    ExtractCode,
    ExchangeToken,
    FetchUserInfo,
    ReadBody,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::CheckState => "check_state",
            Stage::ExtractCode => "extract_code",
            Stage::ExchangeToken => "exchange_token",
            Stage::FetchUserInfo => "fetch_user_info",
            Stage::ReadBody => "read_body",
        }
    }
}

impl Error {
    /// The callback stage that produced this error, if it came from the flow.
    pub fn stage(&self) -> Option<Stage> {
        match &self.error_kind {
            ErrorKind::OAuth(OAuthErrorKind::InvalidState)
            | ErrorKind::OAuth(OAuthErrorKind::MissingState) => Some(Stage::CheckState),
            ErrorKind::OAuth(OAuthErrorKind::MissingCode) => Some(Stage::ExtractCode),
            ErrorKind::OAuth(OAuthErrorKind::TokenExchangeFailed) => Some(Stage::ExchangeToken),
            ErrorKind::Http(HttpErrorKind::ReadFailed) => Some(Stage::ReadBody),
            ErrorKind::Http(HttpErrorKind::RequestFailed) => Some(Stage::FetchUserInfo),
            ErrorKind::Cancelled(stage) => Some(*stage),
            ErrorKind::Http(HttpErrorKind::BuilderFailed) | ErrorKind::Config(_) => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.error_kind, ErrorKind::Cancelled(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.error_kind {
            ErrorKind::OAuth(kind) => write!(f, "OAuth error: {:?}", kind)?,
            ErrorKind::Http(kind) => write!(f, "HTTP error: {:?}", kind)?,
            ErrorKind::Config(kind) => write!(f, "Config error: {:?}", kind)?,
            ErrorKind::Cancelled(stage) => {
                write!(f, "Request cancelled during {}", stage.as_str())?
            }
        }
        if let Some(source) = &self.source {
            write!(f, ": {}", source)?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let error_kind = if err.is_builder() {
            ErrorKind::Http(HttpErrorKind::BuilderFailed)
        } else {
            ErrorKind::Http(HttpErrorKind::RequestFailed)
        };

        Error {
            source: Some(Box::new(err)),
            error_kind,
        }
    }
}

/// Helper function to create OAuth errors.
pub fn oauth_error(kind: OAuthErrorKind, message: &str) -> Error {
    Error {
        source: Some(message.to_string().into()),
        error_kind: ErrorKind::OAuth(kind),
    }
}

/// Wrap a source error under the given kind.
pub fn with_source<E>(kind: ErrorKind, err: E) -> Error
where
    E: StdError + Send + Sync + 'static,
{
    Error {
        source: Some(Box::new(err)),
        error_kind: kind,
    }
}

/// Helper function to create configuration errors.
pub fn config_error(kind: ConfigErrorKind, message: &str) -> Error {
    Error {
        source: Some(message.to_string().into()),
        error_kind: ErrorKind::Config(kind),
    }
}

/// Helper function to create cancellation errors.
pub fn cancelled(stage: Stage) -> Error {
    Error {
        source: None,
        error_kind: ErrorKind::Cancelled(stage),
    }
}
