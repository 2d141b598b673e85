//! # oauth-flow
//!
//! OAuth 2.0 authorization code client helper:
//! - Authorization URL generation from an immutable provider configuration
//! - Callback state validation and code extraction
//! - Code-for-token exchange through the `oauth2` crate
//! - User-info retrieval with the token as a bearer header or query string
//!
//! ## Usage
//!
//! ```rust,ignore
//! use oauth_flow::{
//!     config::{ProviderConfig, TransportMode},
//!     http::HttpClientBuilder,
//!     oauth::{callback, login, CallbackRequest},
//!     providers::Endpoint,
//! };
//!
//! let url = login(&config, &[]);
//! // ...redirect the user, then on the way back:
//! let request = CallbackRequest::from_query(raw_query).with_cancellation(token);
//! let user_info = callback(&client, &request, &config, TransportMode::QueryString).await?;
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod oauth;
pub mod providers;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use error::{Error, ErrorKind};
