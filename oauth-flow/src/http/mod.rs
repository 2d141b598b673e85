//! HTTP client building and user-info transports.

mod client;
mod transport;

pub use client::{HttpClientBuilder, HttpClientConfig};
pub use transport::{send_request_by_bearer, send_request_by_query_string};
