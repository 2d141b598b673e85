//! Pre-defined provider endpoints.

mod endpoint;
mod kind;

pub use endpoint::Endpoint;
pub use kind::ProviderKind;
