//! OAuth tokens and the code-for-token exchange.

mod exchange;
mod tokens;

pub use exchange::get_token;
pub use tokens::Tokens;
