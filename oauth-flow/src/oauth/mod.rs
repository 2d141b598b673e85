//! OAuth 2.0 authorization code flow.
//!
//! `login` starts the flow; `callback` finishes it for each redirect by
//! chaining `check_state`, `get_code`, `get_token` and a user-info request.

mod callback;
mod login;
mod request;
mod state;

pub mod token;

pub use callback::callback;
pub use login::{login, AuthCodeOption};
pub use request::{get_code, CallbackRequest};
pub use state::{check_state, generate_state};
pub use token::{get_token, Tokens};
