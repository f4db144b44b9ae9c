//! Authentication module
//!
//! The upstream asset host is authenticated with HTTP Basic credentials
//! built from the API key and secret. The `Authenticator` applies them to
//! outgoing requests.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::AuthConfig;
