//! Service-account authentication for Google APIs.

mod service_account;
mod token_provider;

pub use service_account::ServiceAccountKey;
pub(crate) use token_provider::TokenProvider;
