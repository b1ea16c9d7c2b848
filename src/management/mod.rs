mod auth;
mod credential;

pub use auth::TokenManager;
pub use credential::CredentialError;
pub use credential::CredentialStore;
