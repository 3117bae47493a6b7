use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not authenticated; run `rvw auth login`")]
    NotAuthenticated,

    #[error("keyring error: {0}")]
    Keyring(String),

    #[error("token store error: {0}")]
    Storage(String),

    #[error("identity lookup failed: {0}")]
    Identity(String),
}
