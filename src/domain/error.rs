use thiserror::Error;

/// Problems with the caller's query, detected before any upstream call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("type and user are required")]
    MissingRequired,

    #[error("invalid limit")]
    InvalidLimit,

    #[error("invalid type")]
    InvalidType,

    #[error("invalid period")]
    InvalidPeriod,
}
