use thiserror::Error;

#[derive(Debug, Error)]
pub enum LastfmError {
    #[error("Last.fm API key is not configured")]
    MissingApiKey,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("{method} failed with status {status}: {message}")]
    Upstream {
        method: &'static str,
        status: u16,
        message: String,
    },

    #[error("failed to decode {method} response: {source}")]
    Decode {
        method: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed {method} response: {reason}")]
    Malformed {
        method: &'static str,
        reason: String,
    },
}
