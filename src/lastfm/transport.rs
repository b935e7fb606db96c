//! Outbound HTTP for the Last.fm client

use std::time::Duration;

use crate::lastfm::error::LastfmError;

/// Status and body of an upstream response, whatever the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs a GET. Non-2xx statuses are responses, not errors.
pub trait Transport: Send + Sync {
    fn get(&self, url: &str) -> Result<FetchResponse, LastfmError>;
}

/// [`Transport`] backed by `ureq`.
pub struct UreqTransport {
    http_client: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let http_client = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(5))
            .timeout_read(timeout)
            .timeout_write(timeout)
            .build();
        Self { http_client }
    }

    fn read_body(response: ureq::Response) -> Result<FetchResponse, LastfmError> {
        let status = response.status();
        let body = response
            .into_string()
            .map_err(|e| LastfmError::Transport(format!("failed to read response body: {e}")))?;
        Ok(FetchResponse { status, body })
    }
}

impl Transport for UreqTransport {
    fn get(&self, url: &str) -> Result<FetchResponse, LastfmError> {
        match self.http_client.get(url).call() {
            Ok(response) => Self::read_body(response),
            Err(ureq::Error::Status(_, response)) => Self::read_body(response),
            Err(ureq::Error::Transport(transport)) => Err(transport_error(&transport)),
        }
    }
}

/// `ureq`'s own message starts with the request url, which carries the API key.
fn transport_error(transport: &ureq::Transport) -> LastfmError {
    let reason = match transport.message() {
        Some(message) => format!("{}: {message}", transport.kind()),
        None => transport.kind().to_string(),
    };
    LastfmError::Transport(reason)
}
