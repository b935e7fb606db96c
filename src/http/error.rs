use log::error;
use rouille::Response;

use crate::{domain::error::InputError, lastfm::LastfmError};

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
    BadGateway(String),
}

impl From<InputError> for ApiError {
    fn from(err: InputError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<LastfmError> for ApiError {
    fn from(err: LastfmError) -> Self {
        match err {
            LastfmError::MissingApiKey => {
                error!("{err}; set {} or lastfm.api_key", crate::config::API_KEY_ENV);
                ApiError::Internal("invalid environment variable".into())
            }

            LastfmError::Upstream { ref message, .. } => {
                error!("Last.fm request failed: {err}");
                ApiError::BadGateway(format!("Last.fm request failed: {message}"))
            }

            LastfmError::Transport(_) | LastfmError::Decode { .. } | LastfmError::Malformed { .. } => {
                error!("Last.fm request failed: {err}");
                ApiError::BadGateway("Last.fm request failed".into())
            }
        }
    }
}

impl ApiError {
    pub fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => Response::text(msg).with_status_code(400),

            ApiError::Internal(msg) => Response::text(msg).with_status_code(500),

            ApiError::BadGateway(msg) => Response::text(msg).with_status_code(502),
        }
    }
}
