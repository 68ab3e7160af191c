use mars_photos_domain::{CameraError, DateError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Request failed with status code: {status}. Reason: {reason}")]
    RequestFailed { status: u16, reason: String },
    #[error("request could not be sent: {0}")]
    Transport(String),
    #[error("unexpected response body: {0}")]
    UnexpectedBody(String),
    #[error("failed to download {url}: {cause}")]
    ImageDownloadFailed { url: String, cause: String },
}

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Date(#[from] DateError),
    #[error(transparent)]
    Camera(#[from] CameraError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("decode error: {0}")]
    Decode(String),
}

impl ApplicationError {
    /// Errors the user can fix by changing the request, raised before any network call.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Date(_) | Self::Camera(_) | Self::InvalidInput(_)
        )
    }
}
