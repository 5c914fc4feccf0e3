use thiserror::Error;

/// Errors that can occur during audio capture operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("permission denied")]
    PermissionDenied,

    #[error("device not available")]
    DeviceNotAvailable,

    #[error("configuration failed: {0}")]
    ConfigurationFailed(String),

    #[error("stream failed: {0}")]
    StreamFailed(String),

    /// The platform read returned a non-positive sample count.
    /// Carries the raw count where the backend has one.
    #[error("read failed with platform count {0}")]
    ReadFailed(i64),

    #[error("unknown error: {0}")]
    Unknown(String),
}
