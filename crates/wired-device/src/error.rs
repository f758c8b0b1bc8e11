//! Error types for device control.

use thiserror::Error;

/// Result type for device operations.
pub type Result<T> = std::result::Result<T, DeviceError>;

/// Errors surfaced by device control.
///
/// Service-control command failures are deliberately absent: submitting
/// `systemctl` commands is best-effort and reports through
/// [`SubmitStatus`](crate::services::SubmitStatus) instead of an error.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Asset download failed.
    #[error("download failed: {0}")]
    Download(#[from] reqwest::Error),

    /// Asset archive could not be unpacked or swapped into place.
    #[error("asset restore failed: {0}")]
    Asset(String),

    /// A readiness poll did not reach the wanted state in time.
    #[error("timed out waiting for services to be {0}")]
    Timeout(&'static str),
}
