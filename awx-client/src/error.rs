//! Error types for the Tower client

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while driving a job on the Tower server.
///
/// The `detail`-carrying variants relay the server's own explanation
/// verbatim; the `Unavailable` variants cover responses the client
/// cannot interpret at all (the raw body is logged at the call site).
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport failure.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server rejected the launch with an explicit detail message.
    #[error("template {template_id} couldn't be launched: {detail}")]
    LaunchRejected { template_id: String, detail: String },

    /// The launch response carried neither a job id nor a detail.
    #[error("template {template_id} couldn't be launched, the Tower API is not working")]
    LaunchUnavailable { template_id: String },

    /// The server rejected a status poll with an explicit detail message.
    #[error("failed to get job status from Tower: {detail}")]
    StatusRejected { detail: String },

    /// The poll response carried neither a status nor a detail.
    #[error("failed to get job status from Tower")]
    StatusUnavailable,

    /// The job reached the `failed` terminal status.
    #[error("Tower job {id} execution failed")]
    JobFailed { id: u64 },

    /// The job reached the `error` terminal status.
    #[error("an error occurred on Tower while running job {id}")]
    JobErrored { id: u64 },

    /// The optional polling deadline elapsed before a terminal status.
    #[error("timed out after {waited_secs}s waiting for job to finish")]
    TimedOut { waited_secs: u64 },

    /// Any other non-success API response.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}
