//! Job domain types
//!
//! Shapes of the Tower API responses the launcher cares about: the
//! launch acknowledgement and the job record returned while polling.

use serde::{Deserialize, Serialize};

/// Job execution status as reported by the Tower API.
///
/// Tower reports more statuses than the launcher distinguishes; only the
/// terminal set matters for control flow, everything else keeps the
/// poller looping. Unrecognized values map to [`JobStatus::Unknown`] and
/// are treated as non-terminal, matching the server's own convention of
/// adding in-progress statuses over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    New,
    Pending,
    Waiting,
    Running,
    Successful,
    Failed,
    Error,
    Canceled,
    #[serde(other)]
    Unknown,
}

impl JobStatus {
    /// Whether this status ends polling.
    ///
    /// Terminal set = {successful, failed, error}. Note that `canceled`
    /// is deliberately non-terminal here: the upstream behavior this
    /// preserves only ever stopped on these three values.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Successful | Self::Failed | Self::Error)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::New => "new",
            Self::Pending => "pending",
            Self::Waiting => "waiting",
            Self::Running => "running",
            Self::Successful => "successful",
            Self::Failed => "failed",
            Self::Error => "error",
            Self::Canceled => "canceled",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Response to a successful template launch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchedJob {
    /// Numeric id of the created job.
    pub job: u64,
    /// Initial status of the job (usually `pending`).
    pub status: JobStatus,
    /// API path of the job record, used for polling. Relative to the
    /// server base URL.
    pub url: String,
}

/// Job record returned by the job's self URL.
///
/// Fetched fresh on every poll and discarded once a terminal record is
/// obtained; only the terminal record is read beyond `status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: u64,
    pub status: JobStatus,
    /// API path of this record.
    #[serde(default)]
    pub url: String,
    /// Links to related resources, most importantly the stdout text.
    #[serde(default)]
    pub related: RelatedLinks,
    /// Python traceback filled in by Tower when the job errored.
    #[serde(default)]
    pub result_traceback: Option<String>,
}

/// Related-resource links embedded in a job record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelatedLinks {
    /// API path of the job's stdout resource.
    #[serde(default)]
    pub stdout: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_statuses() {
        assert!(JobStatus::Successful.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
        assert!(JobStatus::Error.is_terminal());

        assert!(!JobStatus::New.is_terminal());
        assert!(!JobStatus::Pending.is_terminal());
        assert!(!JobStatus::Waiting.is_terminal());
        assert!(!JobStatus::Running.is_terminal());
        assert!(!JobStatus::Canceled.is_terminal());
        assert!(!JobStatus::Unknown.is_terminal());
    }

    #[test]
    fn test_status_deserializes_lowercase() {
        let status: JobStatus = serde_json::from_str("\"running\"").unwrap();
        assert_eq!(status, JobStatus::Running);

        let status: JobStatus = serde_json::from_str("\"successful\"").unwrap();
        assert_eq!(status, JobStatus::Successful);
    }

    #[test]
    fn test_unrecognized_status_is_unknown() {
        let status: JobStatus = serde_json::from_str("\"paused\"").unwrap();
        assert_eq!(status, JobStatus::Unknown);
        assert!(!status.is_terminal());
    }

    #[test]
    fn test_launched_job_deserialization() {
        let body = r#"{"job": 7, "status": "pending", "url": "/api/v2/jobs/7/"}"#;
        let launched: LaunchedJob = serde_json::from_str(body).unwrap();
        assert_eq!(launched.job, 7);
        assert_eq!(launched.status, JobStatus::Pending);
        assert_eq!(launched.url, "/api/v2/jobs/7/");
    }

    #[test]
    fn test_job_record_with_related_stdout() {
        let body = r#"{
            "id": 42,
            "status": "successful",
            "url": "/api/v2/jobs/42/",
            "related": {"stdout": "/api/v2/jobs/42/stdout/"},
            "result_traceback": ""
        }"#;
        let record: JobRecord = serde_json::from_str(body).unwrap();
        assert_eq!(record.id, 42);
        assert_eq!(record.status, JobStatus::Successful);
        assert_eq!(record.related.stdout, "/api/v2/jobs/42/stdout/");
    }

    #[test]
    fn test_job_record_tolerates_missing_related() {
        let body = r#"{"id": 42, "status": "running"}"#;
        let record: JobRecord = serde_json::from_str(body).unwrap();
        assert_eq!(record.status, JobStatus::Running);
        assert!(record.related.stdout.is_empty());
        assert!(record.result_traceback.is_none());
    }
}
