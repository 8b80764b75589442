//! Job-related API endpoints
//!
//! Launch, status fetch and stdout fetch. Response bodies are
//! classified by pure functions so the detail/unrecognized branches are
//! testable without a server.

use serde_json::Value;
use tracing::{debug, error};

use crate::TowerClient;
use crate::error::{ClientError, Result};
use awx_core::job::{JobRecord, LaunchedJob};
use awx_core::launch::LaunchRequest;

impl TowerClient {
    /// Launch a job template.
    ///
    /// POSTs the merged extra vars to the template's launch endpoint and
    /// returns the created job's id, initial status and polling URL.
    pub async fn launch_job(&self, request: &LaunchRequest) -> Result<LaunchedJob> {
        let url = self.absolute_url(&format!(
            "api/v2/job_templates/{}/launch/",
            request.template_id
        ));
        debug!(template_id = %request.template_id, %url, "launching job template");

        let body = serde_json::json!({ "extra_vars": request.extra_vars });
        let response = self.post(&url).json(&body).send().await?;
        let text = response.text().await?;

        classify_launch_response(&request.template_id, &text)
    }

    /// Fetch the current job record from its self URL.
    pub async fn get_job(&self, job_url: &str) -> Result<JobRecord> {
        let url = self.absolute_url(job_url);
        let response = self.get(&url).send().await?;
        let text = response.text().await?;

        classify_status_response(&text)
    }

    /// Fetch the job's stdout as plain text.
    pub async fn get_job_stdout(&self, record: &JobRecord) -> Result<String> {
        let url = format!("{}?format=txt", self.absolute_url(&record.related.stdout));
        let response = self.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.text().await?)
    }
}

/// Decide what a launch response body means.
///
/// A body with a `job` id is a successful launch; a body with a `detail`
/// is an explicit rejection; anything else is an unusable response and
/// gets logged raw for diagnosis.
fn classify_launch_response(template_id: &str, body: &str) -> Result<LaunchedJob> {
    let value: Value = serde_json::from_str(body).unwrap_or(Value::Null);

    if value.get("job").is_some() {
        return serde_json::from_value(value)
            .map_err(|_| unavailable_launch(template_id, body));
    }

    if let Some(detail) = value.get("detail").and_then(Value::as_str) {
        return Err(ClientError::LaunchRejected {
            template_id: template_id.to_string(),
            detail: detail.to_string(),
        });
    }

    Err(unavailable_launch(template_id, body))
}

fn unavailable_launch(template_id: &str, body: &str) -> ClientError {
    error!(%template_id, raw_response = %body, "unrecognized launch response");
    ClientError::LaunchUnavailable {
        template_id: template_id.to_string(),
    }
}

/// Decide what a status poll response body means.
///
/// Any body with a `status` field is a job record (unrecognized status
/// strings still poll as non-terminal); a `detail` is an explicit
/// rejection; anything else is unusable and gets logged raw.
fn classify_status_response(body: &str) -> Result<JobRecord> {
    let value: Value = serde_json::from_str(body).unwrap_or(Value::Null);

    if value.get("status").is_some() {
        return serde_json::from_value(value).map_err(|_| unavailable_status(body));
    }

    if let Some(detail) = value.get("detail").and_then(Value::as_str) {
        return Err(ClientError::StatusRejected {
            detail: detail.to_string(),
        });
    }

    Err(unavailable_status(body))
}

fn unavailable_status(body: &str) -> ClientError {
    error!(raw_response = %body, "unrecognized job status response");
    ClientError::StatusUnavailable
}

#[cfg(test)]
mod tests {
    use super::*;
    use awx_core::job::JobStatus;

    #[test]
    fn test_launch_response_with_job_id() {
        let body = r#"{"job": 7, "status": "pending", "url": "u"}"#;
        let launched = classify_launch_response("12", body).unwrap();
        assert_eq!(launched.job, 7);
        assert_eq!(launched.status, JobStatus::Pending);
        assert_eq!(launched.url, "u");
    }

    #[test]
    fn test_launch_response_with_detail() {
        let body = r#"{"detail": "no permission"}"#;
        let err = classify_launch_response("12", body).unwrap_err();
        match err {
            ClientError::LaunchRejected {
                template_id,
                detail,
            } => {
                assert_eq!(template_id, "12");
                assert_eq!(detail, "no permission");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unrecognized_launch_response() {
        for body in ["{}", "<html>proxy error</html>", ""] {
            let err = classify_launch_response("12", body).unwrap_err();
            assert!(matches!(err, ClientError::LaunchUnavailable { .. }));
        }
    }

    #[test]
    fn test_status_response_with_status() {
        let body = r#"{"id": 7, "status": "running"}"#;
        let record = classify_status_response(body).unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.status, JobStatus::Running);
        assert!(!record.status.is_terminal());
    }

    #[test]
    fn test_terminal_status_response() {
        let body = r#"{
            "id": 7,
            "status": "successful",
            "related": {"stdout": "/api/v2/jobs/7/stdout/"}
        }"#;
        let record = classify_status_response(body).unwrap();
        assert!(record.status.is_terminal());
        assert_eq!(record.related.stdout, "/api/v2/jobs/7/stdout/");
    }

    #[test]
    fn test_status_response_with_detail() {
        let body = r#"{"detail": "Not found."}"#;
        let err = classify_status_response(body).unwrap_err();
        match err {
            ClientError::StatusRejected { detail } => assert_eq!(detail, "Not found."),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unrecognized_status_response() {
        let err = classify_status_response("<html></html>").unwrap_err();
        assert!(matches!(err, ClientError::StatusUnavailable));
    }
}
