//! Status polling
//!
//! Level-triggered poll loop: fetch the job record, stop on a terminal
//! status, otherwise sleep a fixed interval and fetch again. Written as
//! an explicit loop so long-running jobs cannot grow the stack, with an
//! optional overall deadline as the cancellation hook.

use std::time::Duration;

use tokio::time::{Instant, sleep};
use tracing::info;

use crate::TowerClient;
use crate::error::{ClientError, Result};
use awx_core::job::JobRecord;

/// Polling behavior.
#[derive(Debug, Clone)]
pub struct PollOptions {
    /// Fixed delay between status fetches. No backoff growth.
    pub interval: Duration,
    /// Overall deadline for reaching a terminal status. `None` polls
    /// forever, which matches the historical behavior of this tool and
    /// relies on external process termination for cancellation.
    pub timeout: Option<Duration>,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            timeout: None,
        }
    }
}

impl TowerClient {
    /// Poll the job's self URL until it reaches a terminal status.
    ///
    /// Returns the full terminal record. Non-terminal statuses (and
    /// statuses the client does not recognize) log the in-progress
    /// state and retry after the fixed interval, without an attempt
    /// cap unless a deadline is set.
    pub async fn wait_for_job(&self, job_url: &str, options: &PollOptions) -> Result<JobRecord> {
        let started = Instant::now();

        loop {
            let record = self.get_job(job_url).await?;

            if record.status.is_terminal() {
                return Ok(record);
            }

            info!(job_id = record.id, status = %record.status, "job still in progress");

            if let Some(limit) = options.timeout {
                if started.elapsed() + options.interval >= limit {
                    return Err(ClientError::TimedOut {
                        waited_secs: started.elapsed().as_secs(),
                    });
                }
            }

            sleep(options.interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = PollOptions::default();
        assert_eq!(options.interval, Duration::from_secs(10));
        assert!(options.timeout.is_none());
    }
}
