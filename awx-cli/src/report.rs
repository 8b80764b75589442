//! Output reporting and export
//!
//! Fetches the finished job's stdout, prints it according to the
//! terminal status, fails hard on `failed`/`error`, and exports the
//! resource name extracted from the text.

use std::fs::OpenOptions;
use std::io::Write as _;

use anyhow::{Context, Result};
use colored::*;

use awx_client::{ClientError, TowerClient};
use awx_core::job::{JobRecord, JobStatus};
use awx_core::output::extract_resource_name;

/// Fetch and print the job's output, then decide the overall outcome.
///
/// `failed` and `error` abort with an error naming the job even though
/// the fetch itself succeeded; `successful` returns the text for
/// extraction. Any other status reaching this point means status and
/// output retrieval disagree, which is reported but not fatal.
pub async fn report_job_output(client: &TowerClient, record: &JobRecord) -> Result<String> {
    let output = client.get_job_stdout(record).await?;

    println!("Final status: {}", colorize_status(record.status));

    match record.status {
        JobStatus::Failed => print_block("Ansible Tower error output", &output),
        JobStatus::Error => {
            print_block("Ansible Tower error output", &output);
            print_block(
                "Ansible Tower traceback output",
                record.result_traceback.as_deref().unwrap_or(""),
            );
        }
        JobStatus::Successful => print_block("Ansible Tower output", &output),
        _ => println!(
            "{}",
            "warning: job status and output retrieval look inconsistent".yellow()
        ),
    }

    match terminal_error(record) {
        Some(err) => Err(err.into()),
        None => Ok(output),
    }
}

/// Scan the output for a resource name and surface it to the caller.
///
/// When running as a GitHub Action (`GITHUB_OUTPUT` set) the name is
/// appended as the `RESOURCE_NAME` step output; otherwise it is only
/// printed. No match exports nothing and is not an error.
pub fn export_resource_name(output: &str) -> Result<()> {
    let Some(name) = extract_resource_name(output) else {
        println!(
            "{}",
            "warning: no resource name exported as output variable".yellow()
        );
        return Ok(());
    };

    if let Ok(path) = std::env::var("GITHUB_OUTPUT") {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("failed to open output file {path}"))?;
        writeln!(file, "RESOURCE_NAME={name}").context("failed to write output variable")?;
    }

    println!("Resource name exported: {}", name.green());

    Ok(())
}

/// Outcome error for a terminal record, if its status demands one.
fn terminal_error(record: &JobRecord) -> Option<ClientError> {
    match record.status {
        JobStatus::Failed => Some(ClientError::JobFailed { id: record.id }),
        JobStatus::Error => Some(ClientError::JobErrored { id: record.id }),
        _ => None,
    }
}

fn print_block(title: &str, body: &str) {
    println!("{}", format!("{title}:").bold());
    println!("{}", "─".repeat(80).dimmed());
    println!("{body}");
    println!("{}", "─".repeat(80).dimmed());
}

fn colorize_status(status: JobStatus) -> colored::ColoredString {
    let status_str = status.to_string();
    match status {
        JobStatus::Successful => status_str.green(),
        JobStatus::Failed | JobStatus::Error => status_str.red(),
        _ => status_str.yellow(),
    }
}
