//! AWX Launch CLI
//!
//! Launches a job template on an AWX / Ansible Tower server, waits for
//! the job to finish, prints its output and exports the resource name
//! found in that output for the calling pipeline.
//!
//! The flow is strictly linear: build the launch request, launch, poll
//! to a terminal status, report the output, extract the resource name.

mod config;
mod report;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use colored::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use awx_client::TowerClient;
use config::Inputs;

#[derive(Parser)]
#[command(name = "awx-launch")]
#[command(about = "Launch an AWX/Ansible Tower job template and wait for it", long_about = None)]
struct Cli {
    /// Tower server base URL
    #[arg(long, env = "TOWER_URL")]
    url: String,

    /// Tower username (basic auth)
    #[arg(long, env = "TOWER_USERNAME")]
    username: String,

    /// Tower password (basic auth)
    #[arg(long, env = "TOWER_PASSWORD", hide_env_values = true)]
    password: String,

    /// Job template identifier to launch
    #[arg(long, env = "TOWER_TEMPLATE_ID")]
    template_id: String,

    /// Azure subscription id, forwarded as an extra var
    #[arg(long, env = "AZURE_SUBSCRIPTION_ID")]
    azure_subscription: Option<String>,

    /// Azure client id, forwarded as an extra var
    #[arg(long, env = "AZURE_CLIENT_ID")]
    azure_client_id: Option<String>,

    /// Azure client secret, forwarded as an extra var
    #[arg(long, env = "AZURE_CLIENT_SECRET", hide_env_values = true)]
    azure_client_secret: Option<String>,

    /// Path to a certificate file, base64-encoded into an extra var
    #[arg(long, env = "TOWER_CERTIFICATE_PATH")]
    certificate: Option<PathBuf>,

    /// Additional extra vars as a JSON object; overrides derived keys
    #[arg(long, env = "TOWER_EXTRA_VARS", default_value = "{}")]
    extra_vars: String,

    /// Seconds between status polls
    #[arg(long, env = "TOWER_POLL_INTERVAL", default_value_t = 10)]
    poll_interval: u64,

    /// Overall deadline in seconds; absent means wait forever
    #[arg(long, env = "TOWER_TIMEOUT")]
    timeout: Option<u64>,

    /// Verify the server TLS certificate
    #[arg(long, env = "TOWER_VERIFY_TLS")]
    verify_tls: bool,
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "awx_cli=info,awx_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let inputs = Inputs::from_cli(cli);
    inputs.validate()?;

    // The launch request is fully built, and its extra-vars JSON
    // validated, before any network call.
    let request = inputs.build_launch_request()?;

    println!("Ansible Tower: {}", inputs.tower.url.cyan());
    println!("{}", "extra-vars:".bold());
    println!(
        "{}",
        serde_json::to_string_pretty(&request.redacted_vars())?
    );

    let client = TowerClient::new(&inputs.tower)?;

    println!(
        "Launching template {} on Ansible Tower...",
        request.template_id.cyan()
    );
    let launched = client.launch_job(&request).await?;
    println!(
        "Template {} launched successfully.",
        request.template_id.cyan()
    );
    println!(
        "Job {} was created on Ansible Tower: status {}.",
        launched.job.to_string().cyan(),
        launched.status
    );

    let record = client.wait_for_job(&launched.url, &inputs.poll).await?;

    let output = report::report_job_output(&client, &record).await?;
    report::export_resource_name(&output)?;

    Ok(())
}
