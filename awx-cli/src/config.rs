//! Input handling
//!
//! Collects the CLI/environment inputs into one validated structure and
//! turns them into the immutable launch request.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use awx_client::{PollOptions, TowerConfig};
use awx_core::launch::{CloudCredentials, LaunchRequest, encode_certificate};

use crate::Cli;

/// Validated launcher inputs.
#[derive(Debug, Clone)]
pub struct Inputs {
    /// Tower connection settings shared by every stage.
    pub tower: TowerConfig,
    /// Job template identifier to launch.
    pub template_id: String,
    /// Optional cloud credentials forwarded as extra vars.
    pub credentials: CloudCredentials,
    /// Optional certificate file to base64-encode into an extra var.
    pub certificate_path: Option<PathBuf>,
    /// Raw additional extra-vars JSON text.
    pub additional_vars: String,
    /// Polling behavior.
    pub poll: PollOptions,
}

impl Inputs {
    pub fn from_cli(cli: Cli) -> Self {
        let mut tower = TowerConfig::new(cli.url, cli.username, cli.password);
        tower.verify_tls = cli.verify_tls;

        Self {
            tower,
            template_id: cli.template_id,
            credentials: CloudCredentials {
                subscription_id: cli.azure_subscription,
                client_id: cli.azure_client_id,
                client_secret: cli.azure_client_secret,
            },
            certificate_path: cli.certificate,
            additional_vars: cli.extra_vars,
            poll: PollOptions {
                interval: Duration::from_secs(cli.poll_interval),
                timeout: cli.timeout.map(Duration::from_secs),
            },
        }
    }

    /// Validates the inputs before anything touches the network.
    pub fn validate(&self) -> Result<()> {
        if !self.tower.url.starts_with("http://") && !self.tower.url.starts_with("https://") {
            anyhow::bail!("Tower URL must start with http:// or https://");
        }

        if self.tower.username.is_empty() {
            anyhow::bail!("username cannot be empty");
        }

        if self.tower.password.is_empty() {
            anyhow::bail!("password cannot be empty");
        }

        if self.template_id.is_empty() {
            anyhow::bail!("template id cannot be empty");
        }

        if self.poll.interval.as_secs() == 0 {
            anyhow::bail!("poll interval must be greater than 0");
        }

        Ok(())
    }

    /// Build the immutable launch request: read and encode the
    /// certificate if one was given, then merge all extra vars.
    pub fn build_launch_request(&self) -> Result<LaunchRequest> {
        let certificate_base64 = match &self.certificate_path {
            Some(path) => {
                let bytes = std::fs::read(path)
                    .with_context(|| format!("failed to read certificate {}", path.display()))?;
                Some(encode_certificate(&bytes))
            }
            None => None,
        };

        let request = LaunchRequest::new(
            &self.template_id,
            &self.credentials,
            certificate_base64.as_deref(),
            &self.additional_vars,
        )?;

        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_inputs() -> Inputs {
        Inputs {
            tower: TowerConfig::new("https://tower.example.com", "admin", "secret"),
            template_id: "12".to_string(),
            credentials: CloudCredentials::default(),
            certificate_path: None,
            additional_vars: "{}".to_string(),
            poll: PollOptions::default(),
        }
    }

    #[test]
    fn test_valid_inputs_pass() {
        assert!(valid_inputs().validate().is_ok());
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let mut inputs = valid_inputs();
        inputs.tower.url = "tower.example.com".to_string();
        assert!(inputs.validate().is_err());
    }

    #[test]
    fn test_empty_credentials_are_rejected() {
        let mut inputs = valid_inputs();
        inputs.tower.password = String::new();
        assert!(inputs.validate().is_err());

        let mut inputs = valid_inputs();
        inputs.tower.username = String::new();
        assert!(inputs.validate().is_err());
    }

    #[test]
    fn test_zero_poll_interval_is_rejected() {
        let mut inputs = valid_inputs();
        inputs.poll.interval = Duration::from_secs(0);
        assert!(inputs.validate().is_err());
    }

    #[test]
    fn test_invalid_extra_vars_fail_before_any_request() {
        let mut inputs = valid_inputs();
        inputs.additional_vars = "{broken".to_string();
        assert!(inputs.build_launch_request().is_err());
    }

    #[test]
    fn test_build_request_without_certificate() {
        let request = valid_inputs().build_launch_request().unwrap();
        assert_eq!(request.template_id, "12");
        assert!(request.extra_vars.is_empty());
    }
}
