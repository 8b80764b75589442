//! Launch request construction
//!
//! Builds the extra-vars mapping sent to the template launch endpoint:
//! auto-derived cloud credential keys first, then the caller-supplied
//! additional vars on top (last write wins). The certificate value is
//! base64 of the raw file bytes and is masked whenever the mapping is
//! shown to the operator.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Map, Value};
use thiserror::Error;

/// Extra-var key for the Azure subscription id.
pub const VAR_AZURE_SUBSCRIPTION: &str = "var_azure_rm_subid";
/// Extra-var key for the Azure client id.
pub const VAR_AZURE_CLIENT_ID: &str = "AZURE_RM_CLIENTID";
/// Extra-var key for the Azure client secret.
pub const VAR_AZURE_CLIENT_SECRET: &str = "AZURE_RM_SECRET";
/// Extra-var key for the application gateway SSL certificate blob.
pub const VAR_CERTIFICATE: &str = "var_applicationGatewayFrontEndSslCertData";

/// Fixed mask shown in place of the certificate value.
const CERTIFICATE_MASK: &str = "*************";

/// Result type alias for launch-request construction.
pub type Result<T> = std::result::Result<T, ExtraVarsError>;

/// Errors raised while building the extra-vars mapping.
///
/// These are user-facing input errors, distinct from anything the
/// network layer can produce: no request is sent once one is raised.
#[derive(Debug, Error)]
pub enum ExtraVarsError {
    /// The additional-vars text did not parse as JSON.
    #[error("extra vars have an invalid format, please provide a valid JSON")]
    InvalidJson(#[source] serde_json::Error),

    /// The additional-vars text parsed, but is not a JSON object.
    #[error("extra vars must be a JSON object")]
    NotAnObject,
}

/// Optional cloud credentials forwarded to the template as extra vars.
///
/// Only the fields that are present end up in the mapping.
#[derive(Debug, Clone, Default)]
pub struct CloudCredentials {
    pub subscription_id: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

/// A fully constructed template launch request.
///
/// Immutable once built; construction happens entirely before the first
/// network call.
#[derive(Debug, Clone)]
pub struct LaunchRequest {
    /// Job template identifier on the Tower server.
    pub template_id: String,
    /// Merged extra-vars mapping posted with the launch.
    pub extra_vars: Map<String, Value>,
}

impl LaunchRequest {
    pub fn new(
        template_id: impl Into<String>,
        credentials: &CloudCredentials,
        certificate_base64: Option<&str>,
        additional_vars: &str,
    ) -> Result<Self> {
        Ok(Self {
            template_id: template_id.into(),
            extra_vars: build_extra_vars(credentials, certificate_base64, additional_vars)?,
        })
    }

    /// Copy of the extra vars safe to show the operator: the certificate
    /// blob, if present, is replaced by a fixed mask.
    pub fn redacted_vars(&self) -> Map<String, Value> {
        let mut vars = self.extra_vars.clone();
        if let Some(value) = vars.get_mut(VAR_CERTIFICATE) {
            *value = Value::String(CERTIFICATE_MASK.to_string());
        }
        vars
    }
}

/// Encode certificate file bytes for transport as an extra var.
pub fn encode_certificate(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Merge auto-derived credential keys with the caller-supplied JSON.
///
/// The additional vars are merged last so they override any auto-derived
/// key on collision.
pub fn build_extra_vars(
    credentials: &CloudCredentials,
    certificate_base64: Option<&str>,
    additional_vars: &str,
) -> Result<Map<String, Value>> {
    let additional: Value =
        serde_json::from_str(additional_vars).map_err(ExtraVarsError::InvalidJson)?;
    let Value::Object(additional) = additional else {
        return Err(ExtraVarsError::NotAnObject);
    };

    let mut vars = Map::new();

    if let Some(subscription) = &credentials.subscription_id {
        vars.insert(
            VAR_AZURE_SUBSCRIPTION.to_string(),
            Value::String(subscription.clone()),
        );
    }
    if let Some(client_id) = &credentials.client_id {
        vars.insert(
            VAR_AZURE_CLIENT_ID.to_string(),
            Value::String(client_id.clone()),
        );
    }
    if let Some(client_secret) = &credentials.client_secret {
        vars.insert(
            VAR_AZURE_CLIENT_SECRET.to_string(),
            Value::String(client_secret.clone()),
        );
    }
    if let Some(cert) = certificate_base64 {
        vars.insert(VAR_CERTIFICATE.to_string(), Value::String(cert.to_string()));
    }

    for (key, value) in additional {
        vars.insert(key, value);
    }

    Ok(vars)
}
