//! Client configuration.
//!
//! Every field is optional so a config file only needs the values it
//! overrides. Credentials follow the usual priority:
//! 1. Static credentials (access_key, secret_key, session_token)
//! 2. AWS profile from ~/.aws/credentials
//! 3. The default chain (environment variables, instance profile, etc.)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::batch_operations::BatchSettings;
use crate::errors::{Error, Result};

/// Region used when nothing else is configured.
pub const DEFAULT_REGION: &str = "us-east-1";

#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub region: Option<String>,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub session_token: Option<String>,
    pub profile: Option<String>,
    /// Custom endpoint, e.g. DynamoDB Local or localstack.
    pub endpoint_url: Option<String>,
    pub batch: BatchSettings,
}

impl ClientConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::InvalidConfig(format!("bad JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            Error::InvalidConfig(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if self.access_key.is_some() != self.secret_key.is_some() {
            return Err(Error::InvalidConfig(
                "access_key and secret_key must be set together".to_string(),
            ));
        }
        self.batch.validate()
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("ClientConfig")
            .field("region", &self.region)
            .field("access_key", &redact(&self.access_key))
            .field("secret_key", &redact(&self.secret_key))
            .field("session_token", &redact(&self.session_token))
            .field("profile", &self.profile)
            .field("endpoint_url", &self.endpoint_url)
            .field("batch", &self.batch)
            .finish()
    }
}
