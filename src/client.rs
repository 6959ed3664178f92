//! DynamoDB client module.
//!
//! [`DynamoClient`] is the AWS SDK implementation of [`BatchBackend`]. It
//! owns a tokio runtime and blocks on every SDK call, so each batch call
//! finishes before the next one starts. Do not call it from inside another
//! tokio runtime.

use aws_config::BehaviorVersion;
use aws_config::meta::region::RegionProviderChain;
use aws_config::profile::ProfileFileCredentialsProvider;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::config::Credentials;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing::debug;

use crate::backend::BatchBackend;
use crate::config::{ClientConfig, DEFAULT_REGION};
use crate::conversions::{
    from_sdk_batch_get_output, from_sdk_batch_write_output, to_sdk_create_table,
    to_sdk_request_items, to_sdk_write_items,
};
use crate::errors::{Error, Result, map_sdk_error};
use crate::table_operations::TableDefinition;
use crate::types::{BatchGetOutput, BatchGetRequest, BatchWriteOutput, BatchWriteRequest};

/// DynamoDB client with flexible credential configuration.
///
/// # Examples
///
/// ```no_run
/// use dynobatch::{ClientConfig, DynamoClient};
///
/// // Local endpoint (DynamoDB Local, localstack)
/// let config = ClientConfig {
///     endpoint_url: Some("http://localhost:8000".to_string()),
///     ..Default::default()
/// };
/// let client = DynamoClient::new(&config)?;
/// # Ok::<(), dynobatch::Error>(())
/// ```
pub struct DynamoClient {
    /// The underlying AWS SDK DynamoDB client.
    client: Client,
    /// Runtime the SDK futures are driven on.
    runtime: Arc<Runtime>,
    /// The configured AWS region.
    region: String,
}

impl DynamoClient {
    /// Create a new DynamoDB client.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid or the runtime cannot start.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let runtime = Runtime::new()
            .map_err(|e| Error::Runtime(format!("failed to create tokio runtime: {}", e)))?;

        let client = runtime.block_on(build_client(config));

        Ok(Self::from_sdk_client(client, Arc::new(runtime)))
    }

    /// Wrap an existing SDK client.
    ///
    /// The reported region is the one the SDK client was built with.
    pub fn from_sdk_client(client: Client, runtime: Arc<Runtime>) -> Self {
        let region = client
            .config()
            .region()
            .map(|r| r.to_string())
            .unwrap_or_else(|| DEFAULT_REGION.to_string());
        DynamoClient {
            client,
            runtime,
            region,
        }
    }

    /// Get the configured AWS region.
    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn sdk_client(&self) -> &Client {
        &self.client
    }

    /// Check if the client can connect to DynamoDB.
    ///
    /// Makes a one-table ListTables call.
    pub fn ping(&self) -> Result<bool> {
        let client = self.client.clone();
        self.runtime
            .block_on(async move { client.list_tables().limit(1).send().await })
            .map(|_| true)
            .map_err(map_sdk_error)
    }
}

impl BatchBackend for DynamoClient {
    fn batch_get(&self, request: &BatchGetRequest) -> Result<BatchGetOutput> {
        let request_items = to_sdk_request_items(request)?;
        let client = self.client.clone();

        let output = self
            .runtime
            .block_on(async move {
                client
                    .batch_get_item()
                    .set_request_items(Some(request_items))
                    .send()
                    .await
            })
            .map_err(map_sdk_error)?;

        Ok(from_sdk_batch_get_output(output))
    }

    fn batch_write(&self, request: &BatchWriteRequest) -> Result<BatchWriteOutput> {
        let request_items = to_sdk_write_items(request)?;
        let client = self.client.clone();

        let output = self
            .runtime
            .block_on(async move {
                client
                    .batch_write_item()
                    .set_request_items(Some(request_items))
                    .send()
                    .await
            })
            .map_err(map_sdk_error)?;

        from_sdk_batch_write_output(output)
    }

    fn create_table(&self, definition: &TableDefinition) -> Result<()> {
        let parts = to_sdk_create_table(definition)?;
        let client = self.client.clone();
        debug!(table = %parts.table_name, "create_table");

        self.runtime
            .block_on(async move {
                client
                    .create_table()
                    .table_name(parts.table_name)
                    .set_attribute_definitions(Some(parts.attribute_definitions))
                    .set_key_schema(Some(parts.key_schema))
                    .set_global_secondary_indexes(parts.global_secondary_indexes)
                    .set_local_secondary_indexes(parts.local_secondary_indexes)
                    .set_provisioned_throughput(parts.provisioned_throughput)
                    .billing_mode(parts.billing_mode)
                    .send()
                    .await
            })
            .map(|_| ())
            .map_err(map_sdk_error)
    }
}

/// Build the AWS SDK DynamoDB client from the config.
async fn build_client(config: &ClientConfig) -> Client {
    // Region priority: config > env var / provider chain > default
    let region_provider = RegionProviderChain::first_try(
        config
            .region
            .clone()
            .map(aws_sdk_dynamodb::config::Region::new),
    )
    .or_default_provider()
    .or_else(DEFAULT_REGION);

    let mut config_loader = aws_config::defaults(BehaviorVersion::latest()).region(region_provider);

    // Credentials priority: static > profile > env/default chain
    if let (Some(ak), Some(sk)) = (&config.access_key, &config.secret_key) {
        let creds = Credentials::new(
            ak,
            sk,
            config.session_token.clone(),
            None,
            "dynobatch-static",
        );
        config_loader = config_loader.credentials_provider(creds);
    } else if let Some(profile_name) = &config.profile {
        let profile_provider = ProfileFileCredentialsProvider::builder()
            .profile_name(profile_name)
            .build();
        config_loader = config_loader.credentials_provider(profile_provider);
    }

    let sdk_config = config_loader.load().await;

    let mut dynamo_config = aws_sdk_dynamodb::config::Builder::from(&sdk_config);

    if let Some(url) = &config.endpoint_url {
        dynamo_config = dynamo_config.endpoint_url(url);
    }

    Client::from_conf(dynamo_config.build())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_config(region: Option<&str>) -> ClientConfig {
        ClientConfig {
            region: region.map(str::to_string),
            access_key: Some("AKIDEXAMPLE".to_string()),
            secret_key: Some("secret".to_string()),
            endpoint_url: Some("http://localhost:8000".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_region_comes_from_built_client() {
        let client = DynamoClient::new(&offline_config(Some("eu-west-2"))).unwrap();
        assert_eq!(client.region(), "eu-west-2");
    }

    #[test]
    fn test_from_sdk_client_without_region_uses_default() {
        let runtime = Arc::new(Runtime::new().unwrap());
        let conf = aws_sdk_dynamodb::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .build();
        let client = DynamoClient::from_sdk_client(Client::from_conf(conf), runtime);
        assert_eq!(client.region(), DEFAULT_REGION);
    }

    #[test]
    fn test_invalid_config_rejected_before_build() {
        let config = ClientConfig {
            access_key: Some("AKIDEXAMPLE".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            DynamoClient::new(&config),
            Err(Error::InvalidConfig(_))
        ));
    }
}
