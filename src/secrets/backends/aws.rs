//! AWS Secrets Manager backend implementation
//!
//! Fetches the secret bundle stored under `<environment>/<secret_key>` with a
//! single `GetSecretValue` call.
//!
//! ## Configuration
//!
//! Credentials and region come from the AWS default provider chain
//! (`AWS_ACCESS_KEY_ID`/`AWS_SECRET_ACCESS_KEY`, `AWS_PROFILE`, web identity,
//! ECS/EC2 instance metadata). [`SecretsSettings`] can pin the region and
//! point the client at a custom endpoint (LocalStack, VPC endpoints).
//!
//! ## Secret Format in AWS
//!
//! The secret must be a flat JSON object of strings:
//!
//! ```json
//! { "DB_USER": "admin", "DB_PASS": "s3cret" }
//! ```
//!
//! It may be stored either as `SecretBinary` or `SecretString`. When the
//! response carries both, `SecretBinary` is decoded.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_secretsmanager::config::{ProvideCredentials, Region};
use aws_sdk_secretsmanager::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_secretsmanager::operation::get_secret_value::GetSecretValueError;
use aws_sdk_secretsmanager::Client;
use tracing::{debug, error, info};

use super::backend::{BackendError, BackendResult, SecretBackendType, SecretStoreBackend};
use crate::config::SecretsSettings;
use crate::secrets::cached::CachedSecretClient;
use crate::secrets::error::{Result, SecretsError};
use crate::secrets::types::SecretPayload;

/// Error codes AWS returns when the caller's identity is rejected.
const ACCESS_DENIED_CODES: &[&str] = &[
    "AccessDeniedException",
    "UnrecognizedClientException",
    "ExpiredTokenException",
    "InvalidSignatureException",
];

/// AWS Secrets Manager backend
#[derive(Clone)]
pub struct AwsSecretsManagerBackend {
    client: Client,
}

impl std::fmt::Debug for AwsSecretsManagerBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsSecretsManagerBackend")
            .field("region", &self.client.config().region().map(|r| r.as_ref().to_string()))
            .field("client", &"[SecretsManagerClient]")
            .finish()
    }
}

impl AwsSecretsManagerBackend {
    /// Wrap an already-configured SDK client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Resolve AWS configuration through the default provider chain and build
    /// a client from it.
    ///
    /// Credentials are resolved once here, so a missing region or an empty
    /// credentials chain fails with [`SecretsError::Configuration`]. No
    /// Secrets Manager request is sent.
    pub async fn from_settings(settings: &SecretsSettings) -> Result<Self> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = settings.region.clone() {
            loader = loader.region(Region::new(region));
        }
        let shared_config = loader.load().await;

        let Some(region) = shared_config.region() else {
            error!("No AWS region configured; set AWS_REGION or SECRETSMANAGER_REGION");
            return Err(SecretsError::configuration(
                "AWS region could not be resolved from the environment",
            ));
        };
        let Some(credentials) = shared_config.credentials_provider() else {
            error!("No AWS credentials provider found in the default chain");
            return Err(SecretsError::configuration(
                "AWS credentials could not be resolved from the environment",
            ));
        };
        // The default chain always yields a provider; resolve once so an
        // empty chain fails here instead of on the first fetch.
        if let Err(e) = credentials.provide_credentials().await {
            error!(error = %DisplayErrorContext(&e), "AWS credentials could not be resolved");
            return Err(SecretsError::configuration(format!(
                "AWS credentials could not be resolved from the environment: {}",
                DisplayErrorContext(&e)
            )));
        }

        let mut builder = aws_sdk_secretsmanager::config::Builder::from(&shared_config);
        if let Some(endpoint) = settings.endpoint_url.as_deref() {
            builder = builder.endpoint_url(endpoint);
        }

        info!(
            region = %region,
            endpoint_url = ?settings.endpoint_url,
            "Initialized AWS Secrets Manager backend"
        );

        Ok(Self::new(Client::from_conf(builder.build())))
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

/// Classify a `GetSecretValue` failure.
fn classify_error<R>(secret_id: &str, err: &SdkError<GetSecretValueError, R>) -> BackendError
where
    R: std::fmt::Debug,
{
    let message = DisplayErrorContext(err).to_string();
    match err.as_service_error() {
        Some(service) if service.is_resource_not_found_exception() => {
            BackendError::not_found(secret_id)
        }
        Some(service) if service.code().is_some_and(|code| ACCESS_DENIED_CODES.contains(&code)) => {
            BackendError::access_denied(message)
        }
        _ => BackendError::transport(message),
    }
}

#[async_trait]
impl SecretStoreBackend for AwsSecretsManagerBackend {
    async fn get_secret_value(&self, secret_id: &str) -> BackendResult<SecretPayload> {
        debug!(secret_id = %secret_id, "Fetching secret from AWS Secrets Manager");

        match self.client.get_secret_value().secret_id(secret_id).send().await {
            Ok(output) => Ok(SecretPayload {
                binary: output.secret_binary().map(|blob| blob.as_ref().to_vec()),
                string: output.secret_string().map(str::to_owned),
            }),
            Err(e) => {
                let err = classify_error(secret_id, &e);
                error!(
                    secret_id = %secret_id,
                    error = %err,
                    "Failed to fetch secret from AWS Secrets Manager"
                );
                Err(err)
            }
        }
    }

    fn backend_type(&self) -> SecretBackendType {
        SecretBackendType::AwsSecretsManager
    }
}

impl CachedSecretClient<AwsSecretsManagerBackend> {
    /// Build a cached client for `<environment>/<secret_key>` backed by AWS
    /// Secrets Manager.
    ///
    /// Validates the settings and resolves AWS configuration; does not fetch
    /// anything. Call [`load_secrets`](crate::secrets::SecretClient::load_secrets)
    /// before the first lookup.
    pub async fn from_settings(settings: &SecretsSettings) -> Result<Self> {
        validator::Validate::validate(settings)?;
        let backend = AwsSecretsManagerBackend::from_settings(settings).await?;
        Ok(CachedSecretClient::new(settings.handle(), backend)
            .with_load_timeout(settings.load_timeout()))
    }
}
