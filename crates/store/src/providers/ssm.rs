//! AWS Systems Manager Parameter Store backend.
//!
//! Credentials and region resolve through the standard AWS chain
//! (environment, shared config, instance profile), with optional overrides.
//! SSM API: https://docs.aws.amazon.com/systems-manager/latest/APIReference/

use crate::store::{Lookup, ParameterStore};
use aws_config::BehaviorVersion;
use aws_sdk_ssm::error::DisplayErrorContext;
use aws_sdk_ssm::types::ParameterType;
use aws_sdk_ssm::Client;
use paramconf_core::{AppError, AppResult};

/// SSM Parameter Store client.
pub struct SsmStore {
    client: Client,
}

impl SsmStore {
    /// Build a client from the default AWS configuration chain.
    ///
    /// # Arguments
    /// * `region` - Optional region overriding `AWS_REGION` / shared config
    /// * `profile` - Optional shared-config profile name
    pub async fn from_env(region: Option<&str>, profile: Option<&str>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(region) = region {
            loader = loader.region(aws_config::Region::new(region.to_string()));
        }

        if let Some(profile) = profile {
            loader = loader.profile_name(profile);
        }

        let sdk_config = loader.load().await;
        tracing::debug!("SSM client region: {:?}", sdk_config.region());

        Self::with_client(Client::new(&sdk_config))
    }

    /// Wrap an already configured SDK client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl ParameterStore for SsmStore {
    fn store_name(&self) -> &str {
        "ssm"
    }

    async fn put(&self, name: &str, value: &str, description: &str) -> AppResult<()> {
        tracing::debug!("PutParameter {}", name);

        self.client
            .put_parameter()
            .name(name)
            .value(value)
            .r#type(ParameterType::String)
            .overwrite(true)
            .description(description)
            .send()
            .await
            .map_err(|e| {
                AppError::Store(format!(
                    "Failed to put parameter {}: {}",
                    name,
                    DisplayErrorContext(&e)
                ))
            })?;

        Ok(())
    }

    async fn get(&self, name: &str) -> AppResult<Lookup> {
        tracing::debug!("GetParameter {}", name);

        match self.client.get_parameter().name(name).send().await {
            Ok(output) => Ok(output
                .parameter()
                .and_then(|p| p.value())
                .map(|v| Lookup::Found(v.to_string()))
                .unwrap_or(Lookup::NotFound)),
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_parameter_not_found() {
                    Ok(Lookup::NotFound)
                } else {
                    Err(AppError::Store(format!(
                        "Failed to get parameter {}: {}",
                        name,
                        DisplayErrorContext(&service_err)
                    )))
                }
            }
        }
    }

    async fn delete(&self, names: &[String]) -> AppResult<Vec<String>> {
        tracing::debug!("DeleteParameters {:?}", names);

        let output = self
            .client
            .delete_parameters()
            .set_names(Some(names.to_vec()))
            .send()
            .await
            .map_err(|e| {
                AppError::Store(format!(
                    "Failed to delete parameters: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        if !output.invalid_parameters().is_empty() {
            tracing::debug!("Not deleted: {:?}", output.invalid_parameters());
        }

        Ok(output.deleted_parameters().to_vec())
    }
}
