//! Hosted LLM platforms behind one generation interface

mod bam;
mod dataplatform;

pub use bam::BamProvider;
pub use dataplatform::DataplatformProvider;

use async_trait::async_trait;
use notewise_common::{AppConfig, LlmPlatform, NotewiseError, Result};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::params::{GenerationParams, ParamProfiles};

/// Common trait for LLM platforms
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Platform name reported by the health endpoint
    fn name(&self) -> &str;

    /// Parameter sets configured for this platform
    fn params(&self) -> &ParamProfiles;

    fn default_params(&self) -> &GenerationParams {
        &self.params().default
    }

    fn major_incident_params(&self) -> &GenerationParams {
        &self.params().major_incident
    }

    fn telemetry_params(&self) -> &GenerationParams {
        &self.params().telemetry
    }

    /// Generate one output per prompt, in prompt order
    async fn generate_text(
        &self,
        prompts: &[String],
        params: &GenerationParams,
    ) -> Result<Vec<String>>;
}

/// Build the provider selected by `PLATFORM`
pub fn provider_from_config(
    config: &AppConfig,
    params: ParamProfiles,
) -> Result<Arc<dyn LlmProvider>> {
    let client = http_client(config.llm_timeout_secs)?;

    let provider: Arc<dyn LlmProvider> = match config.platform {
        LlmPlatform::Bam => Arc::new(BamProvider::new(
            client,
            &config.bam_api_url,
            &config.bam_api_key,
            params,
        )),
        LlmPlatform::Dataplatform => Arc::new(DataplatformProvider::new(
            client,
            &config.wx_api_url,
            &config.wx_api_key,
            &config.wx_project_id,
            &config.wx_iam_url,
            params,
        )),
    };

    info!("LLM provider initialized: {}", provider.name());
    Ok(provider)
}

fn http_client(timeout_secs: u64) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| NotewiseError::config(format!("Failed to create HTTP client: {}", e)))
}

pub(crate) fn connection_error(e: impl std::fmt::Display) -> NotewiseError {
    NotewiseError::connection(format!(
        "Exception occurred while connecting to LLM platform: {}",
        e
    ))
}

pub(crate) fn generation_error(e: impl std::fmt::Display) -> NotewiseError {
    NotewiseError::generation(format!(
        "Exception occurred while generating text from LLM platform: {}",
        e
    ))
}

/// Map a reqwest failure onto the gateway error kinds
pub(crate) fn request_error(e: reqwest::Error) -> NotewiseError {
    if e.is_connect() || e.is_timeout() || e.is_request() {
        connection_error(e)
    } else {
        generation_error(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_selection() {
        let params = ParamProfiles::load(None).unwrap();
        let mut config = AppConfig::default();

        let provider = provider_from_config(&config, params.clone()).unwrap();
        assert_eq!(provider.name(), "bam");

        config.platform = LlmPlatform::Dataplatform;
        let provider = provider_from_config(&config, params).unwrap();
        assert_eq!(provider.name(), "dataplatform");
        assert_eq!(provider.major_incident_params().top_k, Some(50));
    }

    #[test]
    fn test_error_messages() {
        let err = connection_error("refused");
        assert_eq!(
            err.to_string(),
            "Exception occurred while connecting to LLM platform: refused"
        );
        assert_eq!(err.status_code(), 500);

        let err = generation_error("empty result");
        assert!(err
            .to_string()
            .starts_with("Exception occurred while generating text from LLM platform"));
    }
}
