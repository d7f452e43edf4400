use async_trait::async_trait;
use futures::future::try_join_all;
use notewise_common::Result;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use super::{generation_error, request_error, LlmProvider};
use crate::params::{GenerationParams, ParamProfiles};

const API_VERSION: &str = "2023-05-29";
const IAM_GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

/// Refresh the IAM token this long before it expires
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// watsonx.ai text generation client
pub struct DataplatformProvider {
    client: Client,
    base_url: String,
    api_key: String,
    project_id: String,
    iam_url: String,
    params: ParamProfiles,
    token: Mutex<Option<CachedToken>>,
}

struct CachedToken {
    value: String,
    expires_at: Instant,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    model_id: &'a str,
    input: &'a str,
    project_id: &'a str,
    parameters: WxParameters<'a>,
}

#[derive(Debug, Serialize)]
struct WxParameters<'a> {
    decoding_method: &'a str,
    max_new_tokens: u32,
    min_new_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    repetition_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    random_seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    #[serde(default)]
    results: Vec<GeneratedResult>,
}

#[derive(Debug, Deserialize)]
struct GeneratedResult {
    generated_text: String,
}

impl<'a> From<&'a GenerationParams> for WxParameters<'a> {
    fn from(params: &'a GenerationParams) -> Self {
        Self {
            decoding_method: &params.decoding_method,
            max_new_tokens: params.max_new_tokens,
            min_new_tokens: params.min_new_tokens,
            repetition_penalty: params.repetition_penalty,
            temperature: params.temperature,
            top_k: params.top_k,
            random_seed: params.random_seed,
        }
    }
}

impl DataplatformProvider {
    pub fn new(
        client: Client,
        base_url: &str,
        api_key: &str,
        project_id: &str,
        iam_url: &str,
        params: ParamProfiles,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            project_id: project_id.to_string(),
            iam_url: iam_url.to_string(),
            params,
            token: Mutex::new(None),
        }
    }

    /// Bearer token, exchanged with IAM when missing or about to expire
    async fn access_token(&self) -> Result<String> {
        let mut cached = self.token.lock().await;

        if let Some(token) = cached.as_ref() {
            if Instant::now() < token.expires_at {
                return Ok(token.value.clone());
            }
        }

        debug!("Requesting IAM access token");
        let response = self
            .client
            .post(&self.iam_url)
            .form(&[("grant_type", IAM_GRANT_TYPE), ("apikey", self.api_key.as_str())])
            .send()
            .await
            .map_err(request_error)?
            .error_for_status()
            .map_err(generation_error)?;

        let body: TokenResponse = response.json().await.map_err(generation_error)?;
        let lifetime = Duration::from_secs(body.expires_in).saturating_sub(TOKEN_REFRESH_MARGIN);
        info!("IAM access token refreshed, valid for {}s", lifetime.as_secs());

        *cached = Some(CachedToken {
            value: body.access_token.clone(),
            expires_at: Instant::now() + lifetime,
        });

        Ok(body.access_token)
    }

    async fn generate_one(&self, token: &str, prompt: &str, params: &GenerationParams) -> Result<String> {
        let url = format!(
            "{}/ml/v1/text/generation?version={}",
            self.base_url, API_VERSION
        );
        let request = GenerationRequest {
            model_id: &params.model,
            input: prompt,
            project_id: &self.project_id,
            parameters: params.into(),
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&request)
            .send()
            .await
            .map_err(request_error)?
            .error_for_status()
            .map_err(generation_error)?;

        let body: GenerationResponse = response.json().await.map_err(generation_error)?;
        body.results
            .into_iter()
            .next()
            .map(|result| result.generated_text)
            .ok_or_else(|| generation_error("empty result list"))
    }
}

#[async_trait]
impl LlmProvider for DataplatformProvider {
    fn name(&self) -> &str {
        "dataplatform"
    }

    fn params(&self) -> &ParamProfiles {
        &self.params
    }

    #[instrument(skip_all, fields(model = %params.model, prompts = prompts.len()))]
    async fn generate_text(
        &self,
        prompts: &[String],
        params: &GenerationParams,
    ) -> Result<Vec<String>> {
        let token = self.access_token().await?;

        debug!(
            "Sending generation requests to watsonx - Model: {}, Prompts: {}",
            params.model,
            prompts.len()
        );

        try_join_all(
            prompts
                .iter()
                .map(|prompt| self.generate_one(&token, prompt, params)),
        )
        .await
    }
}
