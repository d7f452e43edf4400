use async_trait::async_trait;
use notewise_common::Result;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{generation_error, request_error, LlmProvider};
use crate::params::{GenerationParams, ParamProfiles};

/// IBM Research BAM client
pub struct BamProvider {
    client: Client,
    base_url: String,
    api_key: String,
    params: ParamProfiles,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model_id: &'a str,
    inputs: &'a [String],
    parameters: BamParameters<'a>,
}

#[derive(Debug, Serialize)]
struct BamParameters<'a> {
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
    return_options: ReturnOptions,
}

#[derive(Debug, Serialize)]
struct ReturnOptions {
    input_text: bool,
    input_tokens: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    results: Vec<GeneratedResult>,
}

#[derive(Debug, Deserialize)]
struct GeneratedResult {
    generated_text: String,
}

impl<'a> GenerateRequest<'a> {
    fn new(prompts: &'a [String], params: &'a GenerationParams) -> Self {
        Self {
            model_id: &params.model,
            inputs: prompts,
            parameters: BamParameters {
                decoding_method: &params.decoding_method,
                max_new_tokens: params.max_new_tokens,
                min_new_tokens: params.min_new_tokens,
                repetition_penalty: params.repetition_penalty,
                temperature: params.temperature,
                top_k: params.top_k,
                random_seed: params.random_seed,
                return_options: ReturnOptions {
                    input_text: params.input_text,
                    input_tokens: params.input_tokens,
                },
            },
        }
    }
}

impl BamProvider {
    pub fn new(client: Client, base_url: &str, api_key: &str, params: ParamProfiles) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            params,
        }
    }
}

#[async_trait]
impl LlmProvider for BamProvider {
    fn name(&self) -> &str {
        "bam"
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
        let url = format!("{}/v1/generate", self.base_url);
        let request = GenerateRequest::new(prompts, params);

        debug!(
            "Sending generate request to BAM - Model: {}, Prompts: {}",
            params.model,
            prompts.len()
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(request_error)?
            .error_for_status()
            .map_err(generation_error)?;

        let body: GenerateResponse = response.json().await.map_err(generation_error)?;

        if body.results.len() != prompts.len() {
            return Err(generation_error(format!(
                "expected {} results, got {}",
                prompts.len(),
                body.results.len()
            )));
        }

        Ok(body
            .results
            .into_iter()
            .map(|result| result.generated_text)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notewise_common::NotewiseError;

    #[test]
    fn test_request_body_shape() {
        let profiles = ParamProfiles::load(None).unwrap();
        let prompts = vec!["one".to_string(), "two".to_string()];
        let request = GenerateRequest::new(&prompts, &profiles.default);
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["model_id"], profiles.default.model.as_str());
        assert_eq!(value["inputs"], serde_json::json!(["one", "two"]));
        assert_eq!(value["parameters"]["decoding_method"], "greedy");
        assert_eq!(value["parameters"]["return_options"]["input_text"], false);
        assert!(value["parameters"].get("top_k").is_none());
    }

    #[test]
    fn test_response_parse() {
        let body: GenerateResponse = serde_json::from_str(
            r#"{"model_id": "m", "results": [{"generated_text": "done", "stop_reason": "eos"}]}"#,
        )
        .unwrap();
        assert_eq!(body.results[0].generated_text, "done");
    }

    #[tokio::test]
    async fn test_unreachable_platform() {
        let provider = BamProvider::new(
            Client::new(),
            "http://127.0.0.1:1",
            "key",
            ParamProfiles::load(None).unwrap(),
        );
        let params = provider.default_params().clone();
        let err = provider
            .generate_text(&["hi".to_string()], &params)
            .await
            .unwrap_err();
        assert!(matches!(err, NotewiseError::Connection { code: 500, .. }));
    }
}
