use notewise_common::{NotewiseError, Result};
use std::sync::Arc;
use tracing::{debug, info};

use crate::params::GenerationParams;
use crate::prompts::{PromptLibrary, SummaryType};
use crate::provider::LlmProvider;
use crate::records::{BuildSummary, StructuredSummary};
use crate::structurer::structure;

/// Lines of a generated email that carry headers or sign-offs
const EMAIL_PARTS: [&str; 4] = ["Subject:", "Dear", "Best regards", "Your Name"];

/// Drop greeting, subject and signature lines from a generated email
pub fn remove_email_parts(text: &str) -> String {
    text.lines()
        .filter(|line| !EMAIL_PARTS.iter().any(|part| line.contains(part)))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Prompt building and generation for every summary kind
pub struct Summarizer {
    provider: Arc<dyn LlmProvider>,
    prompts: PromptLibrary,
}

impl Summarizer {
    /// Create new summarizer
    pub fn new(provider: Arc<dyn LlmProvider>, prompts: PromptLibrary) -> Self {
        Self { provider, prompts }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// One generation per chunk, outputs joined with a space
    pub async fn summarize_chunks(&self, kind: SummaryType, chunks: &[String]) -> Result<String> {
        let prompts = self.prompts.build_prompts(kind, chunks)?;
        info!("Generating {} for {} chunk(s)", kind, prompts.len());

        let outputs = self
            .provider
            .generate_text(&prompts, self.provider.default_params())
            .await?;

        debug!("Received {} output(s) for {}", outputs.len(), kind);
        Ok(outputs.join(" "))
    }

    pub async fn long_summary(&self, chunks: &[String]) -> Result<String> {
        self.summarize_chunks(SummaryType::LongSummary, chunks).await
    }

    pub async fn structured_summary(&self, chunks: &[String]) -> Result<StructuredSummary> {
        let raw = self
            .summarize_chunks(SummaryType::StructuredSummary, chunks)
            .await?;
        structure(&raw)
    }

    pub async fn build_summary(&self, chunks: &[String]) -> Result<BuildSummary> {
        let raw = self
            .summarize_chunks(SummaryType::BuildSummary, chunks)
            .await?;
        structure(&raw)
    }

    /// Incident notification body for the whole note
    pub async fn major_incident_communication(&self, note: &str) -> Result<String> {
        let prompt = self
            .prompts
            .build_prompt(SummaryType::MajorIncidentCommunication, note)?;
        let output = self
            .generate_single(prompt, self.provider.major_incident_params())
            .await?;
        Ok(remove_email_parts(&output))
    }

    /// Root-cause explanation for a telemetry anomaly
    pub async fn telemetry_summary(&self, anomaly: &str, metric: &str, error: &str) -> Result<String> {
        let prompt = self.prompts.build_telemetry_prompt(anomaly, metric, error)?;
        self.generate_single(prompt, self.provider.telemetry_params())
            .await
    }

    async fn generate_single(&self, prompt: String, params: &GenerationParams) -> Result<String> {
        self.provider
            .generate_text(&[prompt], params)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| NotewiseError::generation("The model returned no output."))
    }
}
