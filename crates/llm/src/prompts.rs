//! Prompt templates for summarization

use config::{Config, File, FileFormat};
use notewise_common::{NotewiseError, Result};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use tracing::info;

const DEFAULT_PROMPTS: &str = include_str!("../conf/prompts.toml");

/// Kind of artifact requested from the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SummaryType {
    LongSummary,
    StructuredSummary,
    BuildSummary,
    MajorIncidentCommunication,
    TelemetrySummary,
}

impl SummaryType {
    /// Key of the template in the `[summary]` section
    pub fn template_key(&self) -> &'static str {
        match self {
            Self::LongSummary => "long_summary",
            Self::StructuredSummary => "structured_summary",
            Self::BuildSummary => "build_summary_structured",
            Self::MajorIncidentCommunication => "major_incident_communication",
            Self::TelemetrySummary => "llama_telemetry_summary",
        }
    }
}

impl fmt::Display for SummaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.template_key())
    }
}

/// Prompt templates keyed by summary type
#[derive(Debug, Clone)]
pub struct PromptLibrary {
    templates: HashMap<String, String>,
}

impl PromptLibrary {
    /// Load built-in templates, overlaid by `override_path` when given
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_PROMPTS, FileFormat::Toml));

        if let Some(path) = override_path {
            info!("Loading prompt templates from {}", path.display());
            builder = builder.add_source(File::from(path).required(true));
        }

        let templates = builder
            .build()
            .and_then(|c| c.get::<HashMap<String, String>>("summary"))
            .map_err(|e| NotewiseError::config(format!("Failed to load prompt templates: {}", e)))?;

        Ok(Self { templates })
    }

    /// Library from in-memory templates
    pub fn from_templates(templates: HashMap<String, String>) -> Self {
        Self { templates }
    }

    /// Raw template for a summary type
    pub fn template(&self, summary_type: SummaryType) -> Result<&str> {
        self.templates
            .get(summary_type.template_key())
            .map(String::as_str)
            .ok_or_else(|| {
                NotewiseError::config(format!(
                    "Unable to read prompt for: {}",
                    summary_type.template_key()
                ))
            })
    }

    /// One prompt per chunk
    pub fn build_prompts(&self, summary_type: SummaryType, chunks: &[String]) -> Result<Vec<String>> {
        let template = self.template(summary_type)?;
        Ok(chunks
            .iter()
            .map(|chunk| template.replace("{text}", chunk))
            .collect())
    }

    /// Single prompt for the whole text
    pub fn build_prompt(&self, summary_type: SummaryType, text: &str) -> Result<String> {
        Ok(self.template(summary_type)?.replace("{text}", text))
    }

    /// Telemetry root-cause prompt
    pub fn build_telemetry_prompt(&self, anomaly: &str, metric: &str, error: &str) -> Result<String> {
        Ok(self
            .template(SummaryType::TelemetrySummary)?
            .replace("{anomaly}", anomaly)
            .replace("{metric}", metric)
            .replace("{log_message}", error))
    }
}
