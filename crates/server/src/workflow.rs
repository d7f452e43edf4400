use notewise_common::Result;
use notewise_llm::{chunk_for_prompts, BuildSummary, StructuredSummary, Summarizer};
use notewise_nlp::{normalize, prepare_worknote, ExtractiveSummarizer, LineClassifier};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Orchestrates local preprocessing and LLM summarization per endpoint
pub struct SummaryWorkflow {
    summarizer: Summarizer,
    extractive: ExtractiveSummarizer,
    classifier: Arc<dyn LineClassifier>,
}

impl SummaryWorkflow {
    pub fn new(summarizer: Summarizer, classifier: Arc<dyn LineClassifier>) -> Self {
        Self {
            summarizer,
            extractive: ExtractiveSummarizer::default(),
            classifier,
        }
    }

    pub fn platform(&self) -> &str {
        self.summarizer.provider_name()
    }

    /// Enforce the input limit, chunk and strip worknote boilerplate
    pub fn prepare_chunks(&self, text: &str) -> Result<Vec<String>> {
        let chunks: Vec<String> = chunk_for_prompts(text)?
            .iter()
            .map(|chunk| prepare_worknote(chunk))
            .collect();
        debug!("Prepared {} chunk(s) for the model", chunks.len());
        Ok(chunks)
    }

    /// Background cleansing work, detached from the request
    pub fn cleanse_job(&self, note: String) -> impl Future<Output = Result<String>> + Send + 'static {
        let classifier = Arc::clone(&self.classifier);
        async move {
            info!("Cleansing note of {} chars", note.len());
            normalize(&note, classifier.as_ref())
        }
    }

    pub fn short_summary(&self, note: &str) -> String {
        self.extractive.summarize(note)
    }

    #[instrument(skip_all, fields(chars = note.len()))]
    pub async fn long_summary(&self, note: &str) -> Result<String> {
        let chunks = self.prepare_chunks(note)?;
        self.summarizer.long_summary(&chunks).await
    }

    #[instrument(skip_all, fields(chars = note.len()))]
    pub async fn structured_summary(&self, note: &str) -> Result<StructuredSummary> {
        let chunks = self.prepare_chunks(note)?;
        self.summarizer.structured_summary(&chunks).await
    }

    #[instrument(skip_all, fields(chars = logs.len()))]
    pub async fn build_summary(&self, logs: &str) -> Result<BuildSummary> {
        let chunks = self.prepare_chunks(logs)?;
        self.summarizer.build_summary(&chunks).await
    }

    #[instrument(skip_all, fields(chars = note.len()))]
    pub async fn major_incident_communication(&self, note: &str) -> Result<String> {
        self.summarizer.major_incident_communication(note).await
    }

    #[instrument(skip(self, error))]
    pub async fn telemetry_summary(&self, anomaly: &str, metric: &str, error: &str) -> Result<String> {
        self.summarizer.telemetry_summary(anomaly, metric, error).await
    }
}
