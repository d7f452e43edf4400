use notewise_common::{AppConfig, Result};
use notewise_llm::{provider_from_config, LlmProvider, ParamProfiles, PromptLibrary, Summarizer};
use notewise_nlp::ChitchatFilter;
use std::sync::Arc;

use crate::job_manager::JobManager;
use crate::workflow::SummaryWorkflow;

/// Shared application state
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,

    /// Background cleansing jobs
    pub job_manager: JobManager,

    /// Summary and cleansing pipeline
    pub workflow: SummaryWorkflow,
}

impl AppState {
    /// Create new application state with the configured LLM platform
    pub fn new(config: AppConfig) -> Result<Self> {
        let params = ParamProfiles::load(config.params_path.as_deref())?;
        let prompts = PromptLibrary::load(config.prompts_path.as_deref())?;
        let provider = provider_from_config(&config, params)?;

        Ok(Self::with_provider(config, provider, prompts))
    }

    /// State around an already built provider
    pub fn with_provider(
        config: AppConfig,
        provider: Arc<dyn LlmProvider>,
        prompts: PromptLibrary,
    ) -> Self {
        let summarizer = Summarizer::new(provider, prompts);
        Self {
            config,
            job_manager: JobManager::new(),
            workflow: SummaryWorkflow::new(summarizer, Arc::new(ChitchatFilter::new())),
        }
    }
}
