//! Notewise LLM Integration
//!
//! Prompt preparation, hosted LLM providers and structuring of model replies

mod chunking;
mod params;
mod prompts;
pub mod provider;
mod records;
mod structurer;
mod summarize;

pub use chunking::{chunk_for_prompts, chunk_text, estimate_tokens, TextChunk, MAX_INPUT_TOKENS};
pub use params::{GenerationParams, ParamProfiles};
pub use prompts::{PromptLibrary, SummaryType};
pub use provider::{provider_from_config, BamProvider, DataplatformProvider, LlmProvider};
pub use records::{BuildSummary, RecordShape, Schema, StructuredSummary};
pub use structurer::{extract_json_block, structure};
pub use summarize::{remove_email_parts, Summarizer};
