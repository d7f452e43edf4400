//! Notewise local text processing
//!
//! Work note cleansing, LLM input preprocessing and the local extractive summarizer

pub mod classifier;
pub mod extractive;
pub mod normalizer;
pub mod sentences;
pub mod worknote;

// Re-export main types
pub use classifier::{AcceptAll, ChitchatFilter, LineClassifier};
pub use extractive::ExtractiveSummarizer;
pub use normalizer::normalize;
pub use sentences::split_sentences;
pub use worknote::prepare_worknote;
