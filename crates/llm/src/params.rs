use config::{Config, File, FileFormat};
use notewise_common::{NotewiseError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

const DEFAULT_PARAMS: &str = include_str!("../conf/params.toml");

/// Generation parameters for one use case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Model id on the hosting platform
    pub model: String,

    /// `greedy` or `sample`
    pub decoding_method: String,

    /// Maximum tokens to generate
    pub max_new_tokens: u32,

    /// Minimum tokens to generate
    #[serde(default)]
    pub min_new_tokens: u32,

    /// Request a streamed reply (replies are always read whole)
    #[serde(default)]
    pub stream: bool,

    #[serde(default)]
    pub repetition_penalty: Option<f32>,

    #[serde(default)]
    pub temperature: Option<f32>,

    #[serde(default)]
    pub top_k: Option<u32>,

    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Echo the prompt back (BAM only)
    #[serde(default)]
    pub input_text: bool,

    /// Return prompt tokens (BAM only)
    #[serde(default)]
    pub input_tokens: bool,
}

/// Parameter sets selected by the summary workflows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamProfiles {
    pub default: GenerationParams,
    pub major_incident: GenerationParams,
    pub telemetry: GenerationParams,
}

impl ParamProfiles {
    /// Load built-in parameters, overlaid by `override_path` when given
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_PARAMS, FileFormat::Toml));

        if let Some(path) = override_path {
            info!("Loading generation parameters from {}", path.display());
            builder = builder.add_source(File::from(path).required(true));
        }

        builder
            .build()
            .and_then(|c| c.try_deserialize::<Self>())
            .map_err(|e| {
                NotewiseError::config(format!("Failed to load generation parameters: {}", e))
            })
    }
}
