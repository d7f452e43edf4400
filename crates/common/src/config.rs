use crate::error::NotewiseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Hosted LLM platform that serves generation requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmPlatform {
    /// IBM Research BAM
    Bam,
    /// watsonx.ai data platform
    Dataplatform,
}

impl FromStr for LlmPlatform {
    type Err = NotewiseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bam" => Ok(Self::Bam),
            "dataplatform" | "watsonx" => Ok(Self::Dataplatform),
            other => Err(NotewiseError::config(format!(
                "Unknown PLATFORM '{}', expected BAM or DATAPLATFORM",
                other
            ))),
        }
    }
}

impl fmt::Display for LlmPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bam => write!(f, "bam"),
            Self::Dataplatform => write!(f, "dataplatform"),
        }
    }
}

/// Notewise application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Shared secret expected in the `api-key` header
    pub app_api_key: String,

    /// Active LLM platform
    pub platform: LlmPlatform,

    /// BAM API key
    pub bam_api_key: String,

    /// BAM API base URL
    pub bam_api_url: String,

    /// watsonx API key
    pub wx_api_key: String,

    /// watsonx API base URL
    pub wx_api_url: String,

    /// watsonx project id
    pub wx_project_id: String,

    /// IBM Cloud IAM token endpoint
    pub wx_iam_url: String,

    /// Optional prompt template overrides
    pub prompts_path: Option<PathBuf>,

    /// Optional generation parameter overrides
    pub params_path: Option<PathBuf>,

    /// Timeout for LLM calls in seconds
    pub llm_timeout_secs: u64,

    /// Server bind address
    pub server_host: String,

    /// Server port
    pub server_port: u16,

    /// Log directory
    pub log_dir: PathBuf,

    /// Log level
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_api_key: String::new(),
            platform: LlmPlatform::Bam,
            bam_api_key: String::new(),
            bam_api_url: "https://bam-api.res.ibm.com".to_string(),
            wx_api_key: String::new(),
            wx_api_url: "https://us-south.ml.cloud.ibm.com".to_string(),
            wx_project_id: String::new(),
            wx_iam_url: "https://iam.cloud.ibm.com/identity/token".to_string(),
            prompts_path: None,
            params_path: None,
            llm_timeout_secs: 300,
            server_host: "0.0.0.0".to_string(),
            server_port: 8080,
            log_dir: PathBuf::from("./log"),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and .env file
    pub fn from_env() -> Result<Self, NotewiseError> {
        // Load .env file (ignore if not exists)
        let _ = dotenv::dotenv();

        let defaults = Self::default();

        let platform = match std::env::var("PLATFORM") {
            Ok(value) => value.parse()?,
            Err(_) => defaults.platform,
        };

        let config = Self {
            app_api_key: std::env::var("APP_API_KEY").unwrap_or_default(),
            platform,
            bam_api_key: std::env::var("GENAI_KEY").unwrap_or_default(),
            bam_api_url: std::env::var("GENAI_API").unwrap_or(defaults.bam_api_url),
            wx_api_key: std::env::var("WX_GENAI_KEY").unwrap_or_default(),
            wx_api_url: std::env::var("WX_GENAI_API").unwrap_or(defaults.wx_api_url),
            wx_project_id: std::env::var("WX_GENAI_PROJECT_ID").unwrap_or_default(),
            wx_iam_url: std::env::var("WX_IAM_URL").unwrap_or(defaults.wx_iam_url),
            prompts_path: Self::get_env_path("PROMPTS_PATH"),
            params_path: Self::get_env_path("PARAMS_PATH"),
            llm_timeout_secs: std::env::var("LLM_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.llm_timeout_secs),
            server_host: std::env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: std::env::var("SERVER_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.server_port),
            log_dir: Self::get_env_path("LOG_DIR").unwrap_or(defaults.log_dir),
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
        };

        // Ensure required directories exist
        config.ensure_directories()?;

        Ok(config)
    }

    /// Get PathBuf from environment variable
    fn get_env_path(key: &str) -> Option<PathBuf> {
        std::env::var(key).ok().map(PathBuf::from)
    }

    /// Ensure required directories exist, create if not
    pub fn ensure_directories(&self) -> Result<(), NotewiseError> {
        if !self.log_dir.exists() {
            std::fs::create_dir_all(&self.log_dir).map_err(|e| {
                NotewiseError::config(format!(
                    "Failed to create directory {}: {}",
                    self.log_dir.display(),
                    e
                ))
            })?;
        }

        Ok(())
    }

    /// Get server bind address (host:port)
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Base URL of the active platform
    pub fn platform_url(&self) -> &str {
        match self.platform {
            LlmPlatform::Bam => &self.bam_api_url,
            LlmPlatform::Dataplatform => &self.wx_api_url,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), NotewiseError> {
        if self.app_api_key.is_empty() {
            return Err(NotewiseError::config("APP_API_KEY cannot be empty"));
        }

        let url = self.platform_url();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(NotewiseError::config(format!(
                "{} API URL must start with http:// or https://",
                self.platform
            )));
        }

        if self.platform == LlmPlatform::Dataplatform && self.wx_project_id.is_empty() {
            return Err(NotewiseError::config(
                "WX_GENAI_PROJECT_ID is required for the dataplatform provider",
            ));
        }

        // Validate port range
        if self.server_port == 0 {
            return Err(NotewiseError::config("Server port cannot be 0"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> AppConfig {
        AppConfig {
            app_api_key: "secret".to_string(),
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.platform, LlmPlatform::Bam);
    }

    #[test]
    fn test_server_bind_address() {
        let config = AppConfig::default();
        assert_eq!(config.server_bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_platform_parse() {
        assert_eq!("BAM".parse::<LlmPlatform>().unwrap(), LlmPlatform::Bam);
        assert_eq!(
            " DataPlatform ".parse::<LlmPlatform>().unwrap(),
            LlmPlatform::Dataplatform
        );
        assert!("openai".parse::<LlmPlatform>().is_err());
    }

    #[test]
    fn test_validate() {
        assert!(valid_config().validate().is_ok());

        // Missing shared secret
        assert!(AppConfig::default().validate().is_err());

        let mut invalid = valid_config();
        invalid.bam_api_url = "bam-api.res.ibm.com".to_string();
        assert!(invalid.validate().is_err());

        let mut invalid = valid_config();
        invalid.platform = LlmPlatform::Dataplatform;
        assert!(invalid.validate().is_err());
        invalid.wx_project_id = "project".to_string();
        assert!(invalid.validate().is_ok());
    }
}
