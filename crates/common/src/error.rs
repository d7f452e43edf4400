/// Notewise error types
#[derive(Debug, thiserror::Error)]
pub enum NotewiseError {
    /// Malformed request or input outside accepted bounds
    #[error("Validation error: {0}")]
    InvalidInput(String),

    /// Missing or wrong api-key
    #[error("{0}")]
    Auth(String),

    /// Not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Model output could not be read as JSON
    #[error("Parse error: {0}")]
    Parse(String),

    /// Backend produced an error or an unusable reply
    #[error("{message}")]
    Generation { code: u16, message: String },

    /// Backend could not be reached
    #[error("{message}")]
    Connection { code: u16, message: String },

    /// Local NLP processing failed
    #[error("NLP error: {0}")]
    Nlp(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General error (anyhow integration)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl NotewiseError {
    /// Create invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create auth error
    pub fn auth<S: Into<String>>(msg: S) -> Self {
        Self::Auth(msg.into())
    }

    /// Create not found error
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create parse error
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        Self::Parse(msg.into())
    }

    /// Create generation error with the default 500 code
    pub fn generation<S: Into<String>>(msg: S) -> Self {
        Self::Generation {
            code: 500,
            message: msg.into(),
        }
    }

    /// Create connection error with the default 500 code
    pub fn connection<S: Into<String>>(msg: S) -> Self {
        Self::Connection {
            code: 500,
            message: msg.into(),
        }
    }

    /// Create NLP error
    pub fn nlp<S: Into<String>>(msg: S) -> Self {
        Self::Nlp(msg.into())
    }

    /// Create config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }
}

// HTTP response conversion
impl NotewiseError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::Auth(_) => 403,
            Self::NotFound(_) => 404,
            Self::Parse(_) => 500,
            Self::Generation { code, .. } => *code,
            Self::Connection { code, .. } => *code,
            Self::Nlp(_) => 500,
            Self::Config(_) => 500,
            Self::Internal(_) => 500,
            Self::Io(_) => 500,
            Self::Json(_) => 400,
            Self::Other(_) => 500,
        }
    }
}
