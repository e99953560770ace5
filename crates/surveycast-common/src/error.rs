use thiserror::Error;

/// Ambient errors: configuration, IO, serialization.
#[derive(Debug, Error)]
pub enum SurveyError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown survey domain: {0}")]
    UnknownDomain(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, SurveyError>;

/// Failures of a single prediction submission.
///
/// The `Display` text of each variant is the exact message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// No endpoint configured; raised before any network activity.
    #[error("API URL not configured")]
    Configuration,

    #[error("Request timed out. Please try again.")]
    Timeout,

    #[error("Cannot connect to the server. Please check your internet connection and try again.")]
    Network,

    /// Non-2xx response. `message` is the body's `message` field or a generic fallback.
    #[error("Server error: {message}")]
    Server { status: u16, message: String },

    /// `detail` is for logs only and never reaches the page.
    #[error("An unexpected error occurred. Please try again.")]
    Unexpected { detail: String },
}

impl SubmitError {
    /// Short machine-readable class name, used in logs and JSON responses.
    pub fn kind(&self) -> &'static str {
        match self {
            SubmitError::Configuration   => "configuration",
            SubmitError::Timeout         => "timeout",
            SubmitError::Network         => "network",
            SubmitError::Server { .. }   => "server",
            SubmitError::Unexpected { .. } => "unexpected",
        }
    }

    pub fn unexpected(detail: impl Into<String>) -> Self {
        SubmitError::Unexpected { detail: detail.into() }
    }
}
