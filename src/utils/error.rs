use thiserror::Error;

/// 模擬失敗：`run_as_future_failing` 在延遲後一定會帶著它 reject
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Promise Error: {input}")]
pub struct SimulatedFailure {
    pub input: String,
}

impl SimulatedFailure {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum PrimerError {
    #[error(transparent)]
    SimulatedFailure(#[from] SimulatedFailure),

    #[error("Network request failed: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Unexpected HTTP status: {status}")]
    HttpStatusError { status: u16 },

    #[error("Response body is not valid JSON: {0}")]
    DecodeError(#[from] serde_json::Error),

    #[error("Response has no accessor named `{name}`")]
    UnknownAccessor { name: String },

    #[error("Deferred value was already settled")]
    AlreadySettled,

    #[error("Title cannot be sent as a path segment: `{title}`")]
    InvalidTitle { title: String },

    #[error("Invalid URL: {0}")]
    InvalidUrlError(#[from] url::ParseError),

    #[error("Endpoint cannot take path segments: {endpoint}")]
    UnsupportedEndpoint { endpoint: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// 錯誤分類，讓呼叫端不必比對字串就能區分失敗來源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Simulated,
    Network,
    Decode,
    Settlement,
    InvalidInput,
    Configuration,
}

impl PrimerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PrimerError::SimulatedFailure(_) => ErrorKind::Simulated,
            PrimerError::NetworkError(_) | PrimerError::HttpStatusError { .. } => {
                ErrorKind::Network
            }
            PrimerError::DecodeError(_) | PrimerError::UnknownAccessor { .. } => {
                ErrorKind::Decode
            }
            PrimerError::AlreadySettled => ErrorKind::Settlement,
            PrimerError::InvalidTitle { .. } => ErrorKind::InvalidInput,
            PrimerError::InvalidUrlError(_)
            | PrimerError::UnsupportedEndpoint { .. }
            | PrimerError::ConfigError { .. }
            | PrimerError::InvalidConfigValueError { .. }
            | PrimerError::IoError(_)
            | PrimerError::TomlError(_) => ErrorKind::Configuration,
        }
    }
}

pub type Result<T> = std::result::Result<T, PrimerError>;
