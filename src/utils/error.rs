use thiserror::Error;

#[derive(Error, Debug)]
pub enum PanelError {
    #[error("Transport error: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("Provider error: {response}")]
    ProviderError { response: String },

    #[error("Invalid {field}: {reason}")]
    ValidationError { field: String, reason: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 呼叫外部端點時的網路錯誤
    Transport,
    /// 端點回應內容不符預期
    Provider,
    /// 送出前的輸入檢查失敗
    Validation,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PanelError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        PanelError::ValidationError {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn provider(response: impl Into<String>) -> Self {
        PanelError::ProviderError {
            response: response.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            PanelError::TransportError(_) => ErrorCategory::Transport,
            PanelError::ProviderError { .. } => ErrorCategory::Provider,
            PanelError::ValidationError { .. } => ErrorCategory::Validation,
            PanelError::ConfigError { .. }
            | PanelError::MissingConfigError { .. }
            | PanelError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            PanelError::CsvError(_)
            | PanelError::IoError(_)
            | PanelError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation => ErrorSeverity::Low,
            ErrorCategory::Transport | ErrorCategory::Provider => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            PanelError::TransportError(e) if e.is_timeout() => {
                "The endpoint did not answer in time; check connectivity or raise timeout_seconds"
                    .to_string()
            }
            PanelError::TransportError(_) => {
                "Check the endpoint URL and your network connection".to_string()
            }
            PanelError::ProviderError { .. } => {
                "Read the provider's response above; balance, service ID or link may be wrong"
                    .to_string()
            }
            PanelError::ValidationError { field, .. } => {
                format!("Correct the {} value and submit again", field)
            }
            PanelError::MissingConfigError { field } => {
                format!("Set {} in the config file, on the command line or in the environment", field)
            }
            PanelError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of {} in your configuration", field)
            }
            PanelError::ConfigError { .. } => "Check the configuration file syntax".to_string(),
            PanelError::CsvError(_) | PanelError::IoError(_) => {
                "Check that the output path exists and is writable".to_string()
            }
            PanelError::SerializationError(_) => {
                "The data could not be serialized; report this as a bug".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PanelError::TransportError(e) => format!("Could not reach the endpoint: {}", e),
            PanelError::ProviderError { response } => {
                format!("Provider rejected the request: {}", response)
            }
            PanelError::ValidationError { field, reason } => format!("{}: {}", field, reason),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PanelError>;
