use std::fmt;

#[derive(Debug)]
pub enum SvgenError {
    ConfigError(String),
    ProviderError { status: u16, message: String },
    NoImage,
    TransportError(String),
}

impl SvgenError {
    /// HTTP status the proxy boundary answers with for this failure.
    pub fn status_code(&self) -> u16 {
        match self {
            SvgenError::ProviderError { status, .. } => *status,
            SvgenError::ConfigError(_) | SvgenError::NoImage | SvgenError::TransportError(_) => 500,
        }
    }

    /// Message placed in the `{"error": ...}` body at the proxy boundary.
    /// Provider messages pass through verbatim, without the Display prefix.
    pub fn response_message(&self) -> String {
        match self {
            SvgenError::ConfigError(msg) => msg.clone(),
            SvgenError::ProviderError { message, .. } => message.clone(),
            SvgenError::NoImage => "No image returned.".to_string(),
            SvgenError::TransportError(msg) => msg.clone(),
        }
    }
}

impl fmt::Display for SvgenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SvgenError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            SvgenError::ProviderError { status, message } => {
                write!(f, "Provider error ({}): {}", status, message)
            }
            SvgenError::NoImage => write!(f, "No image returned."),
            SvgenError::TransportError(msg) => write!(f, "Transport error: {}", msg),
        }
    }
}

impl std::error::Error for SvgenError {}

pub type Result<T> = std::result::Result<T, SvgenError>;
