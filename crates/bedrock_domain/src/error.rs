use std::time::Duration;

/// Failure reported by an AWS call, keeping the service error code when the
/// SDK exposes one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("{code}: {message}")]
    Service { code: String, message: String },

    #[error("{0}")]
    Transport(String),
}

impl ProviderError {
    pub fn service(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Service { code: code.into(), message: message.into() }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// An attempt that did not finish within its timeout.
    pub fn timeout(timeout: Duration) -> Self {
        Self::Transport(format!("Request timed out after {}s", timeout.as_secs()))
    }

    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Service { code, .. } => Some(code),
            Self::Transport(_) => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Required environment variables are not set: {}", .names.join(", "))]
    MissingEnvironment { names: Vec<String> },

    #[error("No candidate models are configured")]
    NoCandidateModels,
}
