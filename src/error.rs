//! Error types shared across the crate

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AngelError {
    #[error("No daemon found matching '{0}'")]
    NoMatch(String),

    #[error("Multiple daemons found matching '{query}'")]
    Ambiguous {
        query: String,
        candidates: Vec<String>,
    },

    #[error("launchctl error: {0}")]
    Launchctl(String),

    #[error("failed to get status: {0}")]
    Status(#[from] crate::launchctl::PrintParseError),

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AngelError {
    /// NoMatch and Ambiguous are user guidance, not failures. The CLI prints
    /// them and exits zero so scripted callers can probe safely.
    pub fn is_clean_exit(&self) -> bool {
        matches!(self, AngelError::NoMatch(_) | AngelError::Ambiguous { .. })
    }
}

pub type Result<T> = std::result::Result<T, AngelError>;
