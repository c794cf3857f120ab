use std::time::Duration;
use thiserror::Error;

/// Upstream error bodies are cut to this many characters before they are surfaced.
pub const MAX_ERROR_BODY_CHARS: usize = 1500;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration document: {0}")]
    ConfigParse(#[source] serde_json::Error),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Board API error: {0}")]
    BoardApi(String),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Auth,
    Transport,
    Output,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Config(_) | Error::ConfigParse(_) => ErrorKind::Config,
            Error::Auth(_) | Error::InvalidHeader(_) => ErrorKind::Auth,
            Error::BoardApi(_) | Error::ParseError(_) | Error::Timeout(_) | Error::Network(_) => {
                ErrorKind::Transport
            }
            Error::Io(_) | Error::Csv(_) => ErrorKind::Output,
        }
    }

    /// Process exit code reported to whoever launched the run.
    pub fn exit_code(&self) -> u8 {
        match self.kind() {
            ErrorKind::Config => 2,
            ErrorKind::Auth => 3,
            ErrorKind::Transport => 4,
            ErrorKind::Output => 5,
        }
    }

    pub fn is_transport(&self) -> bool {
        self.kind() == ErrorKind::Transport
    }
}

/// Keeps the head of an upstream payload so error messages stay bounded.
pub fn truncate_body(body: &str) -> String {
    match body.char_indices().nth(MAX_ERROR_BODY_CHARS) {
        Some((idx, _)) => format!("{}… [truncated]", &body[..idx]),
        None => body.to_string(),
    }
}
