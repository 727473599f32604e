use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Failed to load updates: {0}")]
    Fetch(#[from] FetchError),

    #[error("Background task failed: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Why a feed load failed.
///
/// Every variant ends up rendered the same way (the fallback fragment); the
/// distinction only shows up in logs.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Upstream answered with a non-success status
    #[error("HTTP {status} for URL: {url}")]
    Transport {
        status: reqwest::StatusCode,
        url: String,
    },

    /// No usable response at all (connect, timeout, body read)
    #[error("HTTP request error: {0}")]
    Request(#[from] reqwest::Error),

    /// Body was not the markup/JSON we expected
    #[error("Response parsing error: {0}")]
    Parse(String),

    /// Upstream returned a structured error payload
    #[error("Upstream reported errors: {}", .0.join("; "))]
    Application(Vec<String>),
}

impl FetchError {
    /// Short label used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Transport { .. } => "transport",
            FetchError::Request(_) => "request",
            FetchError::Parse(_) => "parse",
            FetchError::Application(_) => "application",
        }
    }
}
