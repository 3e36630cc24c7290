use thiserror::Error;

/// Fatal configuration problems, raised before any probe executes.
///
/// Transport-level failures (connection refused, DNS, timeout) are never
/// represented here: they are downgraded to per-probe data in
/// [`crate::probe::result::ProbeResult`] so one failing probe cannot abort
/// the session.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("bearer token is missing or empty")]
    MissingToken,

    #[error("bearer token contains characters not allowed in a header value")]
    InvalidToken,

    #[error("request spec #{index} has an empty path")]
    EmptyPath { index: usize },

    #[error("request path '{path}' cannot be joined to the base URL: {source}")]
    InvalidPath {
        path: String,
        source: url::ParseError,
    },

    #[error("invalid header name '{name}'")]
    InvalidHeaderName { name: String },

    #[error("invalid value for header '{name}'")]
    InvalidHeaderValue { name: String },

    #[error("cannot serialize the JSON body for '{path}': {source}")]
    InvalidBody {
        path: String,
        source: serde_json::Error,
    },

    #[error("concurrency must be at least 1")]
    InvalidConcurrency,

    #[error("failed to build the HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("cannot read config file '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}
