/// Errors building a client from configuration.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The config file could not be read.
    #[error("could not read config '{path}': {message}")]
    ConfigRead { path: String, message: String },

    /// The config file is not valid TOML for [`crate::ClientConfig`].
    #[error("could not parse config '{path}': {message}")]
    ConfigParse { path: String, message: String },

    /// The API URL is empty or not http(s).
    #[error("invalid API url '{0}': expected an http:// or https:// address")]
    InvalidUrl(String),
}

/// A request that never produced an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out: {0}")]
    Timeout(String),

    /// Connection refused, DNS failure, TLS failure and similar.
    #[error("network error: {0}")]
    Network(String),

    /// A status line arrived but the body could not be read.
    #[error("could not read response body: {0}")]
    Body(String),

    /// The blocking worker running the request panicked or was cancelled.
    #[error("request task failed: {0}")]
    Join(String),
}

/// A bearer token whose identity claims could not be extracted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token is not a three-part JWT")]
    Malformed,

    #[error("token claims are not valid base64url: {0}")]
    Encoding(String),

    #[error("token claims are not valid JSON: {0}")]
    Json(String),

    #[error("token claims carry no [email, role] identity")]
    MissingIdentity,
}
