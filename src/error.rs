use thiserror::Error;

pub type Result<T> = std::result::Result<T, WsawError>;

#[derive(Debug, Error)]
pub enum WsawError {
    /// Cache I/O failed. Always fatal for the invocation.
    #[error("cache {op} failed for key `{key}`: {source}")]
    Cache {
        op: &'static str,
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("http error: {0}")]
    Http(String),
    /// The directory page could not be fetched. Recoverable: callers fall
    /// back to whatever was stored before.
    #[error("source page unreachable: {0}")]
    Unreachable(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("extraction task failed: {0}")]
    Task(String),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl WsawError {
    pub fn cache(op: &'static str, key: &str, source: std::io::Error) -> Self {
        WsawError::Cache {
            op,
            key: key.to_string(),
            source,
        }
    }
}

/* Conversions so `?` works smoothly */
impl From<tokio::task::JoinError> for WsawError {
    fn from(e: tokio::task::JoinError) -> Self {
        WsawError::Task(e.to_string())
    }
}
